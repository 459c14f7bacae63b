use gloo_timers::future::TimeoutFuture;
use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::models::error::AppError;
use crate::services::poller::{DataState, Outcome, PollPhase, Poller, ResponseOrdering};

/// Fetches a resource whenever `deps` change and, if `interval_ms` is set,
/// again after each completed fetch.
///
/// Nothing is fetched while `enabled` is false. Requests already in flight
/// when `deps` change are not cancelled; their responses are discarded unless
/// they belong to the latest request.
#[hook]
pub fn use_polled<T, D, F, Fut>(
    enabled: bool,
    deps: D,
    interval_ms: Option<u32>,
    fetch: F,
) -> DataState<T>
where
    T: 'static,
    D: PartialEq + Clone + 'static,
    F: FnOnce(D) -> Fut + 'static,
    Fut: Future<Output = Result<T, AppError>> + 'static,
{
    let poller = use_mut_ref(|| Poller::<T>::new(ResponseOrdering::LatestIssued));
    let snapshot = use_state(DataState::<T>::idle);
    let trigger = use_state(|| 0u32); // Polling trigger

    {
        let poller = poller.clone();
        let snapshot = snapshot.clone();
        let trigger_value = *trigger;

        use_effect_with((trigger_value, enabled, deps), move |(_, enabled, deps)| {
            let stopped = Rc::new(Cell::new(false));

            if *enabled {
                let stopped_check = stopped.clone();
                let ticket = poller.borrow_mut().begin();
                snapshot.set(poller.borrow().state().clone());
                let request = fetch(deps.clone());

                spawn_local(async move {
                    let result = request.await;

                    {
                        let mut poller = poller.borrow_mut();
                        let outcome = poller.complete(ticket, result);
                        if outcome == Outcome::Applied && poller.phase() == PollPhase::Failed {
                            log::warn!(
                                "Fetch #{} failed: {}",
                                ticket.sequence(),
                                poller.state().error().unwrap_or_default()
                            );
                        }
                        snapshot.set(poller.state().clone());
                        poller.settle();
                    }

                    // Schedule next poll if enabled
                    if let Some(interval) = interval_ms {
                        if stopped_check.get() {
                            return;
                        }
                        TimeoutFuture::new(interval).await;
                        if !stopped_check.get() {
                            trigger.set(trigger_value.wrapping_add(1)); // Trigger next fetch
                        }
                    }
                });
            }

            move || {
                stopped.set(true);
            }
        });
    }

    (*snapshot).clone()
}
