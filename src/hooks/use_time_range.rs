use yew::prelude::*;

use crate::models::time_range::{RelativeWindow, TimeRange};

/// Handle returned by `use_time_range` hook
#[derive(Clone, PartialEq)]
pub struct TimeRangeHandle {
    pub range: TimeRange,
    /// Why the last custom range was rejected, if it was.
    pub error: Option<String>,
    pub set_window: Callback<RelativeWindow>,
    /// Takes the raw `(start, end)` input values.
    pub set_custom: Callback<(String, String)>,
}

/// Time range selection. An invalid custom range never replaces the current
/// one, so nothing is fetched for it.
#[hook]
pub fn use_time_range() -> TimeRangeHandle {
    let range = use_state(TimeRange::default);
    let error = use_state(|| None::<String>);

    let set_window = {
        let range = range.clone();
        let error = error.clone();
        Callback::from(move |window: RelativeWindow| {
            error.set(None);
            range.set(TimeRange::Relative(window));
        })
    };

    let set_custom = {
        let range = range.clone();
        let error = error.clone();
        Callback::from(move |(start, end): (String, String)| {
            match TimeRange::parse_custom(&start, &end) {
                Ok(custom) => {
                    error.set(None);
                    range.set(custom);
                }
                Err(e) => {
                    log::warn!("Rejected custom range: {e}");
                    error.set(Some(e.to_string()));
                }
            }
        })
    };

    TimeRangeHandle {
        range: *range,
        error: (*error).clone(),
        set_window,
        set_custom,
    }
}
