//! Request ordering and per-resource state for polled fetches.
//!
//! A [`Poller`] moves `Idle -> Fetching -> {Succeeded, Failed} -> Idle`.
//! Fetching is entered on every poll tick and on every dependency change,
//! and earlier requests are never cancelled. Each request is tagged with a
//! [`Ticket`] from a monotonically increasing counter so that a slow
//! response from before a dependency change cannot overwrite newer data.

use std::rc::Rc;

use crate::models::error::AppError;

/// What a view needs to render one resource.
///
/// The flags are independent: a resource can be loading while still showing
/// data from the previous fetch, or show an error banner above stale data.
#[derive(Debug, PartialEq)]
pub struct DataState<T> {
    data: Option<Rc<T>>,
    loading: bool,
    error: Option<String>,
}

impl<T> DataState<T> {
    /// State before the first fetch has been issued.
    pub fn idle() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }

    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::idle()
        }
    }

    pub fn loaded(data: T) -> Self {
        Self {
            data: Some(Rc::new(data)),
            ..Self::idle()
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns the most recent data, which may be stale if the last fetch failed.
    pub fn data(&self) -> Option<&Rc<T>> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// `true` while nothing has arrived yet and a fetch is in flight.
    pub fn is_first_load(&self) -> bool {
        self.loading && self.data.is_none()
    }

    fn apply(&mut self, result: Result<T, AppError>) {
        match result {
            Ok(data) => {
                self.data = Some(Rc::new(data));
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}

impl<T> Clone for DataState<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            loading: self.loading,
            error: self.error.clone(),
        }
    }
}

impl<T> Default for DataState<T> {
    fn default() -> Self {
        Self::idle()
    }
}

/// How overlapping responses are reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseOrdering {
    /// Only the most recently issued request may update state.
    #[default]
    LatestIssued,
    /// Every response is applied as it arrives, so a slow stale response can
    /// overwrite fresher data.
    Arrival,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollPhase {
    Idle,
    Fetching,
    Succeeded,
    Failed,
}

/// Sequence number of one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Discarded,
}

#[derive(Debug)]
pub struct Poller<T> {
    ordering: ResponseOrdering,
    last_issued: u64,
    latest_completed: bool,
    in_flight: usize,
    phase: PollPhase,
    state: DataState<T>,
}

impl<T> Poller<T> {
    pub fn new(ordering: ResponseOrdering) -> Self {
        Self {
            ordering,
            last_issued: 0,
            latest_completed: true,
            in_flight: 0,
            phase: PollPhase::Idle,
            state: DataState::idle(),
        }
    }

    pub fn phase(&self) -> PollPhase {
        self.phase
    }

    pub fn state(&self) -> &DataState<T> {
        &self.state
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Issues a ticket for a new request and enters `Fetching`.
    pub fn begin(&mut self) -> Ticket {
        self.last_issued += 1;
        self.latest_completed = false;
        self.in_flight += 1;
        self.phase = PollPhase::Fetching;
        self.state.loading = true;
        Ticket(self.last_issued)
    }

    /// Records the result of the request identified by `ticket`.
    pub fn complete(&mut self, ticket: Ticket, result: Result<T, AppError>) -> Outcome {
        self.in_flight = self.in_flight.saturating_sub(1);
        let is_latest = ticket.0 == self.last_issued;
        if is_latest {
            self.latest_completed = true;
        }

        let outcome = if is_latest || self.ordering == ResponseOrdering::Arrival {
            if !is_latest {
                log::debug!(
                    "Applying response #{} after #{} was issued",
                    ticket.0,
                    self.last_issued
                );
            }
            let failed = result.is_err();
            self.state.apply(result);
            self.phase = if failed {
                PollPhase::Failed
            } else {
                PollPhase::Succeeded
            };
            Outcome::Applied
        } else {
            log::warn!(
                "Discarding stale response #{} (latest is #{})",
                ticket.0,
                self.last_issued
            );
            Outcome::Discarded
        };

        self.state.loading = match self.ordering {
            ResponseOrdering::LatestIssued => !self.latest_completed,
            ResponseOrdering::Arrival => self.in_flight > 0,
        };
        if self.state.loading {
            self.phase = PollPhase::Fetching;
        }

        outcome
    }

    /// Returns to `Idle` once the last result has been handed to the view.
    pub fn settle(&mut self) {
        if self.phase != PollPhase::Fetching {
            self.phase = PollPhase::Idle;
        }
    }
}

impl<T> Default for Poller<T> {
    fn default() -> Self {
        Self::new(ResponseOrdering::default())
    }
}
