//! Trailing-edge debounce for budget update subscribers.

use std::time::{Duration, Instant};

use super::BudgetUpdateEvent;
use crate::constants::UPDATE_DEBOUNCE;

/// State of a trailing-edge debouncer.
#[derive(Debug, Clone)]
pub enum DebounceState {
    /// Nothing held; the next offer arms the timer.
    Idle,
    /// An event is held until `deadline`. Later offers replace the event and
    /// push the deadline out, so a burst collapses to its last member.
    PendingFire {
        deadline: Instant,
        event: BudgetUpdateEvent,
    },
}

/// Coalesces a burst of updates into one delayed delivery.
///
/// The debouncer is a pure state machine: callers supply the clock through
/// `now` arguments and own the alarm that wakes them at [`next_deadline`].
/// [`BudgetObserver`](super::BudgetObserver) drives one of these from a
/// timer task; tests drive it with synthetic instants.
///
/// [`next_deadline`]: Debouncer::next_deadline
pub struct Debouncer {
    window: Duration,
    state: DebounceState,
}

impl Debouncer {
    /// Debouncer with the standard subscriber window.
    pub fn new() -> Self {
        Self::with_window(UPDATE_DEBOUNCE)
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            state: DebounceState::Idle,
        }
    }

    /// Records an event arriving at `now`.
    ///
    /// Any held event is replaced and the fire deadline restarts at
    /// `now + window`; the last event of a burst wins.
    pub fn offer(&mut self, event: BudgetUpdateEvent, now: Instant) {
        self.state = DebounceState::PendingFire {
            deadline: now + self.window,
            event,
        };
    }

    /// Releases the held event if its deadline has passed.
    ///
    /// Returns the event at most once; the debouncer returns to idle after
    /// firing. Polling early returns `None` and leaves the state untouched.
    pub fn poll(&mut self, now: Instant) -> Option<BudgetUpdateEvent> {
        let due = matches!(&self.state, DebounceState::PendingFire { deadline, .. } if *deadline <= now);
        if !due {
            return None;
        }
        match std::mem::replace(&mut self.state, DebounceState::Idle) {
            DebounceState::PendingFire { event, .. } => Some(event),
            DebounceState::Idle => None,
        }
    }

    /// Deadline the caller's alarm should wake at, if an event is held.
    pub fn next_deadline(&self) -> Option<Instant> {
        match &self.state {
            DebounceState::PendingFire { deadline, .. } => Some(*deadline),
            DebounceState::Idle => None,
        }
    }

    /// Discards the held event without firing, returning it for logging.
    ///
    /// Used on unsubscribe so no delivery happens after teardown.
    pub fn cancel(&mut self) -> Option<BudgetUpdateEvent> {
        match std::mem::replace(&mut self.state, DebounceState::Idle) {
            DebounceState::PendingFire { event, .. } => Some(event),
            DebounceState::Idle => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, DebounceState::PendingFire { .. })
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}
