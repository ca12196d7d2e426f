//! Process-local budget update bus.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, Weak};

use rust_decimal::Decimal;

use super::BudgetUpdateEvent;

/// Callback invoked with every delivered budget update.
///
/// Callbacks run synchronously on the emitting thread and must stay fast and
/// non-blocking (no storage writes, no network); a channel send is the
/// expected shape for anything heavier.
pub type UpdateCallback = dyn Fn(&BudgetUpdateEvent) + Send + Sync;

/// Subscriber list and latest-event slot.
///
/// Guarded by a single mutex so that replay-on-subscribe and emit agree on
/// what "latest" means: a subscriber is registered and handed the latest
/// event as one atomic step.
struct BusInner {
    next_id: u64,
    subscribers: Vec<(u64, Arc<UpdateCallback>)>,
    latest: Option<BudgetUpdateEvent>,
}

/// Process-local event bus announcing "budget X changed by amount Y".
///
/// Constructed once at application start and handed to mutation call sites
/// and observers by explicit reference; there are no module-level globals.
/// Delivery is synchronous and in registration order. A subscriber that
/// panics is logged and skipped, never allowed to block delivery to the
/// subscribers after it.
pub struct BudgetUpdateBus {
    inner: Arc<Mutex<BusInner>>,
}

impl BudgetUpdateBus {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(BusInner {
                next_id: 0,
                subscribers: Vec::new(),
                latest: None,
            })),
        }
    }

    /// Announces a budget change to every currently-registered subscriber.
    ///
    /// Stamps a fresh [`BudgetUpdateEvent`], stores it as the latest update,
    /// then invokes the subscribers registered at that moment, in
    /// registration order. The list is snapshotted first and each entry is
    /// re-checked immediately before its callback runs, so a subscriber
    /// removed mid-delivery (by an earlier callback) is not invoked.
    pub fn emit(&self, budget_id: &str, expense_amount: Decimal) {
        let event = BudgetUpdateEvent::new(budget_id, expense_amount);
        let snapshot: Vec<(u64, Arc<UpdateCallback>)> = {
            let mut inner = self.inner.lock().unwrap();
            inner.latest = Some(event.clone());
            inner.subscribers.clone()
        };

        for (id, callback) in snapshot {
            let still_registered = {
                let inner = self.inner.lock().unwrap();
                inner.subscribers.iter().any(|(sid, _)| *sid == id)
            };
            if !still_registered {
                continue;
            }
            if catch_unwind(AssertUnwindSafe(|| callback(&event))).is_err() {
                log::error!(
                    "Budget update subscriber {} panicked for budget {}; continuing delivery",
                    id,
                    event.budget_id
                );
            }
        }
    }

    /// Registers a callback and returns its subscription handle.
    ///
    /// If an event has already been emitted this process lifetime, the
    /// callback receives it synchronously before this returns, so late
    /// subscribers are not blind to the most recent change.
    pub fn subscribe<F>(&self, callback: F) -> BudgetSubscription
    where
        F: Fn(&BudgetUpdateEvent) + Send + Sync + 'static,
    {
        let callback: Arc<UpdateCallback> = Arc::new(callback);
        let (id, replay) = {
            let mut inner = self.inner.lock().unwrap();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.subscribers.push((id, callback.clone()));
            (id, inner.latest.clone())
        };

        // Replay outside the lock so the callback may call back into the bus.
        if let Some(event) = replay {
            if catch_unwind(AssertUnwindSafe(|| callback(&event))).is_err() {
                log::error!(
                    "Budget update subscriber {} panicked during replay of budget {}",
                    id,
                    event.budget_id
                );
            }
        }

        BudgetSubscription {
            id,
            bus: Arc::downgrade(&self.inner),
        }
    }

    /// Returns the most recently emitted event, or `None` if nothing has
    /// been emitted this process lifetime.
    pub fn get_latest(&self) -> Option<BudgetUpdateEvent> {
        self.inner.lock().unwrap().latest.clone()
    }

    /// Number of currently-registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().unwrap().subscribers.len()
    }
}

impl Default for BudgetUpdateBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle identifying one registered subscriber.
///
/// Unsubscribing an already-removed handle is a no-op. Dropping the handle
/// unsubscribes, so observers cannot leak their registration.
pub struct BudgetSubscription {
    id: u64,
    bus: Weak<Mutex<BusInner>>,
}

impl BudgetSubscription {
    /// Removes the callback from the bus. Safe to call more than once.
    pub fn unsubscribe(&self) {
        if let Some(inner) = self.bus.upgrade() {
            let mut inner = inner.lock().unwrap();
            inner.subscribers.retain(|(sid, _)| *sid != self.id);
        }
    }
}

impl Drop for BudgetSubscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn recording_subscriber(
        bus: &BudgetUpdateBus,
        tag: &'static str,
        seen: Arc<Mutex<Vec<(&'static str, BudgetUpdateEvent)>>>,
    ) -> BudgetSubscription {
        bus.subscribe(move |event| {
            seen.lock().unwrap().push((tag, event.clone()));
        })
    }

    #[test]
    fn test_delivery_in_registration_order() {
        let bus = BudgetUpdateBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let _a = recording_subscriber(&bus, "a", seen.clone());
        let _b = recording_subscriber(&bus, "b", seen.clone());
        let _c = recording_subscriber(&bus, "c", seen.clone());

        bus.emit("bud-1", dec!(500000));

        let tags: Vec<&str> = seen.lock().unwrap().iter().map(|(t, _)| *t).collect();
        assert_eq!(tags, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_exactly_one_delivery_per_emission() {
        let bus = BudgetUpdateBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let _sub = recording_subscriber(&bus, "a", seen.clone());

        bus.emit("bud-1", dec!(100));
        bus.emit("bud-1", dec!(200));
        bus.emit("bud-2", dec!(300));

        let events = seen.lock().unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].1.expense_amount, dec!(100));
        assert_eq!(events[1].1.expense_amount, dec!(200));
        assert_eq!(events[2].1.budget_id, "bud-2");
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let bus = BudgetUpdateBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sub = recording_subscriber(&bus, "a", seen.clone());

        bus.emit("bud-1", dec!(100));
        sub.unsubscribe();
        sub.unsubscribe();
        bus.emit("bud-1", dec!(200));

        assert_eq!(seen.lock().unwrap().len(), 1);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let bus = BudgetUpdateBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        {
            let _sub = recording_subscriber(&bus, "a", seen.clone());
            assert_eq!(bus.subscriber_count(), 1);
        }
        assert_eq!(bus.subscriber_count(), 0);

        bus.emit("bud-1", dec!(100));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unsubscribe_from_callback_skips_later_subscriber() {
        let bus = BudgetUpdateBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        // "a" removes "b" during delivery; "b" registered later must not run.
        let b_slot: Arc<Mutex<Option<BudgetSubscription>>> = Arc::new(Mutex::new(None));
        let b_slot_for_a = b_slot.clone();
        let seen_a = seen.clone();
        let _a = bus.subscribe(move |event| {
            seen_a.lock().unwrap().push(("a", event.clone()));
            b_slot_for_a.lock().unwrap().take();
        });
        let b = recording_subscriber(&bus, "b", seen.clone());
        *b_slot.lock().unwrap() = Some(b);
        let _c = recording_subscriber(&bus, "c", seen.clone());

        bus.emit("bud-1", dec!(100));

        let tags: Vec<&str> = seen.lock().unwrap().iter().map(|(t, _)| *t).collect();
        assert_eq!(tags, vec!["a", "c"]);
    }

    #[test]
    fn test_self_unsubscribe_from_callback_is_final() {
        let bus = BudgetUpdateBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let slot: Arc<Mutex<Option<BudgetSubscription>>> = Arc::new(Mutex::new(None));
        let slot_inner = slot.clone();
        let seen_inner = seen.clone();
        let sub = bus.subscribe(move |event| {
            seen_inner.lock().unwrap().push(event.clone());
            slot_inner.lock().unwrap().take();
        });
        *slot.lock().unwrap() = Some(sub);

        bus.emit("bud-1", dec!(100));
        bus.emit("bud-1", dec!(200));

        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_panicking_subscriber_does_not_block_delivery() {
        let bus = BudgetUpdateBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let _bad = bus.subscribe(|_event| panic!("observer exploded"));
        let _good = recording_subscriber(&bus, "good", seen.clone());

        bus.emit("bud-1", dec!(100));

        let events = seen.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, "good");
    }

    #[test]
    fn test_get_latest_tracks_most_recent_emission() {
        let bus = BudgetUpdateBus::new();
        assert!(bus.get_latest().is_none());

        bus.emit("bud-1", dec!(100));
        bus.emit("bud-2", dec!(200));

        let latest = bus.get_latest().unwrap();
        assert_eq!(latest.budget_id, "bud-2");
        assert_eq!(latest.expense_amount, dec!(200));
    }

    #[test]
    fn test_late_subscriber_receives_latest_synchronously() {
        let bus = BudgetUpdateBus::new();
        bus.emit("bud-1", dec!(500000));

        let seen = Arc::new(Mutex::new(Vec::new()));
        let _sub = recording_subscriber(&bus, "late", seen.clone());

        let events = seen.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].1.budget_id, "bud-1");
        assert_eq!(events[0].1.expense_amount, dec!(500000));
    }

    #[test]
    fn test_subscriber_without_prior_emission_gets_no_replay() {
        let bus = BudgetUpdateBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let _sub = recording_subscriber(&bus, "a", seen.clone());
        assert!(seen.lock().unwrap().is_empty());
    }
}
