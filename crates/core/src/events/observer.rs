//! Consumer-side attachment for budget UI surfaces.

use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use super::{BudgetSubscription, BudgetUpdateBus, BudgetUpdateEvent, Debouncer};
use crate::constants::REDUCTION_NOTICE_VISIBILITY;

/// Callback the observer runs when its watched budget needs re-fetching.
pub type RefreshFn = dyn Fn(&BudgetUpdateEvent) + Send + Sync;

/// Transient "recently reduced" indicator for one budget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReductionNotice {
    pub budget_id: String,
    /// Expense amount the budget was reduced by, in rupiah.
    pub amount: Decimal,
    /// Timestamp of the event the notice is tied to (epoch milliseconds).
    pub event_timestamp: i64,
}

struct NoticeSlot {
    notice: ReductionNotice,
    shown_at: Instant,
}

/// Debounced observer for one budget surface.
///
/// Subscribes to the bus on construction (catching up on the latest update
/// through the same debounce), coalesces bursts with the standard
/// trailing-edge window, and when a debounced event lands on the watched
/// budget, runs the refresh callback and records a reduction notice. A
/// debounced event for a different budget supersedes the notice instead of
/// refreshing. Detaching (or dropping) the observer cancels any pending
/// fire; nothing runs after teardown.
pub struct BudgetObserver {
    subscription: BudgetSubscription,
    driver: JoinHandle<()>,
    notice: Arc<Mutex<Option<NoticeSlot>>>,
}

impl BudgetObserver {
    /// Attaches an observer for `budget_id` to the bus.
    ///
    /// Must be called from within a tokio runtime; the debounce alarm runs
    /// as a spawned task.
    pub fn watch<F>(bus: &BudgetUpdateBus, budget_id: impl Into<String>, on_refresh: F) -> Self
    where
        F: Fn(&BudgetUpdateEvent) + Send + Sync + 'static,
    {
        let budget_id = budget_id.into();
        let notice: Arc<Mutex<Option<NoticeSlot>>> = Arc::new(Mutex::new(None));
        let (tx, rx) = mpsc::unbounded_channel();
        // The sender lives inside the bus callback, so unsubscribing closes
        // the channel and the driver stops without firing.
        let subscription = bus.subscribe(move |event| {
            let _ = tx.send(event.clone());
        });
        let driver = tokio::spawn(drive(rx, budget_id, Arc::new(on_refresh), notice.clone()));
        Self {
            subscription,
            driver,
            notice,
        }
    }

    /// The notice for the most recent matching update, while still visible.
    ///
    /// Returns `None` once the visibility window has elapsed or another
    /// budget's update superseded the notice.
    pub fn current_notice(&self) -> Option<ReductionNotice> {
        let guard = self.notice.lock().unwrap();
        guard
            .as_ref()
            .filter(|slot| slot.shown_at.elapsed() < REDUCTION_NOTICE_VISIBILITY)
            .map(|slot| slot.notice.clone())
    }

    /// Unsubscribes and waits for the driver task to wind down.
    ///
    /// A debounced event still waiting for its deadline is discarded, never
    /// fired.
    pub async fn detach(self) {
        self.subscription.unsubscribe();
        let _ = self.driver.await;
    }
}

async fn drive(
    mut rx: mpsc::UnboundedReceiver<BudgetUpdateEvent>,
    watched: String,
    on_refresh: Arc<RefreshFn>,
    notice: Arc<Mutex<Option<NoticeSlot>>>,
) {
    let mut debouncer = Debouncer::new();
    loop {
        let deadline = debouncer.next_deadline();
        tokio::select! {
            received = rx.recv() => {
                match received {
                    Some(event) => debouncer.offer(event, Instant::now().into_std()),
                    None => {
                        if let Some(discarded) = debouncer.cancel() {
                            log::debug!(
                                "Discarding debounced update for budget {} on detach",
                                discarded.budget_id
                            );
                        }
                        break;
                    }
                }
            }
            _ = wait_for(deadline) => {
                if let Some(event) = debouncer.poll(Instant::now().into_std()) {
                    // Unsubscribed while the alarm was due; honor the
                    // cancellation instead of firing.
                    if rx.is_closed() {
                        break;
                    }
                    if event.budget_id == watched {
                        on_refresh(&event);
                        *notice.lock().unwrap() = Some(NoticeSlot {
                            notice: ReductionNotice {
                                budget_id: event.budget_id.clone(),
                                amount: event.expense_amount,
                                event_timestamp: event.timestamp,
                            },
                            shown_at: Instant::now(),
                        });
                    } else {
                        *notice.lock().unwrap() = None;
                    }
                }
            }
        }
    }
}

async fn wait_for(deadline: Option<std::time::Instant>) {
    match deadline {
        Some(deadline) => sleep_until(Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}
