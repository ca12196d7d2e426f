//! Bridges the in-process budget update bus onto the SSE fanout.

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

use kasfolio_core::events::{BudgetSubscription, BudgetUpdateBus, BudgetUpdateEvent, Debouncer};

use crate::events::{EventBus, ServerEvent, BUDGET_UPDATED};

/// Attaches the SSE bridge to the update bus.
///
/// The bridge is an ordinary bus subscriber: it applies the standard
/// trailing-edge debounce, then publishes the surviving event as a
/// `budget:updated` server event for connected browsers. The returned
/// subscription keeps the bridge attached; dropping it tears the stream
/// down without firing a held event.
pub fn spawn_update_stream(bus: &BudgetUpdateBus, event_bus: EventBus) -> BudgetSubscription {
    let (tx, rx) = mpsc::unbounded_channel();
    // Bus callbacks must not block, so the callback only forwards into the
    // channel; debounce and publish happen on the driver task.
    let subscription = bus.subscribe(move |event| {
        let _ = tx.send(event.clone());
    });
    tokio::spawn(drive(rx, event_bus));
    subscription
}

async fn drive(mut rx: mpsc::UnboundedReceiver<BudgetUpdateEvent>, event_bus: EventBus) {
    let mut debouncer = Debouncer::new();
    loop {
        let deadline = debouncer.next_deadline();
        tokio::select! {
            received = rx.recv() => {
                match received {
                    Some(event) => debouncer.offer(event, Instant::now().into_std()),
                    None => {
                        if let Some(discarded) = debouncer.cancel() {
                            tracing::debug!(
                                "Dropping debounced update for budget {} on shutdown",
                                discarded.budget_id
                            );
                        }
                        return;
                    }
                }
            }
            _ = wait_for(deadline) => {
                if let Some(event) = debouncer.poll(Instant::now().into_std()) {
                    // Unsubscribed while the alarm was due; honor the teardown.
                    if rx.is_closed() {
                        return;
                    }
                    publish(&event_bus, &event);
                }
            }
        }
    }
}

fn publish(event_bus: &EventBus, event: &BudgetUpdateEvent) {
    match serde_json::to_value(event) {
        Ok(payload) => event_bus.publish(ServerEvent::with_payload(BUDGET_UPDATED, payload)),
        Err(err) => tracing::warn!("Could not serialize budget update: {}", err),
    }
}

async fn wait_for(deadline: Option<std::time::Instant>) {
    match deadline {
        Some(deadline) => sleep_until(Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}
