//! Server-sent event fanout.
//!
//! A thin wrapper over a tokio broadcast channel. Anything with a clone of
//! the bus can publish; each SSE connection holds its own receiver. Slow
//! clients lag and drop events rather than backpressure publishers.

use serde::Serialize;
use serde_json::Value;
use tokio::sync::broadcast;

/// Event name for a debounced budget update reaching the browser.
pub const BUDGET_UPDATED: &str = "budget:updated";

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerEvent {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl ServerEvent {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            payload: None,
        }
    }

    pub fn with_payload(name: &str, payload: Value) -> Self {
        Self {
            name: name.to_string(),
            payload: Some(payload),
        }
    }
}

#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<ServerEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publishes to every current subscriber. No subscribers is not an error.
    pub fn publish(&self, event: ServerEvent) {
        let receivers = self.tx.send(event).unwrap_or(0);
        tracing::debug!("Published server event to {} receiver(s)", receivers);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_subscribers_receive_published_events() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();

        bus.publish(ServerEvent::with_payload(
            BUDGET_UPDATED,
            json!({ "budgetId": "bud-1" }),
        ));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.name, BUDGET_UPDATED);
        assert_eq!(event.payload.unwrap()["budgetId"], "bud-1");
    }

    #[test]
    fn test_publish_without_subscribers_is_silent() {
        let bus = EventBus::new(8);
        bus.publish(ServerEvent::new(BUDGET_UPDATED));
    }

    #[test]
    fn test_payload_is_omitted_when_absent() {
        let json = serde_json::to_string(&ServerEvent::new("x")).unwrap();
        assert_eq!(json, "{\"name\":\"x\"}");
    }
}
