use crate::events::TradeEvent;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::warn;

/// Fan-out of poller results. Publishing with no subscribers is not an error.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<TradeEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TradeEvent> {
        self.tx.subscribe()
    }

    /// Number of subscribers the event reached (0 when nobody is listening).
    pub fn publish(&self, event: TradeEvent) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// Next event for a subscriber. Skips past lag; `None` once every sender is gone.
pub async fn next_event(rx: &mut broadcast::Receiver<TradeEvent>) -> Option<TradeEvent> {
    loop {
        match rx.recv().await {
            Ok(event) => return Some(event),
            Err(RecvError::Lagged(skipped)) => {
                warn!("[BUS] Subscriber lagged, {} events skipped", skipped);
            }
            Err(RecvError::Closed) => return None,
        }
    }
}
