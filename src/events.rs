//! Toggle notifications
//!
//! Dependent views subscribe to refresh (or close) themselves when a select
//! group's dropdown is used on narrow terminals.

use tokio::sync::broadcast;

/// Buffered toggles per subscriber before it starts lagging
const TOGGLE_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleEvent {
    /// Milliseconds since the Unix epoch
    pub timestamp_ms: i64,
}

/// Cloneable handle for emitting and subscribing to toggle events
#[derive(Debug, Clone)]
pub struct ToggleNotifier {
    tx: broadcast::Sender<ToggleEvent>,
}

impl Default for ToggleNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ToggleNotifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(TOGGLE_CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ToggleEvent> {
        self.tx.subscribe()
    }

    /// Emit a toggle stamped with the current time.
    pub fn emit(&self) -> ToggleEvent {
        let event = ToggleEvent {
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
        };
        match self.tx.send(event) {
            Ok(receivers) => tracing::trace!(receivers, ts = event.timestamp_ms, "toggle emitted"),
            Err(_) => tracing::trace!(ts = event.timestamp_ms, "toggle emitted with no receivers"),
        }
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_receive_toggle() {
        let notifier = ToggleNotifier::new();
        let mut rx = notifier.subscribe();

        let sent = notifier.emit();
        let received = rx.recv().await.unwrap();
        assert_eq!(sent, received);
        assert!(received.timestamp_ms > 0);
    }

    #[test]
    fn test_emit_without_subscribers() {
        let notifier = ToggleNotifier::new();
        let first = notifier.emit();
        let second = notifier.emit();
        assert!(second.timestamp_ms >= first.timestamp_ms);
    }

    #[test]
    fn test_clones_share_channel() {
        let notifier = ToggleNotifier::new();
        let mut rx = notifier.subscribe();
        notifier.clone().emit();
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }
}
