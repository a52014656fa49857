use std::sync::mpsc::{sync_channel, Receiver, SyncSender, TrySendError};
use std::sync::Arc;
use crate::scope::event::Event;
/// One-slot handoff from the ingest thread to the render context.
///
/// A bounded channel of capacity 1 with a non-blocking send makes
/// "publish if the consumer is ready, else drop" a single atomic step, so at
/// most one event is ever in flight and the producer never blocks on the
/// renderer.
pub fn display_mailbox() -> (DisplaySender, DisplayReceiver) {
    let (tx, rx) = sync_channel(1);
    (DisplaySender { tx }, DisplayReceiver { rx })
}
pub struct DisplaySender {
    tx: SyncSender<Arc<Event>>,
}
impl DisplaySender {
    /// Publish an event if the slot is free. Returns false when the update
    /// was dropped (slot occupied or consumer gone); the caller carries on
    /// either way.
    pub fn offer(&self, event: Arc<Event>) -> bool {
        match self.tx.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) | Err(TrySendError::Disconnected(_)) => false,
        }
    }
}
pub struct DisplayReceiver {
    rx: Receiver<Arc<Event>>,
}
impl DisplayReceiver {
    /// Take the pending event, if any. Taking it re-arms the slot for the
    /// producer's next offer.
    pub fn try_take(&self) -> Option<Arc<Event>> {
        self.rx.try_recv().ok()
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    fn event(timestamp: u64) -> Arc<Event> {
        Arc::new(Event {
            timestamp,
            channel: 0,
            samples: vec![0],
        })
    }
    #[test]
    fn at_most_one_pending() {
        let (tx, rx) = display_mailbox();
        assert!(tx.offer(event(1)));
        assert!(!tx.offer(event(2)));
        assert!(!tx.offer(event(3)));
        assert_eq!(rx.try_take().map(|e| e.timestamp), Some(1));
        assert!(rx.try_take().is_none());
        // Consuming re-armed the slot.
        assert!(tx.offer(event(4)));
        assert_eq!(rx.try_take().map(|e| e.timestamp), Some(4));
    }
    #[test]
    fn offer_after_consumer_drop_is_a_silent_no() {
        let (tx, rx) = display_mailbox();
        drop(rx);
        assert!(!tx.offer(event(1)));
    }
}
