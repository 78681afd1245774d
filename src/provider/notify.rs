//! Change notification for consumers watching the provider.
//!
//! Mutation paths call [`ChangeNotifier::notify_change`] after committing.
//! Delivery is best-effort: a send with nobody listening is logged and
//! dropped, and slow subscribers lag rather than block the sender.
//!
//! Notifications reach only subscribers in the same process. A one-shot CLI
//! invocation owns its notifier, so its changes are announced to nobody
//! unless the embedding application subscribed first.

use tokio::sync::broadcast;

const DEFAULT_CAPACITY: usize = 64;

/// Emitted after task or tag data changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentChange {
    pub uri: String,
}

#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    uri: String,
    tx: broadcast::Sender<ContentChange>,
}

impl ChangeNotifier {
    pub fn new(uri: impl Into<String>) -> Self {
        Self::with_capacity(uri, DEFAULT_CAPACITY)
    }

    /// `capacity` is clamped to at least 1.
    pub fn with_capacity(uri: impl Into<String>, capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { uri: uri.into(), tx }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ContentChange> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Never fails. Returns the number of subscribers reached.
    pub fn notify_change(&self) -> usize {
        let change = ContentChange { uri: self.uri.clone() };
        match self.tx.send(change) {
            Ok(n) => {
                tracing::debug!(uri = %self.uri, subscribers = n, "change notified");
                n
            }
            Err(e) => {
                tracing::debug!(uri = %e.0.uri, "change notification dropped: no subscribers");
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notify_without_subscribers_is_swallowed() {
        let notifier = ChangeNotifier::new("content://a");
        assert_eq!(notifier.notify_change(), 0);
    }

    #[tokio::test]
    async fn every_subscriber_sees_the_root_uri() {
        let notifier = ChangeNotifier::new("content://a");
        let mut rx1 = notifier.subscribe();
        let mut rx2 = notifier.clone().subscribe();
        assert_eq!(notifier.subscriber_count(), 2);

        assert_eq!(notifier.notify_change(), 2);
        assert_eq!(rx1.recv().await.unwrap().uri, "content://a");
        assert_eq!(rx2.recv().await.unwrap().uri, "content://a");
    }

    #[tokio::test]
    async fn slow_subscriber_lags_instead_of_blocking() {
        let notifier = ChangeNotifier::with_capacity("content://a", 1);
        let mut rx = notifier.subscribe();
        notifier.notify_change();
        notifier.notify_change();
        assert!(rx.recv().await.is_err());
        assert!(rx.recv().await.is_ok());
    }

    #[tokio::test]
    async fn zero_capacity_still_delivers() {
        let notifier = ChangeNotifier::with_capacity("content://a", 0);
        let mut rx = notifier.subscribe();
        assert_eq!(notifier.notify_change(), 1);
        assert_eq!(rx.recv().await.unwrap().uri, "content://a");
    }

    #[test]
    fn dropped_subscribers_are_released() {
        let notifier = ChangeNotifier::new("content://a");
        let rx = notifier.subscribe();
        drop(rx);
        assert_eq!(notifier.subscriber_count(), 0);
        assert_eq!(notifier.notify_change(), 0);
    }
}
