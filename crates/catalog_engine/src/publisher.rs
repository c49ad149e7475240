use std::pin::Pin;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use catalog_core::FeedState;
use futures_util::Stream;
use tokio::sync::mpsc;

/// Retained-value broadcast cell for [`FeedState`].
///
/// Every subscriber gets the current state first and then every published
/// state, in publish order, without gaps. Each subscriber owns an unbounded
/// queue so a slow reader never loses intermediate states.
#[derive(Debug)]
pub struct StatePublisher {
    inner: Mutex<PublisherInner>,
}

#[derive(Debug)]
struct PublisherInner {
    current: FeedState,
    subscribers: Vec<mpsc::UnboundedSender<FeedState>>,
}

impl StatePublisher {
    pub fn new(initial: FeedState) -> Self {
        Self {
            inner: Mutex::new(PublisherInner {
                current: initial,
                subscribers: Vec::new(),
            }),
        }
    }

    pub fn current(&self) -> FeedState {
        self.lock().current.clone()
    }

    /// Registers a subscriber. Snapshot and registration happen under the
    /// same lock, so no publish can slip between them.
    pub fn subscribe(&self) -> StateStream {
        let mut inner = self.lock();
        let (tx, rx) = mpsc::unbounded_channel();
        // The receiver is still in hand, so this send cannot fail.
        let _ = tx.send(inner.current.clone());
        inner.subscribers.push(tx);
        StateStream { rx }
    }

    /// Replaces the current state and fans it out. Dropped subscribers are
    /// pruned here.
    pub fn publish(&self, state: FeedState) {
        let mut inner = self.lock();
        inner
            .subscribers
            .retain(|subscriber| subscriber.send(state.clone()).is_ok());
        inner.current = state;
    }

    pub fn subscriber_count(&self) -> usize {
        let mut inner = self.lock();
        inner.subscribers.retain(|subscriber| !subscriber.is_closed());
        inner.subscribers.len()
    }

    fn lock(&self) -> MutexGuard<'_, PublisherInner> {
        // The critical sections never panic mid-update, so a poisoned guard
        // still holds a consistent value.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for StatePublisher {
    fn default() -> Self {
        Self::new(FeedState::default())
    }
}

/// Live stream of feed states for one subscriber.
///
/// Ends once the publisher is dropped and every queued state is consumed.
#[derive(Debug)]
pub struct StateStream {
    rx: mpsc::UnboundedReceiver<FeedState>,
}

impl StateStream {
    pub async fn next_state(&mut self) -> Option<FeedState> {
        self.rx.recv().await
    }

    /// Next already-published state, without waiting.
    pub fn try_next_state(&mut self) -> Option<FeedState> {
        self.rx.try_recv().ok()
    }
}

impl Stream for StateStream {
    type Item = FeedState;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<FeedState>> {
        self.rx.poll_recv(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::StatePublisher;
    use catalog_core::FeedState;

    #[test]
    fn subscriber_starts_with_current_state() {
        let publisher = StatePublisher::new(FeedState::Loading);
        let mut stream = publisher.subscribe();
        assert_eq!(stream.try_next_state(), Some(FeedState::Loading));
        assert_eq!(stream.try_next_state(), None);
    }

    #[test]
    fn slow_subscriber_sees_every_state() {
        let publisher = StatePublisher::default();
        let mut stream = publisher.subscribe();

        publisher.publish(FeedState::Loading);
        publisher.publish(FeedState::Products(Vec::new()));
        publisher.publish(FeedState::Loading);

        let seen: Vec<_> = std::iter::from_fn(|| stream.try_next_state()).collect();
        assert_eq!(
            seen,
            vec![
                FeedState::Idle,
                FeedState::Loading,
                FeedState::Products(Vec::new()),
                FeedState::Loading,
            ]
        );
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let publisher = StatePublisher::default();
        let kept = publisher.subscribe();
        drop(publisher.subscribe());

        publisher.publish(FeedState::Loading);

        assert_eq!(publisher.subscriber_count(), 1);
        drop(kept);
        assert_eq!(publisher.subscriber_count(), 0);
    }

    #[test]
    fn stream_ends_after_publisher_is_dropped() {
        let publisher = StatePublisher::default();
        let mut stream = publisher.subscribe();
        publisher.publish(FeedState::Loading);
        drop(publisher);

        assert_eq!(stream.try_next_state(), Some(FeedState::Idle));
        assert_eq!(stream.try_next_state(), Some(FeedState::Loading));
        assert_eq!(stream.try_next_state(), None);
    }
}
