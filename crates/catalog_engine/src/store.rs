use std::any::Any;
use std::collections::VecDeque;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use catalog_core::{update, Effect, FeedIntent, FeedState, Msg, SearchFailure};
use catalog_logging::{catalog_debug, catalog_error, catalog_info, catalog_warn};
use futures_util::FutureExt;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::{ProductSearchPort, StatePublisher, StateStream};

/// Owner of the feed state and sole consumer of submitted intents.
///
/// A single background task drains intents in submission order. Each
/// `FetchProducts` publishes `Loading`, awaits the search collaborator and
/// then publishes `Products` or `Error` before the next intent is taken.
/// There is no cancellation and no timeout at this layer: a search that
/// never resolves stalls the queue.
#[derive(Debug)]
pub struct FeedStore {
    intents: IntentSender,
    publisher: Arc<StatePublisher>,
    worker: JoinHandle<()>,
}

/// Cloneable submit handle, usable from any thread.
#[derive(Debug, Clone)]
pub struct IntentSender {
    tx: mpsc::UnboundedSender<FeedIntent>,
}

impl IntentSender {
    /// Enqueues `intent` without blocking. The queue is unbounded.
    pub fn submit(&self, intent: FeedIntent) {
        if let Err(err) = self.tx.send(intent) {
            catalog_warn!("Feed loop has stopped; dropping {:?}", err.0);
        }
    }
}

impl FeedStore {
    /// Starts the processing loop on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn spawn(port: Arc<dyn ProductSearchPort>) -> Self {
        Self::spawn_on(port, &Handle::current())
    }

    pub fn spawn_on(port: Arc<dyn ProductSearchPort>, runtime: &Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let publisher = Arc::new(StatePublisher::new(FeedState::Idle));
        let worker = runtime.spawn(run_loop(port, rx, publisher.clone()));
        Self {
            intents: IntentSender { tx },
            publisher,
            worker,
        }
    }

    pub fn submit_intent(&self, intent: FeedIntent) {
        self.intents.submit(intent);
    }

    pub fn intent_sender(&self) -> IntentSender {
        self.intents.clone()
    }

    /// Stream starting with the current state, followed by every transition.
    pub fn observe_state(&self) -> StateStream {
        self.publisher.subscribe()
    }

    pub fn current_state(&self) -> FeedState {
        self.publisher.current()
    }

    /// Closes this handle's intake and waits for the loop to finish every
    /// queued intent. Outstanding [`IntentSender`] clones keep the loop
    /// alive until they are dropped too.
    pub async fn shutdown(self) {
        let Self {
            intents, worker, ..
        } = self;
        drop(intents);
        if let Err(err) = worker.await {
            catalog_error!("Feed loop ended abnormally: {}", err);
        }
    }
}

async fn run_loop(
    port: Arc<dyn ProductSearchPort>,
    mut intents: mpsc::UnboundedReceiver<FeedIntent>,
    publisher: Arc<StatePublisher>,
) {
    catalog_info!("Feed loop started");
    let mut state = publisher.current();

    while let Some(intent) = intents.recv().await {
        catalog_info!("Processing {:?}", intent);
        let mut pending = VecDeque::from([Msg::Intent(intent)]);
        while let Some(msg) = pending.pop_front() {
            for effect in apply(&mut state, msg, &publisher) {
                pending.push_back(execute(port.as_ref(), effect).await);
            }
        }
    }

    catalog_info!("Feed loop stopped: intake closed");
}

fn apply(state: &mut FeedState, msg: Msg, publisher: &StatePublisher) -> Vec<Effect> {
    let previous = std::mem::take(state);
    let (next, effects) = update(previous.clone(), msg);
    if next != previous {
        let legal = previous.can_transition_to(&next);
        if !legal {
            catalog_error!(
                "Illegal feed transition {} -> {}",
                previous.label(),
                next.label()
            );
        }
        debug_assert!(legal, "illegal feed transition");
        catalog_debug!("Feed state {} -> {}", previous.label(), next.label());
        publisher.publish(next.clone());
    }
    *state = next;
    effects
}

async fn execute(port: &dyn ProductSearchPort, effect: Effect) -> Msg {
    match effect {
        Effect::Search { keyword } => {
            // The call itself runs inside the guard: an impl may panic before
            // handing back its future.
            let outcome = AssertUnwindSafe(async { port.search(&keyword).await })
                .catch_unwind()
                .await;
            let result = match outcome {
                Ok(result) => result,
                Err(payload) => {
                    catalog_error!(
                        "Search collaborator panicked: {}",
                        panic_message(payload.as_ref())
                    );
                    Err(SearchFailure::Unknown)
                }
            };
            if let Err(failure) = &result {
                catalog_warn!("Search for {:?} failed: {}", keyword, failure);
            }
            Msg::SearchCompleted(result)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(text) = payload.downcast_ref::<&'static str>() {
        text
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text
    } else {
        "non-string panic payload"
    }
}
