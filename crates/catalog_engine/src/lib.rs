//! Catalog engine: search collaborator, feed store loop and state broadcast.
mod publisher;
mod search;
mod store;
mod types;

pub use publisher::{StatePublisher, StateStream};
pub use search::{parse_search_response, ProductSearchPort, ReqwestProductSearch};
pub use store::{FeedStore, IntentSender};
pub use types::{FailureKind, SearchSettings, TransportError};
