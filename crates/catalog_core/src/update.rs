use catalog_logging::{catalog_debug, catalog_warn};

use crate::{Effect, FeedIntent, FeedState, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(state: FeedState, msg: Msg) -> (FeedState, Vec<Effect>) {
    match msg {
        Msg::Intent(FeedIntent::FetchProducts(keyword)) => {
            catalog_debug!("FetchProducts keyword_len={} from {}", keyword.len(), state.label());
            (FeedState::Loading, vec![Effect::Search { keyword }])
        }
        Msg::SearchCompleted(result) => {
            if !state.is_loading() {
                // Only the cycle that entered Loading may settle it.
                catalog_warn!("Ignoring search completion while {}", state.label());
                return (state, Vec::new());
            }
            let next = match result {
                Ok(products) => FeedState::Products(products),
                Err(failure) => FeedState::Error(failure.message().to_owned()),
            };
            (next, Vec::new())
        }
    }
}
