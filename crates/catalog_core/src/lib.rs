//! Catalog core: feed data model, pure state machine and view-model helpers.
mod effect;
mod failure;
mod intent;
mod msg;
mod product;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use failure::{SearchFailure, UNKNOWN_ERROR_MESSAGE};
pub use intent::FeedIntent;
pub use msg::Msg;
pub use product::Product;
pub use state::FeedState;
pub use update::update;
pub use view_model::{
    format_price, FeedViewModel, ProductDetailView, ProductRowView, EMPTY_FEED_TEXT,
};
