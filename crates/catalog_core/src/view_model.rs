use crate::{FeedState, Product};

/// Placeholder shown before the first search and for empty result lists.
pub const EMPTY_FEED_TEXT: &str = "No products to show";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedViewModel {
    pub state_label: &'static str,
    pub loading: bool,
    /// Centered message instead of a list (empty placeholder or error).
    pub banner: Option<String>,
    pub rows: Vec<ProductRowView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRowView {
    /// 1-based position, used by the detail lookup.
    pub position: usize,
    pub title: String,
    pub price: String,
    pub available_quantity: String,
    pub condition: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetailView {
    pub title: String,
    pub price: String,
    pub available_quantity: String,
    pub condition: String,
    pub permalink: String,
    pub thumbnail: String,
}

impl FeedViewModel {
    pub fn from_state(state: &FeedState) -> Self {
        let mut view = Self {
            state_label: state.label(),
            ..Self::default()
        };
        match state {
            FeedState::Idle => view.banner = Some(EMPTY_FEED_TEXT.to_string()),
            FeedState::Loading => view.loading = true,
            FeedState::Products(products) if products.is_empty() => {
                view.banner = Some(EMPTY_FEED_TEXT.to_string());
            }
            FeedState::Products(products) => {
                view.rows = products
                    .iter()
                    .enumerate()
                    .map(|(idx, product)| ProductRowView::new(idx + 1, product))
                    .collect();
            }
            FeedState::Error(message) => view.banner = Some(message.clone()),
        }
        view
    }
}

impl ProductRowView {
    fn new(position: usize, product: &Product) -> Self {
        Self {
            position,
            title: product.title.clone(),
            price: format_price(product.price),
            available_quantity: product.available_quantity.to_string(),
            condition: product.condition.clone(),
        }
    }
}

impl ProductDetailView {
    pub fn from_product(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            price: format_price(product.price),
            available_quantity: product.available_quantity.to_string(),
            condition: product.condition.clone(),
            permalink: product.permalink.clone(),
            thumbnail: product.thumbnail.clone(),
        }
    }

    /// Detail of the product at 1-based `position` in a settled result list.
    pub fn lookup(state: &FeedState, position: usize) -> Option<Self> {
        match state {
            FeedState::Products(products) => position
                .checked_sub(1)
                .and_then(|idx| products.get(idx))
                .map(Self::from_product),
            _ => None,
        }
    }
}

pub fn format_price(price: i64) -> String {
    format!("${price}")
}
