use crate::Product;

/// What the feed screen should currently show.
///
/// States are immutable snapshots; every transition replaces the whole value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FeedState {
    /// No search has run yet.
    #[default]
    Idle,
    /// A search is in flight.
    Loading,
    /// The last search succeeded. May be empty.
    Products(Vec<Product>),
    /// The last search failed. The message is never empty.
    Error(String),
}

impl FeedState {
    /// True once a search cycle has resolved.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Products(_) | Self::Error(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Whether `next` may directly follow `self` in the published sequence.
    ///
    /// Allowed edges: Idle, Products and Error go to Loading; Loading goes to
    /// Products or Error. Nothing ever returns to Idle.
    pub fn can_transition_to(&self, next: &FeedState) -> bool {
        match (self, next) {
            (Self::Idle | Self::Products(_) | Self::Error(_), Self::Loading) => true,
            (Self::Loading, Self::Products(_) | Self::Error(_)) => true,
            _ => false,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Loading => "Loading",
            Self::Products(_) => "Products",
            Self::Error(_) => "Error",
        }
    }
}
