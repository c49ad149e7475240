/// A single user-originated action submitted to the feed.
///
/// Intents are consumed exactly once, in submission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedIntent {
    /// Search the catalog for `keyword`. The keyword is passed to the search
    /// collaborator unmodified, including when it is empty.
    FetchProducts(String),
}

impl FeedIntent {
    pub fn fetch_products(keyword: impl Into<String>) -> Self {
        Self::FetchProducts(keyword.into())
    }
}
