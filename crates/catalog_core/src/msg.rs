use crate::{FeedIntent, Product, SearchFailure};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// An intent dequeued from the intake queue.
    Intent(FeedIntent),
    /// The search collaborator resolved the in-flight request.
    SearchCompleted(Result<Vec<Product>, SearchFailure>),
}
