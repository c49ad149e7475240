/// Side effects requested by [`crate::update`] and executed by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run a product search for `keyword` and report back with
    /// [`crate::Msg::SearchCompleted`].
    Search { keyword: String },
}
