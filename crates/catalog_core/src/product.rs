use serde::{Deserialize, Serialize};

/// A catalog product as returned by the search collaborator.
///
/// Fields are carried as given; the core performs no validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    /// Price in whatever unit the source reports.
    pub price: i64,
    pub available_quantity: i64,
    /// e.g. `"new"` or `"used"`.
    pub condition: String,
    pub permalink: String,
    pub thumbnail: String,
}
