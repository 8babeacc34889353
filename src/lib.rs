pub mod aggregator;
pub mod catalogs;
pub mod config;
pub mod details;
pub mod error;
pub mod mapping;
pub mod render;
pub mod session;
pub mod types;

// --- Library API for embedding ---

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::aggregator::{Aggregator, FEATURED_CATEGORIES};
    pub use crate::catalogs::{Catalog, HttpCatalog, SourceKind};
    pub use crate::config::Config;
    pub use crate::details::{DetailView, Nutrition, ProductDetail, RecipeDetail, VideoRef};
    pub use crate::error::CatalogError;
    pub use crate::mapping::normalize;
    pub use crate::session::{Command, Controller, Message, MessageKind, ViewEvent, ViewState};
    pub use crate::types::{CatalogRecord, NormalizedItem};
}

/// Trim a user query and collapse runs of whitespace to single spaces.
pub fn tidy_query(q: &str) -> String {
    let mut o = String::with_capacity(q.len());
    for word in q.split_whitespace() {
        if !o.is_empty() { o.push(' '); }
        o.push_str(word);
    }
    o
}
