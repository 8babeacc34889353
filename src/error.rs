use thiserror::Error;

use crate::catalogs::SourceKind;

/// Failures raised while talking to a catalog or reading its payloads.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{catalog} returned a malformed payload: {reason}")]
    Malformed { catalog: SourceKind, reason: String },

    #[error("invalid catalog URL: {0}")]
    InvalidUrl(String),

    #[error("{catalog} has no record with id '{id}'")]
    NotFound { catalog: SourceKind, id: String },

    #[error("unknown source '{0}' (expected mealdb, cocktaildb or openfoodfacts)")]
    UnknownSource(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
