use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CatalogError, Result};

mod http;
#[cfg(test)]
pub(crate) mod stub;

pub use self::http::HttpCatalog;

/// The three external catalogs. Declaration order is the merge order of
/// aggregated search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Meal,
    Cocktail,
    Product,
}

impl SourceKind {
    pub const ALL: [SourceKind; 3] = [SourceKind::Meal, SourceKind::Cocktail, SourceKind::Product];

    /// Stable identifier used on the command line and in logs.
    pub fn id(self) -> &'static str {
        match self {
            SourceKind::Meal => "mealdb",
            SourceKind::Cocktail => "cocktaildb",
            SourceKind::Product => "openfoodfacts",
        }
    }

    /// Short badge shown next to a result card.
    pub fn badge(self) -> &'static str {
        match self {
            SourceKind::Meal => "Meal",
            SourceKind::Cocktail => "Drink",
            SourceKind::Product => "Product",
        }
    }

    /// What `NormalizedItem::area` means for items of this source.
    pub fn area_label(self) -> &'static str {
        match self {
            SourceKind::Meal => "Area",
            SourceKind::Cocktail => "Type",
            SourceKind::Product => "Brand",
        }
    }

    /// Top-level key wrapping the record array in search responses.
    pub fn envelope_key(self) -> &'static str {
        match self {
            SourceKind::Meal => "meals",
            SourceKind::Cocktail => "drinks",
            SourceKind::Product => "products",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.id()) }
}

impl FromStr for SourceKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mealdb" | "meal" => Ok(SourceKind::Meal),
            "cocktaildb" | "cocktail" | "drink" => Ok(SourceKind::Cocktail),
            "openfoodfacts" | "product" => Ok(SourceKind::Product),
            _ => Err(CatalogError::UnknownSource(s.to_string())),
        }
    }
}

/// Read-only access to the remote catalogs. Every method hands back raw
/// records with the response envelope already stripped; an absent or null
/// envelope yields an empty list.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// By-name search against one catalog.
    async fn search(&self, kind: SourceKind, query: &str) -> Result<Vec<Value>>;

    /// Meal catalog filtered by category. Records carry only id, name and thumbnail.
    async fn filter_by_category(&self, category: &str) -> Result<Vec<Value>>;

    /// By-id lookup; at most one record is expected.
    async fn lookup(&self, kind: SourceKind, id: &str) -> Result<Vec<Value>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ids_and_aliases() {
        assert_eq!("mealdb".parse::<SourceKind>().unwrap(), SourceKind::Meal);
        assert_eq!("Drink".parse::<SourceKind>().unwrap(), SourceKind::Cocktail);
        assert_eq!(" openfoodfacts ".parse::<SourceKind>().unwrap(), SourceKind::Product);
    }

    #[test]
    fn rejects_unknown_source() {
        let err = "pizzadb".parse::<SourceKind>().unwrap_err();
        assert!(matches!(err, CatalogError::UnknownSource(ref s) if s == "pizzadb"));
    }

    #[test]
    fn all_is_merge_order() {
        assert_eq!(SourceKind::ALL, [SourceKind::Meal, SourceKind::Cocktail, SourceKind::Product]);
        for kind in SourceKind::ALL {
            assert_eq!(kind.id().parse::<SourceKind>().unwrap(), kind);
        }
    }
}
