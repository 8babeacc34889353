use std::sync::Arc;

use futures::future::join3;
use tracing::{info, warn};

use crate::catalogs::{Catalog, HttpCatalog, SourceKind};
use crate::config::Config;
use crate::error::{CatalogError, Result};
use crate::mapping::{normalize, normalize_all};
use crate::types::NormalizedItem;

/// Tabs offered by the category selector, in display order.
pub const FEATURED_CATEGORIES: [&str; 8] =
    ["Breakfast", "Chicken", "Beef", "Seafood", "Pasta", "Vegetarian", "Vegan", "Dessert"];

/// Aggregator owns the catalog transport and provides the fan-out search,
/// the category filter and the detail resolver.
pub struct Aggregator {
    catalog: Arc<dyn Catalog>,
    category_limit: usize,
}

impl Aggregator {
    pub fn new(catalog: Arc<dyn Catalog>, category_limit: usize) -> Self { Self { catalog, category_limit } }

    /// Build the HTTP-backed aggregator described by `cfg`.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpCatalog::new(cfg)?), cfg.category_limit))
    }

    /// Query all three catalogs at once and merge meals, cocktails, then
    /// products. A failing catalog contributes nothing; an empty result means
    /// "no matches". A blank query never reaches the catalogs.
    pub async fn search_all(&self, query: &str) -> Vec<NormalizedItem> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let (meals, cocktails, products) = join3(
            self.search_source(SourceKind::Meal, query),
            self.search_source(SourceKind::Cocktail, query),
            self.search_source(SourceKind::Product, query),
        )
        .await;
        info!(query, meals = meals.len(), cocktails = cocktails.len(), products = products.len(), "search settled");
        let mut all = Vec::with_capacity(meals.len() + cocktails.len() + products.len());
        all.extend(meals);
        all.extend(cocktails);
        all.extend(products);
        all
    }

    /// One catalog's share of a search. Errors stop here.
    pub async fn search_source(&self, kind: SourceKind, query: &str) -> Vec<NormalizedItem> {
        match self.catalog.search(kind, query).await {
            Ok(records) => normalize_all(&records, kind),
            Err(e) => {
                warn!(catalog = %kind, query, error = %e, "search failed; dropping this catalog's results");
                Vec::new()
            }
        }
    }

    /// Meals in `category`, capped at the configured limit.
    pub async fn search_category(&self, category: &str) -> Vec<NormalizedItem> {
        match self.catalog.filter_by_category(category).await {
            Ok(records) => {
                let mut items = normalize_all(&records, SourceKind::Meal);
                items.truncate(self.category_limit);
                items
            }
            Err(e) => {
                warn!(category, error = %e, "category filter failed");
                Vec::new()
            }
        }
    }

    /// Fetch one record by id from any catalog.
    pub async fn lookup(&self, kind: SourceKind, id: &str) -> Result<NormalizedItem> {
        let records = self.catalog.lookup(kind, id).await?;
        records
            .first()
            .and_then(|r| normalize(r, kind))
            .ok_or_else(|| CatalogError::NotFound { catalog: kind, id: id.to_string() })
    }

    /// Full record for the detail view. Recipe catalogs are asked again by id
    /// since their search payloads can be partial; product search results
    /// already carry everything.
    pub async fn resolve_details(&self, item: &NormalizedItem) -> Result<NormalizedItem> {
        match item.source {
            SourceKind::Meal | SourceKind::Cocktail => self.lookup(item.source, &item.id).await,
            SourceKind::Product => Ok(item.clone()),
        }
    }
}
