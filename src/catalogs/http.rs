use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::catalogs::{Catalog, SourceKind};
use crate::config::Config;
use crate::error::{CatalogError, Result};

/// reqwest-backed access to TheMealDB, TheCocktailDB and Open Food Facts.
pub struct HttpCatalog {
    client: reqwest::Client,
    mealdb: Url,
    cocktaildb: Url,
    openfoodfacts: Url,
    product_page_size: u32,
}

impl HttpCatalog {
    pub fn new(cfg: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(cfg.user_agent.clone());
        if let Some(ms) = cfg.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        Ok(Self {
            client: builder.build()?,
            mealdb: parse_base(&cfg.mealdb_url)?,
            cocktaildb: parse_base(&cfg.cocktaildb_url)?,
            openfoodfacts: parse_base(&cfg.openfoodfacts_url)?,
            product_page_size: cfg.product_page_size,
        })
    }

    fn base(&self, kind: SourceKind) -> &Url {
        match kind {
            SourceKind::Meal => &self.mealdb,
            SourceKind::Cocktail => &self.cocktaildb,
            SourceKind::Product => &self.openfoodfacts,
        }
    }

    pub(crate) fn search_url(&self, kind: SourceKind, query: &str) -> Url {
        match kind {
            SourceKind::Meal | SourceKind::Cocktail => endpoint(self.base(kind), &["search.php"], &[("s", query)]),
            SourceKind::Product => {
                let page_size = self.product_page_size.to_string();
                endpoint(
                    &self.openfoodfacts,
                    &["cgi", "search.pl"],
                    &[
                        ("search_terms", query),
                        ("search_simple", "1"),
                        ("action", "process"),
                        ("json", "1"),
                        ("page_size", page_size.as_str()),
                    ],
                )
            }
        }
    }

    pub(crate) fn category_url(&self, category: &str) -> Url {
        endpoint(&self.mealdb, &["filter.php"], &[("c", category)])
    }

    pub(crate) fn lookup_url(&self, kind: SourceKind, id: &str) -> Url {
        match kind {
            SourceKind::Meal | SourceKind::Cocktail => endpoint(self.base(kind), &["lookup.php"], &[("i", id)]),
            SourceKind::Product => endpoint(&self.openfoodfacts, &["api", "v0", "product", format!("{id}.json").as_str()], &[]),
        }
    }

    async fn get_json(&self, kind: SourceKind, url: Url) -> Result<Value> {
        debug!(catalog = %kind, %url, "GET");
        let resp = self.client.get(url).send().await?.error_for_status()?;
        Ok(resp.json::<Value>().await?)
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    async fn search(&self, kind: SourceKind, query: &str) -> Result<Vec<Value>> {
        let body = self.get_json(kind, self.search_url(kind, query)).await?;
        unwrap_envelope(kind, body, kind.envelope_key())
    }

    async fn filter_by_category(&self, category: &str) -> Result<Vec<Value>> {
        let body = self.get_json(SourceKind::Meal, self.category_url(category)).await?;
        unwrap_envelope(SourceKind::Meal, body, SourceKind::Meal.envelope_key())
    }

    async fn lookup(&self, kind: SourceKind, id: &str) -> Result<Vec<Value>> {
        let body = self.get_json(kind, self.lookup_url(kind, id)).await?;
        match kind {
            // The product endpoint wraps a single object under `product`.
            SourceKind::Product => unwrap_single(kind, body, "product"),
            _ => unwrap_envelope(kind, body, kind.envelope_key()),
        }
    }
}

fn parse_base(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| CatalogError::InvalidUrl(format!("{raw}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(CatalogError::InvalidUrl(format!("{raw}: not a base URL")));
    }
    Ok(url)
}

/// Append path segments and query pairs to a base URL. Bases are validated in
/// `parse_base`, so the segment list is always available.
fn endpoint(base: &Url, segments: &[&str], query: &[(&str, &str)]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    url
}

/// Strip the `{ "<key>": [...] }` wrapper. An absent or null key means no matches.
pub(crate) fn unwrap_envelope(kind: SourceKind, body: Value, key: &str) -> Result<Vec<Value>> {
    let Value::Object(mut map) = body else {
        return Err(malformed(kind, "response body is not a JSON object"));
    };
    match map.remove(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(malformed(kind, format!("`{key}` is {}, expected an array", type_name(&other)))),
    }
}

fn unwrap_single(kind: SourceKind, body: Value, key: &str) -> Result<Vec<Value>> {
    let Value::Object(mut map) = body else {
        return Err(malformed(kind, "response body is not a JSON object"));
    };
    match map.remove(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(record @ Value::Object(_)) => Ok(vec![record]),
        Some(other) => Err(malformed(kind, format!("`{key}` is {}, expected an object", type_name(&other)))),
    }
}

fn malformed(kind: SourceKind, reason: impl Into<String>) -> CatalogError {
    CatalogError::Malformed { catalog: kind, reason: reason.into() }
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
