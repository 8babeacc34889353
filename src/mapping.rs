use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::catalogs::SourceKind;
use crate::types::{
    non_blank, CatalogRecord, CocktailRecord, MealRecord, NormalizedItem, ProductRecord, PLACEHOLDER_IMAGE, UNKNOWN_AREA,
    UNKNOWN_BRAND, UNKNOWN_CATEGORY,
};

/// Locale prefix carried by Open Food Facts taxonomy tags.
const TAG_LOCALE_PREFIX: &str = "en:";

/// Map one raw catalog record onto the canonical item. Returns `None` only
/// when the record is not a JSON object; oddly typed fields fall back to
/// their defaults.
pub fn normalize(raw: &Value, source: SourceKind) -> Option<NormalizedItem> {
    match source {
        SourceKind::Meal => decode::<MealRecord>(raw, source).map(meal_item),
        SourceKind::Cocktail => decode::<CocktailRecord>(raw, source).map(cocktail_item),
        SourceKind::Product => decode::<ProductRecord>(raw, source).map(product_item),
    }
}

/// Normalize a batch, dropping unreadable records.
pub fn normalize_all(records: &[Value], source: SourceKind) -> Vec<NormalizedItem> {
    records.iter().filter_map(|r| normalize(r, source)).collect()
}

fn decode<T: DeserializeOwned>(raw: &Value, source: SourceKind) -> Option<T> {
    if !raw.is_object() {
        debug!(catalog = %source, "skipping non-object record");
        return None;
    }
    match <T as serde::Deserialize>::deserialize(raw) {
        Ok(rec) => Some(rec),
        Err(e) => {
            debug!(catalog = %source, error = %e, "skipping unreadable record");
            None
        }
    }
}

fn meal_item(rec: MealRecord) -> NormalizedItem {
    NormalizedItem {
        id: rec.id.clone().unwrap_or_default(),
        name: or_default(rec.name.as_deref(), "Unknown Meal"),
        image: or_default(rec.thumb.as_deref(), PLACEHOLDER_IMAGE),
        category: or_default(rec.category.as_deref(), UNKNOWN_CATEGORY),
        area: or_default(rec.area.as_deref(), UNKNOWN_AREA),
        source: SourceKind::Meal,
        raw: CatalogRecord::Meal(rec),
    }
}

fn cocktail_item(rec: CocktailRecord) -> NormalizedItem {
    NormalizedItem {
        id: rec.id.clone().unwrap_or_default(),
        name: or_default(rec.name.as_deref(), "Unknown Drink"),
        image: or_default(rec.thumb.as_deref(), PLACEHOLDER_IMAGE),
        category: or_default(rec.category.as_deref(), UNKNOWN_CATEGORY),
        area: or_default(rec.alcoholic.as_deref(), UNKNOWN_AREA),
        source: SourceKind::Cocktail,
        raw: CatalogRecord::Cocktail(rec),
    }
}

fn product_item(rec: ProductRecord) -> NormalizedItem {
    NormalizedItem {
        id: rec.code.clone().unwrap_or_default(),
        name: or_default(rec.product_name.as_deref(), "Unknown Product"),
        image: or_default(rec.image_front_url.as_deref(), PLACEHOLDER_IMAGE),
        category: product_category(rec.categories_tags.as_deref().unwrap_or_default()),
        area: or_default(rec.brands.as_deref(), UNKNOWN_BRAND),
        source: SourceKind::Product,
        raw: CatalogRecord::Product(rec),
    }
}

/// First taxonomy tag without its `en:` prefix, or "Unknown" for an empty list.
pub fn product_category(tags: &[String]) -> String {
    match tags.first() {
        Some(tag) => tag.strip_prefix(TAG_LOCALE_PREFIX).unwrap_or(tag).to_string(),
        None => UNKNOWN_CATEGORY.to_string(),
    }
}

fn or_default(value: Option<&str>, fallback: &str) -> String {
    non_blank(value).unwrap_or(fallback).to_string()
}
