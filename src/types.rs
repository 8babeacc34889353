use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::catalogs::SourceKind;

pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/300x300?text=No+Image";
pub const UNKNOWN_CATEGORY: &str = "Unknown";
pub const UNKNOWN_AREA: &str = "Unknown";
pub const UNKNOWN_BRAND: &str = "Unknown Brand";

/// Canonical, source-agnostic display record.
///
/// `area` is overloaded: cuisine region for meals, alcoholic status for
/// cocktails, brand for products. `SourceKind::area_label` names it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedItem {
    pub id: String,
    pub name: String,
    pub image: String,
    pub category: String,
    pub area: String,
    pub source: SourceKind,
    pub raw: CatalogRecord,
}

/// The original record, typed per source. Keys not modelled here are kept in
/// each variant's `extra` map and serialize back untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CatalogRecord {
    Meal(MealRecord),
    Cocktail(CocktailRecord),
    Product(ProductRecord),
}

impl CatalogRecord {
    pub fn kind(&self) -> SourceKind {
        match self {
            CatalogRecord::Meal(_) => SourceKind::Meal,
            CatalogRecord::Cocktail(_) => SourceKind::Cocktail,
            CatalogRecord::Product(_) => SourceKind::Product,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealRecord {
    #[serde(rename = "idMeal", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "strMeal", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "strMealThumb", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub thumb: Option<String>,
    #[serde(rename = "strCategory", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "strArea", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(rename = "strInstructions", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(rename = "strYoutube", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(rename = "strSource", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Everything else, including the numbered `strIngredientN`/`strMeasureN` pairs.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CocktailRecord {
    #[serde(rename = "idDrink", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "strDrink", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "strDrinkThumb", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub thumb: Option<String>,
    #[serde(rename = "strCategory", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "strAlcoholic", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub alcoholic: Option<String>,
    #[serde(rename = "strInstructions", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(rename = "strVideo", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(rename = "strYoutube", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(rename = "strSource", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub image_front_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_tags", skip_serializing_if = "Option::is_none")]
    pub categories_tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub brands: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub ingredients_text: Option<String>,
    #[serde(default, deserialize_with = "lenient_nutriments", skip_serializing_if = "Option::is_none")]
    pub nutriments: Option<Nutriments>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Per-100g nutrition values as reported by Open Food Facts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutriments {
    #[serde(rename = "energy-kcal_100g", default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub energy_kcal_100g: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub fat_100g: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub carbohydrates_100g: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub proteins_100g: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Shared shape of the two recipe catalogs (meals and cocktails).
pub trait RecipeRecord {
    fn instructions(&self) -> Option<&str>;
    fn video_link(&self) -> Option<&str>;
    fn source_link(&self) -> Option<&str>;
    /// Look up a field the typed struct does not model, e.g. `strIngredient3`.
    fn field(&self, key: &str) -> Option<&str>;
}

impl RecipeRecord for MealRecord {
    fn instructions(&self) -> Option<&str> { non_blank(self.instructions.as_deref()) }
    fn video_link(&self) -> Option<&str> { non_blank(self.youtube.as_deref()) }
    fn source_link(&self) -> Option<&str> { non_blank(self.source_url.as_deref()) }
    fn field(&self, key: &str) -> Option<&str> { self.extra.get(key).and_then(Value::as_str) }
}

impl RecipeRecord for CocktailRecord {
    fn instructions(&self) -> Option<&str> { non_blank(self.instructions.as_deref()) }
    fn video_link(&self) -> Option<&str> {
        non_blank(self.video.as_deref()).or_else(|| non_blank(self.youtube.as_deref()))
    }
    fn source_link(&self) -> Option<&str> { non_blank(self.source_url.as_deref()) }
    fn field(&self, key: &str) -> Option<&str> { self.extra.get(key).and_then(Value::as_str) }
}

pub(crate) fn non_blank(s: Option<&str>) -> Option<&str> { s.filter(|v| !v.trim().is_empty()) }

// Catalog fields are strings, but numbers show up in older dumps. Any other
// shape reads as absent so one odd field never drops the whole record.
fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

// Non-string tags are skipped; a non-array reads as absent.
fn lenient_tags<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<String>>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Array(tags)) => Some(
            tags.into_iter()
                .filter_map(|t| match t {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

fn lenient_nutriments<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Nutriments>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(v @ Value::Object(_)) => serde_json::from_value(v).ok(),
        _ => None,
    })
}

// Open Food Facts mixes numbers and numeric strings in `nutriments`.
fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
