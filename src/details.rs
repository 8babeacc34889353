//! Detail view assembly for a single canonical item.

use serde::Serialize;

use crate::catalogs::SourceKind;
use crate::types::{non_blank, CatalogRecord, NormalizedItem, ProductRecord, RecipeRecord};

/// Recipe catalogs expose ingredients as numbered fields 1 through 20.
pub const MAX_INGREDIENTS: usize = 20;

const NOT_AVAILABLE: &str = "N/A";
const NO_INSTRUCTIONS: &str = "No instructions available.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum DetailView {
    Recipe(RecipeDetail),
    Product(ProductDetail),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeDetail {
    pub name: String,
    pub image: String,
    pub category: String,
    /// Cuisine region for meals, alcoholic status for cocktails.
    pub kind: String,
    pub source: SourceKind,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub video: Option<VideoRef>,
    pub source_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoRef {
    pub id: String,
}

impl VideoRef {
    pub fn embed_url(&self) -> String { format!("https://www.youtube.com/embed/{}", self.id) }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetail {
    pub name: String,
    pub image: String,
    pub brand: String,
    pub categories: String,
    pub ingredients_text: Option<String>,
    pub nutrition: Option<Nutrition>,
    pub page_url: String,
}

/// Per 100 g. Values the catalog omits show as zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Nutrition {
    pub energy_kcal: f64,
    pub fat: f64,
    pub carbohydrates: f64,
    pub proteins: f64,
}

impl DetailView {
    pub fn from_item(item: &NormalizedItem) -> Self {
        match &item.raw {
            CatalogRecord::Meal(rec) => DetailView::Recipe(recipe_detail(item, rec)),
            CatalogRecord::Cocktail(rec) => DetailView::Recipe(recipe_detail(item, rec)),
            CatalogRecord::Product(rec) => DetailView::Product(product_detail(item, rec)),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            DetailView::Recipe(r) => &r.name,
            DetailView::Product(p) => &p.name,
        }
    }
}

fn recipe_detail(item: &NormalizedItem, rec: &impl RecipeRecord) -> RecipeDetail {
    RecipeDetail {
        name: item.name.clone(),
        image: item.image.clone(),
        category: non_blank(Some(item.category.as_str())).unwrap_or(NOT_AVAILABLE).to_string(),
        kind: non_blank(Some(item.area.as_str())).unwrap_or(NOT_AVAILABLE).to_string(),
        source: item.source,
        ingredients: ingredient_lines(rec),
        instructions: rec.instructions().unwrap_or(NO_INSTRUCTIONS).to_string(),
        video: rec.video_link().and_then(video_id).map(|id| VideoRef { id: id.to_string() }),
        source_url: rec.source_link().map(str::to_string),
    }
}

fn product_detail(item: &NormalizedItem, rec: &ProductRecord) -> ProductDetail {
    ProductDetail {
        name: item.name.clone(),
        image: item.image.clone(),
        brand: non_blank(rec.brands.as_deref()).unwrap_or(NOT_AVAILABLE).to_string(),
        categories: item.category.clone(),
        ingredients_text: non_blank(rec.ingredients_text.as_deref()).map(str::to_string),
        nutrition: rec.nutriments.as_ref().map(|n| Nutrition {
            energy_kcal: n.energy_kcal_100g.unwrap_or(0.0),
            fat: n.fat_100g.unwrap_or(0.0),
            carbohydrates: n.carbohydrates_100g.unwrap_or(0.0),
            proteins: n.proteins_100g.unwrap_or(0.0),
        }),
        page_url: format!("https://world.openfoodfacts.org/product/{}", item.id),
    }
}

/// "measure ingredient" lines for every numbered pair whose ingredient is not
/// blank. A missing measure leaves an empty prefix.
pub fn ingredient_lines(rec: &impl RecipeRecord) -> Vec<String> {
    (1..=MAX_INGREDIENTS)
        .filter_map(|i| {
            let ingredient = rec.field(&format!("strIngredient{i}"))?.trim();
            if ingredient.is_empty() {
                return None;
            }
            let measure = rec.field(&format!("strMeasure{i}")).map(str::trim).unwrap_or("");
            Some(format!("{measure} {ingredient}"))
        })
        .collect()
}

/// Everything after the first `v=` in a video link; `None` when nothing follows.
pub fn video_id(link: &str) -> Option<&str> {
    link.split_once("v=").map(|(_, id)| id).filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogs::SourceKind;
    use crate::mapping::normalize;
    use serde_json::json;

    #[test]
    fn ingredients_skip_blank_pairs_and_keep_empty_measure() {
        let item = normalize(
            &json!({
                "idMeal": "1",
                "strIngredient1": "Flour", "strMeasure1": "200g",
                "strIngredient2": "", "strMeasure2": "1 tsp",
                "strIngredient3": "Salt", "strMeasure3": "",
                "strIngredient4": null, "strMeasure4": null,
                "strIngredient5": "   "
            }),
            SourceKind::Meal,
        )
        .unwrap();
        let CatalogRecord::Meal(rec) = &item.raw else { panic!("expected a meal record") };
        assert_eq!(ingredient_lines(rec), vec!["200g Flour".to_string(), " Salt".to_string()]);
    }

    #[test]
    fn ingredients_stop_at_twenty() {
        let mut raw = serde_json::Map::new();
        raw.insert("idDrink".into(), json!("9"));
        for i in 1..=21 {
            raw.insert(format!("strIngredient{i}"), json!(format!("ing{i}")));
            raw.insert(format!("strMeasure{i}"), json!(" 1 "));
        }
        let item = normalize(&serde_json::Value::Object(raw), SourceKind::Cocktail).unwrap();
        let CatalogRecord::Cocktail(rec) = &item.raw else { panic!("expected a cocktail record") };
        let lines = ingredient_lines(rec);
        assert_eq!(lines.len(), 20);
        assert_eq!(lines[0], "1 ing1");
        assert_eq!(lines[19], "1 ing20");
    }

    #[test]
    fn video_id_extraction() {
        assert_eq!(video_id("https://www.youtube.com/watch?v=abc123"), Some("abc123"));
        assert_eq!(video_id("https://youtu.be/abc123"), None);
        assert_eq!(video_id("https://www.youtube.com/watch?v="), None);
    }

    #[test]
    fn recipe_view_without_video_or_instructions() {
        let item = normalize(&json!({"idMeal": "7", "strMeal": "Toast", "strYoutube": "https://example.com/toast"}), SourceKind::Meal).unwrap();
        let DetailView::Recipe(r) = DetailView::from_item(&item) else { panic!("expected a recipe view") };
        assert!(r.video.is_none());
        assert_eq!(r.instructions, "No instructions available.");
        assert_eq!(r.category, "Unknown");
        assert!(r.ingredients.is_empty());
    }

    #[test]
    fn recipe_view_with_video_and_source() {
        let item = normalize(
            &json!({"idMeal": "52772", "strMeal": "Teriyaki", "strInstructions": "Preheat oven.",
                    "strYoutube": "https://www.youtube.com/watch?v=4aZr5hZXP_s", "strSource": "https://example.com/r"}),
            SourceKind::Meal,
        )
        .unwrap();
        let DetailView::Recipe(r) = DetailView::from_item(&item) else { panic!("expected a recipe view") };
        let video = r.video.unwrap();
        assert_eq!(video.id, "4aZr5hZXP_s");
        assert_eq!(video.embed_url(), "https://www.youtube.com/embed/4aZr5hZXP_s");
        assert_eq!(r.instructions, "Preheat oven.");
        assert_eq!(r.source_url.as_deref(), Some("https://example.com/r"));
    }

    #[test]
    fn product_view_nutrition_defaults_to_zero() {
        let item = normalize(
            &json!({"code": "301", "product_name": "Nutella", "brands": "Ferrero", "categories_tags": ["en:spreads"],
                    "ingredients_text": "Sugar, palm oil", "nutriments": {"fat_100g": 30.9}}),
            SourceKind::Product,
        )
        .unwrap();
        let DetailView::Product(p) = DetailView::from_item(&item) else { panic!("expected a product view") };
        assert_eq!(p.brand, "Ferrero");
        assert_eq!(p.categories, "spreads");
        assert_eq!(p.ingredients_text.as_deref(), Some("Sugar, palm oil"));
        assert_eq!(p.nutrition, Some(Nutrition { energy_kcal: 0.0, fat: 30.9, carbohydrates: 0.0, proteins: 0.0 }));
        assert_eq!(p.page_url, "https://world.openfoodfacts.org/product/301");
    }

    #[test]
    fn product_view_without_nutriments() {
        let item = normalize(&json!({"code": "5"}), SourceKind::Product).unwrap();
        let DetailView::Product(p) = DetailView::from_item(&item) else { panic!("expected a product view") };
        assert!(p.nutrition.is_none());
        assert_eq!(p.brand, "N/A");
    }
}
