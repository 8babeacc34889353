//! Plain-text rendering for the terminal front end.

use std::fmt::Write;

use crate::details::{DetailView, ProductDetail, RecipeDetail};
use crate::types::NormalizedItem;

/// One numbered line per item: `  1. [Meal] Teriyaki Chicken (Chicken · Area: Japanese)`.
pub fn result_list(items: &[NormalizedItem]) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {}", i + 1, card(item));
    }
    out
}

pub fn card(item: &NormalizedItem) -> String {
    format!("[{}] {} ({} · {}: {})", item.source.badge(), item.name, item.category, item.source.area_label(), item.area)
}

pub fn detail(view: &DetailView) -> String {
    match view {
        DetailView::Recipe(r) => recipe(r),
        DetailView::Product(p) => product(p),
    }
}

fn recipe(r: &RecipeDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", r.name);
    let _ = writeln!(out, "{}", "=".repeat(r.name.chars().count()));
    let _ = writeln!(out, "Image: {}", r.image);
    let _ = writeln!(out, "Category: {}", r.category);
    let _ = writeln!(out, "{}: {}", r.source.area_label(), r.kind);
    let _ = writeln!(out, "\nIngredients");
    for line in &r.ingredients {
        let _ = writeln!(out, "  - {line}");
    }
    let _ = writeln!(out, "\nInstructions\n{}", r.instructions);
    if let Some(video) = &r.video {
        let _ = writeln!(out, "\nVideo Tutorial: {}", video.embed_url());
    }
    if let Some(src) = &r.source_url {
        let _ = writeln!(out, "\nView Source: {src}");
    }
    out
}

fn product(p: &ProductDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", p.name);
    let _ = writeln!(out, "{}", "=".repeat(p.name.chars().count()));
    let _ = writeln!(out, "Image: {}", p.image);
    let _ = writeln!(out, "Brand: {}", p.brand);
    let _ = writeln!(out, "Categories: {}", p.categories);
    if let Some(text) = &p.ingredients_text {
        let _ = writeln!(out, "\nIngredients\n{text}");
    }
    if let Some(n) = &p.nutrition {
        let _ = writeln!(out, "\nNutrition (per 100g)");
        let _ = writeln!(out, "  - Energy: {} kcal", n.energy_kcal);
        let _ = writeln!(out, "  - Fat: {}g", n.fat);
        let _ = writeln!(out, "  - Carbs: {}g", n.carbohydrates);
        let _ = writeln!(out, "  - Proteins: {}g", n.proteins);
    }
    let _ = writeln!(out, "\nView on OpenFoodFacts: {}", p.page_url);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogs::SourceKind;
    use crate::mapping::normalize;
    use serde_json::json;

    #[test]
    fn cards_carry_badges() {
        let items = vec![
            normalize(&json!({"idMeal": "1", "strMeal": "Pad Thai", "strCategory": "Pasta", "strArea": "Thai"}), SourceKind::Meal).unwrap(),
            normalize(&json!({"idDrink": "2", "strDrink": "Mojito", "strCategory": "Cocktail", "strAlcoholic": "Alcoholic"}), SourceKind::Cocktail).unwrap(),
            normalize(&json!({"code": "3", "product_name": "Oat Milk", "brands": "Oatly"}), SourceKind::Product).unwrap(),
        ];
        let text = result_list(&items);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "  1. [Meal] Pad Thai (Pasta · Area: Thai)");
        assert_eq!(lines[1], "  2. [Drink] Mojito (Cocktail · Type: Alcoholic)");
        assert_eq!(lines[2], "  3. [Product] Oat Milk (Unknown · Brand: Oatly)");
    }

    #[test]
    fn recipe_detail_lists_ingredients_and_video() {
        let item = normalize(
            &json!({"idMeal": "1", "strMeal": "Pancakes", "strIngredient1": "Flour", "strMeasure1": "100g",
                    "strYoutube": "https://www.youtube.com/watch?v=LWuuCndtJr0"}),
            SourceKind::Meal,
        )
        .unwrap();
        let text = detail(&DetailView::from_item(&item));
        assert!(text.starts_with("Pancakes\n========\n"));
        assert!(text.contains("  - 100g Flour\n"));
        assert!(text.contains("Video Tutorial: https://www.youtube.com/embed/LWuuCndtJr0"));
        assert!(!text.contains("View Source"));
    }

    #[test]
    fn recipe_detail_labels_the_secondary_field_per_source() {
        let meal = normalize(&json!({"idMeal": "1", "strMeal": "Pad Thai", "strArea": "Thai"}), SourceKind::Meal).unwrap();
        let text = detail(&DetailView::from_item(&meal));
        assert!(text.contains("\nArea: Thai\n"));
        assert!(!text.contains("Type:"));

        let drink = normalize(&json!({"idDrink": "2", "strDrink": "Mojito", "strAlcoholic": "Alcoholic"}), SourceKind::Cocktail).unwrap();
        assert!(detail(&DetailView::from_item(&drink)).contains("\nType: Alcoholic\n"));
    }

    #[test]
    fn product_detail_shows_nutrition_block_only_when_present() {
        let with = normalize(&json!({"code": "9", "product_name": "Bar", "nutriments": {"proteins_100g": 12}}), SourceKind::Product).unwrap();
        let text = detail(&DetailView::from_item(&with));
        assert!(text.contains("Nutrition (per 100g)"));
        assert!(text.contains("  - Proteins: 12g"));
        assert!(text.contains("View on OpenFoodFacts: https://world.openfoodfacts.org/product/9"));

        let without = normalize(&json!({"code": "9"}), SourceKind::Product).unwrap();
        assert!(!detail(&DetailView::from_item(&without)).contains("Nutrition"));
    }
}
