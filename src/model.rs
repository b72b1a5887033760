use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lightweight recipe record as shown in lists and grids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb")]
    pub thumbnail: Option<String>,
    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,
    #[serde(rename = "strArea", default)]
    pub area: Option<String>,
}

/// Full recipe record as returned by search and lookup endpoints.
///
/// The API flattens ingredients into numbered `strIngredient1..20` /
/// `strMeasure1..20` columns; those land in `extra` and are recovered
/// by [`Recipe::ingredients`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb")]
    pub thumbnail: Option<String>,
    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,
    #[serde(rename = "strArea", default)]
    pub area: Option<String>,
    #[serde(rename = "strInstructions", default)]
    pub instructions: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// One ingredient line: name plus free-form measure ("1 cup", "dash").
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ingredient {
    pub name: String,
    pub measure: String,
}

impl Recipe {
    pub fn summary(&self) -> RecipeSummary {
        RecipeSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            thumbnail: self.thumbnail.clone(),
            category: self.category.clone(),
            area: self.area.clone(),
        }
    }

    /// Collect the numbered ingredient/measure pairs, skipping blank
    /// slots. The API pads unused slots with empty strings or nulls.
    pub fn ingredients(&self) -> Vec<Ingredient> {
        let mut ingredients = Vec::new();
        for i in 1..=20 {
            let name = self
                .extra
                .get(&format!("strIngredient{}", i))
                .and_then(Value::as_str)
                .map(str::trim)
                .unwrap_or("");
            if name.is_empty() {
                continue;
            }
            let measure = self
                .extra
                .get(&format!("strMeasure{}", i))
                .and_then(Value::as_str)
                .map(str::trim)
                .unwrap_or("");
            ingredients.push(Ingredient {
                name: name.to_string(),
                measure: measure.to_string(),
            });
        }
        ingredients
    }

    /// Instruction text split into trimmed, non-empty paragraphs.
    pub fn instruction_paragraphs(&self) -> Vec<&str> {
        self.instructions
            .as_deref()
            .unwrap_or("")
            .split('\n')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn recipe_from_json(value: Value) -> Recipe {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_ingredients_skip_blank_slots() {
        let recipe = recipe_from_json(json!({
            "idMeal": "52772",
            "strMeal": "Teriyaki Chicken Casserole",
            "strMealThumb": "https://example.com/teriyaki.jpg",
            "strIngredient1": "soy sauce",
            "strMeasure1": "3/4 cup",
            "strIngredient2": " ",
            "strMeasure2": "1 tbsp",
            "strIngredient3": "water",
            "strMeasure3": null,
            "strIngredient4": null,
            "strMeasure4": null
        }));

        let ingredients = recipe.ingredients();
        assert_eq!(ingredients.len(), 2);
        assert_eq!(ingredients[0].name, "soy sauce");
        assert_eq!(ingredients[0].measure, "3/4 cup");
        assert_eq!(ingredients[1].name, "water");
        assert_eq!(ingredients[1].measure, "");
    }

    #[test]
    fn test_ingredients_trim_whitespace() {
        let recipe = recipe_from_json(json!({
            "idMeal": "1",
            "strMeal": "Test",
            "strMealThumb": null,
            "strIngredient1": "  flour  ",
            "strMeasure1": " 2 cups "
        }));

        let ingredients = recipe.ingredients();
        assert_eq!(ingredients[0].name, "flour");
        assert_eq!(ingredients[0].measure, "2 cups");
    }

    #[test]
    fn test_instruction_paragraphs() {
        let recipe = recipe_from_json(json!({
            "idMeal": "1",
            "strMeal": "Test",
            "strMealThumb": null,
            "strInstructions": "Preheat oven.\n\n  Mix everything.  \nBake.\n"
        }));

        assert_eq!(
            recipe.instruction_paragraphs(),
            vec!["Preheat oven.", "Mix everything.", "Bake."]
        );
    }

    #[test]
    fn test_instruction_paragraphs_missing() {
        let recipe = recipe_from_json(json!({
            "idMeal": "1",
            "strMeal": "Test",
            "strMealThumb": null
        }));

        assert!(recipe.instruction_paragraphs().is_empty());
    }

    #[test]
    fn test_summary_carries_identity() {
        let recipe = recipe_from_json(json!({
            "idMeal": "52772",
            "strMeal": "Teriyaki Chicken Casserole",
            "strMealThumb": "https://example.com/teriyaki.jpg",
            "strCategory": "Chicken",
            "strArea": "Japanese"
        }));

        let summary = recipe.summary();
        assert_eq!(summary.id, "52772");
        assert_eq!(summary.name, "Teriyaki Chicken Casserole");
        assert_eq!(summary.category.as_deref(), Some("Chicken"));
        assert_eq!(summary.area.as_deref(), Some("Japanese"));
    }

    #[test]
    fn test_summary_deserializes_without_category() {
        // filter.php results carry only id, name and thumbnail
        let summary: RecipeSummary = serde_json::from_value(json!({
            "idMeal": "52772",
            "strMeal": "Teriyaki Chicken Casserole",
            "strMealThumb": "https://example.com/teriyaki.jpg"
        }))
        .unwrap();

        assert!(summary.category.is_none());
        assert!(summary.area.is_none());
    }
}
