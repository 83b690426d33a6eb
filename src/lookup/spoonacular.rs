//! Spoonacular provider
//!
//! Free-text ingredient search via the `food/ingredients/search` endpoint
//! with nutrition amounts requested inline.

use serde::Deserialize;

use crate::models::NutritionRecord;

use super::{LookupError, NutritionLookup};

const BASE_URL: &str = "https://api.spoonacular.com";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Ingredient>,
}

#[derive(Debug, Deserialize)]
struct Ingredient {
    name: String,
    #[serde(default)]
    nutrition: Option<Nutrition>,
}

#[derive(Debug, Deserialize)]
struct Nutrition {
    #[serde(default)]
    nutrients: Vec<Nutrient>,
}

#[derive(Debug, Deserialize)]
struct Nutrient {
    name: String,
    #[serde(default)]
    amount: f64,
}

impl Ingredient {
    fn nutrient(&self, name: &str) -> f64 {
        self.nutrition
            .as_ref()
            .and_then(|n| {
                n.nutrients
                    .iter()
                    .find(|nu| nu.name.eq_ignore_ascii_case(name))
            })
            .map(|nu| nu.amount)
            .unwrap_or(0.0)
    }
}

/// Adapter: one Spoonacular ingredient to the canonical record, per 100g
fn record_from_ingredient(ingredient: &Ingredient) -> NutritionRecord {
    let mut record = NutritionRecord::new(ingredient.name.clone(), 100.0);
    record.calories = ingredient.nutrient("Calories");
    record.protein = ingredient.nutrient("Protein");
    record.carbs = ingredient.nutrient("Carbohydrates");
    record.fat = ingredient.nutrient("Fat");
    record.fiber = ingredient.nutrient("Fiber");
    record.sugar = ingredient.nutrient("Sugar");
    record.sodium = ingredient.nutrient("Sodium");
    record
}

/// Spoonacular client
pub struct SpoonacularClient {
    client: reqwest::blocking::Client,
    api_key: String,
    base_url: String,
}

impl SpoonacularClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Override the endpoint (tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl NutritionLookup for SpoonacularClient {
    fn name(&self) -> &'static str {
        "spoonacular"
    }

    fn search_by_name(&self, query: &str) -> Result<Vec<NutritionRecord>, LookupError> {
        let url = format!("{}/food/ingredients/search", self.base_url);
        let response: SearchResponse = self
            .client
            .get(&url)
            .query(&[
                ("apiKey", self.api_key.as_str()),
                ("query", query),
                ("number", "10"),
                ("addNutrition", "true"),
            ])
            .send()?
            .error_for_status()?
            .json()?;

        Ok(response.results.iter().map(record_from_ingredient).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_record_from_ingredient() {
        let raw = r#"{
            "results": [{
                "name": "apple",
                "nutrition": {
                    "nutrients": [
                        {"name": "Calories", "amount": 52.0},
                        {"name": "Protein", "amount": 0.3},
                        {"name": "Carbohydrates", "amount": 13.8},
                        {"name": "Fat", "amount": 0.2},
                        {"name": "Fiber", "amount": 2.4},
                        {"name": "Sugar", "amount": 10.4},
                        {"name": "Sodium", "amount": 1.0}
                    ]
                }
            }]
        }"#;
        let response: SearchResponse = serde_json::from_str(raw).unwrap();
        let record = record_from_ingredient(&response.results[0]);

        assert_eq!(record.name, "apple");
        assert_eq!(record.calories, 52.0);
        assert_eq!(record.carbs, 13.8);
        assert_eq!(record.sugar, 10.4);
        assert_eq!(record.sodium, 1.0);
    }

    #[test]
    fn test_ingredient_without_nutrition_is_zeroed() {
        let raw = r#"{"results": [{"name": "salt"}]}"#;
        let response: SearchResponse = serde_json::from_str(raw).unwrap();
        let record = record_from_ingredient(&response.results[0]);
        assert_eq!(record.name, "salt");
        assert_eq!(record.calories, 0.0);
    }
}
