use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Descriptive fields stored with a saved recipe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeMetadata {
    pub cuisine: Option<String>,
    pub meal_type: Option<String>,
    pub complexity: Option<String>,
    pub occasion: Option<String>,
    pub cooking_method: Option<String>,
    #[serde(default)]
    pub dietary_tags: Vec<String>,
}

impl RecipeMetadata {
    /// One-line summary for list views, e.g. `Thai | Dinner | Easy | Vegan`.
    pub fn summary(&self) -> String {
        let mut parts: Vec<String> = [
            &self.cuisine,
            &self.occasion,
            &self.meal_type,
            &self.complexity,
            &self.cooking_method,
        ]
        .into_iter()
        .flatten()
        .cloned()
        .collect();

        if !self.dietary_tags.is_empty() {
            parts.push(self.dietary_tags.join(", "));
        }
        parts.join(" | ")
    }
}

/// A recipe about to be saved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSavedRecipe {
    pub user_id: String,
    pub recipe_name: String,
    pub recipe_content: String,
    pub recipe_type: String,
    #[serde(flatten)]
    pub metadata: RecipeMetadata,
    pub created_at: String,
}

/// A saved recipe as stored
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SavedRecipe {
    #[serde(deserialize_with = "id_from_any")]
    pub id: String,
    pub user_id: String,
    pub recipe_name: String,
    #[serde(default)]
    pub recipe_content: String,
    #[serde(default)]
    pub recipe_type: String,
    #[serde(flatten)]
    pub metadata: RecipeMetadata,
    pub created_at: Option<String>,
}

/// Meal slot within a planned day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealSlot {
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Dinner,
        MealSlot::Snack,
    ];
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
            MealSlot::Snack => "Snack",
        };
        f.write_str(name)
    }
}

/// A meal about to be added to the plan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewMealPlanEntry {
    pub user_id: String,
    pub recipe_name: String,
    pub planned_date: NaiveDate,
    pub meal_slot: MealSlot,
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<String>,
}

/// A planned meal as stored
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MealPlanEntry {
    #[serde(deserialize_with = "id_from_any")]
    pub id: String,
    pub user_id: String,
    pub recipe_name: String,
    pub planned_date: NaiveDate,
    pub meal_slot: MealSlot,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "optional_id_from_any")]
    pub recipe_id: Option<String>,
}

// Hosted tables may use integer or uuid keys.
fn id_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

fn optional_id_from_any<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_saved_recipe_accepts_numeric_id() {
        let recipe: SavedRecipe = serde_json::from_value(json!({
            "id": 42,
            "user_id": "u1",
            "recipe_name": "Pho",
            "recipe_content": "# Pho",
            "recipe_type": "cuisine",
            "cuisine": "Vietnamese",
            "meal_type": null,
            "dietary_tags": ["Dairy-free"],
            "created_at": "2025-03-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(recipe.id, "42");
        assert_eq!(recipe.metadata.cuisine.as_deref(), Some("Vietnamese"));
        assert_eq!(recipe.metadata.dietary_tags, vec!["Dairy-free"]);
    }

    #[test]
    fn test_new_saved_recipe_flattens_metadata() {
        let row = serde_json::to_value(NewSavedRecipe {
            user_id: "u1".to_string(),
            recipe_name: "Pho".to_string(),
            recipe_content: "# Pho".to_string(),
            recipe_type: "cuisine".to_string(),
            metadata: RecipeMetadata {
                cuisine: Some("Vietnamese".to_string()),
                ..Default::default()
            },
            created_at: "2025-03-01T10:00:00Z".to_string(),
        })
        .unwrap();

        assert_eq!(row["cuisine"], "Vietnamese");
        assert_eq!(row["occasion"], Value::Null);
        assert!(row.get("metadata").is_none());
    }

    #[test]
    fn test_meal_plan_entry_round_trip_fields() {
        let row = serde_json::to_value(NewMealPlanEntry {
            user_id: "u1".to_string(),
            recipe_name: "Tacos".to_string(),
            planned_date: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            meal_slot: MealSlot::Dinner,
            notes: None,
            recipe_id: None,
        })
        .unwrap();
        assert_eq!(row["planned_date"], "2025-03-04");
        assert_eq!(row["meal_slot"], "Dinner");
        assert!(row.get("recipe_id").is_none());
    }

    #[test]
    fn test_metadata_summary() {
        let metadata = RecipeMetadata {
            cuisine: Some("Thai".to_string()),
            meal_type: Some("Dinner".to_string()),
            complexity: Some("Easy".to_string()),
            dietary_tags: vec!["Vegan".to_string(), "Keto".to_string()],
            ..Default::default()
        };
        assert_eq!(metadata.summary(), "Thai | Dinner | Easy | Vegan, Keto");
        assert_eq!(RecipeMetadata::default().summary(), "");
    }
}
