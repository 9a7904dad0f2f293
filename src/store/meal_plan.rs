use chrono::{Datelike, Days, NaiveDate};
use log::{debug, info};
use std::sync::Arc;

use super::{MealPlanEntry, NewMealPlanEntry, Query, RecordStore};
use crate::error::RecipeError;

pub const MEAL_PLANS_TABLE: &str = "meal_plans";

/// Monday of the week containing `date`.
pub fn week_start_for(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_monday()))
}

/// Concatenate planned meals with their recipe text for one shopping-list prompt.
///
/// Each section is headed `--- {name} ({slot}, {date}) ---`.
pub fn combined_recipe_text(meals: &[(MealPlanEntry, String)]) -> String {
    meals
        .iter()
        .map(|(entry, content)| {
            format!(
                "--- {} ({}, {}) ---\n{}",
                entry.recipe_name, entry.meal_slot, entry.planned_date, content
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// A user's weekly meal plan
#[derive(Clone)]
pub struct MealPlan {
    store: Arc<dyn RecordStore>,
}

impl MealPlan {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn add(&self, entry: NewMealPlanEntry) -> Result<MealPlanEntry, RecipeError> {
        if entry.recipe_name.trim().is_empty() {
            return Err(RecipeError::InvalidInput(
                "A planned meal needs a recipe name".to_string(),
            ));
        }
        let row = self
            .store
            .insert(MEAL_PLANS_TABLE, serde_json::to_value(&entry)?)
            .await?;
        info!(
            "Planned '{}' for {} {}",
            entry.recipe_name, entry.planned_date, entry.meal_slot
        );
        Ok(serde_json::from_value(row)?)
    }

    /// Remove one of `user_id`'s planned meals.
    pub async fn remove(&self, id: &str, user_id: &str) -> Result<(), RecipeError> {
        let query = Query::new().select(&["id"]).eq("id", id).eq("user_id", user_id);
        if self.store.query(MEAL_PLANS_TABLE, &query).await?.is_empty() {
            return Err(RecipeError::InvalidInput(format!(
                "No planned meal {} for this user",
                id
            )));
        }
        self.store.delete(MEAL_PLANS_TABLE, id).await
    }

    /// Meals planned in the seven days starting at `week_start`, by date then slot.
    pub async fn week(
        &self,
        user_id: &str,
        week_start: NaiveDate,
    ) -> Result<Vec<MealPlanEntry>, RecipeError> {
        let week_end = week_start + Days::new(6);
        debug!("Loading meal plan {} to {}", week_start, week_end);

        let query = Query::new()
            .eq("user_id", user_id)
            .gte("planned_date", week_start.to_string())
            .lte("planned_date", week_end.to_string())
            .order_by("planned_date", false);
        let mut entries = self
            .store
            .query(MEAL_PLANS_TABLE, &query)
            .await?
            .into_iter()
            .map(serde_json::from_value::<MealPlanEntry>)
            .collect::<Result<Vec<_>, _>>()?;

        entries.sort_by_key(|e| (e.planned_date, e.meal_slot));
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MealSlot, MemoryStore};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(name: &str, day: NaiveDate, slot: MealSlot) -> NewMealPlanEntry {
        NewMealPlanEntry {
            user_id: "u1".to_string(),
            recipe_name: name.to_string(),
            planned_date: day,
            meal_slot: slot,
            notes: None,
            recipe_id: None,
        }
    }

    #[test]
    fn test_week_start_for() {
        // 2025-03-05 is a Wednesday
        assert_eq!(week_start_for(date(2025, 3, 5)), date(2025, 3, 3));
        assert_eq!(week_start_for(date(2025, 3, 3)), date(2025, 3, 3));
        assert_eq!(week_start_for(date(2025, 3, 9)), date(2025, 3, 3));
    }

    #[tokio::test]
    async fn test_week_orders_by_date_then_slot() {
        let plan = MealPlan::new(Arc::new(MemoryStore::new()));
        plan.add(entry("Tacos", date(2025, 3, 4), MealSlot::Dinner)).await.unwrap();
        plan.add(entry("Oats", date(2025, 3, 4), MealSlot::Breakfast)).await.unwrap();
        plan.add(entry("Soup", date(2025, 3, 3), MealSlot::Lunch)).await.unwrap();
        plan.add(entry("Next week", date(2025, 3, 10), MealSlot::Dinner)).await.unwrap();

        let names: Vec<String> = plan
            .week("u1", date(2025, 3, 3))
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.recipe_name)
            .collect();
        assert_eq!(names, vec!["Soup", "Oats", "Tacos"]);
    }

    #[tokio::test]
    async fn test_add_requires_name() {
        let plan = MealPlan::new(Arc::new(MemoryStore::new()));
        let result = plan.add(entry(" ", date(2025, 3, 4), MealSlot::Dinner)).await;
        assert!(matches!(result, Err(RecipeError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_remove() {
        let plan = MealPlan::new(Arc::new(MemoryStore::new()));
        let added = plan
            .add(entry("Tacos", date(2025, 3, 4), MealSlot::Dinner))
            .await
            .unwrap();
        plan.remove(&added.id, "u1").await.unwrap();
        assert!(plan.week("u1", date(2025, 3, 3)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_only_own_meals() {
        let plan = MealPlan::new(Arc::new(MemoryStore::new()));
        let added = plan
            .add(entry("Tacos", date(2025, 3, 4), MealSlot::Dinner))
            .await
            .unwrap();

        let result = plan.remove(&added.id, "u2").await;
        assert!(matches!(result, Err(RecipeError::InvalidInput(_))));
        assert_eq!(plan.week("u1", date(2025, 3, 3)).await.unwrap().len(), 1);
    }

    #[test]
    fn test_combined_recipe_text() {
        let meals = vec![
            (
                MealPlanEntry {
                    id: "1".to_string(),
                    user_id: "u1".to_string(),
                    recipe_name: "Tacos".to_string(),
                    planned_date: date(2025, 3, 4),
                    meal_slot: MealSlot::Dinner,
                    notes: None,
                    recipe_id: Some("9".to_string()),
                },
                "- tortillas".to_string(),
            ),
            (
                MealPlanEntry {
                    id: "2".to_string(),
                    user_id: "u1".to_string(),
                    recipe_name: "Soup".to_string(),
                    planned_date: date(2025, 3, 5),
                    meal_slot: MealSlot::Lunch,
                    notes: None,
                    recipe_id: Some("8".to_string()),
                },
                "- leeks".to_string(),
            ),
        ];

        assert_eq!(
            combined_recipe_text(&meals),
            "--- Tacos (Dinner, 2025-03-04) ---\n- tortillas\n\n--- Soup (Lunch, 2025-03-05) ---\n- leeks"
        );
    }
}
