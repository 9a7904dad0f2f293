use log::info;
use serde_json::Value;
use std::sync::Arc;

use super::{NewSavedRecipe, Query, RecordStore, SavedRecipe};
use crate::error::RecipeError;

pub const SAVED_RECIPES_TABLE: &str = "saved_recipes";

/// A user's saved recipes
#[derive(Clone)]
pub struct RecipeBook {
    store: Arc<dyn RecordStore>,
}

impl RecipeBook {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn save(&self, recipe: NewSavedRecipe) -> Result<SavedRecipe, RecipeError> {
        if recipe.recipe_content.trim().is_empty() {
            return Err(RecipeError::InvalidInput(
                "Cannot save an empty recipe".to_string(),
            ));
        }
        let row = self
            .store
            .insert(SAVED_RECIPES_TABLE, serde_json::to_value(&recipe)?)
            .await?;
        let saved: SavedRecipe = serde_json::from_value(row)?;
        info!("Saved recipe '{}' as {}", saved.recipe_name, saved.id);
        Ok(saved)
    }

    /// Delete one of `user_id`'s recipes. Recipes owned by anyone else are
    /// reported as missing.
    pub async fn delete(&self, id: &str, user_id: &str) -> Result<(), RecipeError> {
        if self.get(id, user_id).await?.is_none() {
            return Err(RecipeError::InvalidInput(format!(
                "No saved recipe {} for this user",
                id
            )));
        }
        self.store.delete(SAVED_RECIPES_TABLE, id).await
    }

    /// Saved recipes for a user, newest first.
    pub async fn for_user(&self, user_id: &str) -> Result<Vec<SavedRecipe>, RecipeError> {
        let query = Query::new()
            .eq("user_id", user_id)
            .order_by("created_at", true);
        decode_rows(self.store.query(SAVED_RECIPES_TABLE, &query).await?)
    }

    pub async fn get(&self, id: &str, user_id: &str) -> Result<Option<SavedRecipe>, RecipeError> {
        let query = Query::new().eq("id", id).eq("user_id", user_id);
        let rows = self.store.query(SAVED_RECIPES_TABLE, &query).await?;
        Ok(decode_rows(rows)?.into_iter().next())
    }
}

fn decode_rows(rows: Vec<Value>) -> Result<Vec<SavedRecipe>, RecipeError> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(RecipeError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, RecipeMetadata};

    fn recipe(user: &str, name: &str, created_at: &str) -> NewSavedRecipe {
        NewSavedRecipe {
            user_id: user.to_string(),
            recipe_name: name.to_string(),
            recipe_content: format!("# {}", name),
            recipe_type: "cuisine".to_string(),
            metadata: RecipeMetadata::default(),
            created_at: created_at.to_string(),
        }
    }

    #[tokio::test]
    async fn test_for_user_newest_first() {
        let book = RecipeBook::new(Arc::new(MemoryStore::new()));
        book.save(recipe("u1", "Old", "2025-01-01T00:00:00Z")).await.unwrap();
        book.save(recipe("u1", "New", "2025-02-01T00:00:00Z")).await.unwrap();
        book.save(recipe("u2", "Other", "2025-03-01T00:00:00Z")).await.unwrap();

        let names: Vec<String> = book
            .for_user("u1")
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.recipe_name)
            .collect();
        assert_eq!(names, vec!["New", "Old"]);
    }

    #[tokio::test]
    async fn test_get_and_delete() {
        let book = RecipeBook::new(Arc::new(MemoryStore::new()));
        let saved = book
            .save(recipe("u1", "Pho", "2025-01-01T00:00:00Z"))
            .await
            .unwrap();

        let fetched = book.get(&saved.id, "u1").await.unwrap().unwrap();
        assert_eq!(fetched.recipe_content, "# Pho");

        book.delete(&saved.id, "u1").await.unwrap();
        assert!(book.get(&saved.id, "u1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_other_users_recipes_are_invisible() {
        let book = RecipeBook::new(Arc::new(MemoryStore::new()));
        let saved = book
            .save(recipe("u1", "Pho", "2025-01-01T00:00:00Z"))
            .await
            .unwrap();

        assert!(book.get(&saved.id, "u2").await.unwrap().is_none());
        assert!(matches!(
            book.delete(&saved.id, "u2").await,
            Err(RecipeError::InvalidInput(_))
        ));
        assert!(book.get(&saved.id, "u1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_save_rejects_empty_content() {
        let book = RecipeBook::new(Arc::new(MemoryStore::new()));
        let mut empty = recipe("u1", "Nothing", "2025-01-01T00:00:00Z");
        empty.recipe_content = "  ".to_string();
        assert!(matches!(
            book.save(empty).await,
            Err(RecipeError::InvalidInput(_))
        ));
    }
}
