//! The recipe assistant ties the generator, the record store and auth together.
//!
//! Every operation a cook can trigger goes through [`RecipeAssistant`]:
//! generating recipes, follow-up shopping lists and cards, saving recipes and
//! planning the week.

use chrono::{NaiveDate, Utc};
use log::{debug, info, warn};
use std::sync::Arc;

use crate::auth::{AuthProvider, AuthUser};
use crate::card::render_html;
use crate::display_name::{clean_display_name, DEFAULT_DISPLAY_NAME_LEN};
use crate::error::RecipeError;
use crate::prompts::{
    recipe_card_prompt, shopping_list_prompt, weekly_shopping_list_prompt, RecipeRequest,
    INGREDIENT_IDENTIFICATION_PROMPT, RECIPE_CARD_SYSTEM, SHOPPING_LIST_SYSTEM,
    WEEKLY_SHOPPING_LIST_SYSTEM,
};
use crate::providers::TextGenerator;
use crate::session::Session;
use crate::store::{
    combined_recipe_text, MealPlan, MealPlanEntry, MealSlot, NewMealPlanEntry, NewSavedRecipe,
    RecipeBook, RecordStore, SavedRecipe,
};
use crate::title::extract_title;

/// Builder for [`RecipeAssistant`]
#[derive(Default)]
pub struct RecipeAssistantBuilder {
    generator: Option<Arc<dyn TextGenerator>>,
    store: Option<Arc<dyn RecordStore>>,
    auth: Option<Arc<dyn AuthProvider>>,
}

impl RecipeAssistantBuilder {
    /// Set the text generator. Required.
    ///
    /// # Example
    /// ```
    /// use dinner_recipe_maker::providers::FakeGenerator;
    /// use dinner_recipe_maker::RecipeAssistant;
    /// use std::sync::Arc;
    ///
    /// let assistant = RecipeAssistant::builder()
    ///     .generator(Arc::new(FakeGenerator::new()))
    ///     .build();
    /// assert!(assistant.is_ok());
    /// ```
    pub fn generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Set where saved recipes and meal plans are kept.
    pub fn store(mut self, store: Arc<dyn RecordStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the sign-in provider that identifies the current user.
    pub fn auth(mut self, auth: Arc<dyn AuthProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Build the assistant. Fails if no generator was set.
    pub fn build(self) -> Result<RecipeAssistant, RecipeError> {
        let generator = self.generator.ok_or_else(|| {
            RecipeError::BuilderError("A text generator must be configured".to_string())
        })?;

        Ok(RecipeAssistant {
            generator,
            recipes: self.store.clone().map(RecipeBook::new),
            meal_plan: self.store.map(MealPlan::new),
            auth: self.auth,
        })
    }
}

/// Recipe generation plus the signed-in user's saved recipes and meal plan
pub struct RecipeAssistant {
    generator: Arc<dyn TextGenerator>,
    recipes: Option<RecipeBook>,
    meal_plan: Option<MealPlan>,
    auth: Option<Arc<dyn AuthProvider>>,
}

impl RecipeAssistant {
    /// Create a new builder
    pub fn builder() -> RecipeAssistantBuilder {
        RecipeAssistantBuilder::default()
    }

    async fn generate(&self, prompt: &str, system: &str) -> Result<String, RecipeError> {
        let text = self.generator.complete(prompt, system).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(RecipeError::ProviderError(format!(
                "{} returned an empty response",
                self.generator.provider_name()
            )));
        }
        Ok(text.to_string())
    }

    fn user(&self) -> Result<AuthUser, RecipeError> {
        self.auth
            .as_ref()
            .and_then(|auth| auth.current_user())
            .ok_or(RecipeError::NotAuthenticated)
    }

    fn recipe_book(&self) -> Result<&RecipeBook, RecipeError> {
        self.recipes
            .as_ref()
            .ok_or_else(|| RecipeError::StoreError("No record store configured".to_string()))
    }

    fn planner(&self) -> Result<&MealPlan, RecipeError> {
        self.meal_plan
            .as_ref()
            .ok_or_else(|| RecipeError::StoreError("No record store configured".to_string()))
    }

    /// Generate a recipe in markdown.
    pub async fn generate_recipe(&self, request: &RecipeRequest) -> Result<String, RecipeError> {
        request.validate()?;
        debug!("Generating {} recipe", request.kind().as_str());
        self.generate(&request.prompt(), &request.system_message())
            .await
    }

    /// Generate a recipe and make it the current one for its tab.
    pub async fn generate_into(
        &self,
        session: &mut Session,
        request: &RecipeRequest,
    ) -> Result<String, RecipeError> {
        let recipe = self.generate_recipe(request).await?;
        session.set_recipe(request.kind(), recipe.clone());
        Ok(recipe)
    }

    /// List the food items visible in a photo, comma separated.
    pub async fn identify_ingredients(&self, image: &[u8]) -> Result<String, RecipeError> {
        if image.is_empty() {
            return Err(RecipeError::InvalidInput("The photo is empty".to_string()));
        }
        let found = self
            .generator
            .describe_image(INGREDIENT_IDENTIFICATION_PROMPT, image)
            .await?;
        Ok(found.trim().to_string())
    }

    pub async fn shopping_list(
        &self,
        recipe: &str,
        available_ingredients: Option<&str>,
    ) -> Result<String, RecipeError> {
        self.generate(
            &shopping_list_prompt(recipe, available_ingredients),
            SHOPPING_LIST_SYSTEM,
        )
        .await
    }

    /// Reformat a recipe as a markdown recipe card.
    pub async fn recipe_card(&self, recipe: &str) -> Result<String, RecipeError> {
        self.generate(&recipe_card_prompt(recipe), RECIPE_CARD_SYSTEM)
            .await
    }

    /// Generate a recipe card and render it as a printable HTML page.
    pub async fn printable_card(&self, recipe: &str) -> Result<String, RecipeError> {
        let card = self.recipe_card(recipe).await?;
        Ok(render_html(&card))
    }

    /// Save a generated recipe for the signed-in user, titled from its text.
    pub async fn save_recipe(
        &self,
        request: &RecipeRequest,
        content: &str,
    ) -> Result<SavedRecipe, RecipeError> {
        let user = self.user()?;
        if content.trim().is_empty() {
            return Err(RecipeError::InvalidInput(
                "Cannot save an empty recipe".to_string(),
            ));
        }

        let recipe = NewSavedRecipe {
            user_id: user.id,
            recipe_name: extract_title(content),
            recipe_content: content.to_string(),
            recipe_type: request.kind().as_str().to_string(),
            metadata: request.metadata(),
            created_at: Utc::now().to_rfc3339(),
        };
        self.recipe_book()?.save(recipe).await
    }

    /// The signed-in user's saved recipes, newest first.
    pub async fn saved_recipes(&self) -> Result<Vec<SavedRecipe>, RecipeError> {
        let user = self.user()?;
        self.recipe_book()?.for_user(&user.id).await
    }

    /// `(id, display name)` pairs for picking a saved recipe.
    pub async fn saved_recipe_names(&self) -> Result<Vec<(String, String)>, RecipeError> {
        Ok(self
            .saved_recipes()
            .await?
            .into_iter()
            .map(|r| {
                let name = clean_display_name(&r.recipe_name, DEFAULT_DISPLAY_NAME_LEN);
                (r.id, name)
            })
            .collect())
    }

    /// Delete one of the signed-in user's saved recipes.
    pub async fn delete_recipe(&self, id: &str) -> Result<(), RecipeError> {
        let user = self.user()?;
        self.recipe_book()?.delete(id, &user.id).await
    }

    /// Put a meal on the signed-in user's plan, optionally linked to a saved recipe.
    pub async fn plan_meal(
        &self,
        planned_date: NaiveDate,
        meal_slot: MealSlot,
        recipe_name: &str,
        recipe_id: Option<&str>,
        notes: Option<&str>,
    ) -> Result<MealPlanEntry, RecipeError> {
        let user = self.user()?;
        self.planner()?
            .add(NewMealPlanEntry {
                user_id: user.id,
                recipe_name: recipe_name.trim().to_string(),
                planned_date,
                meal_slot,
                notes: notes.map(str::to_string).filter(|n| !n.trim().is_empty()),
                recipe_id: recipe_id.map(str::to_string),
            })
            .await
    }

    pub async fn remove_planned_meal(&self, id: &str) -> Result<(), RecipeError> {
        let user = self.user()?;
        self.planner()?.remove(id, &user.id).await
    }

    pub async fn meals_for_week(
        &self,
        week_start: NaiveDate,
    ) -> Result<Vec<MealPlanEntry>, RecipeError> {
        let user = self.user()?;
        self.planner()?.week(&user.id, week_start).await
    }

    /// One deduplicated shopping list for every planned meal that links a
    /// saved recipe in the week starting at `week_start`.
    pub async fn weekly_shopping_list(&self, week_start: NaiveDate) -> Result<String, RecipeError> {
        let user = self.user()?;
        let meals = self.planner()?.week(&user.id, week_start).await?;
        let book = self.recipe_book()?;

        let mut linked = Vec::new();
        for entry in meals {
            let Some(recipe_id) = entry.recipe_id.clone() else {
                continue;
            };
            match book.get(&recipe_id, &user.id).await? {
                Some(recipe) if !recipe.recipe_content.trim().is_empty() => {
                    linked.push((entry, recipe.recipe_content));
                }
                _ => warn!(
                    "Planned meal '{}' links missing or foreign recipe {}",
                    entry.recipe_name, recipe_id
                ),
            }
        }

        if linked.is_empty() {
            return Err(RecipeError::InvalidInput(
                "No planned meals with saved recipes this week".to_string(),
            ));
        }

        info!("Building weekly shopping list from {} meals", linked.len());
        self.generate(
            &weekly_shopping_list_prompt(&combined_recipe_text(&linked)),
            WEEKLY_SHOPPING_LIST_SYSTEM,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryAuth;
    use crate::prompts::MealPreferences;
    use crate::providers::FakeGenerator;
    use crate::store::MemoryStore;

    fn cuisine_request() -> RecipeRequest {
        RecipeRequest::Cuisine {
            cuisine: "Thai".to_string(),
            preferences: MealPreferences::default(),
        }
    }

    #[test]
    fn test_builder_requires_generator() {
        match RecipeAssistant::builder().build() {
            Err(RecipeError::BuilderError(_)) => {}
            _ => panic!("expected builder error"),
        }
    }

    #[tokio::test]
    async fn test_empty_output_is_error() {
        let assistant = RecipeAssistant::builder()
            .generator(Arc::new(FakeGenerator::new().with_default_response("   \n")))
            .build()
            .unwrap();

        let result = assistant.generate_recipe(&cuisine_request()).await;
        assert!(matches!(result, Err(RecipeError::ProviderError(_))));
    }

    #[tokio::test]
    async fn test_save_requires_user() {
        let assistant = RecipeAssistant::builder()
            .generator(Arc::new(FakeGenerator::new()))
            .store(Arc::new(MemoryStore::new()))
            .auth(Arc::new(MemoryAuth::new()))
            .build()
            .unwrap();

        let result = assistant.save_recipe(&cuisine_request(), "# Curry").await;
        assert!(matches!(result, Err(RecipeError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn test_save_requires_store() {
        let auth = Arc::new(MemoryAuth::new().with_account("a@b.c", "pw"));
        auth.sign_in("a@b.c", "pw").await.unwrap();
        let assistant = RecipeAssistant::builder()
            .generator(Arc::new(FakeGenerator::new()))
            .auth(auth)
            .build()
            .unwrap();

        let result = assistant.save_recipe(&cuisine_request(), "# Curry").await;
        assert!(matches!(result, Err(RecipeError::StoreError(_))));
    }

    #[tokio::test]
    async fn test_identify_ingredients_trims() {
        let assistant = RecipeAssistant::builder()
            .generator(Arc::new(
                FakeGenerator::new().with_image_response("  eggs, spinach\n"),
            ))
            .build()
            .unwrap();

        assert_eq!(
            assistant.identify_ingredients(b"jpeg").await.unwrap(),
            "eggs, spinach"
        );
        assert!(assistant.identify_ingredients(b"").await.is_err());
    }
}
