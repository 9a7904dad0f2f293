//! Persistence for saved recipes and the weekly meal plan.
//!
//! Rows travel as JSON objects through the [`RecordStore`] trait so the same
//! typed helpers work against the hosted database and the in-memory store.

mod meal_plan;
mod memory;
mod recipe_book;
mod records;
mod supabase;

pub use meal_plan::{combined_recipe_text, week_start_for, MealPlan, MEAL_PLANS_TABLE};
pub use memory::MemoryStore;
pub use recipe_book::{RecipeBook, SAVED_RECIPES_TABLE};
pub use records::{
    MealPlanEntry, MealSlot, NewMealPlanEntry, NewSavedRecipe, RecipeMetadata, SavedRecipe,
};
pub use supabase::SupabaseStore;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::RecipeError;

/// Row filter understood by every store
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Eq(String, Value),
    Gte(String, Value),
    Lte(String, Value),
}

impl Filter {
    pub fn column(&self) -> &str {
        match self {
            Filter::Eq(column, _) | Filter::Gte(column, _) | Filter::Lte(column, _) => column,
        }
    }
}

/// Sort key for query results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub descending: bool,
}

/// Select query over one table
///
/// # Example
/// ```
/// use dinner_recipe_maker::store::Query;
///
/// let query = Query::new()
///     .eq("user_id", "u1")
///     .order_by("created_at", true);
/// assert_eq!(query.filters.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// Columns to return; all columns when empty
    pub columns: Vec<String>,
    pub filters: Vec<Filter>,
    pub order: Vec<Order>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Eq(column.to_string(), value.into()));
        self
    }

    pub fn gte(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Gte(column.to_string(), value.into()));
        self
    }

    pub fn lte(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Lte(column.to_string(), value.into()));
        self
    }

    pub fn order_by(mut self, column: &str, descending: bool) -> Self {
        self.order.push(Order {
            column: column.to_string(),
            descending,
        });
        self
    }
}

/// Table-oriented CRUD over JSON rows
///
/// Rows are identified by their `id` column. Implementations should be
/// thread-safe; the assistant shares one store across requests.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a row and return it as stored, including its `id`.
    async fn insert(&self, table: &str, row: Value) -> Result<Value, RecipeError>;

    /// Merge `changes` into the row with the given id and return the result.
    async fn update(&self, table: &str, id: &str, changes: Value) -> Result<Value, RecipeError>;

    /// Delete the row with the given id.
    async fn delete(&self, table: &str, id: &str) -> Result<(), RecipeError>;

    /// Return the rows matching `query`.
    async fn query(&self, table: &str, query: &Query) -> Result<Vec<Value>, RecipeError>;
}
