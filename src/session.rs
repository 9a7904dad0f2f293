use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::prompts::{Dietary, RecipeKind};
use crate::store::week_start_for;

/// Latest results for one recipe tab
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeOutput {
    pub recipe: String,
    pub shopping_list: String,
    pub card: String,
}

/// Household defaults used when planning meals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub servings: u32,
    /// Minutes
    pub time_limit: u32,
    pub spice_level: String,
    pub budget: String,
    pub dietary: Vec<Dietary>,
    pub allergies: Vec<String>,
    pub include_leftovers: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            servings: 4,
            time_limit: 30,
            spice_level: "Medium".to_string(),
            budget: "Medium".to_string(),
            dietary: Vec::new(),
            allergies: Vec::new(),
            include_leftovers: false,
        }
    }
}

/// State for one user's visit
///
/// Created once and passed to the operations that need it. The signed-in
/// user lives with the [`AuthProvider`](crate::auth::AuthProvider).
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    outputs: HashMap<RecipeKind, RecipeOutput>,
    pub identified_ingredients: String,
    pub week_start: NaiveDate,
    pub preferences: Preferences,
}

impl Session {
    pub fn new(today: NaiveDate) -> Self {
        Session {
            outputs: HashMap::new(),
            identified_ingredients: String::new(),
            week_start: week_start_for(today),
            preferences: Preferences::default(),
        }
    }

    pub fn output(&self, kind: RecipeKind) -> Option<&RecipeOutput> {
        self.outputs.get(&kind)
    }

    /// Store a freshly generated recipe, dropping the old list and card.
    pub fn set_recipe(&mut self, kind: RecipeKind, recipe: String) {
        self.outputs.insert(
            kind,
            RecipeOutput {
                recipe,
                ..Default::default()
            },
        );
    }

    pub fn set_shopping_list(&mut self, kind: RecipeKind, list: String) {
        self.outputs.entry(kind).or_default().shopping_list = list;
    }

    pub fn set_card(&mut self, kind: RecipeKind, card: String) {
        self.outputs.entry(kind).or_default().card = card;
    }

    pub fn clear(&mut self, kind: RecipeKind) {
        self.outputs.remove(&kind);
    }

    pub fn next_week(&mut self) {
        self.week_start = self.week_start + Days::new(7);
    }

    pub fn previous_week(&mut self) {
        self.week_start = self.week_start - Days::new(7);
    }

    /// The seven dates of the current planner week.
    pub fn week_days(&self) -> Vec<NaiveDate> {
        (0..7).map(|i| self.week_start + Days::new(i)).collect()
    }
}
