//! Prompt construction for every request the app sends to a text generator.
//!
//! Recipe prompts are assembled from the choices a cook makes in one of the
//! four recipe tabs. Follow-up prompts (shopping lists, recipe cards, the
//! weekly list) live in [`followups`].

mod followups;

pub use followups::{
    recipe_card_prompt, shopping_list_prompt, weekly_shopping_list_prompt,
    INGREDIENT_IDENTIFICATION_PROMPT, RECIPE_CARD_SYSTEM, SHOPPING_LIST_SYSTEM,
    WEEKLY_SHOPPING_LIST_SYSTEM,
};

use serde::{Deserialize, Serialize};

use crate::error::RecipeError;
use crate::store::RecipeMetadata;

/// Default system prompt for recipe suggestions.
pub const CHEF_SYSTEM: &str = "You are a helpful chef assistant.";

/// Dietary preference a cook can tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dietary {
    Vegetarian,
    Vegan,
    Pescatarian,
    GlutenFree,
    DairyFree,
    Keto,
    Paleo,
    LowCarb,
    LowSodium,
    HighFiber,
    HighProtein,
    NutFree,
}

impl Dietary {
    /// Wording used inside a recipe prompt.
    ///
    /// Nut-free is only recorded as a tag; it never reaches the prompt.
    pub fn restriction(self) -> Option<&'static str> {
        Some(match self {
            Dietary::Vegetarian => "vegetarian",
            Dietary::Vegan => "vegan",
            Dietary::Pescatarian => "pescatarian",
            Dietary::GlutenFree => "gluten-free",
            Dietary::DairyFree => "dairy-free",
            Dietary::Keto => "keto",
            Dietary::Paleo => "paleo",
            Dietary::LowCarb => "low-carb",
            Dietary::LowSodium => "low-sodium",
            Dietary::HighFiber => "high-fiber",
            Dietary::HighProtein => "high-protein",
            Dietary::NutFree => return None,
        })
    }

    /// Label stored with a saved recipe.
    pub fn tag(self) -> &'static str {
        match self {
            Dietary::Vegetarian => "Vegetarian",
            Dietary::Vegan => "Vegan",
            Dietary::Pescatarian => "Pescatarian",
            Dietary::GlutenFree => "Gluten-free",
            Dietary::DairyFree => "Dairy-free",
            Dietary::Keto => "Keto",
            Dietary::Paleo => "Paleo",
            Dietary::LowCarb => "Low-carb",
            Dietary::LowSodium => "Low-sodium",
            Dietary::HighFiber => "High Fiber",
            Dietary::HighProtein => "High Protein",
            Dietary::NutFree => "Nut-free",
        }
    }
}

/// Preferred cooking method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CookingMethod {
    #[default]
    Any,
    OnePot,
    SlowCooker,
    AirFryer,
    PressureCooker,
    Oven,
    Stovetop,
    Grilling,
    NoCook,
    Microwave,
}

impl CookingMethod {
    /// Label shown to the cook and stored with saved recipes.
    pub fn label(self) -> &'static str {
        match self {
            CookingMethod::Any => "Any method",
            CookingMethod::OnePot => "One-pot/One-pan",
            CookingMethod::SlowCooker => "Slow cooker",
            CookingMethod::AirFryer => "Air fryer",
            CookingMethod::PressureCooker => "Instant Pot/Pressure cooker",
            CookingMethod::Oven => "Oven/Baking",
            CookingMethod::Stovetop => "Stovetop",
            CookingMethod::Grilling => "Grilling",
            CookingMethod::NoCook => "No-cook/Raw",
            CookingMethod::Microwave => "Microwave",
        }
    }

    fn phrase(self) -> Option<&'static str> {
        Some(match self {
            CookingMethod::Any => return None,
            CookingMethod::OnePot => "one-pot or one-pan",
            CookingMethod::SlowCooker => "slow cooker",
            CookingMethod::AirFryer => "air fryer",
            CookingMethod::PressureCooker => "Instant Pot or pressure cooker",
            CookingMethod::Oven => "oven-baked",
            CookingMethod::Stovetop => "stovetop",
            CookingMethod::Grilling => "grilled",
            CookingMethod::NoCook => "no-cook",
            CookingMethod::Microwave => "microwave",
        })
    }
}

/// How long the cook is willing to spend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CookingTime {
    #[default]
    Quick,
    Medium,
    Long,
}

impl CookingTime {
    fn phrase(self) -> &'static str {
        match self {
            CookingTime::Quick => "quick and easy, taking less than 30 minutes",
            CookingTime::Medium => "moderate cooking time, around 30-60 minutes",
            CookingTime::Long => "can take longer to prepare, 60+ minutes",
        }
    }
}

/// Choices shared by every recipe tab
#[derive(Debug, Clone, PartialEq)]
pub struct MealPreferences {
    pub meal_type: String,
    pub complexity: String,
    pub portion: String,
    pub cooking_method: CookingMethod,
    pub dietary: Vec<Dietary>,
    pub allergies: Vec<String>,
    pub notes: Option<String>,
}

impl Default for MealPreferences {
    fn default() -> Self {
        Self {
            meal_type: "Dinner".to_string(),
            complexity: "Easy".to_string(),
            portion: "1 person".to_string(),
            cooking_method: CookingMethod::Any,
            dietary: Vec::new(),
            allergies: Vec::new(),
            notes: None,
        }
    }
}

impl MealPreferences {
    fn restrictions(&self) -> Vec<&'static str> {
        self.dietary.iter().filter_map(|d| d.restriction()).collect()
    }

    fn allergy_list(&self) -> Option<String> {
        if self.allergies.is_empty() {
            return None;
        }
        Some(
            self.allergies
                .iter()
                .map(|a| a.to_lowercase())
                .collect::<Vec<_>>()
                .join(", "),
        )
    }

    fn notes(&self) -> Option<&str> {
        self.notes.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }
}

/// Ingredients on hand, typed in or identified from a photo
#[derive(Debug, Clone, PartialEq)]
pub struct PantryRequest {
    pub ingredients: String,
    pub preferences: MealPreferences,
    pub cooking_time: CookingTime,
    /// Allow a few common pantry staples beyond the listed ingredients
    pub allow_additional: bool,
}

/// Extra requirements for an occasion recipe
#[derive(Debug, Clone, PartialEq)]
pub struct OccasionRequirements {
    pub make_ahead: bool,
    pub crowd_pleaser: bool,
    pub budget_friendly: bool,
    pub impressive: bool,
    pub traditional: bool,
    pub modern_twist: bool,
}

impl Default for OccasionRequirements {
    fn default() -> Self {
        Self {
            make_ahead: false,
            crowd_pleaser: true,
            budget_friendly: false,
            impressive: false,
            traditional: false,
            modern_twist: false,
        }
    }
}

impl OccasionRequirements {
    fn phrases(&self) -> Vec<&'static str> {
        [
            (self.make_ahead, "can be made ahead of time"),
            (self.crowd_pleaser, "crowd-pleaser that appeals to most tastes"),
            (self.budget_friendly, "budget-friendly"),
            (self.impressive, "visually impressive presentation"),
            (self.traditional, "traditional/classic recipe"),
            (self.modern_twist, "modern twist on a classic"),
        ]
        .into_iter()
        .filter_map(|(on, phrase)| on.then_some(phrase))
        .collect()
    }
}

/// Which tab a recipe came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeKind {
    Cuisine,
    Fridge,
    Photo,
    Occasion,
}

impl RecipeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecipeKind::Cuisine => "cuisine",
            RecipeKind::Fridge => "fridge",
            RecipeKind::Photo => "photo",
            RecipeKind::Occasion => "occasion",
        }
    }
}

/// A request for one generated recipe
#[derive(Debug, Clone, PartialEq)]
pub enum RecipeRequest {
    /// Pick by cuisine and preferences
    Cuisine {
        cuisine: String,
        preferences: MealPreferences,
    },
    /// Cook with what is in the fridge
    Fridge(PantryRequest),
    /// Cook with ingredients identified from a photo
    Photo(PantryRequest),
    /// Festive recipe for a holiday or event
    Occasion {
        occasion: String,
        serving_style: String,
        preferences: MealPreferences,
        requirements: OccasionRequirements,
    },
}

impl RecipeRequest {
    pub fn kind(&self) -> RecipeKind {
        match self {
            RecipeRequest::Cuisine { .. } => RecipeKind::Cuisine,
            RecipeRequest::Fridge(_) => RecipeKind::Fridge,
            RecipeRequest::Photo(_) => RecipeKind::Photo,
            RecipeRequest::Occasion { .. } => RecipeKind::Occasion,
        }
    }

    fn preferences(&self) -> &MealPreferences {
        match self {
            RecipeRequest::Cuisine { preferences, .. }
            | RecipeRequest::Occasion { preferences, .. } => preferences,
            RecipeRequest::Fridge(pantry) | RecipeRequest::Photo(pantry) => &pantry.preferences,
        }
    }

    /// Ingredients the cook already has, used for shopping lists.
    pub fn available_ingredients(&self) -> Option<&str> {
        match self {
            RecipeRequest::Fridge(pantry) | RecipeRequest::Photo(pantry) => {
                Some(pantry.ingredients.as_str())
            }
            _ => None,
        }
    }

    /// Reject requests that cannot produce a useful prompt.
    pub fn validate(&self) -> Result<(), RecipeError> {
        match self {
            RecipeRequest::Cuisine { cuisine, .. } if cuisine.trim().is_empty() => Err(
                RecipeError::InvalidInput("Please choose a cuisine".to_string()),
            ),
            RecipeRequest::Fridge(pantry) | RecipeRequest::Photo(pantry)
                if pantry.ingredients.trim().is_empty() =>
            {
                Err(RecipeError::InvalidInput(
                    "Please enter at least some ingredients".to_string(),
                ))
            }
            RecipeRequest::Occasion { occasion, .. } if occasion.trim().is_empty() => Err(
                RecipeError::InvalidInput("Please choose an occasion".to_string()),
            ),
            _ => Ok(()),
        }
    }

    /// The user prompt sent to the text generator.
    pub fn prompt(&self) -> String {
        match self {
            RecipeRequest::Cuisine {
                cuisine,
                preferences,
            } => cuisine_prompt(cuisine, preferences),
            RecipeRequest::Fridge(pantry) => pantry_prompt(pantry, &FRIDGE_WORDING),
            RecipeRequest::Photo(pantry) => pantry_prompt(pantry, &PHOTO_WORDING),
            RecipeRequest::Occasion {
                occasion,
                serving_style,
                preferences,
                requirements,
            } => occasion_prompt(occasion, serving_style, preferences, requirements),
        }
    }

    /// The system prompt sent with [`RecipeRequest::prompt`].
    pub fn system_message(&self) -> String {
        match self {
            RecipeRequest::Cuisine { .. } => CHEF_SYSTEM.to_string(),
            RecipeRequest::Fridge(_) => FRIDGE_WORDING.system.to_string(),
            RecipeRequest::Photo(_) => PHOTO_WORDING.system.to_string(),
            RecipeRequest::Occasion { occasion, .. } => format!(
                "You are a helpful chef assistant who specializes in creating festive recipes for holidays and special occasions. You understand the traditions and flavors associated with {occasion}."
            ),
        }
    }

    /// Metadata saved alongside a generated recipe.
    pub fn metadata(&self) -> RecipeMetadata {
        let preferences = self.preferences();
        let cooking_method = match (self, preferences.cooking_method) {
            (RecipeRequest::Occasion { .. }, _) | (_, CookingMethod::Any) => None,
            (_, method) => Some(method.label().to_string()),
        };

        RecipeMetadata {
            cuisine: match self {
                RecipeRequest::Cuisine { cuisine, .. } => Some(cuisine.clone()),
                _ => None,
            },
            meal_type: Some(preferences.meal_type.clone()),
            complexity: Some(preferences.complexity.clone()),
            occasion: match self {
                RecipeRequest::Occasion { occasion, .. } => Some(occasion.clone()),
                _ => None,
            },
            cooking_method,
            dietary_tags: preferences
                .dietary
                .iter()
                .map(|d| d.tag().to_string())
                .collect(),
        }
    }
}

struct PantryWording {
    opening: &'static str,
    primarily: &'static str,
    closing: &'static str,
    system: &'static str,
}

const FRIDGE_WORDING: PantryWording = PantryWording {
    opening: "I have these ingredients available:",
    primarily: "Please try to use primarily the ingredients I've listed.",
    closing: "Include a complete ingredient list (highlighting what I already have vs. what I might need to get) and step-by-step cooking instructions.",
    system: "You are a helpful chef assistant who specializes in creating recipes based on available ingredients. Always clearly indicate which ingredients the user already has vs. which they might need to purchase.",
};

const PHOTO_WORDING: PantryWording = PantryWording {
    opening: "Based on these ingredients I have from my photo:",
    primarily: "Please try to use primarily the ingredients I've identified from my photo.",
    closing: "Include a complete ingredient list (highlighting what I already have from the photo vs. what I might need to get) and step-by-step cooking instructions.",
    system: "You are a helpful chef assistant who specializes in creating recipes based on ingredients identified from photos. Always clearly indicate which ingredients the user already has vs. which they might need to purchase.",
};

const PANTRY_STAPLES: &str = "You can suggest recipes that use most of these ingredients and may require a few common pantry staples (like oil, salt, pepper, basic spices) that most people have.";

fn cuisine_prompt(cuisine: &str, prefs: &MealPreferences) -> String {
    let mut prompt = format!(
        "Suggest a {} {} {} recipe for {}",
        prefs.complexity.to_lowercase(),
        cuisine.to_lowercase(),
        prefs.meal_type.to_lowercase(),
        prefs.portion
    );

    if let Some(method) = prefs.cooking_method.phrase() {
        prompt.push_str(&format!(" using {method}"));
    }
    let restrictions = prefs.restrictions();
    if !restrictions.is_empty() {
        prompt.push_str(&format!(" that is {}", restrictions.join(", ")));
    }
    if let Some(allergies) = prefs.allergy_list() {
        prompt.push_str(&format!(". Avoid these allergens: {allergies}"));
    }
    if let Some(notes) = prefs.notes() {
        prompt.push_str(&format!(". Also, consider this: {notes}"));
    }
    prompt.push_str(". Include ingredients and step-by-step instructions.");
    prompt
}

fn pantry_prompt(pantry: &PantryRequest, wording: &PantryWording) -> String {
    let prefs = &pantry.preferences;
    let mut prompt = format!("{} {}. ", wording.opening, pantry.ingredients.trim());
    prompt.push_str(&format!(
        "Please suggest a {} {} recipe for {} that is {}",
        prefs.complexity.to_lowercase(),
        prefs.meal_type.to_lowercase(),
        prefs.portion,
        pantry.cooking_time.phrase()
    ));

    if let Some(method) = prefs.cooking_method.phrase() {
        prompt.push_str(&format!(" using {method}"));
    }
    let restrictions = prefs.restrictions();
    if !restrictions.is_empty() {
        prompt.push_str(&format!(" and {}", restrictions.join(", ")));
    }
    if let Some(allergies) = prefs.allergy_list() {
        prompt.push_str(&format!(". Avoid these allergens: {allergies}"));
    }
    prompt.push_str(". ");
    prompt.push_str(if pantry.allow_additional {
        PANTRY_STAPLES
    } else {
        wording.primarily
    });
    if let Some(notes) = prefs.notes() {
        prompt.push_str(&format!(" Also consider: {notes}"));
    }
    prompt.push(' ');
    prompt.push_str(wording.closing);
    prompt
}

fn occasion_prompt(
    occasion: &str,
    serving_style: &str,
    prefs: &MealPreferences,
    requirements: &OccasionRequirements,
) -> String {
    let mut prompt = format!(
        "Suggest a {} {} recipe perfect for {occasion} serving {} in a {} style. ",
        prefs.complexity.to_lowercase(),
        prefs.meal_type.to_lowercase(),
        prefs.portion,
        serving_style.to_lowercase()
    );

    let restrictions = prefs.restrictions();
    if !restrictions.is_empty() {
        prompt.push_str(&format!(
            "The recipe should be {}. ",
            restrictions.join(", ")
        ));
    }
    let special = requirements.phrases();
    if !special.is_empty() {
        prompt.push_str(&format!(
            "Important: The recipe should be {}. ",
            special.join(", ")
        ));
    }
    if let Some(notes) = prefs.notes() {
        prompt.push_str(&format!("Additional theme/request: {notes}. "));
    }

    prompt.push_str(&format!(
        "Make sure the recipe is festive and appropriate for {occasion}. "
    ));
    prompt.push_str("Include a brief introduction explaining why this recipe is perfect for the occasion, ");
    prompt.push_str("then provide the full ingredient list and step-by-step instructions. ");
    if requirements.make_ahead {
        prompt.push_str("Include make-ahead instructions and timeline. ");
    }
    if requirements.impressive {
        prompt.push_str("Include plating/presentation suggestions. ");
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thai_dinner() -> RecipeRequest {
        RecipeRequest::Cuisine {
            cuisine: "Thai".to_string(),
            preferences: MealPreferences {
                complexity: "Medium".to_string(),
                portion: "2 people".to_string(),
                cooking_method: CookingMethod::OnePot,
                dietary: vec![Dietary::Vegan, Dietary::GlutenFree, Dietary::NutFree],
                allergies: vec!["Shellfish".to_string(), "Soy".to_string()],
                notes: Some("extra spicy".to_string()),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_cuisine_prompt() {
        assert_eq!(
            thai_dinner().prompt(),
            "Suggest a medium thai dinner recipe for 2 people using one-pot or one-pan that is vegan, gluten-free. Avoid these allergens: shellfish, soy. Also, consider this: extra spicy. Include ingredients and step-by-step instructions."
        );
        assert_eq!(thai_dinner().system_message(), CHEF_SYSTEM);
    }

    #[test]
    fn test_minimal_cuisine_prompt() {
        let request = RecipeRequest::Cuisine {
            cuisine: "Italian".to_string(),
            preferences: MealPreferences::default(),
        };
        assert_eq!(
            request.prompt(),
            "Suggest a easy italian dinner recipe for 1 person. Include ingredients and step-by-step instructions."
        );
    }

    #[test]
    fn test_fridge_prompt() {
        let request = RecipeRequest::Fridge(PantryRequest {
            ingredients: "chicken, rice, onions".to_string(),
            preferences: MealPreferences {
                dietary: vec![Dietary::HighProtein],
                ..Default::default()
            },
            cooking_time: CookingTime::Quick,
            allow_additional: false,
        });
        let prompt = request.prompt();
        assert!(prompt.starts_with("I have these ingredients available: chicken, rice, onions. "));
        assert!(prompt.contains("that is quick and easy, taking less than 30 minutes and high-protein"));
        assert!(prompt.contains("Please try to use primarily the ingredients I've listed."));
        assert!(prompt.ends_with("step-by-step cooking instructions."));
        assert_eq!(request.available_ingredients(), Some("chicken, rice, onions"));
    }

    #[test]
    fn test_photo_prompt_allows_staples() {
        let request = RecipeRequest::Photo(PantryRequest {
            ingredients: "eggs, spinach".to_string(),
            preferences: MealPreferences::default(),
            cooking_time: CookingTime::Long,
            allow_additional: true,
        });
        let prompt = request.prompt();
        assert!(prompt.starts_with("Based on these ingredients I have from my photo: eggs, spinach."));
        assert!(prompt.contains("common pantry staples"));
        assert!(prompt.contains("from the photo vs. what I might need"));
        assert!(request.system_message().contains("identified from photos"));
    }

    #[test]
    fn test_occasion_prompt() {
        let request = RecipeRequest::Occasion {
            occasion: "Thanksgiving".to_string(),
            serving_style: "Family-style".to_string(),
            preferences: MealPreferences {
                meal_type: "Side Dish".to_string(),
                portion: "8-10 people".to_string(),
                ..Default::default()
            },
            requirements: OccasionRequirements {
                make_ahead: true,
                ..Default::default()
            },
        };
        let prompt = request.prompt();
        assert!(prompt.starts_with(
            "Suggest a easy side dish recipe perfect for Thanksgiving serving 8-10 people in a family-style style. "
        ));
        assert!(prompt.contains(
            "Important: The recipe should be can be made ahead of time, crowd-pleaser that appeals to most tastes. "
        ));
        assert!(prompt.contains("Include make-ahead instructions and timeline. "));
        assert!(!prompt.contains("plating"));
        assert!(request.system_message().ends_with("associated with Thanksgiving."));
    }

    #[test]
    fn test_validate_rejects_empty_pantry() {
        let request = RecipeRequest::Fridge(PantryRequest {
            ingredients: "  ".to_string(),
            preferences: MealPreferences::default(),
            cooking_time: CookingTime::Medium,
            allow_additional: true,
        });
        assert!(matches!(
            request.validate(),
            Err(RecipeError::InvalidInput(_))
        ));
        assert!(thai_dinner().validate().is_ok());
    }

    #[test]
    fn test_metadata() {
        let metadata = thai_dinner().metadata();
        assert_eq!(metadata.cuisine.as_deref(), Some("Thai"));
        assert_eq!(metadata.cooking_method.as_deref(), Some("One-pot/One-pan"));
        assert_eq!(
            metadata.dietary_tags,
            vec!["Vegan", "Gluten-free", "Nut-free"]
        );
        assert_eq!(metadata.occasion, None);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(thai_dinner().kind().as_str(), "cuisine");
        assert_eq!(RecipeKind::Occasion.as_str(), "occasion");
    }
}
