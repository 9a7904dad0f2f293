/// System prompt for single-recipe shopping lists.
pub const SHOPPING_LIST_SYSTEM: &str =
    "You are a helpful shopping assistant who creates organized grocery lists from recipes.";

/// System prompt for printable recipe cards.
pub const RECIPE_CARD_SYSTEM: &str = "You are a helpful assistant who creates beautifully formatted, print-friendly recipe cards. Always use sequential numbering (1. 2. 3. 4.) for instructions, never repeat '1.' for each step.";

/// System prompt for the combined weekly shopping list.
pub const WEEKLY_SHOPPING_LIST_SYSTEM: &str = "You are a helpful shopping assistant who creates organized, deduplicated grocery lists from multiple recipes for weekly meal planning.";

/// Instruction sent alongside a photo to list the visible ingredients.
pub const INGREDIENT_IDENTIFICATION_PROMPT: &str = "Please identify all the food ingredients, items, and products you can see in this image. List them as a comma-separated list. Focus on ingredients that could be used for cooking. Include fresh produce, packaged goods, dairy products, meats, spices, condiments, etc. Be specific about types (e.g., 'red bell peppers' instead of just 'peppers'). Only list food items that are clearly visible and identifiable.";

/// Card layout instructions, loaded from `recipe_card.txt` at compile time.
const RECIPE_CARD_INSTRUCTIONS: &str = include_str!("recipe_card.txt");

/// Deduplication instructions, loaded from `weekly_shopping_list.txt` at compile time.
const WEEKLY_SHOPPING_LIST_INSTRUCTIONS: &str = include_str!("weekly_shopping_list.txt");

/// Build the shopping list prompt, optionally separating what the cook already has.
pub fn shopping_list_prompt(recipe: &str, available_ingredients: Option<&str>) -> String {
    let available = available_ingredients
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let mut prompt = format!("Based on this recipe: {recipe}\n\n");
    if let Some(have) = available {
        prompt.push_str(&format!("And these ingredients I already have: {have}\n\n"));
    }

    prompt.push_str("Please create a smart shopping list by:\n");
    prompt.push_str("1. Extracting all ingredients from the recipe with quantities\n");
    prompt.push_str(match available {
        Some(_) => "2. Separating what I already have vs. what I need to buy\n",
        None => "2. Listing all ingredients I need to buy\n",
    });
    prompt.push_str(
        "3. Organizing by grocery store sections (Produce, Meat/Seafood, Dairy, Pantry, etc.)\n",
    );
    prompt.push_str("4. Including estimated quantities where specified in the recipe\n\n");

    prompt.push_str("Format as:\n**SHOPPING LIST**\n\n");
    for section in ["Produce", "Meat/Seafood", "Dairy", "Pantry/Dry Goods", "Other"] {
        prompt.push_str(&format!("**{section}:**\n- item (quantity)\n\n"));
    }
    if available.is_some() {
        prompt.push_str("**✅ Items you already have:**\n");
        prompt.push_str("- (list items from available ingredients that are used in recipe)\n\n");
    }

    prompt.push_str("Only include items that need to be purchased. Be specific about quantities when mentioned in the recipe.");
    prompt
}

/// Build the prompt that turns a recipe into card Markdown.
pub fn recipe_card_prompt(recipe: &str) -> String {
    format!("Based on this recipe: {recipe}\n\n{RECIPE_CARD_INSTRUCTIONS}")
}

/// Build the prompt for one shopping list covering a week of planned meals.
pub fn weekly_shopping_list_prompt(combined_recipes: &str) -> String {
    format!(
        "I have the following recipes planned for the week:\n\n{combined_recipes}\n\n{WEEKLY_SHOPPING_LIST_INSTRUCTIONS}"
    )
}
