//! dinner-recipe-maker - recipe suggestions from the command line

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::{debug, info};

use dinner_recipe_maker::prompts::{MealPreferences, PantryRequest};
use dinner_recipe_maker::providers::FallbackProvider;
use dinner_recipe_maker::{
    clean_display_name, current_occasion, extract_title, load_config, occasion_for, render_html,
    RecipeAssistant, RecipeError, RecipeRequest, DEFAULT_DISPLAY_NAME_LEN,
};

#[derive(Parser)]
#[command(name = "dinner-recipe-maker")]
#[command(version, about = "Recipe suggestions, shopping lists and printable recipe cards", long_about = None)]
#[command(after_help = "EXAMPLES:
    dinner-recipe-maker generate --cuisine Thai --card card.html
    dinner-recipe-maker generate --ingredients \"eggs, spinach, feta\"
    dinner-recipe-maker card recipe.md -o card.html
    dinner-recipe-maker title recipe.md")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the title of a markdown recipe
    Title {
        /// Recipe file; reads stdin when omitted
        input: Option<PathBuf>,
    },
    /// Render a markdown recipe card as a printable HTML page
    Card {
        /// Recipe card file; reads stdin when omitted
        input: Option<PathBuf>,
        /// Write the HTML here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Shorten a recipe name for display in a list
    DisplayName {
        name: String,
        #[arg(long, default_value_t = DEFAULT_DISPLAY_NAME_LEN)]
        max_len: usize,
    },
    /// Show the holiday or season used for occasion recipes
    Occasion {
        /// Date as YYYY-MM-DD; today when omitted
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Generate a recipe with the configured providers
    Generate {
        /// Cuisine to cook
        #[arg(long, conflicts_with = "ingredients", required_unless_present = "ingredients")]
        cuisine: Option<String>,
        /// Comma-separated ingredients on hand
        #[arg(long)]
        ingredients: Option<String>,
        #[arg(long, default_value = "Dinner")]
        meal_type: String,
        #[arg(long, default_value = "Easy")]
        complexity: String,
        /// Portion size, e.g. "4 people"
        #[arg(long, default_value = "1 person")]
        servings: String,
        /// Also print a shopping list
        #[arg(long)]
        shopping_list: bool,
        /// Write a printable recipe card to this HTML file
        #[arg(long)]
        card: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn read_input(path: Option<&Path>) -> Result<String, RecipeError> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

async fn run(command: Command) -> Result<(), RecipeError> {
    match command {
        Command::Title { input } => {
            println!("{}", extract_title(&read_input(input.as_deref())?));
        }
        Command::Card { input, output } => {
            let html = render_html(&read_input(input.as_deref())?);
            match output {
                Some(path) => {
                    tokio::fs::write(&path, html).await?;
                    info!("Wrote {}", path.display());
                }
                None => println!("{html}"),
            }
        }
        Command::DisplayName { name, max_len } => {
            println!("{}", clean_display_name(&name, max_len));
        }
        Command::Occasion { date } => {
            let occasion = date.map(occasion_for).unwrap_or_else(current_occasion);
            println!("{}: {}", occasion.name, occasion.description);
        }
        Command::Generate {
            cuisine,
            ingredients,
            meal_type,
            complexity,
            servings,
            shopping_list,
            card,
        } => {
            let preferences = MealPreferences {
                meal_type,
                complexity,
                portion: servings,
                ..Default::default()
            };
            let request = match (cuisine, ingredients) {
                (Some(cuisine), _) => RecipeRequest::Cuisine {
                    cuisine,
                    preferences,
                },
                (None, Some(ingredients)) => RecipeRequest::Fridge(PantryRequest {
                    ingredients,
                    preferences,
                    cooking_time: Default::default(),
                    allow_additional: true,
                }),
                (None, None) => {
                    return Err(RecipeError::InvalidInput(
                        "Pass --cuisine or --ingredients".to_string(),
                    ))
                }
            };

            let config = load_config()?;
            debug!("Using default provider {}", config.default_provider);
            let assistant = RecipeAssistant::builder()
                .generator(Arc::new(FallbackProvider::new(&config)?))
                .build()?;

            let recipe = assistant.generate_recipe(&request).await?;
            println!("{recipe}");

            if shopping_list {
                let list = assistant
                    .shopping_list(&recipe, request.available_ingredients())
                    .await?;
                println!("\n{list}");
            }

            if let Some(path) = card {
                let html = assistant.printable_card(&recipe).await?;
                tokio::fs::write(&path, html).await?;
                info!("Wrote card for '{}' to {}", extract_title(&recipe), path.display());
            }
        }
    }
    Ok(())
}
