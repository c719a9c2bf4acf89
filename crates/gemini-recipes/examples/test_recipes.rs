//! Simple test for Gemini recipe generation.
//!
//! Run with: cargo run -p gemini-recipes --example test_recipes
//! Or with custom ingredients: cargo run -p gemini-recipes --example test_recipes -- egg milk flour
//!
//! Make sure to set environment variables in .env:
//!   GEMINI_API_KEY - Google AI Studio API key for authentication

use gemini_recipes::GeminiGateway;
use recipe_core::{Language, RecipeGateway, UserFilters};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Get ingredients from command line args or use defaults
    let args: Vec<String> = env::args().skip(1).collect();
    let ingredients = if args.is_empty() {
        vec![
            "egg".to_string(),
            "milk".to_string(),
            "flour".to_string(),
        ]
    } else {
        args
    };

    println!("Initializing GeminiGateway...");
    let gateway = GeminiGateway::from_env()?;

    println!("Gateway initialized: {}", gateway.name());
    println!("API URL: {}", gateway.config().api_url);
    println!("Text model: {}", gateway.config().text_model);
    println!("Image model: {}", gateway.config().image_model);
    println!();

    println!("Generating recipes for: {}", ingredients.join(", "));
    let recipes = gateway
        .generate_recipes(&ingredients, &UserFilters::default(), Language::En)
        .await?;

    if recipes.is_empty() {
        println!("No recipes matched. Try different ingredients or filters.");
        return Ok(());
    }

    for recipe in &recipes {
        println!("=== {} ===", recipe.name);
        println!("{}", recipe.description);
        println!("Prep: {} | Difficulty: {} | Cuisine: {}", recipe.prep_time, recipe.difficulty, recipe.cuisine);
        println!("Calories: {:.0} kcal | Protein: {:.0} g", recipe.calories, recipe.protein);
        println!("Have: {}", recipe.available_ingredients.join(", "));
        println!("Missing: {}", recipe.missing_ingredients.join(", "));
        for (i, step) in recipe.instructions.iter().enumerate() {
            println!("  {}. {}", i + 1, step);
        }
        println!();
    }

    Ok(())
}
