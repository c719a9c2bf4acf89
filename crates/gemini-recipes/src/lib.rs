//! Gemini-based implementation of the PantryPal recipe gateway.
//!
//! This crate talks to the Gemini `generateContent` REST API for the three
//! gateway operations: ingredient identification from a photo, recipe
//! generation, and illustrative dish images. Responses are cleaned with the
//! sanitizers from `recipe-core` before use.
//!
//! # Example
//!
//! ```rust,no_run
//! use gemini_recipes::{GeminiConfig, GeminiGateway};
//! use recipe_core::{Language, RecipeGateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), recipe_core::GatewayError> {
//!     let config = GeminiConfig::from_env()?;
//!     let gateway = GeminiGateway::new(config)?;
//!
//!     let ingredients = gateway
//!         .identify_ingredients("<base64 jpeg>", Language::En)
//!         .await?;
//!     println!("Detected: {:?}", ingredients);
//!     Ok(())
//! }
//! ```

mod api_types;
mod config;
mod gateway;
mod prompts;

pub use config::{GeminiConfig, GeminiConfigBuilder};
pub use gateway::GeminiGateway;

// Re-export core types for convenience
pub use recipe_core::{GatewayError, Language, Recipe, RecipeGateway, UserFilters};
