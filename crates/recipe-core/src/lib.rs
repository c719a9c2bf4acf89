//! Core trait and types for recipe gateway implementations.
//!
//! This crate provides the shared interface for the PantryPal application
//! core. It defines:
//!
//! - [`RecipeGateway`] - The trait that AI gateway implementations must implement
//! - [`Recipe`] / [`UserFilters`] / [`User`] - The application data model
//! - [`GatewayError`] - Error types for gateway operations
//! - [`KeyValueStore`] - Trait for string-keyed persistence backends
//! - [`sanitize`] - Pure cleanup functions for loosely formatted AI output
//!
//! # Example
//!
//! ```rust
//! use recipe_core::{
//!     async_trait, GatewayError, Language, Recipe, RecipeGateway, UserFilters,
//! };
//!
//! struct MyGateway;
//!
//! #[async_trait]
//! impl RecipeGateway for MyGateway {
//!     async fn identify_ingredients(
//!         &self,
//!         _image_base64: &str,
//!         _language: Language,
//!     ) -> Result<Vec<String>, GatewayError> {
//!         Ok(vec!["apple".to_string()])
//!     }
//!
//!     async fn generate_recipes(
//!         &self,
//!         _ingredients: &[String],
//!         _filters: &UserFilters,
//!         _language: Language,
//!     ) -> Result<Vec<Recipe>, GatewayError> {
//!         Ok(Vec::new())
//!     }
//!
//!     async fn generate_image(&self, _prompt: &str) -> Result<Option<String>, GatewayError> {
//!         Ok(None)
//!     }
//!
//!     fn name(&self) -> &str {
//!         "MyGateway"
//!     }
//! }
//! ```

mod error;
mod gateway;
mod store;
mod types;

pub mod sanitize;

pub use error::GatewayError;
pub use gateway::RecipeGateway;
pub use store::{KeyValueStore, MemoryStore, StoreError};
pub use types::{
    Account, HistoryEntry, Language, Recipe, ShoppingItem, User, UserFilters, ALLERGY_OPTIONS,
    CUISINES, DIET_OPTIONS, HISTORY_CAP,
};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
