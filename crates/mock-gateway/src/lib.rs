//! Mock gateway implementations for testing PantryPal flows.
//!
//! This crate provides mock implementations of the `RecipeGateway` trait:
//! - `ScriptedGateway` - Returns preset ingredients, recipes and images
//! - `FailingGateway` - Fails every call with a transport error
//! - `RecordingGateway` - Wraps another gateway and counts calls
//!
//! Plus `QuotaStore`, a `KeyValueStore` that rejects oversized writes, for
//! exercising the degrade-gracefully persistence path.
//!
//! For production AI processing, use the `gemini-recipes` crate instead.
//!
//! # Example
//!
//! ```rust
//! use mock_gateway::{sample_recipe, ScriptedGateway};
//! use recipe_core::{Language, RecipeGateway, UserFilters};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), recipe_core::GatewayError> {
//!     let gateway = ScriptedGateway::new(
//!         vec!["apple".to_string()],
//!         vec![sample_recipe("r1", "Apple pie")],
//!     );
//!
//!     let found = gateway.identify_ingredients("img", Language::En).await?;
//!     assert_eq!(found, vec!["apple"]);
//!     Ok(())
//! }
//! ```

mod failing;
mod quota_store;
mod recording;
mod scripted;

// Re-export recipe-core types for convenience
pub use recipe_core::{
    async_trait, GatewayError, KeyValueStore, Language, MemoryStore, Recipe, RecipeGateway,
    StoreError, UserFilters,
};

// Export mock implementations
pub use failing::FailingGateway;
pub use quota_store::QuotaStore;
pub use recording::RecordingGateway;
pub use scripted::{sample_recipe, ScriptedGateway};
