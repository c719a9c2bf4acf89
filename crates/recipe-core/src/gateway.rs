//! The gateway trait that all AI backend implementations must implement.

use async_trait::async_trait;

use crate::error::GatewayError;
use crate::types::{Language, Recipe, UserFilters};

/// The interface between the application core and a multimodal AI provider.
///
/// Three independent operations: identify ingredients from a photo, generate
/// recipes from an ingredient list, and generate an illustrative dish image.
/// Implementations own their transport and response cleanup; callers treat
/// empty results and errors as soft, user-correctable outcomes.
#[async_trait]
pub trait RecipeGateway: Send + Sync {
    /// Identify ingredients visible in a base64-encoded JPEG photo.
    ///
    /// Returns an empty list when no food is recognized.
    async fn identify_ingredients(
        &self,
        image_base64: &str,
        language: Language,
    ) -> Result<Vec<String>, GatewayError>;

    /// Generate recipes from detected ingredients and the active filters.
    ///
    /// Returns an empty list when no recipe matches.
    async fn generate_recipes(
        &self,
        ingredients: &[String],
        filters: &UserFilters,
        language: Language,
    ) -> Result<Vec<Recipe>, GatewayError>;

    /// Generate an illustrative image for a recipe from its text prompt.
    ///
    /// Returns a `data:` URL, or `None` when the provider produced no image;
    /// callers fall back to a local placeholder.
    async fn generate_image(&self, prompt: &str) -> Result<Option<String>, GatewayError>;

    /// Get the name of this gateway implementation (for logging).
    fn name(&self) -> &str;
}

#[async_trait]
impl<G: RecipeGateway + ?Sized> RecipeGateway for std::sync::Arc<G> {
    async fn identify_ingredients(
        &self,
        image_base64: &str,
        language: Language,
    ) -> Result<Vec<String>, GatewayError> {
        (**self).identify_ingredients(image_base64, language).await
    }

    async fn generate_recipes(
        &self,
        ingredients: &[String],
        filters: &UserFilters,
        language: Language,
    ) -> Result<Vec<Recipe>, GatewayError> {
        (**self)
            .generate_recipes(ingredients, filters, language)
            .await
    }

    async fn generate_image(&self, prompt: &str) -> Result<Option<String>, GatewayError> {
        (**self).generate_image(prompt).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
