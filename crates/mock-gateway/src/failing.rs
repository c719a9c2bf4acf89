//! Failing gateway - every call returns a transport error.

use async_trait::async_trait;

use recipe_core::{GatewayError, Language, Recipe, RecipeGateway, UserFilters};

/// A gateway whose every operation fails with a network error.
///
/// Useful for asserting that pipeline failures stay soft and localized.
#[derive(Debug, Clone, Default)]
pub struct FailingGateway;

impl FailingGateway {
    /// Create a new failing gateway.
    pub fn new() -> Self {
        Self
    }

    fn error(&self) -> GatewayError {
        GatewayError::Network("simulated transport failure".to_string())
    }
}

#[async_trait]
impl RecipeGateway for FailingGateway {
    async fn identify_ingredients(
        &self,
        _image_base64: &str,
        _language: Language,
    ) -> Result<Vec<String>, GatewayError> {
        Err(self.error())
    }

    async fn generate_recipes(
        &self,
        _ingredients: &[String],
        _filters: &UserFilters,
        _language: Language,
    ) -> Result<Vec<Recipe>, GatewayError> {
        Err(self.error())
    }

    async fn generate_image(&self, _prompt: &str) -> Result<Option<String>, GatewayError> {
        Err(self.error())
    }

    fn name(&self) -> &str {
        "FailingGateway"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_all_operations_fail() {
        let gateway = FailingGateway::new();

        assert!(gateway.identify_ingredients("img", Language::En).await.is_err());
        assert!(gateway
            .generate_recipes(&[], &UserFilters::default(), Language::En)
            .await
            .is_err());
        assert!(gateway.generate_image("prompt").await.is_err());
    }
}
