//! Configuration for GeminiGateway.

use recipe_core::GatewayError;
use std::env;

/// Configuration for GeminiGateway.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Gemini API base URL.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Model used for ingredient identification and recipe generation.
    pub text_model: String,

    /// Model used for dish image generation.
    pub image_model: String,

    /// Number of recipes requested per generation.
    pub recipe_count: u8,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key: String::new(),
            text_model: "gemini-3-flash-preview".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
            recipe_count: 3,
        }
    }
}

impl GeminiConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `GEMINI_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `GEMINI_API_URL` - API base URL (default: https://generativelanguage.googleapis.com)
    /// - `GEMINI_TEXT_MODEL` - Text model name (default: gemini-3-flash-preview)
    /// - `GEMINI_IMAGE_MODEL` - Image model name (default: gemini-2.5-flash-image)
    /// - `GEMINI_RECIPE_COUNT` - Recipes per generation (default: 3)
    pub fn from_env() -> Result<Self, GatewayError> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| GatewayError::Configuration("GEMINI_API_KEY not set".to_string()))?;

        let api_url = env::var("GEMINI_API_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string());

        let text_model = env::var("GEMINI_TEXT_MODEL")
            .unwrap_or_else(|_| "gemini-3-flash-preview".to_string());

        let image_model = env::var("GEMINI_IMAGE_MODEL")
            .unwrap_or_else(|_| "gemini-2.5-flash-image".to_string());

        let recipe_count = env::var("GEMINI_RECIPE_COUNT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3);

        Ok(Self {
            api_url,
            api_key,
            text_model,
            image_model,
            recipe_count,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> GeminiConfigBuilder {
        GeminiConfigBuilder::default()
    }
}

/// Builder for GeminiConfig.
#[derive(Debug, Default)]
pub struct GeminiConfigBuilder {
    config: GeminiConfig,
}

impl GeminiConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API base URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the text model name.
    pub fn text_model(mut self, model: impl Into<String>) -> Self {
        self.config.text_model = model.into();
        self
    }

    /// Set the image model name.
    pub fn image_model(mut self, model: impl Into<String>) -> Self {
        self.config.image_model = model.into();
        self
    }

    /// Set the number of recipes per generation.
    pub fn recipe_count(mut self, count: u8) -> Self {
        self.config.recipe_count = count;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> GeminiConfig {
        self.config
    }
}
