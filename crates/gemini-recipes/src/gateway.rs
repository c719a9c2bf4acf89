//! GeminiGateway implementation using the Gemini REST API.

use async_trait::async_trait;
use recipe_core::{sanitize, GatewayError, Language, Recipe, RecipeGateway, UserFilters};
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::api_types::{
    ApiError, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    ImageConfig, Part,
};
use crate::config::GeminiConfig;
use crate::prompts;

/// A gateway implementation backed by the Gemini `generateContent` API.
///
/// Ingredient identification and recipe generation go through the text
/// model; dish images go through the image model. All responses pass
/// through the `recipe-core` sanitizers, so prose wrapping, code fences and
/// stray control bytes in model output degrade to empty results rather
/// than errors.
pub struct GeminiGateway {
    client: Client,
    config: GeminiConfig,
}

impl GeminiGateway {
    /// Create a new GeminiGateway with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self, GatewayError> {
        let client = Client::builder().build().map_err(|e| {
            GatewayError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        info!(
            "GeminiGateway initialized with text model: {}, image model: {}",
            config.text_model, config.image_model
        );

        Ok(Self { client, config })
    }

    /// Create a GeminiGateway from environment variables.
    ///
    /// See [`GeminiConfig::from_env`] for required environment variables.
    pub fn from_env() -> Result<Self, GatewayError> {
        let config = GeminiConfig::from_env()?;
        Self::new(config)
    }

    /// Get the configuration.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Make a `generateContent` request against the given model.
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GatewayError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_url, model
        );

        debug!("Sending request to Gemini model {}", model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| GatewayError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            // Try to parse as API error
            if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_text) {
                return Err(GatewayError::Provider {
                    status: status.as_u16(),
                    message: api_error.error.message,
                });
            }

            return Err(GatewayError::Provider {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let completion: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Decode(format!("Failed to parse response: {}", e)))?;

        if let Some(usage) = &completion.usage_metadata {
            debug!(
                "Token usage - prompt: {}, candidates: {}, total: {}",
                usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
            );
        }

        Ok(completion)
    }
}

#[async_trait]
impl RecipeGateway for GeminiGateway {
    async fn identify_ingredients(
        &self,
        image_base64: &str,
        language: Language,
    ) -> Result<Vec<String>, GatewayError> {
        let request = GenerateContentRequest {
            system_instruction: Some(Content::text(prompts::identify_system_instruction(
                language,
            ))),
            contents: vec![Content {
                parts: vec![
                    Part::inline_data("image/jpeg", image_base64),
                    Part::text(prompts::IDENTIFY_PROMPT),
                ],
            }],
            generation_config: None,
        };

        let response = self
            .generate_content(&self.config.text_model, &request)
            .await?;

        let text = response.text().unwrap_or_default();
        let ingredients = sanitize::clean_ingredient_list(&text);

        info!("Identified {} ingredients", ingredients.len());
        Ok(ingredients)
    }

    async fn generate_recipes(
        &self,
        ingredients: &[String],
        filters: &UserFilters,
        language: Language,
    ) -> Result<Vec<Recipe>, GatewayError> {
        let request = GenerateContentRequest {
            system_instruction: Some(Content::text(prompts::recipes_system_instruction(
                language,
                self.config.recipe_count,
            ))),
            contents: vec![Content::text(prompts::recipes_prompt(
                ingredients,
                filters,
                language,
                self.config.recipe_count,
            ))],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                image_config: None,
            }),
        };

        let response = self
            .generate_content(&self.config.text_model, &request)
            .await?;

        let text = response.text().unwrap_or_else(|| "[]".to_string());
        let recipes = sanitize::parse_recipes(&text);

        if recipes.is_empty() {
            warn!("Recipe generation yielded no parseable recipes");
        } else {
            info!("Generated {} recipes", recipes.len());
        }

        Ok(recipes)
    }

    async fn generate_image(&self, prompt: &str) -> Result<Option<String>, GatewayError> {
        let request = GenerateContentRequest {
            system_instruction: None,
            contents: vec![Content::text(prompt)],
            generation_config: Some(GenerationConfig {
                response_mime_type: None,
                image_config: Some(ImageConfig {
                    aspect_ratio: "16:9".to_string(),
                }),
            }),
        };

        let response = self
            .generate_content(&self.config.image_model, &request)
            .await?;

        match response.inline_data() {
            Some(data) => {
                debug!("Received inline image ({} base64 chars)", data.data.len());
                Ok(Some(format!("data:image/png;base64,{}", data.data)))
            }
            None => {
                warn!("Image generation returned no inline data");
                Ok(None)
            }
        }
    }

    fn name(&self) -> &str {
        "GeminiGateway"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_name() {
        let config = GeminiConfig::builder().api_key("test-key").build();
        let gateway = GeminiGateway::new(config).unwrap();
        assert_eq!(gateway.name(), "GeminiGateway");
    }

    #[test]
    fn test_config_accessor() {
        let config = GeminiConfig::builder()
            .api_key("test-key")
            .text_model("gemini-test")
            .build();
        let gateway = GeminiGateway::new(config).unwrap();
        assert_eq!(gateway.config().text_model, "gemini-test");
    }
}
