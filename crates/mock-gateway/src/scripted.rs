//! Scripted gateway - returns preset results.

use async_trait::async_trait;

use recipe_core::{GatewayError, Language, Recipe, RecipeGateway, UserFilters};

/// A gateway that returns preset results on every call.
///
/// Useful for driving the capture pipeline without any AI processing.
#[derive(Debug, Clone, Default)]
pub struct ScriptedGateway {
    ingredients: Vec<String>,
    recipes: Vec<Recipe>,
    image: Option<String>,
}

impl ScriptedGateway {
    /// Create a gateway that identifies the given ingredients and generates
    /// the given recipes.
    pub fn new(ingredients: Vec<String>, recipes: Vec<Recipe>) -> Self {
        Self {
            ingredients,
            recipes,
            image: None,
        }
    }

    /// Create a gateway that finds no ingredients.
    pub fn no_ingredients() -> Self {
        Self::default()
    }

    /// Create a gateway that identifies ingredients but matches no recipes.
    pub fn no_recipes(ingredients: Vec<String>) -> Self {
        Self::new(ingredients, Vec::new())
    }

    /// Set the image returned by `generate_image`.
    pub fn with_image(mut self, data_url: impl Into<String>) -> Self {
        self.image = Some(data_url.into());
        self
    }
}

#[async_trait]
impl RecipeGateway for ScriptedGateway {
    async fn identify_ingredients(
        &self,
        _image_base64: &str,
        _language: Language,
    ) -> Result<Vec<String>, GatewayError> {
        Ok(self.ingredients.clone())
    }

    async fn generate_recipes(
        &self,
        _ingredients: &[String],
        _filters: &UserFilters,
        _language: Language,
    ) -> Result<Vec<Recipe>, GatewayError> {
        Ok(self.recipes.clone())
    }

    async fn generate_image(&self, _prompt: &str) -> Result<Option<String>, GatewayError> {
        Ok(self.image.clone())
    }

    fn name(&self) -> &str {
        "ScriptedGateway"
    }
}

/// Build a minimal valid recipe for tests.
pub fn sample_recipe(id: &str, name: &str) -> Recipe {
    Recipe {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("A test recipe named {}", name),
        prep_time: "20 min".to_string(),
        difficulty: "Easy".to_string(),
        cuisine: "Nordic".to_string(),
        available_ingredients: vec!["egg".to_string()],
        missing_ingredients: vec!["flour".to_string()],
        instructions: vec!["Mix".to_string(), "Bake".to_string()],
        shopping_list: vec!["flour".to_string()],
        calories: 400.0,
        protein: 15.0,
        image_prompt: format!("A plated serving of {}", name),
    }
}
