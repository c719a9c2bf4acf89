//! Recording gateway - wraps another gateway and counts calls.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use recipe_core::{GatewayError, Language, Recipe, RecipeGateway, UserFilters};

/// A gateway wrapper that counts how often each operation is invoked.
///
/// The usage gate contract requires that a denied capture never reaches the
/// AI provider; these counters make that assertable.
#[derive(Debug, Default)]
pub struct RecordingGateway<G> {
    inner: G,
    identify_calls: AtomicUsize,
    recipe_calls: AtomicUsize,
    image_calls: AtomicUsize,
}

impl<G> RecordingGateway<G> {
    /// Wrap a gateway.
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            identify_calls: AtomicUsize::new(0),
            recipe_calls: AtomicUsize::new(0),
            image_calls: AtomicUsize::new(0),
        }
    }

    /// Number of `identify_ingredients` calls so far.
    pub fn identify_calls(&self) -> usize {
        self.identify_calls.load(Ordering::SeqCst)
    }

    /// Number of `generate_recipes` calls so far.
    pub fn recipe_calls(&self) -> usize {
        self.recipe_calls.load(Ordering::SeqCst)
    }

    /// Number of `generate_image` calls so far.
    pub fn image_calls(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }

    /// Total calls across all operations.
    pub fn total_calls(&self) -> usize {
        self.identify_calls() + self.recipe_calls() + self.image_calls()
    }
}

#[async_trait]
impl<G: RecipeGateway> RecipeGateway for RecordingGateway<G> {
    async fn identify_ingredients(
        &self,
        image_base64: &str,
        language: Language,
    ) -> Result<Vec<String>, GatewayError> {
        self.identify_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.identify_ingredients(image_base64, language).await
    }

    async fn generate_recipes(
        &self,
        ingredients: &[String],
        filters: &UserFilters,
        language: Language,
    ) -> Result<Vec<Recipe>, GatewayError> {
        self.recipe_calls.fetch_add(1, Ordering::SeqCst);
        self.inner
            .generate_recipes(ingredients, filters, language)
            .await
    }

    async fn generate_image(&self, prompt: &str) -> Result<Option<String>, GatewayError> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.generate_image(prompt).await
    }

    fn name(&self) -> &str {
        "RecordingGateway"
    }
}
