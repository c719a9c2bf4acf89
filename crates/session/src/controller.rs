//! The session controller: holds all application state and funnels every
//! mutation through named transition functions.

use chrono::Local;
use recipe_core::{
    HistoryEntry, KeyValueStore, Language, Recipe, RecipeGateway, ShoppingItem, StoreError, User,
    UserFilters, HISTORY_CAP,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::accounts;
use crate::error::AuthError;
use crate::gate::{check_capture_gate, BONUS_GRANT, DEFAULT_FREE_LIMIT};
use crate::keys;
use crate::notice::Notice;
use crate::payment::PaymentReturn;
use crate::view::View;

/// Outcome of one capture attempt.
///
/// The three non-fatal outcomes are deliberately distinct: "no ingredients"
/// and "no recipes" are user-correctable (retake the photo, loosen the
/// filters) while "failed" is a technical fault. Only `Success` charges the
/// usage counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// No authenticated user; routed to login.
    SignedOut,
    /// Free limit reached; routed to the paywall before any gateway call.
    Gated,
    /// The photo contained no recognizable food.
    NoIngredients,
    /// Ingredients were found but no recipe matched the filters.
    NoRecipes,
    /// A gateway call failed.
    Failed,
    /// Recipes were generated; the usage counter was incremented.
    Success { recipe_count: usize },
}

impl CaptureOutcome {
    /// The notice to surface for this outcome, if any.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Self::NoIngredients => Some(Notice::NoIngredients),
            Self::NoRecipes => Some(Notice::NoRecipes),
            Self::Failed => Some(Notice::CaptureFailed),
            Self::SignedOut | Self::Gated | Self::Success { .. } => None,
        }
    }
}

/// The application session: current view, authenticated user, usage
/// metering and the per-user working set.
///
/// All state lives here and is mutated only through the methods below, so
/// the single-writer invariant holds without any framework support. The
/// gateway and store are trait objects by type parameter; production wires
/// `GeminiGateway` and `SqliteStore`, tests wire the mocks.
pub struct Session<G, S> {
    gateway: G,
    store: S,
    view: View,
    language: Language,
    user: Option<User>,
    usage_count: u32,
    free_limit: u32,
    granted_claims: Vec<String>,
    detected_ingredients: Vec<String>,
    recipes: Vec<Recipe>,
    favorites: Vec<Recipe>,
    history: Vec<HistoryEntry>,
    shopping: Vec<ShoppingItem>,
    filters: UserFilters,
    processing: bool,
}

impl<G: RecipeGateway, S: KeyValueStore> Session<G, S> {
    /// Create a session with defaults; call [`Session::init`] to resolve the
    /// cold-start view.
    pub fn new(gateway: G, store: S) -> Self {
        Self {
            gateway,
            store,
            view: View::Onboarding,
            language: Language::default(),
            user: None,
            usage_count: 0,
            free_limit: DEFAULT_FREE_LIMIT,
            granted_claims: Vec::new(),
            detected_ingredients: Vec::new(),
            recipes: Vec::new(),
            favorites: Vec::new(),
            history: Vec::new(),
            shopping: Vec::new(),
            filters: UserFilters::default(),
            processing: false,
        }
    }

    // --- accessors ---

    pub fn view(&self) -> View {
        self.view
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn usage_count(&self) -> u32 {
        self.usage_count
    }

    pub fn free_limit(&self) -> u32 {
        self.free_limit
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn detected_ingredients(&self) -> &[String] {
        &self.detected_ingredients
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn favorites(&self) -> &[Recipe] {
        &self.favorites
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn shopping_items(&self) -> &[ShoppingItem] {
        &self.shopping
    }

    pub fn filters(&self) -> &UserFilters {
        &self.filters
    }

    // --- lifecycle ---

    /// Resolve the cold-start view and restore any active session.
    ///
    /// A stored user routes to `Home` with their working set loaded. A
    /// corrupt active-user record is cleared and treated as "no session".
    /// Otherwise the onboarding-seen marker decides between `Login` and
    /// `Onboarding`. A successful payment return with an active user
    /// confirms the subscription; the caller consumes the return params.
    pub async fn init(&mut self, payment_return: Option<PaymentReturn>) {
        if let Some(code) = self.read_raw(keys::LANG).await {
            self.language = Language::from_code(&code);
        }

        match self.read_raw(keys::ACTIVE_USER).await {
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => {
                    info!("Restoring session for {}", user.email);
                    self.load_user_data(&user.id).await;
                    self.user = Some(user);
                    self.view = View::Home;
                }
                Err(err) => {
                    warn!("Failed to parse saved user, clearing session: {}", err);
                    if let Err(err) = self.store.remove(keys::ACTIVE_USER).await {
                        warn!("Failed to clear corrupt session key: {}", err);
                    }
                    self.view = self.entry_view().await;
                }
            },
            None => {
                self.view = self.entry_view().await;
            }
        }

        if payment_return == Some(PaymentReturn::Success) && self.user.is_some() {
            self.subscription_confirmed().await;
        }
    }

    async fn entry_view(&self) -> View {
        if self.read_raw(keys::ONBOARDING_SEEN).await.is_some() {
            View::Login
        } else {
            View::Onboarding
        }
    }

    /// Mark onboarding as seen (future cold starts skip it) and move to login.
    pub async fn complete_onboarding(&mut self) {
        self.write_string(keys::ONBOARDING_SEEN, "true").await;
        self.view = View::Login;
    }

    /// Register a new account and start its session.
    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        credential: &str,
        accepted_terms: bool,
        accepted_privacy: bool,
    ) -> Result<(), AuthError> {
        let user = accounts::register(
            &self.store,
            name,
            email,
            credential,
            accepted_terms,
            accepted_privacy,
        )
        .await?;
        self.start_session(user).await;
        Ok(())
    }

    /// Match credentials against the stored accounts and start the session.
    pub async fn login(&mut self, email: &str, credential: &str) -> Result<(), AuthError> {
        let user = accounts::login(&self.store, email, credential).await?;
        self.start_session(user).await;
        Ok(())
    }

    async fn start_session(&mut self, user: User) {
        info!("Starting session for {}", user.email);
        self.load_user_data(&user.id).await;
        self.write_json(keys::ACTIVE_USER, &user).await;
        self.user = Some(user);
        self.view = View::Home;
    }

    /// Clear the in-memory working set and return to login.
    ///
    /// The persisted account record and its stored data are untouched and
    /// restore on the next login by the same account.
    pub async fn logout(&mut self) {
        if let Err(err) = self.store.remove(keys::ACTIVE_USER).await {
            warn!("Failed to clear session key on logout: {}", err);
        }
        self.user = None;
        self.usage_count = 0;
        self.free_limit = DEFAULT_FREE_LIMIT;
        self.granted_claims.clear();
        self.detected_ingredients.clear();
        self.recipes.clear();
        self.favorites.clear();
        self.history.clear();
        self.shopping.clear();
        self.filters = UserFilters::default();
        self.view = View::Login;
    }

    /// Pure view switch via the persistent navigation.
    pub fn navigate(&mut self, view: View) {
        self.view = view;
    }

    /// Switch the display language and persist the preference.
    pub async fn set_language(&mut self, language: Language) {
        self.language = language;
        self.write_string(keys::LANG, language.code()).await;
    }

    /// Replace the dietary filters; persisted per user.
    pub async fn set_filters(&mut self, filters: UserFilters) {
        self.filters = filters;
        if let Some(user) = self.user.clone() {
            self.write_json(&keys::filters(&user.id), &self.filters).await;
        }
    }

    // --- capture pipeline ---

    /// Run the capture pipeline for one photo.
    ///
    /// The gate decision comes first, before any gateway call. The
    /// processing flag is cleared on every exit path, so the caller can
    /// never be left stuck on the scanning view.
    pub async fn capture_photo(&mut self, image_base64: &str) -> CaptureOutcome {
        let Some(user) = self.user.clone() else {
            self.view = View::Login;
            return CaptureOutcome::SignedOut;
        };

        if check_capture_gate(&user, self.usage_count, self.free_limit).is_denied() {
            debug!(
                "Capture gated for {} at {}/{}",
                user.email, self.usage_count, self.free_limit
            );
            self.view = View::Paywall;
            return CaptureOutcome::Gated;
        }

        self.processing = true;
        self.view = View::Scanning;

        let outcome = self.run_capture(image_base64).await;

        // Cleared regardless of outcome.
        self.processing = false;
        outcome
    }

    async fn run_capture(&mut self, image_base64: &str) -> CaptureOutcome {
        let ingredients = match self
            .gateway
            .identify_ingredients(image_base64, self.language)
            .await
        {
            Ok(ingredients) => ingredients,
            Err(err) => {
                warn!("Ingredient identification failed: {}", err);
                self.view = View::Home;
                return CaptureOutcome::Failed;
            }
        };

        if ingredients.is_empty() {
            self.view = View::Home;
            return CaptureOutcome::NoIngredients;
        }

        self.push_history_entry(ingredients.clone());
        self.detected_ingredients = ingredients;
        self.persist_user_data().await;

        let recipes = match self
            .gateway
            .generate_recipes(&self.detected_ingredients, &self.filters, self.language)
            .await
        {
            Ok(recipes) => recipes,
            Err(err) => {
                warn!("Recipe generation failed: {}", err);
                self.view = View::Home;
                return CaptureOutcome::Failed;
            }
        };

        if recipes.is_empty() {
            self.view = View::Home;
            return CaptureOutcome::NoRecipes;
        }

        let recipe_count = recipes.len();
        self.recipes = recipes;
        // Cost is only charged on delivered value.
        self.usage_count += 1;
        self.persist_user_data().await;
        self.view = View::Results;

        info!(
            "Capture succeeded: {} recipes, usage now {}/{}",
            recipe_count, self.usage_count, self.free_limit
        );
        CaptureOutcome::Success { recipe_count }
    }

    /// Fetch the illustrative image for one recipe card.
    ///
    /// Each card's fetch is independent; failures degrade to `None` and the
    /// caller shows a local placeholder.
    pub async fn recipe_image(&self, recipe: &Recipe) -> Option<String> {
        if recipe.image_prompt.is_empty() {
            return None;
        }
        match self.gateway.generate_image(&recipe.image_prompt).await {
            Ok(image) => image,
            Err(err) => {
                warn!("Image generation failed for {}: {}", recipe.id, err);
                None
            }
        }
    }

    fn push_history_entry(&mut self, ingredients: Vec<String>) {
        self.history.insert(
            0,
            HistoryEntry {
                date: self.history_stamp(),
                ingredients,
            },
        );
        self.history.truncate(HISTORY_CAP);
    }

    fn history_stamp(&self) -> String {
        let now = Local::now();
        match self.language {
            Language::No => now.format("%d.%m.%Y, %H:%M:%S").to_string(),
            Language::En => now.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
        }
    }

    // --- favorites, shopping ---

    /// Toggle a recipe in the favorites set.
    ///
    /// Idempotent as a pair: toggling an absent recipe adds it once,
    /// toggling it again removes it. The set never holds two entries with
    /// the same recipe id.
    pub async fn toggle_favorite(&mut self, recipe: &Recipe) {
        if let Some(pos) = self.favorites.iter().position(|f| f.id == recipe.id) {
            self.favorites.remove(pos);
        } else {
            self.favorites.push(recipe.clone());
        }
        self.persist_user_data().await;
    }

    /// Add a single item to the shopping list.
    pub async fn add_shopping_item(&mut self, text: &str) {
        self.shopping.push(ShoppingItem {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            completed: false,
        });
        self.persist_user_data().await;
    }

    /// Bulk-import a recipe's shopping list and switch to the shopping view.
    pub async fn import_shopping_list(&mut self, items: &[String]) {
        for text in items {
            self.shopping.push(ShoppingItem {
                id: Uuid::new_v4().to_string(),
                text: text.clone(),
                completed: false,
            });
        }
        self.persist_user_data().await;
        self.view = View::Shopping;
    }

    /// Toggle an item's completed flag.
    pub async fn toggle_shopping_item(&mut self, id: &str) {
        if let Some(item) = self.shopping.iter_mut().find(|i| i.id == id) {
            item.completed = !item.completed;
        }
        self.persist_user_data().await;
    }

    /// Remove an item from the shopping list.
    pub async fn remove_shopping_item(&mut self, id: &str) {
        self.shopping.retain(|i| i.id != id);
        self.persist_user_data().await;
    }

    // --- subscription ---

    /// Apply a confirmed subscription: flips `is_pro` on the session user
    /// and the stored account record, then returns home.
    pub async fn subscription_confirmed(&mut self) {
        if let Some(user) = self.user.as_mut() {
            user.is_pro = true;
            let user = user.clone();
            self.write_json(keys::ACTIVE_USER, &user).await;
            if let Err(err) = accounts::update_account(&self.store, &user).await {
                warn!("Failed to update account record: {}", err);
            }
            info!("Subscription confirmed for {}", user.email);
        }
        self.view = View::Home;
    }

    /// Grant a one-time bonus to the free limit.
    ///
    /// Strictly single-shot per claim id: a repeated claim is a no-op and
    /// returns `false`. Granted claim ids are persisted with the rest of
    /// the working set so the guard survives restarts.
    pub async fn claim_gift(&mut self, claim_id: &str) -> bool {
        if self.user.is_none() {
            return false;
        }
        if self.granted_claims.iter().any(|c| c == claim_id) {
            debug!("Bonus claim {} already granted, ignoring", claim_id);
            return false;
        }

        self.granted_claims.push(claim_id.to_string());
        self.free_limit += BONUS_GRANT;
        self.persist_user_data().await;
        self.view = View::Home;

        info!(
            "Bonus claim {} granted, free limit now {}",
            claim_id, self.free_limit
        );
        true
    }

    // --- persistence ---

    async fn load_user_data(&mut self, user_id: &str) {
        self.favorites = self.read_json(&keys::favorites(user_id)).await.unwrap_or_default();
        self.history = self.read_json(&keys::history(user_id)).await.unwrap_or_default();
        self.shopping = self.read_json(&keys::shopping(user_id)).await.unwrap_or_default();
        self.granted_claims = self.read_json(&keys::claims(user_id)).await.unwrap_or_default();
        self.filters = self.read_json(&keys::filters(user_id)).await.unwrap_or_default();
        self.usage_count = self
            .read_raw(&keys::usage(user_id))
            .await
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        self.free_limit = self
            .read_raw(&keys::limit(user_id))
            .await
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_FREE_LIMIT);
    }

    /// Write the whole per-user working set.
    ///
    /// Best-effort: failures are logged, never surfaced. A quota-exceeded
    /// history write sheds the oldest half of the history (the largest
    /// unbounded collection) and retries once.
    async fn persist_user_data(&mut self) {
        let Some(user) = self.user.clone() else {
            return;
        };

        self.write_json(keys::ACTIVE_USER, &user).await;
        self.write_json(&keys::favorites(&user.id), &self.favorites).await;
        self.write_json(&keys::shopping(&user.id), &self.shopping).await;
        self.write_json(&keys::claims(&user.id), &self.granted_claims).await;
        self.write_json(&keys::filters(&user.id), &self.filters).await;
        self.write_string(&keys::usage(&user.id), &self.usage_count.to_string()).await;
        self.write_string(&keys::limit(&user.id), &self.free_limit.to_string()).await;

        let history_key = keys::history(&user.id);
        let payload = serde_json::to_string(&self.history).unwrap_or_else(|_| "[]".to_string());
        match self.store.set(&history_key, &payload).await {
            Ok(()) => {}
            Err(StoreError::QuotaExceeded { .. }) => {
                let keep = self.history.len() / 2;
                warn!("History write exceeded quota, truncating to {} entries", keep);
                self.history.truncate(keep);
                let retry = serde_json::to_string(&self.history)
                    .unwrap_or_else(|_| "[]".to_string());
                if let Err(err) = self.store.set(&history_key, &retry).await {
                    warn!("History write still failing after truncation: {}", err);
                }
            }
            Err(err) => warn!("Failed to persist history: {}", err),
        }
    }

    async fn read_raw(&self, key: &str) -> Option<String> {
        match self.store.get(key).await {
            Ok(value) => value,
            Err(err) => {
                warn!("Failed to read {}: {}", key, err);
                None
            }
        }
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.read_raw(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("Failed to decode {}: {}", key, err);
                None
            }
        }
    }

    async fn write_json<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.write_string(key, &json).await,
            Err(err) => warn!("Failed to serialize {}: {}", key, err),
        }
    }

    async fn write_string(&self, key: &str, value: &str) {
        if let Err(err) = self.store.set(key, value).await {
            warn!("Failed to persist {}: {}", key, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_notices() {
        assert_eq!(
            CaptureOutcome::NoIngredients.notice(),
            Some(Notice::NoIngredients)
        );
        assert_eq!(CaptureOutcome::NoRecipes.notice(), Some(Notice::NoRecipes));
        assert_eq!(CaptureOutcome::Failed.notice(), Some(Notice::CaptureFailed));
        assert!(CaptureOutcome::Gated.notice().is_none());
        assert!(CaptureOutcome::SignedOut.notice().is_none());
        assert!(CaptureOutcome::Success { recipe_count: 3 }.notice().is_none());
    }
}
