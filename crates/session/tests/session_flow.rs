//! Integration tests for the session state machine.
//!
//! Run with: cargo test -p session --test session_flow
//!
//! Drives the full flow against the mock gateways and an in-memory store:
//! cold start, authentication, the capture pipeline with gating, and
//! per-user persistence.

use std::sync::Arc;

use mock_gateway::{
    sample_recipe, FailingGateway, MemoryStore, QuotaStore, RecordingGateway, ScriptedGateway,
};
use recipe_core::{HistoryEntry, KeyValueStore, Language, UserFilters};
use session::{keys, CaptureOutcome, Notice, PaymentReturn, Session, View, DEFAULT_FREE_LIMIT};

fn scripted() -> ScriptedGateway {
    ScriptedGateway::new(
        vec!["egg".to_string(), "milk".to_string()],
        vec![
            sample_recipe("r1", "Pancakes"),
            sample_recipe("r2", "Omelette"),
        ],
    )
}

async fn signed_in<G: recipe_core::RecipeGateway>(
    gateway: G,
    store: Arc<MemoryStore>,
) -> Session<G, Arc<MemoryStore>> {
    let mut session = Session::new(gateway, store);
    session.init(None).await;
    session
        .register("Kari", "kari@example.com", "pw", true, true)
        .await
        .unwrap();
    session
}

// --- cold start ---

#[tokio::test]
async fn test_first_launch_shows_onboarding() {
    let mut session = Session::new(scripted(), Arc::new(MemoryStore::new()));
    session.init(None).await;
    assert_eq!(session.view(), View::Onboarding);

    session.complete_onboarding().await;
    assert_eq!(session.view(), View::Login);
}

#[tokio::test]
async fn test_onboarding_seen_skips_to_login() {
    let store = Arc::new(MemoryStore::new());
    let mut session = Session::new(scripted(), store.clone());
    session.init(None).await;
    session.complete_onboarding().await;

    let mut second = Session::new(scripted(), store);
    second.init(None).await;
    assert_eq!(second.view(), View::Login);
}

#[tokio::test]
async fn test_active_session_restores_to_home() {
    let store = Arc::new(MemoryStore::new());
    let session = signed_in(scripted(), store.clone()).await;
    assert_eq!(session.view(), View::Home);
    drop(session);

    let mut restored = Session::new(scripted(), store);
    restored.init(None).await;
    assert_eq!(restored.view(), View::Home);
    assert_eq!(restored.user().unwrap().email, "kari@example.com");
}

#[tokio::test]
async fn test_corrupt_active_user_recovers_to_login() {
    let store = Arc::new(MemoryStore::new());
    store.set(keys::ONBOARDING_SEEN, "true").await.unwrap();
    store.set(keys::ACTIVE_USER, "{definitely not json").await.unwrap();

    let mut session = Session::new(scripted(), store.clone());
    session.init(None).await;

    assert_eq!(session.view(), View::Login);
    assert!(session.user().is_none());
    // The corrupt record is cleared, not left to fail again.
    assert!(store.get(keys::ACTIVE_USER).await.unwrap().is_none());
}

#[tokio::test]
async fn test_language_preference_survives_restart() {
    let store = Arc::new(MemoryStore::new());
    let mut session = Session::new(scripted(), store.clone());
    session.init(None).await;
    assert_eq!(session.language(), Language::No);

    session.set_language(Language::En).await;

    let mut second = Session::new(scripted(), store);
    second.init(None).await;
    assert_eq!(second.language(), Language::En);
}

// --- capture pipeline and gating ---

#[tokio::test]
async fn test_capture_while_signed_out_routes_to_login() {
    let gateway = Arc::new(RecordingGateway::new(scripted()));
    let mut session = Session::new(gateway.clone(), Arc::new(MemoryStore::new()));
    session.init(None).await;

    let outcome = session.capture_photo("cGhvdG8=").await;

    assert_eq!(outcome, CaptureOutcome::SignedOut);
    assert_eq!(session.view(), View::Login);
    assert_eq!(gateway.total_calls(), 0);
}

#[tokio::test]
async fn test_successful_capture_reaches_results() {
    let mut session = signed_in(scripted(), Arc::new(MemoryStore::new())).await;

    let outcome = session.capture_photo("cGhvdG8=").await;

    assert_eq!(outcome, CaptureOutcome::Success { recipe_count: 2 });
    assert_eq!(session.view(), View::Results);
    assert_eq!(session.detected_ingredients(), ["egg", "milk"]);
    assert_eq!(session.recipes().len(), 2);
    assert_eq!(session.usage_count(), 1);
    assert!(!session.is_processing());
}

#[tokio::test]
async fn test_gate_denies_at_limit_without_gateway_call() {
    let gateway = Arc::new(RecordingGateway::new(scripted()));
    let mut session = signed_in(gateway.clone(), Arc::new(MemoryStore::new())).await;

    for _ in 0..DEFAULT_FREE_LIMIT {
        let outcome = session.capture_photo("cGhvdG8=").await;
        assert!(matches!(outcome, CaptureOutcome::Success { .. }));
    }
    assert_eq!(gateway.identify_calls(), DEFAULT_FREE_LIMIT as usize);

    let outcome = session.capture_photo("cGhvdG8=").await;

    assert_eq!(outcome, CaptureOutcome::Gated);
    assert_eq!(session.view(), View::Paywall);
    // The denied attempt never reached the provider.
    assert_eq!(gateway.identify_calls(), DEFAULT_FREE_LIMIT as usize);
    assert_eq!(session.usage_count(), DEFAULT_FREE_LIMIT);
}

#[tokio::test]
async fn test_pro_user_is_never_gated() {
    let mut session = signed_in(scripted(), Arc::new(MemoryStore::new())).await;
    session.subscription_confirmed().await;

    for _ in 0..(DEFAULT_FREE_LIMIT + 3) {
        let outcome = session.capture_photo("cGhvdG8=").await;
        assert!(matches!(outcome, CaptureOutcome::Success { .. }));
    }
    assert_eq!(session.usage_count(), DEFAULT_FREE_LIMIT + 3);
}

#[tokio::test]
async fn test_no_ingredients_returns_home_without_charge() {
    let mut session = signed_in(
        ScriptedGateway::no_ingredients(),
        Arc::new(MemoryStore::new()),
    )
    .await;

    let outcome = session.capture_photo("cGhvdG8=").await;

    assert_eq!(outcome, CaptureOutcome::NoIngredients);
    assert_eq!(outcome.notice(), Some(Notice::NoIngredients));
    assert_eq!(session.view(), View::Home);
    assert_eq!(session.usage_count(), 0);
    // Nothing recognized, nothing recorded.
    assert!(session.history().is_empty());
    assert!(!session.is_processing());
}

#[tokio::test]
async fn test_no_recipes_keeps_history_but_not_usage() {
    let mut session = signed_in(
        ScriptedGateway::no_recipes(vec!["egg".to_string()]),
        Arc::new(MemoryStore::new()),
    )
    .await;

    let outcome = session.capture_photo("cGhvdG8=").await;

    assert_eq!(outcome, CaptureOutcome::NoRecipes);
    assert_eq!(session.view(), View::Home);
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.usage_count(), 0);
}

#[tokio::test]
async fn test_gateway_failure_is_soft() {
    let mut session = signed_in(FailingGateway, Arc::new(MemoryStore::new())).await;

    let outcome = session.capture_photo("cGhvdG8=").await;

    assert_eq!(outcome, CaptureOutcome::Failed);
    assert_eq!(outcome.notice(), Some(Notice::CaptureFailed));
    assert_eq!(session.view(), View::Home);
    assert_eq!(session.usage_count(), 0);
    assert!(!session.is_processing());
}

#[tokio::test]
async fn test_history_is_newest_first_and_capped() {
    let mut session = signed_in(scripted(), Arc::new(MemoryStore::new())).await;
    session.subscription_confirmed().await;

    for _ in 0..25 {
        session.capture_photo("cGhvdG8=").await;
    }

    assert_eq!(session.history().len(), recipe_core::HISTORY_CAP);
    assert_eq!(session.history()[0].ingredients, ["egg", "milk"]);
}

#[tokio::test]
async fn test_recipe_image_failure_degrades_to_none() {
    let mut session = signed_in(FailingGateway, Arc::new(MemoryStore::new())).await;
    session.subscription_confirmed().await;

    let recipe = sample_recipe("r1", "Pancakes");
    assert!(session.recipe_image(&recipe).await.is_none());

    let mut blank = recipe.clone();
    blank.image_prompt.clear();
    let session = signed_in(scripted().with_image("data:image/png;base64,aW1n"), Arc::new(MemoryStore::new())).await;
    // No prompt, no call.
    assert!(session.recipe_image(&blank).await.is_none());
    assert!(session.recipe_image(&recipe).await.is_some());
}

// --- persistence across logout and login ---

#[tokio::test]
async fn test_logout_clears_memory_but_not_store() {
    let store = Arc::new(MemoryStore::new());
    let mut session = signed_in(scripted(), store.clone()).await;

    session.capture_photo("cGhvdG8=").await;
    let favorite = session.recipes()[0].clone();
    session.toggle_favorite(&favorite).await;
    let user_id = session.user().unwrap().id.clone();

    session.logout().await;

    assert_eq!(session.view(), View::Login);
    assert!(session.user().is_none());
    assert!(session.favorites().is_empty());
    assert!(session.history().is_empty());
    assert_eq!(session.usage_count(), 0);

    // The store still holds the account and its data.
    assert!(store.get(keys::ACTIVE_USER).await.unwrap().is_none());
    assert!(store.get(&keys::favorites(&user_id)).await.unwrap().is_some());

    session.login("kari@example.com", "pw").await.unwrap();
    assert_eq!(session.favorites().len(), 1);
    assert_eq!(session.favorites()[0].id, favorite.id);
    assert_eq!(session.usage_count(), 1);
    assert_eq!(session.history().len(), 1);
}

#[tokio::test]
async fn test_favorite_toggle_is_an_involution() {
    let mut session = signed_in(scripted(), Arc::new(MemoryStore::new())).await;
    let recipe = sample_recipe("r1", "Pancakes");

    session.toggle_favorite(&recipe).await;
    assert_eq!(session.favorites().len(), 1);

    // Same id, even with drifted fields, toggles off rather than duplicating.
    let mut renamed = recipe.clone();
    renamed.name = "Crepes".to_string();
    session.toggle_favorite(&renamed).await;
    assert!(session.favorites().is_empty());
}

#[tokio::test]
async fn test_filters_persist_per_user() {
    let store = Arc::new(MemoryStore::new());
    let mut session = signed_in(scripted(), store.clone()).await;

    let filters = UserFilters {
        cuisine: "Italian".to_string(),
        diet: vec!["vegetarian".to_string()],
        allergies: vec!["nuts".to_string()],
        nutrition_enabled: true,
        max_calories: 650,
        min_protein: 30,
    };
    session.set_filters(filters.clone()).await;
    session.logout().await;

    session.login("kari@example.com", "pw").await.unwrap();
    assert_eq!(session.filters(), &filters);

    // A different account starts from the defaults.
    session.logout().await;
    session
        .register("Ola", "ola@example.com", "pw2", true, true)
        .await
        .unwrap();
    assert_eq!(session.filters(), &UserFilters::default());
}

#[tokio::test]
async fn test_shopping_list_operations() {
    let mut session = signed_in(scripted(), Arc::new(MemoryStore::new())).await;

    session.add_shopping_item("flour").await;
    session
        .import_shopping_list(&["butter".to_string(), "jam".to_string()])
        .await;

    assert_eq!(session.view(), View::Shopping);
    assert_eq!(session.shopping_items().len(), 3);

    let id = session.shopping_items()[0].id.clone();
    session.toggle_shopping_item(&id).await;
    assert!(session.shopping_items()[0].completed);
    session.toggle_shopping_item(&id).await;
    assert!(!session.shopping_items()[0].completed);

    session.remove_shopping_item(&id).await;
    assert_eq!(session.shopping_items().len(), 2);
    assert!(session.shopping_items().iter().all(|i| i.id != id));
}

// --- quota degradation ---

#[tokio::test]
async fn test_history_sheds_on_quota_and_retries() {
    // One entry with a 300-char ingredient is ~350 bytes as JSON; two
    // entries exceed the cap, one fits.
    let store = Arc::new(QuotaStore::new(600));
    let long_ingredient = "x".repeat(300);
    let gateway = ScriptedGateway::new(
        vec![long_ingredient],
        vec![sample_recipe("r1", "Pancakes")],
    );

    let mut session = Session::new(gateway, store.clone());
    session.init(None).await;
    session
        .register("Kari", "kari@example.com", "pw", true, true)
        .await
        .unwrap();

    assert!(matches!(
        session.capture_photo("cGhvdG8=").await,
        CaptureOutcome::Success { .. }
    ));
    assert_eq!(session.history().len(), 1);

    // The second entry trips the quota; the oldest half is shed and the
    // capture still succeeds.
    assert!(matches!(
        session.capture_photo("cGhvdG8=").await,
        CaptureOutcome::Success { .. }
    ));
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.usage_count(), 2);

    let stored: Vec<HistoryEntry> = serde_json::from_str(
        &store
            .get(&keys::history(&session.user().unwrap().id))
            .await
            .unwrap()
            .unwrap(),
    )
    .unwrap();
    assert_eq!(stored.len(), 1);
}

// --- subscription and bonus claims ---

#[tokio::test]
async fn test_payment_return_confirms_subscription() {
    let store = Arc::new(MemoryStore::new());
    let session = signed_in(scripted(), store.clone()).await;
    assert!(!session.user().unwrap().is_pro);
    drop(session);

    let mut returned = Session::new(scripted(), store.clone());
    returned.init(Some(PaymentReturn::Success)).await;

    assert_eq!(returned.view(), View::Home);
    assert!(returned.user().unwrap().is_pro);

    // The account record was updated too, so the flag survives a fresh login.
    returned.logout().await;
    returned.login("kari@example.com", "pw").await.unwrap();
    assert!(returned.user().unwrap().is_pro);
}

#[tokio::test]
async fn test_cancelled_payment_changes_nothing() {
    let store = Arc::new(MemoryStore::new());
    drop(signed_in(scripted(), store.clone()).await);

    let mut returned = Session::new(scripted(), store);
    returned.init(Some(PaymentReturn::Cancelled)).await;

    assert!(!returned.user().unwrap().is_pro);
}

#[tokio::test]
async fn test_bonus_claim_is_single_shot() {
    let store = Arc::new(MemoryStore::new());
    let mut session = signed_in(scripted(), store.clone()).await;
    assert_eq!(session.free_limit(), DEFAULT_FREE_LIMIT);

    assert!(session.claim_gift("welcome-2026").await);
    assert_eq!(session.free_limit(), DEFAULT_FREE_LIMIT + session::BONUS_GRANT);
    assert_eq!(session.view(), View::Home);

    // The same claim id grants nothing further.
    assert!(!session.claim_gift("welcome-2026").await);
    assert_eq!(session.free_limit(), DEFAULT_FREE_LIMIT + session::BONUS_GRANT);

    // The guard survives logout and login.
    session.logout().await;
    session.login("kari@example.com", "pw").await.unwrap();
    assert_eq!(session.free_limit(), DEFAULT_FREE_LIMIT + session::BONUS_GRANT);
    assert!(!session.claim_gift("welcome-2026").await);

    // A distinct claim id grants again.
    assert!(session.claim_gift("welcome-2027").await);
    assert_eq!(
        session.free_limit(),
        DEFAULT_FREE_LIMIT + 2 * session::BONUS_GRANT
    );
}

#[tokio::test]
async fn test_claim_requires_a_session() {
    let mut session = Session::new(scripted(), Arc::new(MemoryStore::new()));
    session.init(None).await;
    assert!(!session.claim_gift("welcome-2026").await);
}

#[tokio::test]
async fn test_raised_limit_reopens_the_gate() {
    let gateway = Arc::new(RecordingGateway::new(scripted()));
    let mut session = signed_in(gateway.clone(), Arc::new(MemoryStore::new())).await;

    for _ in 0..DEFAULT_FREE_LIMIT {
        session.capture_photo("cGhvdG8=").await;
    }
    assert_eq!(session.capture_photo("cGhvdG8=").await, CaptureOutcome::Gated);

    session.claim_gift("gift-1").await;
    assert!(matches!(
        session.capture_photo("cGhvdG8=").await,
        CaptureOutcome::Success { .. }
    ));
}
