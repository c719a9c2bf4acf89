//! Walkthrough of the full session flow against scripted gateways.
//!
//! Run with: cargo run -p session --example scripted_walkthrough
//!
//! No configuration needed; everything runs in memory.

use std::sync::Arc;

use mock_gateway::{sample_recipe, MemoryStore, ScriptedGateway};
use session::{Session, DEFAULT_FREE_LIMIT};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let gateway = ScriptedGateway::new(
        vec!["egg".to_string(), "milk".to_string(), "flour".to_string()],
        vec![
            sample_recipe("r1", "Pancakes"),
            sample_recipe("r2", "Omelette"),
        ],
    );

    let mut session = Session::new(gateway, Arc::new(MemoryStore::new()));
    session.init(None).await;
    println!("Cold start view: {:?}", session.view());

    session.complete_onboarding().await;
    session
        .register("Kari", "kari@example.com", "hunter2", true, true)
        .await?;
    println!("Signed in as {}", session.user().map(|u| u.name.as_str()).unwrap_or("?"));

    // Burn through the free tier.
    for attempt in 1..=(DEFAULT_FREE_LIMIT + 1) {
        let outcome = session.capture_photo("cGhvdG8=").await;
        println!(
            "Capture {}: {:?} (usage {}/{}, view {:?})",
            attempt,
            outcome,
            session.usage_count(),
            session.free_limit(),
            session.view()
        );
        if let Some(notice) = outcome.notice() {
            println!("  notice: {}", notice.message(session.language()));
        }
    }

    // The paywall is up; a bonus claim reopens the gate.
    session.claim_gift("walkthrough-bonus").await;
    let outcome = session.capture_photo("cGhvdG8=").await;
    println!(
        "After bonus claim: {:?} (usage {}/{})",
        outcome,
        session.usage_count(),
        session.free_limit()
    );

    for recipe in session.recipes() {
        println!("- {} ({}, {})", recipe.name, recipe.prep_time, recipe.difficulty);
    }

    Ok(())
}
