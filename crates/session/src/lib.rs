//! Session state machine, usage gating and the capture pipeline.
//!
//! This crate provides the [`Session`] type which coordinates the whole
//! application flow: authentication, view transitions, free-tier metering,
//! the photo-to-recipes capture pipeline and per-user persistence.
//!
//! # Features
//!
//! - Cold-start resolution (onboarding, login or restored session)
//! - Local account registration and credential matching
//! - Free-tier gate checked before any gateway spend
//! - Capture pipeline with fail-soft notices (never a crash view)
//! - Per-user persisted favorites, history, shopping list and filters
//! - Hosted-checkout redirect URLs and payment-return handling
//!
//! # Architecture
//!
//! ```text
//! capture_photo(photo)
//!          ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         SESSION                             │
//! │                                                             │
//! │  1. Gate check (signed in? under free limit / Pro?)         │
//! │         ↓ denied → Login / Paywall, no gateway call         │
//! │  2. Identify ingredients (gateway)                          │
//! │         ↓ empty / error → Home + notice                     │
//! │  3. Record history entry (newest first, capped)             │
//! │         ↓                                                   │
//! │  4. Generate recipes (gateway, filter-aware)                │
//! │         ↓ empty / error → Home + notice                     │
//! │  5. Increment usage, persist, → Results                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use session::{Session, View};
//! use recipe_core::MemoryStore;
//!
//! let mut session = Session::new(gateway, MemoryStore::new());
//! session.init(None).await;
//!
//! session.register("Kari", "kari@example.com", "pw", true, true).await?;
//! let outcome = session.capture_photo(&photo_base64).await;
//! if let Some(notice) = outcome.notice() {
//!     println!("{}", notice.message(session.language()));
//! }
//! assert_eq!(session.view(), View::Results);
//! ```

pub mod accounts;
pub mod controller;
pub mod error;
pub mod gate;
pub mod keys;
pub mod notice;
pub mod payment;
pub mod view;

pub use controller::{CaptureOutcome, Session};
pub use error::AuthError;
pub use gate::{check_capture_gate, GateDecision, BONUS_GRANT, DEFAULT_FREE_LIMIT};
pub use notice::Notice;
pub use payment::{
    strip_payment_params, CheckoutConfig, PaymentReturn, PAYMENT_PARAM,
};
pub use view::{render_guard, Rendered, View};
