//! Registered account storage and local credential matching.
//!
//! Accounts live as a JSON list under a single global key. Lookup is by
//! email, lowercased and trimmed; uniqueness is enforced at registration.
//! The credential is only ever compared locally.

use recipe_core::{Account, KeyValueStore, StoreError, User};
use tracing::info;
use uuid::Uuid;

use crate::error::AuthError;
use crate::keys;

/// Load the registered accounts list. A corrupt or absent list reads as empty.
pub async fn load_accounts<S: KeyValueStore + ?Sized>(
    store: &S,
) -> Result<Vec<Account>, StoreError> {
    let raw = store.get(keys::ACCOUNTS).await?;
    Ok(raw
        .and_then(|json| serde_json::from_str(&json).ok())
        .unwrap_or_default())
}

/// Replace the registered accounts list.
pub async fn save_accounts<S: KeyValueStore + ?Sized>(
    store: &S,
    accounts: &[Account],
) -> Result<(), StoreError> {
    let json = serde_json::to_string(accounts)
        .map_err(|e| StoreError::Backend(format!("account list serialization: {}", e)))?;
    store.set(keys::ACCOUNTS, &json).await
}

/// Register a new account.
///
/// Both terms and privacy must be accepted. The email is normalized to
/// lowercase; a blank name falls back to the email local part, and the
/// avatar is a deterministic generated image seeded by the email.
pub async fn register<S: KeyValueStore + ?Sized>(
    store: &S,
    name: &str,
    email: &str,
    credential: &str,
    accepted_terms: bool,
    accepted_privacy: bool,
) -> Result<User, AuthError> {
    if !accepted_terms || !accepted_privacy {
        return Err(AuthError::TermsNotAccepted);
    }

    let clean_email = email.trim().to_lowercase();
    let mut accounts = load_accounts(store).await?;

    if accounts.iter().any(|acc| acc.user.email == clean_email) {
        return Err(AuthError::EmailTaken);
    }

    let display_name = {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            clean_email.split('@').next().unwrap_or(&clean_email).to_string()
        } else {
            trimmed.to_string()
        }
    };

    let user = User {
        id: Uuid::new_v4().to_string(),
        name: display_name,
        email: clean_email.clone(),
        avatar: Some(format!(
            "https://api.dicebear.com/7.x/avataaars/svg?seed={}",
            clean_email
        )),
        is_pro: false,
    };

    accounts.push(Account {
        user: user.clone(),
        credential: credential.to_string(),
    });
    save_accounts(store, &accounts).await?;

    info!("Registered account for {}", user.email);
    Ok(user)
}

/// Match an email and credential against the stored accounts.
pub async fn login<S: KeyValueStore + ?Sized>(
    store: &S,
    email: &str,
    credential: &str,
) -> Result<User, AuthError> {
    let clean_email = email.trim().to_lowercase();
    let accounts = load_accounts(store).await?;

    let account = accounts
        .iter()
        .find(|acc| acc.user.email == clean_email)
        .ok_or(AuthError::UnknownEmail)?;

    if account.credential != credential {
        return Err(AuthError::WrongCredential);
    }

    Ok(account.user.clone())
}

/// Merge updated user fields back into the stored account record.
///
/// Used when a subscription confirmation flips `is_pro`; unknown ids are a
/// no-op (the session user may predate account storage in tests).
pub async fn update_account<S: KeyValueStore + ?Sized>(
    store: &S,
    user: &User,
) -> Result<(), StoreError> {
    let mut accounts = load_accounts(store).await?;
    let mut changed = false;

    for account in &mut accounts {
        if account.user.id == user.id {
            account.user = user.clone();
            changed = true;
        }
    }

    if changed {
        save_accounts(store, &accounts).await?;
    }
    Ok(())
}
