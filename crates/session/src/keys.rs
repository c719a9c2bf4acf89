//! Storage key namespacing.
//!
//! Global keys carry the fixed prefix; per-user keys are namespaced as
//! `pp_data_<userId>_<field>`. Switching users swaps the entire working set.

/// Active session marker: the signed-in user as JSON.
pub const ACTIVE_USER: &str = "pp_active_user";

/// Global display-language preference.
pub const LANG: &str = "pp_lang";

/// Global onboarding-seen flag.
pub const ONBOARDING_SEEN: &str = "pp_onboarding_seen";

/// Global list of registered accounts as JSON.
pub const ACCOUNTS: &str = "pp_accounts";

fn user_key(user_id: &str, field: &str) -> String {
    format!("pp_data_{}_{}", user_id, field)
}

/// Favorites collection for a user.
pub fn favorites(user_id: &str) -> String {
    user_key(user_id, "favorites")
}

/// Scan history for a user.
pub fn history(user_id: &str) -> String {
    user_key(user_id, "history")
}

/// Shopping list for a user.
pub fn shopping(user_id: &str) -> String {
    user_key(user_id, "shopping")
}

/// Usage counter for a user.
pub fn usage(user_id: &str) -> String {
    user_key(user_id, "usage")
}

/// Free-tier limit for a user.
pub fn limit(user_id: &str) -> String {
    user_key(user_id, "limit")
}

/// Granted bonus claim ids for a user.
pub fn claims(user_id: &str) -> String {
    user_key(user_id, "claims")
}

/// Persisted dietary filters for a user.
pub fn filters(user_id: &str) -> String {
    user_key(user_id, "filters")
}
