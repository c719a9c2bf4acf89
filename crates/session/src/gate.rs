//! Free-usage metering and gating.

use recipe_core::User;

/// Default number of successful capture cycles on the free tier.
pub const DEFAULT_FREE_LIMIT: u32 = 5;

/// Extra cycles granted by a single bonus claim.
pub const BONUS_GRANT: u32 = 5;

/// Outcome of the gate check for one capture attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// The capture may proceed to the gateway.
    Allow,
    /// The user must be routed to the paywall; no gateway call is made.
    Deny,
}

impl GateDecision {
    /// Whether this decision denies the capture.
    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Deny)
    }
}

/// Decide whether a capture attempt may proceed.
///
/// Denied if and only if the user is not a Pro subscriber and the usage
/// counter has reached the free limit. Decided before any network cost is
/// spent.
pub fn check_capture_gate(user: &User, usage_count: u32, free_limit: u32) -> GateDecision {
    if !user.is_pro && usage_count >= free_limit {
        GateDecision::Deny
    } else {
        GateDecision::Allow
    }
}
