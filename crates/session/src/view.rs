//! The view enumeration and the render containment boundary.

use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::notice::Notice;

/// The views of the application. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Onboarding,
    Login,
    Home,
    Scanning,
    Results,
    Favorites,
    History,
    Shopping,
    Profile,
    Privacy,
    Terms,
    Support,
    Paywall,
}

impl View {
    /// Views rendered without the persistent navigation chrome.
    pub fn hides_navigation(&self) -> bool {
        matches!(
            self,
            Self::Onboarding | Self::Login | Self::Paywall | Self::Scanning
        )
    }
}

/// Result of a guarded render: the produced view content, or a recovery
/// notice when rendering panicked.
#[derive(Debug)]
pub enum Rendered<T> {
    /// The view rendered normally.
    Ok(T),
    /// Rendering failed; show the recovery notice with a return-home action.
    Recovered(Notice),
}

/// Run a view-producing closure inside a containment boundary.
///
/// A panic while constructing a view is caught here and substituted with a
/// generic recovery notice; the rest of the state machine never sees the
/// failure.
pub fn render_guard<T>(view: View, render: impl FnOnce() -> T) -> Rendered<T> {
    match catch_unwind(AssertUnwindSafe(render)) {
        Ok(content) => Rendered::Ok(content),
        Err(_) => {
            error!("Render failed for view {:?}; showing recovery notice", view);
            Rendered::Recovered(Notice::RenderFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chromeless_views() {
        assert!(View::Onboarding.hides_navigation());
        assert!(View::Login.hides_navigation());
        assert!(View::Paywall.hides_navigation());
        assert!(View::Scanning.hides_navigation());
        assert!(!View::Home.hides_navigation());
        assert!(!View::Profile.hides_navigation());
    }

    #[test]
    fn test_render_guard_passes_content_through() {
        let rendered = render_guard(View::Home, || "home content");
        assert!(matches!(rendered, Rendered::Ok("home content")));
    }

    #[test]
    fn test_render_guard_recovers_from_panic() {
        let rendered: Rendered<&str> = render_guard(View::Results, || panic!("bad view"));
        assert!(matches!(rendered, Rendered::Recovered(Notice::RenderFailed)));
    }
}
