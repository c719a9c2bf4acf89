//! Localized user-facing notices.
//!
//! Every failure path in the application resolves to one of these messages
//! or a silent safe-state transition; raw technical errors never reach the
//! user.

use recipe_core::Language;

/// The closed set of user-facing notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// No food was recognized in the photo. User-correctable: retake.
    NoIngredients,
    /// No recipe matched the filters. User-correctable: loosen filters.
    NoRecipes,
    /// A gateway call failed mid-capture.
    CaptureFailed,
    /// A view failed to render; a recovery view is shown instead.
    RenderFailed,
}

impl Notice {
    /// The localized message for this notice.
    pub fn message(&self, language: Language) -> &'static str {
        match (self, language) {
            (Self::NoIngredients, Language::No) => {
                "Beklager, jeg fant ingen matvarer i bildet. Prøv et nytt bilde med bedre lys."
            }
            (Self::NoIngredients, Language::En) => "No ingredients found. Try a clearer photo.",
            (Self::NoRecipes, Language::No) => {
                "Ingen oppskrifter matchet filtrene dine. Prøv å justere dem."
            }
            (Self::NoRecipes, Language::En) => {
                "No recipes matched your filters. Try loosening them."
            }
            (Self::CaptureFailed, Language::No) => "AI-kokken krasjet. Prøv igjen!",
            (Self::CaptureFailed, Language::En) => "AI chef crashed. Try again!",
            (Self::RenderFailed, Language::No) => "Beklager, en feil oppstod. Gå tilbake.",
            (Self::RenderFailed, Language::En) => "Sorry, something went wrong. Return home.",
        }
    }
}
