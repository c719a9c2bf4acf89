//! Session error types.

use recipe_core::{Language, StoreError};
use thiserror::Error;

/// Errors from login and registration.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The email is already registered.
    #[error("email already registered")]
    EmailTaken,

    /// No account exists for the given email.
    #[error("no account found for this email")]
    UnknownEmail,

    /// The credential does not match the stored account.
    #[error("incorrect credential")]
    WrongCredential,

    /// Terms and privacy policy were not both accepted at registration.
    #[error("terms and privacy policy must be accepted")]
    TermsNotAccepted,

    /// The account store could not be read or written.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AuthError {
    /// The localized user-facing message for this error.
    ///
    /// Store failures deliberately map to a generic message; backend detail
    /// never reaches the user.
    pub fn message(&self, language: Language) -> &'static str {
        match (self, language) {
            (Self::EmailTaken, Language::No) => "Denne e-posten er allerede registrert.",
            (Self::EmailTaken, Language::En) => "Email already registered.",
            (Self::UnknownEmail, Language::No) => "Fant ingen bruker med denne e-posten.",
            (Self::UnknownEmail, Language::En) => "No user found with this email.",
            (Self::WrongCredential, Language::No) => "Feil passord.",
            (Self::WrongCredential, Language::En) => "Incorrect password.",
            (Self::TermsNotAccepted, Language::No) => {
                "Du må godta vilkårene og personvernerklæringen."
            }
            (Self::TermsNotAccepted, Language::En) => {
                "You must accept the terms and privacy policy."
            }
            (Self::Store(_), Language::No) => "Noe gikk galt. Prøv igjen!",
            (Self::Store(_), Language::En) => "Something went wrong. Try again!",
        }
    }
}
