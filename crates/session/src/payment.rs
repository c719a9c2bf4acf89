//! Hosted-checkout URL plumbing.
//!
//! The payment provider is an external collaborator: the application only
//! builds a redirect URL carrying the user id for reconciliation, and reads
//! back a status query parameter on return. Nothing here touches the
//! network.

use std::env;

use url::Url;

/// Query parameter carrying the return status.
pub const PAYMENT_PARAM: &str = "payment";

/// Configuration for the hosted checkout redirect.
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// The provider-hosted payment link.
    pub payment_link: String,
    /// Origin the provider redirects back to, with the status parameter.
    pub return_origin: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            payment_link: "https://buy.stripe.com/test_placeholder".to_string(),
            return_origin: "https://pantrypal.app".to_string(),
        }
    }
}

impl CheckoutConfig {
    /// Create configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `PANTRYPAL_PAYMENT_LINK` - hosted payment link (default: test placeholder)
    /// - `PANTRYPAL_RETURN_ORIGIN` - redirect-back origin (default: https://pantrypal.app)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            payment_link: env::var("PANTRYPAL_PAYMENT_LINK").unwrap_or(defaults.payment_link),
            return_origin: env::var("PANTRYPAL_RETURN_ORIGIN").unwrap_or(defaults.return_origin),
        }
    }

    /// Build the checkout redirect URL for a user.
    ///
    /// `client_reference_id` lets the provider dashboard attribute the
    /// payment to the user; the success and cancel URLs return to the
    /// configured origin with the status parameter set.
    pub fn checkout_url(&self, user_id: &str) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.payment_link)?;
        url.query_pairs_mut()
            .append_pair("client_reference_id", user_id)
            .append_pair(
                "success_url",
                &format!("{}?{}=success", self.return_origin, PAYMENT_PARAM),
            )
            .append_pair(
                "cancel_url",
                &format!("{}?{}=cancelled", self.return_origin, PAYMENT_PARAM),
            );
        Ok(url)
    }
}

/// Status read back from the return redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentReturn {
    Success,
    Cancelled,
}

impl PaymentReturn {
    /// Parse the status from a raw query string (without the leading `?`).
    pub fn from_query(query: &str) -> Option<Self> {
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == PAYMENT_PARAM)
            .and_then(|(_, value)| match value.as_ref() {
                "success" => Some(Self::Success),
                "cancelled" => Some(Self::Cancelled),
                _ => None,
            })
    }

    /// Parse the status from a full return URL.
    pub fn from_url(url: &Url) -> Option<Self> {
        Self::from_query(url.query().unwrap_or_default())
    }
}

/// Remove the payment status parameter from a return URL.
///
/// Idempotent: consuming the parameter once keeps a refresh of the same URL
/// from re-triggering the confirmation.
pub fn strip_payment_params(url: &Url) -> Url {
    let remaining: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != PAYMENT_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut stripped = url.clone();
    stripped.set_query(None);
    if !remaining.is_empty() {
        stripped.query_pairs_mut().extend_pairs(remaining);
    }
    stripped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_url_carries_reference_and_returns() {
        let config = CheckoutConfig::default();
        let url = config.checkout_url("user-42").unwrap();

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert!(pairs.contains(&("client_reference_id".to_string(), "user-42".to_string())));
        assert!(pairs.iter().any(|(k, v)| k == "success_url" && v.contains("payment=success")));
        assert!(pairs.iter().any(|(k, v)| k == "cancel_url" && v.contains("payment=cancelled")));
    }

    #[test]
    fn test_invalid_payment_link_errors() {
        let config = CheckoutConfig {
            payment_link: "not a url".to_string(),
            ..CheckoutConfig::default()
        };
        assert!(config.checkout_url("u1").is_err());
    }

    #[test]
    fn test_from_query() {
        assert_eq!(
            PaymentReturn::from_query("payment=success"),
            Some(PaymentReturn::Success)
        );
        assert_eq!(
            PaymentReturn::from_query("foo=bar&payment=cancelled"),
            Some(PaymentReturn::Cancelled)
        );
        assert_eq!(PaymentReturn::from_query("payment=other"), None);
        assert_eq!(PaymentReturn::from_query(""), None);
    }

    #[test]
    fn test_strip_payment_params_is_idempotent() {
        let url = Url::parse("https://pantrypal.app/?payment=success&lang=no").unwrap();

        let stripped = strip_payment_params(&url);
        assert_eq!(stripped.query(), Some("lang=no"));
        assert!(PaymentReturn::from_url(&stripped).is_none());

        let again = strip_payment_params(&stripped);
        assert_eq!(again, stripped);
    }

    #[test]
    fn test_strip_payment_params_clears_query_when_empty() {
        let url = Url::parse("https://pantrypal.app/?payment=success").unwrap();
        let stripped = strip_payment_params(&url);
        assert!(stripped.query().is_none());
    }
}
