//! Error types for webhook delivery.

/// Errors that can occur while posting to a webhook.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("request to {target} failed: {source}")]
    Http {
        /// Redacted webhook URL.
        target: String,
        /// The underlying client error.
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-success status.
    #[error("{target} returned {status}: {body}")]
    Status {
        /// Redacted webhook URL.
        target: String,
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// No webhook URL is configured for this delivery.
    #[error("no webhook URL configured for {what}")]
    MissingTarget {
        /// What was being delivered (a region id, or the weekly forecast).
        what: String,
    },
}

impl DeliveryError {
    /// A [`DeliveryError::MissingTarget`] for `what`.
    pub fn missing_target(what: impl Into<String>) -> Self {
        Self::MissingTarget { what: what.into() }
    }
}

/// Strip the secret token from a webhook URL for logs and error messages.
///
/// `https://discord.com/api/webhooks/123/abcdef` becomes
/// `https://discord.com/api/webhooks/123/***`. URLs without a path are
/// returned unchanged.
pub fn redact(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    let scheme_end = trimmed.find("://").map_or(0, |i| i.saturating_add(3));
    match trimmed.rfind('/') {
        Some(slash) if slash >= scheme_end => {
            format!("{}/***", trimmed.get(..slash).unwrap_or(trimmed))
        }
        _ => trimmed.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_token_segment() {
        assert_eq!(
            redact("https://discord.com/api/webhooks/123/abcdef"),
            "https://discord.com/api/webhooks/123/***"
        );
        assert_eq!(redact("http://127.0.0.1:8080/hook/"), "http://127.0.0.1:8080/***");
    }

    #[test]
    fn leaves_bare_hosts_alone() {
        assert_eq!(redact("https://example.invalid"), "https://example.invalid");
        assert_eq!(redact("https://example.invalid/"), "https://example.invalid");
    }

    #[test]
    fn missing_target_message() {
        let err = DeliveryError::missing_target("the weekly forecast");
        assert_eq!(err.to_string(), "no webhook URL configured for the weekly forecast");
    }
}
