//! Provider error taxonomy.
//!
//! The embedding and completion providers are the only remote boundaries in
//! the pipeline. Their failures are split into two kinds so callers can
//! decide retry vs. display policy:
//!
//! - [`ProviderError::Retryable`] — rate limits (HTTP 429), server errors
//!   (5xx), and network failures. The clients retry these with exponential
//!   backoff before giving up.
//! - [`ProviderError::Terminal`] — client errors (other 4xx), malformed
//!   responses, and missing credentials. Never retried.
//!
//! Command handlers catch both kinds and render them as user-visible
//! `Error ...` strings; a provider failure never crashes the session.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transient failure worth retrying (429, 5xx, network).
    #[error("{0}")]
    Retryable(String),

    /// Permanent failure; retrying cannot help.
    #[error("{0}")]
    Terminal(String),
}

impl ProviderError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, ProviderError::Retryable(_))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        // Connection-level failures may clear up; everything else is final.
        if e.is_connect() || e.is_timeout() || e.is_request() {
            ProviderError::Retryable(e.to_string())
        } else {
            ProviderError::Terminal(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_flag() {
        assert!(ProviderError::Retryable("429".into()).is_retryable());
        assert!(!ProviderError::Terminal("401".into()).is_retryable());
    }

    #[test]
    fn test_display_is_message() {
        let e = ProviderError::Terminal("API key not set".into());
        assert_eq!(e.to_string(), "API key not set");
    }
}
