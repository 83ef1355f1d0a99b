use thiserror::Error;

use crate::rate_limit::RateLimitInfo;

/// Top-level error type for the `snipeit-api` crate.
///
/// Transport and decode failures are carried through unchanged; any
/// non-2xx response becomes [`Error::Status`] with the HTTP status code.
/// `snipeit-core` wraps these with connector context.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Access token can't be used as a header value.
    #[error("Invalid access token: {0}")]
    InvalidToken(String),

    // ── API ─────────────────────────────────────────────────────────
    /// Non-2xx response from Snipe-IT.
    #[error("Snipe-IT API error: {body} with statusCode: {status}")]
    Status {
        status: u16,
        body: String,
        rate_limit: Option<RateLimitInfo>,
    },

    /// Snipe-IT answered 2xx but reported `{"status": "error"}` in the body.
    #[error("Snipe-IT API error: {message}")]
    Api { message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// HTTP status code, if this error came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` for a 404 response.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` for a 429 response.
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }

    /// Rate-limit headers captured from the failing response.
    pub fn rate_limit(&self) -> Option<&RateLimitInfo> {
        match self {
            Self::Status { rate_limit, .. } => rate_limit.as_ref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_message_carries_code() {
        let err = Error::Status {
            status: 403,
            body: "Forbidden".into(),
            rate_limit: None,
        };
        assert_eq!(
            err.to_string(),
            "Snipe-IT API error: Forbidden with statusCode: 403"
        );
        assert_eq!(err.status(), Some(403));
        assert!(!err.is_not_found());
    }

    #[test]
    fn rate_limited_status_exposes_metadata() {
        let info = RateLimitInfo {
            limit: Some(120),
            remaining: Some(0),
            reset_at: None,
            retry_after_secs: Some(30),
        };
        let err = Error::Status {
            status: 429,
            body: String::new(),
            rate_limit: Some(info.clone()),
        };
        assert!(err.is_rate_limited());
        assert_eq!(err.rate_limit(), Some(&info));
    }

    #[test]
    fn non_status_errors_have_no_code() {
        let err = Error::Api {
            message: "The selected groups is invalid.".into(),
        };
        assert_eq!(err.status(), None);
        assert!(err.rate_limit().is_none());
    }
}
