// ── Connector error types ──
//
// Everything the connector hands back to the host goes through
// `ConnectorError`, and every variant renders with the
// `snipe-it-connector:` prefix. API failures keep their source so status
// codes and rate-limit metadata stay reachable.

use std::num::ParseIntError;

use thiserror::Error;

use snipeit_api::RateLimitInfo;

const PREFIX: &str = "snipe-it-connector";

/// Unified error type for the connector crate.
#[derive(Debug, Error)]
pub enum ConnectorError {
    // ── Upstream API ─────────────────────────────────────────────────
    #[error("{PREFIX}: {context}: {source}")]
    Api {
        context: &'static str,
        #[source]
        source: snipeit_api::Error,
    },

    // ── Domain validation ────────────────────────────────────────────
    #[error("{PREFIX}: invalid permission: {permission}")]
    InvalidPermission { permission: String },

    #[error("{PREFIX}: failed to parse {kind} id '{id}'")]
    InvalidResourceId {
        kind: &'static str,
        id: String,
        #[source]
        source: ParseIntError,
    },

    #[error("{PREFIX}: only users can be {action} groups, got principal of type '{principal_type}'")]
    UnsupportedPrincipal {
        action: &'static str,
        principal_type: String,
        principal_id: String,
    },

    #[error("{PREFIX}: unknown resource type '{0}'")]
    UnknownResourceType(String),

    #[error("{PREFIX}: resource type '{0}' does not support grant or revoke")]
    NotProvisionable(String),

    // ── Pagination ───────────────────────────────────────────────────
    #[error("{PREFIX}: invalid page token: {0}")]
    PageToken(#[from] serde_json::Error),

    #[error("{PREFIX}: page token belongs to resource type '{found}', expected '{expected}'")]
    PageTokenMismatch { expected: String, found: String },

    #[error("{PREFIX}: page token offset {offset} is out of range")]
    PageOffsetOverflow { offset: u64 },

    // ── Configuration ────────────────────────────────────────────────
    #[error("{PREFIX}: invalid configuration: {message}")]
    Config { message: String },
}

impl ConnectorError {
    /// HTTP status of the underlying API failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { source, .. } => source.status(),
            _ => None,
        }
    }

    /// `true` when the request never got an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Api {
                source: snipeit_api::Error::Transport(_) | snipeit_api::Error::Tls(_),
                ..
            }
        )
    }

    /// Rate-limit metadata reported alongside the failing response.
    pub fn rate_limit(&self) -> Option<&RateLimitInfo> {
        match self {
            Self::Api { source, .. } => source.rate_limit(),
            _ => None,
        }
    }

    pub(crate) fn invalid_id(kind: &'static str, id: &str, source: ParseIntError) -> Self {
        Self::InvalidResourceId {
            kind,
            id: id.to_owned(),
            source,
        }
    }
}

/// Attach connector context to an API result.
pub trait Context<T> {
    fn context(self, context: &'static str) -> Result<T, ConnectorError>;
}

impl<T> Context<T> for Result<T, snipeit_api::Error> {
    fn context(self, context: &'static str) -> Result<T, ConnectorError> {
        self.map_err(|source| ConnectorError::Api { context, source })
    }
}
