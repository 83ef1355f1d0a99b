//! CLI error types with miette diagnostics.
//!
//! Maps `ConnectorError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use snipeit_config::ConfigError;
use snipeit_core::ConnectorError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach Snipe-IT")]
    #[diagnostic(
        code(snipeit::connection_failed),
        help(
            "Check that the instance is reachable and the base URL is right.\n\
             Self-signed certificate? Use --insecure (-k) or set ca_cert in your profile."
        )
    )]
    ConnectionFailed {
        #[source]
        source: ConnectorError,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed")]
    #[diagnostic(
        code(snipeit::auth_failed),
        help(
            "Verify the personal access token (Snipe-IT: Account > Manage API Keys).\n\
             Store a new one with: snipeit config set-token --profile <name>"
        )
    )]
    AuthFailed {
        #[source]
        source: ConnectorError,
    },

    #[error("No access token configured for profile '{profile}'")]
    #[diagnostic(
        code(snipeit::no_credentials),
        help(
            "Store one with: snipeit config set-token\n\
             Or set the SNIPEIT_ACCESS_TOKEN environment variable."
        )
    )]
    NoCredentials { profile: String },

    #[error("Access denied")]
    #[diagnostic(
        code(snipeit::permission_denied),
        help("The token's user needs permission to view users and groups.")
    )]
    PermissionDenied {
        #[source]
        source: ConnectorError,
    },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(snipeit::not_found),
        help("Run: snipeit resources {resource_type} to see what exists")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
    },

    #[error("Rate limited by Snipe-IT")]
    #[diagnostic(code(snipeit::rate_limited), help("{hint}"))]
    RateLimited {
        hint: String,
        #[source]
        source: ConnectorError,
    },

    #[error(transparent)]
    #[diagnostic(code(snipeit::connector))]
    Connector(ConnectorError),

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(snipeit::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("No Snipe-IT instance configured")]
    #[diagnostic(
        code(snipeit::no_config),
        help(
            "Pass --base-url and set SNIPEIT_ACCESS_TOKEN, or add a profile to\n\
             {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(snipeit::config))]
    Config(ConfigError),

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::PermissionDenied { .. } => exit_code::PERMISSION,
            Self::Validation { .. } | Self::NoConfig { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── ConnectorError → CliError mapping ───────────────────────────────

impl From<ConnectorError> for CliError {
    fn from(err: ConnectorError) -> Self {
        if err.is_transport() {
            return Self::ConnectionFailed { source: err };
        }

        match err.status() {
            Some(401) => return Self::AuthFailed { source: err },
            Some(403) => return Self::PermissionDenied { source: err },
            Some(429) => {
                let hint = err
                    .rate_limit()
                    .and_then(|rl| rl.retry_after_secs)
                    .map_or_else(
                        || "Wait for the rate-limit window to reset and retry.".to_owned(),
                        |secs| format!("Retry in {secs}s."),
                    );
                return Self::RateLimited { hint, source: err };
            }
            _ => {}
        }

        match err {
            ConnectorError::UnknownResourceType(_)
            | ConnectorError::NotProvisionable(_)
            | ConnectorError::InvalidResourceId { .. }
            | ConnectorError::UnsupportedPrincipal { .. }
            | ConnectorError::Config { .. } => Self::Validation {
                field: "input".into(),
                reason: err.to_string(),
            },
            other => Self::Connector(other),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}
