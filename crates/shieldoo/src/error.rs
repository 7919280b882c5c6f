//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `shieldoo_api::Error` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use shieldoo_api::Error as ApiError;
use shieldoo_core::{CoreError, ParseError, ResourceKind};

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────

    #[error("No API {key} configured")]
    #[diagnostic(
        code(shieldoo::missing_config),
        help(
            "Pass --{flag}, set {env}, or add `{key} = \"...\"` to\n\
             {path}"
        )
    )]
    MissingConfig {
        key: &'static str,
        flag: &'static str,
        env: &'static str,
        path: String,
    },

    #[error(transparent)]
    #[diagnostic(code(shieldoo::config))]
    Config(Box<figment::Error>),

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for --{field}: {reason}")]
    #[diagnostic(code(shieldoo::validation))]
    Validation { field: String, reason: String },

    #[error("A {kind} name or id is required")]
    #[diagnostic(code(shieldoo::validation), help("Pass a non-empty --name or --id."))]
    MissingIdentifier { kind: ResourceKind },

    #[error(transparent)]
    #[diagnostic(code(shieldoo::validation))]
    Parse(ParseError),

    // ── Resources ────────────────────────────────────────────────────

    #[error("{label} not found")]
    #[diagnostic(
        code(shieldoo::not_found),
        help("Nothing matched '{identifier}'. Run: shieldoo {command} list")
    )]
    NotFound {
        label: &'static str,
        identifier: String,
        command: String,
    },

    #[error("Firewall '{name}' not found")]
    #[diagnostic(
        code(shieldoo::firewall_not_found),
        help(
            "Create it first with: shieldoo firewall ensure --name {name}\n\
             or attach an existing firewall with --firewall-id."
        )
    )]
    FirewallNotFound { name: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("API request failed: {status}")]
    #[diagnostic(code(shieldoo::api_error), help("{body}"))]
    Api { status: String, body: String },

    #[error("Unexpected response from the API: {message}")]
    #[diagnostic(code(shieldoo::unexpected_response), help("Response body: {body}"))]
    UnexpectedResponse { message: String, body: String },

    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the management API")]
    #[diagnostic(
        code(shieldoo::connection_failed),
        help("Check that the API is running and that --uri / SHIELDOO_URI is correct.")
    )]
    ConnectionFailed {
        #[source]
        source: ApiError,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(shieldoo::timeout),
        help("Increase the timeout with --timeout or check API responsiveness.")
    )]
    Timeout {
        #[source]
        source: ApiError,
    },

    #[error("Failed to sign the request token")]
    #[diagnostic(
        code(shieldoo::token),
        help("Check the API key set with --api-key or SHIELDOO_APIKEY.")
    )]
    Token {
        #[source]
        source: ApiError,
    },

    #[error(transparent)]
    #[diagnostic(code(shieldoo::request))]
    Request(ApiError),

    // ── Serialization ────────────────────────────────────────────────

    #[error("Failed to render JSON output: {0}")]
    #[diagnostic(code(shieldoo::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML output: {0}")]
    #[diagnostic(code(shieldoo::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Exit code for process termination. Every failure exits 1.
    #[allow(clippy::unused_self)]
    pub fn exit_code(&self) -> i32 {
        exit_code::FAILURE
    }
}

// ── Library error mapping ────────────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Parse(e) => Self::Parse(e),

            CoreError::MissingIdentifier { kind } => Self::MissingIdentifier { kind },

            CoreError::NotFound { kind, identifier } => Self::NotFound {
                label: kind.label(),
                identifier,
                command: kind.to_string(),
            },

            CoreError::Decode {
                kind,
                message,
                body,
            } => Self::UnexpectedResponse {
                message: format!("{kind} lookup: {message}"),
                body,
            },

            CoreError::Api(e) => e.into(),
        }
    }
}

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Api { status, body } => Self::Api {
                status: format!("HTTP {status}"),
                body: if body.is_empty() {
                    "(empty response body)".into()
                } else {
                    body
                },
            },
            source @ ApiError::Transport(_) if source.is_timeout() => Self::Timeout { source },
            source @ ApiError::Transport(_) => Self::ConnectionFailed { source },
            source @ ApiError::Token(_) => Self::Token { source },
            other => Self::Request(other),
        }
    }
}
