// ── Core error types ──
//
// Parse failures carry the offending token so the user can find it in a
// long flag value. API failures are wrapped, not flattened, so the CLI can
// still reach the raw response body.

use thiserror::Error;

use crate::model::ResourceKind;

/// A compact flag value (group, rule, or listener) failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid group format: {0}")]
    InvalidGroup(String),

    #[error("invalid rule format: {0}")]
    InvalidRule(String),

    #[error("invalid protocol: {0}")]
    InvalidProtocol(String),

    #[error("invalid port: {0}")]
    InvalidPort(String),

    #[error("invalid port range: {0} (start is greater than end)")]
    ReversedPortRange(String),

    #[error("invalid host: {0}")]
    InvalidHost(String),

    #[error("rule '{0}' uses host 'group' but lists no groups")]
    MissingGroups(String),

    #[error("invalid listener format: {0}")]
    InvalidListener(String),

    #[error("invalid {field}: '{value}' is not a number")]
    NotANumber { field: &'static str, value: String },

    #[error("invalid {field}: {value} is outside 1-65535")]
    PortOutOfRange { field: &'static str, value: String },

    #[error("invalid forward host in listener: {0}")]
    EmptyForwardHost(String),
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// An ensure or show was asked to act on an empty name and id.
    #[error("{kind} name or id must not be empty")]
    MissingIdentifier { kind: ResourceKind },

    #[error("{kind} '{identifier}' not found")]
    NotFound {
        kind: ResourceKind,
        identifier: String,
    },

    #[error("unexpected response while looking up {kind}: {message}")]
    Decode {
        kind: ResourceKind,
        message: String,
        body: String,
    },

    #[error(transparent)]
    Api(#[from] shieldoo_api::Error),
}
