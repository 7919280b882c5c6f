use reqwest::StatusCode;
use thiserror::Error;

/// Top-level error type for the `shieldoo-api` crate.
///
/// `shieldoo-core` wraps these and the CLI maps them into user-facing
/// diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The per-call token could not be signed with the shared secret.
    #[error("Failed to sign authentication token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A signed token could not be used as a header value.
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// Building the `reqwest::Client` failed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── Data ────────────────────────────────────────────────────────
    /// The request payload could not be serialized to JSON.
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    // ── API ─────────────────────────────────────────────────────────
    /// Any response other than HTTP 200. The raw body is kept because the
    /// API puts its explanation there.
    #[error("HTTP {status}")]
    Api { status: StatusCode, body: String },
}

impl Error {
    /// The HTTP status of a rejected call, if this is an API error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// The raw response body returned alongside a non-200 status.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::Api { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Returns `true` if the API answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Returns `true` if the request timed out in the transport.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}
