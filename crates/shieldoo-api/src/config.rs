// Explicit client configuration, built once at startup and handed to
// `ApiClient::new`. Replaces process-wide globals for the base URI and key.

use secrecy::SecretString;
use url::Url;

use crate::transport::TransportConfig;

/// Everything the API client needs to reach and authenticate against an
/// instance.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// API base URI, e.g. `https://demo.shieldoo.net`.
    pub base_url: Url,
    /// Shared secret used to sign per-call tokens.
    pub api_key: SecretString,
    pub transport: TransportConfig,
}

impl ApiConfig {
    pub fn new(base_url: Url, api_key: SecretString) -> Self {
        Self {
            base_url,
            api_key,
            transport: TransportConfig::default(),
        }
    }

    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }
}
