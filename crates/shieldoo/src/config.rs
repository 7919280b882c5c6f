//! CLI configuration.
//!
//! Values are layered with figment: built-in defaults, then
//! `config.toml`, then `SHIELDOO_TIMEOUT`, then the `--uri` / `--api-key` /
//! `--timeout` flags. `SHIELDOO_URI` and `SHIELDOO_APIKEY` arrive through
//! clap as the flags' env fallback, so they stay raw strings.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use shieldoo_api::{ApiConfig, TransportConfig};
use url::Url;

use crate::cli::GlobalOpts;
use crate::error::CliError;

const ENV_PREFIX: &str = "SHIELDOO_";

// ── Config structs ──────────────────────────────────────────────────

/// Resolved settings from every configuration layer.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Base URI of the management API.
    pub uri: Option<String>,
    /// Shared secret used to sign request tokens.
    pub apikey: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            uri: None,
            apikey: None,
            timeout: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

/// Flag values (including their env fallbacks); unset flags leave lower
/// layers untouched.
#[derive(Debug, Default, Serialize)]
struct FlagOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    apikey: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout: Option<u64>,
}

impl From<&GlobalOpts> for FlagOverrides {
    fn from(global: &GlobalOpts) -> Self {
        Self {
            uri: global.uri.clone(),
            apikey: global.api_key.clone(),
            timeout: global.timeout,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "shieldoo", "shieldoo").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("shieldoo");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Loading ─────────────────────────────────────────────────────────

/// Load config from `path` (missing file is fine), environment, and flags.
pub fn load_config_from(path: &Path, global: &GlobalOpts) -> Result<Config, CliError> {
    let config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).only(&["timeout"]))
        .merge(Serialized::defaults(FlagOverrides::from(global)))
        .extract()?;
    Ok(config)
}

/// Build the API client configuration for this invocation.
pub fn resolve_api_config(global: &GlobalOpts) -> Result<ApiConfig, CliError> {
    let path = config_path();
    let config = load_config_from(&path, global)?;
    config.into_api_config(&path)
}

impl Config {
    /// Validate the merged values and turn them into an [`ApiConfig`].
    pub fn into_api_config(self, path: &Path) -> Result<ApiConfig, CliError> {
        let missing = |key, flag, env| CliError::MissingConfig {
            key,
            flag,
            env,
            path: path.display().to_string(),
        };

        let uri = self
            .uri
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| missing("uri", "uri", "SHIELDOO_URI"))?;
        let apikey = self
            .apikey
            .filter(|v| !v.is_empty())
            .ok_or_else(|| missing("apikey", "api-key", "SHIELDOO_APIKEY"))?;

        let base_url = Url::parse(uri.trim()).map_err(|e| CliError::Validation {
            field: "uri".into(),
            reason: format!("invalid URL '{uri}': {e}"),
        })?;
        if base_url.cannot_be_a_base() || base_url.host().is_none() {
            return Err(CliError::Validation {
                field: "uri".into(),
                reason: format!("'{uri}' is not an absolute http(s) URL"),
            });
        }

        if self.timeout == 0 {
            return Err(CliError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        let transport = TransportConfig::default().with_timeout(Duration::from_secs(self.timeout));

        Ok(ApiConfig::new(base_url, SecretString::from(apikey)).with_transport(transport))
    }
}
