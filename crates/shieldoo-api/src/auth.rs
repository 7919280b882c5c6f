//! Per-call token issuing.
//!
//! Every request to `/cliapi/` carries a freshly signed JWT in the
//! `AuthToken` header. The token names the API instance (the hostname of
//! the configured base URI) and expires ten minutes after it is issued.
//! Signing uses HMAC-SHA-512 with the shared API key.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use url::{Host, Url};

use crate::error::Error;

/// How long an issued token stays valid, in minutes.
const TOKEN_LIFETIME_MINUTES: i64 = 10;

/// Claims carried by every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Expiration time (Unix timestamp).
    pub exp: i64,
    /// Custom claim map, keyed `shieldoo` on the wire.
    pub shieldoo: InstanceClaim,
}

/// The `{"instance": ...}` map nested under the `shieldoo` claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceClaim {
    pub instance: String,
}

/// Signs short-lived tokens for a single API instance.
///
/// Built once per process from [`ApiConfig`](crate::ApiConfig); the secret
/// is only exposed for the duration of a signing call.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    key: SecretString,
    instance: String,
}

impl TokenIssuer {
    pub fn new(key: SecretString, instance: impl Into<String>) -> Self {
        Self {
            key,
            instance: instance.into(),
        }
    }

    /// Issuer whose instance claim is the hostname of `base_url`.
    pub fn for_base_url(key: SecretString, base_url: &Url) -> Self {
        Self::new(key, hostname(base_url))
    }

    /// Claims for a token issued right now.
    pub fn claims(&self) -> Claims {
        let exp = Utc::now() + Duration::minutes(TOKEN_LIFETIME_MINUTES);
        Claims {
            exp: exp.timestamp(),
            shieldoo: InstanceClaim {
                instance: self.instance.clone(),
            },
        }
    }

    /// Sign a fresh token. No caching: callers get a new token every time.
    pub fn issue(&self) -> Result<String, Error> {
        let key = EncodingKey::from_secret(self.key.expose_secret().as_bytes());
        let token = encode(&Header::new(Algorithm::HS512), &self.claims(), &key)?;
        Ok(token)
    }
}

/// Hostname without port; IPv6 literals lose their brackets.
fn hostname(url: &Url) -> String {
    match url.host() {
        Some(Host::Ipv6(addr)) => addr.to_string(),
        Some(host) => host.to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use jsonwebtoken::{DecodingKey, Validation, decode};

    use super::*;

    const SECRET: &str = "asdfghjklpoiuztrewq";

    fn issuer() -> TokenIssuer {
        let url = Url::parse("https://demo.shieldoo.net:8443/base").unwrap();
        TokenIssuer::for_base_url(SecretString::from(SECRET), &url)
    }

    #[test]
    fn token_round_trips_with_shared_secret() {
        let token = issuer().issue().unwrap();

        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(SECRET.as_bytes()),
            &Validation::new(Algorithm::HS512),
        )
        .unwrap();

        assert_eq!(data.header.alg, Algorithm::HS512);
        assert_eq!(data.claims.shieldoo.instance, "demo.shieldoo.net");

        let remaining = data.claims.exp - Utc::now().timestamp();
        assert!((590..=600).contains(&remaining), "exp is {remaining}s away");
    }

    #[test]
    fn token_rejected_under_another_secret() {
        let token = issuer().issue().unwrap();

        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"some-other-secret"),
            &Validation::new(Algorithm::HS512),
        );
        assert!(result.is_err());
    }

    #[test]
    fn claims_serialize_under_shieldoo_key() {
        let claims = issuer().claims();
        let value = serde_json::to_value(&claims).unwrap();

        assert_eq!(value["shieldoo"]["instance"], "demo.shieldoo.net");
        assert!(value["exp"].is_i64());
    }

    #[test]
    fn instance_extraction() {
        let instance = |uri: &str| hostname(&Url::parse(uri).unwrap());
        assert_eq!(instance("https://demo.shieldoo.net"), "demo.shieldoo.net");
        assert_eq!(instance("https://demo.shieldoo.net:8443/api/"), "demo.shieldoo.net");
        assert_eq!(instance("http://10.0.0.5:8080"), "10.0.0.5");
        assert_eq!(instance("http://[::1]:8080"), "::1");
        assert_eq!(instance("unix:/run/shieldoo.sock"), "");
    }
}
