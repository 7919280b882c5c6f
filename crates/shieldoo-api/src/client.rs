// CLI API HTTP client
//
// Wraps `reqwest::Client` with `/cliapi/` URL construction and per-call
// token signing. One method call is exactly one HTTP request: no retries,
// no caching, and every request gets a freshly issued token.

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use tracing::{debug, trace};
use url::Url;
use url::form_urlencoded::byte_serialize;

use crate::auth::TokenIssuer;
use crate::config::ApiConfig;
use crate::error::Error;

/// Header carrying the signed token.
const AUTH_HEADER: &str = "AuthToken";

/// Path segment every resource collection lives under.
const API_PREFIX: &str = "cliapi";

/// Raw HTTP client for the CLI management API.
///
/// Responses are returned as text; decoding is left to the caller so the
/// exact bytes the server sent can still be printed verbatim.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    tokens: TokenIssuer,
}

impl ApiClient {
    /// Create a client from an [`ApiConfig`].
    ///
    /// The token issuer's instance claim is taken from the hostname of
    /// `config.base_url`.
    pub fn new(config: &ApiConfig) -> Result<Self, Error> {
        let http = config.transport.build_client()?;
        let tokens = TokenIssuer::for_base_url(config.api_key.clone(), &config.base_url);
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            tokens,
        })
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, tokens: TokenIssuer) -> Self {
        Self {
            http,
            base_url,
            tokens,
        }
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build `{base}/cliapi/{entity}[/{id}][?name={name}]`.
    ///
    /// Empty `id`/`name` are treated as absent. Both are form-encoded, so a
    /// space becomes `+` and `:` becomes `%3A`.
    pub fn endpoint_url(
        &self,
        entity: &str,
        name: Option<&str>,
        id: Option<&str>,
    ) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let entity = entity.trim_start_matches('/');
        let mut full = format!("{base}/{API_PREFIX}/{entity}");

        if let Some(id) = id.filter(|id| !id.is_empty()) {
            full.push('/');
            full.extend(byte_serialize(id.as_bytes()));
        }
        if let Some(name) = name.filter(|name| !name.is_empty()) {
            full.push_str("?name=");
            full.extend(byte_serialize(name.as_bytes()));
        }

        Ok(Url::parse(&full)?)
    }

    // ── Request ──────────────────────────────────────────────────────

    /// Issue one request and return the trimmed response body.
    ///
    /// `body`, when present, is sent as JSON; otherwise the payload is
    /// empty. Any status other than 200 yields [`Error::Api`] carrying the
    /// status and the untrimmed body.
    pub async fn call<B: Serialize + ?Sized>(
        &self,
        method: Method,
        entity: &str,
        name: Option<&str>,
        id: Option<&str>,
        body: Option<&B>,
    ) -> Result<String, Error> {
        let mut token = HeaderValue::from_str(&self.tokens.issue()?)?;
        token.set_sensitive(true);

        let url = self.endpoint_url(entity, name, id)?;
        let payload = body.map(serde_json::to_vec).transpose()?;

        debug!("{method} {url}");

        let mut request = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTH_HEADER, token);
        if let Some(bytes) = payload {
            request = request.body(bytes);
        }

        let resp = request.send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        trace!(%status, body = %text, "response received");

        if status != StatusCode::OK {
            return Err(Error::Api { status, body: text });
        }

        Ok(text.trim().to_owned())
    }

    // ── Verb helpers ─────────────────────────────────────────────────

    /// GET a collection, optionally filtered by name and/or addressed by id.
    pub async fn get(
        &self,
        entity: &str,
        name: Option<&str>,
        id: Option<&str>,
    ) -> Result<String, Error> {
        self.call::<()>(Method::GET, entity, name, id, None).await
    }

    /// POST a new resource.
    pub async fn post<B: Serialize + ?Sized>(&self, entity: &str, body: &B) -> Result<String, Error> {
        self.call(Method::POST, entity, None, None, Some(body)).await
    }

    /// PUT a replacement for the resource with `id`.
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        entity: &str,
        id: &str,
        body: &B,
    ) -> Result<String, Error> {
        self.call(Method::PUT, entity, None, Some(id), Some(body))
            .await
    }

    /// DELETE the resource with `id`.
    pub async fn delete(&self, entity: &str, id: &str) -> Result<String, Error> {
        self.call::<()>(Method::DELETE, entity, None, Some(id), None)
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn client(base: &str) -> ApiClient {
        let base_url = Url::parse(base).unwrap();
        let tokens = TokenIssuer::for_base_url(SecretString::from("k"), &base_url);
        ApiClient::with_client(reqwest::Client::new(), base_url, tokens)
    }

    #[test]
    fn url_for_collection() {
        let url = client("https://demo.shieldoo.net")
            .endpoint_url("servers", None, None)
            .unwrap();
        assert_eq!(url.as_str(), "https://demo.shieldoo.net/cliapi/servers");
    }

    #[test]
    fn url_strips_duplicate_slashes() {
        let url = client("https://demo.shieldoo.net/")
            .endpoint_url("/firewalls", None, None)
            .unwrap();
        assert_eq!(url.as_str(), "https://demo.shieldoo.net/cliapi/firewalls");
    }

    #[test]
    fn url_encodes_id_segment() {
        let url = client("https://demo.shieldoo.net")
            .endpoint_url("groups", None, Some("demo.shieldoo.net:groups:1"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://demo.shieldoo.net/cliapi/groups/demo.shieldoo.net%3Agroups%3A1"
        );
    }

    #[test]
    fn url_encodes_name_query() {
        let url = client("https://demo.shieldoo.net")
            .endpoint_url("servers", Some("web 01&x"), None)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://demo.shieldoo.net/cliapi/servers?name=web+01%26x"
        );
    }

    #[test]
    fn url_combines_id_and_name() {
        let url = client("https://demo.shieldoo.net/api")
            .endpoint_url("servers", Some("web"), Some("42"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://demo.shieldoo.net/api/cliapi/servers/42?name=web"
        );
    }

    #[test]
    fn empty_id_and_name_are_ignored() {
        let url = client("https://demo.shieldoo.net")
            .endpoint_url("servers", Some(""), Some(""))
            .unwrap();
        assert_eq!(url.as_str(), "https://demo.shieldoo.net/cliapi/servers");
    }
}
