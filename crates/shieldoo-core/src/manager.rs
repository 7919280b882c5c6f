// ── Manager ──
//
// Command sequences over the API client. Each public method is one CLI
// verb: a short, linear run of API calls (at most three) with no state
// kept between invocations. Nothing is sent until every input has been
// parsed, and a failed step stops the sequence.

use std::fmt;

use serde_json::value::RawValue;
use shieldoo_api::ApiClient;
use tracing::{debug, info};

use crate::error::CoreError;
use crate::model::{Firewall, FirewallRef, Resource, ResourceKind, ResourceRef, Server};

/// How `show` addresses a resource: by name (query), by id (path), or both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lookup {
    pub name: Option<String>,
    pub id: Option<String>,
}

impl Lookup {
    /// Drop empty parts; `None` if nothing is left to look up by.
    fn non_empty(&self) -> Option<(Option<&str>, Option<&str>)> {
        let name = self.name.as_deref().filter(|n| !n.is_empty());
        let id = self.id.as_deref().filter(|i| !i.is_empty());
        (name.is_some() || id.is_some()).then_some((name, id))
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            id: None,
        }
    }

    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            name: None,
            id: Some(id.into()),
        }
    }
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.name, &self.id) {
            (Some(name), Some(id)) => write!(f, "{name} ({id})"),
            (Some(value), None) | (None, Some(value)) => f.write_str(value),
            (None, None) => Ok(()),
        }
    }
}

/// Which firewall a server should use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FirewallSelector {
    Id(String),
    /// Resolved to an id with a name lookup before the server is written.
    Name(String),
}

/// Runs CLI verbs against the management API.
pub struct Manager {
    client: ApiClient,
}

impl Manager {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    // ── Lookups ──────────────────────────────────────────────────────

    /// Id of the first resource of `kind` named `name`, if any.
    ///
    /// Later matches are ignored; a `null` answer counts as no match.
    pub async fn find_id(&self, kind: ResourceKind, name: &str) -> Result<Option<String>, CoreError> {
        let body = self.client.get(kind.path(), Some(name), None).await?;

        let matches: Option<Vec<ResourceRef>> =
            serde_json::from_str(&body).map_err(|e| CoreError::Decode {
                kind,
                message: e.to_string(),
                body: body.clone(),
            })?;
        let matches = matches.unwrap_or_default();

        if matches.len() > 1 {
            debug!(%kind, name, count = matches.len(), "name is ambiguous, using first match");
        }
        Ok(matches.into_iter().next().map(|r| r.id))
    }

    /// Turn a [`FirewallSelector`] into a firewall id.
    pub async fn resolve_firewall(&self, selector: &FirewallSelector) -> Result<String, CoreError> {
        match selector {
            FirewallSelector::Id(id) | FirewallSelector::Name(id) if id.is_empty() => {
                Err(CoreError::MissingIdentifier {
                    kind: ResourceKind::Firewall,
                })
            }
            FirewallSelector::Id(id) => Ok(id.clone()),
            FirewallSelector::Name(name) => self
                .find_id(ResourceKind::Firewall, name)
                .await?
                .ok_or_else(|| CoreError::NotFound {
                    kind: ResourceKind::Firewall,
                    identifier: name.clone(),
                }),
        }
    }

    // ── Ensure ───────────────────────────────────────────────────────

    /// Create `resource`, or replace the first existing one with its name.
    ///
    /// Returns the API's response text unchanged.
    pub async fn ensure<R: Resource>(&self, mut resource: R) -> Result<String, CoreError> {
        let kind = R::KIND;
        let name = resource.name().to_owned();
        if name.is_empty() {
            return Err(CoreError::MissingIdentifier { kind });
        }

        if let Some(id) = self.find_id(kind, &name).await? {
            info!(%kind, %name, %id, "updating existing resource");
            resource.set_id(id.clone());
            Ok(self.client.put(kind.path(), &id, &resource).await?)
        } else {
            info!(%kind, %name, "creating resource");
            Ok(self.client.post(kind.path(), &resource).await?)
        }
    }

    pub async fn ensure_firewall(&self, firewall: Firewall) -> Result<String, CoreError> {
        self.ensure(firewall).await
    }

    /// Resolve the server's firewall, then ensure the server.
    ///
    /// `server.firewall` is overwritten with the resolved id.
    pub async fn ensure_server(
        &self,
        mut server: Server,
        firewall: &FirewallSelector,
    ) -> Result<String, CoreError> {
        let id = self.resolve_firewall(firewall).await?;
        server.firewall = FirewallRef { id };
        self.ensure(server).await
    }

    // ── Read / delete ────────────────────────────────────────────────

    /// Raw listing of a collection.
    pub async fn list(&self, kind: ResourceKind) -> Result<String, CoreError> {
        Ok(self.client.get(kind.path(), None, None).await?)
    }

    /// Fetch one resource for display.
    ///
    /// Empty, `null`, and `[]` answers are [`CoreError::NotFound`]; a
    /// one-element array is unwrapped to its element. Empty name and id
    /// count as absent, and at least one must remain.
    pub async fn show(&self, kind: ResourceKind, lookup: &Lookup) -> Result<String, CoreError> {
        let (name, id) = lookup
            .non_empty()
            .ok_or(CoreError::MissingIdentifier { kind })?;
        let body = self.client.get(kind.path(), name, id).await?;

        single_document(&body).ok_or_else(|| CoreError::NotFound {
            kind,
            identifier: lookup.to_string(),
        })
    }

    pub async fn delete(&self, kind: ResourceKind, id: &str) -> Result<(), CoreError> {
        self.client.delete(kind.path(), id).await?;
        info!(%kind, id, "deleted");
        Ok(())
    }
}

/// Reduce a show response to the document worth printing.
///
/// A one-element JSON array yields that element's exact text; longer
/// arrays and non-array bodies are returned as-is.
pub fn single_document(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() || body == "null" {
        return None;
    }

    match serde_json::from_str::<Vec<&RawValue>>(body) {
        Ok(items) => match items.as_slice() {
            [] => None,
            [only] => Some(only.get().to_owned()),
            _ => Some(body.to_owned()),
        },
        Err(_) => Some(body.to_owned()),
    }
}
