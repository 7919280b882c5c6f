// ── Server domain types ──

use std::str::FromStr;

use serde::Serialize;

use super::group::Group;
use super::{Resource, ResourceKind};
use crate::error::ParseError;

/// Transport protocol a listener forwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListenerProtocol {
    Tcp,
    Udp,
}

impl FromStr for ListenerProtocol {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tcp" => Ok(Self::Tcp),
            "udp" => Ok(Self::Udp),
            other => Err(ParseError::InvalidProtocol(other.to_owned())),
        }
    }
}

/// Port forward published by a server: `listen_port` on the server is
/// forwarded to `forward_host:forward_port`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listener {
    pub listen_port: u16,
    pub protocol: ListenerProtocol,
    pub forward_port: u16,
    pub forward_host: String,
    pub description: String,
}

/// Firewall attached to a server. Only the id is sent on write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FirewallRef {
    pub id: String,
}

/// Server -- identified by name for ensure; the id is assigned remotely.
///
/// `autoupdate` is owned by the server side and never sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub groups: Vec<Group>,
    pub firewall: FirewallRef,
    pub listeners: Vec<Listener>,
    pub ip_address: String,
    pub description: String,
}

impl Resource for Server {
    const KIND: ResourceKind = ResourceKind::Server;

    fn name(&self) -> &str {
        &self.name
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}
