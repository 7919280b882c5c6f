// ── Domain model ──
//
// Write-side resource types sent to the API, plus the minimal read-side
// view used to resolve names to ids.

mod firewall;
mod group;
mod server;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use firewall::{Firewall, FirewallRule, PortSpec, Protocol, RuleHost};
pub use group::Group;
pub use server::{FirewallRef, Listener, ListenerProtocol, Server};

/// The REST collections exposed under `/cliapi/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Server,
    Firewall,
    Group,
}

impl ResourceKind {
    /// Collection path segment.
    pub fn path(self) -> &'static str {
        match self {
            Self::Server => "servers",
            Self::Firewall => "firewalls",
            Self::Group => "groups",
        }
    }

    /// Capitalised name for user-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Server => "Server",
            Self::Firewall => "Firewall",
            Self::Group => "Group",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Server => "server",
            Self::Firewall => "firewall",
            Self::Group => "group",
        })
    }
}

/// A resource that can be ensured (looked up by name, then created or
/// updated in place).
pub trait Resource: Serialize {
    const KIND: ResourceKind;

    fn name(&self) -> &str;

    /// Adopt the id of the existing resource being replaced.
    fn set_id(&mut self, id: String);
}

/// Just enough of a returned resource to address it again.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceRef {
    #[serde(default)]
    pub id: String,
}
