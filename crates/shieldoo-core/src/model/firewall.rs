// ── Firewall domain types ──

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use super::group::Group;
use super::{Resource, ResourceKind};
use crate::error::ParseError;

/// Protocol a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Any,
    Icmp,
    Tcp,
    Udp,
}

impl FromStr for Protocol {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(Self::Any),
            "icmp" => Ok(Self::Icmp),
            "tcp" => Ok(Self::Tcp),
            "udp" => Ok(Self::Udp),
            other => Err(ParseError::InvalidProtocol(other.to_owned())),
        }
    }
}

/// Port selector: `any`, a single port, or an inclusive range.
///
/// Serialized in its textual form (`"any"`, `"80"`, `"16000-16999"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortSpec {
    Any,
    Single(u16),
    Range { start: u16, end: u16 },
}

impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Single(port) => write!(f, "{port}"),
            Self::Range { start, end } => write!(f, "{start}-{end}"),
        }
    }
}

impl Serialize for PortSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for PortSpec {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "any" {
            return Ok(Self::Any);
        }
        let invalid = || ParseError::InvalidPort(s.to_owned());

        match s.split_once('-') {
            Some((low, high)) => {
                let start = port_number(low).ok_or_else(invalid)?;
                let end = port_number(high).ok_or_else(invalid)?;
                if start > end {
                    return Err(ParseError::ReversedPortRange(s.to_owned()));
                }
                Ok(Self::Range { start, end })
            }
            None => port_number(s).map(Self::Single).ok_or_else(invalid),
        }
    }
}

/// Plain decimal 1..=65535: digits only, no sign, no leading zero.
fn port_number(s: &str) -> Option<u16> {
    if s.is_empty() || s.starts_with('0') || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Which peers a rule matches: everyone, or members of the listed groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleHost {
    Any,
    Group,
}

impl FromStr for RuleHost {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(Self::Any),
            "group" => Ok(Self::Group),
            other => Err(ParseError::InvalidHost(other.to_owned())),
        }
    }
}

/// A single inbound or outbound firewall rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FirewallRule {
    pub protocol: Protocol,
    pub port: PortSpec,
    pub host: RuleHost,
    pub groups: Vec<Group>,
}

impl FirewallRule {
    /// The `any;any;any` rule.
    pub fn allow_all() -> Self {
        Self {
            protocol: Protocol::Any,
            port: PortSpec::Any,
            host: RuleHost::Any,
            groups: Vec::new(),
        }
    }
}

/// Firewall -- named set of inbound and outbound rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Firewall {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub rules_in: Vec<FirewallRule>,
    pub rules_out: Vec<FirewallRule>,
}

impl Firewall {
    /// Build a firewall; an empty `rules_out` becomes a single allow-all rule.
    pub fn new(
        name: impl Into<String>,
        rules_in: Vec<FirewallRule>,
        mut rules_out: Vec<FirewallRule>,
    ) -> Self {
        if rules_out.is_empty() {
            rules_out.push(FirewallRule::allow_all());
        }
        Self {
            id: None,
            name: name.into(),
            rules_in,
            rules_out,
        }
    }
}

impl Resource for Firewall {
    const KIND: ResourceKind = ResourceKind::Firewall;

    fn name(&self) -> &str {
        &self.name
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}
