//! Parsers for the compact flag grammars.
//!
//! | Flag | Entry format |
//! |---|---|
//! | `--groups` | `id=..` / `name=..` / `objectId=..` |
//! | `--rules-in`, `--rules-out` | `protocol;port;host[;group...]` |
//! | `--listeners` | `listenPort;protocol;forwardPort;forwardHost[;description]` |
//!
//! Every list is comma-separated; blank entries are skipped. The first
//! invalid entry rejects the whole list.

use std::num::IntErrorKind;

use crate::error::ParseError;
use crate::model::{FirewallRule, Group, Listener, ListenerProtocol, PortSpec, Protocol, RuleHost};

/// Non-blank, trimmed entries of a comma-separated list.
fn entries(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|e| !e.is_empty())
}

/// Parse a single `key=value` group reference.
pub fn parse_group(s: &str) -> Result<Group, ParseError> {
    s.parse()
}

/// Parse a comma-separated list of group references.
pub fn parse_groups(list: &str) -> Result<Vec<Group>, ParseError> {
    entries(list).map(parse_group).collect()
}

/// Parse a comma-separated list of firewall rules.
///
/// ```
/// use shieldoo_core::parse::parse_firewall_rules;
///
/// let rules = parse_firewall_rules("any;any;any, tcp;22;group;name=admins").unwrap();
/// assert_eq!(rules.len(), 2);
/// assert_eq!(rules[1].groups[0].value(), "admins");
/// ```
pub fn parse_firewall_rules(list: &str) -> Result<Vec<FirewallRule>, ParseError> {
    entries(list).map(parse_firewall_rule).collect()
}

/// Parse one `protocol;port;host[;group...]` rule.
pub fn parse_firewall_rule(rule: &str) -> Result<FirewallRule, ParseError> {
    let fields: Vec<&str> = rule.split(';').collect();
    let [protocol, port, host, groups @ ..] = fields.as_slice() else {
        return Err(ParseError::InvalidRule(rule.to_owned()));
    };

    let protocol: Protocol = protocol.parse()?;
    let port: PortSpec = port.parse()?;
    let host: RuleHost = host.parse()?;
    let groups = groups
        .iter()
        .map(|g| g.trim())
        .filter(|g| !g.is_empty())
        .map(parse_group)
        .collect::<Result<Vec<_>, _>>()?;

    if host == RuleHost::Group && groups.is_empty() {
        return Err(ParseError::MissingGroups(rule.to_owned()));
    }

    Ok(FirewallRule {
        protocol,
        port,
        host,
        groups,
    })
}

/// Parse a comma-separated list of listeners.
pub fn parse_listeners(list: &str) -> Result<Vec<Listener>, ParseError> {
    entries(list).map(parse_listener).collect()
}

/// Parse one `listenPort;protocol;forwardPort;forwardHost[;description]`
/// listener. Fields after the description are ignored.
pub fn parse_listener(entry: &str) -> Result<Listener, ParseError> {
    let fields: Vec<&str> = entry.split(';').collect();
    let [listen_port, protocol, forward_port, forward_host, rest @ ..] = fields.as_slice() else {
        return Err(ParseError::InvalidListener(entry.to_owned()));
    };

    let listen_port = listener_port("listener port", listen_port)?;
    let forward_port = listener_port("forward port", forward_port)?;
    let protocol: ListenerProtocol = protocol.parse()?;
    if forward_host.is_empty() {
        return Err(ParseError::EmptyForwardHost(entry.to_owned()));
    }

    Ok(Listener {
        listen_port,
        protocol,
        forward_port,
        forward_host: (*forward_host).to_owned(),
        description: rest.first().map(|d| (*d).to_owned()).unwrap_or_default(),
    })
}

/// Listener ports are plain integers; a non-number and an out-of-range
/// number are distinct errors.
fn listener_port(field: &'static str, token: &str) -> Result<u16, ParseError> {
    let out_of_range = || ParseError::PortOutOfRange {
        field,
        value: token.to_owned(),
    };

    match token.parse::<i64>() {
        Ok(n) => u16::try_from(n)
            .ok()
            .filter(|port| *port >= 1)
            .ok_or_else(out_of_range),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Err(out_of_range())
        }
        Err(_) => Err(ParseError::NotANumber {
            field,
            value: token.to_owned(),
        }),
    }
}
