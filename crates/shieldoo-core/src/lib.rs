//! Domain layer between `shieldoo-api` and the `shieldoo` CLI.
//!
//! - **[`model`]**: Resource types written to the API (`Firewall`,
//!   `FirewallRule`, `Server`, `Listener`) and the [`Group`] reference,
//!   a tagged variant over id / name / objectId.
//!
//! - **[`parse`]**: Parsers for the compact flag grammars: group lists,
//!   semicolon/comma firewall rule lists, and listener lists. Every token is
//!   validated; the first bad one rejects the whole list.
//!
//! - **[`Manager`]**: One method per CLI verb. `ensure` looks a resource up
//!   by name and PUTs over the first match or POSTs a new one; `show`
//!   unwraps single-element answers and reports empty ones as not found.

pub mod error;
pub mod manager;
pub mod model;
pub mod parse;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::{CoreError, ParseError};
pub use manager::{FirewallSelector, Lookup, Manager, single_document};
pub use model::{
    Firewall, FirewallRef, FirewallRule, Group, Listener, ListenerProtocol, PortSpec, Protocol,
    Resource, ResourceKind, ResourceRef, RuleHost, Server,
};
pub use parse::{parse_firewall_rules, parse_group, parse_groups, parse_listeners};
