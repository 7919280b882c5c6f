//! Firewall command handlers.

use shieldoo_core::{Firewall, Manager, ResourceKind, parse_firewall_rules};

use crate::cli::{FirewallArgs, FirewallCommand, FirewallEnsureArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    manager: &Manager,
    args: FirewallArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        FirewallCommand::Ensure(args) => {
            let firewall = build_firewall(args)?;
            let body = manager.ensure_firewall(firewall).await?;
            output::print_response(global.output, &body)
        }
        FirewallCommand::List => util::list(manager, ResourceKind::Firewall, global).await,
        FirewallCommand::Show(args) => {
            util::show(manager, ResourceKind::Firewall, args, global).await
        }
        FirewallCommand::Delete(args) => util::delete(manager, ResourceKind::Firewall, args).await,
    }
}

/// Parse both rule lists; nothing is sent if either is malformed.
fn build_firewall(args: FirewallEnsureArgs) -> Result<Firewall, CliError> {
    let rules_in = util::parse_flag(
        "rules-in",
        parse_firewall_rules(args.rules_in.as_deref().unwrap_or_default()),
    )?;
    let rules_out = util::parse_flag(
        "rules-out",
        parse_firewall_rules(args.rules_out.as_deref().unwrap_or_default()),
    )?;
    Ok(Firewall::new(args.name, rules_in, rules_out))
}
