//! Server command handlers.

use shieldoo_core::{
    CoreError, FirewallRef, FirewallSelector, Manager, ResourceKind, Server, parse_groups,
    parse_listeners,
};

use crate::cli::{GlobalOpts, ServerArgs, ServerCommand, ServerEnsureArgs};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    manager: &Manager,
    args: ServerArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ServerCommand::Ensure(args) => {
            let (server, firewall) = build_server(args)?;
            let body = manager
                .ensure_server(server, &firewall)
                .await
                .map_err(|err| match err {
                    CoreError::NotFound {
                        kind: ResourceKind::Firewall,
                        identifier,
                    } => CliError::FirewallNotFound { name: identifier },
                    other => other.into(),
                })?;
            output::print_response(global.output, &body)
        }
        ServerCommand::List => util::list(manager, ResourceKind::Server, global).await,
        ServerCommand::Show(args) => util::show(manager, ResourceKind::Server, args, global).await,
        ServerCommand::Delete(args) => util::delete(manager, ResourceKind::Server, args).await,
    }
}

/// Validate every flag before any request is made.
///
/// The firewall id is filled in by the manager once the selector resolves.
/// An empty firewall id or name counts as not given.
fn build_server(args: ServerEnsureArgs) -> Result<(Server, FirewallSelector), CliError> {
    let firewall_id = args.firewall_id.filter(|id| !id.is_empty());
    let firewall_name = args.firewall_name.filter(|name| !name.is_empty());
    let firewall = match (firewall_id, firewall_name) {
        (Some(id), _) => FirewallSelector::Id(id),
        (None, Some(name)) => FirewallSelector::Name(name),
        (None, None) => {
            return Err(CliError::Validation {
                field: "firewall-id".into(),
                reason: "one of --firewall-id or --firewall-name is required".into(),
            });
        }
    };

    let groups = util::parse_flag(
        "groups",
        parse_groups(args.groups.as_deref().unwrap_or_default()),
    )?;
    let listeners = util::parse_flag(
        "listeners",
        parse_listeners(args.listeners.as_deref().unwrap_or_default()),
    )?;

    let server = Server {
        id: None,
        name: args.name,
        groups,
        firewall: FirewallRef { id: String::new() },
        listeners,
        ip_address: args.ip.unwrap_or_default(),
        description: args.description.unwrap_or_default(),
    };
    Ok((server, firewall))
}
