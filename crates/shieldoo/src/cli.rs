//! Clap derive structures for the `shieldoo` CLI.
//!
//! Defines the command tree, global flags, and shared argument types.

use clap::builder::NonEmptyStringValueParser;
use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// shieldoo -- manage Shieldoo servers, firewalls, and groups
#[derive(Debug, Parser)]
#[command(
    name = "shieldoo",
    version,
    about = "Manage Shieldoo servers, firewalls, and groups from the command line",
    long_about = "Command-line client for the Shieldoo management API.\n\n\
        Every request is signed with a short-lived token derived from the\n\
        shared API key. Configure the API with --uri/--api-key, the\n\
        SHIELDOO_URI/SHIELDOO_APIKEY environment variables, or config.toml.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Base URI of the management API (overrides the config file)
    #[arg(long, env = "SHIELDOO_URI", global = true, value_name = "URI")]
    pub uri: Option<String>,

    /// Shared API key used to sign requests
    #[arg(
        long,
        env = "SHIELDOO_APIKEY",
        global = true,
        value_name = "KEY",
        hide_env = true
    )]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SHIELDOO_OUTPUT",
        default_value = "raw",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Response body exactly as the API sent it (default)
    Raw,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage servers
    #[command(alias = "srv")]
    Server(ServerArgs),

    /// Manage firewall configurations
    #[command(alias = "fw")]
    Firewall(FirewallArgs),

    /// Inspect user groups
    Group(GroupArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Arguments ─────────────────────────────────────────────────

/// Name and/or id of the resource to show.
#[derive(Debug, Args)]
#[command(group(
    ArgGroup::new("target")
        .args(["name", "id"])
        .required(true)
        .multiple(true)
))]
pub struct ShowArgs {
    /// Resource name (sent as the `name` query parameter)
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub name: Option<String>,

    /// Resource id
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub id: Option<String>,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Id of the resource to delete
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub id: String,
}

// ── Server ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ServerArgs {
    #[command(subcommand)]
    pub command: ServerCommand,
}

#[derive(Debug, Subcommand)]
pub enum ServerCommand {
    /// Create a server, or update the existing one with the same name
    Ensure(ServerEnsureArgs),

    /// List all servers
    #[command(alias = "ls")]
    List,

    /// Show a single server
    Show(ShowArgs),

    /// Delete a server
    #[command(alias = "rm")]
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
#[command(group(
    ArgGroup::new("firewall")
        .args(["firewall_id", "firewall_name"])
        .required(true)
        .multiple(true)
))]
pub struct ServerEnsureArgs {
    /// Server name
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub name: String,

    /// Comma-separated group references, e.g. "name=devs,id=42"
    #[arg(long, value_name = "GROUPS")]
    pub groups: Option<String>,

    /// IP address inside the overlay network
    #[arg(long)]
    pub ip: Option<String>,

    /// Comma-separated listeners:
    /// "listenPort;protocol;forwardPort;forwardHost[;description]"
    #[arg(long, value_name = "LISTENERS")]
    pub listeners: Option<String>,

    /// Id of the firewall to attach (wins over --firewall-name unless empty)
    #[arg(long)]
    pub firewall_id: Option<String>,

    /// Name of the firewall to attach
    #[arg(long)]
    pub firewall_name: Option<String>,

    /// Free-form description
    #[arg(long)]
    pub description: Option<String>,
}

// ── Firewall ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct FirewallArgs {
    #[command(subcommand)]
    pub command: FirewallCommand,
}

#[derive(Debug, Subcommand)]
pub enum FirewallCommand {
    /// Create a firewall, or update the existing one with the same name
    Ensure(FirewallEnsureArgs),

    /// List all firewalls
    #[command(alias = "ls")]
    List,

    /// Show a single firewall
    Show(ShowArgs),

    /// Delete a firewall
    #[command(alias = "rm")]
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
pub struct FirewallEnsureArgs {
    /// Firewall name
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub name: String,

    /// Inbound rules: "protocol;port;host[;group...]" joined by commas
    #[arg(long, value_name = "RULES")]
    pub rules_in: Option<String>,

    /// Outbound rules; defaults to "any;any;any"
    #[arg(long, value_name = "RULES")]
    pub rules_out: Option<String>,
}

// ── Group ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GroupArgs {
    #[command(subcommand)]
    pub command: GroupCommand,
}

#[derive(Debug, Subcommand)]
pub enum GroupCommand {
    /// List all groups
    #[command(alias = "ls")]
    List,

    /// Show a single group
    Show(ShowArgs),
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn empty_names_and_ids_are_rejected() {
        for args in [
            &["shieldoo", "firewall", "ensure", "--name", ""][..],
            &["shieldoo", "server", "ensure", "--name", "", "--firewall-id", "fw-1"][..],
            &["shieldoo", "server", "show", "--name", ""][..],
            &["shieldoo", "group", "show", "--id", ""][..],
            &["shieldoo", "firewall", "delete", "--id", ""][..],
        ] {
            let err = Cli::try_parse_from(args).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue, "{args:?}");
        }
    }
}
