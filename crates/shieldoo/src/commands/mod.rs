//! Command dispatch: bridges CLI args -> Manager calls -> output formatting.

pub mod firewall;
pub mod group;
pub mod server;
pub mod util;

use shieldoo_core::Manager;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch an API-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    manager: &Manager,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Server(args) => server::handle(manager, args, global).await,
        Command::Firewall(args) => firewall::handle(manager, args, global).await,
        Command::Group(args) => group::handle(manager, args, global).await,
        // Completions are handled before dispatch
        Command::Completions(_) => unreachable!(),
    }
}
