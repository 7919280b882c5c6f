//! Group command handlers (read-only).

use shieldoo_core::{Manager, ResourceKind};

use crate::cli::{GlobalOpts, GroupArgs, GroupCommand};
use crate::error::CliError;

use super::util;

pub async fn handle(
    manager: &Manager,
    args: GroupArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        GroupCommand::List => util::list(manager, ResourceKind::Group, global).await,
        GroupCommand::Show(args) => util::show(manager, ResourceKind::Group, args, global).await,
    }
}
