//! Shared helpers for command handlers.

use shieldoo_core::{Lookup, Manager, ParseError, ResourceKind};

use crate::cli::{DeleteArgs, GlobalOpts, ShowArgs};
use crate::error::CliError;
use crate::output;

/// Attach the originating flag to a parse failure.
pub fn parse_flag<T>(flag: &str, parsed: Result<T, ParseError>) -> Result<T, CliError> {
    parsed.map_err(|e| CliError::Validation {
        field: flag.into(),
        reason: e.to_string(),
    })
}

pub async fn list(
    manager: &Manager,
    kind: ResourceKind,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let body = manager.list(kind).await?;
    output::print_response(global.output, &body)
}

pub async fn show(
    manager: &Manager,
    kind: ResourceKind,
    args: ShowArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let lookup = Lookup {
        name: args.name,
        id: args.id,
    };
    let body = manager.show(kind, &lookup).await?;
    output::print_response(global.output, &body)
}

/// Delete by id and confirm with "<Label> deleted".
pub async fn delete(
    manager: &Manager,
    kind: ResourceKind,
    args: DeleteArgs,
) -> Result<(), CliError> {
    manager.delete(kind, &args.id).await?;
    output::print_output(&format!("{} deleted", kind.label()));
    Ok(())
}
