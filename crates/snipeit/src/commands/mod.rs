//! Command dispatch for everything that needs a connector.

pub mod config_cmd;
pub mod membership;
pub mod resources;
pub mod sync;
pub mod validate;

use snipeit_core::SnipeIt;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

pub async fn dispatch(cmd: Command, connector: &SnipeIt, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Validate => validate::handle(connector, global).await,
        Command::Resources { resource_type } => {
            resources::list(connector, resource_type, global).await
        }
        Command::Entitlements { resource_type, id } => {
            resources::entitlements(connector, resource_type, &id, global).await
        }
        Command::Grants { resource_type, id } => {
            resources::grants(connector, resource_type, &id, global).await
        }
        Command::Sync => sync::handle(connector, global).await,
        Command::Grant(args) => membership::grant(connector, &args, global).await,
        Command::Revoke(args) => membership::revoke(connector, &args, global).await,
        Command::Config(_) | Command::Completions(_) => unreachable!("handled before dispatch"),
    }
}
