//! Command dispatch: bridges CLI args -> core Commands -> output formatting.

pub mod auth;
pub mod clients;
pub mod config_cmd;
pub mod projects;
pub mod util;
pub mod venues;

use venmap_core::Workspace;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a session-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    workspace: &Workspace,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Whoami => auth::whoami(workspace, global),
        Command::Projects(args) => projects::handle(workspace, args, global).await,
        Command::Venues(args) => venues::handle(workspace, args, global).await,
        Command::Clients(args) => clients::handle(workspace, args, global).await,
        // Login, Logout, Config and Completions are handled before dispatch
        Command::Login(_) | Command::Logout | Command::Config(_) | Command::Completions(_) => {
            unreachable!()
        }
    }
}
