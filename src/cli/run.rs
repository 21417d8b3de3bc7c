//! Dispatches parsed arguments to the command handlers.

use anyhow::Result;

use super::{
    args::{Arguments, Command, LocalizationAction},
    commands::{CommandResult, export::export, import::import, init::init, scan::scan},
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Localization(cmd)) => match cmd.action {
            LocalizationAction::Export(cmd) => export(cmd),
            LocalizationAction::Import(cmd) => import(cmd),
            LocalizationAction::Scan(cmd) => scan(cmd),
        },
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
