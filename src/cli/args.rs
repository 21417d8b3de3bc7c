//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `localization export excel`: write all culture files into one workbook
//! - `localization import excel`: write the workbook back into culture files
//! - `localization scan`: list keys no source file references
//! - `init`: create a `.locsheetrc.json` configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Localization(cmd)) => match &cmd.action {
                LocalizationAction::Export(cmd) => cmd.args.common.verbose,
                LocalizationAction::Import(cmd) => cmd.args.common.verbose,
                LocalizationAction::Scan(cmd) => cmd.args.common.verbose,
            },
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all localization commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Directory containing the culture files (overrides config file)
    #[arg(short = 'l', long, visible_alias = "lfp")]
    pub localization_files_path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Table formats supported by export and import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum TableFormat {
    Excel,
}

#[derive(Debug, Parser)]
pub struct ExportArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Workbook to write (default: <current-directory-name>.xlsx)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ExportCommand {
    #[arg(value_enum)]
    pub format: TableFormat,
    #[command(flatten)]
    pub args: ExportArgs,
}

#[derive(Debug, Parser)]
pub struct ImportArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Workbook to read (default: <current-directory-name>.xlsx)
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ImportCommand {
    #[arg(value_enum)]
    pub format: TableFormat,
    #[command(flatten)]
    pub args: ImportArgs,
}

#[derive(Debug, Parser)]
pub struct ScanArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Source tree to search (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Number of worker threads (default: available parallelism)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Exit with status 1 when unused keys are found
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct ScanCommand {
    #[command(flatten)]
    pub args: ScanArgs,
}

#[derive(Debug, Subcommand)]
pub enum LocalizationAction {
    /// Export all culture files into a single workbook
    Export(ExportCommand),
    /// Import a workbook back into per-culture files
    Import(ImportCommand),
    /// Search a source tree for localization keys that are never used
    Scan(ScanCommand),
}

#[derive(Debug, Args)]
pub struct LocalizationCommand {
    #[command(subcommand)]
    pub action: LocalizationAction,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Export, import or audit localization files
    Localization(LocalizationCommand),
    /// Initialize a new .locsheetrc.json configuration file
    Init,
}
