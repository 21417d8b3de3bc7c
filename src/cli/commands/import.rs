use std::fs;

use anyhow::{Context, Result};

use super::super::args::{ImportCommand, TableFormat};
use super::{
    helper::CommandContext,
    {CommandResult, CommandSummary, ImportSummary},
};
use crate::core::{import_workbook, write_records};

pub fn import(cmd: ImportCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let ctx = CommandContext::new(&args.common)?;
    let workbook_path = ctx.workbook_path(args.input.as_deref());

    let outcome = match cmd.format {
        TableFormat::Excel => import_workbook(&workbook_path, &ctx.localization_dir)?,
    };

    fs::create_dir_all(&ctx.localization_dir).with_context(|| {
        format!(
            "Failed to create localization directory '{}'",
            ctx.localization_dir.display()
        )
    })?;
    let written_files = write_records(&outcome.records)?;

    Ok(CommandResult::new(CommandSummary::Import(ImportSummary {
        workbook_path,
        written_files,
        row_warnings: outcome.warnings,
    })))
}
