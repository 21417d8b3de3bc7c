use anyhow::Result;

use super::super::args::{ExportCommand, TableFormat};
use super::{
    helper::CommandContext,
    {CommandResult, CommandSummary, ExportSummary},
};
use crate::core::{CultureRegistry, export as export_grid, write_workbook};

pub fn export(cmd: ExportCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let ctx = CommandContext::new(&args.common)?;
    let workbook_path = ctx.workbook_path(args.output.as_deref());

    let registry = CultureRegistry::load(&ctx.localization_dir)?;
    let grid = export_grid(&registry.records);

    match cmd.format {
        TableFormat::Excel => write_workbook(&grid, &workbook_path)?,
    }

    Ok(CommandResult::new(CommandSummary::Export(ExportSummary {
        workbook_path,
        culture_count: grid.cultures().len(),
        key_count: grid.rows.len(),
        skipped_files: registry.warnings,
    })))
}
