use std::path::{Path, PathBuf};

use anyhow::Result;

use super::super::args::ScanCommand;
use super::{
    helper::CommandContext,
    {CommandResult, CommandSummary, ScanSummary},
};
use crate::core::{CultureRegistry, ScanOptions, scan as scan_tree};

pub fn scan(cmd: ScanCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let ctx = CommandContext::new(&args.common)?;

    let source_root = match &args.source_root {
        Some(path) => path.clone(),
        None => PathBuf::from(&ctx.config.source_root),
    };
    let source_root = if source_root == Path::new(".") {
        ctx.current_dir.clone()
    } else {
        ctx.current_dir.join(source_root)
    };
    let jobs = args.jobs.or(ctx.config.jobs);
    if jobs == Some(0) {
        anyhow::bail!("'--jobs' must be at least 1");
    }

    let registry = CultureRegistry::load(&ctx.localization_dir)?;
    let filter = ctx.config.source_filter()?;
    let result = scan_tree(
        &source_root,
        &registry.key_universe(),
        &filter,
        ScanOptions { jobs, cancel: None },
    )?;

    Ok(CommandResult {
        problem_count: result.missing_keys().len(),
        exit_on_problems: args.strict,
        summary: CommandSummary::Scan(ScanSummary {
            source_root,
            result,
            skipped_files: registry.warnings,
        }),
    })
}
