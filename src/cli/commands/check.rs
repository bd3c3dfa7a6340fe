use anyhow::{Ok, Result};

use super::super::args::CheckCommand;
use super::{
    helper::finish,
    {CheckSummary, CommandResult, CommandSummary},
};
use crate::core::CheckContext;

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = CheckContext::new(&cmd.common)?;

    let summary = CheckSummary {
        files_checked: ctx.file_checks().len(),
        unreadable_count: ctx.unreadable_files().len(),
    };

    Ok(finish(CommandSummary::Check(summary), ctx.issues(), true))
}
