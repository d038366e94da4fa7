use std::io::Write;

use super::{commands, find, unknown, CommandEntry, CommandResult};
use crate::cli::args::ParsedArgs;
use crate::cli::context::CliContext;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry {
            name: "version",
            about: "Show build metadata",
            usage: "version",
            run: cmd_version,
        },
        CommandEntry {
            name: "help",
            about: "Show available commands",
            usage: "help [command]",
            run: cmd_help,
        },
    ]
}

fn cmd_version(_context: &mut CliContext, args: &ParsedArgs, out: &mut dyn Write) -> CommandResult {
    args.expect_only(&[])?;
    writeln!(out, "{}", build_info::current())?;
    Ok(())
}

fn cmd_help(_context: &mut CliContext, args: &ParsedArgs, out: &mut dyn Write) -> CommandResult {
    if let Some(name) = args.positionals().first() {
        let entry = find(name).ok_or_else(|| unknown(name))?;
        writeln!(out, "{} - {}", entry.name, entry.about)?;
        writeln!(out, "usage: sponsor_ledger_cli {}", entry.usage)?;
        return Ok(());
    }

    writeln!(out, "Reconstructs GitHub Sponsors payments from sponsorship history.")?;
    writeln!(out)?;
    writeln!(out, "Commands:")?;
    let width = commands().iter().map(|entry| entry.name.len()).max().unwrap_or(0);
    for entry in commands() {
        writeln!(out, "  {:width$}  {}", entry.name, entry.about)?;
    }
    writeln!(out)?;
    writeln!(out, "Run `help <command>` for usage.")?;
    Ok(())
}
