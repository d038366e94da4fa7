//! Command table of the CLI, in the order `help` lists it.

pub mod config;
pub mod ledger;
pub mod system;

use std::io::Write;

use once_cell::sync::Lazy;
use strsim::levenshtein;

use crate::cli::args::ParsedArgs;
use crate::cli::context::CliContext;
use crate::errors::CliError;

pub type CommandResult = Result<(), CliError>;

/// One CLI command and the function that runs it.
pub struct CommandEntry {
    pub name: &'static str,
    pub about: &'static str,
    pub usage: &'static str,
    pub run: fn(&mut CliContext, &ParsedArgs, &mut dyn Write) -> CommandResult,
}

/// Typos further than this from every command get no suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

static COMMANDS: Lazy<Vec<CommandEntry>> = Lazy::new(|| {
    let mut commands = ledger::definitions();
    commands.extend(config::definitions());
    commands.extend(system::definitions());
    commands
});

pub(crate) fn commands() -> &'static [CommandEntry] {
    &COMMANDS
}

pub(crate) fn find(name: &str) -> Option<&'static CommandEntry> {
    commands().iter().find(|entry| entry.name == name)
}

/// Closest command name within a small edit distance of `input`.
pub(crate) fn closest(input: &str) -> Option<&'static str> {
    commands()
        .iter()
        .map(|entry| (levenshtein(entry.name, input), entry.name))
        .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, name)| name)
}

/// `UnknownCommand` error for `name`, with a suggestion when one is close.
pub(crate) fn unknown(name: &str) -> CliError {
    CliError::UnknownCommand {
        name: name.to_string(),
        suggestion: closest(name).map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique_and_listed_in_order() {
        let names: Vec<_> = commands().iter().map(|entry| entry.name).collect();
        assert_eq!(
            names,
            vec!["ledger", "totals", "records", "config", "version", "help"]
        );
    }

    #[test]
    fn suggests_only_near_misses() {
        assert_eq!(closest("ledgr"), Some("ledger"));
        assert_eq!(closest("totl"), Some("totals"));
        assert_eq!(closest("completely-different"), None);
        assert!(find("LEDGER").is_none());
        assert_eq!(
            find("records").map(|entry| entry.usage),
            Some("records --input <file> [--output <file>]")
        );
    }
}
