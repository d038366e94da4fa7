//! Command-line front end: `sponsor_ledger_cli <command> [options]`.

pub mod args;
pub mod commands;
pub mod context;
pub mod output;

use std::env;
use std::io::{self, Write};

use tracing::debug;

use crate::config::ConfigManager;
use crate::errors::CliError;
use crate::utils::init_tracing;

use args::ParsedArgs;
pub use context::CliContext;

/// Entry point used by the binary: reads `std::env::args`, loads the user's
/// config, and writes command output to stdout.
pub fn run_cli() -> Result<(), CliError> {
    let tokens: Vec<String> = env::args().skip(1).collect();

    let config_manager = ConfigManager::new()?;
    let config = config_manager.load()?;
    init_tracing(config.log_filter.as_deref());

    let mut context = CliContext::new(config_manager, config, context::clock_from_env());
    let stdout = io::stdout();
    let mut out = stdout.lock();
    dispatch(&tokens, &mut context, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Runs one command. With no tokens, prints the help overview.
pub fn dispatch(
    tokens: &[String],
    context: &mut CliContext,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let (name, rest) = match tokens.split_first() {
        Some((name, rest)) => (name.to_lowercase(), rest),
        None => ("help".to_string(), tokens),
    };
    let entry = commands::find(&name).ok_or_else(|| commands::unknown(&name))?;
    let parsed = ParsedArgs::parse(rest)?;
    debug!(command = entry.name, "dispatching");
    (entry.run)(context, &parsed, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::utils::clock::FixedClock;
    use chrono::NaiveDate;

    fn context(dir: &tempfile::TempDir) -> CliContext {
        CliContext::new(
            ConfigManager::with_base_dir(dir.path().to_path_buf()),
            Config::default(),
            Box::new(FixedClock::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())),
        )
    }

    fn run(tokens: &[&str], context: &mut CliContext) -> Result<String, CliError> {
        let tokens: Vec<String> = tokens.iter().map(|token| token.to_string()).collect();
        let mut out = Vec::new();
        dispatch(&tokens, context, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn no_arguments_prints_help() {
        let dir = tempfile::tempdir().unwrap();
        let output = run(&[], &mut context(&dir)).unwrap();
        assert!(output.contains("Commands:"));
        assert!(output.contains("ledger"));
    }

    #[test]
    fn unknown_command_suggests_the_closest() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&["ledgr"], &mut context(&dir)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown command `ledgr` (did you mean `ledger`?)"
        );
    }

    #[test]
    fn config_set_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir);
        run(&["config", "set", "output_format", "json"], &mut ctx).unwrap();
        let stored = ConfigManager::with_base_dir(dir.path().to_path_buf())
            .load()
            .unwrap();
        assert_eq!(stored.output_format, crate::report::OutputFormat::Json);
    }

    #[test]
    fn ledger_defaults_report_end_to_today() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("records.json");
        std::fs::write(
            &input,
            r#"{ "records": [
                { "sponsee_id": "octo", "monthly_amount_cents": 500, "started_on": "2023-11-01" }
            ] }"#,
        )
        .unwrap();
        let output = run(
            &["ledger", "--input", input.to_str().unwrap()],
            &mut context(&dir),
        )
        .unwrap();
        assert_eq!(
            output,
            "Date,Sponsorable,Amount in US Cents\n\
             2023-11-01,octo,500\n\
             2023-12-01,octo,500\n"
        );
    }
}
