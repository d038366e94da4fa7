use std::io::Write;

use super::{CommandEntry, CommandResult};
use crate::cli::args::ParsedArgs;
use crate::cli::context::CliContext;
use crate::config::Config;
use crate::errors::CliError;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry {
            name: "config",
            about: "Show or change stored preferences",
            usage: "config [show | path | reset | set <output_format|include_header|log_filter> <value>]",
            run: cmd_config,
        },
    ]
}

fn cmd_config(context: &mut CliContext, args: &ParsedArgs, out: &mut dyn Write) -> CommandResult {
    args.expect_only(&[])?;
    let positionals = args.positionals();
    match positionals.first().map(String::as_str).unwrap_or("show") {
        "show" => {
            let json = serde_json::to_string_pretty(&context.config).map_err(std::io::Error::from)?;
            writeln!(out, "{json}")?;
        }
        "path" => {
            writeln!(out, "{}", context.config_manager.path().display())?;
        }
        "reset" => {
            context.config = Config::default();
            context.config_manager.save(&context.config)?;
            writeln!(out, "Configuration reset to defaults")?;
        }
        "set" => {
            let (Some(key), Some(value)) = (positionals.get(1), positionals.get(2)) else {
                return Err(CliError::Input("usage: config set <key> <value>".into()));
            };
            apply_setting(&mut context.config, key, value)?;
            context.config_manager.save(&context.config)?;
            writeln!(out, "Set {key} = {value}")?;
        }
        other => {
            return Err(CliError::Input(format!("unknown config action `{other}`")));
        }
    }
    Ok(())
}

fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<(), CliError> {
    match key {
        "output_format" => {
            config.output_format = value.parse().map_err(CliError::Input)?;
        }
        "include_header" => {
            config.include_header = parse_bool(value)?;
        }
        "log_filter" => {
            config.log_filter = match value.trim() {
                "" | "none" => None,
                filter => Some(filter.to_string()),
            };
        }
        other => return Err(CliError::Input(format!("unknown config key `{other}`"))),
    }
    Ok(())
}

fn parse_bool(value: &str) -> Result<bool, CliError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(CliError::Input(format!("expected true or false, got `{other}`"))),
    }
}
