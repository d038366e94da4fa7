//! Minimal `--option value` parsing for the CLI commands.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::errors::CliError;

/// Options that never take a value.
const FLAGS: &[&str] = &["no-header"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    options: BTreeMap<String, String>,
    flags: BTreeSet<String>,
    positionals: Vec<String>,
}

impl ParsedArgs {
    /// Splits raw tokens into `--name value` / `--name=value` options,
    /// value-less flags, and positionals.
    pub fn parse(tokens: &[String]) -> Result<Self, CliError> {
        let mut parsed = ParsedArgs::default();
        let mut iter = tokens.iter();
        while let Some(token) = iter.next() {
            let Some(name) = token.strip_prefix("--") else {
                parsed.positionals.push(token.clone());
                continue;
            };
            if let Some((name, value)) = name.split_once('=') {
                parsed.options.insert(name.to_string(), value.to_string());
            } else if FLAGS.contains(&name) {
                parsed.flags.insert(name.to_string());
            } else {
                let value = iter
                    .next()
                    .ok_or_else(|| CliError::Input(format!("`--{name}` needs a value")))?;
                parsed.options.insert(name.to_string(), value.clone());
            }
        }
        Ok(parsed)
    }

    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }

    pub fn require(&self, name: &str) -> Result<&str, CliError> {
        self.option(name)
            .ok_or_else(|| CliError::Input(format!("missing required `--{name}`")))
    }

    pub fn flag(&self, name: &str) -> bool {
        self.flags.contains(name)
    }

    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    /// Parses an optional `YYYY-MM-DD` option.
    pub fn date(&self, name: &str) -> Result<Option<NaiveDate>, CliError> {
        self.option(name)
            .map(|raw| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|err| {
                    CliError::Input(format!("`--{name}` expects YYYY-MM-DD, got `{raw}`: {err}"))
                })
            })
            .transpose()
    }

    /// Fails on any option or flag outside `allowed`.
    pub fn expect_only(&self, allowed: &[&str]) -> Result<(), CliError> {
        let unknown = self
            .options
            .keys()
            .chain(self.flags.iter())
            .find(|name| !allowed.contains(&name.as_str()));
        match unknown {
            Some(name) => Err(CliError::Input(format!("unknown option `--{name}`"))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|token| token.to_string()).collect()
    }

    #[test]
    fn parses_options_flags_and_positionals() {
        let args = ParsedArgs::parse(&tokens(&[
            "set",
            "--input",
            "history.json",
            "--end=2024-01-01",
            "--no-header",
            "output_format",
        ]))
        .unwrap();
        assert_eq!(args.option("input"), Some("history.json"));
        assert_eq!(args.date("end").unwrap(), NaiveDate::from_ymd_opt(2024, 1, 1));
        assert!(args.flag("no-header"));
        assert_eq!(args.positionals(), &["set".to_string(), "output_format".to_string()]);
        assert!(args.expect_only(&["input", "end", "no-header"]).is_ok());
        assert!(args.expect_only(&["input"]).is_err());
    }

    #[test]
    fn option_without_value_is_an_error() {
        assert!(matches!(
            ParsedArgs::parse(&tokens(&["--input"])),
            Err(CliError::Input(_))
        ));
    }

    #[test]
    fn bad_date_is_reported() {
        let args = ParsedArgs::parse(&tokens(&["--end", "01/02/2024"])).unwrap();
        assert!(args.date("end").is_err());
        assert!(args.require("input").is_err());
    }
}
