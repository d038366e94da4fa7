use std::io::Write;
use std::path::Path;

use tracing::info;

use super::{CommandEntry, CommandResult};
use crate::activity::SponsorshipHistory;
use crate::cli::args::ParsedArgs;
use crate::cli::context::CliContext;
use crate::errors::CliError;
use crate::ledger::{summarize_by_month, validate_records, PaymentEvent};
use crate::report::{render_totals, renderer_for, OutputFormat};
use crate::storage::{
    save_document_to_path, JsonFileSource, SponsorshipDocument, SponsorshipSource,
};

const REPORT_OPTIONS: &[&str] = &["input", "end", "since", "format", "no-header"];
const RECORDS_OPTIONS: &[&str] = &["input", "output"];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry {
            name: "ledger",
            about: "Reconstruct the payment ledger",
            usage: "ledger --input <file> [--end YYYY-MM-DD] [--since YYYY-MM-DD] [--format csv|json] [--no-header]",
            run: cmd_ledger,
        },
        CommandEntry {
            name: "totals",
            about: "Summarize the reconstructed ledger per month",
            usage: "totals --input <file> [--end YYYY-MM-DD] [--since YYYY-MM-DD] [--format csv|json] [--no-header]",
            run: cmd_totals,
        },
        CommandEntry {
            name: "records",
            about: "Convert an activity log into sponsorship records",
            usage: "records --input <file> [--output <file>]",
            run: cmd_records,
        },
    ]
}

fn cmd_ledger(context: &mut CliContext, args: &ParsedArgs, out: &mut dyn Write) -> CommandResult {
    args.expect_only(REPORT_OPTIONS)?;
    let ledger = reconstruct(context, args)?;
    let renderer = renderer_for(output_format(context, args)?, include_header(context, args));
    renderer.render(&ledger, out)?;
    Ok(())
}

fn cmd_totals(context: &mut CliContext, args: &ParsedArgs, out: &mut dyn Write) -> CommandResult {
    args.expect_only(REPORT_OPTIONS)?;
    let ledger = reconstruct(context, args)?;
    let totals = summarize_by_month(&ledger);
    render_totals(
        &totals,
        output_format(context, args)?,
        include_header(context, args),
        out,
    )?;
    Ok(())
}

fn cmd_records(_context: &mut CliContext, args: &ParsedArgs, out: &mut dyn Write) -> CommandResult {
    args.expect_only(RECORDS_OPTIONS)?;
    let history = load_history(args)?;
    validate_records(&history.records)?;
    let document = SponsorshipDocument::from_history(history);
    match args.option("output") {
        Some(path) => {
            save_document_to_path(&document, Path::new(path))?;
            writeln!(out, "Wrote {} sponsorship records to {path}", document.records.len())?;
        }
        None => {
            serde_json::to_writer_pretty(&mut *out, &document).map_err(std::io::Error::from)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn load_history(args: &ParsedArgs) -> Result<SponsorshipHistory, CliError> {
    let source = JsonFileSource::new(args.require("input")?);
    let history = source.load_history()?;
    info!(source = %source.describe(), records = history.records.len(), "history loaded");
    Ok(history)
}

/// Builds the ledger up to `--end` (default today), keeping only charges on
/// or after `--since`.
fn reconstruct(context: &CliContext, args: &ParsedArgs) -> Result<Vec<PaymentEvent>, CliError> {
    let report_end = args.date("end")?.unwrap_or_else(|| context.today());
    let since = args.date("since")?;
    if let Some(since) = since {
        if since >= report_end {
            return Err(CliError::Input(format!(
                "`--since` {since} must be before the report end {report_end}"
            )));
        }
    }

    let history = load_history(args)?;
    let mut ledger = history.generate(report_end)?;
    if let Some(since) = since {
        ledger.retain(|event| event.charged_on >= since);
    }
    Ok(ledger)
}

fn output_format(context: &CliContext, args: &ParsedArgs) -> Result<OutputFormat, CliError> {
    match args.option("format") {
        Some(raw) => raw.parse().map_err(CliError::Input),
        None => Ok(context.config.output_format),
    }
}

fn include_header(context: &CliContext, args: &ParsedArgs) -> bool {
    context.config.include_header && !args.flag("no-header")
}
