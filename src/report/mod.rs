//! Rendering of reconstructed ledgers for downstream consumers.
//!
//! The CSV layout mirrors a bank statement: one header row, then one row per
//! payment with the date, the sponsored login and the signed amount.

use std::{
    borrow::Cow,
    fmt,
    io::{self, Write},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::ledger::{MonthlyTotal, PaymentEvent};

pub const LEDGER_CSV_HEADER: &str = "Date,Sponsorable,Amount in US Cents";
pub const TOTALS_CSV_HEADER: &str = "Month,Payments,Refunds,Total in US Cents";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format `{other}` (expected csv or json)")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        })
    }
}

/// Writes an ordered ledger somewhere.
pub trait LedgerRenderer {
    fn render(&self, ledger: &[PaymentEvent], out: &mut dyn Write) -> io::Result<()>;
}

#[derive(Debug, Clone, Copy)]
pub struct CsvRenderer {
    pub include_header: bool,
}

impl Default for CsvRenderer {
    fn default() -> Self {
        Self {
            include_header: true,
        }
    }
}

impl LedgerRenderer for CsvRenderer {
    fn render(&self, ledger: &[PaymentEvent], out: &mut dyn Write) -> io::Result<()> {
        if self.include_header {
            writeln!(out, "{LEDGER_CSV_HEADER}")?;
        }
        for event in ledger {
            writeln!(
                out,
                "{},{},{}",
                event.charged_on.format("%Y-%m-%d"),
                csv_field(&event.sponsee_id),
                event.amount_cents
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl LedgerRenderer for JsonRenderer {
    fn render(&self, ledger: &[PaymentEvent], out: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, ledger)?;
        writeln!(out)
    }
}

pub fn renderer_for(format: OutputFormat, include_header: bool) -> Box<dyn LedgerRenderer> {
    match format {
        OutputFormat::Csv => Box::new(CsvRenderer { include_header }),
        OutputFormat::Json => Box::new(JsonRenderer),
    }
}

pub fn render_totals(
    totals: &[MonthlyTotal],
    format: OutputFormat,
    include_header: bool,
    out: &mut dyn Write,
) -> io::Result<()> {
    match format {
        OutputFormat::Csv => {
            if include_header {
                writeln!(out, "{TOTALS_CSV_HEADER}")?;
            }
            for total in totals {
                writeln!(
                    out,
                    "{},{},{},{}",
                    total.label(),
                    total.payment_count,
                    total.refund_count,
                    total.total_cents
                )?;
            }
            Ok(())
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, totals)?;
            writeln!(out)
        }
    }
}

/// Quotes a field when it contains a delimiter, quote or line break.
fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_formats_case_insensitively() {
        assert_eq!("CSV".parse::<OutputFormat>(), Ok(OutputFormat::Csv));
        assert_eq!(" json ".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn quotes_only_when_needed() {
        assert_eq!(csv_field("octocat"), "octocat");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
