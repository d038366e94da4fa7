use chrono::NaiveDate;
use thiserror::Error;

/// Out-of-order transitions on the billing state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillingError {
    #[error("cannot end a sponsorship while none are active")]
    NoActiveSponsorships,
    #[error("no anchor day while the account is dormant")]
    Dormant,
}

/// Malformed sponsorship input or a failed reconstruction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("sponsorship of `{sponsee_id}` ends on {ended_on} before it starts on {started_on}")]
    InvalidInterval {
        sponsee_id: String,
        started_on: NaiveDate,
        ended_on: NaiveDate,
    },
    #[error("sponsorships of `{sponsee_id}` starting {first} and {second} overlap")]
    OverlappingSponsorships {
        sponsee_id: String,
        first: NaiveDate,
        second: NaiveDate,
    },
    #[error("sponsorship of `{sponsee_id}` has non-positive monthly amount {amount_cents}")]
    NonPositiveAmount { sponsee_id: String, amount_cents: i64 },
    #[error("sponsorship record has an empty sponsee id")]
    EmptySponsee,
    #[error("adjustment references unknown sponsee `{0}`")]
    UnknownSponsee(String),
    #[error("billing state error: {0}")]
    Billing(#[from] BillingError),
}

/// Failures while turning a sponsorship activity log into records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActivityError {
    #[error("`{action}` for `{login}` on {date} has no sponsors tier")]
    MissingTier {
        action: String,
        login: String,
        date: NaiveDate,
    },
    #[error("`{login}` is already sponsored on {date}")]
    AlreadySponsored { login: String, date: NaiveDate },
    #[error("`{login}` has no active sponsorship to change on {date}")]
    NotSponsored { login: String, date: NaiveDate },
}

/// Errors raised while loading sponsorship input from disk.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid activity log: {0}")]
    Activity(#[from] ActivityError),
}

/// Errors raised while reading or writing the persisted configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("No configuration directory could be determined")]
    NoConfigDir,
}

/// Top-level failure of a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Unknown command `{name}`{}", suggestion_hint(.suggestion))]
    UnknownCommand {
        name: String,
        suggestion: Option<String>,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|name| format!(" (did you mean `{name}`?)"))
        .unwrap_or_default()
}
