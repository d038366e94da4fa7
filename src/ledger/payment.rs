use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Why a payment event appears in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    /// Taken the moment a sponsorship starts.
    Immediate,
    /// Taken on the account's anchor day.
    Recurring,
    /// A single payment on a one-time tier; never touches the anchor.
    OneTime,
    /// Money returned to the sponsor, carried with a negative amount.
    Refund,
}

impl fmt::Display for PaymentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentKind::Immediate => "immediate",
            PaymentKind::Recurring => "recurring",
            PaymentKind::OneTime => "one_time",
            PaymentKind::Refund => "refund",
        };
        f.write_str(label)
    }
}

/// A single reconstructed ledger entry.
///
/// Field order doubles as the ledger order: by date, then sponsee, then kind
/// and amount, so sorting a ledger never depends on how it was produced.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PaymentEvent {
    pub charged_on: NaiveDate,
    pub sponsee_id: String,
    pub kind: PaymentKind,
    pub amount_cents: i64,
}

impl PaymentEvent {
    pub fn immediate(sponsee_id: impl Into<String>, amount_cents: i64, charged_on: NaiveDate) -> Self {
        Self {
            charged_on,
            sponsee_id: sponsee_id.into(),
            kind: PaymentKind::Immediate,
            amount_cents,
        }
    }

    pub fn recurring(sponsee_id: impl Into<String>, amount_cents: i64, charged_on: NaiveDate) -> Self {
        Self {
            charged_on,
            sponsee_id: sponsee_id.into(),
            kind: PaymentKind::Recurring,
            amount_cents,
        }
    }

    pub fn one_time(sponsee_id: impl Into<String>, amount_cents: i64, charged_on: NaiveDate) -> Self {
        Self {
            charged_on,
            sponsee_id: sponsee_id.into(),
            kind: PaymentKind::OneTime,
            amount_cents,
        }
    }

    /// Builds a refund entry; `refunded_cents` is the positive amount returned.
    pub fn refund(sponsee_id: impl Into<String>, refunded_cents: i64, charged_on: NaiveDate) -> Self {
        Self {
            charged_on,
            sponsee_id: sponsee_id.into(),
            kind: PaymentKind::Refund,
            amount_cents: -refunded_cents.abs(),
        }
    }

    pub fn is_refund(&self) -> bool {
        self.kind == PaymentKind::Refund
    }
}
