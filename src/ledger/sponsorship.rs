use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

/// One sponsorship of a sponsee at a fixed monthly amount.
///
/// Amount changes are represented as a cancellation followed by a new record
/// flagged with `continues`. GitHub keeps billing such a change on the usual
/// day, so a continuation has no immediate charge of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SponsorshipRecord {
    pub sponsee_id: String,
    pub monthly_amount_cents: i64,
    pub started_on: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_on: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub continues: bool,
}

impl SponsorshipRecord {
    pub fn new(
        sponsee_id: impl Into<String>,
        monthly_amount_cents: i64,
        started_on: NaiveDate,
    ) -> Self {
        Self {
            sponsee_id: sponsee_id.into(),
            monthly_amount_cents,
            started_on,
            ended_on: None,
            continues: false,
        }
    }

    /// Marks the sponsorship as cancelled on `ended_on`.
    pub fn ended(mut self, ended_on: NaiveDate) -> Self {
        self.ended_on = Some(ended_on);
        self
    }

    /// Marks the record as a tier change of the sponsorship that ends on its
    /// start date.
    pub fn continuing(mut self) -> Self {
        self.continues = true;
        self
    }

    /// Exclusive end of the window in which recurring charges may land.
    pub fn charge_window_end(&self, report_end: NaiveDate) -> NaiveDate {
        match self.ended_on {
            Some(end) => end.min(report_end),
            None => report_end,
        }
    }

    fn validate(&self) -> Result<(), LedgerError> {
        if self.sponsee_id.trim().is_empty() {
            return Err(LedgerError::EmptySponsee);
        }
        if self.monthly_amount_cents <= 0 {
            return Err(LedgerError::NonPositiveAmount {
                sponsee_id: self.sponsee_id.clone(),
                amount_cents: self.monthly_amount_cents,
            });
        }
        if let Some(ended_on) = self.ended_on {
            if ended_on < self.started_on {
                return Err(LedgerError::InvalidInterval {
                    sponsee_id: self.sponsee_id.clone(),
                    started_on: self.started_on,
                    ended_on,
                });
            }
        }
        Ok(())
    }
}

/// Checks every record on its own, then checks that no sponsee has two
/// sponsorships running at once. Intervals are half-open, so restarting on
/// the day of a cancellation is allowed.
pub fn validate_records(records: &[SponsorshipRecord]) -> Result<(), LedgerError> {
    let mut by_sponsee: BTreeMap<&str, Vec<&SponsorshipRecord>> = BTreeMap::new();
    for record in records {
        record.validate()?;
        by_sponsee
            .entry(record.sponsee_id.as_str())
            .or_default()
            .push(record);
    }

    for (sponsee_id, mut history) in by_sponsee {
        history.sort_by_key(|record| (record.started_on, record.ended_on.is_none(), record.ended_on));
        for pair in history.windows(2) {
            let (earlier, later) = (pair[0], pair[1]);
            let clear = earlier
                .ended_on
                .map_or(false, |end| end <= later.started_on);
            if !clear {
                return Err(LedgerError::OverlappingSponsorships {
                    sponsee_id: sponsee_id.to_string(),
                    first: earlier.started_on,
                    second: later.started_on,
                });
            }
        }
    }
    Ok(())
}
