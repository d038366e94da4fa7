//! Translation of GitHub's `sponsorsActivities` log into sponsorship records.
//!
//! The log is the richest history GitHub exposes: it records when each
//! sponsorship started, changed tier, was cancelled, or was refunded.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{ActivityError, LedgerError};
use crate::ledger::{
    generate_ledger_with_adjustments, OneTimePayment, OneTimePayments, PaymentEvent,
    RefundAdjustments, RefundEvidence, SponsorshipRecord,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityAction {
    NewSponsorship,
    CancelledSponsorship,
    TierChange,
    Refund,
    PendingChange,
    SponsorMatchDisabled,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SponsorsTier {
    pub monthly_price_in_cents: i64,
    #[serde(default)]
    pub is_one_time: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sponsorable {
    pub login: String,
}

/// One node of the `sponsorsActivities` connection, as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SponsorsActivity {
    pub action: ActivityAction,
    pub timestamp: DateTime<Utc>,
    pub sponsorable: Sponsorable,
    #[serde(default)]
    pub sponsors_tier: Option<SponsorsTier>,
    #[serde(default)]
    pub previous_sponsors_tier: Option<SponsorsTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_source: Option<String>,
}

impl SponsorsActivity {
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    fn tier(&self) -> Result<&SponsorsTier, ActivityError> {
        self.sponsors_tier
            .as_ref()
            .ok_or_else(|| ActivityError::MissingTier {
                action: format!("{:?}", self.action),
                login: self.sponsorable.login.clone(),
                date: self.date(),
            })
    }
}

/// Everything needed to rebuild a ledger from an activity log.
#[derive(Debug, Clone, Default)]
pub struct SponsorshipHistory {
    pub records: Vec<SponsorshipRecord>,
    pub one_time: Vec<OneTimePayment>,
    pub refunds: Vec<RefundEvidence>,
}

impl SponsorshipHistory {
    /// Replays `activities` in timestamp order. Activities sharing a
    /// timestamp keep their input order.
    ///
    /// A tier change to a recurring tier closes the running sponsorship and
    /// continues it at the new price from the same day; only the amount of
    /// later anchor-day charges changes. A tier change to a one-time tier ends
    /// the sponsorship with a single payment.
    pub fn from_activities(activities: &[SponsorsActivity]) -> Result<Self, ActivityError> {
        let mut ordered: Vec<&SponsorsActivity> = activities.iter().collect();
        ordered.sort_by_key(|activity| activity.timestamp);

        let mut history = SponsorshipHistory::default();
        let mut running: HashMap<String, usize> = HashMap::new();

        for activity in ordered {
            let login = activity.sponsorable.login.as_str();
            let date = activity.date();
            match activity.action {
                ActivityAction::NewSponsorship => {
                    let tier = activity.tier()?;
                    if tier.is_one_time {
                        history.push_one_time(login, tier, date);
                    } else {
                        history.open(&mut running, login, tier, date, false)?;
                    }
                }
                ActivityAction::CancelledSponsorship => {
                    history.close(&mut running, login, date)?;
                }
                ActivityAction::TierChange => {
                    let tier = activity.tier()?;
                    history.close(&mut running, login, date)?;
                    if tier.is_one_time {
                        history.push_one_time(login, tier, date);
                    } else {
                        history.open(&mut running, login, tier, date, true)?;
                    }
                }
                ActivityAction::Refund => {
                    let tier = activity.tier()?;
                    history.refunds.push(RefundEvidence {
                        sponsee_id: login.to_string(),
                        refunded_on: date,
                        amount_cents: tier.monthly_price_in_cents,
                    });
                }
                ActivityAction::PendingChange | ActivityAction::SponsorMatchDisabled => {
                    debug!(
                        action = ?activity.action,
                        login,
                        %date,
                        "activity has no billing effect"
                    );
                }
                ActivityAction::Unknown => {
                    warn!(login, %date, "skipping unrecognised sponsors activity");
                }
            }
        }

        debug!(
            records = history.records.len(),
            one_time = history.one_time.len(),
            refunds = history.refunds.len(),
            still_running = running.len(),
            "activity log replayed"
        );
        Ok(history)
    }

    /// Builds the full ledger, one-time payments and refunds included.
    pub fn generate(&self, report_end: NaiveDate) -> Result<Vec<PaymentEvent>, LedgerError> {
        let one_time = OneTimePayments::new(self.one_time.clone());
        let refunds = RefundAdjustments::new(self.refunds.clone());
        generate_ledger_with_adjustments(&self.records, report_end, &[&one_time, &refunds])
    }

    fn open(
        &mut self,
        running: &mut HashMap<String, usize>,
        login: &str,
        tier: &SponsorsTier,
        date: NaiveDate,
        continues: bool,
    ) -> Result<(), ActivityError> {
        if running.contains_key(login) {
            return Err(ActivityError::AlreadySponsored {
                login: login.to_string(),
                date,
            });
        }
        running.insert(login.to_string(), self.records.len());
        let mut record = SponsorshipRecord::new(login, tier.monthly_price_in_cents, date);
        record.continues = continues;
        self.records.push(record);
        Ok(())
    }

    fn close(
        &mut self,
        running: &mut HashMap<String, usize>,
        login: &str,
        date: NaiveDate,
    ) -> Result<(), ActivityError> {
        let idx = running.remove(login).ok_or_else(|| ActivityError::NotSponsored {
            login: login.to_string(),
            date,
        })?;
        self.records[idx].ended_on = Some(date);
        Ok(())
    }

    fn push_one_time(&mut self, login: &str, tier: &SponsorsTier, date: NaiveDate) {
        self.one_time.push(OneTimePayment {
            sponsee_id: login.to_string(),
            paid_on: date,
            amount_cents: tier.monthly_price_in_cents,
        });
    }
}
