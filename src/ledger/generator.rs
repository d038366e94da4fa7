//! Rebuilds the payment ledger from sponsorship start/stop metadata.

use chrono::NaiveDate;
use tracing::{debug, info};

use super::adjustments::{AdjustmentContext, LedgerAdjustment};
use super::billing_state::BillingState;
use super::calendar::monthly_dates_between;
use super::payment::PaymentEvent;
use super::sponsorship::{validate_records, SponsorshipRecord};
use super::timeline::{build_timeline, TimelineEvent};
use crate::errors::LedgerError;

/// Anchor-day charges owed by one sponsorship: every month's anchor date
/// strictly after `after` and strictly before `until`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RecurringSchedule {
    anchor_day: u32,
    after: NaiveDate,
    until: NaiveDate,
}

/// Reconstructs every charge GitHub would have taken for `records` before
/// `report_end` (exclusive), in ledger order.
///
/// ```
/// use chrono::NaiveDate;
/// use sponsor_ledger::ledger::{generate_ledger, SponsorshipRecord};
///
/// let day = |m, d| NaiveDate::from_ymd_opt(2020, m, d).unwrap();
/// let records = vec![SponsorshipRecord::new("octocat", 500, day(1, 5))];
/// let ledger = generate_ledger(&records, day(3, 6)).unwrap();
/// let dates: Vec<_> = ledger.iter().map(|event| event.charged_on).collect();
/// assert_eq!(dates, vec![day(1, 5), day(2, 5), day(3, 5)]);
/// ```
pub fn generate_ledger(
    records: &[SponsorshipRecord],
    report_end: NaiveDate,
) -> Result<Vec<PaymentEvent>, LedgerError> {
    validate_records(records)?;

    let mut state = BillingState::new();
    let mut schedules: Vec<Option<RecurringSchedule>> = vec![None; records.len()];
    let mut ledger = Vec::new();

    for event in build_timeline(records) {
        if event.date() >= report_end {
            break;
        }
        let record = &records[event.record()];
        match event {
            TimelineEvent::Start { date, record: idx } => {
                if !record.continues {
                    ledger.push(PaymentEvent::immediate(
                        record.sponsee_id.as_str(),
                        record.monthly_amount_cents,
                        date,
                    ));
                }
                let anchored = state.on_sponsorship_started(date);
                let anchor_day = state.current_anchor()?;
                debug!(
                    sponsee = %record.sponsee_id,
                    %date,
                    anchor_day,
                    anchored,
                    continues = record.continues,
                    active = state.active_count(),
                    "sponsorship started"
                );
                schedules[idx] = Some(RecurringSchedule {
                    anchor_day,
                    after: date,
                    until: record.charge_window_end(report_end),
                });
            }
            TimelineEvent::End { date, .. } => {
                state.on_sponsorship_ended()?;
                debug!(
                    sponsee = %record.sponsee_id,
                    %date,
                    active = state.active_count(),
                    "sponsorship ended"
                );
            }
        }
    }

    let immediate = ledger.len();
    for (record, schedule) in records.iter().zip(&schedules) {
        let Some(schedule) = schedule else {
            continue;
        };
        ledger.extend(
            monthly_dates_between(schedule.after, schedule.anchor_day, schedule.until).map(
                |charged_on| {
                    PaymentEvent::recurring(
                        record.sponsee_id.as_str(),
                        record.monthly_amount_cents,
                        charged_on,
                    )
                },
            ),
        );
    }

    ledger.sort();
    info!(
        sponsorships = records.len(),
        immediate,
        recurring = ledger.len() - immediate,
        %report_end,
        "ledger reconstructed"
    );
    Ok(ledger)
}

/// Runs [`generate_ledger`] and then each adjustment in turn, re-sorting the
/// result so adjustments can append in any order.
pub fn generate_ledger_with_adjustments(
    records: &[SponsorshipRecord],
    report_end: NaiveDate,
    adjustments: &[&dyn LedgerAdjustment],
) -> Result<Vec<PaymentEvent>, LedgerError> {
    let mut ledger = generate_ledger(records, report_end)?;
    let context = AdjustmentContext::new(records, report_end);
    for adjustment in adjustments {
        adjustment.adjust(&context, &mut ledger)?;
    }
    ledger.sort();
    Ok(ledger)
}
