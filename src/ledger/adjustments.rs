//! Post-processing hooks applied to a reconstructed ledger.
//!
//! Sponsorship metadata alone says nothing about refunds or one-time tier
//! payments, so they are never derived by the generator. Callers holding
//! outside evidence of either feed it in through a [`LedgerAdjustment`].

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::payment::PaymentEvent;
use super::sponsorship::SponsorshipRecord;
use crate::errors::LedgerError;

/// Read-only view of the run an adjustment is applied to.
pub struct AdjustmentContext<'a> {
    records: &'a [SponsorshipRecord],
    report_end: NaiveDate,
}

impl<'a> AdjustmentContext<'a> {
    pub fn new(records: &'a [SponsorshipRecord], report_end: NaiveDate) -> Self {
        Self {
            records,
            report_end,
        }
    }

    pub fn report_end(&self) -> NaiveDate {
        self.report_end
    }

    pub fn knows_sponsee(&self, sponsee_id: &str) -> bool {
        self.records
            .iter()
            .any(|record| record.sponsee_id == sponsee_id)
    }
}

/// Mutates a freshly generated ledger. The ledger is re-sorted afterwards.
pub trait LedgerAdjustment {
    fn adjust(
        &self,
        context: &AdjustmentContext<'_>,
        ledger: &mut Vec<PaymentEvent>,
    ) -> Result<(), LedgerError>;
}

/// Evidence that GitHub returned money to the sponsor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundEvidence {
    pub sponsee_id: String,
    pub refunded_on: NaiveDate,
    /// Positive number of cents returned.
    pub amount_cents: i64,
}

/// Appends one negative entry per piece of refund evidence.
#[derive(Debug, Clone, Default)]
pub struct RefundAdjustments {
    evidence: Vec<RefundEvidence>,
}

impl RefundAdjustments {
    pub fn new(evidence: Vec<RefundEvidence>) -> Self {
        Self { evidence }
    }
}

impl LedgerAdjustment for RefundAdjustments {
    fn adjust(
        &self,
        context: &AdjustmentContext<'_>,
        ledger: &mut Vec<PaymentEvent>,
    ) -> Result<(), LedgerError> {
        let mut unmatched = BTreeSet::new();
        for refund in &self.evidence {
            let known = context.knows_sponsee(&refund.sponsee_id)
                || ledger
                    .iter()
                    .any(|event| event.sponsee_id == refund.sponsee_id);
            if !known {
                return Err(LedgerError::UnknownSponsee(refund.sponsee_id.clone()));
            }
            if refund.refunded_on >= context.report_end() {
                debug!(
                    sponsee = %refund.sponsee_id,
                    refunded_on = %refund.refunded_on,
                    "refund falls after report end"
                );
                continue;
            }
            let charged_before = ledger.iter().any(|event| {
                event.sponsee_id == refund.sponsee_id
                    && !event.is_refund()
                    && event.charged_on <= refund.refunded_on
            });
            if !charged_before {
                unmatched.insert(refund.sponsee_id.as_str());
            }
            ledger.push(PaymentEvent::refund(
                refund.sponsee_id.as_str(),
                refund.amount_cents,
                refund.refunded_on,
            ));
        }
        if !unmatched.is_empty() {
            warn!(?unmatched, "refunds recorded before any reconstructed charge");
        }
        Ok(())
    }
}

/// A payment on a one-time tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneTimePayment {
    pub sponsee_id: String,
    pub paid_on: NaiveDate,
    pub amount_cents: i64,
}

/// Appends one-time tier payments. They sit outside the billing-day state
/// machine: they neither set nor hold the anchor.
#[derive(Debug, Clone, Default)]
pub struct OneTimePayments {
    payments: Vec<OneTimePayment>,
}

impl OneTimePayments {
    pub fn new(payments: Vec<OneTimePayment>) -> Self {
        Self { payments }
    }
}

impl LedgerAdjustment for OneTimePayments {
    fn adjust(
        &self,
        context: &AdjustmentContext<'_>,
        ledger: &mut Vec<PaymentEvent>,
    ) -> Result<(), LedgerError> {
        ledger.extend(
            self.payments
                .iter()
                .filter(|payment| payment.paid_on < context.report_end())
                .map(|payment| {
                    PaymentEvent::one_time(
                        payment.sponsee_id.as_str(),
                        payment.amount_cents,
                        payment.paid_on,
                    )
                }),
        );
        Ok(())
    }
}
