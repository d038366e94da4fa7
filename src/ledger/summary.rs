use std::collections::BTreeMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::payment::PaymentEvent;

/// Net amount charged within one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    pub year: i32,
    pub month: u32,
    pub total_cents: i64,
    pub payment_count: usize,
    pub refund_count: usize,
}

impl MonthlyTotal {
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Groups a ledger into per-month totals, oldest month first. Months with no
/// activity are omitted.
///
/// These line up with GitHub's running sponsorship total queried month by
/// month, which is the only external figure available to check a
/// reconstruction against.
pub fn summarize_by_month(ledger: &[PaymentEvent]) -> Vec<MonthlyTotal> {
    let mut months: BTreeMap<(i32, u32), MonthlyTotal> = BTreeMap::new();
    for event in ledger {
        let key = (event.charged_on.year(), event.charged_on.month());
        let total = months.entry(key).or_insert_with(|| MonthlyTotal {
            year: key.0,
            month: key.1,
            total_cents: 0,
            payment_count: 0,
            refund_count: 0,
        });
        total.total_cents += event.amount_cents;
        if event.is_refund() {
            total.refund_count += 1;
        } else {
            total.payment_count += 1;
        }
    }
    months.into_values().collect()
}

/// Sum of every entry, refunds included.
pub fn ledger_total(ledger: &[PaymentEvent]) -> i64 {
    ledger.iter().map(|event| event.amount_cents).sum()
}
