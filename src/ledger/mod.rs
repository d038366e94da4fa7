//! Sponsorship records, the billing-day state machine, and ledger
//! reconstruction.

pub mod adjustments;
pub mod billing_state;
pub mod calendar;
pub mod generator;
pub mod payment;
pub mod sponsorship;
pub mod summary;
pub mod timeline;

pub use adjustments::{
    AdjustmentContext, LedgerAdjustment, OneTimePayment, OneTimePayments, RefundAdjustments,
    RefundEvidence,
};
pub use billing_state::{BillingPhase, BillingState};
pub use generator::{generate_ledger, generate_ledger_with_adjustments};
pub use payment::{PaymentEvent, PaymentKind};
pub use sponsorship::{validate_records, SponsorshipRecord};
pub use summary::{ledger_total, summarize_by_month, MonthlyTotal};
pub use timeline::{build_timeline, timeline_order, TimelineEvent};
