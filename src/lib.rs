#![doc(test(attr(deny(warnings))))]

//! Sponsor Ledger reconstructs the payments GitHub Sponsors would have taken
//! from a sponsor's account, using only sponsorship start and cancellation
//! history.
//!
//! The heart of the crate is [`ledger::generate_ledger`]: it replays every
//! sponsorship start and end in date order through a per-run
//! [`ledger::BillingState`], which tracks the account-wide billing day, and
//! emits an immediate charge per sponsorship plus monthly charges on that
//! billing day.

pub mod activity;
pub mod cli;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod report;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with the default filter and emits a startup
/// debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(None);
        tracing::debug!("Sponsor Ledger tracing initialized.");
    });
}
