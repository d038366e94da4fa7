//! The account-wide billing day.
//!
//! GitHub consolidates recurring sponsorship charges onto one day of the
//! month. That day is set by whichever sponsorship takes the account from
//! zero to one active sponsorship, and it is forgotten once the last active
//! sponsorship ends:
//!
//! | State    | `active_count` | anchor  |
//! |----------|----------------|---------|
//! | Dormant  | 0              | none    |
//! | Anchored | >= 1           | 1..=31  |
//!
//! A [`BillingState`] lives for a single reconstruction run and is never
//! shared between runs.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::errors::BillingError;

/// Coarse phase of a [`BillingState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingPhase {
    Dormant,
    Anchored,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BillingState {
    anchor_day_of_month: Option<u32>,
    active_count: usize,
}

impl BillingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a sponsorship starting on `date`.
    ///
    /// Returns `true` when this start brought the account out of dormancy and
    /// therefore set the anchor to `date`'s day of month.
    pub fn on_sponsorship_started(&mut self, date: NaiveDate) -> bool {
        self.active_count += 1;
        if self.anchor_day_of_month.is_some() {
            return false;
        }
        self.anchor_day_of_month = Some(date.day());
        debug!(anchor_day = date.day(), %date, "billing anchor established");
        true
    }

    /// Registers the end of one active sponsorship, clearing the anchor when
    /// it was the last one.
    pub fn on_sponsorship_ended(&mut self) -> Result<(), BillingError> {
        self.active_count = self
            .active_count
            .checked_sub(1)
            .ok_or(BillingError::NoActiveSponsorships)?;
        if self.active_count == 0 {
            debug!(
                previous_anchor = ?self.anchor_day_of_month,
                "billing anchor cleared"
            );
            self.anchor_day_of_month = None;
        }
        Ok(())
    }

    pub fn current_anchor(&self) -> Result<u32, BillingError> {
        match (self.active_count, self.anchor_day_of_month) {
            (0, _) | (_, None) => Err(BillingError::Dormant),
            (_, Some(day)) => Ok(day),
        }
    }

    pub fn active_count(&self) -> usize {
        self.active_count
    }

    pub fn phase(&self) -> BillingPhase {
        if self.active_count == 0 {
            BillingPhase::Dormant
        } else {
            BillingPhase::Anchored
        }
    }
}
