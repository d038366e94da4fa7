#![allow(dead_code)]

use std::path::PathBuf;

use assert_fs::{prelude::*, TempDir};
use chrono::NaiveDate;
use sponsor_ledger::ledger::{PaymentEvent, PaymentKind, SponsorshipRecord};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

pub fn ymd(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("valid test date")
}

pub fn open(sponsee: &str, cents: i64, started_on: &str) -> SponsorshipRecord {
    SponsorshipRecord::new(sponsee, cents, ymd(started_on))
}

pub fn closed(sponsee: &str, cents: i64, started_on: &str, ended_on: &str) -> SponsorshipRecord {
    open(sponsee, cents, started_on).ended(ymd(ended_on))
}

/// `(date, kind)` pairs charged to `sponsee`, in ledger order.
pub fn charges_for(ledger: &[PaymentEvent], sponsee: &str) -> Vec<(NaiveDate, PaymentKind)> {
    ledger
        .iter()
        .filter(|event| event.sponsee_id == sponsee)
        .map(|event| (event.charged_on, event.kind))
        .collect()
}

/// Writes `contents` into a fresh temp dir, returning the dir guard and path.
pub fn fixture(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let temp = TempDir::new().expect("create temp dir");
    let file = temp.child(name);
    file.write_str(contents).expect("write fixture");
    let path = file.path().to_path_buf();
    (temp, path)
}

/// Small deterministic generator for building varied record sets.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    pub fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }
}

/// Non-overlapping sponsorship histories for a handful of sponsees.
pub fn random_records(seed: u64) -> Vec<SponsorshipRecord> {
    let mut rng = Lcg::new(seed);
    let mut records = Vec::new();
    for sponsee in 0..6 {
        let mut cursor = date(2019, 1, 1) + chrono::Duration::days(rng.below(400) as i64);
        for _ in 0..(1 + rng.below(3)) {
            let cents = 100 * (1 + rng.below(50) as i64);
            let mut record = SponsorshipRecord::new(format!("sponsee-{sponsee}"), cents, cursor);
            if rng.below(4) == 0 {
                records.push(record);
                break;
            }
            let end = cursor + chrono::Duration::days(rng.below(500) as i64);
            record = record.ended(end);
            records.push(record);
            cursor = end + chrono::Duration::days(rng.below(90) as i64);
        }
    }
    records
}
