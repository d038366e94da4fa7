use std::cmp::Ordering;

use chrono::NaiveDate;

use super::sponsorship::SponsorshipRecord;

/// A point on the combined sponsorship timeline. `record` indexes the input
/// slice the timeline was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineEvent {
    Start { date: NaiveDate, record: usize },
    End { date: NaiveDate, record: usize },
}

impl TimelineEvent {
    pub fn date(&self) -> NaiveDate {
        match self {
            TimelineEvent::Start { date, .. } | TimelineEvent::End { date, .. } => *date,
        }
    }

    pub fn record(&self) -> usize {
        match self {
            TimelineEvent::Start { record, .. } | TimelineEvent::End { record, .. } => *record,
        }
    }

    fn same_day_rank(&self) -> u8 {
        match self {
            TimelineEvent::Start { .. } => 0,
            TimelineEvent::End { .. } => 1,
        }
    }
}

/// Orders timeline events by date; on the same date every start comes before
/// every end, so a same-day swap never drops the account to dormant.
pub fn timeline_order(a: &TimelineEvent, b: &TimelineEvent) -> Ordering {
    a.date()
        .cmp(&b.date())
        .then_with(|| a.same_day_rank().cmp(&b.same_day_rank()))
}

/// Collects start and end events of every record. Events that compare equal
/// keep input order.
pub fn build_timeline(records: &[SponsorshipRecord]) -> Vec<TimelineEvent> {
    let mut events = Vec::with_capacity(records.len() * 2);
    for (record, sponsorship) in records.iter().enumerate() {
        events.push(TimelineEvent::Start {
            date: sponsorship.started_on,
            record,
        });
        if let Some(date) = sponsorship.ended_on {
            events.push(TimelineEvent::End { date, record });
        }
    }
    events.sort_by(timeline_order);
    events
}
