//! Grouping by local calendar day

use std::collections::BTreeMap;

use chrono::{DateTime, Days, Duration, FixedOffset, NaiveDate, Utc};

use crate::models::Interval;
use crate::types::local_midnight;

/// Calendar day `at` falls on in `offset`
pub fn local_date(at: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    at.with_timezone(&offset).date_naive()
}

/// Part of an interval that falls within one local day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DaySegment {
    pub date: NaiveDate,
    /// Hours since local midnight, 0.0..=24.0
    pub start_hour: f64,
    pub end_hour: f64,
    pub duration: Duration,
}

/// Splits an interval at every local midnight it crosses.
///
/// A zero-length interval yields a single zero-length segment.
pub fn split_by_day<I: Interval>(interval: &I, offset: FixedOffset) -> Vec<DaySegment> {
    let start = interval.start();
    let end = start + interval.duration();

    let mut segments = Vec::new();
    let mut cursor = start;
    loop {
        let date = local_date(cursor, offset);
        let midnight = local_midnight(date, offset);
        let next_midnight = date
            .checked_add_days(Days::new(1))
            .map(|next| local_midnight(next, offset))
            .unwrap_or(end);
        let segment_end = end.min(next_midnight);

        segments.push(DaySegment {
            date,
            start_hour: hours(cursor - midnight),
            end_hour: hours(segment_end - midnight),
            duration: segment_end - cursor,
        });

        if segment_end >= end {
            break;
        }
        cursor = segment_end;
    }
    segments
}

pub(crate) fn hours(duration: Duration) -> f64 {
    duration.num_seconds() as f64 / 3600.0
}

pub(crate) fn minutes(duration: Duration) -> f64 {
    duration.num_seconds() as f64 / 60.0
}

/// Running sum and count per day, iterated in date order
#[derive(Debug, Default)]
pub(crate) struct DailyTotals<T> {
    days: BTreeMap<NaiveDate, (T, usize)>,
}

impl<T> DailyTotals<T>
where
    T: Default + std::ops::AddAssign + Copy,
{
    pub fn new() -> Self {
        Self {
            days: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, date: NaiveDate, value: T) {
        let entry = self.days.entry(date).or_default();
        entry.0 += value;
        entry.1 += 1;
    }

    /// `(date, total, count)` in ascending date order
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, T, usize)> + '_ {
        self.days.iter().map(|(date, (total, count))| (*date, *total, *count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct Span(DateTime<Utc>, DateTime<Utc>);

    impl Interval for Span {
        fn start(&self) -> DateTime<Utc> {
            self.0
        }

        fn end(&self) -> DateTime<Utc> {
            self.1
        }
    }

    fn utc(d: u32, h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, d, h, m, 0).unwrap()
    }

    #[test]
    fn test_interval_within_one_day() {
        let offset = FixedOffset::east_opt(0).unwrap();
        let segments = split_by_day(&Span(utc(3, 13, 0), utc(3, 14, 30)), offset);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].start_hour, 13.0);
        assert_eq!(segments[0].end_hour, 14.5);
        assert_eq!(segments[0].duration, Duration::minutes(90));
    }

    #[test]
    fn test_overnight_interval_splits_at_local_midnight() {
        // 22:00 → 06:00 local at UTC+1
        let offset = FixedOffset::east_opt(3600).unwrap();
        let segments = split_by_day(&Span(utc(3, 21, 0), utc(4, 5, 0)), offset);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].date, NaiveDate::from_ymd_opt(2024, 2, 3).unwrap());
        assert_eq!(segments[0].start_hour, 22.0);
        assert_eq!(segments[0].end_hour, 24.0);
        assert_eq!(segments[1].date, NaiveDate::from_ymd_opt(2024, 2, 4).unwrap());
        assert_eq!(segments[1].start_hour, 0.0);
        assert_eq!(segments[1].end_hour, 6.0);
    }

    #[test]
    fn test_reversed_interval_is_zero_length() {
        let offset = FixedOffset::east_opt(0).unwrap();
        let segments = split_by_day(&Span(utc(3, 10, 0), utc(3, 9, 0)), offset);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].duration, Duration::zero());
    }

    #[test]
    fn test_daily_totals_are_date_ordered() {
        let mut totals = DailyTotals::new();
        let later = NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();
        let earlier = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        totals.add(later, 1.5);
        totals.add(earlier, 2.0);
        totals.add(later, 0.5);
        let rows: Vec<_> = totals.iter().collect();
        assert_eq!(rows, vec![(earlier, 2.0, 1), (later, 2.0, 2)]);
    }
}
