//! Groups activity records into per-day buckets.

use std::collections::BTreeMap;
use std::sync::Arc;

use time::Date;
use tracing::{debug, warn};
use worklog_utils::DateRange;

use crate::activity::{ActivityRecord, ActivityStatus};
use crate::quota::WorkCalendar;

/// Upper bound for the minutes of a single record and of a day.
pub const MAX_MINUTES_PER_DAY: u32 = 1440;

/// Brings a stored minute value into `[0, MAX_MINUTES_PER_DAY]`.
pub fn clamp_minutes(minutes: i64) -> u32 {
    let clamped = minutes.clamp(0, MAX_MINUTES_PER_DAY as i64);
    if clamped != minutes {
        debug!("Clamped minutes from {} to {}", minutes, clamped);
    }
    clamped as u32
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DayStatus {
    /// At least one record is done.
    Completed,
    /// Nothing is done but some unfinished record has minutes.
    InProgress,
    /// Only empty unfinished records.
    Logged,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayBucket {
    pub date: Date,
    pub total_minutes: u32,
    pub record_count: u32,
    pub is_working_day: bool,
    pub status: DayStatus,
}

/// Records of the range grouped by date, in ascending date order.
///
/// Records keep their original order within a day. Records without a date
/// are skipped.
pub fn group_by_day(
    records: &[ActivityRecord],
    range: DateRange,
) -> BTreeMap<Date, Vec<&ActivityRecord>> {
    let mut days: BTreeMap<Date, Vec<&ActivityRecord>> = BTreeMap::new();
    for record in records {
        let Some(date) = record.date else {
            warn!("Skipping activity {} without a valid date", record.id);
            continue;
        };
        if range.contains(date) {
            days.entry(date).or_default().push(record);
        }
    }
    days
}

pub fn day_status(records: &[&ActivityRecord]) -> DayStatus {
    if records
        .iter()
        .any(|record| record.status == ActivityStatus::Done)
    {
        DayStatus::Completed
    } else if records
        .iter()
        .any(|record| clamp_minutes(record.minutes_spent) > 0)
    {
        DayStatus::InProgress
    } else {
        DayStatus::Logged
    }
}

pub fn bucket_by_day(
    calendar: &WorkCalendar,
    records: &[ActivityRecord],
    range: DateRange,
) -> Arc<[DayBucket]> {
    group_by_day(records, range)
        .into_iter()
        .map(|(date, records)| DayBucket {
            date,
            total_minutes: records
                .iter()
                .map(|record| clamp_minutes(record.minutes_spent))
                .sum(),
            record_count: records.len() as u32,
            is_working_day: calendar.is_working_day(date),
            status: day_status(&records),
        })
        .collect()
}

pub fn worked_minutes(buckets: &[DayBucket]) -> u32 {
    buckets.iter().map(|bucket| bucket.total_minutes).sum()
}

pub fn completed_days(buckets: &[DayBucket]) -> Arc<[Date]> {
    days_with_status(buckets, DayStatus::Completed)
}

pub fn in_progress_days(buckets: &[DayBucket]) -> Arc<[Date]> {
    days_with_status(buckets, DayStatus::InProgress)
}

fn days_with_status(buckets: &[DayBucket], status: DayStatus) -> Arc<[Date]> {
    buckets
        .iter()
        .filter(|bucket| bucket.status == status)
        .map(|bucket| bucket.date)
        .collect()
}
