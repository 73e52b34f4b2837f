//! Day grouped report rows with a subtotal after every day.

use std::sync::Arc;

use time::Date;
use uuid::Uuid;
use worklog_utils::DateRange;

use crate::activity::{ActivityRecord, ActivityStatus};
use crate::aggregation::{clamp_minutes, group_by_day};

/// Written into the status column of day total rows.
pub const DAY_TOTAL_MARKER: &str = "TOTAL";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivityRow {
    /// 1-based position of the day in the report.
    pub day_index: u32,
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: Date,
    pub minutes_spent: u32,
    pub status: ActivityStatus,
    pub title: Arc<str>,
    pub category: Option<Arc<str>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayTotalRow {
    pub day_index: u32,
    pub date: Date,
    pub total_minutes: u32,
}

/// A row of the report table.
///
/// Rows are positional. A `DayTotal` directly follows the last activity of
/// its day and must not be moved by consumers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReportRow {
    Activity(ActivityRow),
    DayTotal(DayTotalRow),
}

impl ReportRow {
    pub fn day_index(&self) -> u32 {
        match self {
            ReportRow::Activity(row) => row.day_index,
            ReportRow::DayTotal(row) => row.day_index,
        }
    }

    pub fn date(&self) -> Date {
        match self {
            ReportRow::Activity(row) => row.date,
            ReportRow::DayTotal(row) => row.date,
        }
    }

    pub fn minutes(&self) -> u32 {
        match self {
            ReportRow::Activity(row) => row.minutes_spent,
            ReportRow::DayTotal(row) => row.total_minutes,
        }
    }

    pub fn is_day_total(&self) -> bool {
        matches!(self, ReportRow::DayTotal(_))
    }

    /// Text of the row discriminator column.
    pub fn marker(&self) -> &'static str {
        match self {
            ReportRow::Activity(row) => match row.status {
                ActivityStatus::Done => "done",
                ActivityStatus::InProgress => "in-progress",
                ActivityStatus::Pending => "pending",
            },
            ReportRow::DayTotal(_) => DAY_TOTAL_MARKER,
        }
    }
}

pub fn build_report_rows(records: &[ActivityRecord], range: DateRange) -> Arc<[ReportRow]> {
    let mut rows = Vec::with_capacity(records.len());
    for ((date, day_records), day_index) in group_by_day(records, range).into_iter().zip(1u32..) {
        let mut total_minutes = 0;
        for record in day_records {
            let minutes_spent = clamp_minutes(record.minutes_spent);
            total_minutes += minutes_spent;
            rows.push(ReportRow::Activity(ActivityRow {
                day_index,
                id: record.id,
                user_id: record.user_id,
                date,
                minutes_spent,
                status: record.status,
                title: record.title.clone(),
                category: record.category.clone(),
            }));
        }
        rows.push(ReportRow::DayTotal(DayTotalRow {
            day_index,
            date,
            total_minutes,
        }));
    }
    rows.into()
}
