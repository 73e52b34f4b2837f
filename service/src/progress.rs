//! Completion percentages for single users and for a team.

use std::sync::Arc;

use time::{Date, Month};
use uuid::Uuid;
use worklog_utils::DateRange;

use crate::activity::ActivityRecord;
use crate::aggregation::{bucket_by_day, worked_minutes, DayBucket, DayStatus};
use crate::quota::{month_range, CalendarDay, WorkCalendar};
use crate::ServiceError;

/// `round(worked / required * 100)`, capped at 100. Zero if nothing is
/// required.
pub fn completion_percentage(worked_minutes: u32, required_minutes: u32) -> u8 {
    if required_minutes == 0 {
        return 0;
    }
    let worked = worked_minutes as u64;
    let required = required_minutes as u64;
    ((worked * 100 + required / 2) / required).min(100) as u8
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PeriodSummary {
    pub period_start: Date,
    /// Before `period_start` if the period has no days yet.
    pub period_end: Date,
    pub working_days_count: u32,
    pub required_minutes: u32,
    pub worked_minutes: u32,
    pub completion_percentage: u8,
}

pub fn summary_for_range(
    calendar: &WorkCalendar,
    records: &[ActivityRecord],
    range: DateRange,
) -> PeriodSummary {
    let buckets = bucket_by_day(calendar, records, range);
    summary_from_buckets(calendar, &buckets, range)
}

pub fn summary_from_buckets(
    calendar: &WorkCalendar,
    buckets: &[DayBucket],
    range: DateRange,
) -> PeriodSummary {
    let required_minutes = calendar.required_minutes_between(range);
    let worked_minutes = worked_minutes(buckets);
    PeriodSummary {
        period_start: range.from,
        period_end: range.to,
        working_days_count: calendar.working_days_between(range),
        required_minutes,
        worked_minutes,
        completion_percentage: completion_percentage(worked_minutes, required_minutes),
    }
}

pub fn period_summary(
    calendar: &WorkCalendar,
    records: &[ActivityRecord],
    year: i32,
    month: Month,
) -> Result<PeriodSummary, ServiceError> {
    Ok(summary_for_range(
        calendar,
        records,
        month_range(year, month)?,
    ))
}

/// Like [`period_summary`] but only the days up to and including `today`
/// count.
pub fn period_summary_until(
    calendar: &WorkCalendar,
    records: &[ActivityRecord],
    year: i32,
    month: Month,
    today: Date,
) -> Result<PeriodSummary, ServiceError> {
    Ok(summary_for_range(
        calendar,
        records,
        month_range(year, month)?.until(today),
    ))
}

/// Share of the required minutes of the month which lie on or before
/// `today`.
pub fn elapsed_progress_percentage(
    calendar: &WorkCalendar,
    year: i32,
    month: Month,
    today: Date,
) -> Result<u8, ServiceError> {
    Ok(completion_percentage(
        calendar.required_minutes_until(year, month, today)?,
        calendar.required_minutes(year, month)?,
    ))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarDayReport {
    pub day: CalendarDay,
    pub worked_minutes: u32,
    pub record_count: u32,
    pub status: Option<DayStatus>,
    pub completion_percentage: u8,
}

/// Every day of the month with the worked minutes of the records.
pub fn calendar_month_report(
    calendar: &WorkCalendar,
    records: &[ActivityRecord],
    year: i32,
    month: Month,
) -> Result<Arc<[CalendarDayReport]>, ServiceError> {
    let range = month_range(year, month)?;
    let buckets = bucket_by_day(calendar, records, range);
    let mut buckets = buckets.iter().peekable();
    Ok(calendar
        .days(range)
        .into_iter()
        .map(|day| {
            let bucket = buckets.next_if(|bucket| bucket.date == day.date);
            let worked_minutes = bucket.map(|bucket| bucket.total_minutes).unwrap_or(0);
            CalendarDayReport {
                worked_minutes,
                record_count: bucket.map(|bucket| bucket.record_count).unwrap_or(0),
                status: bucket.map(|bucket| bucket.status),
                completion_percentage: completion_percentage(worked_minutes, day.quota_minutes),
                day,
            }
        })
        .collect())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamMember {
    pub user_id: Uuid,
    pub name: Arc<str>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberActivities {
    pub member: TeamMember,
    pub records: Arc<[ActivityRecord]>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberSummary {
    pub member: TeamMember,
    pub summary: PeriodSummary,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamStatistics {
    pub members: Arc<[MemberSummary]>,
    pub average_completion_rate: u8,
    pub members_with_full_completion: u32,
    pub top_performer: Option<MemberSummary>,
}

impl TeamStatistics {
    pub fn from_summaries(members: Arc<[MemberSummary]>) -> Self {
        let average_completion_rate = if members.is_empty() {
            0
        } else {
            let total: u32 = members
                .iter()
                .map(|member| member.summary.completion_percentage as u32)
                .sum();
            let count = members.len() as u32;
            ((total + count / 2) / count) as u8
        };
        let members_with_full_completion = members
            .iter()
            .filter(|member| member.summary.completion_percentage == 100)
            .count() as u32;

        let mut top_performer: Option<&MemberSummary> = None;
        for member in members.iter() {
            match top_performer {
                Some(top)
                    if top.summary.completion_percentage
                        >= member.summary.completion_percentage => {}
                _ => top_performer = Some(member),
            }
        }
        let top_performer = top_performer.cloned();

        Self {
            members,
            average_completion_rate,
            members_with_full_completion,
            top_performer,
        }
    }
}

fn team_for_range(
    calendar: &WorkCalendar,
    members: &[MemberActivities],
    range: DateRange,
) -> TeamStatistics {
    let summaries: Arc<[MemberSummary]> = members
        .iter()
        .map(|member| MemberSummary {
            member: member.member.clone(),
            summary: summary_for_range(calendar, &member.records, range),
        })
        .collect();
    TeamStatistics::from_summaries(summaries)
}

pub fn team_summaries(
    calendar: &WorkCalendar,
    members: &[MemberActivities],
    year: i32,
    month: Month,
) -> Result<TeamStatistics, ServiceError> {
    Ok(team_for_range(calendar, members, month_range(year, month)?))
}

/// Team statistics where only the days up to and including `today` count.
pub fn team_summaries_until(
    calendar: &WorkCalendar,
    members: &[MemberActivities],
    year: i32,
    month: Month,
    today: Date,
) -> Result<TeamStatistics, ServiceError> {
    Ok(team_for_range(
        calendar,
        members,
        month_range(year, month)?.until(today),
    ))
}
