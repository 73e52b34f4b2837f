use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::Date;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub enum DayOfWeekTO {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}
#[cfg(feature = "service-impl")]
impl From<worklog_utils::DayOfWeek> for DayOfWeekTO {
    fn from(day_of_week: worklog_utils::DayOfWeek) -> Self {
        match day_of_week {
            worklog_utils::DayOfWeek::Monday => Self::Monday,
            worklog_utils::DayOfWeek::Tuesday => Self::Tuesday,
            worklog_utils::DayOfWeek::Wednesday => Self::Wednesday,
            worklog_utils::DayOfWeek::Thursday => Self::Thursday,
            worklog_utils::DayOfWeek::Friday => Self::Friday,
            worklog_utils::DayOfWeek::Saturday => Self::Saturday,
            worklog_utils::DayOfWeek::Sunday => Self::Sunday,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub enum ActivityStatusTO {
    Done,
    InProgress,
    Pending,
}
#[cfg(feature = "service-impl")]
impl From<service::activity::ActivityStatus> for ActivityStatusTO {
    fn from(status: service::activity::ActivityStatus) -> Self {
        match status {
            service::activity::ActivityStatus::Done => Self::Done,
            service::activity::ActivityStatus::InProgress => Self::InProgress,
            service::activity::ActivityStatus::Pending => Self::Pending,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub enum DayStatusTO {
    Completed,
    InProgress,
    Logged,
}
#[cfg(feature = "service-impl")]
impl From<service::aggregation::DayStatus> for DayStatusTO {
    fn from(status: service::aggregation::DayStatus) -> Self {
        match status {
            service::aggregation::DayStatus::Completed => Self::Completed,
            service::aggregation::DayStatus::InProgress => Self::InProgress,
            service::aggregation::DayStatus::Logged => Self::Logged,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HolidayTO {
    pub date: Date,
    pub name: Arc<str>,
}
#[cfg(feature = "service-impl")]
impl From<&service::calendar::Holiday> for HolidayTO {
    fn from(holiday: &service::calendar::Holiday) -> Self {
        Self {
            date: holiday.date,
            name: holiday.name.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CalendarDayTO {
    pub date: Date,
    pub day_of_week: DayOfWeekTO,
    pub is_working_day: bool,
    #[serde(default)]
    pub holiday_name: Option<Arc<str>>,
    pub quota_minutes: u32,
}
#[cfg(feature = "service-impl")]
impl From<&service::quota::CalendarDay> for CalendarDayTO {
    fn from(day: &service::quota::CalendarDay) -> Self {
        Self {
            date: day.date,
            day_of_week: day.day_of_week.into(),
            is_working_day: day.is_working_day,
            holiday_name: day.holiday_name.clone(),
            quota_minutes: day.quota_minutes,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MonthQuotaTO {
    pub year: i32,
    pub month: u8,
    pub working_days: u32,
    pub required_minutes: u32,
}
#[cfg(feature = "service-impl")]
impl From<&service::quota::MonthQuota> for MonthQuotaTO {
    fn from(quota: &service::quota::MonthQuota) -> Self {
        Self {
            year: quota.year,
            month: quota.month.into(),
            working_days: quota.working_days,
            required_minutes: quota.required_minutes,
        }
    }
}

/// Calendar days of a month together with its quota.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CalendarMonthTO {
    pub quota: MonthQuotaTO,
    pub days: Arc<[CalendarDayTO]>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PeriodSummaryTO {
    pub period_start: Date,
    pub period_end: Date,
    pub working_days_count: u32,
    pub required_minutes: u32,
    pub worked_minutes: u32,
    pub completion_percentage: u8,
}
#[cfg(feature = "service-impl")]
impl From<&service::progress::PeriodSummary> for PeriodSummaryTO {
    fn from(summary: &service::progress::PeriodSummary) -> Self {
        Self {
            period_start: summary.period_start,
            period_end: summary.period_end,
            working_days_count: summary.working_days_count,
            required_minutes: summary.required_minutes,
            worked_minutes: summary.worked_minutes,
            completion_percentage: summary.completion_percentage,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MonthOverviewTO {
    pub summary: PeriodSummaryTO,
    pub month_progress_percentage: u8,
    pub completed_days: Arc<[Date]>,
    pub in_progress_days: Arc<[Date]>,
}
#[cfg(feature = "service-impl")]
impl From<&service::dashboard::MonthOverview> for MonthOverviewTO {
    fn from(overview: &service::dashboard::MonthOverview) -> Self {
        Self {
            summary: (&overview.summary).into(),
            month_progress_percentage: overview.month_progress_percentage,
            completed_days: overview.completed_days.clone(),
            in_progress_days: overview.in_progress_days.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CalendarDayReportTO {
    pub day: CalendarDayTO,
    pub worked_minutes: u32,
    pub record_count: u32,
    #[serde(default)]
    pub status: Option<DayStatusTO>,
    pub completion_percentage: u8,
}
#[cfg(feature = "service-impl")]
impl From<&service::progress::CalendarDayReport> for CalendarDayReportTO {
    fn from(report: &service::progress::CalendarDayReport) -> Self {
        Self {
            day: (&report.day).into(),
            worked_minutes: report.worked_minutes,
            record_count: report.record_count,
            status: report.status.map(DayStatusTO::from),
            completion_percentage: report.completion_percentage,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DayBucketTO {
    pub date: Date,
    pub total_minutes: u32,
    pub record_count: u32,
    pub is_working_day: bool,
    pub status: DayStatusTO,
}
#[cfg(feature = "service-impl")]
impl From<&service::aggregation::DayBucket> for DayBucketTO {
    fn from(bucket: &service::aggregation::DayBucket) -> Self {
        Self {
            date: bucket.date,
            total_minutes: bucket.total_minutes,
            record_count: bucket.record_count,
            is_working_day: bucket.is_working_day,
            status: bucket.status.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MemberSummaryTO {
    pub user_id: Uuid,
    pub name: Arc<str>,
    pub summary: PeriodSummaryTO,
}
#[cfg(feature = "service-impl")]
impl From<&service::progress::MemberSummary> for MemberSummaryTO {
    fn from(member: &service::progress::MemberSummary) -> Self {
        Self {
            user_id: member.member.user_id,
            name: member.member.name.clone(),
            summary: (&member.summary).into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TeamStatisticsTO {
    pub members: Arc<[MemberSummaryTO]>,
    pub average_completion_rate: u8,
    pub members_with_full_completion: u32,
    #[serde(default)]
    pub top_performer: Option<MemberSummaryTO>,
}
#[cfg(feature = "service-impl")]
impl From<&service::progress::TeamStatistics> for TeamStatisticsTO {
    fn from(statistics: &service::progress::TeamStatistics) -> Self {
        Self {
            members: statistics
                .members
                .iter()
                .map(MemberSummaryTO::from)
                .collect(),
            average_completion_rate: statistics.average_completion_rate,
            members_with_full_completion: statistics.members_with_full_completion,
            top_performer: statistics.top_performer.as_ref().map(MemberSummaryTO::from),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ActivityRowTO {
    pub day_index: u32,
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: Date,
    pub minutes_spent: u32,
    pub status: ActivityStatusTO,
    pub title: Arc<str>,
    #[serde(default)]
    pub category: Option<Arc<str>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DayTotalRowTO {
    pub day_index: u32,
    pub date: Date,
    pub total_minutes: u32,
}

/// Report rows keep their position, a `DayTotal` closes each day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type")]
pub enum ReportRowTO {
    Activity(ActivityRowTO),
    DayTotal(DayTotalRowTO),
}
#[cfg(feature = "service-impl")]
impl From<&service::report::ReportRow> for ReportRowTO {
    fn from(row: &service::report::ReportRow) -> Self {
        match row {
            service::report::ReportRow::Activity(activity) => Self::Activity(ActivityRowTO {
                day_index: activity.day_index,
                id: activity.id,
                user_id: activity.user_id,
                date: activity.date,
                minutes_spent: activity.minutes_spent,
                status: activity.status.into(),
                title: activity.title.clone(),
                category: activity.category.clone(),
            }),
            service::report::ReportRow::DayTotal(total) => Self::DayTotal(DayTotalRowTO {
                day_index: total.day_index,
                date: total.date,
                total_minutes: total.total_minutes,
            }),
        }
    }
}
