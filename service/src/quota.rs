use std::sync::Arc;

use time::{Date, Month};
use worklog_utils::{DateRange, DayOfWeek};

use crate::calendar::{HolidaySet, HolidayTable};
use crate::ServiceError;

pub const FULL_DAY_MINUTES: u32 = 480;
pub const SHORT_DAY_MINUTES: u32 = 360;

/// Required minutes per working day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuotaPolicy {
    pub full_day_minutes: u32,
    pub short_day_minutes: u32,
    pub short_day: DayOfWeek,
}

impl Default for QuotaPolicy {
    fn default() -> Self {
        Self {
            full_day_minutes: FULL_DAY_MINUTES,
            short_day_minutes: SHORT_DAY_MINUTES,
            short_day: DayOfWeek::Friday,
        }
    }
}

impl QuotaPolicy {
    /// Quota of a regular day of this weekday. Holidays are not considered.
    pub fn minutes_for(&self, day_of_week: DayOfWeek) -> u32 {
        if day_of_week.is_weekend() {
            0
        } else if day_of_week == self.short_day {
            self.short_day_minutes
        } else {
            self.full_day_minutes
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: Date,
    pub day_of_week: DayOfWeek,
    pub is_working_day: bool,
    pub holiday_name: Option<Arc<str>>,
    pub quota_minutes: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthQuota {
    pub year: i32,
    pub month: Month,
    pub working_days: u32,
    pub required_minutes: u32,
}

pub fn month_range(year: i32, month: Month) -> Result<DateRange, ServiceError> {
    DateRange::for_month(year, month).map_err(|_| ServiceError::invalid_value("year"))
}

/// Holidays and daily quotas combined.
///
/// Built once from the configuration and shared as `Arc<WorkCalendar>`
/// between all services, so every endpoint classifies days the same way.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkCalendar {
    holidays: HolidayTable,
    policy: QuotaPolicy,
}

impl WorkCalendar {
    pub fn new(holidays: HolidayTable, policy: QuotaPolicy) -> Self {
        Self { holidays, policy }
    }

    pub fn holiday_table(&self) -> &HolidayTable {
        &self.holidays
    }

    pub fn is_working_day(&self, date: Date) -> bool {
        self.holidays.is_working_day(date)
    }

    pub fn holidays_for_year(&self, year: i32) -> HolidaySet {
        self.holidays.holidays_for_year(year)
    }

    /// Required minutes for a single date, zero on non-working days.
    pub fn quota_for_day(&self, date: Date) -> u32 {
        if self.is_working_day(date) {
            self.policy.minutes_for(date.weekday().into())
        } else {
            0
        }
    }

    pub fn calendar_day(&self, date: Date) -> CalendarDay {
        let is_working_day = self.is_working_day(date);
        CalendarDay {
            date,
            day_of_week: date.weekday().into(),
            is_working_day,
            holiday_name: self.holidays.holiday_name(date),
            quota_minutes: if is_working_day {
                self.policy.minutes_for(date.weekday().into())
            } else {
                0
            },
        }
    }

    pub fn days(&self, range: DateRange) -> Vec<CalendarDay> {
        range.days().map(|date| self.calendar_day(date)).collect()
    }

    pub fn working_days_between(&self, range: DateRange) -> u32 {
        range
            .days()
            .filter(|date| self.is_working_day(*date))
            .count() as u32
    }

    pub fn required_minutes_between(&self, range: DateRange) -> u32 {
        range.days().map(|date| self.quota_for_day(date)).sum()
    }

    pub fn working_days_in_month(&self, year: i32, month: Month) -> Result<u32, ServiceError> {
        Ok(self.working_days_between(month_range(year, month)?))
    }

    pub fn required_minutes(&self, year: i32, month: Month) -> Result<u32, ServiceError> {
        Ok(self.required_minutes_between(month_range(year, month)?))
    }

    /// Month quota where days after `today` do not count.
    pub fn working_days_until(
        &self,
        year: i32,
        month: Month,
        today: Date,
    ) -> Result<u32, ServiceError> {
        Ok(self.working_days_between(month_range(year, month)?.until(today)))
    }

    pub fn required_minutes_until(
        &self,
        year: i32,
        month: Month,
        today: Date,
    ) -> Result<u32, ServiceError> {
        Ok(self.required_minutes_between(month_range(year, month)?.until(today)))
    }

    pub fn month_quota(&self, year: i32, month: Month) -> Result<MonthQuota, ServiceError> {
        let range = month_range(year, month)?;
        Ok(MonthQuota {
            year,
            month,
            working_days: self.working_days_between(range),
            required_minutes: self.required_minutes_between(range),
        })
    }
}
