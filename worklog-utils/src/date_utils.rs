use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::*;

use time::{Date, Month, Weekday};

#[derive(Debug, Error)]
pub enum WorklogDateUtilsError {
    #[error("Invalid date: {0}")]
    DateError(#[from] time::error::ComponentRange),

    #[error("Invalid day of week: {0}")]
    InvalidDayOfWeek(String),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord, Hash)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Monday => Self::Monday,
            Weekday::Tuesday => Self::Tuesday,
            Weekday::Wednesday => Self::Wednesday,
            Weekday::Thursday => Self::Thursday,
            Weekday::Friday => Self::Friday,
            Weekday::Saturday => Self::Saturday,
            Weekday::Sunday => Self::Sunday,
        }
    }
}
impl From<DayOfWeek> for Weekday {
    fn from(day_of_week: DayOfWeek) -> Self {
        match day_of_week {
            DayOfWeek::Monday => Self::Monday,
            DayOfWeek::Tuesday => Self::Tuesday,
            DayOfWeek::Wednesday => Self::Wednesday,
            DayOfWeek::Thursday => Self::Thursday,
            DayOfWeek::Friday => Self::Friday,
            DayOfWeek::Saturday => Self::Saturday,
            DayOfWeek::Sunday => Self::Sunday,
        }
    }
}

impl Display for DayOfWeek {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                DayOfWeek::Monday => "Monday",
                DayOfWeek::Tuesday => "Tuesday",
                DayOfWeek::Wednesday => "Wednesday",
                DayOfWeek::Thursday => "Thursday",
                DayOfWeek::Friday => "Friday",
                DayOfWeek::Saturday => "Saturday",
                DayOfWeek::Sunday => "Sunday",
            }
        )
    }
}

impl FromStr for DayOfWeek {
    type Err = WorklogDateUtilsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monday" | "mon" => Ok(DayOfWeek::Monday),
            "tuesday" | "tue" => Ok(DayOfWeek::Tuesday),
            "wednesday" | "wed" => Ok(DayOfWeek::Wednesday),
            "thursday" | "thu" => Ok(DayOfWeek::Thursday),
            "friday" | "fri" => Ok(DayOfWeek::Friday),
            "saturday" | "sat" => Ok(DayOfWeek::Saturday),
            "sunday" | "sun" => Ok(DayOfWeek::Sunday),
            _ => Err(WorklogDateUtilsError::InvalidDayOfWeek(s.to_string())),
        }
    }
}

impl DayOfWeek {
    /// Saturday and Sunday.
    pub fn is_weekend(&self) -> bool {
        matches!(self, DayOfWeek::Saturday | DayOfWeek::Sunday)
    }
}

/// Converts a plain month number (1-12) into a [`Month`].
pub fn month_from_number(month: u8) -> Result<Month, WorklogDateUtilsError> {
    Ok(Month::try_from(month)?)
}

pub fn first_day_of_month(year: i32, month: Month) -> Result<Date, WorklogDateUtilsError> {
    Ok(Date::from_calendar_date(year, month, 1)?)
}

pub fn days_in_month(year: i32, month: Month) -> u8 {
    (28..=31u8)
        .rev()
        .find(|day| Date::from_calendar_date(year, month, *day).is_ok())
        .unwrap_or(28)
}

pub fn last_day_of_month(year: i32, month: Month) -> Result<Date, WorklogDateUtilsError> {
    Ok(Date::from_calendar_date(
        year,
        month,
        days_in_month(year, month),
    )?)
}

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: Date,
    pub to: Date,
}

impl DateRange {
    pub fn new(from: Date, to: Date) -> Self {
        Self { from, to }
    }

    pub fn for_month(year: i32, month: Month) -> Result<Self, WorklogDateUtilsError> {
        Ok(Self {
            from: first_day_of_month(year, month)?,
            to: last_day_of_month(year, month)?,
        })
    }

    pub fn contains(&self, date: Date) -> bool {
        self.from <= date && date <= self.to
    }

    pub fn is_empty(&self) -> bool {
        self.from > self.to
    }

    /// Cuts the range off after `date`. The result is empty if `date` is
    /// before the start of the range.
    pub fn until(&self, date: Date) -> Self {
        Self {
            from: self.from,
            to: self.to.min(date),
        }
    }

    pub fn days(&self) -> DateRangeIterator {
        DateRangeIterator {
            current: if self.is_empty() {
                None
            } else {
                Some(self.from)
            },
            end: self.to,
        }
    }
}

pub struct DateRangeIterator {
    current: Option<Date>,
    end: Date,
}

impl Iterator for DateRangeIterator {
    type Item = Date;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        if current > self.end {
            self.current = None;
            return None;
        }
        self.current = current.next_day();
        Some(current)
    }
}
