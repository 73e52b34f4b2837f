//! Holidays and working day classification.
//!
//! The [`HolidayTable`] is the single holiday configuration of the
//! application. It is built once at startup and shared by reference with
//! every consumer, see [`crate::quota::WorkCalendar`].

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use time::{Date, Month};
use tracing::debug;
use worklog_utils::DayOfWeek;

use crate::quota::{CalendarDay, MonthQuota, WorkCalendar};
use crate::ServiceError;

/// Last year a holiday set can be calculated for.
pub const MAX_SUPPORTED_YEAR: i32 = 9999;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Holiday {
    pub date: Date,
    pub name: Arc<str>,
}

/// A holiday on the same calendar date every year.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedHoliday {
    pub month: Month,
    pub day: u8,
    pub name: Arc<str>,
}

impl FixedHoliday {
    /// `None` if the date does not exist in that year (29th of February).
    pub fn in_year(&self, year: i32) -> Option<Holiday> {
        Date::from_calendar_date(year, self.month, self.day)
            .ok()
            .map(|date| Holiday {
                date,
                name: self.name.clone(),
            })
    }

    fn matches(&self, date: Date) -> bool {
        date.month() == self.month && date.day() == self.day
    }
}

/// Holidays of a single year. Holds at most one entry per date.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HolidaySet {
    year: i32,
    holidays: BTreeMap<Date, Arc<str>>,
}

impl HolidaySet {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            holidays: BTreeMap::new(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// The first name registered for a date is kept.
    fn insert(&mut self, holiday: Holiday) {
        if holiday.date.year() != self.year {
            return;
        }
        self.holidays.entry(holiday.date).or_insert(holiday.name);
    }

    pub fn contains(&self, date: Date) -> bool {
        self.holidays.contains_key(&date)
    }

    pub fn name(&self, date: Date) -> Option<Arc<str>> {
        self.holidays.get(&date).cloned()
    }

    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }

    /// Holidays in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = Holiday> + '_ {
        self.holidays.iter().map(|(date, name)| Holiday {
            date: *date,
            name: name.clone(),
        })
    }
}

pub fn is_weekend(date: Date) -> bool {
    DayOfWeek::from(date.weekday()).is_weekend()
}

/// Fixed holidays plus movable holidays keyed by year.
///
/// Movable holidays only exist for the years they are listed for. Years
/// without an entry, and years before the epoch, only get the fixed
/// holidays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HolidayTable {
    epoch_year: i32,
    fixed: Arc<[FixedHoliday]>,
    movable: BTreeMap<i32, HolidaySet>,
}

impl HolidayTable {
    pub fn new(
        epoch_year: i32,
        fixed: impl IntoIterator<Item = FixedHoliday>,
        movable: impl IntoIterator<Item = Holiday>,
    ) -> Result<Self, ServiceError> {
        let fixed: Arc<[FixedHoliday]> = fixed.into_iter().collect();
        for holiday in fixed.iter() {
            // 2000 is a leap year, every real calendar date exists in it.
            if Date::from_calendar_date(2000, holiday.month, holiday.day).is_err() {
                return Err(ServiceError::ConfigurationError(
                    format!(
                        "Fixed holiday '{}' has no valid date: {} {}",
                        holiday.name, holiday.month, holiday.day
                    )
                    .into(),
                ));
            }
        }

        let mut movable_by_year: BTreeMap<i32, HolidaySet> = BTreeMap::new();
        for holiday in movable {
            let year = holiday.date.year();
            movable_by_year
                .entry(year)
                .or_insert_with(|| HolidaySet::new(year))
                .insert(holiday);
        }

        Ok(Self {
            epoch_year,
            fixed,
            movable: movable_by_year,
        })
    }

    /// Table with fixed holidays only.
    pub fn fixed_only(
        epoch_year: i32,
        fixed: impl IntoIterator<Item = FixedHoliday>,
    ) -> Result<Self, ServiceError> {
        Self::new(epoch_year, fixed, std::iter::empty())
    }

    pub fn fixed_holidays(&self) -> &[FixedHoliday] {
        &self.fixed
    }

    pub fn is_supported_year(&self, year: i32) -> bool {
        year >= self.epoch_year && year <= MAX_SUPPORTED_YEAR
    }

    pub fn has_movable_entry(&self, year: i32) -> bool {
        self.movable.contains_key(&year)
    }

    fn movable_for_year(&self, year: i32) -> Option<&HolidaySet> {
        if !self.is_supported_year(year) {
            return None;
        }
        self.movable.get(&year)
    }

    pub fn holidays_for_year(&self, year: i32) -> HolidaySet {
        if !self.is_supported_year(year) {
            debug!("Year {} is out of range, using fixed holidays only", year);
        }
        let mut set = HolidaySet::new(year);
        for holiday in self.fixed.iter().filter_map(|fixed| fixed.in_year(year)) {
            set.insert(holiday);
        }
        if let Some(movable) = self.movable_for_year(year) {
            for holiday in movable.iter() {
                set.insert(holiday);
            }
        }
        set
    }

    pub fn holiday_name(&self, date: Date) -> Option<Arc<str>> {
        if let Some(fixed) = self.fixed.iter().find(|fixed| fixed.matches(date)) {
            return Some(fixed.name.clone());
        }
        self.movable_for_year(date.year())
            .and_then(|movable| movable.name(date))
    }

    pub fn is_holiday(&self, date: Date) -> bool {
        self.holiday_name(date).is_some()
    }

    pub fn is_working_day(&self, date: Date) -> bool {
        !is_weekend(date) && !self.is_holiday(date)
    }
}

#[automock]
#[async_trait]
pub trait CalendarService {
    /// The calendar every computation in the application is based on.
    fn work_calendar(&self) -> Arc<WorkCalendar>;

    async fn holidays_for_year(&self, year: i32) -> Result<Arc<[Holiday]>, ServiceError>;
    async fn month_days(&self, year: i32, month: u8)
        -> Result<Arc<[CalendarDay]>, ServiceError>;
    async fn month_quota(&self, year: i32, month: u8) -> Result<MonthQuota, ServiceError>;
}
