use std::sync::Arc;

use async_trait::async_trait;
use service::{
    calendar::{CalendarService, Holiday},
    quota::{month_range, CalendarDay, MonthQuota, WorkCalendar},
    validate_month, ServiceError,
};
use tracing::instrument;

/// Answers calendar questions from the calendar loaded at startup.
pub struct CalendarServiceImpl {
    pub work_calendar: Arc<WorkCalendar>,
}

impl CalendarServiceImpl {
    pub fn new(work_calendar: Arc<WorkCalendar>) -> Self {
        Self { work_calendar }
    }
}

#[async_trait]
impl CalendarService for CalendarServiceImpl {
    fn work_calendar(&self) -> Arc<WorkCalendar> {
        self.work_calendar.clone()
    }

    #[instrument(skip(self))]
    async fn holidays_for_year(&self, year: i32) -> Result<Arc<[Holiday]>, ServiceError> {
        Ok(self.work_calendar.holidays_for_year(year).iter().collect())
    }

    #[instrument(skip(self))]
    async fn month_days(
        &self,
        year: i32,
        month: u8,
    ) -> Result<Arc<[CalendarDay]>, ServiceError> {
        let range = month_range(year, validate_month(month)?)?;
        Ok(self.work_calendar.days(range).into())
    }

    #[instrument(skip(self))]
    async fn month_quota(&self, year: i32, month: u8) -> Result<MonthQuota, ServiceError> {
        self.work_calendar.month_quota(year, validate_month(month)?)
    }
}
