use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use time::Date;
use uuid::Uuid;

use crate::aggregation::DayBucket;
use crate::progress::{CalendarDayReport, PeriodSummary};
use crate::ServiceError;

/// Month figures of a single user as shown on the dashboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthOverview {
    pub summary: PeriodSummary,
    /// How far the month has progressed, independent of the records.
    pub month_progress_percentage: u8,
    pub completed_days: Arc<[Date]>,
    pub in_progress_days: Arc<[Date]>,
}

#[automock(type Transaction = dao::MockTransaction;)]
#[async_trait]
pub trait DashboardService {
    type Transaction: dao::Transaction;

    /// Days after today are not part of the summary.
    async fn month_summary(
        &self,
        user_id: Uuid,
        year: i32,
        month: u8,
        tx: Option<Self::Transaction>,
    ) -> Result<MonthOverview, ServiceError>;

    async fn month_calendar(
        &self,
        user_id: Uuid,
        year: i32,
        month: u8,
        tx: Option<Self::Transaction>,
    ) -> Result<Arc<[CalendarDayReport]>, ServiceError>;

    async fn day_buckets(
        &self,
        user_id: Uuid,
        from: Date,
        to: Date,
        tx: Option<Self::Transaction>,
    ) -> Result<Arc<[DayBucket]>, ServiceError>;
}
