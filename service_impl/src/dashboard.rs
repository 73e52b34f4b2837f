use std::sync::Arc;

use async_trait::async_trait;
use dao::TransactionDao;
use service::{
    activity::ActivityService,
    aggregation::{bucket_by_day, completed_days, in_progress_days, DayBucket},
    calendar::CalendarService,
    clock::ClockService,
    dashboard::{DashboardService, MonthOverview},
    progress::{
        calendar_month_report, elapsed_progress_percentage, summary_from_buckets,
        CalendarDayReport,
    },
    quota::month_range,
    user::UserService,
    validate_month, validate_range, ServiceError,
};
use time::Date;
use tracing::instrument;
use uuid::Uuid;

use crate::gen_service_impl;

gen_service_impl! {
    struct DashboardServiceImpl: service::dashboard::DashboardService = DashboardServiceDeps {
        ActivityService: service::activity::ActivityService<Transaction = Self::Transaction> = activity_service,
        UserService: service::user::UserService<Transaction = Self::Transaction> = user_service,
        CalendarService: service::calendar::CalendarService = calendar_service,
        ClockService: service::clock::ClockService = clock_service,
        TransactionDao: dao::TransactionDao<Transaction = Self::Transaction> = transaction_dao
    }
}

#[async_trait]
impl<Deps: DashboardServiceDeps> DashboardService for DashboardServiceImpl<Deps> {
    type Transaction = Deps::Transaction;

    #[instrument(skip(self, tx))]
    async fn month_summary(
        &self,
        user_id: Uuid,
        year: i32,
        month: u8,
        tx: Option<Self::Transaction>,
    ) -> Result<MonthOverview, ServiceError> {
        let month = validate_month(month)?;
        let tx = self.transaction_dao.use_transaction(tx).await?;
        self.user_service.get(user_id, Some(tx.clone())).await?;

        let calendar = self.calendar_service.work_calendar();
        let today = self.clock_service.today();
        let range = month_range(year, month)?.until(today);
        let records = self
            .activity_service
            .find_for_user(user_id, range, Some(tx.clone()))
            .await?;
        let buckets = bucket_by_day(&calendar, &records, range);

        let overview = MonthOverview {
            summary: summary_from_buckets(&calendar, &buckets, range),
            month_progress_percentage: elapsed_progress_percentage(&calendar, year, month, today)?,
            completed_days: completed_days(&buckets),
            in_progress_days: in_progress_days(&buckets),
        };
        self.transaction_dao.commit(tx).await?;
        Ok(overview)
    }

    #[instrument(skip(self, tx))]
    async fn month_calendar(
        &self,
        user_id: Uuid,
        year: i32,
        month: u8,
        tx: Option<Self::Transaction>,
    ) -> Result<Arc<[CalendarDayReport]>, ServiceError> {
        let month = validate_month(month)?;
        let tx = self.transaction_dao.use_transaction(tx).await?;
        self.user_service.get(user_id, Some(tx.clone())).await?;

        let calendar = self.calendar_service.work_calendar();
        let records = self
            .activity_service
            .find_for_user(user_id, month_range(year, month)?, Some(tx.clone()))
            .await?;
        let report = calendar_month_report(&calendar, &records, year, month)?;
        self.transaction_dao.commit(tx).await?;
        Ok(report)
    }

    #[instrument(skip(self, tx))]
    async fn day_buckets(
        &self,
        user_id: Uuid,
        from: Date,
        to: Date,
        tx: Option<Self::Transaction>,
    ) -> Result<Arc<[DayBucket]>, ServiceError> {
        let range = validate_range(from, to)?;
        let tx = self.transaction_dao.use_transaction(tx).await?;
        self.user_service.get(user_id, Some(tx.clone())).await?;

        let calendar = self.calendar_service.work_calendar();
        let records = self
            .activity_service
            .find_for_user(user_id, range, Some(tx.clone()))
            .await?;
        let buckets = bucket_by_day(&calendar, &records, range);
        self.transaction_dao.commit(tx).await?;
        Ok(buckets)
    }
}
