use std::sync::Arc;

use async_trait::async_trait;
use dao::TransactionDao;
use service::{
    activity::{ActivityRecord, ActivityService},
    calendar::CalendarService,
    clock::ClockService,
    progress::{team_summaries_until, MemberActivities, TeamMember, TeamStatistics},
    quota::month_range,
    statistics::StatisticsService,
    user::UserService,
    validate_month, ServiceError,
};
use tracing::instrument;

use crate::gen_service_impl;

gen_service_impl! {
    struct StatisticsServiceImpl: service::statistics::StatisticsService = StatisticsServiceDeps {
        ActivityService: service::activity::ActivityService<Transaction = Self::Transaction> = activity_service,
        UserService: service::user::UserService<Transaction = Self::Transaction> = user_service,
        CalendarService: service::calendar::CalendarService = calendar_service,
        ClockService: service::clock::ClockService = clock_service,
        TransactionDao: dao::TransactionDao<Transaction = Self::Transaction> = transaction_dao
    }
}

#[async_trait]
impl<Deps: StatisticsServiceDeps> StatisticsService for StatisticsServiceImpl<Deps> {
    type Transaction = Deps::Transaction;

    #[instrument(skip(self, tx))]
    async fn team_statistics(
        &self,
        year: i32,
        month: u8,
        tx: Option<Self::Transaction>,
    ) -> Result<TeamStatistics, ServiceError> {
        let month = validate_month(month)?;
        let range = month_range(year, month)?;
        let tx = self.transaction_dao.use_transaction(tx).await?;

        let users = self.user_service.all(Some(tx.clone())).await?;
        let records = self
            .activity_service
            .find_for_range(range, Some(tx.clone()))
            .await?;
        let members: Vec<MemberActivities> = users
            .iter()
            .map(|user| MemberActivities {
                member: TeamMember {
                    user_id: user.id,
                    name: user.name.clone(),
                },
                records: records
                    .iter()
                    .filter(|record| record.user_id == user.id)
                    .cloned()
                    .collect::<Arc<[ActivityRecord]>>(),
            })
            .collect();

        let statistics = team_summaries_until(
            &self.calendar_service.work_calendar(),
            &members,
            year,
            month,
            self.clock_service.today(),
        )?;
        self.transaction_dao.commit(tx).await?;
        Ok(statistics)
    }
}
