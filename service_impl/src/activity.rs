use std::sync::Arc;

use async_trait::async_trait;
use dao::{activity::ActivityDao, TransactionDao};
use service::{
    activity::{ActivityRecord, ActivityService},
    ServiceError,
};
use tracing::instrument;
use uuid::Uuid;
use worklog_utils::DateRange;

use crate::gen_service_impl;

gen_service_impl! {
    struct ActivityServiceImpl: service::activity::ActivityService = ActivityServiceDeps {
        ActivityDao: dao::activity::ActivityDao<Transaction = Self::Transaction> = activity_dao,
        TransactionDao: dao::TransactionDao<Transaction = Self::Transaction> = transaction_dao
    }
}

#[async_trait]
impl<Deps: ActivityServiceDeps> ActivityService for ActivityServiceImpl<Deps> {
    type Transaction = Deps::Transaction;

    #[instrument(skip(self, tx))]
    async fn find_for_user(
        &self,
        user_id: Uuid,
        range: DateRange,
        tx: Option<Self::Transaction>,
    ) -> Result<Arc<[ActivityRecord]>, ServiceError> {
        let tx = self.transaction_dao.use_transaction(tx).await?;
        let records = self
            .activity_dao
            .find_by_user_and_range(user_id, range.from, range.to, tx.clone())
            .await?
            .iter()
            .map(ActivityRecord::from)
            .collect();
        self.transaction_dao.commit(tx).await?;
        Ok(records)
    }

    #[instrument(skip(self, tx))]
    async fn find_for_range(
        &self,
        range: DateRange,
        tx: Option<Self::Transaction>,
    ) -> Result<Arc<[ActivityRecord]>, ServiceError> {
        let tx = self.transaction_dao.use_transaction(tx).await?;
        let records = self
            .activity_dao
            .find_by_range(range.from, range.to, tx.clone())
            .await?
            .iter()
            .map(ActivityRecord::from)
            .collect();
        self.transaction_dao.commit(tx).await?;
        Ok(records)
    }
}
