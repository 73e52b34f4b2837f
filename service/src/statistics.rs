use async_trait::async_trait;
use mockall::automock;

use crate::progress::TeamStatistics;
use crate::ServiceError;

#[automock(type Transaction = dao::MockTransaction;)]
#[async_trait]
pub trait StatisticsService {
    type Transaction: dao::Transaction;

    /// Statistics of all users for a month, in user order.
    async fn team_statistics(
        &self,
        year: i32,
        month: u8,
        tx: Option<Self::Transaction>,
    ) -> Result<TeamStatistics, ServiceError>;
}
