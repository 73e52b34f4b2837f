use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::DaoError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivityStatusEntity {
    Done,
    InProgress,
    Pending,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivityEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    /// `None` if the stored date could not be read.
    pub date: Option<time::Date>,
    pub minutes_spent: i64,
    pub status: ActivityStatusEntity,
    pub title: Arc<str>,
    pub category: Option<Arc<str>>,
    pub created: time::PrimitiveDateTime,
    pub deleted: Option<time::PrimitiveDateTime>,
    pub version: Uuid,
}

/// Activities are returned in the order they were stored.
#[automock(type Transaction = crate::MockTransaction;)]
#[async_trait]
pub trait ActivityDao {
    type Transaction: crate::Transaction;

    async fn find_by_user_and_range(
        &self,
        user_id: Uuid,
        from: time::Date,
        to: time::Date,
        tx: Self::Transaction,
    ) -> Result<Arc<[ActivityEntity]>, DaoError>;

    async fn find_by_range(
        &self,
        from: time::Date,
        to: time::Date,
        tx: Self::Transaction,
    ) -> Result<Arc<[ActivityEntity]>, DaoError>;

    async fn create(
        &self,
        entity: &ActivityEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError>;
}
