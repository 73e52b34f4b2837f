use std::sync::Arc;

use async_trait::async_trait;
use dao::activity::{ActivityEntity, ActivityStatusEntity};
use mockall::automock;
use uuid::Uuid;
use worklog_utils::DateRange;

use crate::ServiceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActivityStatus {
    Done,
    InProgress,
    Pending,
}
impl From<ActivityStatusEntity> for ActivityStatus {
    fn from(status: ActivityStatusEntity) -> Self {
        match status {
            ActivityStatusEntity::Done => Self::Done,
            ActivityStatusEntity::InProgress => Self::InProgress,
            ActivityStatusEntity::Pending => Self::Pending,
        }
    }
}

/// A single logged activity as provided by the store.
///
/// The record is taken as is. `minutes_spent` may be out of range and
/// `date` may be missing, both are handled when aggregating.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivityRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: Option<time::Date>,
    pub minutes_spent: i64,
    pub status: ActivityStatus,
    pub title: Arc<str>,
    pub category: Option<Arc<str>>,
}
impl From<&ActivityEntity> for ActivityRecord {
    fn from(entity: &ActivityEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            date: entity.date,
            minutes_spent: entity.minutes_spent,
            status: entity.status.into(),
            title: entity.title.clone(),
            category: entity.category.clone(),
        }
    }
}

#[automock(type Transaction = dao::MockTransaction;)]
#[async_trait]
pub trait ActivityService {
    type Transaction: dao::Transaction;

    async fn find_for_user(
        &self,
        user_id: Uuid,
        range: DateRange,
        tx: Option<Self::Transaction>,
    ) -> Result<Arc<[ActivityRecord]>, ServiceError>;

    async fn find_for_range(
        &self,
        range: DateRange,
        tx: Option<Self::Transaction>,
    ) -> Result<Arc<[ActivityRecord]>, ServiceError>;
}
