use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::DaoError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserEntity {
    pub id: Uuid,
    pub name: Arc<str>,
}

/// Read access to the users maintained by the account management.
#[automock(type Transaction = crate::MockTransaction;)]
#[async_trait]
pub trait UserDao {
    type Transaction: crate::Transaction;

    async fn all(&self, tx: Self::Transaction) -> Result<Arc<[UserEntity]>, DaoError>;
    async fn find_by_id(
        &self,
        id: Uuid,
        tx: Self::Transaction,
    ) -> Result<Option<UserEntity>, DaoError>;
    async fn create(
        &self,
        entity: &UserEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError>;
}
