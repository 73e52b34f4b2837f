use std::sync::Arc;

use async_trait::async_trait;
use dao::user::UserEntity;
use mockall::automock;
use uuid::Uuid;

use crate::ServiceError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: Arc<str>,
}
impl From<&UserEntity> for User {
    fn from(entity: &UserEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name.clone(),
        }
    }
}
worklog_utils::derive_from_reference!(UserEntity, User);

#[automock(type Transaction = dao::MockTransaction;)]
#[async_trait]
pub trait UserService {
    type Transaction: dao::Transaction;

    async fn all(&self, tx: Option<Self::Transaction>) -> Result<Arc<[User]>, ServiceError>;
    async fn get(&self, id: Uuid, tx: Option<Self::Transaction>) -> Result<User, ServiceError>;
}
