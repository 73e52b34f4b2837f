use std::sync::Arc;

use async_trait::async_trait;
use dao::{user::UserDao, TransactionDao};
use service::{
    user::{User, UserService},
    ServiceError,
};
use tracing::instrument;
use uuid::Uuid;

use crate::gen_service_impl;

gen_service_impl! {
    struct UserServiceImpl: service::user::UserService = UserServiceDeps {
        UserDao: dao::user::UserDao<Transaction = Self::Transaction> = user_dao,
        TransactionDao: dao::TransactionDao<Transaction = Self::Transaction> = transaction_dao
    }
}

#[async_trait]
impl<Deps: UserServiceDeps> UserService for UserServiceImpl<Deps> {
    type Transaction = Deps::Transaction;

    #[instrument(skip(self, tx))]
    async fn all(&self, tx: Option<Self::Transaction>) -> Result<Arc<[User]>, ServiceError> {
        let tx = self.transaction_dao.use_transaction(tx).await?;
        let users = self
            .user_dao
            .all(tx.clone())
            .await?
            .iter()
            .map(User::from)
            .collect();
        self.transaction_dao.commit(tx).await?;
        Ok(users)
    }

    #[instrument(skip(self, tx))]
    async fn get(&self, id: Uuid, tx: Option<Self::Transaction>) -> Result<User, ServiceError> {
        let tx = self.transaction_dao.use_transaction(tx).await?;
        let user = self
            .user_dao
            .find_by_id(id, tx.clone())
            .await?
            .map(User::from)
            .ok_or(ServiceError::EntityNotFound(id))?;
        self.transaction_dao.commit(tx).await?;
        Ok(user)
    }
}
