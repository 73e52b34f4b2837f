use std::sync::Arc;

use crate::ResultDbErrorExt;
use async_trait::async_trait;
use dao::{
    user::{UserDao, UserEntity},
    DaoError,
};
use sqlx::{query, query_as, FromRow};
use uuid::Uuid;

#[derive(Debug, FromRow)]
struct UserDb {
    id: Vec<u8>,
    name: String,
}

impl TryFrom<&UserDb> for UserEntity {
    type Error = DaoError;

    fn try_from(db: &UserDb) -> Result<Self, Self::Error> {
        Ok(UserEntity {
            id: Uuid::from_slice(&db.id)?,
            name: db.name.as_str().into(),
        })
    }
}

pub struct UserDaoImpl {
    pub _pool: Arc<sqlx::SqlitePool>,
}

impl UserDaoImpl {
    pub fn new(pool: Arc<sqlx::SqlitePool>) -> Self {
        Self { _pool: pool }
    }
}

#[async_trait]
impl UserDao for UserDaoImpl {
    type Transaction = crate::TransactionImpl;

    async fn all(&self, tx: Self::Transaction) -> Result<Arc<[UserEntity]>, DaoError> {
        query_as::<_, UserDb>("SELECT id, name FROM user ORDER BY rowid")
            .fetch_all(tx.tx.lock().await.as_mut())
            .await
            .map_db_error()?
            .iter()
            .map(UserEntity::try_from)
            .collect::<Result<_, _>>()
    }

    async fn find_by_id(
        &self,
        id: Uuid,
        tx: Self::Transaction,
    ) -> Result<Option<UserEntity>, DaoError> {
        let id = id.as_bytes().to_vec();
        query_as::<_, UserDb>("SELECT id, name FROM user WHERE id = ?")
            .bind(id)
            .fetch_optional(tx.tx.lock().await.as_mut())
            .await
            .map_db_error()?
            .as_ref()
            .map(UserEntity::try_from)
            .transpose()
    }

    async fn create(
        &self,
        entity: &UserEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError> {
        let id = entity.id.as_bytes().to_vec();
        let name = entity.name.to_string();
        query("INSERT INTO user (id, name, update_process) VALUES (?, ?, ?)")
            .bind(id)
            .bind(name)
            .bind(process)
            .execute(tx.tx.lock().await.as_mut())
            .await
            .map_db_error()?;
        Ok(())
    }
}
