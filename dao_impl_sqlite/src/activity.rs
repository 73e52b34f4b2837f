use std::sync::Arc;

use crate::{format_date, parse_date, ResultDbErrorExt};
use async_trait::async_trait;
use dao::{
    activity::{ActivityDao, ActivityEntity, ActivityStatusEntity},
    DaoError,
};
use sqlx::{query, query_as, FromRow};
use time::{format_description::well_known::Iso8601, Date, PrimitiveDateTime};
use tracing::warn;
use uuid::Uuid;

#[derive(Debug, FromRow)]
struct ActivityDb {
    id: Vec<u8>,
    user_id: Vec<u8>,
    date: Option<String>,
    minutes_spent: i64,
    status: String,
    title: String,
    category: Option<String>,
    created: String,
    deleted: Option<String>,
    update_version: Vec<u8>,
}

const ACTIVITY_COLUMNS: &str = "id, user_id, date, minutes_spent, status, title, category, created, deleted, update_version";

fn status_to_str(status: ActivityStatusEntity) -> &'static str {
    match status {
        ActivityStatusEntity::Done => "done",
        ActivityStatusEntity::InProgress => "in-progress",
        ActivityStatusEntity::Pending => "pending",
    }
}

impl TryFrom<&ActivityDb> for ActivityEntity {
    type Error = DaoError;

    fn try_from(db: &ActivityDb) -> Result<Self, Self::Error> {
        let id = Uuid::from_slice(&db.id)?;
        // A broken date must not hide the rest of the period, the
        // aggregation skips records without a date.
        let date = db
            .date
            .as_ref()
            .and_then(|date| match parse_date(date) {
                Ok(date) => Some(date),
                Err(err) => {
                    warn!("Activity {} has an unreadable date '{}': {}", id, date, err);
                    None
                }
            });
        Ok(ActivityEntity {
            id,
            user_id: Uuid::from_slice(&db.user_id)?,
            date,
            minutes_spent: db.minutes_spent,
            status: match db.status.as_str() {
                "done" => ActivityStatusEntity::Done,
                "in-progress" => ActivityStatusEntity::InProgress,
                "pending" => ActivityStatusEntity::Pending,
                value => return Err(DaoError::EnumValueNotFound(value.into())),
            },
            title: db.title.as_str().into(),
            category: db.category.as_deref().map(Arc::from),
            created: PrimitiveDateTime::parse(&db.created, &Iso8601::DATE_TIME)?,
            deleted: db
                .deleted
                .as_ref()
                .map(|deleted| PrimitiveDateTime::parse(deleted, &Iso8601::DATE_TIME))
                .transpose()?,
            version: Uuid::from_slice(&db.update_version)?,
        })
    }
}

/// Rows which cannot be read are skipped so one broken record does not hide
/// the rest of the period.
fn readable_entity(db: &ActivityDb) -> Option<ActivityEntity> {
    match ActivityEntity::try_from(db) {
        Ok(entity) => Some(entity),
        Err(err) => {
            warn!("Skipping unreadable activity row: {}", err);
            None
        }
    }
}

pub struct ActivityDaoImpl {
    pub _pool: Arc<sqlx::SqlitePool>,
}

impl ActivityDaoImpl {
    pub fn new(pool: Arc<sqlx::SqlitePool>) -> Self {
        Self { _pool: pool }
    }
}

#[async_trait]
impl ActivityDao for ActivityDaoImpl {
    type Transaction = crate::TransactionImpl;

    async fn find_by_user_and_range(
        &self,
        user_id: Uuid,
        from: Date,
        to: Date,
        tx: Self::Transaction,
    ) -> Result<Arc<[ActivityEntity]>, DaoError> {
        let user_id = user_id.as_bytes().to_vec();
        let from = format_date(from)?;
        let to = format_date(to)?;
        let sql = format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activity
             WHERE user_id = ? AND date >= ? AND date <= ? AND deleted IS NULL
             ORDER BY rowid"
        );
        let activities: Arc<[ActivityEntity]> = query_as::<_, ActivityDb>(&sql)
            .bind(user_id)
            .bind(from)
            .bind(to)
            .fetch_all(tx.tx.lock().await.as_mut())
            .await
            .map_db_error()?
            .iter()
            .filter_map(readable_entity)
            .collect::<Vec<_>>()
            .into();
        Ok(activities)
    }

    async fn find_by_range(
        &self,
        from: Date,
        to: Date,
        tx: Self::Transaction,
    ) -> Result<Arc<[ActivityEntity]>, DaoError> {
        let from = format_date(from)?;
        let to = format_date(to)?;
        let sql = format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activity
             WHERE date >= ? AND date <= ? AND deleted IS NULL
             ORDER BY rowid"
        );
        let activities: Arc<[ActivityEntity]> = query_as::<_, ActivityDb>(&sql)
            .bind(from)
            .bind(to)
            .fetch_all(tx.tx.lock().await.as_mut())
            .await
            .map_db_error()?
            .iter()
            .filter_map(readable_entity)
            .collect::<Vec<_>>()
            .into();
        Ok(activities)
    }

    async fn create(
        &self,
        entity: &ActivityEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError> {
        let id = entity.id.as_bytes().to_vec();
        let user_id = entity.user_id.as_bytes().to_vec();
        let date = entity.date.map(format_date).transpose()?;
        let status = status_to_str(entity.status);
        let title = entity.title.to_string();
        let category = entity.category.as_ref().map(|category| category.to_string());
        let created = entity.created.format(&Iso8601::DATE_TIME)?;
        let deleted = entity
            .deleted
            .map(|deleted| deleted.format(&Iso8601::DATE_TIME))
            .transpose()?;
        let version = entity.version.as_bytes().to_vec();

        query(
            "INSERT INTO activity (id, user_id, date, minutes_spent, status, title, category, created, deleted, update_version, update_process)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(user_id)
        .bind(date)
        .bind(entity.minutes_spent)
        .bind(status)
        .bind(title)
        .bind(category)
        .bind(created)
        .bind(deleted)
        .bind(version)
        .bind(process)
        .execute(tx.tx.lock().await.as_mut())
        .await
        .map_db_error()?;
        Ok(())
    }
}
