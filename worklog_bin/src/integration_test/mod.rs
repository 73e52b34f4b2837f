mod dashboard;
mod export;
mod statistics;

use std::sync::Arc;

use dao::{
    activity::{ActivityDao, ActivityEntity, ActivityStatusEntity},
    user::{UserDao, UserEntity},
    TransactionDao,
};
use dao_impl_sqlite::{activity::ActivityDaoImpl, user::UserDaoImpl, TransactionDaoImpl};
use service::quota::{QuotaPolicy, WorkCalendar};
use service_impl::config::{parse_holiday_table, BUNDLED_HOLIDAYS, DEFAULT_HOLIDAY_EPOCH_YEAR};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use time::{macros::datetime, Date};
use uuid::Uuid;

use crate::RestStateImpl;

pub struct TestSetup {
    pub pool: Arc<SqlitePool>,
    pub rest_state: RestStateImpl,
}

impl TestSetup {
    pub async fn new() -> Self {
        // A single connection keeps the in-memory database alive and shared.
        let pool = Arc::new(
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect("sqlite::memory:")
                .await
                .expect("Could not create in-memory database"),
        );
        sqlx::migrate!("../migrations/sqlite")
            .run(pool.as_ref())
            .await
            .expect("Failed to run migrations");

        let holidays = parse_holiday_table(BUNDLED_HOLIDAYS, DEFAULT_HOLIDAY_EPOCH_YEAR)
            .expect("Bundled holidays must parse");
        let work_calendar = Arc::new(WorkCalendar::new(holidays, QuotaPolicy::default()));
        let rest_state = RestStateImpl::new(pool.clone(), work_calendar);
        Self { pool, rest_state }
    }

    pub async fn create_user(&self, name: &str) -> Uuid {
        let transaction_dao = TransactionDaoImpl::new(self.pool.clone());
        let tx = transaction_dao.new_transaction().await.unwrap();
        let id = Uuid::new_v4();
        UserDaoImpl::new(self.pool.clone())
            .create(
                &UserEntity {
                    id,
                    name: name.into(),
                },
                "integration-test",
                tx.clone(),
            )
            .await
            .unwrap();
        transaction_dao.commit(tx).await.unwrap();
        id
    }

    pub async fn create_activity(
        &self,
        user_id: Uuid,
        date: Date,
        minutes_spent: i64,
        status: ActivityStatusEntity,
        title: &str,
    ) -> Uuid {
        let transaction_dao = TransactionDaoImpl::new(self.pool.clone());
        let tx = transaction_dao.new_transaction().await.unwrap();
        let id = Uuid::new_v4();
        ActivityDaoImpl::new(self.pool.clone())
            .create(
                &ActivityEntity {
                    id,
                    user_id,
                    date: Some(date),
                    minutes_spent,
                    status,
                    title: title.into(),
                    category: None,
                    created: datetime!(2025 - 10 - 01 08:00:00),
                    deleted: None,
                    version: Uuid::new_v4(),
                },
                "integration-test",
                tx.clone(),
            )
            .await
            .unwrap();
        transaction_dao.commit(tx).await.unwrap();
        id
    }

    /// Writes an activity row directly, bypassing the dao validation.
    pub async fn insert_raw_activity(
        &self,
        user_id: Uuid,
        date: &str,
        status: &str,
        created: &str,
    ) {
        sqlx::query(
            "INSERT INTO activity (id, user_id, date, minutes_spent, status, title, category, created, deleted, update_version, update_process)
             VALUES (?, ?, ?, 120, ?, 'Imported', NULL, ?, NULL, ?, 'integration-test')",
        )
        .bind(Uuid::new_v4().as_bytes().to_vec())
        .bind(user_id.as_bytes().to_vec())
        .bind(date)
        .bind(status)
        .bind(created)
        .bind(Uuid::new_v4().as_bytes().to_vec())
        .execute(self.pool.as_ref())
        .await
        .unwrap();
    }

    /// Alex logged three October days, the first and the third are done.
    pub async fn with_october_activities(&self) -> Uuid {
        let user_id = self.create_user("Alex").await;
        self.create_activity(
            user_id,
            time::macros::date!(2025 - 10 - 01),
            480,
            ActivityStatusEntity::Done,
            "Planning",
        )
        .await;
        self.create_activity(
            user_id,
            time::macros::date!(2025 - 10 - 02),
            240,
            ActivityStatusEntity::Pending,
            "Review",
        )
        .await;
        self.create_activity(
            user_id,
            time::macros::date!(2025 - 10 - 03),
            360,
            ActivityStatusEntity::Done,
            "Release",
        )
        .await;
        user_id
    }

    pub fn router(&self) -> axum::Router {
        rest::build_router(self.rest_state.clone())
    }
}

pub async fn get(router: axum::Router, uri: &str) -> (axum::http::StatusCode, axum::body::Bytes) {
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    let response = router
        .oneshot(
            axum::http::Request::builder()
                .uri(uri)
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body)
}
