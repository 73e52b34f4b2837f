use std::sync::Arc;

use crate::quota::{QuotaPolicy, WorkCalendar};
use crate::ServiceError;
use async_trait::async_trait;
use mockall::automock;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub database_url: Arc<str>,
    pub server_address: Arc<str>,
    /// Holiday table in TOML format. The bundled table is used if unset.
    pub holiday_file: Option<Arc<str>>,
    pub holiday_epoch_year: i32,
    pub quota: QuotaPolicy,
}

#[automock]
#[async_trait]
pub trait ConfigService {
    async fn get_config(&self) -> Result<Config, ServiceError>;

    /// Builds the calendar from the configured holiday table and quota.
    async fn work_calendar(&self) -> Result<WorkCalendar, ServiceError>;
}
