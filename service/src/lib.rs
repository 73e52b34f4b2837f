use std::sync::Arc;

use thiserror::Error;
use time::Date;
use uuid::Uuid;
use worklog_utils::DateRange;

pub mod activity;
pub mod aggregation;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod dashboard;
pub mod export;
pub mod progress;
pub mod quota;
pub mod report;
pub mod statistics;
pub mod user;

#[derive(Debug, PartialEq, Eq)]
pub enum ValidationFailureItem {
    InvalidValue(Arc<str>),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Database query error: {0}")]
    DatabaseQueryError(#[from] dao::DaoError),

    #[error("Entity {0} not found")]
    EntityNotFound(Uuid),

    #[error("Validation error: {0:?}")]
    ValidationError(Arc<[ValidationFailureItem]>),

    #[error("Date order wrong. {0} must be before or equal to {1}")]
    DateOrderWrong(Date, Date),

    #[error("Configuration error: {0}")]
    ConfigurationError(Arc<str>),

    #[error("Spreadsheet error: {0}")]
    SpreadsheetError(Arc<str>),

    #[error("Internal error")]
    InternalError,
}

impl ServiceError {
    pub fn invalid_value(field: &str) -> Self {
        ServiceError::ValidationError(Arc::new([ValidationFailureItem::InvalidValue(
            field.into(),
        )]))
    }
}

/// Checks the order of an inclusive date range given by a caller.
pub fn validate_range(from: Date, to: Date) -> Result<DateRange, ServiceError> {
    if from > to {
        return Err(ServiceError::DateOrderWrong(from, to));
    }
    Ok(DateRange::new(from, to))
}

/// Converts a caller supplied month number into a [`time::Month`].
pub fn validate_month(month: u8) -> Result<time::Month, ServiceError> {
    worklog_utils::month_from_number(month).map_err(|_| ServiceError::invalid_value("month"))
}
