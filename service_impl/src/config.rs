use std::{env, sync::Arc};

use async_trait::async_trait;
use serde::Deserialize;
use service::{
    calendar::{FixedHoliday, Holiday, HolidayTable},
    config::{Config, ConfigService},
    quota::{QuotaPolicy, WorkCalendar, FULL_DAY_MINUTES, SHORT_DAY_MINUTES},
    ServiceError,
};
use time::macros::format_description;
use tracing::info;
use worklog_utils::{month_from_number, DayOfWeek};

pub const DEFAULT_DATABASE_URL: &str = "sqlite:./localdb.sqlite3";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:3000";
pub const DEFAULT_HOLIDAY_EPOCH_YEAR: i32 = 2024;

/// Holiday table shipped with the binary.
pub const BUNDLED_HOLIDAYS: &str = include_str!("../holidays.toml");

#[derive(Debug, Deserialize)]
struct HolidayFile {
    #[serde(default)]
    fixed: Vec<FixedHolidayEntry>,
    #[serde(default)]
    movable: Vec<MovableHolidayEntry>,
}

#[derive(Debug, Deserialize)]
struct FixedHolidayEntry {
    month: u8,
    day: u8,
    name: String,
}

#[derive(Debug, Deserialize)]
struct MovableHolidayEntry {
    date: String,
    name: String,
}

fn configuration_error(message: String) -> ServiceError {
    ServiceError::ConfigurationError(message.into())
}

/// Parses a holiday table in TOML format.
pub fn parse_holiday_table(content: &str, epoch_year: i32) -> Result<HolidayTable, ServiceError> {
    let file: HolidayFile = toml::from_str(content)
        .map_err(|err| configuration_error(format!("Invalid holiday file: {}", err)))?;

    let fixed = file
        .fixed
        .into_iter()
        .map(|entry| {
            Ok(FixedHoliday {
                month: month_from_number(entry.month).map_err(|_| {
                    configuration_error(format!(
                        "Invalid month {} for holiday '{}'",
                        entry.month, entry.name
                    ))
                })?,
                day: entry.day,
                name: entry.name.into(),
            })
        })
        .collect::<Result<Vec<_>, ServiceError>>()?;

    let date_format = format_description!("[year]-[month]-[day]");
    let movable = file
        .movable
        .into_iter()
        .map(|entry| {
            Ok(Holiday {
                date: time::Date::parse(&entry.date, &date_format).map_err(|err| {
                    configuration_error(format!(
                        "Invalid date '{}' for holiday '{}': {}",
                        entry.date, entry.name, err
                    ))
                })?,
                name: entry.name.into(),
            })
        })
        .collect::<Result<Vec<_>, ServiceError>>()?;

    HolidayTable::new(epoch_year, fixed, movable)
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ServiceError> {
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| configuration_error(format!("Invalid value for {}: {}", key, value))),
        None => Ok(default),
    }
}

/// Builds the configuration from a variable lookup, usually the environment.
pub fn read_config(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ServiceError> {
    let database_url = lookup("DATABASE_URL").unwrap_or(DEFAULT_DATABASE_URL.to_string());
    let server_address = lookup("SERVER_ADDRESS").unwrap_or(DEFAULT_SERVER_ADDRESS.to_string());
    let holiday_file = lookup("HOLIDAY_FILE").filter(|path| !path.trim().is_empty());

    Ok(Config {
        database_url: Arc::from(database_url),
        server_address: Arc::from(server_address),
        holiday_file: holiday_file.map(Arc::from),
        holiday_epoch_year: parse_var(&lookup, "HOLIDAY_EPOCH_YEAR", DEFAULT_HOLIDAY_EPOCH_YEAR)?,
        quota: QuotaPolicy {
            full_day_minutes: parse_var(&lookup, "FULL_DAY_MINUTES", FULL_DAY_MINUTES)?,
            short_day_minutes: parse_var(&lookup, "SHORT_DAY_MINUTES", SHORT_DAY_MINUTES)?,
            short_day: parse_var(&lookup, "SHORT_WEEKDAY", DayOfWeek::Friday)?,
        },
    })
}

pub struct ConfigServiceImpl;

impl ConfigServiceImpl {
    pub async fn work_calendar_from(&self, config: &Config) -> Result<WorkCalendar, ServiceError> {
        let holidays = match &config.holiday_file {
            Some(path) => {
                info!("Loading holidays from {}", path);
                let content = tokio::fs::read_to_string(&**path)
                    .await
                    .map_err(|err| {
                        configuration_error(format!("Cannot read holiday file {}: {}", path, err))
                    })?;
                parse_holiday_table(&content, config.holiday_epoch_year)?
            }
            None => parse_holiday_table(BUNDLED_HOLIDAYS, config.holiday_epoch_year)?,
        };
        Ok(WorkCalendar::new(holidays, config.quota))
    }
}

#[async_trait]
impl ConfigService for ConfigServiceImpl {
    async fn get_config(&self) -> Result<Config, ServiceError> {
        read_config(|key| env::var(key).ok())
    }

    async fn work_calendar(&self) -> Result<WorkCalendar, ServiceError> {
        let config = self.get_config().await?;
        self.work_calendar_from(&config).await
    }
}
