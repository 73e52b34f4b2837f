#[cfg(test)]
mod integration_test;

use std::sync::Arc;

use dao_impl_sqlite::{
    activity::ActivityDaoImpl, user::UserDaoImpl, TransactionDaoImpl, TransactionImpl,
};
use service::{config::ConfigService, quota::WorkCalendar};
use service_impl::{calendar::CalendarServiceImpl, clock::ClockServiceImpl, config::ConfigServiceImpl};
use sqlx::SqlitePool;
#[cfg(feature = "json_logging")]
use tracing_subscriber::fmt::format::FmtSpan;

type Transaction = TransactionImpl;
type TransactionDao = TransactionDaoImpl;
type UserDao = UserDaoImpl;
type ActivityDao = ActivityDaoImpl;
type CalendarService = CalendarServiceImpl;
type ClockService = ClockServiceImpl;

pub struct UserServiceDependencies;
impl service_impl::user::UserServiceDeps for UserServiceDependencies {
    type Transaction = Transaction;
    type UserDao = UserDao;
    type TransactionDao = TransactionDao;
}
type UserService = service_impl::user::UserServiceImpl<UserServiceDependencies>;

pub struct ActivityServiceDependencies;
impl service_impl::activity::ActivityServiceDeps for ActivityServiceDependencies {
    type Transaction = Transaction;
    type ActivityDao = ActivityDao;
    type TransactionDao = TransactionDao;
}
type ActivityService = service_impl::activity::ActivityServiceImpl<ActivityServiceDependencies>;

pub struct DashboardServiceDependencies;
impl service_impl::dashboard::DashboardServiceDeps for DashboardServiceDependencies {
    type Transaction = Transaction;
    type ActivityService = ActivityService;
    type UserService = UserService;
    type CalendarService = CalendarService;
    type ClockService = ClockService;
    type TransactionDao = TransactionDao;
}
type DashboardService =
    service_impl::dashboard::DashboardServiceImpl<DashboardServiceDependencies>;

pub struct StatisticsServiceDependencies;
impl service_impl::statistics::StatisticsServiceDeps for StatisticsServiceDependencies {
    type Transaction = Transaction;
    type ActivityService = ActivityService;
    type UserService = UserService;
    type CalendarService = CalendarService;
    type ClockService = ClockService;
    type TransactionDao = TransactionDao;
}
type StatisticsService =
    service_impl::statistics::StatisticsServiceImpl<StatisticsServiceDependencies>;

pub struct ExportServiceDependencies;
impl service_impl::export::ExportServiceDeps for ExportServiceDependencies {
    type Transaction = Transaction;
    type ActivityService = ActivityService;
    type UserService = UserService;
    type TransactionDao = TransactionDao;
}
type ExportService = service_impl::export::ExportServiceImpl<ExportServiceDependencies>;

#[derive(Clone)]
pub struct RestStateImpl {
    calendar_service: Arc<CalendarService>,
    dashboard_service: Arc<DashboardService>,
    statistics_service: Arc<StatisticsService>,
    export_service: Arc<ExportService>,
}
impl rest::RestStateDef for RestStateImpl {
    type CalendarService = CalendarService;
    type DashboardService = DashboardService;
    type StatisticsService = StatisticsService;
    type ExportService = ExportService;

    fn backend_version(&self) -> Arc<str> {
        Arc::from(env!("CARGO_PKG_VERSION"))
    }

    fn calendar_service(&self) -> Arc<Self::CalendarService> {
        self.calendar_service.clone()
    }
    fn dashboard_service(&self) -> Arc<Self::DashboardService> {
        self.dashboard_service.clone()
    }
    fn statistics_service(&self) -> Arc<Self::StatisticsService> {
        self.statistics_service.clone()
    }
    fn export_service(&self) -> Arc<Self::ExportService> {
        self.export_service.clone()
    }
}
impl RestStateImpl {
    pub fn new(pool: Arc<sqlx::Pool<sqlx::Sqlite>>, work_calendar: Arc<WorkCalendar>) -> Self {
        let transaction_dao = Arc::new(TransactionDao::new(pool.clone()));
        let clock_service = Arc::new(ClockServiceImpl);
        let calendar_service = Arc::new(CalendarServiceImpl::new(work_calendar));

        let user_service = Arc::new(UserService {
            user_dao: Arc::new(UserDao::new(pool.clone())),
            transaction_dao: transaction_dao.clone(),
        });
        let activity_service = Arc::new(ActivityService {
            activity_dao: Arc::new(ActivityDao::new(pool.clone())),
            transaction_dao: transaction_dao.clone(),
        });

        let dashboard_service = Arc::new(DashboardService {
            activity_service: activity_service.clone(),
            user_service: user_service.clone(),
            calendar_service: calendar_service.clone(),
            clock_service: clock_service.clone(),
            transaction_dao: transaction_dao.clone(),
        });
        let statistics_service = Arc::new(StatisticsService {
            activity_service: activity_service.clone(),
            user_service: user_service.clone(),
            calendar_service: calendar_service.clone(),
            clock_service: clock_service.clone(),
            transaction_dao: transaction_dao.clone(),
        });
        let export_service = Arc::new(ExportService {
            activity_service,
            user_service,
            transaction_dao,
        });

        Self {
            calendar_service,
            dashboard_service,
            statistics_service,
            export_service,
        }
    }
}

#[tokio::main]
async fn main() {
    let version = env!("CARGO_PKG_VERSION");

    #[cfg(feature = "local_logging")]
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::TRACE)
        .pretty()
        .with_file(true)
        .finish();

    #[cfg(feature = "json_logging")]
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .json()
        .with_span_events(FmtSpan::CLOSE)
        .with_span_list(true)
        .with_file(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    tracing::info!("Worklog backend version: {}", version);
    dotenvy::dotenv().ok();

    let config_service = ConfigServiceImpl;
    let config = config_service
        .get_config()
        .await
        .expect("Could not read configuration");
    let work_calendar = Arc::new(
        config_service
            .work_calendar_from(&config)
            .await
            .expect("Could not load the holiday table"),
    );

    let pool = Arc::new(
        SqlitePool::connect(&config.database_url)
            .await
            .expect("Could not connect to database"),
    );

    sqlx::migrate!("../migrations/sqlite")
        .run(pool.as_ref())
        .await
        .expect("Failed to run migrations");

    let rest_state = RestStateImpl::new(pool, work_calendar);
    rest::start_server(rest_state, &config.server_address).await
}
