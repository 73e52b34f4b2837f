use std::sync::Arc;

use dao::{MockTransaction, MockTransactionDao};
use mockall::predicate::{always, eq};
use service::activity::{ActivityRecord, ActivityStatus, MockActivityService};
use service::calendar::MockCalendarService;
use service::clock::MockClockService;
use service::quota::month_range;
use service::statistics::StatisticsService;
use service::user::{MockUserService, User};
use time::macros::date;
use time::{Date, Month};
use uuid::Uuid;
use worklog_utils::DateRange;

use crate::statistics::{StatisticsServiceDeps, StatisticsServiceImpl};
use crate::test::error_test::*;

pub struct StatisticsServiceDependencies {
    pub activity_service: MockActivityService,
    pub user_service: MockUserService,
    pub calendar_service: MockCalendarService,
    pub clock_service: MockClockService,
}

impl StatisticsServiceDeps for StatisticsServiceDependencies {
    type Transaction = MockTransaction;
    type ActivityService = MockActivityService;
    type UserService = MockUserService;
    type CalendarService = MockCalendarService;
    type ClockService = MockClockService;
    type TransactionDao = MockTransactionDao;
}

impl StatisticsServiceDependencies {
    pub fn build_service(self) -> StatisticsServiceImpl<StatisticsServiceDependencies> {
        let mut transaction_dao = MockTransactionDao::new();
        transaction_dao
            .expect_use_transaction()
            .returning(|_| Ok(MockTransaction));
        transaction_dao.expect_commit().returning(|_| Ok(()));

        StatisticsServiceImpl {
            activity_service: self.activity_service.into(),
            user_service: self.user_service.into(),
            calendar_service: self.calendar_service.into(),
            clock_service: self.clock_service.into(),
            transaction_dao: Arc::new(transaction_dao),
        }
    }
}

fn team() -> Arc<[User]> {
    vec![
        User {
            id: default_user_id(),
            name: "Alex".into(),
        },
        User {
            id: second_user_id(),
            name: "Sam".into(),
        },
        User {
            id: third_user_id(),
            name: "Robin".into(),
        },
    ]
    .into()
}

fn build_dependencies(today: Date) -> StatisticsServiceDependencies {
    let mut user_service = MockUserService::new();
    user_service.expect_all().returning(|_| Ok(team()));
    let mut clock_service = MockClockService::new();
    clock_service.expect_today().returning(move || today);

    StatisticsServiceDependencies {
        activity_service: MockActivityService::new(),
        user_service,
        calendar_service: calendar_service_mock(),
        clock_service,
    }
}

/// Records covering the full quota of every working day, scaled by `share`.
fn month_records(user_id: Uuid, year: i32, month: Month, share: u32) -> Vec<ActivityRecord> {
    let calendar = bundled_calendar();
    month_range(year, month)
        .unwrap()
        .days()
        .filter(|date| calendar.is_working_day(*date))
        .map(|date| ActivityRecord {
            id: Uuid::new_v4(),
            user_id,
            date: Some(date),
            minutes_spent: (calendar.quota_for_day(date) * share / 100) as i64,
            status: ActivityStatus::Done,
            title: "Work".into(),
            category: None,
        })
        .collect()
}

#[tokio::test]
async fn test_team_statistics() {
    let mut deps = build_dependencies(date!(2025 - 10 - 16));
    deps.activity_service
        .expect_find_for_range()
        .with(
            eq(DateRange::new(date!(2025 - 04 - 01), date!(2025 - 04 - 30))),
            always(),
        )
        .returning(|_, _| {
            let mut records = month_records(second_user_id(), 2025, Month::April, 50);
            records.extend(month_records(default_user_id(), 2025, Month::April, 100));
            records.extend(month_records(Uuid::nil(), 2025, Month::April, 100));
            Ok(records.into())
        });

    let statistics = deps
        .build_service()
        .team_statistics(2025, 4, None)
        .await
        .unwrap();

    let names: Vec<&str> = statistics
        .members
        .iter()
        .map(|member| member.member.name.as_ref())
        .collect();
    assert_eq!(names, vec!["Alex", "Sam", "Robin"]);
    assert_eq!(statistics.members[0].summary.completion_percentage, 100);
    assert_eq!(statistics.members[1].summary.completion_percentage, 50);
    assert_eq!(statistics.members[2].summary.completion_percentage, 0);
    assert_eq!(statistics.members[2].summary.working_days_count, 20);
    assert_eq!(statistics.average_completion_rate, 50);
    assert_eq!(statistics.members_with_full_completion, 1);
    assert_eq!(
        statistics.top_performer.map(|top| top.member.user_id),
        Some(default_user_id())
    );
}

#[tokio::test]
async fn test_team_statistics_current_month_counts_until_today() {
    let mut deps = build_dependencies(date!(2025 - 10 - 02));
    deps.activity_service
        .expect_find_for_range()
        .returning(|_, _| {
            Ok(vec![
                ActivityRecord {
                    id: Uuid::new_v4(),
                    user_id: default_user_id(),
                    date: Some(date!(2025 - 10 - 01)),
                    minutes_spent: 480,
                    status: ActivityStatus::Done,
                    title: "Work".into(),
                    category: None,
                },
                ActivityRecord {
                    id: Uuid::new_v4(),
                    user_id: default_user_id(),
                    date: Some(date!(2025 - 10 - 02)),
                    minutes_spent: 480,
                    status: ActivityStatus::Done,
                    title: "Work".into(),
                    category: None,
                },
            ]
            .into())
        });

    let statistics = deps
        .build_service()
        .team_statistics(2025, 10, None)
        .await
        .unwrap();
    assert_eq!(statistics.members[0].summary.required_minutes, 960);
    assert_eq!(statistics.members[0].summary.completion_percentage, 100);
    assert_eq!(statistics.average_completion_rate, 33);
}

#[tokio::test]
async fn test_team_statistics_without_users() {
    let mut deps = build_dependencies(date!(2025 - 10 - 16));
    deps.user_service = MockUserService::new();
    deps.user_service
        .expect_all()
        .returning(|_| Ok(Arc::from([])));
    deps.activity_service
        .expect_find_for_range()
        .returning(|_, _| Ok(Arc::from([])));

    let statistics = deps
        .build_service()
        .team_statistics(2025, 9, None)
        .await
        .unwrap();
    assert!(statistics.members.is_empty());
    assert_eq!(statistics.average_completion_rate, 0);
    assert_eq!(statistics.top_performer, None);
}

#[tokio::test]
async fn test_team_statistics_invalid_month() {
    let deps = build_dependencies(date!(2025 - 10 - 16));
    let result = deps.build_service().team_statistics(2025, 0, None).await;
    test_validation_error(&result);
}
