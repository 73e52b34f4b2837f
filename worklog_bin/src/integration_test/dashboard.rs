use axum::http::StatusCode;
use dao::activity::ActivityStatusEntity;
use rest::RestStateDef;
use rest_types::{CalendarDayReportTO, DayBucketTO, DayStatusTO, MonthOverviewTO};
use service::dashboard::DashboardService;
use service::ServiceError;
use time::macros::date;
use uuid::Uuid;

use crate::integration_test::{get, TestSetup};

#[tokio::test]
async fn test_month_summary_of_past_month() {
    let test_setup = TestSetup::new().await;
    let user_id = test_setup.with_october_activities().await;

    let overview = test_setup
        .rest_state
        .dashboard_service()
        .month_summary(user_id, 2025, 10, None)
        .await
        .unwrap();

    assert_eq!(overview.summary.period_start, date!(2025 - 10 - 01));
    assert_eq!(overview.summary.period_end, date!(2025 - 10 - 31));
    assert_eq!(overview.summary.working_days_count, 22);
    assert_eq!(overview.summary.required_minutes, 9960);
    assert_eq!(overview.summary.worked_minutes, 1080);
    assert_eq!(overview.summary.completion_percentage, 11);
    assert_eq!(overview.month_progress_percentage, 100);
    assert_eq!(
        overview.completed_days.as_ref(),
        &[date!(2025 - 10 - 01), date!(2025 - 10 - 03)]
    );
    assert_eq!(overview.in_progress_days.as_ref(), &[date!(2025 - 10 - 02)]);
}

#[tokio::test]
async fn test_month_summary_for_unknown_user() {
    let test_setup = TestSetup::new().await;
    let unknown = Uuid::new_v4();

    let result = test_setup
        .rest_state
        .dashboard_service()
        .month_summary(unknown, 2025, 10, None)
        .await;
    assert!(matches!(result, Err(ServiceError::EntityNotFound(id)) if id == unknown));

    let (status, _) = get(test_setup.router(), &format!("/dashboard/{}/2025/10", unknown)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_month_summary_over_http() {
    let test_setup = TestSetup::new().await;
    let user_id = test_setup.with_october_activities().await;

    let (status, body) = get(test_setup.router(), &format!("/dashboard/{}/2025/10", user_id)).await;
    assert_eq!(status, StatusCode::OK);
    let overview: MonthOverviewTO = serde_json::from_slice(&body).unwrap();
    assert_eq!(overview.summary.worked_minutes, 1080);
    assert_eq!(overview.completed_days.len(), 2);

    let (status, _) = get(test_setup.router(), &format!("/dashboard/{}/2025/13", user_id)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_month_calendar_over_http() {
    let test_setup = TestSetup::new().await;
    let user_id = test_setup.with_october_activities().await;

    let (status, body) = get(
        test_setup.router(),
        &format!("/dashboard/{}/2025/10/calendar", user_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let days: Vec<CalendarDayReportTO> = serde_json::from_slice(&body).unwrap();
    assert_eq!(days.len(), 31);
    assert_eq!(days[0].status, Some(DayStatusTO::Completed));
    assert_eq!(days[1].status, Some(DayStatusTO::InProgress));
    assert_eq!(days[1].completion_percentage, 50);
    assert_eq!(days[2].day.quota_minutes, 360);
    assert_eq!(days[28].day.holiday_name.as_deref(), Some("Republic Day"));
    assert!(!days[28].day.is_working_day);
    assert_eq!(days[28].completion_percentage, 0);
}

#[tokio::test]
async fn test_day_buckets_over_http() {
    let test_setup = TestSetup::new().await;
    let user_id = test_setup.with_october_activities().await;
    test_setup
        .create_activity(
            user_id,
            date!(2025 - 10 - 02),
            5000,
            ActivityStatusEntity::InProgress,
            "Overtime",
        )
        .await;

    let (status, body) = get(
        test_setup.router(),
        &format!("/dashboard/{}/buckets?from=2025-10-02&to=2025-10-05", user_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let buckets: Vec<DayBucketTO> = serde_json::from_slice(&body).unwrap();
    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].date, date!(2025 - 10 - 02));
    assert_eq!(buckets[0].total_minutes, 240 + 1440);
    assert_eq!(buckets[0].record_count, 2);
    assert_eq!(buckets[0].status, DayStatusTO::InProgress);
    assert_eq!(buckets[1].status, DayStatusTO::Completed);

    let (status, _) = get(
        test_setup.router(),
        &format!("/dashboard/{}/buckets?from=2025-10-05&to=2025-10-02", user_id),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_unreadable_rows_do_not_hide_the_period() {
    let test_setup = TestSetup::new().await;
    let user_id = test_setup.with_october_activities().await;
    test_setup
        .insert_raw_activity(user_id, "2025-10-02", "blocked", "2025-10-02T09:00:00")
        .await;
    test_setup
        .insert_raw_activity(user_id, "2025-10-03", "done", "last tuesday")
        .await;

    let buckets = test_setup
        .rest_state
        .dashboard_service()
        .day_buckets(user_id, date!(2025 - 10 - 01), date!(2025 - 10 - 31), None)
        .await
        .unwrap();
    assert_eq!(buckets.len(), 3);
    assert_eq!(buckets[1].total_minutes, 240);
    assert_eq!(buckets[1].record_count, 1);
    assert_eq!(buckets[2].total_minutes, 360);

    let (status, body) = get(test_setup.router(), &format!("/dashboard/{}/2025/10", user_id)).await;
    assert_eq!(status, StatusCode::OK);
    let overview: MonthOverviewTO = serde_json::from_slice(&body).unwrap();
    assert_eq!(overview.summary.worked_minutes, 1080);
}

#[tokio::test]
async fn test_calendar_endpoints() {
    let test_setup = TestSetup::new().await;

    let (status, body) = get(test_setup.router(), "/calendar/2025/holidays").await;
    assert_eq!(status, StatusCode::OK);
    let holidays: Vec<rest_types::HolidayTO> = serde_json::from_slice(&body).unwrap();
    assert_eq!(holidays.len(), 14);
    assert!(holidays.windows(2).all(|pair| pair[0].date < pair[1].date));

    let (status, body) = get(test_setup.router(), "/calendar/2025/10").await;
    assert_eq!(status, StatusCode::OK);
    let month: rest_types::CalendarMonthTO = serde_json::from_slice(&body).unwrap();
    assert_eq!(month.quota.working_days, 22);
    assert_eq!(month.quota.required_minutes, 9960);
    assert_eq!(month.days.len(), 31);
}
