use axum::http::StatusCode;
use rest::RestStateDef;
use rest_types::TeamStatisticsTO;
use service::statistics::StatisticsService;

use crate::integration_test::{get, TestSetup};

#[tokio::test]
async fn test_team_statistics_include_idle_users() {
    let test_setup = TestSetup::new().await;
    let alex = test_setup.with_october_activities().await;
    let sam = test_setup.create_user("Sam").await;

    let statistics = test_setup
        .rest_state
        .statistics_service()
        .team_statistics(2025, 10, None)
        .await
        .unwrap();

    assert_eq!(statistics.members.len(), 2);
    assert_eq!(statistics.members[0].member.user_id, alex);
    assert_eq!(statistics.members[0].summary.completion_percentage, 11);
    assert_eq!(statistics.members[1].member.user_id, sam);
    assert_eq!(statistics.members[1].summary.worked_minutes, 0);
    assert_eq!(statistics.members[1].summary.required_minutes, 9960);
    assert_eq!(statistics.average_completion_rate, 6);
    assert_eq!(statistics.members_with_full_completion, 0);
    assert_eq!(
        statistics.top_performer.map(|top| top.member.user_id),
        Some(alex)
    );
}

#[tokio::test]
async fn test_team_statistics_over_http() {
    let test_setup = TestSetup::new().await;
    test_setup.with_october_activities().await;

    let (status, body) = get(test_setup.router(), "/statistics/team/2025/10").await;
    assert_eq!(status, StatusCode::OK);
    let statistics: TeamStatisticsTO = serde_json::from_slice(&body).unwrap();
    assert_eq!(statistics.members.len(), 1);
    assert_eq!(statistics.members[0].name.as_ref(), "Alex");
    assert_eq!(statistics.average_completion_rate, 11);

    let (status, _) = get(test_setup.router(), "/statistics/team/2025/0").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
