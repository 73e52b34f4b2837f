use axum::http::StatusCode;
use rest::RestStateDef;
use rest_types::ReportRowTO;
use service::export::ExportService;
use time::macros::date;

use crate::integration_test::{get, TestSetup};

#[tokio::test]
async fn test_report_rows_over_http() {
    let test_setup = TestSetup::new().await;
    let user_id = test_setup.with_october_activities().await;

    let (status, body) = get(
        test_setup.router(),
        &format!("/export/{}?from=2025-10-02&to=2025-10-31", user_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let rows: Vec<ReportRowTO> = serde_json::from_slice(&body).unwrap();
    assert_eq!(rows.len(), 4);
    match (&rows[0], &rows[1], &rows[3]) {
        (ReportRowTO::Activity(first), ReportRowTO::DayTotal(total), ReportRowTO::DayTotal(last)) => {
            assert_eq!(first.title.as_ref(), "Review");
            assert_eq!(first.day_index, 1);
            assert_eq!(total.total_minutes, 240);
            assert_eq!(last.day_index, 2);
            assert_eq!(last.date, date!(2025 - 10 - 03));
        }
        other => panic!("Unexpected report layout: {:?}", other),
    }
}

#[tokio::test]
async fn test_spreadsheet_export() {
    let test_setup = TestSetup::new().await;
    let user_id = test_setup.with_october_activities().await;

    let bytes = test_setup
        .rest_state
        .export_service()
        .export_spreadsheet(user_id, date!(2025 - 10 - 01), date!(2025 - 10 - 31), None)
        .await
        .unwrap();
    assert_eq!(&bytes[..2], b"PK");

    let (status, body) = get(
        test_setup.router(),
        &format!("/export/{}/xlsx?from=2025-10-01&to=2025-10-31", user_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..2], b"PK");
}

#[tokio::test]
async fn test_export_with_malformed_date() {
    let test_setup = TestSetup::new().await;
    let user_id = test_setup.with_october_activities().await;

    let (status, _) = get(
        test_setup.router(),
        &format!("/export/{}?from=2025-10-01&to=31.10.2025", user_id),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
