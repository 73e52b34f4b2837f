use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, Query, State},
    response::Response,
    routing::get,
    Router,
};
use rest_types::{ActivityRowTO, DayTotalRowTO, ReportRowTO};
use service::export::ExportService;
use tracing::instrument;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::{error_handler, json_response, DateRangeQuery, RestStateDef};

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub fn generate_route<RestState: RestStateDef>() -> Router<RestState> {
    Router::new()
        .route("/{user_id}", get(get_report_rows::<RestState>))
        .route("/{user_id}/xlsx", get(get_spreadsheet::<RestState>))
}

#[instrument(skip(rest_state))]
#[utoipa::path(
    get,
    path = "/{user_id}",
    tags = ["Export"],
    params(
        ("user_id", description = "User id"),
        DateRangeQuery,
    ),
    responses(
        (status = 200, description = "Report rows grouped by day", body = [ReportRowTO]),
        (status = 400, description = "Malformed date"),
        (status = 404, description = "User not found"),
        (status = 422, description = "From is after to"),
    ),
)]
pub async fn get_report_rows<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<DateRangeQuery>,
) -> Response {
    error_handler(
        (async {
            let (from, to) = query.dates()?;
            let rows: Arc<[ReportRowTO]> = rest_state
                .export_service()
                .report_rows(user_id, from, to, None)
                .await?
                .iter()
                .map(ReportRowTO::from)
                .collect();
            json_response(&rows)
        })
        .await,
    )
}

#[instrument(skip(rest_state))]
#[utoipa::path(
    get,
    path = "/{user_id}/xlsx",
    tags = ["Export"],
    params(
        ("user_id", description = "User id"),
        DateRangeQuery,
    ),
    responses(
        (status = 200, description = "Report rows as xlsx workbook", content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        (status = 400, description = "Malformed date"),
        (status = 404, description = "User not found"),
        (status = 422, description = "From is after to"),
    ),
)]
pub async fn get_spreadsheet<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<DateRangeQuery>,
) -> Response {
    error_handler(
        (async {
            let (from, to) = query.dates()?;
            let bytes = rest_state
                .export_service()
                .export_spreadsheet(user_id, from, to, None)
                .await?;
            Ok(Response::builder()
                .status(200)
                .header("Content-Type", XLSX_CONTENT_TYPE)
                .header(
                    "Content-Disposition",
                    format!("attachment; filename=\"worklog-{}-{}.xlsx\"", from, to),
                )
                .body(Body::from(bytes.to_vec()))
                .unwrap())
        })
        .await,
    )
}

#[derive(OpenApi)]
#[openapi(
    paths(get_report_rows, get_spreadsheet),
    components(schemas(ReportRowTO, ActivityRowTO, DayTotalRowTO))
)]
pub struct ExportApiDoc;
