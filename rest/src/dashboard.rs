use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::Response,
    routing::get,
    Router,
};
use rest_types::{CalendarDayReportTO, DayBucketTO, MonthOverviewTO};
use service::dashboard::DashboardService;
use tracing::instrument;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::{error_handler, json_response, DateRangeQuery, RestStateDef};

pub fn generate_route<RestState: RestStateDef>() -> Router<RestState> {
    Router::new()
        .route("/{user_id}/buckets", get(get_day_buckets::<RestState>))
        .route("/{user_id}/{year}/{month}", get(get_month_summary::<RestState>))
        .route(
            "/{user_id}/{year}/{month}/calendar",
            get(get_month_calendar::<RestState>),
        )
}

#[instrument(skip(rest_state))]
#[utoipa::path(
    get,
    path = "/{user_id}/{year}/{month}",
    tags = ["Dashboard"],
    params(
        ("user_id", description = "User id"),
        ("year", description = "Calendar year", example = "2025"),
        ("month", description = "Month from 1 to 12", example = "10"),
    ),
    responses(
        (status = 200, description = "Progress of the user in the month", body = MonthOverviewTO),
        (status = 404, description = "User not found"),
        (status = 422, description = "Invalid month"),
    ),
)]
pub async fn get_month_summary<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Path((user_id, year, month)): Path<(Uuid, i32, u8)>,
) -> Response {
    error_handler(
        (async {
            let overview = MonthOverviewTO::from(
                &rest_state
                    .dashboard_service()
                    .month_summary(user_id, year, month, None)
                    .await?,
            );
            json_response(&overview)
        })
        .await,
    )
}

#[instrument(skip(rest_state))]
#[utoipa::path(
    get,
    path = "/{user_id}/{year}/{month}/calendar",
    tags = ["Dashboard"],
    params(
        ("user_id", description = "User id"),
        ("year", description = "Calendar year", example = "2025"),
        ("month", description = "Month from 1 to 12", example = "10"),
    ),
    responses(
        (status = 200, description = "Every day of the month with the logged work", body = [CalendarDayReportTO]),
        (status = 404, description = "User not found"),
        (status = 422, description = "Invalid month"),
    ),
)]
pub async fn get_month_calendar<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Path((user_id, year, month)): Path<(Uuid, i32, u8)>,
) -> Response {
    error_handler(
        (async {
            let days: Arc<[CalendarDayReportTO]> = rest_state
                .dashboard_service()
                .month_calendar(user_id, year, month, None)
                .await?
                .iter()
                .map(CalendarDayReportTO::from)
                .collect();
            json_response(&days)
        })
        .await,
    )
}

#[instrument(skip(rest_state))]
#[utoipa::path(
    get,
    path = "/{user_id}/buckets",
    tags = ["Dashboard"],
    params(
        ("user_id", description = "User id"),
        DateRangeQuery,
    ),
    responses(
        (status = 200, description = "Days with at least one record", body = [DayBucketTO]),
        (status = 400, description = "Malformed date"),
        (status = 404, description = "User not found"),
        (status = 422, description = "From is after to"),
    ),
)]
pub async fn get_day_buckets<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<DateRangeQuery>,
) -> Response {
    error_handler(
        (async {
            let (from, to) = query.dates()?;
            let buckets: Arc<[DayBucketTO]> = rest_state
                .dashboard_service()
                .day_buckets(user_id, from, to, None)
                .await?
                .iter()
                .map(DayBucketTO::from)
                .collect();
            json_response(&buckets)
        })
        .await,
    )
}

#[derive(OpenApi)]
#[openapi(
    paths(get_month_summary, get_month_calendar, get_day_buckets),
    components(schemas(MonthOverviewTO, CalendarDayReportTO, DayBucketTO))
)]
pub struct DashboardApiDoc;
