use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Response,
    routing::get,
    Router,
};
use rest_types::{CalendarDayTO, CalendarMonthTO, HolidayTO, MonthQuotaTO};
use service::calendar::CalendarService;
use tracing::instrument;
use utoipa::OpenApi;

use crate::{error_handler, json_response, RestStateDef};

pub fn generate_route<RestState: RestStateDef>() -> Router<RestState> {
    Router::new()
        .route("/{year}/holidays", get(get_holidays::<RestState>))
        .route("/{year}/{month}", get(get_month::<RestState>))
}

#[instrument(skip(rest_state))]
#[utoipa::path(
    get,
    path = "/{year}/holidays",
    tags = ["Calendar"],
    params(
        ("year", description = "Calendar year", example = "2025"),
    ),
    responses(
        (status = 200, description = "Holidays of the year in date order", body = [HolidayTO]),
    ),
)]
pub async fn get_holidays<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Path(year): Path<i32>,
) -> Response {
    error_handler(
        (async {
            let holidays: Arc<[HolidayTO]> = rest_state
                .calendar_service()
                .holidays_for_year(year)
                .await?
                .iter()
                .map(HolidayTO::from)
                .collect();
            json_response(&holidays)
        })
        .await,
    )
}

#[instrument(skip(rest_state))]
#[utoipa::path(
    get,
    path = "/{year}/{month}",
    tags = ["Calendar"],
    params(
        ("year", description = "Calendar year", example = "2025"),
        ("month", description = "Month from 1 to 12", example = "10"),
    ),
    responses(
        (status = 200, description = "Days of the month with their quota", body = CalendarMonthTO),
        (status = 422, description = "Invalid month"),
    ),
)]
pub async fn get_month<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Path((year, month)): Path<(i32, u8)>,
) -> Response {
    error_handler(
        (async {
            let calendar_service = rest_state.calendar_service();
            let quota = calendar_service.month_quota(year, month).await?;
            let days = calendar_service.month_days(year, month).await?;
            let month = CalendarMonthTO {
                quota: MonthQuotaTO::from(&quota),
                days: days.iter().map(CalendarDayTO::from).collect(),
            };
            json_response(&month)
        })
        .await,
    )
}

#[derive(OpenApi)]
#[openapi(
    paths(get_holidays, get_month),
    components(schemas(HolidayTO, CalendarMonthTO, CalendarDayTO, MonthQuotaTO))
)]
pub struct CalendarApiDoc;
