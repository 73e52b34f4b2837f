use axum::{
    extract::{Path, State},
    response::Response,
    routing::get,
    Router,
};
use rest_types::TeamStatisticsTO;
use service::statistics::StatisticsService;
use tracing::instrument;
use utoipa::OpenApi;

use crate::{error_handler, json_response, RestStateDef};

pub fn generate_route<RestState: RestStateDef>() -> Router<RestState> {
    Router::new().route("/team/{year}/{month}", get(get_team_statistics::<RestState>))
}

#[instrument(skip(rest_state))]
#[utoipa::path(
    get,
    path = "/team/{year}/{month}",
    tags = ["Statistics"],
    params(
        ("year", description = "Calendar year", example = "2025"),
        ("month", description = "Month from 1 to 12", example = "10"),
    ),
    responses(
        (status = 200, description = "Completion of every user in the month", body = TeamStatisticsTO),
        (status = 422, description = "Invalid month"),
    ),
)]
pub async fn get_team_statistics<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Path((year, month)): Path<(i32, u8)>,
) -> Response {
    error_handler(
        (async {
            let statistics = TeamStatisticsTO::from(
                &rest_state
                    .statistics_service()
                    .team_statistics(year, month, None)
                    .await?,
            );
            json_response(&statistics)
        })
        .await,
    )
}

#[derive(OpenApi)]
#[openapi(paths(get_team_statistics), components(schemas(TeamStatisticsTO)))]
pub struct StatisticsApiDoc;
