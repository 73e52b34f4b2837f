use std::sync::Arc;

mod calendar;
mod dashboard;
mod export;
mod statistics;

use axum::{
    body::Body,
    extract::State,
    response::Response,
    routing::get,
    Router,
};
use serde::Deserialize;
use thiserror::Error;
use time::{macros::format_description, Date};
use tracing::{info, instrument};
use utoipa::{IntoParams, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

#[derive(Debug, Error)]
pub enum RestError {
    #[error("Service error")]
    ServiceError(#[from] service::ServiceError),

    #[error("Bad request: {0}")]
    BadRequest(Arc<str>),
}

fn error_handler(result: Result<Response, RestError>) -> Response {
    match result {
        Ok(response) => response,
        Err(err @ RestError::BadRequest(_)) => Response::builder()
            .status(400)
            .body(Body::new(err.to_string()))
            .unwrap(),
        Err(RestError::ServiceError(service::ServiceError::EntityNotFound(id))) => {
            Response::builder()
                .status(404)
                .body(Body::new(id.to_string()))
                .unwrap()
        }
        Err(RestError::ServiceError(err @ service::ServiceError::ValidationError(_))) => {
            Response::builder()
                .status(422)
                .body(Body::new(err.to_string()))
                .unwrap()
        }
        Err(RestError::ServiceError(err @ service::ServiceError::DateOrderWrong(_, _))) => {
            Response::builder()
                .status(422)
                .body(Body::new(err.to_string()))
                .unwrap()
        }
        Err(RestError::ServiceError(err @ service::ServiceError::DatabaseQueryError(_)))
        | Err(RestError::ServiceError(err @ service::ServiceError::ConfigurationError(_)))
        | Err(RestError::ServiceError(err @ service::ServiceError::SpreadsheetError(_)))
        | Err(RestError::ServiceError(err @ service::ServiceError::InternalError)) => {
            tracing::error!("Request failed: {}", err);
            Response::builder()
                .status(500)
                .body(Body::new(err.to_string()))
                .unwrap()
        }
    }
}

fn json_response<T: serde::Serialize>(value: &T) -> Result<Response, RestError> {
    let body = serde_json::to_string(value)
        .map_err(|_| RestError::ServiceError(service::ServiceError::InternalError))?;
    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .body(Body::new(body))
        .unwrap())
}

/// Inclusive date range given as `from` and `to` query parameters.
#[derive(Clone, Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DateRangeQuery {
    #[param(example = "2025-10-01")]
    pub from: String,

    #[param(example = "2025-10-31")]
    pub to: String,
}

impl DateRangeQuery {
    pub fn dates(&self) -> Result<(Date, Date), RestError> {
        Ok((parse_date("from", &self.from)?, parse_date("to", &self.to)?))
    }
}

fn parse_date(field: &str, value: &str) -> Result<Date, RestError> {
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .map_err(|_| RestError::BadRequest(format!("Invalid date for {}: {}", field, value).into()))
}

pub trait RestStateDef: Clone + Send + Sync + 'static {
    type CalendarService: service::calendar::CalendarService + Send + Sync + 'static;
    type DashboardService: service::dashboard::DashboardService + Send + Sync + 'static;
    type StatisticsService: service::statistics::StatisticsService + Send + Sync + 'static;
    type ExportService: service::export::ExportService + Send + Sync + 'static;

    fn backend_version(&self) -> Arc<str>;

    fn calendar_service(&self) -> Arc<Self::CalendarService>;
    fn dashboard_service(&self) -> Arc<Self::DashboardService>;
    fn statistics_service(&self) -> Arc<Self::StatisticsService>;
    fn export_service(&self) -> Arc<Self::ExportService>;
}

#[instrument(skip(rest_state))]
async fn get_version<RestState: RestStateDef>(rest_state: State<RestState>) -> Response {
    Response::builder()
        .status(200)
        .body(Body::new(rest_state.backend_version().to_string()))
        .unwrap()
}

#[derive(OpenApi)]
#[openapi(
    nest(
        (path = "/calendar", api = calendar::CalendarApiDoc),
        (path = "/dashboard", api = dashboard::DashboardApiDoc),
        (path = "/statistics", api = statistics::StatisticsApiDoc),
        (path = "/export", api = export::ExportApiDoc),
    ),
    info(title = "Worklog", description = "Work time accounting")
)]
pub struct ApiDoc;

pub fn build_router<RestState: RestStateDef>(rest_state: RestState) -> Router {
    Router::new()
        .route("/version", get(get_version::<RestState>))
        .nest("/calendar", calendar::generate_route())
        .nest("/dashboard", dashboard::generate_route())
        .nest("/statistics", statistics::generate_route())
        .nest("/export", export::generate_route())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(rest_state)
}

pub async fn start_server<RestState: RestStateDef>(rest_state: RestState, server_address: &str) {
    let app = build_router(rest_state);
    let listener = tokio::net::TcpListener::bind(server_address)
        .await
        .expect("Could not bind server");
    info!("Listening on {}", server_address);
    axum::serve(listener, app)
        .await
        .expect("Could not start server");
}
