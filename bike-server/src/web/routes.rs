//! HTTP route handlers.

use std::convert::Infallible;

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::{
        Html, IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::{get, post},
};
use futures::stream::{self, Stream};
use tokio::sync::broadcast::error::RecvError;
use tower_http::services::ServeDir;
use tracing::{error, warn};

use crate::dashboard::SelectError;
use crate::location::{GeolocationError, LocationReport};
use crate::selection::SelectStation;
use crate::usage::ChartSpec;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/stations", get(list_stations))
        .route("/api/stations/search", get(search_stations))
        .route("/api/stations/nearby", get(nearby_stations))
        .route("/api/location", post(report_location))
        .route("/api/selection", get(current_selection).post(select_station))
        .route("/api/events", get(view_events))
        .route("/api/usage", get(usage_chart))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found)
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Dashboard page.
async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let snapshot = state.dashboard.snapshot().await;
    let reload_ms = state.dashboard.config().refresh_interval.as_millis();

    let template = IndexTemplate {
        map: MapView::from_config(state.dashboard.map(), reload_ms),
        status: SnapshotStatusView::from_snapshot(snapshot.as_deref()),
    };
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;

    Ok(Html(html))
}

/// Error page for unknown routes.
async fn not_found(uri: Uri) -> impl IntoResponse {
    let page = ErrorTemplate {
        title: "Not found".to_string(),
        message: "There is nothing at this address.".to_string(),
        details: Some(uri.path().to_string()),
    };
    let html = page
        .render()
        .unwrap_or_else(|e| format!("Template error: {}", e));

    (StatusCode::NOT_FOUND, Html(html))
}

/// Full station list of the current snapshot.
async fn list_stations(State(state): State<AppState>) -> Json<StationsResponse> {
    let snapshot = state.dashboard.snapshot().await;
    Json(StationsResponse::from_snapshot(snapshot.as_deref()))
}

/// Search stations by name or address.
async fn search_stations(
    State(state): State<AppState>,
    Query(req): Query<StationSearchRequest>,
) -> Json<StationSearchResponse> {
    let stations = state
        .dashboard
        .search(&req.q)
        .await
        .iter()
        .map(StationResult::from_station)
        .collect();

    Json(StationSearchResponse { stations })
}

/// Nearby stations for the last reported user location.
async fn nearby_stations(State(state): State<AppState>) -> Json<NearbyResponse> {
    let radius_km = state.dashboard.config().nearby_radius_km;
    let response = match state.dashboard.nearby().await {
        Some(nearby) => NearbyResponse {
            located: true,
            radius_km,
            stations: nearby.iter().map(StationResult::from_nearby).collect(),
        },
        None => NearbyResponse {
            located: false,
            radius_km,
            stations: Vec::new(),
        },
    };

    Json(response)
}

/// Receive the outcome of a browser geolocation request.
async fn report_location(
    State(state): State<AppState>,
    Json(report): Json<LocationReport>,
) -> Result<Json<NearbyResponse>, AppError> {
    let nearby = state.dashboard.locate(report).await?;

    Ok(Json(NearbyResponse {
        located: true,
        radius_km: state.dashboard.config().nearby_radius_km,
        stations: nearby.iter().map(StationResult::from_nearby).collect(),
    }))
}

/// Current selection.
async fn current_selection(State(state): State<AppState>) -> Json<SelectionResponse> {
    Json(SelectionResponse::from_selection(
        &state.dashboard.selection(),
    ))
}

/// Dispatch a station selection.
async fn select_station(
    State(state): State<AppState>,
    Json(command): Json<SelectStation>,
) -> Result<Json<SelectionResponse>, AppError> {
    state.dashboard.select(command).await?;

    Ok(Json(SelectionResponse::from_selection(
        &state.dashboard.selection(),
    )))
}

/// Stream of map commands and selection changes for the browser.
async fn view_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let commands = stream::unfold(state.events.subscribe(), |mut receiver| async move {
        loop {
            match receiver.recv().await {
                Ok(command) => match Event::default().event(command.name()).json_data(&command) {
                    Ok(event) => return Some((Ok::<_, Infallible>(event), receiver)),
                    Err(e) => error!(error = %e, "failed to encode view command"),
                },
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "view event subscriber lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    let selections = stream::unfold(
        state.dashboard.subscribe_selection(),
        |mut receiver| async move {
            loop {
                receiver.changed().await.ok()?;
                let selection = {
                    let current = receiver.borrow_and_update();
                    SelectionResponse::from_selection(&current)
                };
                match Event::default().event("selection").json_data(&selection) {
                    Ok(event) => return Some((Ok::<_, Infallible>(event), receiver)),
                    Err(e) => error!(error = %e, "failed to encode selection"),
                }
            }
        },
    );

    Sse::new(stream::select(commands, selections)).keep_alive(KeepAlive::default())
}

/// Usage chart specification.
async fn usage_chart(
    State(state): State<AppState>,
    Query(req): Query<UsageRequest>,
) -> Json<ChartSpec> {
    Json(ChartSpec::from_history(&state.usage, req.kind))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    NotFound { message: String },
    Unprocessable { message: String },
    Internal { message: String },
}

impl From<SelectError> for AppError {
    fn from(e: SelectError) -> Self {
        AppError::NotFound {
            message: e.to_string(),
        }
    }
}

impl From<GeolocationError> for AppError {
    fn from(e: GeolocationError) -> Self {
        AppError::Unprocessable {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, "{message}");
        } else {
            warn!(%status, "{message}");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
