//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{ErrorResponse, RoomRangeQuery, SimulateQuery, StateResponse};
use crate::adapter::{FormState, scenario_from_form};
use crate::config::ProjectConfig;
use crate::finance::engine::simulate;
use crate::finance::sensitivity::{RoiPoint, TornadoItem};
use crate::regulation::CityRegulation;

/// `GET /state` → 200 + `StateResponse` JSON
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<StateResponse> {
    Json(StateResponse {
        name: state.name.clone(),
        scenario: state.scenario.clone(),
        results: state.results.clone(),
        parking: state.parking.clone(),
        validation: state.validation.clone(),
    })
}

/// Returns ROI-vs-rooms points, optionally filtered by room count.
///
/// `GET /roi-curve` → 200 + `Vec<RoiPoint>` JSON
/// `GET /roi-curve?from=N&to=M` → filtered range (inclusive)
/// `GET /roi-curve?from=30&to=10` → 400 + `ErrorResponse`
pub async fn get_roi_curve(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RoomRangeQuery>,
) -> impl IntoResponse {
    let from = query.from.unwrap_or(0);
    let to = query.to.unwrap_or(u32::MAX);

    if from > to {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("`from` ({from}) must be <= `to` ({to})"),
            }),
        ));
    }

    let points: Vec<RoiPoint> = state
        .results
        .charts
        .roi_vs_rooms
        .iter()
        .filter(|p| p.rooms >= from && p.rooms <= to)
        .copied()
        .collect();

    Ok(Json(points))
}

/// `GET /tornado` → 200 + `Vec<TornadoItem>` JSON
pub async fn get_tornado(State(state): State<Arc<AppState>>) -> Json<Vec<TornadoItem>> {
    Json(state.results.charts.tornado.clone())
}

/// `GET /regulations/{code}` → 200 + the city's entry, or the default entry
/// for unknown codes.
pub async fn get_regulation(Path(code): Path<String>) -> Json<&'static CityRegulation> {
    Json(CityRegulation::resolve(&code))
}

/// Runs the adapter and the engine for a submitted form state.
///
/// `POST /simulate?city=CODE` with a `FormState` JSON body → 200 + `Results`
/// Structurally invalid forms → 400 + `ErrorResponse`
pub async fn post_simulate(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SimulateQuery>,
    Json(form): Json<FormState>,
) -> impl IntoResponse {
    let city = query.city.unwrap_or_else(|| state.scenario.city.clone());

    let errors = ProjectConfig::from_form(&form, &city).validate();
    if !errors.is_empty() {
        let error = errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        tracing::warn!(city = %city, %error, "rejected submitted form");
        return Err((StatusCode::BAD_REQUEST, Json(ErrorResponse { error })));
    }

    let scenario = scenario_from_form(&form, &city);
    tracing::info!(city = %scenario.city, rooms = form.rooms.len(), "simulating submitted form");
    // the ROI sweep is CPU-bound
    tokio::task::spawn_blocking(move || simulate(&scenario))
        .await
        .map(Json)
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("simulation failed: {e}"),
                }),
            )
        })
}
