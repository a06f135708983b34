//! REST API over a completed feasibility run.
//!
//! Read endpoints serve the run the binary computed at startup:
//! - `/state`: scenario, results, parking and land-rule report
//! - `/roi-curve`: ROI-vs-rooms points with optional room range filtering
//! - `/tornado`: sensitivity deltas
//! - `/regulations/{code}`: a city's regulation entry
//!
//! `POST /simulate` runs a fresh simulation for a submitted form state.

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::finance::engine::Results;
use crate::finance::types::Scenario;
use crate::regulation::{ParkingAssessment, ValidationReport};

pub use types::{ErrorResponse, RoomRangeQuery, SimulateQuery, StateResponse};

/// Immutable application state shared across all request handlers.
///
/// Built once after the startup run and wrapped in `Arc`; handlers only read it.
pub struct AppState {
    /// Project display name.
    pub name: String,
    pub scenario: Scenario,
    pub results: Results,
    pub parking: ParkingAssessment,
    pub validation: ValidationReport,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/state", get(handlers::get_state))
        .route("/roi-curve", get(handlers::get_roi_curve))
        .route("/tornado", get(handlers::get_tornado))
        .route("/regulations/{code}", get(handlers::get_regulation))
        .route("/simulate", post(handlers::post_simulate))
        .with_state(state)
}

/// Binds to the given address and serves the API until the server stops.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
