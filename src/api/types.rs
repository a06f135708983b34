//! API response and query types.

use serde::{Deserialize, Serialize};

use crate::finance::engine::Results;
use crate::finance::types::Scenario;
use crate::regulation::{ParkingAssessment, ValidationReport};

/// Everything known about the startup run.
#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub name: String,
    pub scenario: Scenario,
    pub results: Results,
    pub parking: ParkingAssessment,
    pub validation: ValidationReport,
}

/// Optional inclusive room-count range for the ROI curve.
#[derive(Debug, Deserialize)]
pub struct RoomRangeQuery {
    pub from: Option<u32>,
    pub to: Option<u32>,
}

/// Query parameters for `POST /simulate`.
#[derive(Debug, Deserialize)]
pub struct SimulateQuery {
    /// City code; defaults to the startup scenario's city.
    pub city: Option<String>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
