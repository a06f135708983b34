//! Integration tests for the REST API feature.

#![cfg(feature = "api")]

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::util::ServiceExt;

use kost_sim::adapter::{FormState, scenario_from_form};
use kost_sim::api::{AppState, router};
use kost_sim::config::ProjectConfig;
use kost_sim::finance::simulate;
use kost_sim::regulation::{CityRegulation, calculate_parking_requirement, validate_land_rules};

/// Runs a preset the way the binary does and returns the API state.
fn build_api_state(preset: &str) -> Arc<AppState> {
    let cfg = ProjectConfig::from_preset(preset).expect("preset should load");
    let scenario = cfg.to_scenario();
    let results = simulate(&scenario);
    let city = CityRegulation::resolve(&scenario.city);
    let parking = calculate_parking_requirement(
        results.metrics.rooms_total,
        &city.parking,
        &cfg.transport,
        cfg.project.area_type,
    );
    let validation = validate_land_rules(&scenario, cfg.site.parking_spots, city);
    Arc::new(AppState {
        name: cfg.project.name.clone(),
        scenario,
        results,
        parking,
        validation,
    })
}

async fn send(state: Arc<AppState>, req: Request<Body>) -> (StatusCode, Value) {
    let resp = router(state).oneshot(req).await.expect("request should complete");
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request should build")
}

#[tokio::test]
async fn state_carries_full_run() {
    let (status, json) = send(build_api_state("yogya_16"), get("/state")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Yogyakarta • 16-room Student");
    assert_eq!(json["scenario"]["city"], "YOG");
    assert_eq!(json["results"]["rooms_total"], 16);
    assert_eq!(json["parking"]["final_spots"], 4);
    assert!(json["validation"]["errors"].as_object().is_some_and(|e| e.is_empty()));
}

#[tokio::test]
async fn state_reports_land_rule_errors() {
    let (_, json) = send(build_api_state("jakarta_24"), get("/state")).await;
    assert_eq!(
        json["validation"]["errors"]["kdb"],
        "KDB cannot exceed 55% in Jakarta Central"
    );
}

#[tokio::test]
async fn roi_curve_range_is_inclusive() {
    let (status, json) = send(build_api_state("yogya_16"), get("/roi-curve?from=10&to=12")).await;
    assert_eq!(status, StatusCode::OK);
    let rooms: Vec<u64> = json
        .as_array()
        .map(|a| a.iter().filter_map(|p| p["rooms"].as_u64()).collect())
        .unwrap_or_default();
    assert_eq!(rooms, vec![10, 11, 12]);
}

#[tokio::test]
async fn roi_curve_outside_sweep_is_empty() {
    let (status, json) = send(build_api_state("yogya_16"), get("/roi-curve?from=100")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn regulation_lookup_returns_table_entry() {
    let (status, json) = send(build_api_state("yogya_16"), get("/regulations/JKT-C")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Jakarta Central");
    assert_eq!(json["max_floors"], 4);
    assert_eq!(json["parking"]["base_ratio"], 0.4);
}

#[tokio::test]
async fn simulate_matches_library_run() {
    let form = FormState::default();
    let expected = simulate(&scenario_from_form(&form, "BDG"));

    let req = Request::builder()
        .method("POST")
        .uri("/simulate?city=BDG")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&form).expect("form serializes")))
        .expect("request should build");
    let (status, json) = send(build_api_state("yogya_16"), req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::to_value(&expected).expect("results serialize"));
}

#[tokio::test]
async fn simulate_accepts_rupiah_strings() {
    let body = r#"{"capex": {"land_cost": "3,5b"}, "opex": {"utilities": "7.500.000"}}"#;
    let req = Request::builder()
        .method("POST")
        .uri("/simulate")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .expect("request should build");
    let (status, json) = send(build_api_state("jakarta_24"), req).await;

    assert_eq!(status, StatusCode::OK);
    let default_run = simulate(&scenario_from_form(&FormState::default(), "JKT-C"));
    assert_eq!(json["capex"].as_f64(), Some(default_run.metrics.capex));
}

fn post_form(uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .expect("request should build")
}

#[tokio::test]
async fn simulate_rejects_negative_site() {
    let req = post_form("/simulate", r#"{"site_area": -50}"#);
    let (status, json) = send(build_api_state("yogya_16"), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().is_some_and(|e| e.contains("site.site_area")));
}

#[tokio::test]
async fn simulate_rejects_oversized_share_layout() {
    // 1 m² rooms on a 100,000,000 m² plot would reconcile to ~10^8 units
    let body = r#"{
        "site_area": 100000000,
        "rooms": [{"type": "standard", "size": 1, "rent": 1000000, "fitout": 0, "mix": 100}]
    }"#;
    let (status, json) = send(build_api_state("yogya_16"), post_form("/simulate", body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().is_some_and(|e| e.starts_with("rooms: ")));
}

#[tokio::test]
async fn simulate_rejects_near_max_counts() {
    let body = r#"{
        "rooms": [
            {"type": "standard", "size": 12, "rent": 1000000, "fitout": 0, "count": 3000000000},
            {"type": "premium", "size": 20, "rent": 2000000, "fitout": 0, "count": 3000000000}
        ]
    }"#;
    let (status, json) = send(build_api_state("yogya_16"), post_form("/simulate?city=YOG", body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().is_some_and(|e| e.contains("rooms[0].count")));
}
