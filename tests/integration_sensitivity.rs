//! Integration tests for the tornado and ROI-vs-rooms sweeps.

mod common;

use kost_sim::finance::evaluate;
use kost_sim::finance::sensitivity::{
    Perturbation, peak_roi, roi_vs_rooms, sweep_bounds, tornado,
};

#[test]
fn tornado_runs_every_perturbation_in_order() {
    let items = tornado(&common::jakarta_scenario());
    let keys: Vec<&str> = items.iter().map(|t| t.key).collect();
    let expected: Vec<&str> = Perturbation::ALL.iter().map(|p| p.label()).collect();
    assert_eq!(keys, expected);
}

#[test]
fn tornado_directions_follow_the_inputs() {
    let items = tornado(&common::profitable_scenario());
    let delta = |key: &str| {
        items
            .iter()
            .find(|t| t.key == key)
            .map(|t| t.delta_roi_pct)
            .unwrap_or_else(|| panic!("missing tornado item {key}"))
    };

    assert!(delta("occupancy +10pt") > 0.0);
    assert!(delta("occupancy -10pt") < 0.0);
    assert!(delta("rent +10%") > 0.0);
    assert!(delta("rent -10%") < 0.0);
    assert!(delta("structure +10%") < 0.0);
    assert!(delta("structure -10%") > 0.0);
    assert!(delta("fitout +10%") < 0.0);
    assert!(delta("utilities +10%") < 0.0);
    assert!(delta("utilities -10%") > 0.0);
}

#[test]
fn tornado_is_flat_when_base_roi_is_zero() {
    let mut scenario = common::jakarta_scenario();
    scenario.capex = Default::default();
    scenario.rooms.iter_mut().for_each(|r| r.fitout = 0.0);
    assert_eq!(evaluate(&scenario).metrics.roi, 0.0);
    assert!(tornado(&scenario).iter().all(|t| t.delta_roi_pct == 0.0));
}

#[test]
fn occupancy_perturbation_is_clamped() {
    let mut scenario = common::jakarta_scenario();
    scenario.revenue.occupancy_pct = 95.0;
    let up = Perturbation::OccupancyUp.apply(&scenario);
    assert_eq!(up.revenue.occupancy_pct, 100.0);

    scenario.revenue.occupancy_pct = 4.0;
    let down = Perturbation::OccupancyDown.apply(&scenario);
    assert_eq!(down.revenue.occupancy_pct, 0.0);
}

#[test]
fn roi_curve_covers_sweep_bounds() {
    let scenario = common::jakarta_scenario();
    let points = roi_vs_rooms(&scenario);
    let (min, max) = sweep_bounds(24);
    assert_eq!((min, max), (12, 36));
    assert_eq!(points.len(), (max - min + 1) as usize);
    for (i, p) in points.iter().enumerate() {
        assert_eq!(p.rooms, min + i as u32);
        assert!(p.roi.is_finite());
    }
}

#[test]
fn roi_curve_reproduces_base_roi() {
    let scenario = common::jakarta_scenario();
    let base = evaluate(&scenario).metrics;
    let points = roi_vs_rooms(&scenario);
    let at_base = points
        .iter()
        .find(|p| p.rooms == base.rooms_total)
        .expect("base room total inside sweep");
    assert!((at_base.roi - base.roi).abs() < 1e-12);
}

#[test]
fn small_projects_sweep_from_five_rooms() {
    let mut scenario = common::jakarta_scenario();
    for r in &mut scenario.rooms {
        r.count = Some(2);
    }
    // base 6: min max(5, 3) = 5, max floor(9) = 9
    let points = roi_vs_rooms(&scenario);
    assert_eq!(points.first().map(|p| p.rooms), Some(5));
    assert_eq!(points.last().map(|p| p.rooms), Some(9));
}

#[test]
fn peak_is_the_highest_point() {
    let points = roi_vs_rooms(&common::yogya_scenario());
    let peak = peak_roi(&points).expect("non-empty curve");
    assert!(points.iter().all(|p| p.roi <= peak.roi));
    assert_eq!(peak_roi(&[]), None);
}
