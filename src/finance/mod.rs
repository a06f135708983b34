//! Financial simulation engine.
//!
//! Data flows one way: efficiency → yield → {cost, revenue} → metrics →
//! sensitivity. Every function here is pure over an immutable [`Scenario`].

pub mod cost;
/// Corridor layout to net:gross efficiency.
pub mod efficiency;
pub mod engine;
pub mod metrics;
pub mod revenue;
pub mod sensitivity;
/// Floor-area yield and room reconciliation.
pub mod site_yield;
pub mod types;

pub use engine::{Results, simulate};
pub use metrics::{Evaluation, Metrics, evaluate};
pub use types::Scenario;
