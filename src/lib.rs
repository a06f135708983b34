//! Feasibility engine for kost (multi-room boarding house) projects.
//!
//! A project flows from a [`config::ProjectConfig`] (TOML, preset, or the
//! form-state adapter) into an immutable [`finance::Scenario`], through the
//! pure [`finance::simulate`] pipeline, and out as [`finance::Results`].
//! City rules live in [`regulation`] and only annotate a run.

pub mod adapter;
#[cfg(feature = "api")]
pub mod api;
pub mod cli;
pub mod config;
pub mod currency;
/// Site yield, cost, revenue, metrics, and sensitivity sweeps.
pub mod finance;
pub mod io;
pub mod regulation;
