//! Cost, ROI, and CI build analytics engine.
//!
//! Pure computation only: callers fetch the raw records, pass them in, and
//! decide what to do with the resulting reports.

pub mod build_metrics;
pub mod cache_efficiency;
pub mod config;
pub mod cost;
pub mod error;
pub mod pricing;
pub mod recommendation;
pub mod report;
pub mod roi;
pub mod types;
pub mod utilization;
pub mod validation;
