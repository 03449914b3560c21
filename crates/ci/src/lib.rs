//! `finops-ci` -- build-run sources for the analytics engine.
//!
//! Fetches historical CI runs from GitHub Actions or a local JSON file and
//! hands them over as [`finops_core::build_metrics::BuildRunRecord`]s.

pub mod config;
pub mod error;
pub mod file;
pub mod github;
pub mod source;

pub use config::GithubConfig;
pub use error::CiError;
pub use file::FileRunSource;
pub use github::GithubActionsClient;
pub use source::{RunQuery, RunSource};
