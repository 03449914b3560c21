//! The run source abstraction.

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use finops_core::build_metrics::BuildRunRecord;

use crate::error::CiError;

/// Which runs to fetch: one workflow, created on or after `since`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunQuery {
    pub workflow: String,
    pub since: NaiveDate,
}

impl RunQuery {
    /// Runs of `workflow` from the last `days` days, counted back from `today`.
    pub fn last_days(workflow: impl Into<String>, days: u64, today: NaiveDate) -> Self {
        Self {
            workflow: workflow.into(),
            since: today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN),
        }
    }
}

/// A provider of historical build runs.
///
/// Timeouts and paging live in implementations; the analytics engine only
/// ever sees the returned records.
#[async_trait]
pub trait RunSource: Send + Sync {
    async fn fetch_runs(&self, query: &RunQuery) -> Result<Vec<BuildRunRecord>, CiError>;
}
