//! Offline run source backed by a JSON file.
//!
//! Accepts either a bare array of runs or a saved GitHub response object with
//! a `workflow_runs` key.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use finops_core::build_metrics::BuildRunRecord;
use serde::Deserialize;

use crate::error::CiError;
use crate::source::{RunQuery, RunSource};

#[derive(Deserialize)]
#[serde(untagged)]
enum RunsDocument {
    Bare(Vec<BuildRunRecord>),
    Wrapped { workflow_runs: Vec<BuildRunRecord> },
}

/// Parse a runs document from JSON text.
pub fn parse_runs_document(body: &str) -> Result<Vec<BuildRunRecord>, CiError> {
    let doc: RunsDocument = serde_json::from_str(body)?;
    Ok(match doc {
        RunsDocument::Bare(runs) => runs,
        RunsDocument::Wrapped { workflow_runs } => workflow_runs,
    })
}

pub struct FileRunSource {
    path: PathBuf,
}

impl FileRunSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RunSource for FileRunSource {
    /// Runs created before `query.since` are dropped. Runs without a creation
    /// timestamp are kept so they still count toward totals.
    async fn fetch_runs(&self, query: &RunQuery) -> Result<Vec<BuildRunRecord>, CiError> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| CiError::Io {
                path: self.path.clone(),
                source,
            })?;

        let runs: Vec<BuildRunRecord> = parse_runs_document(&body)?
            .into_iter()
            .filter(|run| {
                run.created_at
                    .map_or(true, |created| created.date_naive() >= query.since)
            })
            .collect();

        tracing::info!(
            path = %self.path.display(),
            run_count = runs.len(),
            "Loaded build runs from file",
        );
        Ok(runs)
    }
}
