//! GitHub Actions workflow-runs client.
//!
//! Wraps `GET /repos/{owner}/{repo}/actions/workflows/{workflow}/runs` using
//! [`reqwest`], following pages up to [`GithubConfig::max_pages`].

use async_trait::async_trait;
use finops_core::build_metrics::BuildRunRecord;
use serde::Deserialize;

use crate::config::GithubConfig;
use crate::error::CiError;
use crate::source::{RunQuery, RunSource};

const USER_AGENT: &str = concat!("finops-ci/", env!("CARGO_PKG_VERSION"));
const ACCEPT: &str = "application/vnd.github+json";

/// One page of the workflow runs listing.
#[derive(Debug, Deserialize)]
pub struct WorkflowRunsPage {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub workflow_runs: Vec<BuildRunRecord>,
}

/// Parse a workflow runs response body.
pub fn parse_runs_page(body: &str) -> Result<WorkflowRunsPage, CiError> {
    Ok(serde_json::from_str(body)?)
}

/// HTTP client for one repository's GitHub Actions runs.
pub struct GithubActionsClient {
    client: reqwest::Client,
    config: GithubConfig,
}

impl GithubActionsClient {
    /// Build a client with the configured request timeout.
    pub fn new(config: GithubConfig) -> Result<Self, CiError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { client, config })
    }

    /// Reuse an existing [`reqwest::Client`] (connection pooling, custom TLS).
    pub fn with_client(client: reqwest::Client, config: GithubConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &GithubConfig {
        &self.config
    }

    /// Endpoint listing runs for `workflow` (a workflow file name or id).
    pub fn runs_url(&self, workflow: &str) -> String {
        format!(
            "{}/repos/{}/{}/actions/workflows/{}/runs",
            self.config.api_url, self.config.owner, self.config.repo, workflow
        )
    }

    async fn fetch_page(&self, query: &RunQuery, page: u32) -> Result<WorkflowRunsPage, CiError> {
        let url = self.runs_url(&query.workflow);
        tracing::debug!(url = %url, page, since = %query.since, "Fetching workflow runs page");

        let mut request = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, ACCEPT)
            .query(&[
                ("per_page", self.config.per_page.to_string()),
                ("page", page.to_string()),
                ("created", format!(">={}", query.since)),
            ]);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = Self::ensure_success(request.send().await?).await?;
        let body = response.text().await?;
        parse_runs_page(&body)
    }

    /// Ensure the response has a success status code, otherwise return
    /// [`CiError::Api`] with the status and body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, CiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(CiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl RunSource for GithubActionsClient {
    async fn fetch_runs(&self, query: &RunQuery) -> Result<Vec<BuildRunRecord>, CiError> {
        let mut runs = Vec::new();

        for page in 1..=self.config.max_pages.max(1) {
            let batch = self.fetch_page(query, page).await?;
            let received = batch.workflow_runs.len();
            runs.extend(batch.workflow_runs);

            if received < self.config.per_page as usize || runs.len() as u64 >= batch.total_count {
                break;
            }
        }

        tracing::info!(
            workflow = %query.workflow,
            owner = %self.config.owner,
            repo = %self.config.repo,
            run_count = runs.len(),
            "Fetched workflow runs",
        );
        Ok(runs)
    }
}
