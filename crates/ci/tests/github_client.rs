//! Integration tests for the GitHub Actions client against a mock server.
//!
//! Each test mounts the workflow runs endpoint on a [`MockServer`] and points
//! [`GithubActionsClient`] at it through `api_url`.

use assert_matches::assert_matches;
use chrono::NaiveDate;
use finops_ci::{CiError, GithubActionsClient, GithubConfig, RunQuery, RunSource};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RUNS_PATH: &str = "/repos/acme/rockets/actions/workflows/container.yml/runs";

fn client(server: &MockServer, per_page: u32, max_pages: u32) -> GithubActionsClient {
    GithubActionsClient::new(GithubConfig {
        api_url: server.uri(),
        owner: "acme".to_string(),
        repo: "rockets".to_string(),
        token: Some("ghp_test".to_string()),
        per_page,
        max_pages,
        ..GithubConfig::default()
    })
    .expect("client")
}

fn query() -> RunQuery {
    RunQuery {
        workflow: "container.yml".to_string(),
        since: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
    }
}

fn runs_page(ids: &[u64], total_count: u64) -> Value {
    let runs: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "status": "completed",
                "conclusion": "success",
                "created_at": "2024-05-02T10:00:00Z",
                "updated_at": "2024-05-02T10:10:00Z",
            })
        })
        .collect();
    json!({ "total_count": total_count, "workflow_runs": runs })
}

// ---------------------------------------------------------------------------
// Paging
// ---------------------------------------------------------------------------

#[tokio::test]
async fn follows_pages_until_short_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RUNS_PATH))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(runs_page(&[1, 2], 3)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(RUNS_PATH))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(runs_page(&[3], 3)))
        .expect(1)
        .mount(&server)
        .await;

    let runs = client(&server, 2, 5).fetch_runs(&query()).await.unwrap();

    let ids: Vec<_> = runs.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![Some(1), Some(2), Some(3)]);
    assert!((runs[0].duration_minutes().unwrap() - 10.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn stops_when_total_count_reached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RUNS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(runs_page(&[1, 2], 2)))
        .expect(1)
        .mount(&server)
        .await;

    let runs = client(&server, 2, 5).fetch_runs(&query()).await.unwrap();
    assert_eq!(runs.len(), 2);
}

#[tokio::test]
async fn page_cap_limits_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RUNS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(runs_page(&[7], 10)))
        .expect(2)
        .mount(&server)
        .await;

    let runs = client(&server, 1, 2).fetch_runs(&query()).await.unwrap();
    assert_eq!(runs.len(), 2);
}

// ---------------------------------------------------------------------------
// Request shape
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sends_token_accept_header_and_window() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RUNS_PATH))
        .and(header("authorization", "Bearer ghp_test"))
        .and(header("accept", "application/vnd.github+json"))
        .and(query_param("per_page", "50"))
        .and(query_param("created", ">=2024-05-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(runs_page(&[], 0)))
        .expect(1)
        .mount(&server)
        .await;

    let runs = client(&server, 50, 1).fetch_runs(&query()).await.unwrap();
    assert!(runs.is_empty());
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn forbidden_is_api_error_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RUNS_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("API rate limit exceeded"))
        .mount(&server)
        .await;

    let err = client(&server, 100, 1).fetch_runs(&query()).await.unwrap_err();
    assert_matches!(err, CiError::Api { status: 403, ref body } if body.contains("rate limit"));
}

#[tokio::test]
async fn malformed_body_is_payload_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RUNS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client(&server, 100, 1).fetch_runs(&query()).await.unwrap_err();
    assert_matches!(err, CiError::Payload(_));
}
