//! Connection settings for the GitHub Actions run source.
//!
//! Resolved once from the environment by the caller and passed explicitly to
//! [`crate::github::GithubActionsClient`].

use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_OWNER: &str = "Finoptimize";
pub const DEFAULT_REPO: &str = "agentaflow-sro-community";
/// GitHub's maximum page size for the workflow runs endpoint.
pub const DEFAULT_PER_PAGE: u32 = 100;
pub const DEFAULT_MAX_PAGES: u32 = 1;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq)]
pub struct GithubConfig {
    pub api_url: String,
    pub owner: String,
    pub repo: String,
    pub token: Option<String>,
    pub per_page: u32,
    /// Upper bound on pages followed per fetch.
    pub max_pages: u32,
    pub request_timeout: Duration,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            owner: DEFAULT_OWNER.to_string(),
            repo: DEFAULT_REPO.to_string(),
            token: None,
            per_page: DEFAULT_PER_PAGE,
            max_pages: DEFAULT_MAX_PAGES,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl GithubConfig {
    /// Load from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup. Unset or empty values fall back to
    /// defaults; unparseable numbers are ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            api_url: get("GITHUB_API_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            owner: get("GITHUB_REPOSITORY_OWNER").unwrap_or(defaults.owner),
            repo: get("GITHUB_REPOSITORY_NAME").unwrap_or(defaults.repo),
            token: get("GITHUB_TOKEN"),
            per_page: get("GITHUB_PER_PAGE")
                .and_then(|v| v.parse::<u32>().ok())
                .filter(|&n| n > 0)
                .unwrap_or(defaults.per_page),
            max_pages: get("GITHUB_MAX_PAGES")
                .and_then(|v| v.parse::<u32>().ok())
                .filter(|&n| n > 0)
                .unwrap_or(defaults.max_pages),
            request_timeout: get("GITHUB_TIMEOUT_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = GithubConfig::from_lookup(lookup(&[]));
        assert_eq!(config, GithubConfig::default());
        assert!(config.token.is_none());
    }

    #[test]
    fn reads_repository_and_token() {
        let config = GithubConfig::from_lookup(lookup(&[
            ("GITHUB_REPOSITORY_OWNER", "acme"),
            ("GITHUB_REPOSITORY_NAME", "rockets"),
            ("GITHUB_TOKEN", "ghp_test"),
            ("GITHUB_API_URL", "https://ghe.example.com/api/v3/"),
        ]));
        assert_eq!(config.owner, "acme");
        assert_eq!(config.repo, "rockets");
        assert_eq!(config.token.as_deref(), Some("ghp_test"));
        assert_eq!(config.api_url, "https://ghe.example.com/api/v3");
    }

    #[test]
    fn empty_token_is_none() {
        let config = GithubConfig::from_lookup(lookup(&[("GITHUB_TOKEN", "  ")]));
        assert!(config.token.is_none());
    }

    #[test]
    fn bad_numbers_fall_back() {
        let config = GithubConfig::from_lookup(lookup(&[
            ("GITHUB_PER_PAGE", "lots"),
            ("GITHUB_MAX_PAGES", "0"),
            ("GITHUB_TIMEOUT_SECS", "5"),
        ]));
        assert_eq!(config.per_page, DEFAULT_PER_PAGE);
        assert_eq!(config.max_pages, DEFAULT_MAX_PAGES);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }
}
