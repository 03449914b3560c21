//! Binary settings resolved from the environment.

use std::path::PathBuf;
use std::str::FromStr;

use finops_core::config::DEFAULT_MONTHLY_GPU_SPEND;

pub const DEFAULT_WORKFLOW: &str = "container.yml";
pub const DEFAULT_WINDOW_DAYS: u64 = 30;
pub const DEFAULT_COST_OUTPUT: &str = "demo-analysis.json";
pub const DEFAULT_BUILDS_OUTPUT: &str = "build-analytics.json";

/// Which report to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Cost,
    Builds,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cost" => Ok(Self::Cost),
            "builds" => Ok(Self::Builds),
            other => Err(format!("unknown command '{other}', expected 'cost' or 'builds'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// JSON file overriding demo config fields.
    pub demo_config_path: Option<PathBuf>,
    /// JSON file replacing the default pricing catalogue.
    pub pricing_path: Option<PathBuf>,
    pub monthly_gpu_spend: f64,
    /// Explicit output path; otherwise a per-command default.
    pub output_path: Option<PathBuf>,
    pub workflow: String,
    pub window_days: u64,
    /// Read runs from this file instead of the GitHub API.
    pub runs_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            demo_config_path: None,
            pricing_path: None,
            monthly_gpu_spend: DEFAULT_MONTHLY_GPU_SPEND,
            output_path: None,
            workflow: DEFAULT_WORKFLOW.to_string(),
            window_days: DEFAULT_WINDOW_DAYS,
            runs_file: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings from a key lookup. Unparseable numbers fall back to
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            demo_config_path: get("FINOPS_DEMO_CONFIG").map(PathBuf::from),
            pricing_path: get("FINOPS_PRICING").map(PathBuf::from),
            monthly_gpu_spend: get("FINOPS_MONTHLY_SPEND")
                .and_then(|v| v.parse::<f64>().ok())
                .unwrap_or(defaults.monthly_gpu_spend),
            output_path: get("FINOPS_OUTPUT").map(PathBuf::from),
            workflow: get("FINOPS_WORKFLOW").unwrap_or(defaults.workflow),
            window_days: get("FINOPS_WINDOW_DAYS")
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(defaults.window_days),
            runs_file: get("FINOPS_RUNS_FILE").map(PathBuf::from),
        }
    }

    pub fn output_for(&self, command: Command) -> PathBuf {
        self.output_path.clone().unwrap_or_else(|| {
            PathBuf::from(match command {
                Command::Cost => DEFAULT_COST_OUTPUT,
                Command::Builds => DEFAULT_BUILDS_OUTPUT,
            })
        })
    }
}
