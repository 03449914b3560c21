//! CI build-run aggregation.
//!
//! Reduces historical build runs into duration statistics, success rate, and
//! a failure-reason tally. An empty run list yields zeroed metrics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Conclusion
// ---------------------------------------------------------------------------

/// Terminal status of a build run, in the CI provider's vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BuildConclusion {
    Success,
    Failure,
    Cancelled,
    Skipped,
    TimedOut,
    ActionRequired,
    Neutral,
    Stale,
    StartupFailure,
    Other(String),
}

impl BuildConclusion {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Cancelled => "cancelled",
            Self::Skipped => "skipped",
            Self::TimedOut => "timed_out",
            Self::ActionRequired => "action_required",
            Self::Neutral => "neutral",
            Self::Stale => "stale",
            Self::StartupFailure => "startup_failure",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for BuildConclusion {
    fn from(s: String) -> Self {
        match s.as_str() {
            "success" => Self::Success,
            "failure" => Self::Failure,
            "cancelled" => Self::Cancelled,
            "skipped" => Self::Skipped,
            "timed_out" => Self::TimedOut,
            "action_required" => Self::ActionRequired,
            "neutral" => Self::Neutral,
            "stale" => Self::Stale,
            "startup_failure" => Self::StartupFailure,
            _ => Self::Other(s),
        }
    }
}

impl From<BuildConclusion> for String {
    fn from(c: BuildConclusion) -> Self {
        c.as_str().to_string()
    }
}

// ---------------------------------------------------------------------------
// BuildRunRecord
// ---------------------------------------------------------------------------

/// A single historical build run.
///
/// `conclusion` is `None` while a run is still in progress.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BuildRunRecord {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
    #[serde(default)]
    pub conclusion: Option<BuildConclusion>,
    /// Provider-specific failure category, when one is exposed.
    #[serde(default)]
    pub failure_reason: Option<String>,
}

impl BuildRunRecord {
    pub fn is_success(&self) -> bool {
        self.conclusion == Some(BuildConclusion::Success)
    }

    pub fn is_failure(&self) -> bool {
        self.conclusion == Some(BuildConclusion::Failure)
    }

    /// Wall-clock duration in minutes.
    ///
    /// Only defined for successful runs with both timestamps present and
    /// `updated_at >= created_at`.
    pub fn duration_minutes(&self) -> Option<f64> {
        if !self.is_success() {
            return None;
        }
        let (created, updated) = (self.created_at?, self.updated_at?);
        let millis = updated.signed_duration_since(created).num_milliseconds();
        if millis < 0 {
            return None;
        }
        Some(millis as f64 / 60_000.0)
    }

    /// Key under which a failed run is tallied.
    fn failure_key(&self) -> String {
        match (&self.failure_reason, &self.conclusion) {
            (Some(reason), _) => reason.clone(),
            (None, Some(conclusion)) => conclusion.as_str().to_string(),
            (None, None) => "unknown".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// BuildMetrics
// ---------------------------------------------------------------------------

/// Aggregated statistics over a set of build runs.
///
/// Runs that are neither successful nor failed (cancelled, skipped, still
/// running) count toward `total_runs` only.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BuildMetrics {
    pub total_runs: usize,
    pub successful_runs: usize,
    pub failed_runs: usize,
    pub success_rate_percent: f64,
    pub avg_duration_minutes: f64,
    pub min_duration_minutes: f64,
    pub max_duration_minutes: f64,
    pub failure_reason_counts: BTreeMap<String, usize>,
}

/// Durations (minutes) of the successful runs that have them.
pub fn successful_durations(runs: &[BuildRunRecord]) -> Vec<f64> {
    runs.iter().filter_map(BuildRunRecord::duration_minutes).collect()
}

/// Aggregate a sequence of build runs.
pub fn aggregate(runs: &[BuildRunRecord]) -> BuildMetrics {
    let total_runs = runs.len();
    let successful_runs = runs.iter().filter(|r| r.is_success()).count();

    let mut failure_reason_counts = BTreeMap::new();
    for run in runs.iter().filter(|r| r.is_failure()) {
        *failure_reason_counts.entry(run.failure_key()).or_insert(0) += 1;
    }
    let failed_runs: usize = failure_reason_counts.values().sum();

    let success_rate_percent = if total_runs > 0 {
        successful_runs as f64 / total_runs as f64 * 100.0
    } else {
        0.0
    };

    let durations = successful_durations(runs);
    let (avg, min, max) = if durations.is_empty() {
        (0.0, 0.0, 0.0)
    } else {
        let sum: f64 = durations.iter().sum();
        let min = durations.iter().copied().fold(f64::INFINITY, f64::min);
        let max = durations.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (sum / durations.len() as f64, min, max)
    };

    BuildMetrics {
        total_runs,
        successful_runs,
        failed_runs,
        success_rate_percent,
        avg_duration_minutes: avg,
        min_duration_minutes: min,
        max_duration_minutes: max,
        failure_reason_counts,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    /// A run with the given conclusion lasting `minutes`.
    pub(crate) fn run(conclusion: &str, minutes: i64) -> BuildRunRecord {
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        BuildRunRecord {
            created_at: Some(created),
            updated_at: Some(created + Duration::minutes(minutes)),
            conclusion: Some(BuildConclusion::from(conclusion.to_string())),
            ..Default::default()
        }
    }

    // -- BuildConclusion --

    #[test]
    fn conclusion_parses_provider_values() {
        assert_eq!(BuildConclusion::from("success".to_string()), BuildConclusion::Success);
        assert_eq!(BuildConclusion::from("timed_out".to_string()), BuildConclusion::TimedOut);
        assert_eq!(
            BuildConclusion::from("exploded".to_string()),
            BuildConclusion::Other("exploded".to_string())
        );
        assert_eq!(BuildConclusion::Other("exploded".into()).as_str(), "exploded");
    }

    #[test]
    fn record_deserializes_with_nulls() {
        let json = serde_json::json!({
            "id": 42,
            "created_at": "2024-05-01T12:00:00Z",
            "updated_at": null,
            "conclusion": null,
            "status": "in_progress",
        });
        let record: BuildRunRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.id, Some(42));
        assert!(record.created_at.is_some());
        assert!(record.updated_at.is_none());
        assert!(record.conclusion.is_none());
    }

    // -- duration_minutes --

    #[test]
    fn duration_only_for_successful_runs() {
        assert!((run("success", 12).duration_minutes().unwrap() - 12.0).abs() < f64::EPSILON);
        assert!(run("failure", 12).duration_minutes().is_none());
    }

    #[test]
    fn duration_requires_both_timestamps() {
        let mut r = run("success", 5);
        r.updated_at = None;
        assert!(r.duration_minutes().is_none());
    }

    #[test]
    fn negative_duration_excluded() {
        assert!(run("success", -3).duration_minutes().is_none());
    }

    // -- aggregate --

    #[test]
    fn empty_runs_give_zeroed_metrics() {
        let m = aggregate(&[]);
        assert_eq!(m.total_runs, 0);
        assert_eq!(m.successful_runs, 0);
        assert_eq!(m.failed_runs, 0);
        assert!((m.success_rate_percent).abs() < f64::EPSILON);
        assert!((m.avg_duration_minutes).abs() < f64::EPSILON);
        assert!((m.min_duration_minutes).abs() < f64::EPSILON);
        assert!((m.max_duration_minutes).abs() < f64::EPSILON);
        assert!(m.failure_reason_counts.is_empty());
    }

    #[test]
    fn mixed_conclusions() {
        let runs = vec![
            run("success", 10),
            run("success", 20),
            run("failure", 5),
            run("cancelled", 1),
        ];
        let m = aggregate(&runs);
        assert_eq!(m.total_runs, 4);
        assert_eq!(m.successful_runs, 2);
        assert_eq!(m.failed_runs, 1);
        assert!(m.successful_runs + m.failed_runs <= m.total_runs);
        assert!((m.success_rate_percent - 50.0).abs() < f64::EPSILON);
        assert!((m.avg_duration_minutes - 15.0).abs() < f64::EPSILON);
        assert!((m.min_duration_minutes - 10.0).abs() < f64::EPSILON);
        assert!((m.max_duration_minutes - 20.0).abs() < f64::EPSILON);
        assert_eq!(m.failure_reason_counts.get("failure"), Some(&1));
    }

    #[test]
    fn success_without_timestamps_counts_but_has_no_duration() {
        let mut undated = run("success", 0);
        undated.created_at = None;
        let m = aggregate(&[undated, run("success", 6)]);
        assert_eq!(m.successful_runs, 2);
        assert!((m.success_rate_percent - 100.0).abs() < f64::EPSILON);
        assert!((m.avg_duration_minutes - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn only_failures_gives_zero_durations() {
        let m = aggregate(&[run("failure", 3), run("failure", 4)]);
        assert_eq!(m.failed_runs, 2);
        assert!((m.avg_duration_minutes).abs() < f64::EPSILON);
        assert!((m.max_duration_minutes).abs() < f64::EPSILON);
    }

    #[test]
    fn failure_reason_overrides_conclusion_key() {
        let mut flaky = run("failure", 3);
        flaky.failure_reason = Some("test_timeout".to_string());
        let m = aggregate(&[flaky, run("failure", 2), run("timed_out", 60)]);
        assert_eq!(m.failed_runs, 2);
        assert_eq!(m.failure_reason_counts.get("test_timeout"), Some(&1));
        assert_eq!(m.failure_reason_counts.get("failure"), Some(&1));
        assert!(!m.failure_reason_counts.contains_key("timed_out"));
    }

    #[test]
    fn in_progress_runs_count_toward_total_only() {
        let in_progress = BuildRunRecord::default();
        let m = aggregate(&[in_progress, run("success", 8)]);
        assert_eq!(m.total_runs, 2);
        assert!((m.success_rate_percent - 50.0).abs() < f64::EPSILON);
    }
}
