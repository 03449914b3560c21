//! Build-cache efficiency estimate.
//!
//! This is a heuristic, not a measured hit rate: a successful build that runs
//! noticeably faster than the mean is assumed to have hit the cache. Consumers
//! must present the figure as an estimate.

use serde::Serialize;

/// A build is "fast" when it takes less than this fraction of the mean.
pub const FAST_BUILD_RATIO: f64 = 0.8;

pub const NOTE_ESTIMATED: &str = "Estimated based on build duration variance";
pub const NOTE_NO_DATA: &str = "No data available";

/// Estimated cache hit rate over successful build durations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheEfficiencyEstimate {
    #[serde(rename = "cache_hit_rate_estimate_percent")]
    pub cache_hit_rate_percent: f64,
    pub fast_build_count: usize,
    pub total_build_count: usize,
    pub note: &'static str,
}

impl CacheEfficiencyEstimate {
    /// Result for an empty duration sample.
    pub fn no_data() -> Self {
        Self {
            cache_hit_rate_percent: 0.0,
            fast_build_count: 0,
            total_build_count: 0,
            note: NOTE_NO_DATA,
        }
    }

    pub fn has_data(&self) -> bool {
        self.total_build_count > 0
    }
}

/// Estimate cache efficiency from successful build durations (minutes).
pub fn estimate_cache_efficiency(durations: &[f64]) -> CacheEfficiencyEstimate {
    if durations.is_empty() {
        return CacheEfficiencyEstimate::no_data();
    }

    let total = durations.len();
    let mean = durations.iter().sum::<f64>() / total as f64;
    let cutoff = mean * FAST_BUILD_RATIO;
    let fast = durations.iter().filter(|&&d| d < cutoff).count();

    CacheEfficiencyEstimate {
        cache_hit_rate_percent: fast as f64 / total as f64 * 100.0,
        fast_build_count: fast,
        total_build_count: total,
        note: NOTE_ESTIMATED,
    }
}
