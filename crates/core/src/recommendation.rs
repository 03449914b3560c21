//! Threshold rules that turn build metrics into advisory text.
//!
//! Rules are evaluated independently and fire in declaration order. When none
//! fires, a single all-clear recommendation is returned.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::build_metrics::BuildMetrics;
use crate::cache_efficiency::CacheEfficiencyEstimate;
use crate::types::round2;

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

pub const DEFAULT_MIN_SUCCESS_RATE_PERCENT: f64 = 90.0;
pub const DEFAULT_MAX_AVG_DURATION_MINUTES: f64 = 15.0;
pub const DEFAULT_MIN_CACHE_HIT_RATE_PERCENT: f64 = 80.0;

/// Limits applied by [`recommend`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationThresholds {
    pub min_success_rate_percent: f64,
    pub max_avg_duration_minutes: f64,
    pub min_cache_hit_rate_percent: f64,
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        Self {
            min_success_rate_percent: DEFAULT_MIN_SUCCESS_RATE_PERCENT,
            max_avg_duration_minutes: DEFAULT_MAX_AVG_DURATION_MINUTES,
            min_cache_hit_rate_percent: DEFAULT_MIN_CACHE_HIT_RATE_PERCENT,
        }
    }
}

// ---------------------------------------------------------------------------
// Recommendation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recommendation {
    InvestigateFailures { success_rate_percent: f64 },
    OptimizeBuildTime { avg_duration_minutes: f64 },
    ReviewCachingStrategy { cache_hit_rate_estimate_percent: f64 },
    AllClear,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvestigateFailures {
                success_rate_percent,
            } => write!(
                f,
                "Success rate is {}% - investigate common failure patterns",
                round2(*success_rate_percent)
            ),
            Self::OptimizeBuildTime {
                avg_duration_minutes,
            } => write!(
                f,
                "Average build time is {} minutes - consider optimization",
                round2(*avg_duration_minutes)
            ),
            Self::ReviewCachingStrategy {
                cache_hit_rate_estimate_percent,
            } => write!(
                f,
                "Low cache hit rate detected (estimated {}%) - review caching strategy",
                round2(*cache_hit_rate_estimate_percent)
            ),
            Self::AllClear => f.write_str("All metrics within acceptable ranges"),
        }
    }
}

/// Apply the threshold rules to aggregated metrics.
pub fn recommend(
    metrics: &BuildMetrics,
    cache: &CacheEfficiencyEstimate,
    thresholds: &RecommendationThresholds,
) -> Vec<Recommendation> {
    let mut out = Vec::new();

    if metrics.success_rate_percent < thresholds.min_success_rate_percent {
        out.push(Recommendation::InvestigateFailures {
            success_rate_percent: metrics.success_rate_percent,
        });
    }
    if metrics.avg_duration_minutes > thresholds.max_avg_duration_minutes {
        out.push(Recommendation::OptimizeBuildTime {
            avg_duration_minutes: metrics.avg_duration_minutes,
        });
    }
    if cache.cache_hit_rate_percent < thresholds.min_cache_hit_rate_percent {
        out.push(Recommendation::ReviewCachingStrategy {
            cache_hit_rate_estimate_percent: cache.cache_hit_rate_percent,
        });
    }

    if out.is_empty() {
        out.push(Recommendation::AllClear);
    }
    out
}
