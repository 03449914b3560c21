//! Report assembly.
//!
//! Composes the estimators into the two report documents. The generation
//! timestamp is an explicit input so the same inputs always produce the same
//! report.

use serde::{Serialize, Serializer};

use crate::build_metrics::{aggregate, successful_durations, BuildMetrics, BuildRunRecord};
use crate::cache_efficiency::{estimate_cache_efficiency, CacheEfficiencyEstimate};
use crate::config::DemoConfig;
use crate::cost::{estimate_cost, CostReport};
use crate::error::CoreError;
use crate::pricing::PricingTable;
use crate::recommendation::{recommend, Recommendation, RecommendationThresholds};
use crate::roi::{roi, RoiReport};
use crate::types::Timestamp;
use crate::utilization::{improvement, UtilizationImprovement, UtilizationSample};

// ---------------------------------------------------------------------------
// Demo cost report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    pub demo_info: DemoConfig,
    pub generated_at: Timestamp,
    pub infrastructure_costs: CostReport,
    pub performance_improvements: UtilizationImprovement,
    pub roi_analysis: RoiReport,
}

/// Build the full cost, utilization and ROI report for `config`.
///
/// The ROI projection uses `config.roi_baseline_utilization` as the fleet
/// baseline, which is independent of the demo's own `baseline_utilization`.
pub fn generate_demo_report(
    config: &DemoConfig,
    pricing: &PricingTable,
    generated_at: Timestamp,
) -> Result<DemoReport, CoreError> {
    let infrastructure_costs = estimate_cost(config, pricing)?;

    let sample = UtilizationSample::from_percentages(
        config.baseline_utilization,
        config.optimized_utilization,
    );
    let performance_improvements = improvement(&sample)?;

    let roi_analysis = roi(
        config.monthly_gpu_spend,
        performance_improvements.improvement_percent,
        config.roi_baseline_utilization / 100.0,
        config.operational_monthly_cost,
    )?;

    Ok(DemoReport {
        demo_info: config.clone(),
        generated_at,
        infrastructure_costs,
        performance_improvements,
        roi_analysis,
    })
}

// ---------------------------------------------------------------------------
// Build analytics report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct BuildAnalyticsReport {
    pub metrics: BuildMetrics,
    pub cache: CacheEfficiencyEstimate,
    /// Serialized as the advisory texts, in rule order.
    #[serde(serialize_with = "serialize_messages")]
    pub recommendations: Vec<Recommendation>,
    pub generated_at: Timestamp,
}

impl BuildAnalyticsReport {
    /// Recommendation texts in rule order.
    pub fn recommendation_messages(&self) -> Vec<String> {
        self.recommendations.iter().map(ToString::to_string).collect()
    }
}

fn serialize_messages<S>(
    recommendations: &[Recommendation],
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(recommendations.iter().map(ToString::to_string))
}

/// Aggregate build runs, estimate cache efficiency and derive recommendations.
pub fn analyze_builds(
    runs: &[BuildRunRecord],
    thresholds: &RecommendationThresholds,
    generated_at: Timestamp,
) -> BuildAnalyticsReport {
    let metrics = aggregate(runs);
    let cache = estimate_cache_efficiency(&successful_durations(runs));
    let recommendations = recommend(&metrics, &cache, thresholds);

    BuildAnalyticsReport {
        metrics,
        cache,
        recommendations,
        generated_at,
    }
}
