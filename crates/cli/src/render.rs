//! Plain-text report summaries.

use std::fmt;

use finops_core::report::{BuildAnalyticsReport, DemoReport};
use finops_core::roi::PaybackPeriod;

const RULE_WIDTH: usize = 60;

fn rule(c: char) -> String {
    std::iter::repeat(c).take(RULE_WIDTH).collect()
}

fn payback(period: PaybackPeriod) -> String {
    match period {
        PaybackPeriod::Months(m) => format!("{m:.1} months"),
        PaybackPeriod::Never => "never (no projected savings)".to_string(),
    }
}

/// Summary of the demo cost, utilization and ROI report.
pub fn demo_summary(report: &DemoReport) -> String {
    DemoSummary(report).to_string()
}

/// Summary of the build analytics report.
pub fn builds_summary(report: &BuildAnalyticsReport, window_days: u64) -> String {
    BuildsSummary {
        report,
        window_days,
    }
    .to_string()
}

/// Displays a [`DemoReport`] as console text.
pub struct DemoSummary<'a>(pub &'a DemoReport);

impl fmt::Display for DemoSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = &self.0.demo_info;
        let costs = &self.0.infrastructure_costs;
        let perf = &self.0.performance_improvements;
        let roi = &self.0.roi_analysis;

        writeln!(f, "{}", rule('='))?;
        writeln!(f, "DEMO COST ANALYSIS SUMMARY ({})", config.cluster_name)?;
        writeln!(f, "{}", rule('='))?;

        writeln!(f, "Demo Infrastructure Costs:")?;
        writeln!(
            f,
            "   GPU Instances ({}x {}): ${:.2}",
            config.node_count, config.instance_type, costs.gpu_instance_cost
        )?;
        writeln!(f, "   Control Plane: ${:.2}", costs.control_plane_cost)?;
        writeln!(f, "   Monitoring & Other: ${:.2}", costs.supporting_cost())?;
        writeln!(f, "   Total Demo Cost: ${:.2}", costs.total_cost())?;

        writeln!(f, "\nPerformance Improvements:")?;
        writeln!(f, "   Utilization Improvement: {:.1}%", perf.improvement_percent)?;
        writeln!(f, "   Cost Efficiency Gain: {:.2}x", perf.cost_efficiency_multiplier)?;
        writeln!(f, "   Idle Time Reduction: {:.1}%", perf.idle_time_reduction_percent)?;

        writeln!(f, "\nProduction ROI Analysis:")?;
        writeln!(f, "   Monthly GPU Spend: ${:.0}", config.monthly_gpu_spend)?;
        writeln!(f, "   Projected Monthly Savings: ${:.0}", roi.monthly_savings)?;
        writeln!(f, "   Annual Savings: ${:.0}", roi.annual_savings)?;
        writeln!(f, "   Payback Period: {}", payback(roi.payback_period))?;
        writeln!(f, "   Annual ROI: {:.0}%", roi.annual_roi_percent)
    }
}

/// Displays a [`BuildAnalyticsReport`] as console text.
pub struct BuildsSummary<'a> {
    pub report: &'a BuildAnalyticsReport,
    /// Look-back window shown in the heading.
    pub window_days: u64,
}

impl fmt::Display for BuildsSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.report.metrics;
        let cache = &self.report.cache;

        writeln!(f, "{}", rule('='))?;
        writeln!(f, "CI/CD Performance Analytics")?;
        writeln!(f, "{}", rule('='))?;

        writeln!(f, "Build Metrics (Last {} days)", self.window_days)?;
        writeln!(f, "  Total Runs:        {}", m.total_runs)?;
        writeln!(f, "  Successful:        {}", m.successful_runs)?;
        writeln!(f, "  Failed:            {}", m.failed_runs)?;
        writeln!(f, "  Success Rate:      {:.2}%", m.success_rate_percent)?;

        writeln!(f, "\nDuration Metrics")?;
        writeln!(f, "  Average:           {:.2} minutes", m.avg_duration_minutes)?;
        writeln!(f, "  Minimum:           {:.2} minutes", m.min_duration_minutes)?;
        writeln!(f, "  Maximum:           {:.2} minutes", m.max_duration_minutes)?;

        if !m.failure_reason_counts.is_empty() {
            writeln!(f, "\nFailure Reasons")?;
            for (reason, count) in &m.failure_reason_counts {
                writeln!(f, "  {reason}: {count}")?;
            }
        }

        writeln!(f, "\nCache Performance ({})", cache.note)?;
        writeln!(f, "  Estimated Hit Rate: {:.2}%", cache.cache_hit_rate_percent)?;
        writeln!(
            f,
            "  Fast Builds:        {}/{}",
            cache.fast_build_count, cache.total_build_count
        )?;

        writeln!(f, "\nRecommendations")?;
        for recommendation in &self.report.recommendations {
            writeln!(f, "  - {recommendation}")?;
        }
        Ok(())
    }
}
