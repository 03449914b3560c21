//! Report commands: load inputs, run the engine, persist the JSON report.

use std::path::Path;

use anyhow::Context;
use finops_ci::{RunQuery, RunSource};
use finops_core::config::DemoConfig;
use finops_core::pricing::PricingTable;
use finops_core::recommendation::RecommendationThresholds;
use finops_core::report::{analyze_builds, generate_demo_report, BuildAnalyticsReport, DemoReport};
use finops_core::types::Timestamp;
use serde::Serialize;

use crate::settings::Settings;

/// Resolve the demo config: defaults, the configured monthly spend, then any
/// overrides file. A missing overrides file is a warning, not an error.
pub fn load_demo_config(settings: &Settings) -> anyhow::Result<DemoConfig> {
    let base = DemoConfig {
        monthly_gpu_spend: settings.monthly_gpu_spend,
        ..DemoConfig::default()
    };

    let Some(path) = &settings.demo_config_path else {
        base.check()?;
        return Ok(base);
    };

    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "Config file not found, using defaults");
            base.check()?;
            return Ok(base);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("reading config file {}", path.display()))
        }
    };

    let overrides: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("parsing config file {}", path.display()))?;
    let config = base.with_overrides(&overrides)?;
    tracing::info!(path = %path.display(), "Applied demo config overrides");
    Ok(config)
}

/// Load the pricing catalogue, falling back to the built-in table.
pub fn load_pricing(settings: &Settings) -> anyhow::Result<PricingTable> {
    let Some(path) = &settings.pricing_path else {
        return Ok(PricingTable::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading pricing file {}", path.display()))?;
    let json: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("parsing pricing file {}", path.display()))?;
    let table = PricingTable::from_json(&json)?;
    tracing::info!(path = %path.display(), entries = table.len(), "Loaded pricing table");
    Ok(table)
}

/// Write `value` as pretty-printed JSON.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let body = serde_json::to_string_pretty(value).context("serializing report")?;
    std::fs::write(path, body).with_context(|| format!("writing report {}", path.display()))?;
    tracing::info!(path = %path.display(), "Report written");
    Ok(())
}

/// Produce the demo cost, utilization and ROI report.
pub fn cost_report(settings: &Settings, generated_at: Timestamp) -> anyhow::Result<DemoReport> {
    let config = load_demo_config(settings)?;
    let pricing = load_pricing(settings)?;

    tracing::info!(
        instance_type = %config.instance_type,
        node_count = config.node_count,
        duration_hours = config.duration_hours,
        "Generating demo cost analysis",
    );

    generate_demo_report(&config, &pricing, generated_at).context("computing demo cost report")
}

/// Fetch build runs and produce the build analytics report.
pub async fn build_report(
    settings: &Settings,
    source: &dyn RunSource,
    generated_at: Timestamp,
) -> anyhow::Result<BuildAnalyticsReport> {
    let query = RunQuery::last_days(
        settings.workflow.clone(),
        settings.window_days,
        generated_at.date_naive(),
    );
    let runs = source
        .fetch_runs(&query)
        .await
        .with_context(|| format!("fetching runs for workflow {}", query.workflow))?;

    tracing::info!(
        workflow = %query.workflow,
        since = %query.since,
        run_count = runs.len(),
        "Analyzing build performance",
    );

    Ok(analyze_builds(
        &runs,
        &RecommendationThresholds::default(),
        generated_at,
    ))
}
