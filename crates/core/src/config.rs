//! Demo deployment configuration.
//!
//! A [`DemoConfig`] starts from defaults and may be overridden key-by-key from
//! a JSON object. Unknown keys are ignored; the merged result is validated
//! before any estimator sees it.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::validation::{validate_non_negative, validate_percentage, validate_positive};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_CLUSTER_NAME: &str = "agentaflow-demo";
pub const DEFAULT_REGION: &str = "us-west-2";
pub const DEFAULT_DURATION_HOURS: f64 = 8.0;
pub const DEFAULT_INSTANCE_TYPE: &str = "g4dn.xlarge";
pub const DEFAULT_NODE_COUNT: u32 = 2;
/// Typical utilization under stock Kubernetes scheduling.
pub const DEFAULT_BASELINE_UTILIZATION: f64 = 55.0;
/// Utilization with GPU-aware scheduling.
pub const DEFAULT_OPTIMIZED_UTILIZATION: f64 = 85.0;
pub const DEFAULT_MONTHLY_GPU_SPEND: f64 = 10_000.0;
/// Fleet-wide baseline assumed by the ROI projection.
pub const DEFAULT_ROI_BASELINE_UTILIZATION: f64 = 55.0;
/// Monthly cost of running the monitoring/scheduling stack itself.
pub const DEFAULT_OPERATIONAL_MONTHLY_COST: f64 = 50.0;

// ---------------------------------------------------------------------------
// AuxiliaryCosts
// ---------------------------------------------------------------------------

/// Non-GPU infrastructure costs for a demo run.
///
/// The control plane is billed per hour; the others are flat per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AuxiliaryCosts {
    #[validate(range(min = 0.0))]
    pub control_plane_hourly: f64,
    #[validate(range(min = 0.0))]
    pub monitoring: f64,
    #[validate(range(min = 0.0))]
    pub networking: f64,
    #[validate(range(min = 0.0))]
    pub storage: f64,
}

impl Default for AuxiliaryCosts {
    fn default() -> Self {
        Self {
            control_plane_hourly: 0.10,
            monitoring: 5.0,
            networking: 2.0,
            storage: 3.0,
        }
    }
}

// ---------------------------------------------------------------------------
// DemoConfig
// ---------------------------------------------------------------------------

/// Inputs for the demo cost and ROI report.
///
/// Utilizations are percentages in `(0, 100]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct DemoConfig {
    #[validate(length(min = 1))]
    pub cluster_name: String,
    pub region: String,
    #[validate(range(min = 0.0))]
    pub duration_hours: f64,
    #[validate(length(min = 1))]
    pub instance_type: String,
    #[validate(range(min = 1))]
    pub node_count: u32,
    #[validate(range(exclusive_min = 0.0, max = 100.0))]
    pub baseline_utilization: f64,
    #[validate(range(exclusive_min = 0.0, max = 100.0))]
    pub optimized_utilization: f64,
    #[validate(range(min = 0.0))]
    pub monthly_gpu_spend: f64,
    #[validate(range(exclusive_min = 0.0, max = 100.0))]
    pub roi_baseline_utilization: f64,
    /// Must be positive: the annual ROI divides by it.
    #[validate(range(exclusive_min = 0.0))]
    pub operational_monthly_cost: f64,
    #[validate(nested)]
    pub auxiliary_costs: AuxiliaryCosts,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            cluster_name: DEFAULT_CLUSTER_NAME.to_string(),
            region: DEFAULT_REGION.to_string(),
            duration_hours: DEFAULT_DURATION_HOURS,
            instance_type: DEFAULT_INSTANCE_TYPE.to_string(),
            node_count: DEFAULT_NODE_COUNT,
            baseline_utilization: DEFAULT_BASELINE_UTILIZATION,
            optimized_utilization: DEFAULT_OPTIMIZED_UTILIZATION,
            monthly_gpu_spend: DEFAULT_MONTHLY_GPU_SPEND,
            roi_baseline_utilization: DEFAULT_ROI_BASELINE_UTILIZATION,
            operational_monthly_cost: DEFAULT_OPERATIONAL_MONTHLY_COST,
            auxiliary_costs: AuxiliaryCosts::default(),
        }
    }
}

impl DemoConfig {
    /// Validate every field, including NaN checks the range derive cannot see.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(format!("Invalid demo config: {e}")))?;

        validate_non_negative(self.duration_hours, "duration_hours")?;
        validate_non_negative(self.monthly_gpu_spend, "monthly_gpu_spend")?;
        validate_positive(self.operational_monthly_cost, "operational_monthly_cost")?;
        validate_percentage(self.baseline_utilization, "baseline_utilization")?;
        validate_percentage(self.optimized_utilization, "optimized_utilization")?;
        validate_percentage(self.roi_baseline_utilization, "roi_baseline_utilization")?;

        let aux = &self.auxiliary_costs;
        validate_non_negative(aux.control_plane_hourly, "auxiliary_costs.control_plane_hourly")?;
        validate_non_negative(aux.monitoring, "auxiliary_costs.monitoring")?;
        validate_non_negative(aux.networking, "auxiliary_costs.networking")?;
        validate_non_negative(aux.storage, "auxiliary_costs.storage")?;
        Ok(())
    }

    /// Merge a JSON object of overrides over this config.
    ///
    /// Only keys that name a config field are applied. The result is validated
    /// as a whole, so a config is never returned partially invalid.
    pub fn with_overrides(&self, overrides: &serde_json::Value) -> Result<Self, CoreError> {
        let overrides = overrides.as_object().ok_or_else(|| {
            CoreError::Validation("Config overrides must be a JSON object".to_string())
        })?;

        let mut merged = serde_json::to_value(self)
            .map_err(|e| CoreError::Validation(format!("Cannot serialize demo config: {e}")))?;
        if let Some(fields) = merged.as_object_mut() {
            for (key, value) in overrides {
                if fields.contains_key(key) {
                    fields.insert(key.clone(), value.clone());
                }
            }
        }

        let config: DemoConfig = serde_json::from_value(merged)
            .map_err(|e| CoreError::Validation(format!("Invalid config override: {e}")))?;
        config.check()?;
        Ok(config)
    }
}
