//! Demo infrastructure cost estimation.
//!
//! Combines instance pricing, run duration, and node count into a cost
//! breakdown. The total is always derived from the components.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::config::DemoConfig;
use crate::error::CoreError;
use crate::pricing::PricingTable;

/// Cost breakdown for a single demo run (USD).
#[derive(Debug, Clone, PartialEq)]
pub struct CostReport {
    pub gpu_instance_cost: f64,
    pub control_plane_cost: f64,
    pub monitoring_cost: f64,
    pub networking_cost: f64,
    pub storage_cost: f64,
}

impl CostReport {
    /// Sum of all five components.
    pub fn total_cost(&self) -> f64 {
        self.gpu_instance_cost
            + self.control_plane_cost
            + self.monitoring_cost
            + self.networking_cost
            + self.storage_cost
    }

    /// Monitoring, networking and storage combined.
    pub fn supporting_cost(&self) -> f64 {
        self.monitoring_cost + self.networking_cost + self.storage_cost
    }
}

impl Serialize for CostReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("CostReport", 6)?;
        s.serialize_field("gpu_instances", &self.gpu_instance_cost)?;
        s.serialize_field("control_plane", &self.control_plane_cost)?;
        s.serialize_field("monitoring_stack", &self.monitoring_cost)?;
        s.serialize_field("networking", &self.networking_cost)?;
        s.serialize_field("storage", &self.storage_cost)?;
        s.serialize_field("total", &self.total_cost())?;
        s.end()
    }
}

/// Estimate infrastructure cost for `config`.
///
/// `gpu_instance_cost = hourly_price * duration_hours * node_count`. Fails
/// with [`CoreError::UnknownInstanceType`] if the instance type is unpriced;
/// the caller decides whether that aborts the report.
pub fn estimate_cost(
    config: &DemoConfig,
    pricing: &PricingTable,
) -> Result<CostReport, CoreError> {
    config.check()?;

    let hourly = pricing.lookup(&config.instance_type)?;
    let aux = &config.auxiliary_costs;

    Ok(CostReport {
        gpu_instance_cost: hourly * config.duration_hours * f64::from(config.node_count),
        control_plane_cost: aux.control_plane_hourly * config.duration_hours,
        monitoring_cost: aux.monitoring,
        networking_cost: aux.networking,
        storage_cost: aux.storage,
    })
}
