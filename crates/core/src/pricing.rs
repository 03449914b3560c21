//! GPU instance pricing catalogue.
//!
//! A static mapping from instance type to on-demand hourly cost (USD). A miss
//! is reported as [`CoreError::UnknownInstanceType`], never as a zero price.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::validation::validate_non_negative;

// ---------------------------------------------------------------------------
// Default catalogue
// ---------------------------------------------------------------------------

/// Approximate on-demand EC2 prices (USD/hour). Varies by region.
pub const DEFAULT_PRICES: &[(&str, f64)] = &[
    ("g4dn.xlarge", 0.526),   // 1x T4
    ("g4dn.2xlarge", 0.752),  // 1x T4, more CPU/RAM
    ("g4dn.4xlarge", 1.204),  // 1x T4
    ("g5.xlarge", 1.006),     // 1x A10G
    ("g5.2xlarge", 1.212),    // 1x A10G
    ("p3.2xlarge", 3.06),     // 1x V100
    ("p4d.24xlarge", 32.77),  // 8x A100
];

// ---------------------------------------------------------------------------
// PricingTable
// ---------------------------------------------------------------------------

/// Instance type -> hourly unit cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PricingTable {
    prices: BTreeMap<String, f64>,
}

impl Default for PricingTable {
    fn default() -> Self {
        Self {
            prices: DEFAULT_PRICES
                .iter()
                .map(|(name, price)| (name.to_string(), *price))
                .collect(),
        }
    }
}

impl PricingTable {
    /// Build a table from explicit entries, rejecting negative or non-finite prices.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut prices = BTreeMap::new();
        for (name, price) in entries {
            let name = name.into();
            validate_non_negative(price, &format!("price for '{name}'"))?;
            prices.insert(name, price);
        }
        Ok(Self { prices })
    }

    /// Parse a JSON object of `{"instance_type": hourly_cost}` pairs.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, CoreError> {
        let map: BTreeMap<String, f64> = serde_json::from_value(value.clone())
            .map_err(|e| CoreError::Validation(format!("Invalid pricing table: {e}")))?;
        Self::from_entries(map)
    }

    /// Hourly unit cost for `instance_type`.
    pub fn lookup(&self, instance_type: &str) -> Result<f64, CoreError> {
        self.prices
            .get(instance_type)
            .copied()
            .ok_or_else(|| CoreError::UnknownInstanceType {
                instance_type: instance_type.to_string(),
            })
    }

    /// Number of priced instance types.
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Iterate over `(instance_type, hourly_cost)` in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.prices.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

// ---------------------------------------------------------------------------
// Batch pricing
// ---------------------------------------------------------------------------

/// Cost of running each candidate instance type for `hours`.
///
/// Every input type gets its own entry so that one unknown type does not hide
/// the prices of the others.
pub fn price_instances(
    pricing: &PricingTable,
    instance_types: &[&str],
    hours: f64,
) -> BTreeMap<String, Result<f64, CoreError>> {
    instance_types
        .iter()
        .map(|ty| {
            let cost = pricing.lookup(ty).map(|hourly| hourly * hours);
            (ty.to_string(), cost)
        })
        .collect()
}
