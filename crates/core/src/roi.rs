//! Return-on-investment projection for fleet-wide utilization gains.
//!
//! Projects monthly and annual savings from a utilization improvement applied
//! to a monthly GPU bill, and the payback period against a fixed operational
//! cost.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::MONTHS_PER_YEAR;
use crate::validation::{validate_non_negative, validate_unit_range};

// ---------------------------------------------------------------------------
// PaybackPeriod
// ---------------------------------------------------------------------------

/// Months until savings cover the operational cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaybackPeriod {
    Months(f64),
    /// No positive savings: the cost is never paid back.
    Never,
}

impl PaybackPeriod {
    /// Payback in months, `f64::INFINITY` for [`PaybackPeriod::Never`].
    pub fn as_months(self) -> f64 {
        match self {
            Self::Months(m) => m,
            Self::Never => f64::INFINITY,
        }
    }

    pub fn is_never(self) -> bool {
        matches!(self, Self::Never)
    }
}

// ---------------------------------------------------------------------------
// RoiReport
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoiReport {
    pub current_utilization_percent: f64,
    pub improved_utilization_percent: f64,
    pub cost_reduction_percent: f64,
    pub monthly_savings: f64,
    pub annual_savings: f64,
    pub operational_monthly_cost: f64,
    pub net_monthly_savings: f64,
    pub payback_period: PaybackPeriod,
    pub annual_roi_percent: f64,
}

/// Project savings and payback.
///
/// * `monthly_gpu_spend` - current monthly GPU bill.
/// * `improvement_percent` - relative utilization gain, e.g. `54.5`.
/// * `baseline_efficiency` - fleet baseline utilization as a fraction.
/// * `operational_monthly_cost` - monthly cost of the optimization stack.
///
/// When monthly savings are not positive the payback is
/// [`PaybackPeriod::Never`] and the annual ROI is 0.
pub fn roi(
    monthly_gpu_spend: f64,
    improvement_percent: f64,
    baseline_efficiency: f64,
    operational_monthly_cost: f64,
) -> Result<RoiReport, CoreError> {
    validate_non_negative(monthly_gpu_spend, "monthly_gpu_spend")?;
    validate_non_negative(operational_monthly_cost, "operational_monthly_cost")?;
    validate_unit_range(baseline_efficiency, "baseline_efficiency")?;
    if !improvement_percent.is_finite() {
        return Err(CoreError::Validation(format!(
            "improvement_percent must be finite, got {improvement_percent}"
        )));
    }
    if baseline_efficiency == 0.0 {
        return Err(CoreError::undefined(
            "cost_reduction_percent",
            "baseline efficiency is zero",
        ));
    }

    let improved_efficiency = baseline_efficiency * (1.0 + improvement_percent / 100.0);
    let cost_reduction_percent =
        (improved_efficiency - baseline_efficiency) / baseline_efficiency * 100.0;
    let monthly_savings = monthly_gpu_spend * cost_reduction_percent / 100.0;
    let annual_savings = monthly_savings * MONTHS_PER_YEAR;

    let (payback_period, annual_roi_percent) = if monthly_savings > 0.0 {
        if operational_monthly_cost == 0.0 {
            return Err(CoreError::undefined(
                "annual_roi_percent",
                "operational monthly cost is zero",
            ));
        }
        (
            PaybackPeriod::Months(operational_monthly_cost / monthly_savings),
            annual_savings / (operational_monthly_cost * MONTHS_PER_YEAR) * 100.0,
        )
    } else {
        (PaybackPeriod::Never, 0.0)
    };

    Ok(RoiReport {
        current_utilization_percent: baseline_efficiency * 100.0,
        improved_utilization_percent: improved_efficiency * 100.0,
        cost_reduction_percent,
        monthly_savings,
        annual_savings,
        operational_monthly_cost,
        net_monthly_savings: monthly_savings - operational_monthly_cost,
        payback_period,
        annual_roi_percent,
    })
}
