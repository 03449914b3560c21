//! GPU utilization improvement model.
//!
//! Converts a baseline/optimized utilization pair into improvement ratios.
//! Utilizations are fractions of GPU time spent on useful work.

use serde::Serialize;

use crate::error::CoreError;
use crate::validation::validate_unit_range;

/// A baseline/optimized utilization pair, both as fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UtilizationSample {
    pub baseline: f64,
    pub optimized: f64,
}

impl UtilizationSample {
    pub fn new(baseline: f64, optimized: f64) -> Self {
        Self {
            baseline,
            optimized,
        }
    }

    /// Build a sample from percentages (`55.0` -> `0.55`).
    pub fn from_percentages(baseline_percent: f64, optimized_percent: f64) -> Self {
        Self::new(baseline_percent / 100.0, optimized_percent / 100.0)
    }
}

/// Derived improvement ratios for a [`UtilizationSample`].
///
/// `cost_efficiency_multiplier` and `effective_cost_per_work_unit` are
/// reciprocal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UtilizationImprovement {
    #[serde(rename = "utilization_improvement_percent")]
    pub improvement_percent: f64,
    pub cost_efficiency_multiplier: f64,
    pub idle_time_reduction_percent: f64,
    pub effective_cost_per_work_unit: f64,
}

/// Compute improvement ratios from a utilization sample.
///
/// Fails with [`CoreError::Undefined`] when the baseline is 0 (every ratio
/// divides by it) or 1 (a fully busy baseline has no idle time to reduce).
pub fn improvement(sample: &UtilizationSample) -> Result<UtilizationImprovement, CoreError> {
    validate_unit_range(sample.baseline, "baseline utilization")?;
    validate_unit_range(sample.optimized, "optimized utilization")?;

    if sample.baseline == 0.0 {
        return Err(CoreError::undefined(
            "improvement_percent",
            "baseline utilization is zero",
        ));
    }
    if sample.optimized == 0.0 {
        return Err(CoreError::undefined(
            "effective_cost_per_work_unit",
            "optimized utilization is zero",
        ));
    }
    if sample.baseline == 1.0 {
        return Err(CoreError::undefined(
            "idle_time_reduction_percent",
            "baseline utilization is 100%, so there is no idle time",
        ));
    }

    let multiplier = sample.optimized / sample.baseline;
    let idle_before = 1.0 - sample.baseline;
    let idle_after = 1.0 - sample.optimized;

    Ok(UtilizationImprovement {
        improvement_percent: (sample.optimized - sample.baseline) / sample.baseline * 100.0,
        cost_efficiency_multiplier: multiplier,
        idle_time_reduction_percent: (1.0 - idle_after / idle_before) * 100.0,
        effective_cost_per_work_unit: 1.0 / multiplier,
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn demo_defaults() {
        let result = improvement(&UtilizationSample::new(0.55, 0.85)).unwrap();
        assert!((result.improvement_percent - 54.545454).abs() < 1e-4);
        assert!((result.cost_efficiency_multiplier - 1.545454).abs() < 1e-4);
        // Idle time 45% -> 15%: two thirds removed.
        assert!((result.idle_time_reduction_percent - 66.666666).abs() < 1e-4);
    }

    #[test]
    fn multiplier_and_unit_cost_are_reciprocal() {
        let pairs = [(0.1, 0.9), (0.55, 0.85), (0.7, 0.3), (0.99, 0.01), (0.5, 0.5)];
        for (baseline, optimized) in pairs {
            let r = improvement(&UtilizationSample::new(baseline, optimized)).unwrap();
            assert!(
                (r.cost_efficiency_multiplier * r.effective_cost_per_work_unit - 1.0).abs() < 1e-9,
                "reciprocal failed for ({baseline}, {optimized})"
            );
        }
    }

    #[test]
    fn regression_is_negative_improvement() {
        let r = improvement(&UtilizationSample::new(0.8, 0.4)).unwrap();
        assert!((r.improvement_percent - -50.0).abs() < 1e-9);
        assert!(r.idle_time_reduction_percent < 0.0);
    }

    #[test]
    fn from_percentages_scales() {
        let s = UtilizationSample::from_percentages(55.0, 85.0);
        assert!((s.baseline - 0.55).abs() < f64::EPSILON);
        assert!((s.optimized - 0.85).abs() < f64::EPSILON);
    }

    #[test]
    fn fully_optimized_removes_all_idle_time() {
        let r = improvement(&UtilizationSample::new(0.5, 1.0)).unwrap();
        assert!((r.idle_time_reduction_percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn zero_baseline_is_undefined() {
        assert_matches!(
            improvement(&UtilizationSample::new(0.0, 0.5)),
            Err(CoreError::Undefined { quantity: "improvement_percent", .. })
        );
    }

    #[test]
    fn full_baseline_idle_time_is_undefined() {
        assert_matches!(
            improvement(&UtilizationSample::new(1.0, 0.9)),
            Err(CoreError::Undefined { quantity: "idle_time_reduction_percent", .. })
        );
    }

    #[test]
    fn zero_optimized_is_undefined() {
        assert_matches!(
            improvement(&UtilizationSample::new(0.5, 0.0)),
            Err(CoreError::Undefined { quantity: "effective_cost_per_work_unit", .. })
        );
    }

    #[test]
    fn out_of_range_rejected() {
        assert_matches!(
            improvement(&UtilizationSample::new(55.0, 85.0)),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            improvement(&UtilizationSample::new(f64::NAN, 0.5)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn error_names_quantity() {
        let err = improvement(&UtilizationSample::new(0.0, 0.5)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot compute improvement_percent: baseline utilization is zero"
        );
    }
}
