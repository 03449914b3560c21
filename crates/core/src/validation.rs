//! Shared numeric validation helpers.
//!
//! Provides reusable range-checking functions used by the estimators.

use crate::error::CoreError;

/// Validate that a value is finite and `>= 0.0`.
///
/// Returns a `CoreError::Validation` naming the field if out of range.
pub fn validate_non_negative(value: f64, name: &str) -> Result<(), CoreError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::Validation(format!(
            "{name} must be a non-negative number, got {value}"
        )));
    }
    Ok(())
}

/// Validate that a value is finite and strictly positive.
pub fn validate_positive(value: f64, name: &str) -> Result<(), CoreError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CoreError::Validation(format!(
            "{name} must be a positive number, got {value}"
        )));
    }
    Ok(())
}

/// Validate that a fraction falls within `[0.0, 1.0]`.
pub fn validate_unit_range(value: f64, name: &str) -> Result<(), CoreError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(CoreError::Validation(format!(
            "{name} must be between 0.0 and 1.0, got {value}"
        )));
    }
    Ok(())
}

/// Validate that a percentage falls within `(0.0, 100.0]`.
pub fn validate_percentage(value: f64, name: &str) -> Result<(), CoreError> {
    if !(value > 0.0 && value <= 100.0) {
        return Err(CoreError::Validation(format!(
            "{name} must be in (0, 100], got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_negative_accepts_zero_and_positive() {
        assert!(validate_non_negative(0.0, "test").is_ok());
        assert!(validate_non_negative(12.5, "test").is_ok());
    }

    #[test]
    fn non_negative_rejects_negative_and_nan() {
        assert!(validate_non_negative(-0.01, "test").is_err());
        assert!(validate_non_negative(f64::NAN, "test").is_err());
        assert!(validate_non_negative(f64::INFINITY, "test").is_err());
    }

    #[test]
    fn positive_rejects_zero() {
        assert!(validate_positive(0.01, "test").is_ok());
        assert!(validate_positive(0.0, "test").is_err());
        assert!(validate_positive(f64::NAN, "test").is_err());
    }

    #[test]
    fn unit_range_accepts_boundary_values() {
        assert!(validate_unit_range(0.0, "test").is_ok());
        assert!(validate_unit_range(1.0, "test").is_ok());
    }

    #[test]
    fn unit_range_rejects_outside() {
        assert!(validate_unit_range(-0.01, "test").is_err());
        assert!(validate_unit_range(1.01, "test").is_err());
        assert!(validate_unit_range(f64::NAN, "test").is_err());
    }

    #[test]
    fn percentage_excludes_zero_includes_hundred() {
        assert!(validate_percentage(0.0, "test").is_err());
        assert!(validate_percentage(100.0, "test").is_ok());
        assert!(validate_percentage(100.1, "test").is_err());
        assert!(validate_percentage(f64::NAN, "test").is_err());
    }

    #[test]
    fn error_message_names_field() {
        let err = validate_non_negative(-1.0, "monthly_gpu_spend").unwrap_err();
        assert!(err.to_string().contains("monthly_gpu_spend"));
    }
}
