/// Errors raised by the cost, utilization, and ROI estimators.
///
/// Aggregation over an empty run set is never an error; it resolves to
/// zeroed metrics instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    #[error("No pricing known for instance type '{instance_type}'")]
    UnknownInstanceType { instance_type: String },

    #[error("Cannot compute {quantity}: {reason}")]
    Undefined {
        quantity: &'static str,
        reason: String,
    },

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl CoreError {
    /// Shorthand for a guarded, non-computable derived quantity.
    pub fn undefined(quantity: &'static str, reason: impl Into<String>) -> Self {
        Self::Undefined {
            quantity,
            reason: reason.into(),
        }
    }
}
