/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Months per year, used when annualizing monthly figures.
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Round to two decimal places for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
