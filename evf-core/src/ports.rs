use crate::models::{RateTable, RateTableError, ThresholdRate};

/// A producer of classifier rate tables.
///
/// Implementations wrap whatever evaluated the classifier on its reference
/// dataset. The table they return is validated and immutable, so downstream
/// computation never depends on the producer's lifecycle.
pub trait RateSource {
    /// Error type for failing to produce a valid table
    type Error: std::error::Error;

    /// Produce the rate table, allowing the rate sums to deviate from 1 by
    /// at most `tolerance`.
    fn rate_table(&self, tolerance: f64) -> Result<RateTable, Self::Error>;
}

// Precomputed rows are the common case: the evaluation already happened elsewhere.
impl RateSource for [ThresholdRate] {
    type Error = RateTableError;

    fn rate_table(&self, tolerance: f64) -> Result<RateTable, Self::Error> {
        RateTable::with_tolerance(self.to_vec(), tolerance)
    }
}

impl RateSource for Vec<ThresholdRate> {
    type Error = RateTableError;

    fn rate_table(&self, tolerance: f64) -> Result<RateTable, Self::Error> {
        self.as_slice().rate_table(tolerance)
    }
}
