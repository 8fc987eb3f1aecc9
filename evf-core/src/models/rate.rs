use crate::models::ThresholdNotFound;
use std::cmp::Ordering;

/// The default allowance for `tpr + fnr` and `fpr + tnr` to differ from 1.
pub const RATE_TOLERANCE: f64 = 1e-6;

/// The confusion-matrix rates of a classifier at a single threshold.
///
/// Each rate is a fraction of the actual positives (`tpr`, `fnr`) or actual
/// negatives (`fpr`, `tnr`) of the reference dataset, so that `tpr + fnr` and
/// `fpr + tnr` are both 1.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema), schemars(inline))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThresholdRate {
    /// The minimum probability at which a customer is classified positive
    pub threshold: f64,
    /// True positive rate
    pub tpr: f64,
    /// False positive rate
    pub fpr: f64,
    /// False negative rate
    pub fnr: f64,
    /// True negative rate
    pub tnr: f64,
}

impl ThresholdRate {
    fn has_nan(&self) -> bool {
        self.threshold.is_nan()
            || self.tpr.is_nan()
            || self.fpr.is_nan()
            || self.fnr.is_nan()
            || self.tnr.is_nan()
    }

    fn rates_in_unit_interval(&self) -> bool {
        [self.tpr, self.fpr, self.fnr, self.tnr]
            .into_iter()
            .all(|rate| (0.0..=1.0).contains(&rate))
    }
}

/// The classifier's rates over its full threshold grid.
///
/// Rows are held in strictly ascending threshold order. A table is produced
/// once per trained model and evaluation set and never changes afterwards;
/// every consumer reads it through a shared reference.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RateTableDto", into = "RateTableDto")
)]
pub struct RateTable(Vec<ThresholdRate>);

impl RateTable {
    /// Validates `rows` with the default [`RATE_TOLERANCE`]
    pub fn new(rows: Vec<ThresholdRate>) -> Result<Self, RateTableError> {
        Self::with_tolerance(rows, RATE_TOLERANCE)
    }

    /// Validates `rows`, allowing the rate sums to drift from 1 by at most `tolerance`
    ///
    /// # Validation
    ///
    /// Every row is checked, in order, for:
    /// 1. NaN in any field
    /// 2. a threshold outside [0, 1]
    /// 3. a rate outside [0, 1]
    /// 4. a threshold that does not strictly exceed its predecessor
    /// 5. `tpr + fnr` or `fpr + tnr` further than `tolerance` from 1
    ///
    /// The first violation is reported; nothing is repaired.
    pub fn with_tolerance(
        rows: Vec<ThresholdRate>,
        tolerance: f64,
    ) -> Result<Self, RateTableError> {
        if !(tolerance.is_finite() && tolerance >= 0.0) {
            return Err(RateTableError::Tolerance(tolerance));
        }
        if rows.is_empty() {
            return Err(RateTableError::Empty);
        }

        let mut prev = f64::NEG_INFINITY;
        for (row, rate) in rows.iter().enumerate() {
            if rate.has_nan() {
                return Err(RateTableError::NaN { row });
            }
            if !(0.0..=1.0).contains(&rate.threshold) {
                return Err(RateTableError::ThresholdOutOfRange {
                    row,
                    threshold: rate.threshold,
                });
            }
            if !rate.rates_in_unit_interval() {
                return Err(RateTableError::RateOutOfRange { row });
            }
            if rate.threshold <= prev {
                return Err(RateTableError::NonMonotone {
                    row,
                    threshold: rate.threshold,
                });
            }

            let positives = rate.tpr + rate.fnr;
            if (positives - 1.0).abs() > tolerance {
                return Err(RateTableError::TprFnrSum {
                    row,
                    sum: positives,
                });
            }
            let negatives = rate.fpr + rate.tnr;
            if (negatives - 1.0).abs() > tolerance {
                return Err(RateTableError::FprTnrSum {
                    row,
                    sum: negatives,
                });
            }

            prev = rate.threshold;
        }

        Ok(Self(rows))
    }

    /// The number of thresholds in the grid
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a validated table; provided for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The rows in ascending threshold order
    pub fn rows(&self) -> &[ThresholdRate] {
        &self.0
    }

    /// Iterate the rows in ascending threshold order
    pub fn iter(&self) -> std::slice::Iter<'_, ThresholdRate> {
        self.0.iter()
    }

    /// Exact lookup of the rates at `threshold`
    ///
    /// There is no interpolation: a threshold that is not a row of the grid
    /// yields [`ThresholdNotFound`], as does NaN.
    pub fn rates_at(&self, threshold: f64) -> Result<&ThresholdRate, ThresholdNotFound> {
        if threshold.is_nan() {
            return Err(ThresholdNotFound(threshold));
        }
        self.0
            .binary_search_by(|row| {
                row.threshold
                    .partial_cmp(&threshold)
                    .unwrap_or(Ordering::Less)
            })
            .map(|idx| &self.0[idx])
            .map_err(|_| ThresholdNotFound(threshold))
    }

    /// All thresholds in ascending order
    ///
    /// The sequence is lazy; it is restartable by cloning it or by calling
    /// this method again.
    pub fn all_thresholds(&self) -> Thresholds<'_> {
        Thresholds(self.0.iter())
    }

    /// Consumes the table, returning its rows
    pub fn into_rows(self) -> Vec<ThresholdRate> {
        self.0
    }
}

impl<'a> IntoIterator for &'a RateTable {
    type Item = &'a ThresholdRate;
    type IntoIter = std::slice::Iter<'a, ThresholdRate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A lazy, cloneable iterator over the thresholds of a [`RateTable`]
#[derive(Clone, Debug)]
pub struct Thresholds<'a>(std::slice::Iter<'a, ThresholdRate>);

impl Iterator for Thresholds<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        self.0.next().map(|row| row.threshold)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl DoubleEndedIterator for Thresholds<'_> {
    fn next_back(&mut self) -> Option<f64> {
        self.0.next_back().map(|row| row.threshold)
    }
}

impl ExactSizeIterator for Thresholds<'_> {}

/// DTO to ensure that we always validate when we deserialize from an untrusted source
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Debug)]
pub struct RateTableDto(pub Vec<ThresholdRate>);

impl From<RateTable> for RateTableDto {
    fn from(value: RateTable) -> Self {
        Self(value.0)
    }
}

impl TryFrom<RateTableDto> for RateTable {
    type Error = RateTableError;

    fn try_from(value: RateTableDto) -> Result<Self, Self::Error> {
        Self::new(value.0)
    }
}

/// The ways a rate table can violate its structural contract
///
/// Each of these indicates a defect upstream of this crate, in the evaluation
/// that produced the rates.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum RateTableError {
    /// The table has no rows
    #[error("rate table is empty")]
    Empty,
    /// A field of some row is NaN
    #[error("row {row}: NaN value encountered")]
    NaN {
        /// the offending row index
        row: usize,
    },
    /// A threshold lies outside [0, 1]
    #[error("row {row}: threshold {threshold} lies outside [0, 1]")]
    ThresholdOutOfRange {
        /// the offending row index
        row: usize,
        /// the offending threshold
        threshold: f64,
    },
    /// One of the four rates lies outside [0, 1]
    #[error("row {row}: rates must lie within [0, 1]")]
    RateOutOfRange {
        /// the offending row index
        row: usize,
    },
    /// Thresholds are not strictly ascending (this includes duplicates)
    #[error("row {row}: threshold {threshold} does not exceed the previous threshold")]
    NonMonotone {
        /// the offending row index
        row: usize,
        /// the offending threshold
        threshold: f64,
    },
    /// `tpr + fnr` is not 1
    #[error("row {row}: tpr + fnr = {sum}, expected 1")]
    TprFnrSum {
        /// the offending row index
        row: usize,
        /// the observed sum
        sum: f64,
    },
    /// `fpr + tnr` is not 1
    #[error("row {row}: fpr + tnr = {sum}, expected 1")]
    FprTnrSum {
        /// the offending row index
        row: usize,
        /// the observed sum
        sum: f64,
    },
    /// The tolerance itself is negative, infinite or NaN
    #[error("tolerance {0} must be finite and non-negative")]
    Tolerance(f64),
}
