mod cost;
mod curve;
mod customer;
mod outcome;
mod rate;

pub use cost::{CostBenefit, CostPolicy, PolicyError};
pub use curve::{AggregateProfitCurve, ExpectedProfitCurve, ProfitPoint};
pub use customer::{Customer, CustomerId, Score};
pub use outcome::{ComparisonResult, OptimalThreshold};
pub use rate::{
    RATE_TOLERANCE, RateTable, RateTableDto, RateTableError, ThresholdRate, Thresholds,
};

/// An insertion-ordered hash map.
///
/// Cost overrides are checked against the scored population in iteration
/// order and the first offending id is reported, so the ordering must not
/// depend on the hasher's state.
pub type Map<K, V> = indexmap::IndexMap<K, V, rustc_hash::FxBuildHasher>;

/// The insertion-ordered companion to [`Map`].
pub type Set<T> = indexmap::IndexSet<T, rustc_hash::FxBuildHasher>;

/// The requested threshold is not a row of the table or curve being queried.
///
/// Lookups are exact: the threshold grid is fixed by the classifier evaluation,
/// and no value between two grid points is ever synthesised.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("threshold {0} is not present")]
pub struct ThresholdNotFound(pub f64);
