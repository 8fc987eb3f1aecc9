use crate::{EngineError, ExpectedProfitEngine};
use evf_core::models::{
    AggregateProfitCurve, ComparisonResult, Customer, CustomerId, OptimalThreshold, ProfitPoint,
    RateTable, ThresholdNotFound,
};
use tracing::{Level, event};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The default number of customers summed per reduction chunk
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// How the per-customer work is scheduled
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Execution {
    /// Evaluate every chunk on the calling thread
    #[default]
    Sequential,
    /// Evaluate chunks on the rayon thread pool
    #[cfg(feature = "parallel")]
    Parallel,
}

/// Configuration for the [`PortfolioOptimizer`]
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct OptimizerSettings {
    /// Customers per reduction chunk; values below 1 are treated as 1
    pub chunk_size: usize,
    /// Sequential or parallel evaluation of the chunks
    pub execution: Execution,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            execution: Execution::default(),
        }
    }
}

/// Aggregates expected profit over a customer population and selects thresholds.
///
/// Aggregation is deterministic to the bit. The population is first put in
/// ascending id order, so any permutation of the same customers sums in the
/// same order. Customers are then summed in fixed-size chunks, and the chunk
/// totals are added together in chunk order. The execution mode only decides
/// where the chunks are evaluated, never the order in which they are added.
#[derive(Clone, Debug, Default)]
pub struct PortfolioOptimizer {
    engine: ExpectedProfitEngine,
    settings: OptimizerSettings,
}

impl PortfolioOptimizer {
    /// Create a new instance with the provided settings
    pub fn new(settings: OptimizerSettings) -> Self {
        Self {
            engine: ExpectedProfitEngine,
            settings,
        }
    }

    /// The settings in effect
    pub fn settings(&self) -> &OptimizerSettings {
        &self.settings
    }

    /// Sum every customer's expected-profit curve, threshold by threshold.
    ///
    /// The result has exactly one point per row of `rates`, in the same order.
    /// The population must be non-empty and its ids distinct; every customer
    /// must pass [`ExpectedProfitEngine::validate`]. Any failure aborts the
    /// whole aggregation.
    pub fn aggregate(
        &self,
        customers: &[Customer],
        rates: &RateTable,
    ) -> Result<AggregateProfitCurve, AggregateError> {
        if customers.is_empty() {
            return Err(AggregateError::EmptyPopulation);
        }

        let mut ordered = customers.iter().collect::<Vec<_>>();
        ordered.sort_unstable_by(|a, b| a.id.cmp(&b.id));

        if let Some(pair) = ordered.windows(2).find(|pair| pair[0].id == pair[1].id) {
            event!(Level::WARN, id = %pair[0].id, "duplicate customer in population");
            return Err(AggregateError::DuplicateCustomer(pair[0].id.clone()));
        }

        for customer in ordered.iter() {
            self.engine.validate(customer).inspect_err(|error| {
                event!(Level::WARN, %error, "customer rejected");
            })?;
        }

        let chunk_size = self.settings.chunk_size.max(1);
        let partials: Vec<Vec<f64>> = match self.settings.execution {
            Execution::Sequential => ordered
                .chunks(chunk_size)
                .map(|chunk| self.chunk_totals(chunk, rates))
                .collect(),
            #[cfg(feature = "parallel")]
            Execution::Parallel => ordered
                .par_chunks(chunk_size)
                .map(|chunk| self.chunk_totals(chunk, rates))
                .collect(),
        };

        let mut totals = vec![0.0; rates.len()];
        for partial in partials {
            for (total, value) in totals.iter_mut().zip(partial) {
                *total += value;
            }
        }

        event!(
            Level::DEBUG,
            population = customers.len(),
            thresholds = rates.len(),
            chunk_size,
            execution = ?self.settings.execution,
            "aggregated expected profit"
        );

        Ok(AggregateProfitCurve::new(
            customers.len(),
            rates
                .all_thresholds()
                .zip(totals)
                .map(|(threshold, profit)| ProfitPoint { threshold, profit })
                .collect(),
        ))
    }

    // Sequentially sums the already-validated customers of one chunk.
    fn chunk_totals(&self, chunk: &[&Customer], rates: &RateTable) -> Vec<f64> {
        let mut totals = vec![0.0; rates.len()];
        for customer in chunk {
            for (total, profit) in totals.iter_mut().zip(self.engine.profits(customer, rates)) {
                *total += profit;
            }
        }
        totals
    }

    /// The threshold(s) with maximum total expected profit.
    ///
    /// Exact ties are all reported, in ascending threshold order. NaN totals
    /// never qualify as a maximum.
    pub fn find_optimum(
        &self,
        curve: &AggregateProfitCurve,
    ) -> Result<OptimalThreshold, OptimumError> {
        if curve.is_empty() {
            return Err(OptimumError::EmptyCurve);
        }

        let profit = curve
            .points()
            .iter()
            .map(|point| point.profit)
            .filter(|profit| !profit.is_nan())
            .reduce(f64::max)
            .ok_or(OptimumError::Undefined)?;

        let thresholds = curve
            .points()
            .iter()
            .filter(|point| point.profit == profit)
            .map(|point| point.threshold)
            .collect::<Vec<_>>();

        event!(
            Level::DEBUG,
            profit,
            ties = thresholds.len(),
            "located optimal threshold"
        );

        Ok(OptimalThreshold { thresholds, profit })
    }

    /// Compare the total expected profit at two thresholds of `curve`.
    ///
    /// The totals are read from the curve itself, so they are identical to a
    /// direct [`AggregateProfitCurve::profit_at`] lookup.
    pub fn compare(
        &self,
        curve: &AggregateProfitCurve,
        threshold_a: f64,
        threshold_b: f64,
    ) -> Result<ComparisonResult, ThresholdNotFound> {
        let a = curve.point_at(threshold_a)?;
        let b = curve.point_at(threshold_b)?;
        Ok(ComparisonResult::new(a, b, curve.population()))
    }
}

/// Errors that abort an aggregation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AggregateError {
    /// There are no customers to aggregate
    #[error("customer population is empty")]
    EmptyPopulation,
    /// The same id appears more than once, which would double-count a customer
    #[error("customer {0} appears more than once")]
    DuplicateCustomer(CustomerId),
    /// A customer could not be priced
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Errors from searching a curve for its optimum
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OptimumError {
    /// The curve has no points
    #[error("profit curve is empty")]
    EmptyCurve,
    /// Every point of the curve is NaN
    #[error("profit curve has no comparable values")]
    Undefined,
}
