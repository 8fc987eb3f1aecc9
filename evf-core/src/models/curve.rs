//! Profit curves over a threshold grid.
//!
//! Both curve types carry exactly one point per row of the [`RateTable`](crate::models::RateTable)
//! they were computed from, in the same ascending order. They are produced by
//! the optimizer and are read-only thereafter.

use crate::models::ThresholdNotFound;

/// The expected profit at one threshold
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfitPoint {
    /// The classification threshold
    pub threshold: f64,
    /// The expected profit when contacting customers at or above the threshold
    pub profit: f64,
}

fn lookup(points: &[ProfitPoint], threshold: f64) -> Result<&ProfitPoint, ThresholdNotFound> {
    points
        .iter()
        .find(|point| point.threshold == threshold)
        .ok_or(ThresholdNotFound(threshold))
}

/// A single customer's expected profit at every threshold
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct ExpectedProfitCurve(Vec<ProfitPoint>);

impl ExpectedProfitCurve {
    /// Wraps points already in ascending threshold order
    pub fn new(points: Vec<ProfitPoint>) -> Self {
        Self(points)
    }

    /// The points in ascending threshold order
    pub fn points(&self) -> &[ProfitPoint] {
        &self.0
    }

    /// Number of thresholds
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the curve has no points
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Exact lookup of the expected profit at `threshold`
    pub fn profit_at(&self, threshold: f64) -> Result<f64, ThresholdNotFound> {
        lookup(&self.0, threshold).map(|point| point.profit)
    }
}

/// The total expected profit of a population at every threshold.
///
/// Alongside the points, the curve remembers how many customers were summed
/// so that differences can be normalised per customer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AggregateProfitCurve {
    population: usize,
    points: Vec<ProfitPoint>,
}

impl AggregateProfitCurve {
    /// Wraps population totals already in ascending threshold order
    pub fn new(population: usize, points: Vec<ProfitPoint>) -> Self {
        Self { population, points }
    }

    /// The number of customers whose curves were summed
    pub fn population(&self) -> usize {
        self.population
    }

    /// The points in ascending threshold order
    pub fn points(&self) -> &[ProfitPoint] {
        &self.points
    }

    /// Number of thresholds
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the curve has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Exact lookup of the point at `threshold`
    pub fn point_at(&self, threshold: f64) -> Result<ProfitPoint, ThresholdNotFound> {
        lookup(&self.points, threshold).copied()
    }

    /// Exact lookup of the total expected profit at `threshold`
    pub fn profit_at(&self, threshold: f64) -> Result<f64, ThresholdNotFound> {
        lookup(&self.points, threshold).map(|point| point.profit)
    }
}
