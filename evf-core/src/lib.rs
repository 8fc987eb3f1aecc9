#![warn(missing_docs)]
//! Core models for choosing a classification threshold by expected value.
//!
//! A binary classifier scores each customer with a positive-class probability.
//! Turning those scores into a contact decision needs a cut-off, and the
//! business-optimal cut-off depends on what a true positive earns and what a
//! false positive costs. This crate holds the plain, immutable values that the
//! [`evf_optimizer`](https://docs.rs/evf-optimizer) crate computes over:
//!
//! - [`models::RateTable`]: the classifier's confusion-matrix rates at every
//!   threshold of a fixed grid, validated on construction
//! - [`models::Customer`] and [`models::CostPolicy`]: the scored population and
//!   its cost/benefit matrices
//! - [`models::ExpectedProfitCurve`] and [`models::AggregateProfitCurve`]: the
//!   per-customer and population-wide profit at each threshold
//! - [`models::OptimalThreshold`] and [`models::ComparisonResult`]: the
//!   answers reported back to the business

/// Domain models for expected-value threshold selection.
///
/// The models are data structures with validation at their construction
/// boundary and minimal business logic; the computations that operate on them
/// live in the optimizer crate.
pub mod models;

/// Interface traits for collaborators outside this core.
///
/// The classifier evaluation library that measures confusion-matrix rates is
/// not part of this workspace. [`ports::RateSource`] is the seam through which
/// its output enters.
pub mod ports;
