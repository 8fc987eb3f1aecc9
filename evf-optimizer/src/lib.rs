//! Expected-value threshold selection.
//!
//! Data flows strictly one way:
//!
//! 1. a validated [`RateTable`](evf_core::models::RateTable) describes the
//!    classifier at every threshold of its grid,
//! 2. the [`ExpectedProfitEngine`] turns one customer and the table into that
//!    customer's expected profit at each threshold,
//! 3. the [`PortfolioOptimizer`] sums those curves over a population, finds the
//!    threshold(s) of maximum total profit, and compares any two thresholds.
//!
//! Every operation is a pure function of its explicit inputs. Nothing is cached
//! between calls, so results cannot depend on call order.

/**
 * The per-customer expected-profit computation.
 */
mod engine;
pub use engine::*;

/**
 * Population aggregation, optimum search and threshold comparison.
 */
mod portfolio;
pub use portfolio::*;

/// JSON scenario documents, as consumed by the command-line tool
#[cfg(feature = "io")]
pub mod io;
