use crate::{AggregateError, PortfolioOptimizer};
use evf_core::{
    models::{
        AggregateProfitCurve, CostPolicy, Customer, PolicyError, RateTable, RateTableError, Score,
        ThresholdRate,
    },
    ports::RateSource as _,
};
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

/// A scenario document as read from JSON.
///
/// The rate rows are kept raw so that they can be validated at a tolerance
/// chosen by the caller. The cost policy is optional; when absent, the
/// caller's fallback policy is applied to every customer.
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct RawScenario {
    /// The classifier's rates over its threshold grid, ascending
    pub rates: Vec<ThresholdRate>,
    /// The scored population
    pub scores: Vec<Score>,
    /// How cost/benefit matrices are assigned to the population
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<CostPolicy>,
}

/// A validated rate table and its priced population
#[derive(Debug)]
pub struct Scenario {
    /// The validated rate table
    pub rates: RateTable,
    /// The population, priced by the effective cost policy
    pub customers: Vec<Customer>,
}

impl RawScenario {
    /// Validate the rates and price the population
    pub fn prepare(self, fallback: &CostPolicy, tolerance: f64) -> Result<Scenario, ScenarioError> {
        let rates = self.rates.rate_table(tolerance)?;
        let policy = match &self.policy {
            Some(policy) => policy,
            None => {
                event!(Level::DEBUG, "scenario has no cost policy, using fallback");
                fallback
            }
        };
        let customers = policy.customers(self.scores)?;

        event!(
            Level::DEBUG,
            thresholds = rates.len(),
            customers = customers.len(),
            overrides = policy.overrides.len(),
            "prepared scenario"
        );

        Ok(Scenario { rates, customers })
    }
}

impl Scenario {
    /// The aggregate profit curve of the whole population
    pub fn aggregate(
        &self,
        optimizer: &PortfolioOptimizer,
    ) -> Result<AggregateProfitCurve, AggregateError> {
        optimizer.aggregate(&self.customers, &self.rates)
    }
}

/// Errors that can occur when preparing a scenario
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    /// The rate rows are malformed
    #[error("malformed rate table: {0}")]
    Rates(#[from] RateTableError),
    /// The cost policy does not fit the population
    #[error("invalid cost policy: {0}")]
    Policy(#[from] PolicyError),
}
