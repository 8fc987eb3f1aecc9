//! Tool configuration.
//!
//! Configuration is layered from built-in defaults, an optional TOML file, and
//! environment variables, in increasing order of precedence.

use evf_core::models::{CostBenefit, CostPolicy, RATE_TOLERANCE};
use evf_optimizer::{DEFAULT_CHUNK_SIZE, Execution, OptimizerSettings};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The complete tool configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct AppConfig {
    /// The cost/benefit matrix applied when a scenario carries no policy of its own
    #[serde(default)]
    pub costs: CostBenefit,

    /// Aggregation and validation settings
    #[serde(default)]
    pub optimizer: OptimizerConfig,
}

/// Aggregation and validation settings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Customers summed per reduction chunk
    pub chunk_size: usize,
    /// Whether chunks are evaluated on the thread pool
    pub execution: Execution,
    /// Allowed deviation of `tpr + fnr` and `fpr + tnr` from 1
    pub tolerance: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            execution: Execution::Parallel,
            tolerance: RATE_TOLERANCE,
        }
    }
}

impl OptimizerConfig {
    /// The optimizer settings described by this section
    pub fn settings(&self) -> OptimizerSettings {
        OptimizerSettings {
            chunk_size: self.chunk_size,
            execution: self.execution,
        }
    }
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. The config file, if given
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern
    /// `EVF_<SECTION>__<KEY>` to `<section>.<key>`:
    ///
    /// ```bash
    /// # Uniform cost model: £50 net revenue per conversion, £30 per contact
    /// export EVF_COSTS__TP=50
    /// export EVF_COSTS__FP=-30
    ///
    /// # Evaluate on the calling thread only
    /// export EVF_OPTIMIZER__EXECUTION=sequential
    /// ```
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Start with default values
        config = config.add_source(config::Config::try_from(&Self::default())?);

        // Layer on the config file; naming a file that does not exist is an error
        if let Some(path) = path {
            if path.exists() {
                config = config.add_source(config::File::from(path))
            } else {
                return Err(anyhow::anyhow!(
                    "Config file {} does not exist",
                    path.display()
                ));
            }
        }

        // Override with environment variables
        // This maps EVF_COSTS__TP to costs.tp
        config = config.add_source(
            config::Environment::with_prefix("EVF")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let built_config = config.build()?;
        built_config.try_deserialize().map_err(Into::into)
    }

    /// The cost policy applied to scenarios without one
    pub fn fallback_policy(&self) -> CostPolicy {
        CostPolicy::uniform(self.costs)
    }
}
