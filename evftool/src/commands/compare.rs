use evf_core::models::ComparisonResult;
use serde::Serialize;

/// The output of the `compare` subcommand
#[derive(Debug, Serialize)]
pub struct CompareReport {
    #[serde(flatten)]
    pub comparison: ComparisonResult,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extrapolation: Option<Extrapolation>,
}

/// The per-customer difference scaled linearly to a larger customer base
#[derive(Debug, Serialize)]
pub struct Extrapolation {
    pub target: usize,
    pub delta: f64,
}

impl CompareReport {
    pub fn new(comparison: ComparisonResult, target: Option<usize>) -> Self {
        let extrapolation = target.map(|target| Extrapolation {
            target,
            delta: comparison.extrapolate(target),
        });
        Self {
            comparison,
            extrapolation,
        }
    }
}
