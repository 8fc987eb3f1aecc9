use crate::models::ProfitPoint;

/// The threshold(s) at which an aggregate curve attains its maximum.
///
/// When several thresholds tie exactly, all of them are listed in ascending
/// order. Choosing between them (for example preferring the lowest) is left to
/// the caller.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimalThreshold {
    /// The maximising thresholds, ascending
    pub thresholds: Vec<f64>,
    /// The maximum total expected profit
    pub profit: f64,
}

impl OptimalThreshold {
    /// Whether exactly one threshold attains the maximum
    pub fn is_unique(&self) -> bool {
        self.thresholds.len() == 1
    }
}

/// The profit difference between two thresholds of the same aggregate curve.
///
/// `delta` is `profit_a - profit_b`. `delta_per_customer` divides it by the
/// population the curve was built from, which is the figure used to scale the
/// business case to a larger customer base.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparisonResult {
    /// The first threshold and its total expected profit
    pub a: ProfitPoint,
    /// The second threshold and its total expected profit
    pub b: ProfitPoint,
    /// The number of customers behind both totals
    pub population: usize,
    /// `a.profit - b.profit`
    pub delta: f64,
    /// `delta / population`
    pub delta_per_customer: f64,
}

impl ComparisonResult {
    /// Compares two points taken from a curve over `population` customers
    pub fn new(a: ProfitPoint, b: ProfitPoint, population: usize) -> Self {
        let delta = a.profit - b.profit;
        Self {
            a,
            b,
            population,
            delta,
            delta_per_customer: delta / population as f64,
        }
    }

    /// Linear extrapolation of the difference to a customer base of `target` customers
    pub fn extrapolate(&self, target: usize) -> f64 {
        self.delta_per_customer * target as f64
    }
}
