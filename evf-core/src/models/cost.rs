use crate::models::{Customer, CustomerId, Map, Score, Set};

/// The monetary value of each of the four classification outcomes.
///
/// In the canonical marketing model only contacting a customer has
/// consequences: a true positive earns revenue less acquisition cost, a false
/// positive loses the acquisition cost, and the two negative outcomes are worth
/// nothing because no contact is made. [`CostBenefit::new`] builds exactly
/// that model. The negative-outcome coefficients exist so that a richer cost
/// model can be expressed as data rather than as a change to the formula.
///
/// No sign convention is imposed; other framings (e.g. net subscriptions) may
/// well assign a positive value to a false positive.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostBenefit {
    /// Value of correctly predicting a positive (`cb_tp`)
    #[cfg_attr(feature = "serde", serde(rename = "tp"))]
    pub true_positive: f64,
    /// Value of incorrectly predicting a positive (`cb_fp`)
    #[cfg_attr(feature = "serde", serde(rename = "fp"))]
    pub false_positive: f64,
    /// Value of correctly predicting a negative
    #[cfg_attr(feature = "serde", serde(rename = "tn", default))]
    pub true_negative: f64,
    /// Value of incorrectly predicting a negative
    #[cfg_attr(feature = "serde", serde(rename = "fn", default))]
    pub false_negative: f64,
}

impl CostBenefit {
    /// The canonical model: only the positive predictions carry value
    pub fn new(cb_tp: f64, cb_fp: f64) -> Self {
        Self {
            true_positive: cb_tp,
            false_positive: cb_fp,
            true_negative: 0.0,
            false_negative: 0.0,
        }
    }

    /// A full 2x2 matrix
    pub fn matrix(cb_tp: f64, cb_fp: f64, cb_tn: f64, cb_fn: f64) -> Self {
        Self {
            true_positive: cb_tp,
            false_positive: cb_fp,
            true_negative: cb_tn,
            false_negative: cb_fn,
        }
    }

    /// Derives the canonical model from per-customer revenue and the cost of
    /// contacting a customer.
    pub fn from_unit_economics(revenue: f64, acquisition_cost: f64) -> Self {
        Self::new(revenue - acquisition_cost, -acquisition_cost)
    }

    /// Whether all four coefficients are finite
    pub fn is_finite(&self) -> bool {
        self.true_positive.is_finite()
            && self.false_positive.is_finite()
            && self.true_negative.is_finite()
            && self.false_negative.is_finite()
    }
}

/// How cost/benefit matrices are assigned to a scored population.
///
/// Every customer receives the uniform matrix unless an override keyed by
/// their id says otherwise.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostPolicy {
    /// The matrix applied to customers without an override
    pub uniform: CostBenefit,
    /// Per-customer matrices
    #[cfg_attr(feature = "serde", serde(default))]
    pub overrides: Map<CustomerId, CostBenefit>,
}

impl CostPolicy {
    /// A policy applying `costs` to every customer
    pub fn uniform(costs: CostBenefit) -> Self {
        Self {
            uniform: costs,
            overrides: Map::default(),
        }
    }

    /// Adds (or replaces) the override for `id`
    pub fn with_override(mut self, id: impl Into<CustomerId>, costs: CostBenefit) -> Self {
        self.overrides.insert(id.into(), costs);
        self
    }

    /// The matrix that applies to `id`
    pub fn costs_for(&self, id: &CustomerId) -> CostBenefit {
        self.overrides.get(id).copied().unwrap_or(self.uniform)
    }

    /// Prices a scored dataset, preserving its order.
    ///
    /// An override naming an id that does not appear in `scores` is rejected,
    /// since it almost always means the override table and the scored dataset
    /// were keyed differently.
    pub fn customers<I>(&self, scores: I) -> Result<Vec<Customer>, PolicyError>
    where
        I: IntoIterator<Item = Score>,
    {
        let customers = scores
            .into_iter()
            .map(|Score { id, p1 }| {
                let costs = self.costs_for(&id);
                Customer { id, p1, costs }
            })
            .collect::<Vec<_>>();

        if !self.overrides.is_empty() {
            let known = customers
                .iter()
                .map(|customer| &customer.id)
                .collect::<Set<_>>();
            if let Some(id) = self.overrides.keys().find(|id| !known.contains(id)) {
                return Err(PolicyError::UnknownOverride(id.clone()));
            }
        }

        Ok(customers)
    }
}

/// Errors that can occur when applying a cost policy
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum PolicyError {
    /// An override refers to a customer that was never scored
    #[error("cost override for unknown customer {0}")]
    UnknownOverride(CustomerId),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores() -> Vec<Score> {
        vec![
            Score {
                id: "a".into(),
                p1: 0.2,
            },
            Score {
                id: "b".into(),
                p1: 0.7,
            },
        ]
    }

    #[test]
    fn test_canonical_model() {
        let costs = CostBenefit::new(50.0, -30.0);
        assert_eq!(costs.true_negative, 0.0);
        assert_eq!(costs.false_negative, 0.0);
        assert_eq!(
            CostBenefit::from_unit_economics(80.0, 30.0),
            CostBenefit::new(50.0, -30.0)
        );
    }

    #[test]
    fn test_is_finite() {
        assert!(CostBenefit::matrix(1.0, -1.0, 0.5, -0.5).is_finite());
        assert!(!CostBenefit::new(f64::INFINITY, 0.0).is_finite());
        assert!(!CostBenefit::matrix(0.0, 0.0, 0.0, f64::NAN).is_finite());
    }

    #[test]
    fn test_uniform_policy() {
        let policy = CostPolicy::uniform(CostBenefit::new(50.0, -30.0));
        let customers = policy.customers(scores()).unwrap();
        assert_eq!(customers.len(), 2);
        assert_eq!(customers[0].id.as_str(), "a");
        assert_eq!(customers[1].p1, 0.7);
        assert!(
            customers
                .iter()
                .all(|c| c.costs == CostBenefit::new(50.0, -30.0))
        );
    }

    #[test]
    fn test_override_policy() {
        let policy = CostPolicy::uniform(CostBenefit::new(50.0, -30.0))
            .with_override("b", CostBenefit::new(200.0, -30.0));
        let customers = policy.customers(scores()).unwrap();
        assert_eq!(customers[0].costs, CostBenefit::new(50.0, -30.0));
        assert_eq!(customers[1].costs, CostBenefit::new(200.0, -30.0));
    }

    #[test]
    fn test_unknown_override() {
        let policy = CostPolicy::uniform(CostBenefit::new(50.0, -30.0))
            .with_override("z", CostBenefit::new(1.0, -1.0));
        assert_eq!(
            policy.customers(scores()).unwrap_err(),
            PolicyError::UnknownOverride("z".into())
        );
    }

    #[test]
    fn test_deserialize_policy() {
        let raw = r#"{
            "uniform": { "tp": 50.0, "fp": -30.0 },
            "overrides": { "b": { "tp": 10.0, "fp": -1.0, "tn": 0.5, "fn": -2.0 } }
        }"#;
        let policy = serde_json::from_str::<CostPolicy>(raw).unwrap();
        assert_eq!(policy.uniform, CostBenefit::new(50.0, -30.0));
        assert_eq!(
            policy.costs_for(&"b".into()),
            CostBenefit::matrix(10.0, -1.0, 0.5, -2.0)
        );

        let raw = r#"{ "uniform": { "tp": 1.0, "fp": -1.0 } }"#;
        let policy = serde_json::from_str::<CostPolicy>(raw).unwrap();
        assert!(policy.overrides.is_empty());
    }
}
