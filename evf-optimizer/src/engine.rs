use evf_core::models::{
    CostBenefit, Customer, CustomerId, ExpectedProfitCurve, ProfitPoint, RateTable, ThresholdRate,
};

/// Computes a single customer's expected profit across a threshold grid.
///
/// The engine is stateless. For a customer with positive-class probability
/// `p1` and a row of classifier rates, the expected profit is the
/// probability-weighted value of the four outcomes:
///
/// ```text
/// p1 * (tpr * cb_tp + fnr * cb_fn) + (1 - p1) * (fpr * cb_fp + tnr * cb_tn)
/// ```
///
/// `p1` is the model's belief about this customer, while the rates are the
/// classifier's aggregate behaviour at that threshold on the reference set.
/// Under the canonical cost model (`cb_tn = cb_fn = 0`) this reduces to
/// `p1 * tpr * cb_tp + (1 - p1) * fpr * cb_fp`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExpectedProfitEngine;

impl ExpectedProfitEngine {
    /// Check that a customer can be priced
    ///
    /// `p1` must lie in [0, 1] and all cost coefficients must be finite. No
    /// sign is imposed on the coefficients.
    pub fn validate(&self, customer: &Customer) -> Result<(), EngineError> {
        if !(0.0..=1.0).contains(&customer.p1) {
            return Err(EngineError::InvalidProbability {
                id: customer.id.clone(),
                p1: customer.p1,
            });
        }
        if !customer.costs.is_finite() {
            return Err(EngineError::NonFiniteCost {
                id: customer.id.clone(),
            });
        }
        Ok(())
    }

    /// The customer's expected profit at every threshold of `rates`, in ascending order
    pub fn compute_curve(
        &self,
        customer: &Customer,
        rates: &RateTable,
    ) -> Result<ExpectedProfitCurve, EngineError> {
        self.validate(customer)?;
        Ok(ExpectedProfitCurve::new(
            rates
                .iter()
                .zip(self.profits(customer, rates))
                .map(|(row, profit)| ProfitPoint {
                    threshold: row.threshold,
                    profit,
                })
                .collect(),
        ))
    }

    // The caller is responsible for having validated `customer`.
    pub(crate) fn profits<'a>(
        &self,
        customer: &'a Customer,
        rates: &'a RateTable,
    ) -> impl Iterator<Item = f64> + 'a {
        let Customer { p1, costs, .. } = customer;
        rates.iter().map(move |row| expected_profit(*p1, costs, row))
    }
}

/// The expected profit of one customer at one row of classifier rates
#[inline]
pub fn expected_profit(p1: f64, costs: &CostBenefit, rate: &ThresholdRate) -> f64 {
    let positive = p1 * rate.tpr * costs.true_positive + p1 * rate.fnr * costs.false_negative;
    let negative = (1.0 - p1) * rate.fpr * costs.false_positive
        + (1.0 - p1) * rate.tnr * costs.true_negative;
    positive + negative
}

/// Errors that prevent a customer from being priced
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// The predicted probability lies outside [0, 1] (or is NaN)
    #[error("customer {id}: probability {p1} lies outside [0, 1]")]
    InvalidProbability {
        /// the customer
        id: CustomerId,
        /// the rejected probability
        p1: f64,
    },
    /// A cost/benefit coefficient is infinite or NaN
    #[error("customer {id}: cost/benefit coefficients must be finite")]
    NonFiniteCost {
        /// the customer
        id: CustomerId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(threshold: f64, tpr: f64, fpr: f64) -> ThresholdRate {
        ThresholdRate {
            threshold,
            tpr,
            fpr,
            fnr: 1.0 - tpr,
            tnr: 1.0 - fpr,
        }
    }

    fn table() -> RateTable {
        RateTable::new(vec![
            row(0.0, 1.0, 1.0),
            row(0.3, 0.8, 0.4),
            row(0.6, 0.5, 0.125),
            row(1.0, 0.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_curve_matches_formula() {
        let customer = Customer::new("c", 0.25, CostBenefit::new(50.0, -30.0));
        let rates = table();
        let curve = ExpectedProfitEngine.compute_curve(&customer, &rates).unwrap();

        assert_eq!(curve.len(), rates.len());
        for (point, rate) in curve.points().iter().zip(rates.iter()) {
            assert_eq!(point.threshold, rate.threshold);
            assert_eq!(
                point.profit,
                0.25 * rate.tpr * 50.0 + (1.0 - 0.25) * rate.fpr * -30.0
            );
        }
    }

    #[test]
    fn test_curve_endpoints() {
        let customer = Customer::new("c", 0.4, CostBenefit::new(50.0, -30.0));
        let curve = ExpectedProfitEngine
            .compute_curve(&customer, &table())
            .unwrap();

        // Everyone is contacted at threshold 0, no one at threshold 1
        assert_eq!(curve.profit_at(0.0), Ok(0.4 * 50.0 + 0.6 * -30.0));
        assert_eq!(curve.profit_at(1.0), Ok(0.0));
    }

    #[test]
    fn test_full_matrix() {
        let customer = Customer::new("c", 0.5, CostBenefit::matrix(10.0, -4.0, 1.0, -2.0));
        let curve = ExpectedProfitEngine
            .compute_curve(&customer, &table())
            .unwrap();

        // At threshold 1 nobody is called positive: fnr = tnr = 1
        assert_eq!(curve.profit_at(1.0), Ok(0.5 * -2.0 + 0.5 * 1.0));
    }

    #[test]
    fn test_sign_convention_not_enforced() {
        let customer = Customer::new("c", 0.5, CostBenefit::new(-1.0, 2.0));
        assert!(
            ExpectedProfitEngine
                .compute_curve(&customer, &table())
                .is_ok()
        );
    }

    #[test]
    fn test_invalid_probability() {
        for p1 in [-0.01, 1.01, f64::NAN, f64::INFINITY] {
            let customer = Customer::new("bad", p1, CostBenefit::new(50.0, -30.0));
            assert!(matches!(
                ExpectedProfitEngine.compute_curve(&customer, &table()),
                Err(EngineError::InvalidProbability { .. })
            ));
        }
    }

    #[test]
    fn test_probability_bounds_are_inclusive() {
        for p1 in [0.0, 1.0] {
            let customer = Customer::new("edge", p1, CostBenefit::new(50.0, -30.0));
            assert!(
                ExpectedProfitEngine
                    .compute_curve(&customer, &table())
                    .is_ok()
            );
        }
    }

    #[test]
    fn test_non_finite_cost() {
        let customer = Customer::new("c", 0.5, CostBenefit::new(f64::INFINITY, -30.0));
        assert_eq!(
            ExpectedProfitEngine.compute_curve(&customer, &table()),
            Err(EngineError::NonFiniteCost { id: "c".into() })
        );
    }

    #[test]
    fn test_repeatable() {
        let customer = Customer::new("c", 0.37, CostBenefit::new(12.5, -3.25));
        let rates = table();
        let first = ExpectedProfitEngine.compute_curve(&customer, &rates).unwrap();
        let second = ExpectedProfitEngine.compute_curve(&customer, &rates).unwrap();
        assert_eq!(first, second);
    }
}
