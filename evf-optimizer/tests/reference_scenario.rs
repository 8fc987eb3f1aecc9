use approx::assert_abs_diff_eq;
use evf_core::models::{CostBenefit, Customer, RateTable, ThresholdRate};
use evf_optimizer::PortfolioOptimizer;
use rstest::*;
use rstest_reuse::{self, *};

mod all_optimizers;
use all_optimizers::all_optimizers;

fn row(threshold: f64, tpr: f64, fpr: f64) -> ThresholdRate {
    ThresholdRate {
        threshold,
        tpr,
        fpr,
        fnr: 1.0 - tpr,
        tnr: 1.0 - fpr,
    }
}

#[fixture]
pub fn rates() -> RateTable {
    RateTable::new(vec![
        row(0.0, 1.0, 1.0),
        row(0.092, 0.9, 0.5),
        row(0.19, 0.75, 0.32),
        row(0.5, 0.4, 0.1),
        row(1.0, 0.0, 0.0),
    ])
    .unwrap()
}

// Ten customers with p1 = 0.1, 0.2, ..., 1.0 under a uniform £50 / -£30 cost model
#[fixture]
pub fn customers() -> Vec<Customer> {
    let costs = CostBenefit::new(50.0, -30.0);
    [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0]
        .into_iter()
        .enumerate()
        .map(|(idx, p1)| Customer::new(format!("c{:02}", idx + 1), p1, costs))
        .collect()
}

#[apply(all_optimizers)]
#[rstest]
fn lower_threshold_wins(
    optimizer: PortfolioOptimizer,
    rates: RateTable,
    customers: Vec<Customer>,
) {
    let curve = optimizer.aggregate(&customers, &rates).unwrap();
    assert_eq!(curve.len(), rates.len());
    assert_eq!(curve.population(), 10);

    // Σp1 = 5.5 and Σ(1 - p1) = 4.5, so the total is 275·tpr - 135·fpr
    assert_abs_diff_eq!(curve.profit_at(0.0).unwrap(), 140.0, epsilon = 1e-9);
    assert_abs_diff_eq!(curve.profit_at(0.092).unwrap(), 180.0, epsilon = 1e-9);
    assert_abs_diff_eq!(curve.profit_at(0.19).unwrap(), 163.05, epsilon = 1e-9);
    assert_abs_diff_eq!(curve.profit_at(0.5).unwrap(), 96.5, epsilon = 1e-9);
    assert_abs_diff_eq!(curve.profit_at(1.0).unwrap(), 0.0, epsilon = 1e-9);

    let comparison = optimizer.compare(&curve, 0.092, 0.19).unwrap();
    assert_abs_diff_eq!(comparison.delta, 16.95, epsilon = 1e-9);
    assert_abs_diff_eq!(comparison.delta_per_customer, 1.695, epsilon = 1e-10);
    assert_abs_diff_eq!(comparison.extrapolate(10_000), 16_950.0, epsilon = 1e-6);

    let optimum = optimizer.find_optimum(&curve).unwrap();
    assert_eq!(optimum.thresholds, vec![0.092]);
    assert_eq!(optimum.profit, curve.profit_at(0.092).unwrap());
}

#[apply(all_optimizers)]
#[rstest]
fn comparison_agrees_with_lookup(
    optimizer: PortfolioOptimizer,
    rates: RateTable,
    customers: Vec<Customer>,
) {
    let curve = optimizer.aggregate(&customers, &rates).unwrap();
    for threshold in rates.all_thresholds() {
        let comparison = optimizer.compare(&curve, threshold, threshold).unwrap();
        assert_eq!(
            comparison.a.profit.to_bits(),
            curve.profit_at(threshold).unwrap().to_bits()
        );
        assert_eq!(comparison.delta, 0.0);
    }
}

#[apply(all_optimizers)]
#[rstest]
fn unknown_threshold_is_rejected(
    optimizer: PortfolioOptimizer,
    rates: RateTable,
    customers: Vec<Customer>,
) {
    let curve = optimizer.aggregate(&customers, &rates).unwrap();
    assert!(optimizer.compare(&curve, 0.092, 0.1).is_err());
    assert!(rates.rates_at(0.1).is_err());
}
