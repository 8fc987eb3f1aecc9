use crate::models::CostBenefit;
use std::fmt;

/// A newtype wrapper for customer identifiers
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct CustomerId(String);

impl CustomerId {
    /// The identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for CustomerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for CustomerId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// One row of a scored dataset: a customer and the classifier's belief that
/// they belong to the positive class.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Score {
    /// The customer identifier
    pub id: CustomerId,
    /// The predicted positive-class probability
    pub p1: f64,
}

/// A scored customer together with the cost/benefit matrix that prices their outcomes.
///
/// `p1` is carried exactly as the classifier produced it. It is deliberately
/// not validated here: the engine rejects values outside [0, 1] when it
/// computes the customer's curve, and nothing ever clamps them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Customer {
    /// The customer identifier
    pub id: CustomerId,
    /// The predicted positive-class probability
    pub p1: f64,
    /// The value of each classification outcome for this customer
    pub costs: CostBenefit,
}

impl Customer {
    /// Creates a customer from its parts
    pub fn new(id: impl Into<CustomerId>, p1: f64, costs: CostBenefit) -> Self {
        Self {
            id: id.into(),
            p1,
            costs,
        }
    }
}
