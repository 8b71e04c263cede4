use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::EmiCalcError;
use crate::types::{Money, Percent};
use crate::EmiCalcResult;

/// How a bank computes its processing fee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeKind {
    /// Flat amount regardless of principal
    Fixed,
    /// Share of principal
    Percentage,
    /// Flat amount plus a share of principal
    Hybrid,
}

/// Principal band a bank advertises its fee schedule for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRange {
    pub min_amount: Money,
    pub max_amount: Money,
}

impl LoanRange {
    pub fn contains(&self, principal: Money) -> bool {
        principal >= self.min_amount && principal <= self.max_amount
    }
}

/// One lender's processing-fee policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeePolicy {
    pub bank_name: String,
    pub kind: FeeKind,
    #[serde(default)]
    pub fixed_amount: Money,
    /// Percentage of principal (1.5 = 1.5%). Ignored for fixed policies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage_rate: Option<Percent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_fee: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_fee: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicable_range: Option<LoanRange>,
}

/// Read-only lookup table of fee policies, queried by bank name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeeCatalog {
    policies: Vec<FeePolicy>,
}

impl FeeCatalog {
    pub fn new(policies: Vec<FeePolicy>) -> Self {
        FeeCatalog { policies }
    }

    /// Parse a JSON array of policies.
    pub fn from_json(json: &str) -> EmiCalcResult<Self> {
        let catalog: FeeCatalog = serde_json::from_str(json)?;
        catalog.check()?;
        Ok(catalog)
    }

    /// Reject catalogs that cannot be queried unambiguously.
    pub fn check(&self) -> EmiCalcResult<()> {
        for (i, policy) in self.policies.iter().enumerate() {
            if policy.bank_name.trim().is_empty() {
                return Err(EmiCalcError::InsufficientData(format!(
                    "Fee catalog entry {i} has no bank name"
                )));
            }
            if self.policies[..i].iter().any(|p| p.bank_name == policy.bank_name) {
                return Err(EmiCalcError::InsufficientData(format!(
                    "Fee catalog lists '{}' more than once",
                    policy.bank_name
                )));
            }
            if policy.kind != FeeKind::Fixed && policy.percentage_rate.is_none() {
                return Err(EmiCalcError::InsufficientData(format!(
                    "'{}' is a {:?} policy without a percentage_rate",
                    policy.bank_name, policy.kind
                )));
            }
            let amounts = [
                ("fixed_amount", Some(policy.fixed_amount)),
                ("percentage_rate", policy.percentage_rate),
                ("minimum_fee", policy.minimum_fee),
                ("maximum_fee", policy.maximum_fee),
            ];
            if let Some((name, Some(value))) = amounts
                .iter()
                .find(|(_, v)| v.is_some_and(|v| v < Decimal::ZERO))
            {
                return Err(EmiCalcError::InsufficientData(format!(
                    "'{}' has negative {name} {value}",
                    policy.bank_name
                )));
            }
            if let (Some(min), Some(max)) = (policy.minimum_fee, policy.maximum_fee) {
                if min > max {
                    return Err(EmiCalcError::InsufficientData(format!(
                        "'{}' has minimum fee {min} above maximum fee {max}",
                        policy.bank_name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Policy for `bank_name`. Unknown names fail; there is no default entry.
    pub fn lookup(&self, bank_name: &str) -> EmiCalcResult<&FeePolicy> {
        self.policies
            .iter()
            .find(|p| p.bank_name == bank_name)
            .ok_or_else(|| EmiCalcError::UnknownBankReference {
                reference: bank_name.to_string(),
                known: self.bank_names(),
            })
    }

    pub fn policies(&self) -> &[FeePolicy] {
        &self.policies
    }

    pub fn bank_names(&self) -> Vec<String> {
        self.policies.iter().map(|p| p.bank_name.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }
}

impl Default for FeeCatalog {
    /// Card-issuer processing fees for consumer EMI conversions (INR).
    fn default() -> Self {
        let entry = |bank_name: &str,
                     kind: FeeKind,
                     fixed_amount: Decimal,
                     percentage_rate: Option<Decimal>,
                     bounds: (Decimal, Decimal),
                     range: (Decimal, Decimal)| FeePolicy {
            bank_name: bank_name.to_string(),
            kind,
            fixed_amount,
            percentage_rate,
            minimum_fee: Some(bounds.0),
            maximum_fee: Some(bounds.1),
            applicable_range: Some(LoanRange {
                min_amount: range.0,
                max_amount: range.1,
            }),
        };

        FeeCatalog::new(vec![
            entry(
                "HDFC Bank",
                FeeKind::Fixed,
                dec!(299),
                None,
                (dec!(299), dec!(999)),
                (dec!(5000), dec!(500000)),
            ),
            entry(
                "ICICI Bank",
                FeeKind::Percentage,
                Decimal::ZERO,
                Some(dec!(1.5)),
                (dec!(199), dec!(1500)),
                (dec!(3000), dec!(300000)),
            ),
            entry(
                "SBI Card",
                FeeKind::Hybrid,
                dec!(199),
                Some(dec!(1)),
                (dec!(199), dec!(999)),
                (dec!(5000), dec!(200000)),
            ),
            entry(
                "Axis Bank",
                FeeKind::Fixed,
                dec!(500),
                None,
                (dec!(500), dec!(500)),
                (dec!(10000), dec!(1000000)),
            ),
            entry(
                "Kotak Bank",
                FeeKind::Percentage,
                Decimal::ZERO,
                Some(dec!(2)),
                (dec!(250), dec!(2000)),
                (dec!(5000), dec!(500000)),
            ),
            entry(
                "Custom Bank",
                FeeKind::Fixed,
                Decimal::ZERO,
                None,
                (Decimal::ZERO, dec!(9999)),
                (dec!(1000), dec!(999999)),
            ),
        ])
    }
}
