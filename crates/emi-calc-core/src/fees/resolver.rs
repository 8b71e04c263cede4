use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::EmiCalcError;
use crate::fees::catalog::{FeeCatalog, FeeKind, FeePolicy};
use crate::loan::specification::{FeeOverrideKind, LoanSpecification};
use crate::types::{round_currency, Money};
use crate::EmiCalcResult;

/// Where a resolved fee came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeSource {
    Catalog,
    Override,
}

/// Which clamp bound, if any, replaced the raw formula result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeClamp {
    RaisedToMinimum,
    CappedAtMaximum,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedFee {
    pub amount: Money,
    /// Fee before clamping and rounding
    pub raw_amount: Money,
    pub source: FeeSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clamp: Option<FeeClamp>,
}

fn share_of(principal: Money, percentage: Decimal) -> Money {
    principal * percentage / dec!(100)
}

/// Processing fee under a catalog policy, clamped into the policy's bounds.
pub fn resolve_policy_fee(principal: Money, policy: &FeePolicy) -> ResolvedFee {
    let percentage = policy.percentage_rate.unwrap_or(Decimal::ZERO);
    let raw = match policy.kind {
        FeeKind::Fixed => policy.fixed_amount,
        FeeKind::Percentage => share_of(principal, percentage),
        FeeKind::Hybrid => policy.fixed_amount + share_of(principal, percentage),
    };

    let mut fee = raw;
    let mut clamp = None;
    if let Some(min) = policy.minimum_fee {
        if fee < min {
            fee = min;
            clamp = Some(FeeClamp::RaisedToMinimum);
        }
    }
    if let Some(max) = policy.maximum_fee {
        if fee > max {
            fee = max;
            clamp = Some(FeeClamp::CappedAtMaximum);
        }
    }

    ResolvedFee {
        amount: round_currency(fee),
        raw_amount: raw,
        source: FeeSource::Catalog,
        clamp,
    }
}

/// Caller-supplied fee. Never clamped.
pub fn resolve_override_fee(
    principal: Money,
    amount: Money,
    kind: FeeOverrideKind,
) -> EmiCalcResult<ResolvedFee> {
    if amount < Decimal::ZERO {
        return Err(EmiCalcError::invalid(
            "fee_override_amount",
            "Custom fee cannot be negative",
        ));
    }
    let raw = match kind {
        FeeOverrideKind::Fixed => amount,
        FeeOverrideKind::Percentage => share_of(principal, amount),
    };
    Ok(ResolvedFee {
        amount: round_currency(raw),
        raw_amount: raw,
        source: FeeSource::Override,
        clamp: None,
    })
}

/// Fee for a full specification: the override wins, otherwise the catalog is queried.
pub fn resolve_fee(spec: &LoanSpecification, catalog: &FeeCatalog) -> EmiCalcResult<ResolvedFee> {
    match spec.fee_override() {
        Some((amount, kind)) => resolve_override_fee(spec.principal, amount, kind),
        None => {
            let policy = catalog.lookup(&spec.bank_reference)?;
            Ok(resolve_policy_fee(spec.principal, policy))
        }
    }
}
