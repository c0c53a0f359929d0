//! Loan-to-value valuation.
//!
//! Total collateral value and total debt value are each summed over the
//! whitelist; each kind is valued against its own vault balance and its own
//! debt record. Borrowed funds are credited into the vault, so a kind's
//! balance is netted against that kind's outstanding debt before it counts
//! as collateral: an asset cannot collateralize its own loan. The final
//! ratio divides with round-up, so truncated precision always reports a
//! higher LTV and the gate errs strict.

use serde::{Deserialize, Serialize};

use crate::account::MarginAccount;
use crate::fixed::FixedPoint;
use crate::price::{PriceError, PriceSource};
use crate::types::AssetKind;
use crate::vault::CollateralVault;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LtvBreakdown {
    pub collateral_value: FixedPoint,
    pub debt_value: FixedPoint,
    pub ltv: FixedPoint,
}

/// Value of the vault's holdings that can support debt: per kind,
/// balance net of that kind's own outstanding debt.
pub fn collateral_value(
    vault: &CollateralVault,
    account: &MarginAccount,
    prices: &dyn PriceSource,
) -> Result<FixedPoint, PriceError> {
    let mut total = FixedPoint::zero();
    for kind in AssetKind::WHITELIST {
        let net = vault.balance(kind).saturating_sub(account.debt(kind));
        total = total.add(net.mul(prices.unit_price(kind)?));
    }
    Ok(total)
}

pub fn debt_value(
    account: &MarginAccount,
    prices: &dyn PriceSource,
) -> Result<FixedPoint, PriceError> {
    let mut total = FixedPoint::zero();
    for kind in AssetKind::WHITELIST {
        total = total.add(account.debt(kind).mul(prices.unit_price(kind)?));
    }
    Ok(total)
}

/// debt / collateral with round-up division. Zero collateral is LTV zero
/// when there is no debt and the unbounded sentinel otherwise.
pub fn compute_ltv(debt_value: FixedPoint, collateral_value: FixedPoint) -> FixedPoint {
    if collateral_value.is_zero() {
        if debt_value.is_zero() {
            FixedPoint::zero()
        } else {
            FixedPoint::max_value()
        }
    } else {
        debt_value.div_up(collateral_value)
    }
}

/// The gate: acceptable iff max_ltv >= ltv.
pub fn ltv_acceptable(ltv: FixedPoint, max_ltv: FixedPoint) -> bool {
    max_ltv >= ltv
}

pub fn breakdown(
    vault: &CollateralVault,
    account: &MarginAccount,
    prices: &dyn PriceSource,
) -> Result<LtvBreakdown, PriceError> {
    let collateral_value = collateral_value(vault, account, prices)?;
    let debt_value = debt_value(account, prices)?;
    Ok(LtvBreakdown {
        collateral_value,
        debt_value,
        ltv: compute_ltv(debt_value, collateral_value),
    })
}
