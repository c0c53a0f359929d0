//! Collateral vaults.
//!
//! One vault per registered participant, holding that participant's deposited
//! collateral per asset kind. Credits always succeed; debits fail rather than
//! let a balance go negative.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::fixed::FixedPoint;
use crate::types::{AssetKind, VaultId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollateralVault {
    pub id: VaultId,
    balances: HashMap<AssetKind, FixedPoint>,
}

impl CollateralVault {
    pub fn new(id: VaultId) -> Self {
        Self {
            id,
            balances: HashMap::new(),
        }
    }

    pub fn balance(&self, kind: AssetKind) -> FixedPoint {
        self.balances.get(&kind).copied().unwrap_or_else(FixedPoint::zero)
    }

    pub fn credit(&mut self, kind: AssetKind, amount: FixedPoint) {
        let entry = self.balances.entry(kind).or_insert_with(FixedPoint::zero);
        *entry = entry.add(amount);
    }

    pub fn debit(&mut self, kind: AssetKind, amount: FixedPoint) -> Result<(), VaultError> {
        let available = self.balance(kind);
        let remaining = available
            .checked_sub(amount)
            .ok_or(VaultError::InsufficientFunds {
                kind,
                requested: amount,
                available,
            })?;
        self.balances.insert(kind, remaining);
        Ok(())
    }

    /// Reverse a prior credit of the same amount. Clamps at zero, so a
    /// compensation step can never fail mid-rollback.
    pub(crate) fn revert_credit(&mut self, kind: AssetKind, amount: FixedPoint) {
        let remaining = self.balance(kind).saturating_sub(amount);
        self.balances.insert(kind, remaining);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum VaultError {
    #[error("{kind}: requested {requested}, available {available}")]
    InsufficientFunds {
        kind: AssetKind,
        requested: FixedPoint,
        available: FixedPoint,
    },
}
