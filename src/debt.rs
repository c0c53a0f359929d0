//! Per-account, per-asset-kind debt records.

use serde::{Deserialize, Serialize};

use crate::fixed::FixedPoint;
use crate::types::AssetKind;

/// Outstanding borrowed amount for one asset kind. Created at registration
/// with a zero amount; the amount is monotone non-negative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtRecord {
    pub kind: AssetKind,
    amount: FixedPoint,
}

impl DebtRecord {
    pub fn new(kind: AssetKind) -> Self {
        Self {
            kind,
            amount: FixedPoint::zero(),
        }
    }

    pub fn amount(&self) -> FixedPoint {
        self.amount
    }

    pub fn increase(&mut self, amount: FixedPoint) {
        self.amount = self.amount.add(amount);
    }

    /// Pays down at most the outstanding amount; overpayment is not banked.
    /// Returns what was actually repaid.
    pub fn repay(&mut self, requested: FixedPoint) -> FixedPoint {
        let repaid = requested.min(self.amount);
        self.amount = self.amount.saturating_sub(repaid);
        repaid
    }
}
