// 8.0.2: result types and errors for ledger operations.

use serde::{Deserialize, Serialize};

use crate::fixed::{FixedPoint, FixedPointError};
use crate::price::PriceError;
use crate::treasury::TreasuryError;
use crate::types::{AssetKind, ParticipantId, VaultId};
use crate::valuation::LtvBreakdown;
use crate::vault::VaultError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("caller is not authorized for this operation")]
    NotAuthorized,

    #[error("protocol configuration already initialized")]
    AlreadyInitialized,

    #[error("{0} is already registered")]
    AlreadyRegistered(ParticipantId),

    #[error("protocol configuration is not initialized")]
    NotInitialized,

    #[error("{0} is not registered")]
    NotRegistered(ParticipantId),

    #[error("asset kind {0} is not whitelisted")]
    InvalidAssetKind(AssetKind),

    #[error("invalid parameter: {reason}")]
    InvalidParameter { reason: String },

    #[error("insufficient treasury funds: {0}")]
    InsufficientTreasuryFunds(#[from] TreasuryError),

    #[error("insufficient vault funds: {0}")]
    InsufficientVaultFunds(#[from] VaultError),

    #[error("loan-to-value {ltv} exceeds maximum {max_ltv}")]
    LtvExceeded {
        ltv: FixedPoint,
        max_ltv: FixedPoint,
    },

    #[error("price unavailable: {0}")]
    PriceUnavailable(#[from] PriceError),

    #[error("fixed-point conversion failed: {0}")]
    PrecisionLoss(#[from] FixedPointError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowReceipt {
    pub kind: AssetKind,
    pub amount: FixedPoint,
    pub new_debt: FixedPoint,
    pub ltv: FixedPoint,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepayReceipt {
    pub kind: AssetKind,
    pub requested: FixedPoint,
    pub repaid: FixedPoint,
    pub remaining_debt: FixedPoint,
}

/// Read model over one account: balances, debts, and current valuation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSummary {
    pub participant: ParticipantId,
    pub vault: VaultId,
    pub balances: Vec<(AssetKind, FixedPoint)>,
    pub debts: Vec<(AssetKind, FixedPoint)>,
    pub valuation: LtvBreakdown,
}
