// 11.0: every state change produces an event. used for audit trails, state
// reconstruction, and notifying external systems. EventPayload lists them all.

use serde::{Deserialize, Serialize};

use crate::fixed::FixedPoint;
use crate::types::{AssetKind, ParticipantId, Timestamp, VaultId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub u64);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub timestamp: Timestamp,
    pub payload: EventPayload,
}

impl Event {
    pub fn new(id: EventId, timestamp: Timestamp, payload: EventPayload) -> Self {
        Self {
            id,
            timestamp,
            payload,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventPayload {
    // Protocol events
    Initialized(InitializedEvent),
    AccountRegistered(AccountRegisteredEvent),
    TreasuryDeposit(TreasuryDepositEvent),

    // Debt events
    Borrowed(BorrowedEvent),
    BorrowRejected(BorrowRejectedEvent),
    Repaid(RepaidEvent),

    // Collateral events
    CollateralDeposited(CollateralDepositedEvent),
    CollateralWithdrawn(CollateralWithdrawnEvent),
    WithdrawalRejected(WithdrawalRejectedEvent),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializedEvent {
    pub owner: ParticipantId,
    pub max_ltv: FixedPoint,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRegisteredEvent {
    pub participant: ParticipantId,
    pub vault: VaultId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreasuryDepositEvent {
    pub kind: AssetKind,
    pub amount: FixedPoint,
    pub pool_balance: FixedPoint,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowedEvent {
    pub participant: ParticipantId,
    pub kind: AssetKind,
    pub amount: FixedPoint,
    pub new_debt: FixedPoint,
    pub ltv: FixedPoint,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowRejectedEvent {
    pub participant: ParticipantId,
    pub kind: AssetKind,
    pub amount: FixedPoint,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepaidEvent {
    pub participant: ParticipantId,
    pub kind: AssetKind,
    pub requested: FixedPoint,
    pub repaid: FixedPoint,
    pub remaining_debt: FixedPoint,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollateralDepositedEvent {
    pub participant: ParticipantId,
    pub kind: AssetKind,
    pub amount: FixedPoint,
    pub vault_balance: FixedPoint,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollateralWithdrawnEvent {
    pub participant: ParticipantId,
    pub kind: AssetKind,
    pub amount: FixedPoint,
    pub vault_balance: FixedPoint,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawalRejectedEvent {
    pub participant: ParticipantId,
    pub kind: AssetKind,
    pub amount: FixedPoint,
    pub reason: String,
}
