//! Margin accounts.
//!
//! A margin account ties a participant to their dedicated collateral vault
//! and anchors the debt records created at registration. Registration is the
//! only place debt records come from; there is no account closure.

use std::collections::HashMap;

use crate::authority::VaultAuthority;
use crate::debt::DebtRecord;
use crate::fixed::FixedPoint;
use crate::types::{AssetKind, ParticipantId, Timestamp, VaultId};

#[derive(Debug, Clone)]
pub struct MarginAccount {
    pub owner: ParticipantId,
    pub vault: VaultId,
    // act-as capability over the vault, delegated to the gateway for trades
    authority: VaultAuthority,
    debts: HashMap<AssetKind, DebtRecord>,
    pub registered_at: Timestamp,
}

impl MarginAccount {
    pub fn new(
        owner: ParticipantId,
        vault: VaultId,
        authority: VaultAuthority,
        timestamp: Timestamp,
    ) -> Self {
        let debts = AssetKind::WHITELIST
            .iter()
            .map(|&kind| (kind, DebtRecord::new(kind)))
            .collect();
        Self {
            owner,
            vault,
            authority,
            debts,
            registered_at: timestamp,
        }
    }

    pub fn debt(&self, kind: AssetKind) -> FixedPoint {
        self.debts
            .get(&kind)
            .map(DebtRecord::amount)
            .unwrap_or_else(FixedPoint::zero)
    }

    // whitelisted kinds always have a record, created in new()
    pub(crate) fn debt_record_mut(&mut self, kind: AssetKind) -> &mut DebtRecord {
        self.debts
            .get_mut(&kind)
            .expect("debt record exists for every whitelisted kind")
    }

    pub(crate) fn delegated_authority(&self) -> VaultAuthority {
        self.authority.clone()
    }
}
