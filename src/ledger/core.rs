// 8.0 ledger/core.rs: main ledger struct. holds the protocol singleton,
// accounts, vaults, custody pools, price source, and the audit log.

use std::collections::HashMap;
use std::fmt;

use super::results::LedgerError;
use crate::account::MarginAccount;
use crate::config::{LedgerConfig, ProtocolConfig};
use crate::events::{Event, EventId, EventPayload};
use crate::fixed::FixedPoint;
use crate::price::{FixedPriceSource, PriceSource};
use crate::treasury::CustodyPool;
use crate::types::{AssetKind, ParticipantId, Timestamp, VaultId};
use crate::valuation::{self, LtvBreakdown};
use crate::vault::CollateralVault;

/** 8.1: all state lives here. one instance per deployment */
pub struct Ledger {
    pub(super) owner: ParticipantId,
    pub(super) config: LedgerConfig,
    pub(super) protocol: Option<ProtocolConfig>,
    pub(super) accounts: HashMap<ParticipantId, MarginAccount>,
    pub(super) vaults: HashMap<VaultId, CollateralVault>,
    pub(super) pools: HashMap<AssetKind, CustodyPool>,
    pub(super) price_source: Box<dyn PriceSource>,
    pub(super) events: Vec<Event>,
    pub(super) next_event_id: u64,
    pub(super) current_time: Timestamp,
}

impl Ledger {
    /// `owner` is the designated protocol owner identity; only it may
    /// initialize the configuration and seed treasury funds.
    pub fn new(owner: ParticipantId, config: LedgerConfig) -> Self {
        Self::with_price_source(owner, config, Box::new(FixedPriceSource::default()))
    }

    pub fn with_price_source(
        owner: ParticipantId,
        config: LedgerConfig,
        price_source: Box<dyn PriceSource>,
    ) -> Self {
        let pools = AssetKind::WHITELIST
            .iter()
            .map(|&kind| (kind, CustodyPool::new(kind)))
            .collect();
        Self {
            owner,
            config,
            protocol: None,
            accounts: HashMap::new(),
            vaults: HashMap::new(),
            pools,
            price_source,
            events: Vec::new(),
            next_event_id: 1,
            current_time: Timestamp::from_millis(0),
        }
    }

    pub fn set_time(&mut self, timestamp: Timestamp) {
        self.current_time = timestamp;
    }

    pub fn time(&self) -> Timestamp {
        self.current_time
    }

    pub fn advance_time(&mut self, millis: i64) {
        self.current_time = Timestamp::from_millis(self.current_time.as_millis() + millis);
    }

    pub fn owner(&self) -> ParticipantId {
        self.owner
    }

    pub fn protocol(&self) -> Option<&ProtocolConfig> {
        self.protocol.as_ref()
    }

    pub fn assert_initialized(&self) -> Result<&ProtocolConfig, LedgerError> {
        self.protocol.as_ref().ok_or(LedgerError::NotInitialized)
    }

    pub fn max_ltv(&self) -> Result<FixedPoint, LedgerError> {
        Ok(self.assert_initialized()?.max_ltv())
    }

    pub fn is_registered(&self, participant: ParticipantId) -> bool {
        self.accounts.contains_key(&participant)
    }

    pub fn account(&self, participant: ParticipantId) -> Option<&MarginAccount> {
        self.accounts.get(&participant)
    }

    pub fn vault(&self, vault: VaultId) -> Option<&CollateralVault> {
        self.vaults.get(&vault)
    }

    /// Vault balance of one kind for a registered participant.
    pub fn vault_balance(
        &self,
        participant: ParticipantId,
        kind: AssetKind,
    ) -> Option<FixedPoint> {
        let account = self.accounts.get(&participant)?;
        Some(self.vaults.get(&account.vault)?.balance(kind))
    }

    /// Custody pool balance; None for a kind outside the whitelist.
    pub fn pool_balance(&self, kind: AssetKind) -> Option<FixedPoint> {
        self.pools.get(&kind).map(CustodyPool::balance)
    }

    /// Sum of outstanding debt in one kind across all accounts.
    pub fn total_outstanding_debt(&self, kind: AssetKind) -> FixedPoint {
        self.accounts.values().map(|a| a.debt(kind)).sum()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn recent_events(&self, count: usize) -> &[Event] {
        let start = self.events.len().saturating_sub(count);
        &self.events[start..]
    }

    // pools for whitelisted kinds are created in with_price_source; callers
    // must check the whitelist before reaching for a pool
    pub(super) fn pool_mut(&mut self, kind: AssetKind) -> &mut CustodyPool {
        self.pools
            .get_mut(&kind)
            .expect("custody pool exists for every whitelisted kind")
    }

    pub(super) fn account_checked(
        &self,
        participant: ParticipantId,
    ) -> Result<&MarginAccount, LedgerError> {
        self.accounts
            .get(&participant)
            .ok_or(LedgerError::NotRegistered(participant))
    }

    pub(super) fn account_checked_mut(
        &mut self,
        participant: ParticipantId,
    ) -> Result<&mut MarginAccount, LedgerError> {
        self.accounts
            .get_mut(&participant)
            .ok_or(LedgerError::NotRegistered(participant))
    }

    // vaults are created together with their account at registration
    pub(super) fn vault_mut(&mut self, vault: VaultId) -> &mut CollateralVault {
        self.vaults
            .get_mut(&vault)
            .expect("vault exists for every registered account")
    }

    pub(super) fn breakdown_for(
        &self,
        participant: ParticipantId,
    ) -> Result<LtvBreakdown, LedgerError> {
        let account = self.account_checked(participant)?;
        let vault = self
            .vaults
            .get(&account.vault)
            .expect("vault exists for every registered account");
        Ok(valuation::breakdown(vault, account, self.price_source.as_ref())?)
    }

    pub(super) fn require_whitelisted(kind: AssetKind) -> Result<(), LedgerError> {
        if kind.is_whitelisted() {
            Ok(())
        } else {
            Err(LedgerError::InvalidAssetKind(kind))
        }
    }

    pub(super) fn emit_event(&mut self, payload: EventPayload) {
        let event = Event::new(EventId(self.next_event_id), self.current_time, payload);
        self.next_event_id += 1;

        if self.config.verbose {
            println!("[Event {}] {:?}", event.id.0, event.payload);
        }

        self.events.push(event);

        if self.events.len() > self.config.max_events {
            let drain_count = self.events.len() - self.config.max_events;
            self.events.drain(0..drain_count);
        }
    }
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("owner", &self.owner)
            .field("initialized", &self.protocol.is_some())
            .field("accounts", &self.accounts.len())
            .field("pools", &self.pools)
            .field("events", &self.events.len())
            .finish_non_exhaustive()
    }
}
