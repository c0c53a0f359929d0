//! Ledger entry points.
//!
//! Every operation checks, in order: asset kind whitelisted, protocol
//! initialized, caller registered (or owner, for admin calls), then runs its
//! own mutation. Each entry point commits all of its mutations or none of
//! them; the multi-step paths (borrow, withdraw) compensate in reverse order
//! when the late LTV gate trips.

use super::core::Ledger;
use super::results::{AccountSummary, BorrowReceipt, LedgerError, RepayReceipt};
use crate::account::MarginAccount;
use crate::authority::VaultAuthority;
use crate::config::{is_valid_max_ltv, ProtocolConfig};
use crate::events::{
    AccountRegisteredEvent, BorrowRejectedEvent, BorrowedEvent, CollateralDepositedEvent,
    CollateralWithdrawnEvent, EventPayload, InitializedEvent, RepaidEvent, TreasuryDepositEvent,
    WithdrawalRejectedEvent,
};
use crate::fixed::FixedPoint;
use crate::types::{AssetKind, ParticipantId, VaultId};
use crate::valuation;
use crate::vault::CollateralVault;

impl Ledger {
    /// Create the protocol configuration. Owner-only, once per deployment.
    pub fn initialize(
        &mut self,
        caller: ParticipantId,
        max_ltv_raw: u64,
        decimal_places: u32,
    ) -> Result<(), LedgerError> {
        if caller != self.owner {
            return Err(LedgerError::NotAuthorized);
        }
        if self.protocol.is_some() {
            return Err(LedgerError::AlreadyInitialized);
        }
        let max_ltv = FixedPoint::from_raw(max_ltv_raw as u128, decimal_places)?;
        if !is_valid_max_ltv(&max_ltv) {
            return Err(LedgerError::InvalidParameter {
                reason: format!("max LTV must be in (0, 1], got {max_ltv}"),
            });
        }

        self.protocol = Some(ProtocolConfig::new(self.owner, max_ltv));
        self.emit_event(EventPayload::Initialized(InitializedEvent {
            owner: self.owner,
            max_ltv,
        }));
        Ok(())
    }

    /// Register a participant: mint their collateral vault sub-account and
    /// create one zero debt record per whitelisted kind. The only place
    /// accounts and debt records are created.
    pub fn register(&mut self, participant: ParticipantId) -> Result<VaultId, LedgerError> {
        self.assert_initialized()?;
        if self.accounts.contains_key(&participant) {
            return Err(LedgerError::AlreadyRegistered(participant));
        }

        let (vault_id, authority) = self
            .protocol
            .as_mut()
            .ok_or(LedgerError::NotInitialized)?
            .mint_sub_account();

        self.vaults.insert(vault_id, CollateralVault::new(vault_id));
        let account = MarginAccount::new(participant, vault_id, authority, self.current_time);
        self.accounts.insert(participant, account);

        self.emit_event(EventPayload::AccountRegistered(AccountRegisteredEvent {
            participant,
            vault: vault_id,
        }));
        Ok(vault_id)
    }

    /// Seed lending liquidity into a custody pool. Owner-only; never part of
    /// any participant's collateral or debt.
    pub fn deposit_treasury_funds(
        &mut self,
        caller: ParticipantId,
        kind: AssetKind,
        raw_amount: u128,
    ) -> Result<(), LedgerError> {
        Self::require_whitelisted(kind)?;
        self.assert_initialized()?;
        if caller != self.owner {
            return Err(LedgerError::NotAuthorized);
        }
        let amount = FixedPoint::from_raw(raw_amount, kind.decimals())?;

        self.pool_mut(kind).deposit(amount);
        let pool_balance = self.pool_mut(kind).balance();
        self.emit_event(EventPayload::TreasuryDeposit(TreasuryDepositEvent {
            kind,
            amount,
            pool_balance,
        }));
        Ok(())
    }

    /// Move collateral from the participant's external holdings into their
    /// vault. No LTV check: added collateral can only improve the ratio.
    pub fn deposit_collateral(
        &mut self,
        participant: ParticipantId,
        kind: AssetKind,
        raw_amount: u128,
    ) -> Result<(), LedgerError> {
        Self::require_whitelisted(kind)?;
        self.assert_initialized()?;
        let vault_id = self.account_checked(participant)?.vault;
        let amount = FixedPoint::from_raw(raw_amount, kind.decimals())?;

        self.vault_mut(vault_id).credit(kind, amount);
        let vault_balance = self.vault_mut(vault_id).balance(kind);
        self.emit_event(EventPayload::CollateralDeposited(CollateralDepositedEvent {
            participant,
            kind,
            amount,
            vault_balance,
        }));
        Ok(())
    }

    /// Move collateral out of the vault, then re-check the gate. The debit is
    /// reversed if the withdrawal would leave the account over-leveraged.
    pub fn withdraw_collateral(
        &mut self,
        participant: ParticipantId,
        kind: AssetKind,
        raw_amount: u128,
    ) -> Result<(), LedgerError> {
        Self::require_whitelisted(kind)?;
        let max_ltv = self.assert_initialized()?.max_ltv();
        let vault_id = self.account_checked(participant)?.vault;
        let amount = FixedPoint::from_raw(raw_amount, kind.decimals())?;

        self.vault_mut(vault_id).debit(kind, amount)?;

        let breakdown = match self.breakdown_for(participant) {
            Ok(breakdown) => breakdown,
            Err(e) => {
                self.vault_mut(vault_id).credit(kind, amount);
                return Err(e);
            }
        };

        if !valuation::ltv_acceptable(breakdown.ltv, max_ltv) {
            self.vault_mut(vault_id).credit(kind, amount);
            self.emit_event(EventPayload::WithdrawalRejected(WithdrawalRejectedEvent {
                participant,
                kind,
                amount,
                reason: format!(
                    "loan-to-value {} would exceed maximum {max_ltv}",
                    breakdown.ltv
                ),
            }));
            return Err(LedgerError::LtvExceeded {
                ltv: breakdown.ltv,
                max_ltv,
            });
        }

        let vault_balance = self.vault_mut(vault_id).balance(kind);
        self.emit_event(EventPayload::CollateralWithdrawn(CollateralWithdrawnEvent {
            participant,
            kind,
            amount,
            vault_balance,
        }));
        Ok(())
    }

    /// Borrow from the custody pool against vault collateral: extract from
    /// the pool, credit the vault, increase the debt record, then run the
    /// gate. All three mutations roll back if the gate trips.
    pub fn borrow(
        &mut self,
        participant: ParticipantId,
        kind: AssetKind,
        raw_amount: u128,
    ) -> Result<BorrowReceipt, LedgerError> {
        Self::require_whitelisted(kind)?;
        let max_ltv = self.assert_initialized()?.max_ltv();
        let vault_id = self.account_checked(participant)?.vault;
        let amount = FixedPoint::from_raw(raw_amount, kind.decimals())?;

        self.pool_mut(kind).extract(amount)?;
        self.vault_mut(vault_id).credit(kind, amount);
        self.account_checked_mut(participant)?
            .debt_record_mut(kind)
            .increase(amount);

        let breakdown = match self.breakdown_for(participant) {
            Ok(breakdown) => breakdown,
            Err(e) => {
                self.rollback_borrow(participant, vault_id, kind, amount);
                return Err(e);
            }
        };

        if !valuation::ltv_acceptable(breakdown.ltv, max_ltv) {
            self.rollback_borrow(participant, vault_id, kind, amount);
            self.emit_event(EventPayload::BorrowRejected(BorrowRejectedEvent {
                participant,
                kind,
                amount,
                reason: format!(
                    "loan-to-value {} exceeds maximum {max_ltv}",
                    breakdown.ltv
                ),
            }));
            return Err(LedgerError::LtvExceeded {
                ltv: breakdown.ltv,
                max_ltv,
            });
        }

        let new_debt = self.account_checked(participant)?.debt(kind);
        self.emit_event(EventPayload::Borrowed(BorrowedEvent {
            participant,
            kind,
            amount,
            new_debt,
            ltv: breakdown.ltv,
        }));
        Ok(BorrowReceipt {
            kind,
            amount,
            new_debt,
            ltv: breakdown.ltv,
        })
    }

    /// Pay debt down from the vault. The repaid amount is clamped to the
    /// outstanding debt; the excess stays in the vault. No LTV check:
    /// repaying can only improve or maintain the ratio.
    pub fn repay(
        &mut self,
        participant: ParticipantId,
        kind: AssetKind,
        raw_amount: u128,
    ) -> Result<RepayReceipt, LedgerError> {
        Self::require_whitelisted(kind)?;
        self.assert_initialized()?;
        let account = self.account_checked(participant)?;
        let vault_id = account.vault;
        let outstanding = account.debt(kind);
        let requested = FixedPoint::from_raw(raw_amount, kind.decimals())?;
        let repaid = requested.min(outstanding);

        // vault debit runs first so an underfunded vault changes nothing
        if !repaid.is_zero() {
            self.vault_mut(vault_id).debit(kind, repaid)?;
            self.pool_mut(kind).deposit(repaid);
        }
        let remaining_debt = {
            let account = self.account_checked_mut(participant)?;
            account.debt_record_mut(kind).repay(repaid);
            account.debt(kind)
        };

        self.emit_event(EventPayload::Repaid(RepaidEvent {
            participant,
            kind,
            requested,
            repaid,
            remaining_debt,
        }));
        Ok(RepayReceipt {
            kind,
            requested,
            repaid,
            remaining_debt,
        })
    }

    /// Current loan-to-value for a registered account. Open to any caller.
    pub fn ltv(&self, participant: ParticipantId) -> Result<FixedPoint, LedgerError> {
        self.assert_initialized()?;
        Ok(self.breakdown_for(participant)?.ltv)
    }

    /// Balances, debts, and valuation for one account.
    pub fn account_summary(
        &self,
        participant: ParticipantId,
    ) -> Result<AccountSummary, LedgerError> {
        self.assert_initialized()?;
        let account = self.account_checked(participant)?;
        let vault = self
            .vaults
            .get(&account.vault)
            .expect("vault exists for every registered account");

        let balances = AssetKind::WHITELIST
            .iter()
            .map(|&kind| (kind, vault.balance(kind)))
            .collect();
        let debts = AssetKind::WHITELIST
            .iter()
            .map(|&kind| (kind, account.debt(kind)))
            .collect();
        let valuation = valuation::breakdown(vault, account, self.price_source.as_ref())?;

        Ok(AccountSummary {
            participant,
            vault: account.vault,
            balances,
            debts,
            valuation,
        })
    }

    /// Hand the participant's vault capability to a trading collaborator.
    pub fn delegated_authority(
        &self,
        participant: ParticipantId,
    ) -> Result<VaultAuthority, LedgerError> {
        self.assert_initialized()?;
        Ok(self.account_checked(participant)?.delegated_authority())
    }

    // compensate in reverse order of borrow's mutations
    fn rollback_borrow(
        &mut self,
        participant: ParticipantId,
        vault_id: VaultId,
        kind: AssetKind,
        amount: FixedPoint,
    ) {
        let account = self
            .accounts
            .get_mut(&participant)
            .expect("account checked before mutation");
        account.debt_record_mut(kind).repay(amount);
        self.vault_mut(vault_id).revert_credit(kind, amount);
        self.pool_mut(kind).deposit(amount);
    }
}
