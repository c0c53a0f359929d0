// 7.0 config.rs: protocol configuration and crate settings in one place.
//
// ProtocolConfig is the protocol singleton: max LTV, minting authority, nonce.
// It is an explicitly passed handle owned by the Ledger, never ambient global
// state, so tests can construct isolated instances. LedgerConfig is the
// process-level knobs (audit log size, verbosity).

use serde::{Deserialize, Serialize};

use crate::authority::{MintingAuthority, VaultAuthority};
use crate::fixed::FixedPoint;
use crate::types::{ParticipantId, VaultId};

/// Singleton protocol state, created once by `Ledger::initialize`.
#[derive(Debug)]
pub struct ProtocolConfig {
    owner: ParticipantId,
    max_ltv: FixedPoint,
    minting_authority: MintingAuthority,
    nonce: u128,
}

impl ProtocolConfig {
    pub(crate) fn new(owner: ParticipantId, max_ltv: FixedPoint) -> Self {
        Self {
            owner,
            max_ltv,
            minting_authority: MintingAuthority::new(owner),
            nonce: 0,
        }
    }

    pub fn owner(&self) -> ParticipantId {
        self.owner
    }

    pub fn max_ltv(&self) -> FixedPoint {
        self.max_ltv
    }

    pub fn nonce(&self) -> u128 {
        self.nonce
    }

    /// Mint the next sub-account: derive its identity from the protocol
    /// identity and the current nonce, bump the nonce, and issue the
    /// one-time act-as capability for the new vault.
    pub(crate) fn mint_sub_account(&mut self) -> (VaultId, VaultAuthority) {
        let vault = self.minting_authority.derive(self.nonce);
        self.nonce += 1;
        (vault, VaultAuthority::new(vault))
    }
}

/// A max LTV is usable iff it sits in (0, 1].
pub fn is_valid_max_ltv(value: &FixedPoint) -> bool {
    !value.is_zero() && *value <= FixedPoint::one()
}

/// Crate-level settings, distinct from the protocol singleton.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    // print events as they are emitted
    pub verbose: bool,
    // bound on the retained audit log
    pub max_events: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            max_events: 10_000,
        }
    }
}

impl LedgerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_events == 0 {
            return Err(ConfigError::InvalidEventCapacity {
                reason: "audit log must retain at least one event".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidEventCapacity { reason: String },
}
