//! Capability tokens and sub-account identity derivation.
//!
//! A `VaultAuthority` grants "act as this vault" rights without exposing any
//! master credential. Authorities are issued exactly once when a sub-account
//! is minted and cannot be constructed outside the crate or re-derived from
//! public data. Vault identities themselves are pure functions of the
//! protocol identity, a monotone nonce, and a domain-separation tag, so they
//! never collide with identities from any other derivation namespace.

use sha2::{Digest, Sha256};

use crate::types::{ParticipantId, VaultId};

// Domain-separation tag for vault sub-account identities.
const VAULT_DOMAIN_TAG: &[u8] = b"margin-core/vault-sub-account/v1";

/// Derive the identity of the `nonce`-th sub-account minted by `protocol`.
pub fn derive_vault_id(protocol: ParticipantId, nonce: u128) -> VaultId {
    let mut hasher = Sha256::new();
    hasher.update(VAULT_DOMAIN_TAG);
    hasher.update(protocol.0.to_be_bytes());
    hasher.update(nonce.to_be_bytes());
    VaultId(hasher.finalize().into())
}

/// Capability held by the protocol configuration to mint new sub-accounts.
#[derive(Debug)]
pub struct MintingAuthority {
    protocol: ParticipantId,
}

impl MintingAuthority {
    pub(crate) fn new(protocol: ParticipantId) -> Self {
        Self { protocol }
    }

    pub(crate) fn derive(&self, nonce: u128) -> VaultId {
        derive_vault_id(self.protocol, nonce)
    }
}

/// Capability to act as one specific vault. Clonable only so the ledger can
/// delegate it to the trading gateway; the constructor stays crate-private.
#[derive(Debug, Clone)]
pub struct VaultAuthority {
    vault: VaultId,
}

impl VaultAuthority {
    pub(crate) fn new(vault: VaultId) -> Self {
        Self { vault }
    }

    pub fn vault(&self) -> VaultId {
        self.vault
    }
}
