// 1.0: all the primitives live here. nothing in the ledger works without these types.
// IDs, asset kinds, order sides, timestamps. each is a newtype so the compiler catches type mixups.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticipantId(pub u64);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "participant-{}", self.0)
    }
}

// 1.1: identity of a collateral vault sub-account. derived, never chosen by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VaultId(pub [u8; 32]);

impl fmt::Display for VaultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // short hex prefix is enough to tell vaults apart in logs
        for byte in &self.0[..8] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

// 1.2: known asset kinds. the protocol whitelist is a strict subset: only
// the stablecoin kind and the native-chain kind can be lent or held as collateral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Usdc,
    Eth,
    Usdt,
    Btc,
}

impl AssetKind {
    pub const WHITELIST: [AssetKind; 2] = [AssetKind::Usdc, AssetKind::Eth];

    pub fn is_whitelisted(&self) -> bool {
        Self::WHITELIST.contains(self)
    }

    pub fn decimals(&self) -> u32 {
        match self {
            AssetKind::Usdc => 6,
            AssetKind::Eth => 18,
            AssetKind::Usdt => 6,
            AssetKind::Btc => 8,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            AssetKind::Usdc => "USDC",
            AssetKind::Eth => "ETH",
            AssetKind::Usdt => "USDT",
            AssetKind::Btc => "BTC",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// 1.3: venue order side. Buy takes the ask, Sell hits the bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn opposite(&self) -> Self {
        match self {
            OrderSide::Buy => OrderSide::Sell,
            OrderSide::Sell => OrderSide::Buy,
        }
    }
}

// 1.4: millisecond timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp_millis())
    }

    pub fn from_millis(ms: i64) -> Self {
        Self(ms)
    }

    pub fn as_millis(&self) -> i64 {
        self.0
    }
}
