// Price source integration.
//
// The valuation engine is agnostic to where unit prices come from. Anything
// that can quote a whitelisted asset kind implements PriceSource; the ledger
// ships with a fixed-constant implementation as a stand-in. Fixed prices are
// a known limitation, not a design target: a real deployment substitutes a
// live feed behind the same trait.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::fixed::FixedPoint;
use crate::types::AssetKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PriceError {
    #[error("no price available for {0}")]
    Unavailable(AssetKind),
}

/// Quotes the value of one unit of an asset kind in the common valuation
/// unit. Send + Sync so a ledger holding a source can live behind a lock.
pub trait PriceSource: Send + Sync {
    fn unit_price(&self, kind: AssetKind) -> Result<FixedPoint, PriceError>;
}

/// Constant per-kind prices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedPriceSource {
    prices: HashMap<AssetKind, FixedPoint>,
}

impl FixedPriceSource {
    pub fn new() -> Self {
        Self {
            prices: HashMap::new(),
        }
    }

    pub fn with_price(mut self, kind: AssetKind, price: FixedPoint) -> Self {
        self.prices.insert(kind, price);
        self
    }

    pub fn set_price(&mut self, kind: AssetKind, price: FixedPoint) {
        self.prices.insert(kind, price);
    }
}

impl Default for FixedPriceSource {
    fn default() -> Self {
        use rust_decimal_macros::dec;
        Self::new()
            .with_price(AssetKind::Usdc, FixedPoint::one())
            .with_price(AssetKind::Eth, FixedPoint::from_decimal(dec!(2000)))
    }
}

impl PriceSource for FixedPriceSource {
    fn unit_price(&self, kind: AssetKind) -> Result<FixedPoint, PriceError> {
        self.prices
            .get(&kind)
            .copied()
            .ok_or(PriceError::Unavailable(kind))
    }
}
