//! Protocol custody pools.
//!
//! One pool per whitelisted asset kind, holding the funds the protocol lends
//! out. Only borrow extracts from a pool and only treasury seeding and repay
//! return funds to it; participant collateral never passes through here.
//! A pool balance cannot go negative: extraction fails first.

use serde::{Deserialize, Serialize};

use crate::fixed::FixedPoint;
use crate::types::AssetKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustodyPool {
    pub kind: AssetKind,
    balance: FixedPoint,
}

impl CustodyPool {
    pub fn new(kind: AssetKind) -> Self {
        Self {
            kind,
            balance: FixedPoint::zero(),
        }
    }

    pub fn balance(&self) -> FixedPoint {
        self.balance
    }

    pub fn deposit(&mut self, amount: FixedPoint) {
        self.balance = self.balance.add(amount);
    }

    pub fn extract(&mut self, amount: FixedPoint) -> Result<(), TreasuryError> {
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(TreasuryError::InsufficientFunds {
                kind: self.kind,
                requested: amount,
                available: self.balance,
            })?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TreasuryError {
    #[error("{kind} pool: requested {requested}, available {available}")]
    InsufficientFunds {
        kind: AssetKind,
        requested: FixedPoint,
        available: FixedPoint,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn fp(v: rust_decimal::Decimal) -> FixedPoint {
        FixedPoint::from_decimal(v)
    }

    #[test]
    fn deposit_and_extract() {
        let mut pool = CustodyPool::new(AssetKind::Usdc);
        pool.deposit(fp(dec!(1000)));
        pool.extract(fp(dec!(400))).unwrap();
        assert_eq!(pool.balance().value(), dec!(600));
    }

    #[test]
    fn extract_beyond_balance_fails_cleanly() {
        let mut pool = CustodyPool::new(AssetKind::Eth);
        pool.deposit(fp(dec!(5)));

        let result = pool.extract(fp(dec!(6)));
        assert!(matches!(
            result,
            Err(TreasuryError::InsufficientFunds { .. })
        ));
        assert_eq!(pool.balance().value(), dec!(5));
    }

    #[test]
    fn extract_exact_balance_empties_pool() {
        let mut pool = CustodyPool::new(AssetKind::Usdc);
        pool.deposit(fp(dec!(7)));
        pool.extract(fp(dec!(7))).unwrap();
        assert!(pool.balance().is_zero());
    }
}
