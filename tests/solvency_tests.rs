//! Solvency invariant tests.
//!
//! These verify the invariants that keep the protocol solvent under any
//! sequence of operations: the LTV bound, non-negative custody pools,
//! conservation of funds across borrow/repay cycles, clamped repayment,
//! and unique sub-account identities.

use std::collections::HashSet;

use margin_core::*;
use proptest::prelude::*;
use rust_decimal_macros::dec;

const OWNER: ParticipantId = ParticipantId(0);
const ALICE: ParticipantId = ParticipantId(1);

fn usdc(units: u64) -> u128 {
    units as u128 * 10u128.pow(6)
}

fn eth(units: u64) -> u128 {
    units as u128 * 10u128.pow(18)
}

fn unit_price_ledger() -> Ledger {
    let prices = FixedPriceSource::new()
        .with_price(AssetKind::Usdc, FixedPoint::one())
        .with_price(AssetKind::Eth, FixedPoint::one());
    let mut ledger = Ledger::with_price_source(OWNER, LedgerConfig::default(), Box::new(prices));
    ledger.initialize(OWNER, 50, 2).unwrap();
    ledger
        .deposit_treasury_funds(OWNER, AssetKind::Usdc, usdc(1_000_000))
        .unwrap();
    ledger
        .deposit_treasury_funds(OWNER, AssetKind::Eth, eth(1_000))
        .unwrap();
    ledger
}

proptest! {
    /// After any successful operation the account satisfies
    /// debt value <= max LTV * collateral value. Failed operations must
    /// leave the ratio untouched, so the bound holds at every step.
    #[test]
    fn ltv_bound_holds_under_any_operation_sequence(
        ops in proptest::collection::vec((0u8..4, 1u64..200), 1..40),
    ) {
        let mut ledger = unit_price_ledger();
        ledger.register(ALICE).unwrap();
        ledger.deposit_collateral(ALICE, AssetKind::Usdc, usdc(500)).unwrap();

        let max_ltv = FixedPoint::from_decimal(dec!(0.5));
        for (op, units) in ops {
            let _ = match op {
                0 => ledger.deposit_collateral(ALICE, AssetKind::Usdc, usdc(units)),
                1 => ledger.borrow(ALICE, AssetKind::Eth, eth(units)).map(|_| ()),
                2 => ledger.repay(ALICE, AssetKind::Eth, eth(units)).map(|_| ()),
                _ => ledger.withdraw_collateral(ALICE, AssetKind::Usdc, usdc(units)),
            };

            let ltv = ledger.ltv(ALICE).unwrap();
            prop_assert!(
                ltv_acceptable(ltv, max_ltv),
                "ltv {} breached the 0.5 bound after op {}",
                ltv,
                op
            );
        }
    }

    /// Custody pool plus vault holdings of the borrowed kind are conserved
    /// across any borrow/repay interleaving, and the pool never goes
    /// negative (a too-large borrow fails with no state change).
    #[test]
    fn pool_is_conserved_and_never_negative(
        ops in proptest::collection::vec((proptest::bool::ANY, 1u64..300), 1..40),
    ) {
        let mut ledger = unit_price_ledger();
        ledger.register(ALICE).unwrap();
        // deep collateral so only treasury depth limits borrowing
        ledger.deposit_collateral(ALICE, AssetKind::Usdc, usdc(100_000)).unwrap();

        let initial = ledger.pool_balance(AssetKind::Eth).unwrap();

        for (is_borrow, units) in ops {
            let _ = if is_borrow {
                ledger.borrow(ALICE, AssetKind::Eth, eth(units)).map(|_| ())
            } else {
                ledger.repay(ALICE, AssetKind::Eth, eth(units)).map(|_| ())
            };

            let pool = ledger.pool_balance(AssetKind::Eth).unwrap();
            let vault = ledger.vault_balance(ALICE, AssetKind::Eth).unwrap();
            prop_assert!(pool.value() >= rust_decimal::Decimal::ZERO);
            prop_assert_eq!(pool.add(vault), initial, "pool {} + vault {} drifted", pool, vault);
        }
    }

    /// Repaying at least the outstanding debt zeroes it and debits the
    /// vault by exactly the outstanding amount, never more.
    #[test]
    fn repay_clamps_and_never_overdebits(
        borrow_units in 1u64..400,
        extra_units in 0u64..400,
    ) {
        let mut ledger = unit_price_ledger();
        ledger.register(ALICE).unwrap();
        ledger.deposit_collateral(ALICE, AssetKind::Usdc, usdc(1_000)).unwrap();
        ledger.borrow(ALICE, AssetKind::Eth, eth(borrow_units)).unwrap();

        let vault_before = ledger.vault_balance(ALICE, AssetKind::Eth).unwrap();
        let receipt = ledger
            .repay(ALICE, AssetKind::Eth, eth(borrow_units + extra_units))
            .unwrap();

        prop_assert_eq!(receipt.repaid, FixedPoint::from_raw(eth(borrow_units), 18).unwrap());
        prop_assert!(receipt.remaining_debt.is_zero());
        prop_assert_eq!(
            ledger.vault_balance(ALICE, AssetKind::Eth).unwrap(),
            vault_before.checked_sub(receipt.repaid).unwrap()
        );
        prop_assert_eq!(
            ledger.pool_balance(AssetKind::Eth).unwrap().value(),
            dec!(1000)
        );
    }

    /// Depositing then withdrawing the same amount with no debt restores
    /// the vault balance exactly.
    #[test]
    fn deposit_withdraw_round_trip(amount_units in 1u64..100_000) {
        let mut ledger = unit_price_ledger();
        ledger.register(ALICE).unwrap();

        let before = ledger.vault_balance(ALICE, AssetKind::Usdc).unwrap();
        ledger.deposit_collateral(ALICE, AssetKind::Usdc, usdc(amount_units)).unwrap();
        ledger.withdraw_collateral(ALICE, AssetKind::Usdc, usdc(amount_units)).unwrap();

        prop_assert_eq!(ledger.vault_balance(ALICE, AssetKind::Usdc).unwrap(), before);
    }

    /// Every registration mints a distinct sub-account identity.
    #[test]
    fn vault_identities_are_unique(count in 1usize..50) {
        let mut ledger = unit_price_ledger();

        let mut seen = HashSet::new();
        for i in 0..count {
            let vault = ledger.register(ParticipantId(100 + i as u64)).unwrap();
            prop_assert!(seen.insert(vault), "duplicate vault identity at registration {}", i);
        }
        prop_assert_eq!(ledger.protocol().unwrap().nonce(), count as u128);
    }
}
