//! Collateralized Borrowing Ledger Simulation.
//!
//! Demonstrates the full ledger lifecycle including treasury seeding,
//! registration, collateralized borrowing against the LTV gate, clamped
//! repayment, guarded withdrawal, and delegated trading.

use margin_core::*;
use rust_decimal_macros::dec;

fn main() {
    println!("Collateralized Borrowing Ledger Simulation");
    println!("Two Asset Kinds, Single Protocol-Wide Max LTV\n");

    scenario_1_bootstrap_and_borrow();
    scenario_2_ltv_gate();
    scenario_3_repay_and_withdraw();
    scenario_4_delegated_trading();
    scenario_5_audit_trail();

    println!("\nAll simulations completed successfully.");
}

fn usdc(units: u64) -> u128 {
    units as u128 * 10u128.pow(AssetKind::Usdc.decimals())
}

fn eth(units: u64) -> u128 {
    units as u128 * 10u128.pow(AssetKind::Eth.decimals())
}

fn demo_ledger() -> Ledger {
    // USDC at 1, ETH at 2000
    let owner = ParticipantId(0);
    let mut ledger = Ledger::new(owner, LedgerConfig::default());
    ledger.initialize(owner, 50, 2).unwrap(); // max LTV 0.50
    ledger
        .deposit_treasury_funds(owner, AssetKind::Usdc, usdc(1_000_000))
        .unwrap();
    ledger
        .deposit_treasury_funds(owner, AssetKind::Eth, eth(500))
        .unwrap();
    ledger
}

/// Seed the treasury, register, deposit collateral, borrow within the gate.
fn scenario_1_bootstrap_and_borrow() {
    println!("Scenario 1: Bootstrap and Borrow\n");

    let mut ledger = demo_ledger();
    let alice = ParticipantId(1);

    let vault = ledger.register(alice).unwrap();
    println!("  Alice registered, vault {vault}");

    ledger
        .deposit_collateral(alice, AssetKind::Eth, eth(10))
        .unwrap();
    println!("  Alice deposits 10 ETH ($20,000 collateral)");

    let receipt = ledger.borrow(alice, AssetKind::Usdc, usdc(8_000)).unwrap();
    println!(
        "  Alice borrows 8,000 USDC, debt {} USDC, LTV {}",
        receipt.new_debt, receipt.ltv
    );

    let summary = ledger.account_summary(alice).unwrap();
    println!(
        "  Collateral value ${}, debt value ${}\n",
        summary.valuation.collateral_value, summary.valuation.debt_value
    );
}

/// The gate rejects a borrow that would push LTV past the maximum,
/// rolling every mutation back.
fn scenario_2_ltv_gate() {
    println!("Scenario 2: LTV Gate\n");

    let mut ledger = demo_ledger();
    let bob = ParticipantId(2);

    ledger.register(bob).unwrap();
    ledger
        .deposit_collateral(bob, AssetKind::Eth, eth(10))
        .unwrap();
    ledger.borrow(bob, AssetKind::Usdc, usdc(8_000)).unwrap();

    let pool_before = ledger.pool_balance(AssetKind::Usdc).unwrap();
    let result = ledger.borrow(bob, AssetKind::Usdc, usdc(4_000));
    println!("  Second borrow of 4,000 USDC: {result:?}");

    assert!(matches!(result, Err(LedgerError::LtvExceeded { .. })));
    assert_eq!(ledger.pool_balance(AssetKind::Usdc).unwrap(), pool_before);
    println!(
        "  Debt unchanged at {} USDC, pool restored\n",
        ledger.account(bob).unwrap().debt(AssetKind::Usdc)
    );
}

/// Overpaying a repayment clamps at the outstanding debt; withdrawal is
/// guarded by the same gate.
fn scenario_3_repay_and_withdraw() {
    println!("Scenario 3: Repay and Withdraw\n");

    let mut ledger = demo_ledger();
    let carol = ParticipantId(3);

    ledger.register(carol).unwrap();
    ledger
        .deposit_collateral(carol, AssetKind::Eth, eth(10))
        .unwrap();
    ledger.borrow(carol, AssetKind::Usdc, usdc(8_000)).unwrap();

    let receipt = ledger.repay(carol, AssetKind::Usdc, usdc(10_000)).unwrap();
    println!(
        "  Repay 10,000 against 8,000 debt: repaid {}, remaining {}",
        receipt.repaid, receipt.remaining_debt
    );

    ledger
        .withdraw_collateral(carol, AssetKind::Eth, eth(10))
        .unwrap();
    println!(
        "  With zero debt, all 10 ETH withdrawn, LTV {}\n",
        ledger.ltv(carol).unwrap()
    );
}

/// The gateway borrows the vault's delegated authority to trade.
fn scenario_4_delegated_trading() {
    println!("Scenario 4: Delegated Trading\n");

    let mut ledger = demo_ledger();
    let dave = ParticipantId(4);
    ledger.register(dave).unwrap();

    let mut gateway = TradingGateway::new(MockVenue::new(), 6);
    let order_id = gateway
        .trade(&ledger, dave, OrderSide::Buy, 2_000_000_000, 1_500_000)
        .unwrap();

    let order = &gateway.venue().orders()[0];
    println!(
        "  Order {order_id:?} placed as vault {}: {:?} {} @ {}",
        order.vault, order.side, order.quantity, order.price
    );
    assert_eq!(order.price.value(), dec!(2000));
    println!("  Ledger tracked no order state\n");
}

/// Every state change lands in the audit log.
fn scenario_5_audit_trail() {
    println!("Scenario 5: Audit Trail\n");

    let mut ledger = demo_ledger();
    let erin = ParticipantId(5);
    ledger.register(erin).unwrap();
    ledger
        .deposit_collateral(erin, AssetKind::Usdc, usdc(100))
        .unwrap();
    ledger.borrow(erin, AssetKind::Usdc, usdc(40)).unwrap();

    for event in ledger.recent_events(4) {
        println!("  [{}] {:?}", event.id.0, event.payload);
    }
}
