// margin-core: collateralized borrowing ledger.
// solvency-first architecture: valuation and the LTV gate take priority.
// all computation is deterministic with no external I/O.
//
// file map (search X.0 for structs, X.1+ for logic):
//   1.x  types.rs: primitives: ParticipantId, VaultId, AssetKind, OrderSide
//   2.x  fixed.rs: fixed-point arithmetic with explicit rounding policy
//   3.x  authority.rs: capability tokens, sub-account identity derivation
//   4.x  vault.rs: per-participant collateral vaults
//   4.1  treasury.rs: protocol custody pools backing every loan
//   4.2  debt.rs: per-account per-kind debt records
//   5.x  account.rs: margin account anchoring vault + debt records
//   6.x  valuation.rs: collateral/debt valuation and the LTV gate
//   7.x  config.rs: protocol singleton + crate settings
//   8.x  ledger/: the core: state, entry points, error taxonomy
//   9.x  price.rs: price source abstraction (fixed placeholder impl)
//   9.1  gateway.rs: trading venue boundary (delegation only, no accounting)
//   11.x events.rs: state transition events for audit

// custody and debt core
pub mod account;
pub mod debt;
pub mod ledger;
pub mod treasury;
pub mod types;
pub mod valuation;
pub mod vault;

// protocol plumbing
pub mod authority;
pub mod config;
pub mod events;
pub mod fixed;

// integration modules
pub mod gateway;
pub mod price;

// re exports for convenience
pub use account::*;
pub use authority::{derive_vault_id, MintingAuthority, VaultAuthority};
pub use config::{is_valid_max_ltv, ConfigError, LedgerConfig, ProtocolConfig};
pub use debt::*;
pub use events::*;
pub use fixed::{FixedPoint, FixedPointError, WORKING_SCALE};
pub use gateway::{
    GatewayError, LimitOrder, MockVenue, TradingGateway, TradingVenue, VenueError, VenueOrderId,
};
pub use ledger::{AccountSummary, BorrowReceipt, Ledger, LedgerError, RepayReceipt};
pub use price::{FixedPriceSource, PriceError, PriceSource};
pub use treasury::*;
pub use types::*;
pub use valuation::{compute_ltv, ltv_acceptable, LtvBreakdown};
pub use vault::*;
