// 8.x ledger/: the custody and debt core. core.rs holds state, operations.rs
// the entry points, results.rs the error taxonomy and receipts.

mod core;
mod operations;
mod results;

pub use self::core::Ledger;
pub use self::results::{AccountSummary, BorrowReceipt, LedgerError, RepayReceipt};
