//! Shared marketing budget — one balance debited by every channel integration.

pub mod ledger;

pub use ledger::{Allocation, BudgetLedger};
