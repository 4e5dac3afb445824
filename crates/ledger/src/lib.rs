//! `smartlearn-ledger` — the append-only record of every monetary event.
//!
//! Subscription purchases, item purchases, live-class admissions, and
//! payouts all land here as immutable transactions, most recent first.
//! Balances and audit views are derived from this log and from nothing
//! else; corrections are new offsetting entries, never edits.

pub mod ledger;
pub mod query;
pub mod transaction;

pub use ledger::{LedgerError, TransactionLedger};
pub use query::{TransactionFilter, TransactionQuery};
pub use transaction::{
    BalanceOwner, Transaction, TransactionDraft, TransactionKind, TransactionStatus,
    TransactionType,
};
