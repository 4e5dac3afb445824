//! Balances and withdrawals.
//!
//! Balances are never stored: they are derived on demand from the
//! completed entries of the transaction log, per owner. Withdrawals move
//! money out through an external payout rail behind a trait boundary,
//! with the settlement window treated as a per-owner critical section.

pub mod balance;
pub mod rail;
pub mod withdrawal;

pub use balance::{available_balance, balance_report, OwnerBalance};
pub use rail::{
    InstantRail, ManualRail, PayoutRail, RailRefusal, SettlementHandle, SettlementOutcome,
};
pub use withdrawal::{
    PayoutError, PendingWithdrawal, WithdrawalManager, WithdrawalRequest, MINIMUM_WITHDRAWAL_MWK,
};
