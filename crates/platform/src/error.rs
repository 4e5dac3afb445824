//! Platform error roll-up.

use thiserror::Error;

use smartlearn_core::DomainError;
use smartlearn_ledger::LedgerError;
use smartlearn_payout::PayoutError;

use crate::payment::PaymentDeclined;

/// Everything a platform operation can report. Each variant wraps the
/// failing component's own error so callers can match on the source.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Payout(#[from] PayoutError),

    #[error(transparent)]
    Payment(#[from] PaymentDeclined),
}
