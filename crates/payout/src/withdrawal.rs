//! Withdrawal requests and their per-owner lifecycle.
//!
//! A request is validated synchronously, handed to the rail, and finished
//! by driving its settlement handle. The window between acceptance and
//! settlement is a critical section per owner: a second debit for the same
//! owner is rejected outright rather than queued against a balance that is
//! about to change. Earnings keep landing during the window; they can only
//! grow the balance the accepted request was validated against.
//!
//! # Invariants
//! - A request either fully succeeds with exactly one `withdrawal` entry
//!   in the log, or fails with no entry and no balance change.
//! - An accepted request cannot be cancelled; dropping the pending handle
//!   without settling leaves the owner processing.

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};

use smartlearn_core::UserId;
use smartlearn_identity::UserDirectory;
use smartlearn_ledger::{
    BalanceOwner, LedgerError, Transaction, TransactionDraft, TransactionKind, TransactionLedger,
    TransactionStatus,
};

use crate::balance::{available_balance, balance_report, OwnerBalance};
use crate::rail::{PayoutRail, SettlementHandle, SettlementOutcome};

/// Smallest amount the platform will pay out, in whole MWK.
pub const MINIMUM_WITHDRAWAL_MWK: u64 = 2_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayoutError {
    #[error("requested {requested} MWK but only {available} MWK is available")]
    InsufficientBalance { requested: u64, available: u64 },

    #[error("requested {requested} MWK, below the minimum withdrawal of {minimum} MWK")]
    BelowMinimumWithdrawal { requested: u64, minimum: u64 },

    #[error("withdrawal destination must name an account or mobile money number")]
    InvalidDestination,

    #[error("a withdrawal is already processing for this owner")]
    WithdrawalInProgress,

    #[error("payout rail refused the request: {reason}")]
    RailRefused { reason: String },

    #[error("settlement failed: {reason}")]
    SettlementFailed { reason: String },

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// What the owner asks for. Produces exactly one `withdrawal` transaction
/// if and when the rail settles it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawalRequest {
    pub owner: BalanceOwner,
    pub amount: u64,
    pub destination: String,
    /// The signed-in user asking: the teacher themselves, or an admin
    /// drawing down the platform treasury.
    pub requested_by: UserId,
}

/// An accepted request waiting on the rail. Pass it back to
/// [`WithdrawalManager::settle`] to finish it.
#[derive(Debug)]
pub struct PendingWithdrawal {
    request: WithdrawalRequest,
    requester_name: String,
    handle: SettlementHandle,
}

impl PendingWithdrawal {
    pub fn owner(&self) -> BalanceOwner {
        self.request.owner
    }

    pub fn amount(&self) -> u64 {
        self.request.amount
    }

    pub fn destination(&self) -> &str {
        &self.request.destination
    }
}

/// Serializes debits per owner and turns settled requests into log entries.
#[derive(Debug)]
pub struct WithdrawalManager<D, R> {
    ledger: TransactionLedger<D>,
    rail: R,
    processing: Mutex<HashSet<BalanceOwner>>,
}

impl<D, R> WithdrawalManager<D, R>
where
    D: UserDirectory,
    R: PayoutRail,
{
    pub fn new(ledger: TransactionLedger<D>, rail: R) -> Self {
        Self {
            ledger,
            rail,
            processing: Mutex::new(HashSet::new()),
        }
    }

    pub fn balance_of(&self, owner: BalanceOwner) -> u64 {
        available_balance(&self.ledger.all(), owner)
    }

    pub fn balance_report_for(&self, owner: BalanceOwner) -> OwnerBalance {
        balance_report(&self.ledger.all(), owner)
    }

    pub fn is_processing(&self, owner: BalanceOwner) -> bool {
        match self.processing.lock() {
            Ok(processing) => processing.contains(&owner),
            Err(_) => true,
        }
    }

    /// Validate and submit a withdrawal. On success the owner is
    /// processing until the returned request is settled.
    pub fn request(&self, request: WithdrawalRequest) -> Result<PendingWithdrawal, PayoutError> {
        if request.destination.trim().is_empty() {
            return Err(PayoutError::InvalidDestination);
        }
        if request.amount < MINIMUM_WITHDRAWAL_MWK {
            return Err(PayoutError::BelowMinimumWithdrawal {
                requested: request.amount,
                minimum: MINIMUM_WITHDRAWAL_MWK,
            });
        }
        let requester = self
            .ledger
            .directory()
            .find(request.requested_by)
            .ok_or(LedgerError::UnknownUser(request.requested_by))?;

        if !self.begin_processing(request.owner) {
            return Err(PayoutError::WithdrawalInProgress);
        }

        // Owner is held from here on; read the balance inside the window
        // and release on every early exit.
        let available = self.balance_of(request.owner);
        if request.amount > available {
            self.finish_processing(request.owner);
            return Err(PayoutError::InsufficientBalance {
                requested: request.amount,
                available,
            });
        }

        let handle = match self.rail.submit(&request) {
            Ok(handle) => handle,
            Err(refusal) => {
                self.finish_processing(request.owner);
                return Err(PayoutError::RailRefused {
                    reason: refusal.reason,
                });
            }
        };

        info!(
            owner = %request.owner,
            amount = request.amount,
            "withdrawal accepted, awaiting settlement"
        );
        Ok(PendingWithdrawal {
            request,
            requester_name: requester.name,
            handle,
        })
    }

    /// Drive a pending withdrawal to its terminal state. Blocks until the
    /// rail answers; the stock rail answers before submission returns.
    pub fn settle(&self, pending: PendingWithdrawal) -> Result<Transaction, PayoutError> {
        let outcome = pending.handle.recv();
        self.finish_processing(pending.request.owner);

        match outcome {
            Ok(SettlementOutcome::Settled { reference }) => {
                let request = pending.request;
                let transaction = self.ledger.record(TransactionDraft {
                    user_id: request.requested_by,
                    user_name: pending.requester_name,
                    amount: request.amount,
                    kind: TransactionKind::Withdrawal {
                        owner: request.owner,
                        destination: request.destination.clone(),
                    },
                    status: TransactionStatus::Completed,
                    date: Utc::now(),
                    detail: format!("Withdrawal to {}", request.destination),
                })?;
                info!(owner = %request.owner, %reference, "withdrawal settled");
                Ok(transaction)
            }
            Ok(SettlementOutcome::Failed { reason }) => {
                warn!(owner = %pending.request.owner, %reason, "settlement failed");
                Err(PayoutError::SettlementFailed { reason })
            }
            Err(_) => Err(PayoutError::SettlementFailed {
                reason: "payout rail disconnected before settling".to_string(),
            }),
        }
    }

    fn begin_processing(&self, owner: BalanceOwner) -> bool {
        match self.processing.lock() {
            Ok(mut processing) => processing.insert(owner),
            Err(_) => false,
        }
    }

    fn finish_processing(&self, owner: BalanceOwner) {
        if let Ok(mut processing) = self.processing.lock() {
            processing.remove(&owner);
        }
    }
}
