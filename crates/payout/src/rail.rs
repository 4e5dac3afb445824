//! The payout rail boundary.
//!
//! A rail is the external system money actually moves through. Submission
//! is synchronous; settlement is deferred and arrives through a handle
//! owning the result channel, so tests advance the world on demand instead
//! of waiting on wall clocks.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvError, RecvTimeoutError, TryRecvError};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;

use crate::withdrawal::WithdrawalRequest;

/// How a rail answered an accepted request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettlementOutcome {
    Settled { reference: String },
    Failed { reason: String },
}

/// Synchronous rejection at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("payout rail refused the request: {reason}")]
pub struct RailRefusal {
    pub reason: String,
}

/// One half of a deferred settlement.
///
/// The rail keeps the sender; whoever holds the handle drives completion
/// by receiving from it.
#[derive(Debug)]
pub struct SettlementHandle {
    receiver: Receiver<SettlementOutcome>,
}

impl SettlementHandle {
    pub fn new(receiver: Receiver<SettlementOutcome>) -> Self {
        Self { receiver }
    }

    /// Block until the rail answers.
    pub fn recv(&self) -> Result<SettlementOutcome, RecvError> {
        self.receiver.recv()
    }

    /// Check for an answer without blocking.
    pub fn try_recv(&self) -> Result<SettlementOutcome, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for an answer.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<SettlementOutcome, RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// Boundary to the external payout system.
pub trait PayoutRail: Send + Sync {
    /// Hand over an already-validated request. Refusal here is synchronous;
    /// failure after acceptance arrives through the handle instead.
    fn submit(&self, request: &WithdrawalRequest) -> Result<SettlementHandle, RailRefusal>;
}

impl<R> PayoutRail for Arc<R>
where
    R: PayoutRail + ?Sized,
{
    fn submit(&self, request: &WithdrawalRequest) -> Result<SettlementHandle, RailRefusal> {
        (**self).submit(request)
    }
}

/// Stock rail: accepts everything and settles before `submit` returns.
///
/// The settlement is still delivered through the handle, so callers follow
/// the same drive-to-completion path they would with a real rail.
#[derive(Debug, Default)]
pub struct InstantRail {
    sequence: AtomicU64,
}

impl InstantRail {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PayoutRail for InstantRail {
    fn submit(&self, _request: &WithdrawalRequest) -> Result<SettlementHandle, RailRefusal> {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let (tx, rx) = mpsc::channel();

        // The receiver is alive in this scope, so the send cannot fail.
        let _ = tx.send(SettlementOutcome::Settled {
            reference: format!("instant-{seq:06}"),
        });

        Ok(SettlementHandle::new(rx))
    }
}

/// Rail for tests and demos: holds every submission open until the caller
/// resolves it, oldest first.
#[derive(Debug, Default)]
pub struct ManualRail {
    open: Mutex<VecDeque<mpsc::Sender<SettlementOutcome>>>,
}

impl ManualRail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submissions still waiting for an answer.
    pub fn open_settlements(&self) -> usize {
        match self.open.lock() {
            Ok(open) => open.len(),
            Err(_) => 0,
        }
    }

    /// Answer the oldest open settlement. Returns `false` when none is open.
    pub fn resolve_next(&self, outcome: SettlementOutcome) -> bool {
        let Ok(mut open) = self.open.lock() else {
            return false;
        };
        match open.pop_front() {
            Some(tx) => tx.send(outcome).is_ok(),
            None => false,
        }
    }
}

impl PayoutRail for ManualRail {
    fn submit(&self, _request: &WithdrawalRequest) -> Result<SettlementHandle, RailRefusal> {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut open) = self.open.lock() {
            open.push_back(tx);
        }
        Ok(SettlementHandle::new(rx))
    }
}
