//! Payment boundary.
//!
//! The gateway only confirms or declines a charge; it never touches the
//! ledger or the subscription registry. The platform records the outcome,
//! so a gateway implementation cannot leave half-applied state behind.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};

use thiserror::Error;

use smartlearn_core::UserId;
use smartlearn_ledger::TransactionKind;

/// A charge presented to the gateway: who pays, for what, and the
/// mobile-money account the money comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeRequest {
    pub payer: UserId,
    pub payer_name: String,
    /// Whole MWK.
    pub amount: u64,
    pub kind: TransactionKind,
    pub phone: String,
    pub detail: String,
}

/// The gateway's final word on a charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Approved,
    Declined { reason: String },
}

/// A declined charge, surfaced to the caller after the audit entry is
/// written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("payment declined: {reason}")]
pub struct PaymentDeclined {
    pub reason: String,
}

/// A charge in flight. The outcome arrives through a channel so gateways
/// may confirm asynchronously; the stock gateway resolves before returning.
#[derive(Debug)]
pub struct PendingPayment {
    receiver: Receiver<PaymentOutcome>,
}

impl PendingPayment {
    pub fn new(receiver: Receiver<PaymentOutcome>) -> Self {
        Self { receiver }
    }

    /// Block until the gateway answers. A gateway that hangs up without
    /// answering counts as a decline.
    pub fn outcome(self) -> PaymentOutcome {
        match self.receiver.recv() {
            Ok(outcome) => outcome,
            Err(_) => PaymentOutcome::Declined {
                reason: "payment gateway disconnected before confirming".to_string(),
            },
        }
    }
}

/// External payment collaborator.
pub trait PaymentGateway: Send + Sync {
    fn initiate(&self, charge: &ChargeRequest) -> PendingPayment;
}

impl<G> PaymentGateway for Arc<G>
where
    G: PaymentGateway + ?Sized,
{
    fn initiate(&self, charge: &ChargeRequest) -> PendingPayment {
        (**self).initiate(charge)
    }
}

/// Deterministic mobile-money simulation.
///
/// Approves any charge with a positive amount and a well-formed phone
/// number, declines everything else. The decision is sent before `initiate`
/// returns, so callers can drive the outcome immediately.
#[derive(Debug, Default)]
pub struct MobileMoneyGateway;

impl MobileMoneyGateway {
    pub fn new() -> Self {
        Self
    }
}

impl PaymentGateway for MobileMoneyGateway {
    fn initiate(&self, charge: &ChargeRequest) -> PendingPayment {
        let (sender, receiver): (Sender<PaymentOutcome>, _) = channel();

        let outcome = if charge.amount == 0 {
            PaymentOutcome::Declined {
                reason: "amount must be a positive number of kwacha".to_string(),
            }
        } else if !is_mobile_money_number(&charge.phone) {
            PaymentOutcome::Declined {
                reason: "phone number is not a valid mobile money account".to_string(),
            }
        } else {
            PaymentOutcome::Approved
        };

        // The receiver is alive in this scope, so the send cannot fail.
        let _ = sender.send(outcome);

        PendingPayment::new(receiver)
    }
}

/// Accepts local (`0991234567`) and international (`+265 99 123 456`)
/// renderings: digits only once spaces and a leading `+` are stripped.
fn is_mobile_money_number(phone: &str) -> bool {
    let digits: String = phone
        .trim()
        .strip_prefix('+')
        .unwrap_or(phone.trim())
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    (9..=12).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}
