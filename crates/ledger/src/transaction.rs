//! Transaction records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use smartlearn_core::{BookId, LiveClassId, TransactionId, UserId, VideoId};
use smartlearn_entitlement::SubscriptionPlan;

/// Settlement status of a recorded transaction.
///
/// Only `completed` entries count toward balances; `pending` and `failed`
/// entries are audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
}

impl core::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TransactionStatus::Completed => write!(f, "completed"),
            TransactionStatus::Pending => write!(f, "pending"),
            TransactionStatus::Failed => write!(f, "failed"),
        }
    }
}

/// The party a monetary event accrues to or debits.
///
/// Subscription, book, and video revenue belongs to the platform treasury;
/// live-class admissions belong to the teaching teacher. Withdrawal entries
/// name the owner they debit outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "party", rename_all = "lowercase")]
pub enum BalanceOwner {
    Platform,
    Teacher { teacher_id: UserId },
}

impl core::fmt::Display for BalanceOwner {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BalanceOwner::Platform => write!(f, "platform"),
            BalanceOwner::Teacher { teacher_id } => write!(f, "teacher {teacher_id}"),
        }
    }
}

/// What a transaction was for, with the payload tying it back to the thing
/// bought or paid out.
///
/// Serialized with a flat `type` tag, so a stored record keeps the classic
/// shape (`"type": "live_class"`) while the payload stays structured enough
/// for the admission gate and balance attribution to work without parsing
/// the human-readable detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransactionKind {
    Subscription { plan: SubscriptionPlan },
    Book { book_id: BookId },
    Video { video_id: VideoId },
    LiveClass { class_id: LiveClassId, teacher_id: UserId },
    Withdrawal { owner: BalanceOwner, destination: String },
}

/// Flat discriminant for filtering and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Subscription,
    Book,
    Video,
    LiveClass,
    Withdrawal,
}

impl core::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TransactionType::Subscription => write!(f, "subscription"),
            TransactionType::Book => write!(f, "book"),
            TransactionType::Video => write!(f, "video"),
            TransactionType::LiveClass => write!(f, "live_class"),
            TransactionType::Withdrawal => write!(f, "withdrawal"),
        }
    }
}

impl TransactionKind {
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            TransactionKind::Subscription { .. } => TransactionType::Subscription,
            TransactionKind::Book { .. } => TransactionType::Book,
            TransactionKind::Video { .. } => TransactionType::Video,
            TransactionKind::LiveClass { .. } => TransactionType::LiveClass,
            TransactionKind::Withdrawal { .. } => TransactionType::Withdrawal,
        }
    }

    /// Withdrawals are the only kind that reduce a balance.
    pub fn is_earning(&self) -> bool {
        !matches!(self, TransactionKind::Withdrawal { .. })
    }

    /// The owner this transaction's amount accrues to (earnings) or
    /// debits (withdrawals).
    pub fn owner(&self) -> BalanceOwner {
        match self {
            TransactionKind::Subscription { .. }
            | TransactionKind::Book { .. }
            | TransactionKind::Video { .. } => BalanceOwner::Platform,
            TransactionKind::LiveClass { teacher_id, .. } => BalanceOwner::Teacher {
                teacher_id: *teacher_id,
            },
            TransactionKind::Withdrawal { owner, .. } => *owner,
        }
    }
}

/// An immutable ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub user_id: UserId,
    pub user_name: String,
    /// Whole MWK, always positive.
    pub amount: u64,
    #[serde(flatten)]
    pub kind: TransactionKind,
    pub status: TransactionStatus,
    pub date: DateTime<Utc>,
    pub detail: String,
}

impl Transaction {
    pub fn transaction_type(&self) -> TransactionType {
        self.kind.transaction_type()
    }
}

/// Everything a caller supplies when recording; the ledger assigns the id.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub user_id: UserId,
    pub user_name: String,
    pub amount: u64,
    pub kind: TransactionKind,
    pub status: TransactionStatus,
    pub date: DateTime<Utc>,
    pub detail: String,
}

impl TransactionDraft {
    pub fn into_transaction(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            user_id: self.user_id,
            user_name: self.user_name,
            amount: self.amount,
            kind: self.kind,
            status: self.status,
            date: self.date,
            detail: self.detail,
        }
    }
}
