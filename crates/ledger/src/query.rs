//! Filtered, restartable reads over a log snapshot.

use chrono::{DateTime, Utc};

use smartlearn_core::UserId;

use crate::transaction::{Transaction, TransactionType};

/// Which entries a query keeps. An empty filter keeps everything.
///
/// The date window is half-open: `from` is inclusive, `until` exclusive,
/// so adjacent windows never double-count an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub user_id: Option<UserId>,
    pub kind: Option<TransactionType>,
    pub from: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl TransactionFilter {
    pub fn for_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn of_kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn from(mut self, from: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self
    }

    pub fn until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        if self.user_id.is_some_and(|id| transaction.user_id != id) {
            return false;
        }
        if self
            .kind
            .is_some_and(|kind| transaction.kind.transaction_type() != kind)
        {
            return false;
        }
        if self.from.is_some_and(|from| transaction.date < from) {
            return false;
        }
        if self.until.is_some_and(|until| transaction.date >= until) {
            return false;
        }
        true
    }
}

/// A snapshot of the log paired with a filter.
///
/// The snapshot is taken once; iterating it again replays the same
/// entries in the same most-recent-first order regardless of what the
/// live log has done since.
#[derive(Debug, Clone)]
pub struct TransactionQuery {
    snapshot: Vec<Transaction>,
    filter: TransactionFilter,
}

impl TransactionQuery {
    pub fn new(snapshot: Vec<Transaction>, filter: TransactionFilter) -> Self {
        Self { snapshot, filter }
    }

    /// Matching entries, most recent first. Restartable.
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> + '_ {
        self.snapshot.iter().filter(|t| self.filter.matches(t))
    }

    pub fn to_vec(&self) -> Vec<Transaction> {
        self.iter().cloned().collect()
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Sum of the matching amounts, saturating rather than wrapping.
    pub fn total_amount(&self) -> u64 {
        self.iter().fold(0u64, |sum, t| sum.saturating_add(t.amount))
    }
}
