//! Recording and reading the transaction log.

use thiserror::Error;
use tracing::info;

use smartlearn_core::{TransactionId, UserId};
use smartlearn_identity::UserDirectory;
use smartlearn_store::{Collection, Store};

use crate::query::{TransactionFilter, TransactionQuery};
use crate::transaction::{Transaction, TransactionDraft};

const TRANSACTIONS: Collection<Vec<Transaction>> = Collection::new("transactions");

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("transaction amount must be a positive number of kwacha")]
    InvalidAmount,

    #[error("no account on record for user {0}")]
    UnknownUser(UserId),
}

/// The append-only log of every monetary event, most recent first.
///
/// Entries are never edited or removed once written; a correction is a
/// new offsetting entry. Recording validates the draft before anything
/// touches the store, so a rejected draft leaves the log untouched.
#[derive(Debug, Clone)]
pub struct TransactionLedger<D> {
    store: Store,
    directory: D,
}

impl<D: UserDirectory> TransactionLedger<D> {
    pub fn new(store: Store, directory: D) -> Self {
        Self { store, directory }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Validates the draft, assigns an id, and prepends the entry.
    pub fn record(&self, draft: TransactionDraft) -> Result<Transaction, LedgerError> {
        if draft.amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        if !self.directory.contains(draft.user_id) {
            return Err(LedgerError::UnknownUser(draft.user_id));
        }

        let transaction = draft.into_transaction(TransactionId::new());
        let mut log = self.store.load(TRANSACTIONS);
        log.insert(0, transaction.clone());
        self.store.save(TRANSACTIONS, &log);

        info!(
            id = %transaction.id,
            kind = %transaction.kind.transaction_type(),
            amount = transaction.amount,
            status = %transaction.status,
            "transaction recorded"
        );
        Ok(transaction)
    }

    /// Every entry, most recent first.
    pub fn all(&self) -> Vec<Transaction> {
        self.store.load(TRANSACTIONS)
    }

    pub fn find(&self, id: TransactionId) -> Option<Transaction> {
        self.all().into_iter().find(|t| t.id == id)
    }

    /// Snapshot the log and iterate it through a filter.
    pub fn query(&self, filter: TransactionFilter) -> TransactionQuery {
        TransactionQuery::new(self.all(), filter)
    }

    pub fn len(&self) -> usize {
        self.all().len()
    }

    pub fn is_empty(&self) -> bool {
        self.all().is_empty()
    }
}
