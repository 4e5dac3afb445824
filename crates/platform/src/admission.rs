//! Ledger-backed live-class admissions.

use smartlearn_core::{LiveClassId, UserId};
use smartlearn_entitlement::AdmissionSource;
use smartlearn_identity::UserDirectory;
use smartlearn_ledger::{TransactionKind, TransactionLedger, TransactionStatus};

/// Answers the one-time admission gate from the transaction log: a user is
/// admitted to a class exactly when a completed `live_class` entry exists
/// for that user/class pair.
#[derive(Debug, Clone)]
pub struct LedgerAdmissions<D> {
    ledger: TransactionLedger<D>,
}

impl<D> LedgerAdmissions<D> {
    pub fn new(ledger: TransactionLedger<D>) -> Self {
        Self { ledger }
    }
}

impl<D> AdmissionSource for LedgerAdmissions<D>
where
    D: UserDirectory,
{
    fn has_admission(&self, user: UserId, class: &LiveClassId) -> bool {
        self.ledger.all().iter().any(|tx| {
            tx.status == TransactionStatus::Completed
                && tx.user_id == user
                && matches!(&tx.kind, TransactionKind::LiveClass { class_id, .. } if class_id == class)
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use smartlearn_identity::{Registration, Role, User};
    use smartlearn_ledger::TransactionDraft;
    use smartlearn_store::{InMemoryBackend, Store};

    use super::*;

    #[derive(Debug, Clone)]
    struct Roster(Vec<User>);

    impl UserDirectory for Roster {
        fn find(&self, id: UserId) -> Option<User> {
            self.0.iter().find(|u| u.id == id).cloned()
        }
    }

    fn student(name: &str) -> User {
        let Ok(user) = User::register(Registration {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "0991234567".to_string(),
            role: Role::Student,
        }) else {
            panic!("registration should succeed");
        };
        user
    }

    fn admission_draft(
        user: &User,
        class: &'static str,
        status: TransactionStatus,
    ) -> TransactionDraft {
        TransactionDraft {
            user_id: user.id,
            user_name: user.name.clone(),
            amount: 500,
            kind: TransactionKind::LiveClass {
                class_id: class.into(),
                teacher_id: UserId::new(),
            },
            status,
            date: Utc::now(),
            detail: "Live class admission".to_string(),
        }
    }

    #[test]
    fn completed_admission_entry_admits_the_user() {
        let user = student("Chisomo");
        let ledger = TransactionLedger::new(
            Store::open(InMemoryBackend::new()),
            Roster(vec![user.clone()]),
        );
        ledger
            .record(admission_draft(&user, "l1", TransactionStatus::Completed))
            .unwrap();
        let admissions = LedgerAdmissions::new(ledger);

        assert!(admissions.has_admission(user.id, &"l1".into()));
        assert!(!admissions.has_admission(user.id, &"l2".into()));
        assert!(!admissions.has_admission(UserId::new(), &"l1".into()));
    }

    #[test]
    fn failed_or_pending_entries_do_not_admit() {
        let user = student("Mphatso");
        let ledger = TransactionLedger::new(
            Store::open(InMemoryBackend::new()),
            Roster(vec![user.clone()]),
        );
        ledger
            .record(admission_draft(&user, "l1", TransactionStatus::Failed))
            .unwrap();
        ledger
            .record(admission_draft(&user, "l1", TransactionStatus::Pending))
            .unwrap();
        let admissions = LedgerAdmissions::new(ledger);

        assert!(!admissions.has_admission(user.id, &"l1".into()));
    }
}
