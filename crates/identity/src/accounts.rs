//! Store-backed account directory.

use std::sync::Arc;

use smartlearn_core::{DomainError, DomainResult, UserId};
use smartlearn_store::{Collection, Store};

use crate::role::Role;
use crate::user::{ProfileUpdate, Registration, User};

const USERS: Collection<Vec<User>> = Collection::new("users");

/// Narrow read interface for resolving a user id to a known account.
///
/// Consumers that only need existence/lookup (the ledger validating a
/// transaction draft, session checks) take this instead of [`Accounts`].
pub trait UserDirectory: Send + Sync {
    fn find(&self, id: UserId) -> Option<User>;

    fn contains(&self, id: UserId) -> bool {
        self.find(id).is_some()
    }
}

impl<D> UserDirectory for Arc<D>
where
    D: UserDirectory + ?Sized,
{
    fn find(&self, id: UserId) -> Option<User> {
        (**self).find(id)
    }

    fn contains(&self, id: UserId) -> bool {
        (**self).contains(id)
    }
}

/// Every registered account, persisted as one whole collection.
///
/// Mutations are read-modify-write against the full collection: validation
/// runs first and nothing is saved on a failed operation.
#[derive(Debug, Clone)]
pub struct Accounts {
    store: Store,
}

impl Accounts {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Register a new account, enforcing one account per email.
    pub fn register(&self, registration: Registration) -> DomainResult<User> {
        let mut users = self.store.load(USERS);

        let email = registration.email.trim().to_lowercase();
        if users.iter().any(|u| u.email == email) {
            return Err(DomainError::conflict(
                "an account with this email already exists",
            ));
        }

        let user = User::register(registration)?;
        users.push(user.clone());
        self.store.save(USERS, &users);

        Ok(user)
    }

    pub fn all(&self) -> Vec<User> {
        self.store.load(USERS)
    }

    pub fn find_by_email(&self, email: &str) -> Option<User> {
        let email = email.trim().to_lowercase();
        self.store.load(USERS).into_iter().find(|u| u.email == email)
    }

    /// Accounts waiting for an admin to clear them.
    pub fn pending_approval(&self) -> Vec<User> {
        self.store
            .load(USERS)
            .into_iter()
            .filter(|u| !u.is_approved)
            .collect()
    }

    pub fn approve(&self, acting: Role, id: UserId) -> DomainResult<User> {
        self.update(id, |user| user.approve(acting))
    }

    pub fn lock(&self, acting: Role, id: UserId) -> DomainResult<User> {
        self.update(id, |user| user.lock(acting))
    }

    pub fn unlock(&self, acting: Role, id: UserId) -> DomainResult<User> {
        self.update(id, |user| user.unlock(acting))
    }

    pub fn update_profile(&self, id: UserId, changes: ProfileUpdate) -> DomainResult<User> {
        self.update(id, |user| user.update_profile(changes))
    }

    /// Refresh the display snapshot of a ledger-derived balance.
    pub fn record_balance_snapshot(&self, id: UserId, balance: u64) -> DomainResult<User> {
        self.update(id, |user| {
            user.balance = Some(balance);
            Ok(())
        })
    }

    fn update(
        &self,
        id: UserId,
        mutate: impl FnOnce(&mut User) -> DomainResult<()>,
    ) -> DomainResult<User> {
        let mut users = self.store.load(USERS);
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(DomainError::NotFound)?;

        mutate(user)?;
        let updated = user.clone();
        self.store.save(USERS, &users);

        Ok(updated)
    }
}

impl UserDirectory for Accounts {
    fn find(&self, id: UserId) -> Option<User> {
        self.store.load(USERS).into_iter().find(|u| u.id == id)
    }
}

#[cfg(test)]
mod tests {
    use smartlearn_store::InMemoryBackend;

    use super::*;

    fn accounts() -> Accounts {
        Accounts::new(Store::open(InMemoryBackend::new()))
    }

    fn registration(email: &str, role: Role) -> Registration {
        Registration {
            name: "Thoko Banda".to_string(),
            email: email.to_string(),
            phone: "0888123456".to_string(),
            role,
        }
    }

    #[test]
    fn registered_account_is_findable() {
        let accounts = accounts();
        let user = accounts
            .register(registration("thoko@example.com", Role::Student))
            .unwrap();

        let found = accounts.find(user.id).unwrap();
        assert_eq!(found, user);
        assert!(accounts.contains(user.id));
    }

    #[test]
    fn duplicate_email_is_a_conflict() {
        let accounts = accounts();
        accounts
            .register(registration("thoko@example.com", Role::Student))
            .unwrap();

        let result = accounts.register(registration("THOKO@example.com", Role::Teacher));
        assert!(matches!(result, Err(DomainError::Conflict(_))));
        assert_eq!(accounts.all().len(), 1);
    }

    #[test]
    fn approval_queue_holds_staff_only() {
        let accounts = accounts();
        accounts
            .register(registration("student@example.com", Role::Student))
            .unwrap();
        let teacher = accounts
            .register(registration("teacher@example.com", Role::Teacher))
            .unwrap();

        let pending = accounts.pending_approval();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, teacher.id);
    }

    #[test]
    fn approve_persists_across_reads() {
        let accounts = accounts();
        let teacher = accounts
            .register(registration("teacher@example.com", Role::Teacher))
            .unwrap();

        accounts.approve(Role::Admin, teacher.id).unwrap();

        assert!(accounts.find(teacher.id).unwrap().is_approved);
        assert!(accounts.pending_approval().is_empty());
    }

    #[test]
    fn failed_mutation_saves_nothing() {
        let accounts = accounts();
        let student = accounts
            .register(registration("student@example.com", Role::Student))
            .unwrap();

        let result = accounts.lock(Role::Student, student.id);
        assert!(matches!(result, Err(DomainError::Unauthorized)));
        assert!(!accounts.find(student.id).unwrap().is_locked);
    }

    #[test]
    fn unknown_user_is_not_found() {
        let accounts = accounts();

        let result = accounts.approve(Role::Admin, UserId::new());
        assert!(matches!(result, Err(DomainError::NotFound)));
    }

    #[test]
    fn balance_snapshot_is_recorded() {
        let accounts = accounts();
        let teacher = accounts
            .register(registration("teacher@example.com", Role::Teacher))
            .unwrap();

        accounts.record_balance_snapshot(teacher.id, 125_000).unwrap();

        assert_eq!(accounts.find(teacher.id).unwrap().balance, Some(125_000));
    }
}
