//! Store-backed subscription records.

use smartlearn_core::UserId;
use smartlearn_store::{Collection, Store};

use crate::evaluate::SubscriptionSource;
use crate::subscription::Subscription;

const SUBSCRIPTIONS: Collection<Vec<Subscription>> = Collection::new("subscriptions");

/// Keeper of the one-record-per-user invariant.
///
/// `replace` drops whatever record the user had before writing the new one;
/// `revoke` leaves the user with no record at all, which the evaluator
/// treats as no entitlement.
#[derive(Debug, Clone)]
pub struct SubscriptionRegistry {
    store: Store,
}

impl SubscriptionRegistry {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn current_for(&self, user: UserId) -> Option<Subscription> {
        self.store
            .load(SUBSCRIPTIONS)
            .into_iter()
            .find(|sub| sub.user_id == user)
    }

    /// Install a subscription, replacing any previous record for the user.
    pub fn replace(&self, subscription: Subscription) {
        let mut subscriptions = self.store.load(SUBSCRIPTIONS);
        subscriptions.retain(|sub| sub.user_id != subscription.user_id);
        subscriptions.push(subscription);
        self.store.save(SUBSCRIPTIONS, &subscriptions);
    }

    /// Remove the user's record entirely.
    pub fn revoke(&self, user: UserId) {
        let mut subscriptions = self.store.load(SUBSCRIPTIONS);
        subscriptions.retain(|sub| sub.user_id != user);
        self.store.save(SUBSCRIPTIONS, &subscriptions);
    }
}

impl SubscriptionSource for SubscriptionRegistry {
    fn subscription_for(&self, user: UserId) -> Option<Subscription> {
        self.current_for(user)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use smartlearn_store::InMemoryBackend;

    use super::*;
    use crate::plan::SubscriptionPlan;

    fn registry() -> SubscriptionRegistry {
        SubscriptionRegistry::new(Store::open(InMemoryBackend::new()))
    }

    #[test]
    fn replace_keeps_one_record_per_user() {
        let registry = registry();
        let user = UserId::new();

        registry.replace(Subscription::starting(user, SubscriptionPlan::Daily, Utc::now()));
        registry.replace(Subscription::starting(
            user,
            SubscriptionPlan::Monthly,
            Utc::now(),
        ));

        let current = registry.current_for(user).unwrap();
        assert_eq!(current.plan, SubscriptionPlan::Monthly);
    }

    #[test]
    fn records_are_per_user() {
        let registry = registry();
        let alice = UserId::new();
        let bob = UserId::new();

        registry.replace(Subscription::starting(alice, SubscriptionPlan::Weekly, Utc::now()));

        assert!(registry.current_for(alice).is_some());
        assert!(registry.current_for(bob).is_none());
    }

    #[test]
    fn revoke_leaves_no_record() {
        let registry = registry();
        let user = UserId::new();

        registry.replace(Subscription::starting(user, SubscriptionPlan::Daily, Utc::now()));
        registry.revoke(user);

        assert!(registry.current_for(user).is_none());
    }
}
