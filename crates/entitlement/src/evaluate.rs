//! Access evaluation.
//!
//! Pure policy checks in the spirit of an authorization layer:
//! - No IO
//! - No panics
//! - No caching of time-dependent answers

use std::sync::Arc;

use chrono::{DateTime, Utc};

use smartlearn_core::{LiveClassId, UserId};
use smartlearn_identity::Role;

use crate::subscription::Subscription;

/// A content item's paid/free gate. Implemented by catalog entries.
pub trait Gated {
    fn is_paid(&self) -> bool;
}

/// Narrow lookup the evaluator needs: the current subscription of a user.
pub trait SubscriptionSource: Send + Sync {
    fn subscription_for(&self, user: UserId) -> Option<Subscription>;
}

impl<S> SubscriptionSource for Arc<S>
where
    S: SubscriptionSource + ?Sized,
{
    fn subscription_for(&self, user: UserId) -> Option<Subscription> {
        (**self).subscription_for(user)
    }
}

/// Narrow lookup for the one-time live-class gate: has this user a completed
/// admission for this class? Answered by the ledger.
pub trait AdmissionSource: Send + Sync {
    fn has_admission(&self, user: UserId, class: &LiveClassId) -> bool;
}

impl<A> AdmissionSource for Arc<A>
where
    A: AdmissionSource + ?Sized,
{
    fn has_admission(&self, user: UserId, class: &LiveClassId) -> bool {
        (**self).has_admission(user, class)
    }
}

/// Configurable access policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessPolicy {
    /// Whether teachers and admins may open any item without a subscription
    /// (preview/management access).
    pub staff_preview: bool,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            staff_preview: true,
        }
    }
}

/// Whether a subscription record entitles its holder right now.
///
/// Absent record, cleared `is_active`, or `expiry_date <= now` all answer
/// no. Callers must re-evaluate on every check; the answer changes as time
/// passes.
pub fn is_subscribed(subscription: Option<&Subscription>, now: DateTime<Utc>) -> bool {
    subscription.is_some_and(|sub| sub.is_current(now))
}

/// Whether a user may open a catalog item.
///
/// Students see free items always and paid items only while subscribed.
/// The staff-preview policy can additionally open everything to teachers
/// and admins; it only ever widens access.
pub fn can_access(item: &impl Gated, role: Role, subscribed: bool, policy: AccessPolicy) -> bool {
    let base = !item.is_paid() || subscribed;
    match role {
        Role::Student => base,
        Role::Teacher | Role::Admin => base || policy.staff_preview,
    }
}

/// Whether a user may enter a live class.
///
/// Deliberately independent of subscription state: admission is a one-time
/// purchase per class per user, recorded in the ledger.
pub fn can_join_live_class(
    admissions: &impl AdmissionSource,
    user: UserId,
    class: &LiveClassId,
) -> bool {
    admissions.has_admission(user, class)
}

/// The evaluator bundled with its sources, as wired by the composition root.
#[derive(Debug, Clone)]
pub struct Entitlements<S, A> {
    subscriptions: S,
    admissions: A,
    policy: AccessPolicy,
}

impl<S, A> Entitlements<S, A>
where
    S: SubscriptionSource,
    A: AdmissionSource,
{
    pub fn new(subscriptions: S, admissions: A, policy: AccessPolicy) -> Self {
        Self {
            subscriptions,
            admissions,
            policy,
        }
    }

    pub fn policy(&self) -> AccessPolicy {
        self.policy
    }

    pub fn is_subscribed(&self, user: UserId, now: DateTime<Utc>) -> bool {
        is_subscribed(self.subscriptions.subscription_for(user).as_ref(), now)
    }

    pub fn can_access(
        &self,
        user: UserId,
        item: &impl Gated,
        role: Role,
        now: DateTime<Utc>,
    ) -> bool {
        can_access(item, role, self.is_subscribed(user, now), self.policy)
    }

    pub fn can_join(&self, user: UserId, class: &LiveClassId) -> bool {
        can_join_live_class(&self.admissions, user, class)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use proptest::prelude::*;

    use super::*;
    use crate::plan::SubscriptionPlan;

    struct Item {
        paid: bool,
    }

    impl Gated for Item {
        fn is_paid(&self) -> bool {
            self.paid
        }
    }

    fn subscription(is_active: bool, expires_in_secs: i64) -> Subscription {
        Subscription {
            user_id: UserId::new(),
            plan: SubscriptionPlan::Daily,
            expiry_date: Utc::now() + Duration::seconds(expires_in_secs),
            is_active,
        }
    }

    #[test]
    fn no_record_means_not_subscribed() {
        assert!(!is_subscribed(None, Utc::now()));
    }

    #[test]
    fn active_and_unexpired_is_subscribed() {
        let sub = subscription(true, 3600);
        assert!(is_subscribed(Some(&sub), Utc::now()));
    }

    #[test]
    fn expiry_equal_to_now_is_not_subscribed() {
        let now = Utc::now();
        let sub = Subscription {
            user_id: UserId::new(),
            plan: SubscriptionPlan::Monthly,
            expiry_date: now,
            is_active: true,
        };

        assert!(!is_subscribed(Some(&sub), now));
    }

    #[test]
    fn student_access_follows_the_gate() {
        let policy = AccessPolicy::default();
        let free = Item { paid: false };
        let paid = Item { paid: true };

        assert!(can_access(&free, Role::Student, false, policy));
        assert!(!can_access(&paid, Role::Student, false, policy));
        assert!(can_access(&paid, Role::Student, true, policy));
    }

    #[test]
    fn staff_preview_opens_paid_items() {
        let policy = AccessPolicy::default();
        let paid = Item { paid: true };

        assert!(can_access(&paid, Role::Teacher, false, policy));
        assert!(can_access(&paid, Role::Admin, false, policy));
    }

    #[test]
    fn staff_without_preview_policy_follow_student_rules() {
        let policy = AccessPolicy {
            staff_preview: false,
        };
        let paid = Item { paid: true };

        assert!(!can_access(&paid, Role::Teacher, false, policy));
        assert!(can_access(&paid, Role::Teacher, true, policy));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: `is_subscribed` is exactly the conjunction of the
        /// active flag and a strictly-future expiry.
        #[test]
        fn subscribed_iff_active_and_unexpired(
            is_active in any::<bool>(),
            offset_secs in -86_400i64..86_400i64
        ) {
            let now = Utc::now();
            let sub = Subscription {
                user_id: UserId::new(),
                plan: SubscriptionPlan::Weekly,
                expiry_date: now + Duration::seconds(offset_secs),
                is_active,
            };

            let expected = is_active && offset_secs > 0;
            prop_assert_eq!(is_subscribed(Some(&sub), now), expected);
        }
    }
}
