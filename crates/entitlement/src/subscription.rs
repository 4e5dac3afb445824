//! Subscription records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use smartlearn_core::UserId;

use crate::plan::SubscriptionPlan;

/// A user's subscription.
///
/// At most one record exists per user; a new purchase replaces the old
/// record outright. `is_active` is an independent kill switch, not a cache
/// of the expiry comparison: entitlement requires *both* the flag and an
/// unexpired date. Earlier iterations of the product disagreed on this;
/// the conjunction is the canonical rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub user_id: UserId,
    pub plan: SubscriptionPlan,
    pub expiry_date: DateTime<Utc>,
    pub is_active: bool,
}

impl Subscription {
    /// A fresh subscription bought at `now`.
    pub fn starting(user_id: UserId, plan: SubscriptionPlan, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            plan,
            expiry_date: now + plan.duration(),
            is_active: true,
        }
    }

    /// The entitlement condition. An expiry exactly equal to `now` counts
    /// as expired.
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.expiry_date > now
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn fresh_subscription_expires_after_plan_duration() {
        let now = Utc::now();
        let sub = Subscription::starting(UserId::new(), SubscriptionPlan::Monthly, now);

        assert_eq!(sub.expiry_date, now + Duration::days(30));
        assert!(sub.is_active);
        assert!(sub.is_current(now));
    }

    #[test]
    fn expiry_boundary_is_exclusive() {
        let now = Utc::now();
        let sub = Subscription {
            user_id: UserId::new(),
            plan: SubscriptionPlan::Daily,
            expiry_date: now,
            is_active: true,
        };

        assert!(!sub.is_current(now));
        assert!(sub.is_current(now - Duration::seconds(1)));
    }

    #[test]
    fn inactive_flag_defeats_unexpired_date() {
        let now = Utc::now();
        let mut sub = Subscription::starting(UserId::new(), SubscriptionPlan::Weekly, now);
        sub.is_active = false;

        assert!(!sub.is_current(now));
    }
}
