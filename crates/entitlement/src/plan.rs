//! Subscription plans and their pricing policy.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    Daily,
    Weekly,
    Monthly,
}

impl SubscriptionPlan {
    /// Price in whole MWK.
    pub fn price_mwk(&self) -> u64 {
        match self {
            SubscriptionPlan::Daily => 2_000,
            SubscriptionPlan::Weekly => 15_000,
            SubscriptionPlan::Monthly => 35_000,
        }
    }

    /// How long access lasts from the moment of purchase.
    pub fn duration(&self) -> Duration {
        match self {
            SubscriptionPlan::Daily => Duration::days(1),
            SubscriptionPlan::Weekly => Duration::days(7),
            SubscriptionPlan::Monthly => Duration::days(30),
        }
    }

    pub fn all() -> [SubscriptionPlan; 3] {
        [
            SubscriptionPlan::Daily,
            SubscriptionPlan::Weekly,
            SubscriptionPlan::Monthly,
        ]
    }
}

impl core::fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SubscriptionPlan::Daily => write!(f, "daily"),
            SubscriptionPlan::Weekly => write!(f, "weekly"),
            SubscriptionPlan::Monthly => write!(f, "monthly"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pricing_table_matches_policy() {
        assert_eq!(SubscriptionPlan::Daily.price_mwk(), 2_000);
        assert_eq!(SubscriptionPlan::Weekly.price_mwk(), 15_000);
        assert_eq!(SubscriptionPlan::Monthly.price_mwk(), 35_000);
    }

    #[test]
    fn durations_match_policy() {
        assert_eq!(SubscriptionPlan::Daily.duration(), Duration::days(1));
        assert_eq!(SubscriptionPlan::Weekly.duration(), Duration::days(7));
        assert_eq!(SubscriptionPlan::Monthly.duration(), Duration::days(30));
    }
}
