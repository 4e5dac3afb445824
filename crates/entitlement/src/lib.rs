//! `smartlearn-entitlement` — who may access what, right now.
//!
//! The evaluator is pure: it consumes a subscription record, the current
//! time, and a content item's gate, and answers yes or no. Time-dependent
//! answers are never cached; every access check re-evaluates against `now`.

pub mod evaluate;
pub mod plan;
pub mod registry;
pub mod subscription;

pub use evaluate::{
    AccessPolicy, AdmissionSource, Entitlements, Gated, SubscriptionSource, can_access,
    can_join_live_class, is_subscribed,
};
pub use plan::SubscriptionPlan;
pub use registry::SubscriptionRegistry;
pub use subscription::Subscription;
