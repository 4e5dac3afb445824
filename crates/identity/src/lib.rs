//! Identity module (user accounts, roles, account state).
//!
//! Authentication lives outside the engine; this crate owns what the engine
//! knows about a user once an identity provider has vouched for them: the
//! account record, its role, and the admin-gated approval/locking lifecycle.

pub mod accounts;
pub mod role;
pub mod user;

pub use accounts::{Accounts, UserDirectory};
pub use role::Role;
pub use user::{ProfileUpdate, Registration, User};
