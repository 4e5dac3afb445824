//! Signed-in actor context.

use smartlearn_core::UserId;
use smartlearn_identity::Role;

/// The identity a platform operation acts as.
///
/// Produced by [`crate::Platform::sign_in`] after the account-state checks;
/// holding one means the account was approved and unlocked at sign-in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub name: String,
    pub role: Role,
}

impl Session {
    pub fn new(user_id: UserId, name: String, role: Role) -> Self {
        Self {
            user_id,
            name,
            role,
        }
    }
}
