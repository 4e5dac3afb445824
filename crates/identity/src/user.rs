//! User account records and their lifecycle.
//!
//! # Invariants
//! - Accounts are never hard-deleted; locking is the only removal-like state.
//! - `is_approved` and `is_locked` change only through admin-gated operations.
//! - Students are approved at registration; teachers and admins wait in the
//!   approval queue until an admin clears them.

use serde::{Deserialize, Serialize};

use smartlearn_core::{DomainError, DomainResult, UserId};

use crate::role::Role;

// ─────────────────────────────────────────────────────────────────────────────
// User Record
// ─────────────────────────────────────────────────────────────────────────────

/// A platform user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub is_approved: bool,
    pub is_locked: bool,
    pub avatar: Option<String>,
    /// Display snapshot of the ledger-derived balance; the ledger is the
    /// source of truth and the platform refreshes this after settlements.
    pub balance: Option<u64>,
}

/// Input for registering a new account.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
}

/// Self-service profile changes. Role and the soft states are untouchable
/// through this path.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
}

impl User {
    /// Create an account from a registration.
    ///
    /// Students can use the platform immediately; staff roles enter the
    /// admin approval queue.
    pub fn register(registration: Registration) -> DomainResult<Self> {
        let name = valid_name(&registration.name)?;
        let email = valid_email(&registration.email)?;
        let phone = valid_phone(&registration.phone)?;

        Ok(Self {
            id: UserId::new(),
            name,
            email,
            phone,
            role: registration.role,
            is_approved: registration.role == Role::Student,
            is_locked: false,
            avatar: None,
            balance: None,
        })
    }

    /// Whether the account may use the platform at all.
    pub fn in_good_standing(&self) -> bool {
        self.is_approved && !self.is_locked
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Admin-gated transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Clear the account from the approval queue. Idempotent.
    pub fn approve(&mut self, acting: Role) -> DomainResult<()> {
        ensure_admin(acting)?;
        self.is_approved = true;
        Ok(())
    }

    /// Soft-suspend the account.
    pub fn lock(&mut self, acting: Role) -> DomainResult<()> {
        ensure_admin(acting)?;
        if self.is_locked {
            return Err(DomainError::invariant("account already locked"));
        }
        self.is_locked = true;
        Ok(())
    }

    /// Lift a suspension.
    pub fn unlock(&mut self, acting: Role) -> DomainResult<()> {
        ensure_admin(acting)?;
        if !self.is_locked {
            return Err(DomainError::invariant("account is not locked"));
        }
        self.is_locked = false;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Self-service
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply profile changes, validating each supplied field.
    pub fn update_profile(&mut self, update: ProfileUpdate) -> DomainResult<()> {
        if let Some(name) = update.name {
            self.name = valid_name(&name)?;
        }
        if let Some(email) = update.email {
            self.email = valid_email(&email)?;
        }
        if let Some(phone) = update.phone {
            self.phone = valid_phone(&phone)?;
        }
        if let Some(avatar) = update.avatar {
            self.avatar = Some(avatar);
        }
        Ok(())
    }
}

fn ensure_admin(acting: Role) -> DomainResult<()> {
    if acting != Role::Admin {
        return Err(DomainError::Unauthorized);
    }
    Ok(())
}

fn valid_name(name: &str) -> DomainResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    Ok(name.to_string())
}

fn valid_email(email: &str) -> DomainResult<String> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(DomainError::validation("invalid email format"));
    }
    Ok(email.to_lowercase())
}

fn valid_phone(phone: &str) -> DomainResult<String> {
    let phone = phone.trim();
    if phone.is_empty() {
        return Err(DomainError::validation("phone cannot be empty"));
    }
    Ok(phone.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
