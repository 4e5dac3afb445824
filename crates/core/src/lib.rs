//! `smartlearn-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no storage concerns).

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{BookId, LiveClassId, SubjectId, TransactionId, UserId, VideoId};
