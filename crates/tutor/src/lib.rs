//! The AI tutor boundary.
//!
//! The backend is opaque and allowed to fail; the facade in front of it is
//! not. Every caller-facing operation degrades to a friendly static answer
//! instead of propagating an error into a student's study session.

pub mod scripted;
pub mod service;
pub mod tutor;

pub use scripted::{OfflineTutor, ScriptedTutor};
pub use service::{TutorError, TutorService};
pub use tutor::{Tutor, NO_ANSWER, SUMMARY_UNAVAILABLE, TUTOR_RESTING};
