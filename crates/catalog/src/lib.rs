//! `smartlearn-catalog` — subjects, videos, books, and live classes.
//!
//! Catalog entries are the things entitlement decisions are made about. The
//! engine consumes them and replaces snapshots wholesale; it never edits an
//! entry in place. Live classes are the one exception with a lifecycle of
//! their own (scheduled, live, completed).

pub mod catalog;
pub mod content;
pub mod live_class;
pub mod seed;

pub use catalog::Catalog;
pub use content::{Book, Subject, SubjectCategory, Video};
pub use live_class::{LiveClass, LiveClassStatus};
