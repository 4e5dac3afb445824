//! `smartlearn-store`
//!
//! **Responsibility:** Durable key-value storage for typed collections.
//!
//! Every persistent collection (users, subscriptions, transactions, catalog
//! snapshots) round-trips through this crate as a whole-collection JSON
//! payload. The contract is deliberately forgiving: a missing or corrupt
//! payload falls back to the collection's default and logs a warning; nothing
//! in here ever fails the caller.

pub mod backend;
pub mod collection;
pub mod in_memory;
pub mod json_file;
pub mod store;

pub use backend::StoreBackend;
pub use collection::Collection;
pub use in_memory::InMemoryBackend;
pub use json_file::JsonFileBackend;
pub use store::Store;
