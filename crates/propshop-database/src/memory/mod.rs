//! In-memory implementation of every store trait.
//!
//! Used by tests and by local runs without PostgreSQL. Collections live in
//! `DashMap`s; order insertion is serialized behind a mutex so the
//! payment-intent check and the insert happen atomically.

mod store;

pub use store::MemoryStore;
