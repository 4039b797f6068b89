//! Repository layer: the generic store contract and its SQLite adapters.
//!
//! # Invariants
//! - Adapters only accept connections migrated to the latest schema.
//! - Storage constraint violations are classified, never swallowed.

pub mod book_repo;
pub mod named_repo;
pub mod store;
