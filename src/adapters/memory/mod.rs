//! In-memory adapters.
//!
//! Used when no database is configured, and by tests.

mod in_memory_result_store;

pub use in_memory_result_store::InMemoryResultStore;
