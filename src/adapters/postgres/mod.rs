//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresResultStore` - Append-only classification records
//! - `connect_pool` / `run_migrations` - Pool setup and schema migrations

mod pool;
mod result_store;

pub use pool::{connect_pool, run_migrations};
pub use result_store::PostgresResultStore;
