//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `clock` - System and fixed clocks
//! - `http` - Axum routes for the assessment API
//! - `memory` - In-memory result store
//! - `postgres` - PostgreSQL result store and pool setup

pub mod clock;
pub mod http;
pub mod memory;
pub mod postgres;

pub use clock::{FixedClock, SystemClock};
pub use memory::InMemoryResultStore;
pub use postgres::PostgresResultStore;
