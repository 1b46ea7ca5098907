//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AssessmentResultStore` - Append-only storage of classification records
//! - `Clock` - Source of the current time

mod assessment_result_store;
mod clock;

pub use assessment_result_store::{AppendOutcome, AssessmentResultStore};
pub use clock::Clock;
