//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure.

pub mod assessment;

// Re-export key types for convenience
pub use assessment::app_router;
pub use assessment::AssessmentAppState;
