//! Clock port.
//!
//! Eligibility depends on "now", so time is injected rather than read
//! directly. Tests pin it with a fixed clock.

use crate::domain::foundation::Timestamp;

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
