//! Entrepreneurial DNA - questionnaire scoring, classification and retake
//! eligibility.
//!
//! A user answers a fixed 20-question assessment. The answers are scored into
//! a dominant DNA type, an awareness percentage and a subtype, stored as an
//! immutable record, and a retake is allowed once the cooldown has passed.
//!
//! Layout follows ports and adapters:
//! - `domain` - pure scoring, classification and eligibility rules
//! - `ports` - store and clock traits
//! - `application` - command/query handlers and the `AssessmentService` facade
//! - `adapters` - in-memory and PostgreSQL stores, clocks and the HTTP API

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
