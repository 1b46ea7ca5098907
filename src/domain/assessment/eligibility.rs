//! Retake eligibility.
//!
//! The eligibility window is derived, never stored: it is the latest
//! record's `created_at` plus the cooldown.

use serde::Serialize;

use super::result::ClassificationResult;
use crate::domain::foundation::{Timestamp, ValidationError};

/// Days a user must wait between two assessments.
pub const DEFAULT_RETAKE_COOLDOWN_DAYS: u32 = 30;

/// Longest cooldown a policy accepts.
pub const MAX_RETAKE_COOLDOWN_DAYS: u32 = 365;

/// Cooldown rule between two assessments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetakePolicy {
    cooldown_days: u32,
}

impl RetakePolicy {
    pub fn new(cooldown_days: u32) -> Result<Self, ValidationError> {
        if !(1..=MAX_RETAKE_COOLDOWN_DAYS).contains(&cooldown_days) {
            return Err(ValidationError::out_of_range(
                "retake_cooldown_days",
                1,
                MAX_RETAKE_COOLDOWN_DAYS as i32,
                i32::try_from(cooldown_days).unwrap_or(i32::MAX),
            ));
        }
        Ok(Self { cooldown_days })
    }

    pub fn cooldown_days(&self) -> u32 {
        self.cooldown_days
    }

    /// First instant at which a retake is allowed after `taken_at`.
    pub fn next_retake_after(&self, taken_at: &Timestamp) -> Timestamp {
        taken_at.add_days(i64::from(self.cooldown_days))
    }

    /// Evaluates eligibility against the user's latest record.
    ///
    /// The boundary is inclusive: a retake is allowed exactly at
    /// `created_at + cooldown`.
    pub fn evaluate(&self, latest: Option<&ClassificationResult>, now: Timestamp) -> Eligibility {
        let Some(latest) = latest else {
            return Eligibility::first_attempt();
        };

        let next_retake = self.next_retake_after(&latest.created_at);
        let can_retake = !now.is_before(&next_retake);
        Eligibility {
            can_retake,
            next_retake_date: (!can_retake).then_some(next_retake),
            last_taken_at: Some(latest.created_at),
        }
    }
}

impl Default for RetakePolicy {
    fn default() -> Self {
        Self {
            cooldown_days: DEFAULT_RETAKE_COOLDOWN_DAYS,
        }
    }
}

/// Outcome of an eligibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Eligibility {
    pub can_retake: bool,
    /// Set only while the user is inside the cooldown window.
    pub next_retake_date: Option<Timestamp>,
    pub last_taken_at: Option<Timestamp>,
}

impl Eligibility {
    /// Eligibility of a user with no prior record.
    pub fn first_attempt() -> Self {
        Self {
            can_retake: true,
            next_retake_date: None,
            last_taken_at: None,
        }
    }
}
