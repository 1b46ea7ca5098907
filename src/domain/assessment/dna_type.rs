//! Classification outcomes and the two scoring axes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// The axis a default-type answer contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Architect,
    Alchemist,
}

impl Axis {
    pub fn opposite(&self) -> Axis {
        match self {
            Axis::Architect => Axis::Alchemist,
            Axis::Alchemist => Axis::Architect,
        }
    }
}

/// Dominant entrepreneurial DNA type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DnaType {
    #[serde(rename = "Architect")]
    Architect,
    #[serde(rename = "Alchemist")]
    Alchemist,
    #[serde(rename = "Blurred Identity")]
    BlurredIdentity,
    #[serde(rename = "Unfocused Potential")]
    UnfocusedPotential,
}

impl DnaType {
    /// Display name, also used as the stored value.
    pub fn as_str(&self) -> &'static str {
        match self {
            DnaType::Architect => "Architect",
            DnaType::Alchemist => "Alchemist",
            DnaType::BlurredIdentity => "Blurred Identity",
            DnaType::UnfocusedPotential => "Unfocused Potential",
        }
    }
}

impl fmt::Display for DnaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DnaType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Architect" => Ok(DnaType::Architect),
            "Alchemist" => Ok(DnaType::Alchemist),
            "Blurred Identity" => Ok(DnaType::BlurredIdentity),
            "Unfocused Potential" => Ok(DnaType::UnfocusedPotential),
            other => Err(ValidationError::invalid_format(
                "dominant_type",
                format!("unknown DNA type '{}'", other),
            )),
        }
    }
}
