//! Subtype catalog used to enrich a classification for display.
//!
//! The subtype is derived from the dominant type plus a secondary signal:
//! the lean direction (for Blurred Identity) and the awareness band. It never
//! feeds back into scoring or eligibility.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::dna_type::{Axis, DnaType};
use crate::domain::foundation::{Percentage, ValidationError};

/// Stable identifier of a subtype profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubtypeSlug {
    // Architect
    SystemisedBuilder,
    InternalAnalyzer,
    MasterStrategist,
    UltimateStrategist,
    // Alchemist
    VisionaryOracle,
    MagneticPerfectionist,
    EnergeticEmpath,
    UltimateAlchemist,
    // Blurred
    Overthinker,
    Performer,
    SelfForsaker,
    SelfBetrayer,
}

impl SubtypeSlug {
    pub const ALL: [SubtypeSlug; 12] = [
        SubtypeSlug::SystemisedBuilder,
        SubtypeSlug::InternalAnalyzer,
        SubtypeSlug::MasterStrategist,
        SubtypeSlug::UltimateStrategist,
        SubtypeSlug::VisionaryOracle,
        SubtypeSlug::MagneticPerfectionist,
        SubtypeSlug::EnergeticEmpath,
        SubtypeSlug::UltimateAlchemist,
        SubtypeSlug::Overthinker,
        SubtypeSlug::Performer,
        SubtypeSlug::SelfForsaker,
        SubtypeSlug::SelfBetrayer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubtypeSlug::SystemisedBuilder => "systemised-builder",
            SubtypeSlug::InternalAnalyzer => "internal-analyzer",
            SubtypeSlug::MasterStrategist => "master-strategist",
            SubtypeSlug::UltimateStrategist => "ultimate-strategist",
            SubtypeSlug::VisionaryOracle => "visionary-oracle",
            SubtypeSlug::MagneticPerfectionist => "magnetic-perfectionist",
            SubtypeSlug::EnergeticEmpath => "energetic-empath",
            SubtypeSlug::UltimateAlchemist => "ultimate-alchemist",
            SubtypeSlug::Overthinker => "overthinker",
            SubtypeSlug::Performer => "performer",
            SubtypeSlug::SelfForsaker => "self-forsaker",
            SubtypeSlug::SelfBetrayer => "self-betrayer",
        }
    }

    /// Picks the subtype for a classification.
    ///
    /// The result always belongs to the category of `dominant`. Aware types
    /// split by awareness band, lowest band first. Blurred Identity splits by
    /// awareness and, below the medium band, by lean direction. `lean` is the
    /// axis with the higher score, `None` on a tie.
    pub fn derive(dominant: DnaType, lean: Option<Axis>, awareness: Percentage) -> Self {
        let pct = awareness.value();
        match dominant {
            DnaType::Architect => match pct {
                100 => SubtypeSlug::UltimateStrategist,
                90..=99 => SubtypeSlug::MasterStrategist,
                80..=89 => SubtypeSlug::InternalAnalyzer,
                _ => SubtypeSlug::SystemisedBuilder,
            },
            DnaType::Alchemist => match pct {
                100 => SubtypeSlug::UltimateAlchemist,
                90..=99 => SubtypeSlug::MagneticPerfectionist,
                80..=89 => SubtypeSlug::EnergeticEmpath,
                _ => SubtypeSlug::VisionaryOracle,
            },
            DnaType::BlurredIdentity | DnaType::UnfocusedPotential => match (pct, lean) {
                (70..=100, _) => SubtypeSlug::Performer,
                (40..=69, _) | (_, None) => SubtypeSlug::Overthinker,
                (_, Some(Axis::Architect)) => SubtypeSlug::SelfBetrayer,
                (_, Some(Axis::Alchemist)) => SubtypeSlug::SelfForsaker,
            },
        }
    }

    /// Static profile copy for this subtype.
    pub fn profile(&self) -> &'static SubtypeProfile {
        // CATALOG is declared in ALL order.
        let index = SubtypeSlug::ALL
            .iter()
            .position(|slug| slug == self)
            .unwrap_or(0);
        &CATALOG[index]
    }
}

impl fmt::Display for SubtypeSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubtypeSlug {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SubtypeSlug::ALL
            .iter()
            .copied()
            .find(|slug| slug.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format("subtype", format!("unknown subtype '{}'", s))
            })
    }
}

/// Family a subtype belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtypeCategory {
    Architect,
    Alchemist,
    Blurred,
}

impl SubtypeCategory {
    /// Category whose subtypes a classification draws from.
    pub fn of(dominant: DnaType) -> Self {
        match dominant {
            DnaType::Architect => SubtypeCategory::Architect,
            DnaType::Alchemist => SubtypeCategory::Alchemist,
            DnaType::BlurredIdentity | DnaType::UnfocusedPotential => SubtypeCategory::Blurred,
        }
    }
}

/// Display copy for one subtype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubtypeProfile {
    pub slug: SubtypeSlug,
    pub name: &'static str,
    pub category: SubtypeCategory,
    pub operating_loop: &'static str,
    pub core_identity: &'static str,
    pub opposite_awareness: &'static str,
    pub edge: &'static str,
    pub risks: &'static str,
    pub next_steps: &'static str,
}

const ARCHITECT_LOOP: &str = "Thought → Emotion → Thought";
const ALCHEMIST_LOOP: &str = "Emotion → Thought → Emotion";

static CATALOG: [SubtypeProfile; 12] = [
    SubtypeProfile {
        slug: SubtypeSlug::SystemisedBuilder,
        name: "The Systemised Builder",
        category: SubtypeCategory::Architect,
        operating_loop: ARCHITECT_LOOP,
        core_identity: "Hands-on executor who builds what others imagine. Works steadily with clear instruction and trust.",
        opposite_awareness: "Low awareness of Alchemist traits",
        edge: "Steady execution, system building",
        risks: "Needs external direction, limited vision",
        next_steps: "Partner with visionaries for direction",
    },
    SubtypeProfile {
        slug: SubtypeSlug::InternalAnalyzer,
        name: "The Internal Analyzer",
        category: SubtypeCategory::Architect,
        operating_loop: ARCHITECT_LOOP,
        core_identity: "Seeks perfection through systems. Data-led and detail-led, prone to analysis loops.",
        opposite_awareness: "Medium awareness of Alchemist traits",
        edge: "Deep analysis, systematic perfection",
        risks: "Analysis paralysis, over-optimization",
        next_steps: "Add emotional calibration to decision-making",
    },
    SubtypeProfile {
        slug: SubtypeSlug::MasterStrategist,
        name: "The Master Strategist",
        category: SubtypeCategory::Architect,
        operating_loop: ARCHITECT_LOOP,
        core_identity: "Calm, calculated, high-trust leader who leads through logic and excels at delegation.",
        opposite_awareness: "Medium awareness of Alchemist traits",
        edge: "Strategic leadership, logical delegation",
        risks: "Emotional disconnection, performance-only focus",
        next_steps: "Integrate emotional connection into leadership",
    },
    SubtypeProfile {
        slug: SubtypeSlug::UltimateStrategist,
        name: "The Ultimate Strategist",
        category: SubtypeCategory::Architect,
        operating_loop: ARCHITECT_LOOP,
        core_identity: "Silent precision and simplified clarity. Constantly recalculates, repositions instead of freezing.",
        opposite_awareness: "High awareness of Alchemist traits",
        edge: "Strategic precision with emotional respect",
        risks: "Over-optimization, emotional distance",
        next_steps: "Balance efficiency with human connection",
    },
    SubtypeProfile {
        slug: SubtypeSlug::VisionaryOracle,
        name: "The Visionary Oracle",
        category: SubtypeCategory::Alchemist,
        operating_loop: ALCHEMIST_LOOP,
        core_identity: "Sees the future, struggles to finish. Hyper-intuitive about trends, needs containers to complete a vision.",
        opposite_awareness: "Low awareness of Architect traits",
        edge: "Intuitive pattern recognition, cultural sensing",
        risks: "Procrastination, burnout, incomplete projects",
        next_steps: "Build containers and systems for completion",
    },
    SubtypeProfile {
        slug: SubtypeSlug::MagneticPerfectionist,
        name: "The Magnetic Perfectionist",
        category: SubtypeCategory::Alchemist,
        operating_loop: ALCHEMIST_LOOP,
        core_identity: "Organised to deliver aligned perfection. Creates emotional structure rather than logic.",
        opposite_awareness: "Medium awareness of Architect traits",
        edge: "Emotional structure, consistent delivery",
        risks: "Over-ownership, impossibly high standards",
        next_steps: "Find collaborators who match delivery frequency",
    },
    SubtypeProfile {
        slug: SubtypeSlug::EnergeticEmpath,
        name: "The Energetic Empath",
        category: SubtypeCategory::Alchemist,
        operating_loop: ALCHEMIST_LOOP,
        core_identity: "Heals with energy and absorbs with intensity. Uplifts others, has high recharge needs.",
        opposite_awareness: "Medium awareness of Architect traits",
        edge: "Energy healing, emotional uplift",
        risks: "Emotional absorption, burnout from others' energy",
        next_steps: "Develop logical frameworks to balance intuition",
    },
    SubtypeProfile {
        slug: SubtypeSlug::UltimateAlchemist,
        name: "The Ultimate Alchemist",
        category: SubtypeCategory::Alchemist,
        operating_loop: ALCHEMIST_LOOP,
        core_identity: "Carries every Alchemist gift with full awareness of structure, without executing like an Architect.",
        opposite_awareness: "High awareness of Architect traits",
        edge: "Complete Alchemist gifts with structural awareness",
        risks: "Choosing growth over stability",
        next_steps: "Balance growth impulses with sustainable systems",
    },
    SubtypeProfile {
        slug: SubtypeSlug::Overthinker,
        name: "The Overthinker",
        category: SubtypeCategory::Blurred,
        operating_loop: "Suppressed or Adapted",
        core_identity: "Trapped between modes and frozen by options. Thinks like an Architect, feels like an Alchemist.",
        opposite_awareness: "Medium awareness of both modes",
        edge: "Sees multiple perspectives",
        risks: "Decision paralysis, identity confusion",
        next_steps: "Choose one primary operating mode",
    },
    SubtypeProfile {
        slug: SubtypeSlug::Performer,
        name: "The Performer",
        category: SubtypeCategory::Blurred,
        operating_loop: "Suppressed or Adapted",
        core_identity: "Acts with apparent clarity while hiding confusion. Excels outwardly, drifts internally.",
        opposite_awareness: "High awareness of both modes",
        edge: "Adaptability, external success",
        risks: "Internal confusion, inauthentic performance",
        next_steps: "Reconnect with authentic identity",
    },
    SubtypeProfile {
        slug: SubtypeSlug::SelfForsaker,
        name: "The Self-Forsaker",
        category: SubtypeCategory::Blurred,
        operating_loop: "Suppressed Emotion",
        core_identity: "Origin Alchemist who suppressed emotion under pressure and now performs logic, unfulfilled.",
        opposite_awareness: "Low awareness - suppressed natural mode",
        edge: "Can perform logical tasks",
        risks: "Deep unfulfillment, disconnection from self",
        next_steps: "Reconnect with emotional intelligence",
    },
    SubtypeProfile {
        slug: SubtypeSlug::SelfBetrayer,
        name: "The Self-Betrayer",
        category: SubtypeCategory::Blurred,
        operating_loop: "Abandoned Structure",
        core_identity: "Origin Architect who traded logic for emotional acceptance. Feels everything but lacks clarity.",
        opposite_awareness: "Low awareness - abandoned natural mode",
        edge: "Emotional sensitivity",
        risks: "Lack of structure, emotional overwhelm",
        next_steps: "Restore logical frameworks and structure",
    },
];
