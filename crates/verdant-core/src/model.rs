use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One of the nine hazard sub-factors, keyed the way weight vectors name them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SubFactor {
    S1,
    S2,
    S3,
    S4,
    H1,
    H2,
    E1,
    E2,
    E3,
}

impl SubFactor {
    pub const ALL: [SubFactor; 9] = [
        SubFactor::S1,
        SubFactor::S2,
        SubFactor::S3,
        SubFactor::S4,
        SubFactor::H1,
        SubFactor::H2,
        SubFactor::E1,
        SubFactor::E2,
        SubFactor::E3,
    ];

    /// Weight-vector key (e.g., "S1").
    pub fn key(&self) -> &'static str {
        match self {
            SubFactor::S1 => "S1",
            SubFactor::S2 => "S2",
            SubFactor::S3 => "S3",
            SubFactor::S4 => "S4",
            SubFactor::H1 => "H1",
            SubFactor::H2 => "H2",
            SubFactor::E1 => "E1",
            SubFactor::E2 => "E2",
            SubFactor::E3 => "E3",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubFactor::S1 => "Release potential",
            SubFactor::S2 => "Fire/explosives",
            SubFactor::S3 => "Reaction/decomposition",
            SubFactor::S4 => "Acute toxicity",
            SubFactor::H1 => "Irritation",
            SubFactor::H2 => "Chronic toxicity",
            SubFactor::E1 => "Persistency",
            SubFactor::E2 => "Air hazard",
            SubFactor::E3 => "Water hazard",
        }
    }

    pub fn group(&self) -> FactorGroup {
        match self {
            SubFactor::S1 | SubFactor::S2 | SubFactor::S3 | SubFactor::S4 => FactorGroup::Safety,
            SubFactor::H1 | SubFactor::H2 => FactorGroup::Health,
            SubFactor::E1 | SubFactor::E2 | SubFactor::E3 => FactorGroup::Environment,
        }
    }
}

impl fmt::Display for SubFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// The three main-factor groups the sub-factors roll up into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorGroup {
    Safety,
    Health,
    Environment,
}

impl FactorGroup {
    pub fn members(&self) -> &'static [SubFactor] {
        match self {
            FactorGroup::Safety => &SubFactor::ALL[0..4],
            FactorGroup::Health => &SubFactor::ALL[4..6],
            FactorGroup::Environment => &SubFactor::ALL[6..9],
        }
    }
}

/// Per-sub-factor numeric values (mass-weighted totals or 0-100 scores).
pub type SubFactorMap = BTreeMap<SubFactor, f64>;

/// The nine authored sub-factor values of a reagent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubFactors {
    pub release_potential: Decimal,
    pub fire_explosives: Decimal,
    pub reaction_decomposition: Decimal,
    pub acute_toxicity: Decimal,
    pub irritation: Decimal,
    pub chronic_toxicity: Decimal,
    pub persistency: Decimal,
    pub air_hazard: Decimal,
    pub water_hazard: Decimal,
}

impl SubFactors {
    pub fn get(&self, factor: SubFactor) -> Decimal {
        match factor {
            SubFactor::S1 => self.release_potential,
            SubFactor::S2 => self.fire_explosives,
            SubFactor::S3 => self.reaction_decomposition,
            SubFactor::S4 => self.acute_toxicity,
            SubFactor::H1 => self.irritation,
            SubFactor::H2 => self.chronic_toxicity,
            SubFactor::E1 => self.persistency,
            SubFactor::E2 => self.air_hazard,
            SubFactor::E3 => self.water_hazard,
        }
    }

    pub fn set(&mut self, factor: SubFactor, value: Decimal) {
        let slot = match factor {
            SubFactor::S1 => &mut self.release_potential,
            SubFactor::S2 => &mut self.fire_explosives,
            SubFactor::S3 => &mut self.reaction_decomposition,
            SubFactor::S4 => &mut self.acute_toxicity,
            SubFactor::H1 => &mut self.irritation,
            SubFactor::H2 => &mut self.chronic_toxicity,
            SubFactor::E1 => &mut self.persistency,
            SubFactor::E2 => &mut self.air_hazard,
            SubFactor::E3 => &mut self.water_hazard,
        };
        *slot = value;
    }

    /// Sum of the sub-factors belonging to one group.
    pub fn group_sum(&self, group: FactorGroup) -> Decimal {
        group.members().iter().map(|f| self.get(*f)).sum()
    }
}

/// A reagent's library record.
///
/// The safety/health/environment scores are derived on demand and never
/// stored, so they cannot drift from the sub-factors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReagentFactor {
    pub name: String,
    /// Density in g/mL.
    pub density: Decimal,
    pub sub_factors: SubFactors,
    /// Regeneration (R) base coefficient in [0, 1].
    pub regeneration: Decimal,
    /// Disposal (D) base coefficient in [0, 1].
    pub disposal: Decimal,
}

impl ReagentFactor {
    pub fn safety_score(&self) -> Decimal {
        self.sub_factors.group_sum(FactorGroup::Safety)
    }

    pub fn health_score(&self) -> Decimal {
        self.sub_factors.group_sum(FactorGroup::Health)
    }

    pub fn env_score(&self) -> Decimal {
        self.sub_factors.group_sum(FactorGroup::Environment)
    }
}

/// Analysis stage a reagent quantity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Instrument,
    Preparation,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Instrument => write!(f, "Instrument analysis"),
            Stage::Preparation => write!(f, "Sample preparation"),
        }
    }
}

/// Lossless-enough conversion for feeding authored decimals into float math.
pub(crate) fn as_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}
