//! Named and custom weight vectors for the five weighting slots.
//!
//! Presets are compiled in from `presets/weight-schemes.json` and are taken
//! as already valid. Custom vectors are checked every time they are applied.

use crate::error::VerdantError;
use crate::model::as_f64;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

const WEIGHT_SCHEMES_JSON: &str = include_str!("../../../../presets/weight-schemes.json");

/// Selection value that switches a slot to its custom vector.
pub const CUSTOM_SCHEME: &str = "custom";

/// Largest accepted deviation of a custom vector's sum from 1, exclusive.
pub const WEIGHT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 3);

pub type WeightVector = BTreeMap<String, Decimal>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightSlot {
    Safety,
    Health,
    Environment,
    Stage,
    Final,
}

impl WeightSlot {
    pub const ALL: [WeightSlot; 5] = [
        WeightSlot::Safety,
        WeightSlot::Health,
        WeightSlot::Environment,
        WeightSlot::Stage,
        WeightSlot::Final,
    ];

    /// Factor keys a vector for this slot must carry, no more and no fewer.
    pub fn keys(&self) -> &'static [&'static str] {
        match self {
            WeightSlot::Safety => &["S1", "S2", "S3", "S4"],
            WeightSlot::Health => &["H1", "H2"],
            WeightSlot::Environment => &["E1", "E2", "E3"],
            WeightSlot::Stage => &["S", "H", "E", "R", "D", "P"],
            WeightSlot::Final => &["instrument", "preparation"],
        }
    }

    pub fn default_scheme(&self) -> &'static str {
        match self {
            WeightSlot::Safety => "PBT_Balanced",
            WeightSlot::Health => "Absolute_Balance",
            WeightSlot::Environment => "PBT_Balanced",
            WeightSlot::Stage => "Balanced",
            WeightSlot::Final => "Standard",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeightSlot::Safety => "safety",
            WeightSlot::Health => "health",
            WeightSlot::Environment => "environment",
            WeightSlot::Stage => "stage",
            WeightSlot::Final => "final",
        }
    }
}

impl fmt::Display for WeightSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WeightSlot {
    type Err = VerdantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WeightSlot::ALL
            .into_iter()
            .find(|slot| slot.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                VerdantError::InvalidRequest(format!(
                    "unknown weight slot '{}' (expected safety, health, environment, stage or final)",
                    s
                ))
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedScheme {
    pub name: String,
    pub weights: WeightVector,
}

#[derive(Debug, Deserialize)]
struct SchemeCatalog {
    safety: Vec<NamedScheme>,
    health: Vec<NamedScheme>,
    environment: Vec<NamedScheme>,
    stage: Vec<NamedScheme>,
    #[serde(rename = "final")]
    final_: Vec<NamedScheme>,
}

impl SchemeCatalog {
    fn slot(&self, slot: WeightSlot) -> &[NamedScheme] {
        match slot {
            WeightSlot::Safety => &self.safety,
            WeightSlot::Health => &self.health,
            WeightSlot::Environment => &self.environment,
            WeightSlot::Stage => &self.stage,
            WeightSlot::Final => &self.final_,
        }
    }
}

static CATALOG: LazyLock<SchemeCatalog> = LazyLock::new(|| {
    serde_json::from_str(WEIGHT_SCHEMES_JSON).expect("embedded weight-schemes.json is valid")
});

/// Preset names for a slot, in catalogue order.
pub fn available_schemes(slot: WeightSlot) -> Vec<&'static str> {
    CATALOG.slot(slot).iter().map(|s| s.name.as_str()).collect()
}

/// Look up a preset by name (case-insensitive).
pub fn scheme_weights(slot: WeightSlot, name: &str) -> Result<&'static NamedScheme, VerdantError> {
    CATALOG
        .slot(slot)
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| VerdantError::UnknownScheme {
            slot: slot.to_string(),
            name: name.to_string(),
            available: available_schemes(slot).join(", "),
        })
}

/// Check a custom vector: exact key set, non-negative entries, and a sum
/// strictly within [`WEIGHT_TOLERANCE`] of 1. Vectors are never renormalized.
pub fn validate_custom(slot: WeightSlot, weights: &WeightVector) -> Result<(), VerdantError> {
    let reject = |reason: String| VerdantError::InvalidWeightVector {
        slot: slot.to_string(),
        reason,
    };
    for key in slot.keys() {
        if !weights.contains_key(*key) {
            return Err(reject(format!("missing weight for '{}'", key)));
        }
    }
    for (key, value) in weights {
        if !slot.keys().contains(&key.as_str()) {
            return Err(reject(format!(
                "unexpected key '{}' (expected {})",
                key,
                slot.keys().join(", ")
            )));
        }
        if *value < Decimal::ZERO {
            return Err(reject(format!("weight for '{}' is negative ({})", key, value)));
        }
    }
    let sum: Decimal = weights.values().sum();
    if (sum - Decimal::ONE).abs() >= WEIGHT_TOLERANCE {
        return Err(reject(format!(
            "weights sum to {}, expected 1.000 ± {}",
            sum, WEIGHT_TOLERANCE
        )));
    }
    Ok(())
}

/// A weight vector ready for combination, with the name it was chosen by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedWeights {
    pub scheme: String,
    pub weights: WeightVector,
}

impl ResolvedWeights {
    pub fn is_custom(&self) -> bool {
        self.scheme == CUSTOM_SCHEME
    }

    /// Weight for `key`; keys absent from the vector weigh nothing.
    pub fn weight(&self, key: &str) -> f64 {
        self.weights.get(key).copied().map(as_f64).unwrap_or(0.0)
    }
}

/// Resolve a slot selection to a concrete vector. `custom` is consulted only
/// when the selection is [`CUSTOM_SCHEME`].
pub fn resolve(
    slot: WeightSlot,
    selection: &str,
    custom: Option<&WeightVector>,
) -> Result<ResolvedWeights, VerdantError> {
    if selection.trim().eq_ignore_ascii_case(CUSTOM_SCHEME) {
        let weights = custom.ok_or_else(|| VerdantError::InvalidWeightVector {
            slot: slot.to_string(),
            reason: "custom scheme selected but no custom weights supplied".into(),
        })?;
        validate_custom(slot, weights)?;
        return Ok(ResolvedWeights {
            scheme: CUSTOM_SCHEME.to_string(),
            weights: weights.clone(),
        });
    }
    let preset = scheme_weights(slot, selection)?;
    Ok(ResolvedWeights {
        scheme: preset.name.clone(),
        weights: preset.weights.clone(),
    })
}
