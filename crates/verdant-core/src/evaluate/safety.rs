//! Safety-group evaluators: release potential, fire/explosives,
//! reaction/decomposition and acute toxicity.

use super::{invalid, milli, round3, ONE, ZERO};
use crate::error::VerdantError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const RELEASE: &str = "release potential";
const FIRE: &str = "fire/explosives";
const REACTION: &str = "reaction/decomposition";
const ACUTE: &str = "acute toxicity";

/// Release potential assigned to solids and involatile liquids. Kept at full
/// precision so such reagents still register a non-zero contribution.
pub const INVOLATILE_RELEASE: Decimal = Decimal::from_parts(1, 0, 0, false, 4);

const MIN_BOILING_POINT_C: f64 = 30.0;
const MAX_BOILING_POINT_C: f64 = 200.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ReleasePotentialPath {
    /// Dissolved gas or highly volatile liquid.
    VolatileGas,
    /// Solid or involatile liquid.
    Involatile,
    VolatileLiquid {
        boiling_point_c: f64,
        #[serde(default)]
        structure: StructuralCorrection,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructuralCorrection {
    #[default]
    Standard,
    Alcohol,
    Ether,
    BranchedAlkane,
}

impl StructuralCorrection {
    pub fn value(&self) -> f64 {
        match self {
            StructuralCorrection::Standard => 0.0,
            StructuralCorrection::Alcohol => -0.045,
            StructuralCorrection::Ether => 0.015,
            StructuralCorrection::BranchedAlkane => 0.075,
        }
    }
}

pub fn release_potential(path: &ReleasePotentialPath) -> Result<Decimal, VerdantError> {
    match path {
        ReleasePotentialPath::VolatileGas => Ok(ONE),
        ReleasePotentialPath::Involatile => Ok(INVOLATILE_RELEASE),
        ReleasePotentialPath::VolatileLiquid {
            boiling_point_c,
            structure,
        } => {
            let tbp = *boiling_point_c;
            if !(MIN_BOILING_POINT_C..=MAX_BOILING_POINT_C).contains(&tbp) {
                return Err(invalid(
                    RELEASE,
                    format!(
                        "boiling point {} °C outside {}-{} °C",
                        tbp, MIN_BOILING_POINT_C, MAX_BOILING_POINT_C
                    ),
                ));
            }
            let rp = 0.885 - 0.00333 * tbp + structure.value();
            round3(RELEASE, rp.max(0.0))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class", rename_all = "snake_case")]
pub enum FirePath {
    /// Water, inert gases and other non-combustible inorganics.
    InertInorganic,
    InorganicSalt,
    Combustible {
        oxidizer: OxidizerCode,
        #[serde(default)]
        flash_point: Option<FlashPointClass>,
    },
}

/// Oxidizer hazard phrase carried by the substance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OxidizerCode {
    R7,
    R8,
    R9,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlashPointClass {
    /// Below 23 °C.
    A,
    /// 23-60 °C.
    B,
    /// 60-93 °C.
    C,
    /// Above 93 °C or non-flammable.
    D,
}

pub fn fire_explosives(path: &FirePath) -> Result<Decimal, VerdantError> {
    match path {
        FirePath::InertInorganic | FirePath::InorganicSalt => Ok(ZERO),
        FirePath::Combustible { oxidizer, .. } if *oxidizer != OxidizerCode::None => Ok(ONE),
        FirePath::Combustible { flash_point, .. } => match flash_point {
            Some(FlashPointClass::A) => Ok(ONE),
            Some(FlashPointClass::B) => Ok(milli(500)),
            Some(FlashPointClass::C) | Some(FlashPointClass::D) => Ok(ZERO),
            None => Err(invalid(
                FIRE,
                "flash-point class is required when no oxidizer code applies",
            )),
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionForm {
    Pure,
    DiluteAqueous,
}

/// NFPA 704 white-quadrant special hazard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NfpaWhite {
    Water,
    Oxidizer,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionPath {
    pub form: ReactionForm,
    #[serde(default)]
    pub nfpa_white: Option<NfpaWhite>,
    #[serde(default)]
    pub strong_acid_or_base: bool,
    #[serde(default)]
    pub nfpa_yellow: Option<u8>,
    /// Peroxide-forming or otherwise unstable groups in the structure.
    #[serde(default)]
    pub unstable_groups: Option<bool>,
}

pub fn reaction_decomposition(path: &ReactionPath) -> Result<Decimal, VerdantError> {
    if path.form == ReactionForm::DiluteAqueous {
        return Ok(ZERO);
    }
    let incompatible = matches!(path.nfpa_white, Some(NfpaWhite::Water | NfpaWhite::Oxidizer))
        || path.strong_acid_or_base;
    if incompatible {
        return Ok(milli(800));
    }
    if let Some(yellow) = path.nfpa_yellow {
        return match yellow {
            0 => Ok(ZERO),
            1 => Ok(milli(600)),
            2..=4 => Ok(milli(800)),
            _ => Err(invalid(
                REACTION,
                format!("NFPA yellow rating {} outside 0-4", yellow),
            )),
        };
    }
    match path.unstable_groups {
        Some(true) => Ok(milli(600)),
        Some(false) => Ok(ZERO),
        None => Err(invalid(
            REACTION,
            "either an NFPA yellow rating or the unstable-groups flag is required",
        )),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "route", rename_all = "snake_case")]
pub enum AcuteToxicityPath {
    /// Volatile substance with a published IDLH.
    Inhalation { idlh_ppm: f64, molecular_weight: f64 },
    /// Solid or involatile substance with an oral LD50.
    Oral { ld50_mg_per_kg: f64 },
}

pub fn acute_toxicity(path: &AcuteToxicityPath) -> Result<Decimal, VerdantError> {
    match path {
        AcuteToxicityPath::Inhalation {
            idlh_ppm,
            molecular_weight,
        } => {
            if *idlh_ppm <= 0.0 || *molecular_weight <= 0.0 {
                return Err(invalid(
                    ACUTE,
                    "IDLH and molecular weight must both be positive",
                ));
            }
            // ppm to mg/m³ at 25 °C
            let concentration = idlh_ppm * molecular_weight / 24.45;
            let value = 1.24 - 0.25 * concentration.log10();
            round3(ACUTE, value.clamp(0.0, 1.0))
        }
        AcuteToxicityPath::Oral { ld50_mg_per_kg } => {
            let ld50 = *ld50_mg_per_kg;
            if ld50 <= 0.0 {
                return Err(invalid(ACUTE, format!("LD50 {} must be positive", ld50)));
            }
            if ld50 >= 2000.0 {
                return Ok(ZERO);
            }
            if ld50 <= 20.0 {
                return Ok(ONE);
            }
            let value = 1.74 - 0.53 * ld50.log10();
            round3(ACUTE, value.clamp(0.0, 1.0))
        }
    }
}
