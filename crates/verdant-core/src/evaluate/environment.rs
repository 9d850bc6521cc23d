//! Environment-group evaluators. Air hazard has no evaluator of its own; it
//! takes the chronic-toxicity value.

use super::{invalid, milli, round3, ZERO};
use crate::error::VerdantError;
use crate::model::as_f64;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const PERSISTENCY: &str = "persistency";
const WATER: &str = "water hazard";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubstanceIdentity {
    StrongInorganicAcid,
    OtherInorganic,
    Organic,
}

/// Short-cut classes that settle persistency without a half-life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FastTrack {
    /// Very rapid degradation, negligible accumulation.
    A,
    /// Alcohol-like, low accumulation.
    B,
    /// Readily hydrolysed.
    C,
    /// Special metabolism.
    D,
    /// No fast track; fall through to the half-life calculation.
    E,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistencyStructure {
    Alcohol,
    Halogenated,
    EtherOrBranched,
    General,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistencyPath {
    pub identity: SubstanceIdentity,
    #[serde(default)]
    pub fast_track: Option<FastTrack>,
    #[serde(default)]
    pub structure: Option<PersistencyStructure>,
    /// Biodegradation half-life in days.
    #[serde(default)]
    pub half_life_days: Option<f64>,
    /// Half-life comes from a prediction model rather than measurement.
    #[serde(default)]
    pub predicted: bool,
    #[serde(default)]
    pub secondary_structure: bool,
}

fn log_half_life(path: &PersistencyPath) -> Result<f64, VerdantError> {
    match path.half_life_days {
        Some(t) if t > 0.0 => Ok(t.log10()),
        Some(t) => Err(invalid(
            PERSISTENCY,
            format!("half-life {} days must be positive", t),
        )),
        None => Err(invalid(PERSISTENCY, "biodegradation half-life is required")),
    }
}

/// Persistency score. The half-life branches are logarithmic and are not
/// clamped to [0, 1].
pub fn persistency(path: &PersistencyPath) -> Result<Decimal, VerdantError> {
    match path.identity {
        SubstanceIdentity::StrongInorganicAcid => return Ok(milli(485)),
        SubstanceIdentity::OtherInorganic => return Ok(ZERO),
        SubstanceIdentity::Organic => {}
    }
    match path.fast_track {
        Some(FastTrack::A) => return Ok(ZERO),
        Some(FastTrack::B) => return Ok(milli(26)),
        Some(FastTrack::C) => return Ok(milli(23)),
        Some(FastTrack::D) => return Ok(milli(126)),
        Some(FastTrack::E) => {}
        None => {
            return Err(invalid(
                PERSISTENCY,
                "fast-track class is required for organic substances",
            ))
        }
    }

    let structure = path.structure.ok_or_else(|| {
        invalid(
            PERSISTENCY,
            "structural class is required without a fast track",
        )
    })?;
    let value = match structure {
        PersistencyStructure::Alcohol => return Ok(milli(282)),
        PersistencyStructure::Halogenated => 0.32 * log_half_life(path)?,
        PersistencyStructure::EtherOrBranched => {
            let base = 0.45 * log_half_life(path)? + 0.18;
            if path.secondary_structure {
                base + 0.14
            } else {
                base
            }
        }
        PersistencyStructure::General => {
            let mut value = 0.45 * log_half_life(path)?;
            if path.secondary_structure {
                value += 0.05;
            }
            if path.predicted {
                value -= 0.05;
            }
            value
        }
    };
    round3(PERSISTENCY, value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterCategory {
    CorrosiveInorganic,
    InorganicSalt,
    Organic,
}

/// Acute aquatic toxicity band by LC50.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lc50Class {
    /// LC50 ≤ 1 mg/L.
    A,
    /// 1-10 mg/L.
    B,
    /// 10-100 mg/L.
    C,
    /// Above 100 mg/L.
    D,
}

impl Lc50Class {
    fn score(&self) -> Decimal {
        match self {
            Lc50Class::A => milli(500),
            Lc50Class::B => milli(250),
            Lc50Class::C => milli(125),
            Lc50Class::D => ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bioaccumulation {
    High,
    Moderate,
    #[default]
    Low,
}

impl Bioaccumulation {
    fn penalty(&self) -> Decimal {
        match self {
            Bioaccumulation::High => milli(250),
            Bioaccumulation::Moderate => milli(75),
            Bioaccumulation::Low => ZERO,
        }
    }
}

/// Residual-toxicity constant used when neither acute toxicity nor fate
/// penalties apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResidualConstant {
    Halogenated,
    Degradable,
    UltraLow,
}

impl ResidualConstant {
    pub fn value(&self) -> f64 {
        match self {
            ResidualConstant::Halogenated => 6.0,
            ResidualConstant::Degradable => 0.7,
            ResidualConstant::UltraLow => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterHazardPath {
    pub category: WaterCategory,
    #[serde(default)]
    pub lc50_class: Option<Lc50Class>,
    #[serde(default)]
    pub persistence_penalty: bool,
    #[serde(default)]
    pub bioaccumulation: Bioaccumulation,
    #[serde(default)]
    pub lc50_mg_l: Option<f64>,
    #[serde(default)]
    pub residual: Option<ResidualConstant>,
}

impl WaterHazardPath {
    fn lc50(&self) -> Result<f64, VerdantError> {
        match self.lc50_mg_l {
            Some(lc50) if lc50 > 0.0 => Ok(lc50),
            Some(lc50) => Err(invalid(WATER, format!("LC50 {} must be positive", lc50))),
            None => Err(invalid(WATER, "LC50 value is required for the residual term")),
        }
    }
}

pub fn water_hazard(path: &WaterHazardPath) -> Result<Decimal, VerdantError> {
    match path.category {
        WaterCategory::CorrosiveInorganic => return Ok(milli(500)),
        WaterCategory::InorganicSalt => return Ok(ZERO),
        WaterCategory::Organic => {}
    }
    let s2 = path
        .lc50_class
        .ok_or_else(|| invalid(WATER, "LC50 class is required for organic substances"))?
        .score();
    let persistence = if path.persistence_penalty {
        milli(125)
    } else {
        ZERO
    };
    let s3 = persistence + path.bioaccumulation.penalty();

    // The residual term switches constants depending on whether any acute or
    // fate penalty already applied.
    let s4 = if s2 + s3 > ZERO {
        if path.persistence_penalty {
            6.0 / path.lc50()?
        } else {
            0.0
        }
    } else {
        let k = path
            .residual
            .ok_or_else(|| invalid(WATER, "residual constant K is required"))?;
        k.value() / path.lc50()?
    };
    let penalties = as_f64(s2 + s3);
    round3(WATER, penalties + s4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn organic(structure: PersistencyStructure, t: f64) -> PersistencyPath {
        PersistencyPath {
            identity: SubstanceIdentity::Organic,
            fast_track: Some(FastTrack::E),
            structure: Some(structure),
            half_life_days: Some(t),
            predicted: false,
            secondary_structure: false,
        }
    }

    #[test]
    fn test_persistency_identity_and_fast_track() {
        let mut path = organic(PersistencyStructure::General, 10.0);
        path.identity = SubstanceIdentity::StrongInorganicAcid;
        assert_eq!(persistency(&path).unwrap(), dec!(0.485));

        let mut path = organic(PersistencyStructure::General, 10.0);
        path.fast_track = Some(FastTrack::D);
        assert_eq!(persistency(&path).unwrap(), dec!(0.126));

        let mut path = organic(PersistencyStructure::General, 10.0);
        path.fast_track = None;
        assert!(persistency(&path).is_err());
    }

    #[test]
    fn test_persistency_half_life_formulas() {
        assert_eq!(
            persistency(&organic(PersistencyStructure::Alcohol, 1.0)).unwrap(),
            dec!(0.282)
        );
        assert_eq!(
            persistency(&organic(PersistencyStructure::Halogenated, 100.0)).unwrap(),
            dec!(0.640)
        );
        let mut ether = organic(PersistencyStructure::EtherOrBranched, 10.0);
        assert_eq!(persistency(&ether).unwrap(), dec!(0.630));
        ether.secondary_structure = true;
        assert_eq!(persistency(&ether).unwrap(), dec!(0.770));

        let mut general = organic(PersistencyStructure::General, 10.0);
        general.secondary_structure = true;
        general.predicted = true;
        assert_eq!(persistency(&general).unwrap(), dec!(0.450));
    }

    #[test]
    fn test_persistency_is_not_clamped() {
        let value = persistency(&organic(PersistencyStructure::General, 1000.0)).unwrap();
        assert_eq!(value, dec!(1.350));
        let value = persistency(&organic(PersistencyStructure::Halogenated, 0.5)).unwrap();
        assert!(value < Decimal::ZERO);
    }

    #[test]
    fn test_persistency_requires_half_life() {
        let mut path = organic(PersistencyStructure::General, 1.0);
        path.half_life_days = None;
        assert!(persistency(&path).is_err());
        path.half_life_days = Some(0.0);
        assert!(persistency(&path).is_err());
    }

    fn organic_water(class: Lc50Class) -> WaterHazardPath {
        WaterHazardPath {
            category: WaterCategory::Organic,
            lc50_class: Some(class),
            persistence_penalty: false,
            bioaccumulation: Bioaccumulation::Low,
            lc50_mg_l: None,
            residual: None,
        }
    }

    #[test]
    fn test_water_inorganic_shortcuts() {
        let mut path = organic_water(Lc50Class::A);
        path.category = WaterCategory::CorrosiveInorganic;
        assert_eq!(water_hazard(&path).unwrap(), dec!(0.5));
        path.category = WaterCategory::InorganicSalt;
        assert_eq!(water_hazard(&path).unwrap(), dec!(0));
    }

    #[test]
    fn test_water_penalties_without_persistence() {
        let mut path = organic_water(Lc50Class::B);
        path.bioaccumulation = Bioaccumulation::Moderate;
        assert_eq!(water_hazard(&path).unwrap(), dec!(0.325));
    }

    #[test]
    fn test_water_persistence_adds_lc50_residual() {
        let mut path = organic_water(Lc50Class::C);
        path.persistence_penalty = true;
        path.lc50_mg_l = Some(60.0);
        // 0.125 + 0.125 + 6/60
        assert_eq!(water_hazard(&path).unwrap(), dec!(0.350));
        path.lc50_mg_l = None;
        assert!(water_hazard(&path).is_err());
    }

    #[test]
    fn test_water_residual_constant_when_no_penalty() {
        let mut path = organic_water(Lc50Class::D);
        path.lc50_mg_l = Some(350.0);
        path.residual = Some(ResidualConstant::Degradable);
        assert_eq!(water_hazard(&path).unwrap(), dec!(0.002));
        path.residual = Some(ResidualConstant::UltraLow);
        assert_eq!(water_hazard(&path).unwrap(), dec!(0));
        path.residual = None;
        assert!(water_hazard(&path).is_err());
    }

    #[test]
    fn test_water_missing_lc50_class() {
        let mut path = organic_water(Lc50Class::A);
        path.lc50_class = None;
        assert_eq!(water_hazard(&path).unwrap_err().kind(), "invalid_decision_path");
    }
}
