//! Health-group evaluators. Chronic toxicity also supplies the air-hazard
//! sub-factor.

use super::{invalid, milli, round3, ONE, ZERO};
use crate::error::VerdantError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const IRRITATION: &str = "irritation";
const CHRONIC: &str = "chronic toxicity";

/// Names that trigger the fixed dichloromethane score.
const DICHLOROMETHANE_ALIASES: &[&str] = &["dichloromethane", "methylene chloride", "dcm"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IrritantClass {
    Yes,
    /// Ethanol carries irritant phrases but is exempted.
    Ethanol,
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhClass {
    Strong,
    Moderate,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TraceCode {
    R38,
    R40,
    #[serde(rename = "R20-series")]
    R20Series,
    #[serde(rename = "R50-series")]
    R50Series,
}

impl TraceCode {
    pub fn weight(&self) -> Decimal {
        match self {
            TraceCode::R38 => milli(220),
            TraceCode::R40 => milli(236),
            TraceCode::R20Series => milli(113),
            TraceCode::R50Series => milli(110),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrritationPath {
    pub corrosive: bool,
    pub irritant: IrritantClass,
    #[serde(default)]
    pub ph: Option<PhClass>,
    #[serde(default)]
    pub trace_codes: BTreeSet<TraceCode>,
}

pub fn irritation(path: &IrritationPath) -> Result<Decimal, VerdantError> {
    if path.corrosive {
        return Ok(ONE);
    }
    match path.irritant {
        IrritantClass::Yes => return Ok(milli(625)),
        IrritantClass::Ethanol => return Ok(ZERO),
        IrritantClass::No => {}
    }
    match path.ph {
        Some(PhClass::Strong) => Ok(ONE),
        Some(PhClass::Moderate) => Ok(milli(625)),
        Some(PhClass::Neutral) => Ok(path.trace_codes.iter().map(TraceCode::weight).sum()),
        None => Err(invalid(
            IRRITATION,
            "pH class is required for non-corrosive, non-irritant substances",
        )),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhysicalState {
    Solid,
    LiquidOrGas,
}

impl PhysicalState {
    /// Exposure factor K applied to the chronic score.
    pub fn factor(&self) -> f64 {
        match self {
            PhysicalState::Solid => 0.2,
            PhysicalState::LiquidOrGas => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChronicVeto {
    Corrosive,
    Carcinogen,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChronicExemption {
    SimpleAlkane,
    HarmlessSalt,
    NotExempt,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChronicToxicityPath {
    pub state: PhysicalState,
    pub veto: ChronicVeto,
    #[serde(default)]
    pub exemption: Option<ChronicExemption>,
    /// TLV-TWA in mg/m³.
    #[serde(default)]
    pub tlv_mg_m3: Option<f64>,
    #[serde(default)]
    pub alcohol: bool,
}

fn is_dichloromethane(substance: &str) -> bool {
    let lower = substance.trim().to_lowercase();
    DICHLOROMETHANE_ALIASES.contains(&lower.as_str())
}

/// Chronic toxicity for `substance`. The name is only consulted for the
/// dichloromethane exception.
pub fn chronic_toxicity(
    path: &ChronicToxicityPath,
    substance: &str,
) -> Result<Decimal, VerdantError> {
    match path.veto {
        ChronicVeto::Corrosive => return Ok(ONE),
        ChronicVeto::Carcinogen => return Ok(milli(800)),
        ChronicVeto::None => {}
    }
    match path.exemption {
        Some(ChronicExemption::SimpleAlkane | ChronicExemption::HarmlessSalt) => return Ok(ZERO),
        Some(ChronicExemption::NotExempt) => {}
        None => {
            return Err(invalid(
                CHRONIC,
                "exemption class is required when no veto applies",
            ))
        }
    }

    let k = path.state.factor();
    if is_dichloromethane(substance) {
        return round3(CHRONIC, 0.290 * k);
    }

    let tlv = match path.tlv_mg_m3 {
        Some(tlv) if tlv > 0.0 => tlv,
        Some(tlv) => {
            return Err(invalid(CHRONIC, format!("TLV {} must be positive", tlv)));
        }
        None => return Err(invalid(CHRONIC, "TLV is required for non-exempt substances")),
    };
    let mut base = (0.80 - 0.20 * tlv.log10()).max(0.0);
    if path.alcohol {
        base += 0.06;
    }
    round3(CHRONIC, (base * k).min(1.0))
}
