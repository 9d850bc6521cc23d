use super::{invalid, milli, round3, ONE, ZERO};
use crate::error::VerdantError;
use crate::model::as_f64;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const REGENERATION: &str = "regeneration";
const DISPOSAL: &str = "disposal";

/// Origin of the reagent, from renewable to depleting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegenerationLevel {
    Natural,
    Circular,
    SimpleSynthetic,
    ComplexSynthetic,
    Depletion,
}

impl RegenerationLevel {
    pub fn value(&self) -> Decimal {
        match self {
            RegenerationLevel::Natural => ZERO,
            RegenerationLevel::Circular => milli(250),
            RegenerationLevel::SimpleSynthetic => milli(500),
            RegenerationLevel::ComplexSynthetic => milli(750),
            RegenerationLevel::Depletion => ONE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RegenerationInput {
    Level { level: RegenerationLevel },
    Value { value: f64 },
}

pub fn regeneration(input: &RegenerationInput) -> Result<Decimal, VerdantError> {
    match input {
        RegenerationInput::Level { level } => Ok(level.value()),
        RegenerationInput::Value { value } => {
            if !(0.0..=1.0).contains(value) {
                return Err(invalid(
                    REGENERATION,
                    format!("value {} outside [0, 1]", value),
                ));
            }
            round3(REGENERATION, *value)
        }
    }
}

/// Intrinsic disposal resistance, L1 (none) to L5 (hazardous waste).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisposalResistance {
    L1,
    L2,
    L3,
    L4,
    L5,
}

impl DisposalResistance {
    pub fn value(&self) -> Decimal {
        match self {
            DisposalResistance::L1 => ZERO,
            DisposalResistance::L2 => milli(250),
            DisposalResistance::L3 => milli(500),
            DisposalResistance::L4 => milli(750),
            DisposalResistance::L5 => ONE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisposalPath {
    pub resistance: DisposalResistance,
    /// Share of the waste recovered or recycled, 0-100.
    #[serde(default)]
    pub recycled_percent: f64,
}

/// `D = D_int · (1 − P/100 · 0.8)`: full recycling removes at most 80 % of
/// the intrinsic burden.
pub fn disposal(path: &DisposalPath) -> Result<Decimal, VerdantError> {
    let pct = path.recycled_percent;
    if !(0.0..=100.0).contains(&pct) {
        return Err(invalid(
            DISPOSAL,
            format!("recycled percentage {} outside 0-100", pct),
        ));
    }
    let d = as_f64(path.resistance.value()) * (1.0 - pct / 100.0 * 0.8);
    round3(DISPOSAL, d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_regeneration_levels() {
        let level = |level| regeneration(&RegenerationInput::Level { level }).unwrap();
        assert_eq!(level(RegenerationLevel::Natural), dec!(0));
        assert_eq!(level(RegenerationLevel::ComplexSynthetic), dec!(0.75));
        assert_eq!(level(RegenerationLevel::Depletion), dec!(1));
    }

    #[test]
    fn test_regeneration_explicit_value() {
        assert_eq!(
            regeneration(&RegenerationInput::Value { value: 0.3333 }).unwrap(),
            dec!(0.333)
        );
        assert!(regeneration(&RegenerationInput::Value { value: 1.2 }).is_err());
    }

    #[test]
    fn test_regeneration_untagged_json() {
        let input: RegenerationInput = serde_json::from_str(r#"{"level":"circular"}"#).unwrap();
        assert_eq!(regeneration(&input).unwrap(), dec!(0.25));
        let input: RegenerationInput = serde_json::from_str(r#"{"value":0.4}"#).unwrap();
        assert_eq!(regeneration(&input).unwrap(), dec!(0.4));
    }

    #[test]
    fn test_disposal_formula() {
        let d = |resistance, recycled_percent| {
            disposal(&DisposalPath {
                resistance,
                recycled_percent,
            })
        };
        assert_eq!(d(DisposalResistance::L5, 0.0).unwrap(), dec!(1));
        assert_eq!(d(DisposalResistance::L5, 100.0).unwrap(), dec!(0.2));
        assert_eq!(d(DisposalResistance::L3, 50.0).unwrap(), dec!(0.3));
        assert_eq!(d(DisposalResistance::L1, 100.0).unwrap(), dec!(0));
        assert!(d(DisposalResistance::L2, 101.0).is_err());
    }
}
