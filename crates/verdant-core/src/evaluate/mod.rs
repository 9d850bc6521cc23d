//! Decision-tree evaluators that turn chemical and regulatory data into the
//! nine hazard sub-factors plus the R and D base coefficients of a reagent.
//!
//! Each evaluator takes a tagged decision path and walks its branches in
//! priority order. A branch that needs an input the path does not carry is an
//! [`VerdantError::InvalidDecisionPath`], never a silent zero. Computed values
//! are rounded to three decimals.

pub mod environment;
pub mod health;
pub mod resources;
pub mod safety;

use crate::error::VerdantError;
use crate::model::{ReagentFactor, SubFactors};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::debug;

use environment::{PersistencyPath, WaterHazardPath};
use health::{ChronicToxicityPath, IrritationPath};
use resources::{DisposalPath, RegenerationInput};
use safety::{AcuteToxicityPath, FirePath, ReactionPath, ReleasePotentialPath};

pub(crate) const ZERO: Decimal = Decimal::ZERO;
pub(crate) const ONE: Decimal = Decimal::ONE;

/// Thousandths as a const Decimal (e.g., `milli(625)` is 0.625).
pub(crate) const fn milli(n: u32) -> Decimal {
    Decimal::from_parts(n, 0, 0, false, 3)
}

pub(crate) fn invalid(evaluator: &'static str, reason: impl Into<String>) -> VerdantError {
    VerdantError::InvalidDecisionPath {
        evaluator,
        reason: reason.into(),
    }
}

/// Round a computed value to 3 decimals, half away from zero.
pub(crate) fn round3(evaluator: &'static str, value: f64) -> Result<Decimal, VerdantError> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero))
        .ok_or_else(|| invalid(evaluator, format!("computed value {} is not finite", value)))
}

/// One decision path per evaluator, as captured by an authoring workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionPaths {
    pub release_potential: ReleasePotentialPath,
    pub fire_explosives: FirePath,
    pub reaction_decomposition: ReactionPath,
    pub acute_toxicity: AcuteToxicityPath,
    pub irritation: IrritationPath,
    pub chronic_toxicity: ChronicToxicityPath,
    pub persistency: PersistencyPath,
    pub water_hazard: WaterHazardPath,
    pub regeneration: RegenerationInput,
    pub disposal: DisposalPath,
}

/// Input to `verdant reagent evaluate`: identity plus decision paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReagentDraft {
    pub name: String,
    pub density: Decimal,
    pub paths: DecisionPaths,
}

impl ReagentDraft {
    pub fn evaluate(&self) -> Result<ReagentFactor, VerdantError> {
        evaluate_reagent(&self.name, self.density, &self.paths)
    }
}

/// Apply every evaluator once and assemble the library record.
pub fn evaluate_reagent(
    name: &str,
    density: Decimal,
    paths: &DecisionPaths,
) -> Result<ReagentFactor, VerdantError> {
    if name.trim().is_empty() {
        return Err(invalid("identity", "reagent name must not be empty"));
    }
    if density.is_sign_negative() {
        return Err(invalid(
            "identity",
            format!("density {} g/mL must not be negative", density),
        ));
    }

    let chronic = health::chronic_toxicity(&paths.chronic_toxicity, name)?;
    let sub_factors = SubFactors {
        release_potential: safety::release_potential(&paths.release_potential)?,
        fire_explosives: safety::fire_explosives(&paths.fire_explosives)?,
        reaction_decomposition: safety::reaction_decomposition(&paths.reaction_decomposition)?,
        acute_toxicity: safety::acute_toxicity(&paths.acute_toxicity)?,
        irritation: health::irritation(&paths.irritation)?,
        chronic_toxicity: chronic,
        persistency: environment::persistency(&paths.persistency)?,
        air_hazard: chronic,
        water_hazard: environment::water_hazard(&paths.water_hazard)?,
    };
    let factor = ReagentFactor {
        name: name.trim().to_string(),
        density,
        sub_factors,
        regeneration: resources::regeneration(&paths.regeneration)?,
        disposal: resources::disposal(&paths.disposal)?,
    };
    debug!(
        reagent = %factor.name,
        safety = %factor.safety_score(),
        health = %factor.health_score(),
        environment = %factor.env_score(),
        "evaluated reagent"
    );
    Ok(factor)
}

#[cfg(test)]
mod tests {
    use super::environment::*;
    use super::health::*;
    use super::resources::*;
    use super::safety::*;
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::BTreeSet;

    fn methanol_paths() -> DecisionPaths {
        DecisionPaths {
            release_potential: ReleasePotentialPath::VolatileLiquid {
                boiling_point_c: 64.7,
                structure: StructuralCorrection::Standard,
            },
            fire_explosives: FirePath::Combustible {
                oxidizer: OxidizerCode::None,
                flash_point: Some(FlashPointClass::A),
            },
            reaction_decomposition: ReactionPath {
                form: ReactionForm::Pure,
                nfpa_white: None,
                strong_acid_or_base: false,
                nfpa_yellow: Some(0),
                unstable_groups: None,
            },
            acute_toxicity: AcuteToxicityPath::Inhalation {
                idlh_ppm: 6000.0,
                molecular_weight: 32.04,
            },
            irritation: IrritationPath {
                corrosive: false,
                irritant: IrritantClass::No,
                ph: Some(PhClass::Neutral),
                trace_codes: BTreeSet::from([TraceCode::R20Series]),
            },
            chronic_toxicity: ChronicToxicityPath {
                state: PhysicalState::LiquidOrGas,
                veto: ChronicVeto::None,
                exemption: Some(ChronicExemption::NotExempt),
                tlv_mg_m3: Some(262.0),
                alcohol: false,
            },
            persistency: PersistencyPath {
                identity: SubstanceIdentity::Organic,
                fast_track: Some(FastTrack::A),
                structure: None,
                half_life_days: None,
                predicted: false,
                secondary_structure: false,
            },
            water_hazard: WaterHazardPath {
                category: WaterCategory::Organic,
                lc50_class: Some(Lc50Class::D),
                persistence_penalty: false,
                bioaccumulation: Bioaccumulation::Low,
                lc50_mg_l: Some(15400.0),
                residual: Some(ResidualConstant::UltraLow),
            },
            regeneration: RegenerationInput::Level {
                level: RegenerationLevel::SimpleSynthetic,
            },
            disposal: DisposalPath {
                resistance: DisposalResistance::L3,
                recycled_percent: 0.0,
            },
        }
    }

    #[test]
    fn test_evaluate_reagent_assembles_all_factors() {
        let factor = evaluate_reagent("Methanol", dec!(0.791), &methanol_paths()).unwrap();
        assert_eq!(factor.name, "Methanol");
        assert_eq!(factor.sub_factors.release_potential, dec!(0.670));
        assert_eq!(factor.sub_factors.fire_explosives, dec!(1));
        assert_eq!(factor.sub_factors.acute_toxicity, dec!(0.266));
        assert_eq!(factor.sub_factors.irritation, dec!(0.113));
        assert_eq!(factor.sub_factors.chronic_toxicity, dec!(0.316));
        assert_eq!(factor.sub_factors.water_hazard, dec!(0));
        assert_eq!(factor.regeneration, dec!(0.5));
        assert_eq!(factor.disposal, dec!(0.5));
    }

    #[test]
    fn test_air_hazard_mirrors_chronic_toxicity() {
        let mut paths = methanol_paths();
        paths.chronic_toxicity.alcohol = true;
        let factor = evaluate_reagent("Methanol", dec!(0.791), &paths).unwrap();
        assert_eq!(factor.sub_factors.air_hazard, factor.sub_factors.chronic_toxicity);
        assert_eq!(factor.sub_factors.air_hazard, dec!(0.376));
    }

    #[test]
    fn test_evaluate_reagent_propagates_branch_error() {
        let mut paths = methanol_paths();
        paths.release_potential = ReleasePotentialPath::VolatileLiquid {
            boiling_point_c: 10.0,
            structure: StructuralCorrection::Standard,
        };
        let err = evaluate_reagent("Methanol", dec!(0.791), &paths).unwrap_err();
        assert!(matches!(
            err,
            VerdantError::InvalidDecisionPath {
                evaluator: "release potential",
                ..
            }
        ));
    }

    #[test]
    fn test_evaluate_reagent_rejects_bad_identity() {
        assert!(evaluate_reagent("  ", dec!(1), &methanol_paths()).is_err());
        assert!(evaluate_reagent("Methanol", dec!(-0.1), &methanol_paths()).is_err());
    }

    #[test]
    fn test_round3_half_away_from_zero() {
        assert_eq!(round3("t", 0.0005).unwrap(), dec!(0.001));
        assert_eq!(round3("t", -0.0965).unwrap(), dec!(-0.097));
        assert!(round3("t", f64::NAN).is_err());
    }
}
