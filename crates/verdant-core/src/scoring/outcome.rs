use crate::gradient::PhaseVolumes;
use crate::model::{Stage, SubFactorMap};
use crate::scoring::weights::ResolvedWeights;
use serde::{Deserialize, Serialize};

/// A reagent's share of a stage's mass-weighted totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReagentContribution {
    /// Reagent name as stored in the library.
    pub reagent: String,
    /// Volume consumed in this stage, in mL.
    pub volume_ml: f64,
    /// Density in g/mL.
    pub density: f64,
    /// `volume_ml · density`, in g.
    pub mass_g: f64,
}

/// Safety, health and environment scores of a stage, each 0-100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MainFactors {
    pub safety: f64,
    pub health: f64,
    pub environment: f64,
}

/// Scoring result for one analysis stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageResult {
    pub stage: Stage,
    /// Reagents with non-zero volume, in name order.
    pub contributions: Vec<ReagentContribution>,
    /// Total reagent mass in g.
    pub total_mass_g: f64,
    /// `Σ mass · sub-factor` per sub-factor.
    pub sub_factor_totals: SubFactorMap,
    /// Sub-factor totals compressed to 0-100.
    pub sub_factor_scores: SubFactorMap,
    pub main_factors: MainFactors,
    /// `Σ mass · R` before compression.
    pub regeneration_raw: f64,
    /// `Σ mass · D` before compression.
    pub disposal_raw: f64,
    /// R on the 0-100 scale (computed or overridden).
    pub regeneration: f64,
    /// D on the 0-100 scale (computed or overridden).
    pub disposal: f64,
    /// True when R or D came from a caller override.
    pub rd_overridden: bool,
    /// Energy use in kWh.
    pub energy_kwh: f64,
    /// Power score P, 0-100.
    pub power: f64,
    /// Stage score, 0-100.
    pub score: f64,
}

/// The five weight vectors that produced a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedSchemes {
    pub safety: ResolvedWeights,
    pub health: ResolvedWeights,
    pub environment: ResolvedWeights,
    pub instrument_stage: ResolvedWeights,
    pub preparation_stage: ResolvedWeights,
    #[serde(rename = "final")]
    pub final_: ResolvedWeights,
}

/// Full scoring result for a method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Score1: instrument analysis.
    pub instrument: StageResult,
    /// Score2: sample preparation.
    pub preparation: StageResult,
    /// Integrated mobile-phase volumes of the instrument run.
    pub phase_volumes: PhaseVolumes,
    /// Per sub-factor, final-weighted blend of the two stages' 0-100 scores.
    pub merged_sub_factors: SubFactorMap,
    /// Score3: final weighted score, 0-100.
    pub score: f64,
    pub schemes: AppliedSchemes,
}
