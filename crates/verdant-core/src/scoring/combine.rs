use crate::model::{FactorGroup, SubFactor, SubFactorMap};
use crate::scoring::outcome::MainFactors;
use crate::scoring::weights::ResolvedWeights;

/// The six per-stage factors fed to the stage weight vector, each 0-100.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StageFactors {
    pub main: MainFactors,
    pub regeneration: f64,
    pub disposal: f64,
    pub power: f64,
}

fn group_score(scores: &SubFactorMap, group: FactorGroup, weights: &ResolvedWeights) -> f64 {
    group
        .members()
        .iter()
        .map(|f| weights.weight(f.key()) * scores.get(f).copied().unwrap_or(0.0))
        .sum()
}

/// S, H and E from normalized sub-factor scores.
pub fn main_factors(
    scores: &SubFactorMap,
    safety: &ResolvedWeights,
    health: &ResolvedWeights,
    environment: &ResolvedWeights,
) -> MainFactors {
    MainFactors {
        safety: group_score(scores, FactorGroup::Safety, safety),
        health: group_score(scores, FactorGroup::Health, health),
        environment: group_score(scores, FactorGroup::Environment, environment),
    }
}

/// `Σ w_f · factor_f` over S, H, E, R, D, P.
pub fn stage_score(factors: &StageFactors, weights: &ResolvedWeights) -> f64 {
    weights.weight("S") * factors.main.safety
        + weights.weight("H") * factors.main.health
        + weights.weight("E") * factors.main.environment
        + weights.weight("R") * factors.regeneration
        + weights.weight("D") * factors.disposal
        + weights.weight("P") * factors.power
}

/// Weighted blend of the instrument and preparation stage scores.
pub fn final_score(instrument: f64, preparation: f64, weights: &ResolvedWeights) -> f64 {
    weights.weight("instrument") * instrument + weights.weight("preparation") * preparation
}

/// The same blend applied to each sub-factor score, for a merged profile.
pub fn merge_sub_factors(
    instrument: &SubFactorMap,
    preparation: &SubFactorMap,
    weights: &ResolvedWeights,
) -> SubFactorMap {
    SubFactor::ALL
        .iter()
        .map(|f| {
            let inst = instrument.get(f).copied().unwrap_or(0.0);
            let prep = preparation.get(f).copied().unwrap_or(0.0);
            (*f, final_score(inst, prep, weights))
        })
        .collect()
}
