pub mod aggregate;
pub mod combine;
pub mod normalize;
pub mod outcome;
pub mod weights;

use crate::error::VerdantError;
use crate::library::ReagentLookup;
use crate::model::Stage;
use combine::StageFactors;
use outcome::StageResult;
use std::collections::BTreeMap;
use tracing::debug;
use weights::ResolvedWeights;

/// Caller-supplied R and D on the 0-100 scale, replacing the computed ones.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RdOverride {
    pub regeneration: Option<f64>,
    pub disposal: Option<f64>,
}

/// Weight vectors a single stage is scored with.
#[derive(Debug, Clone, Copy)]
pub struct StageWeights<'a> {
    pub safety: &'a ResolvedWeights,
    pub health: &'a ResolvedWeights,
    pub environment: &'a ResolvedWeights,
    pub stage: &'a ResolvedWeights,
}

/// Aggregate, normalize and combine one stage.
pub fn score_stage(
    stage: Stage,
    volumes: &BTreeMap<String, f64>,
    lookup: &dyn ReagentLookup,
    energy_kwh: f64,
    overrides: RdOverride,
    weights: StageWeights<'_>,
) -> Result<StageResult, VerdantError> {
    let totals = aggregate::aggregate(volumes, lookup)?;
    let sub_factor_scores = normalize::normalize_sub_factors(&totals.sub_factors);
    let main = combine::main_factors(
        &sub_factor_scores,
        weights.safety,
        weights.health,
        weights.environment,
    );
    let regeneration = overrides
        .regeneration
        .unwrap_or_else(|| normalize::log_compress(totals.regeneration));
    let disposal = overrides
        .disposal
        .unwrap_or_else(|| normalize::log_compress(totals.disposal));
    let power = normalize::energy_score(energy_kwh);
    let factors = StageFactors {
        main,
        regeneration,
        disposal,
        power,
    };
    let score = combine::stage_score(&factors, weights.stage);

    debug!(
        %stage,
        safety = main.safety,
        health = main.health,
        environment = main.environment,
        regeneration,
        disposal,
        power,
        score,
        "scored stage"
    );

    Ok(StageResult {
        stage,
        contributions: totals.contributions,
        total_mass_g: totals.total_mass_g,
        sub_factor_totals: totals.sub_factors,
        sub_factor_scores,
        main_factors: main,
        regeneration_raw: totals.regeneration,
        disposal_raw: totals.disposal,
        regeneration,
        disposal,
        rd_overridden: overrides.regeneration.is_some() || overrides.disposal.is_some(),
        energy_kwh,
        power,
        score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::builtin::builtin_library;
    use weights::{resolve, WeightSlot};

    fn weights_for(stage: &str) -> [ResolvedWeights; 4] {
        [
            resolve(WeightSlot::Safety, "PBT_Balanced", None).unwrap(),
            resolve(WeightSlot::Health, "Absolute_Balance", None).unwrap(),
            resolve(WeightSlot::Environment, "PBT_Balanced", None).unwrap(),
            resolve(WeightSlot::Stage, stage, None).unwrap(),
        ]
    }

    fn stage_weights(w: &[ResolvedWeights; 4]) -> StageWeights<'_> {
        StageWeights {
            safety: &w[0],
            health: &w[1],
            environment: &w[2],
            stage: &w[3],
        }
    }

    #[test]
    fn test_empty_stage_scores_only_power() {
        let w = weights_for("Balanced");
        let result = score_stage(
            Stage::Preparation,
            &BTreeMap::new(),
            builtin_library(),
            1.5,
            RdOverride::default(),
            stage_weights(&w),
        )
        .unwrap();
        assert_eq!(result.main_factors, outcome::MainFactors::default());
        assert_eq!(result.power, 100.0);
        assert!((result.score - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_overrides_replace_computed_rd() {
        let w = weights_for("Balanced");
        let volumes = BTreeMap::from([("Acetonitrile".to_string(), 20.0)]);
        let computed = score_stage(
            Stage::Instrument,
            &volumes,
            builtin_library(),
            0.0,
            RdOverride::default(),
            stage_weights(&w),
        )
        .unwrap();
        assert!(computed.regeneration > 0.0);
        assert!(!computed.rd_overridden);

        let overridden = score_stage(
            Stage::Instrument,
            &volumes,
            builtin_library(),
            0.0,
            RdOverride {
                regeneration: Some(0.0),
                disposal: Some(100.0),
            },
            stage_weights(&w),
        )
        .unwrap();
        assert_eq!(overridden.regeneration, 0.0);
        assert_eq!(overridden.disposal, 100.0);
        assert!(overridden.rd_overridden);
        assert_eq!(overridden.regeneration_raw, computed.regeneration_raw);
    }
}
