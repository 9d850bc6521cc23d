pub mod config;
pub mod error;
pub mod evaluate;
pub mod gradient;
pub mod library;
pub mod model;
pub mod request;
pub mod scoring;
pub mod trace;

use config::ScoringConfig;
use error::VerdantError;
use gradient::{GradientOutcome, PhaseVolumes};
use library::ReagentLookup;
use model::Stage;
use request::ScoreRequest;
use scoring::outcome::{AppliedSchemes, ScoreResult};
use scoring::weights::{resolve, WeightSlot};
use scoring::{RdOverride, StageWeights};
use tracing::info;

/// Main API entry point: score an analytical method against a reagent library.
///
/// Runs validation, weight resolution, gradient integration, per-stage
/// aggregation and the final combination. Any failure aborts the whole run.
pub fn score_method(
    request: &ScoreRequest,
    lookup: &dyn ReagentLookup,
    config: &ScoringConfig,
) -> Result<ScoreResult, VerdantError> {
    config.validate()?;
    request.validate()?;

    // Resolve every weight slot up front so a bad vector fails before any math
    let selections = &request.schemes;
    let custom = &request.custom_weights;
    let schemes = AppliedSchemes {
        safety: resolve(WeightSlot::Safety, selections.safety(), custom.safety.as_ref())?,
        health: resolve(WeightSlot::Health, selections.health(), custom.health.as_ref())?,
        environment: resolve(
            WeightSlot::Environment,
            selections.environment(),
            custom.environment.as_ref(),
        )?,
        instrument_stage: resolve(
            WeightSlot::Stage,
            selections.instrument_stage(),
            custom.instrument_stage(),
        )?,
        preparation_stage: resolve(
            WeightSlot::Stage,
            selections.preparation_stage(),
            custom.preparation_stage(),
        )?,
        final_: resolve(WeightSlot::Final, selections.final_scheme(), custom.final_.as_ref())?,
    };

    let phase_volumes = match gradient::integrate(
        &request.instrument.steps,
        config.samples_per_segment,
    )? {
        GradientOutcome::Volumes(v) => v,
        GradientOutcome::NoVolumeData => return Err(VerdantError::NoVolumeData),
    };
    let instrument_volumes =
        gradient::volumes::distribute(&phase_volumes, &request.instrument.composition)?;
    let preparation_volumes = request.preparation.total_volumes();

    let instrument = scoring::score_stage(
        Stage::Instrument,
        &instrument_volumes,
        lookup,
        request.instrument_energy_kwh,
        RdOverride {
            regeneration: request.instrument_r,
            disposal: request.instrument_d,
        },
        StageWeights {
            safety: &schemes.safety,
            health: &schemes.health,
            environment: &schemes.environment,
            stage: &schemes.instrument_stage,
        },
    )?;
    let preparation = scoring::score_stage(
        Stage::Preparation,
        &preparation_volumes,
        lookup,
        request.preparation_energy_kwh,
        RdOverride {
            regeneration: request.preparation_r,
            disposal: request.preparation_d,
        },
        StageWeights {
            safety: &schemes.safety,
            health: &schemes.health,
            environment: &schemes.environment,
            stage: &schemes.preparation_stage,
        },
    )?;

    let score = scoring::combine::final_score(instrument.score, preparation.score, &schemes.final_);
    let merged_sub_factors = scoring::combine::merge_sub_factors(
        &instrument.sub_factor_scores,
        &preparation.sub_factor_scores,
        &schemes.final_,
    );

    info!(
        method = request.name.as_deref().unwrap_or("unnamed"),
        instrument = instrument.score,
        preparation = preparation.score,
        score,
        "scored method"
    );

    Ok(ScoreResult {
        name: request.name.clone(),
        instrument,
        preparation,
        phase_volumes,
        merged_sub_factors,
        score,
        schemes,
    })
}

/// Integrate a method's gradient and split the phase volumes over reagents,
/// without scoring.
pub fn instrument_volumes(
    request: &ScoreRequest,
    config: &ScoringConfig,
) -> Result<(PhaseVolumes, std::collections::BTreeMap<String, f64>), VerdantError> {
    config.validate()?;
    match gradient::integrate(&request.instrument.steps, config.samples_per_segment)? {
        GradientOutcome::Volumes(v) => {
            let per_reagent =
                gradient::volumes::distribute(&v, &request.instrument.composition)?;
            Ok((v, per_reagent))
        }
        GradientOutcome::NoVolumeData => Err(VerdantError::NoVolumeData),
    }
}
