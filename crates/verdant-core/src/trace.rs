use crate::model::{Stage, SubFactor};
use crate::scoring::outcome::{ScoreResult, StageResult};
use crate::scoring::weights::ResolvedWeights;
use serde::{Deserialize, Serialize};

pub const TRACE_SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceSeverity {
    Critical,
    Important,
    Info,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceVisibility {
    Always,
    Auto,
    OnDemand,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceStepType {
    Volume,
    MassWeight,
    Normalize,
    WeightCombine,
    OverallDecision,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceStep {
    pub step_type: TraceStepType,
    pub message: String,
}

/// How one reagent entered a stage's totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEntry {
    pub entry_id: String,
    pub stage: Stage,
    pub reagent: String,
    pub volume_ml: f64,
    pub density: f64,
    pub mass_g: f64,
    pub steps: Vec<TraceStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceDecisionTarget {
    StageScore,
    FinalScore,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceDecision {
    pub decision_id: String,
    pub target: TraceDecisionTarget,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
    pub score: f64,
    pub reason: String,
    pub severity: TraceSeverity,
    pub visibility: TraceVisibility,
    pub steps: Vec<TraceStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceWarning {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
    pub message: String,
    pub severity: TraceSeverity,
    pub visibility: TraceVisibility,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceBundle {
    pub trace_schema_version: String,
    pub entries: Vec<TraceEntry>,
    pub decisions: Vec<TraceDecision>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<TraceWarning>,
}

impl Default for TraceBundle {
    fn default() -> Self {
        Self {
            trace_schema_version: TRACE_SCHEMA_VERSION.to_string(),
            entries: Vec::new(),
            decisions: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

fn stage_key(stage: Stage) -> &'static str {
    match stage {
        Stage::Instrument => "inst",
        Stage::Preparation => "prep",
    }
}

fn describe_weights(weights: &ResolvedWeights) -> String {
    let parts: Vec<String> = weights
        .weights
        .iter()
        .map(|(k, w)| format!("{}={}", k, w))
        .collect();
    format!("{} ({})", weights.scheme, parts.join(", "))
}

fn build_stage_entries(result: &StageResult, volume_source: &str) -> Vec<TraceEntry> {
    result
        .contributions
        .iter()
        .enumerate()
        .map(|(idx, c)| TraceEntry {
            entry_id: format!("ent_{}_{}", stage_key(result.stage), idx),
            stage: result.stage,
            reagent: c.reagent.clone(),
            volume_ml: c.volume_ml,
            density: c.density,
            mass_g: c.mass_g,
            steps: vec![
                TraceStep {
                    step_type: TraceStepType::Volume,
                    message: format!("{:.4} mL {}", c.volume_ml, volume_source),
                },
                TraceStep {
                    step_type: TraceStepType::MassWeight,
                    message: format!(
                        "mass = {:.4} mL x {} g/mL = {:.4} g",
                        c.volume_ml, c.density, c.mass_g
                    ),
                },
            ],
        })
        .collect()
}

fn build_stage_decision(result: &StageResult, stage_weights: &ResolvedWeights) -> TraceDecision {
    let normalized: Vec<String> = SubFactor::ALL
        .iter()
        .map(|f| {
            format!(
                "{}={:.2}",
                f,
                result.sub_factor_scores.get(f).copied().unwrap_or(0.0)
            )
        })
        .collect();
    let rd_source = if result.rd_overridden {
        "override"
    } else {
        "log-compressed"
    };

    TraceDecision {
        decision_id: format!("dec_{}_stage", stage_key(result.stage)),
        target: TraceDecisionTarget::StageScore,
        stage: Some(result.stage),
        score: result.score,
        reason: format!("{} score {:.2}", result.stage, result.score),
        severity: TraceSeverity::Important,
        visibility: TraceVisibility::Always,
        steps: vec![
            TraceStep {
                step_type: TraceStepType::Normalize,
                message: format!("Sub-factor scores: {}", normalized.join(", ")),
            },
            TraceStep {
                step_type: TraceStepType::Normalize,
                message: format!(
                    "R={:.2}, D={:.2} ({}), P={:.2} from {} kWh",
                    result.regeneration,
                    result.disposal,
                    rd_source,
                    result.power,
                    result.energy_kwh
                ),
            },
            TraceStep {
                step_type: TraceStepType::WeightCombine,
                message: format!(
                    "S={:.2}, H={:.2}, E={:.2} combined with {}",
                    result.main_factors.safety,
                    result.main_factors.health,
                    result.main_factors.environment,
                    describe_weights(stage_weights)
                ),
            },
        ],
    }
}

/// Build an audit trail for a scoring result.
pub fn build_trace(result: &ScoreResult) -> TraceBundle {
    let mut bundle = TraceBundle::default();

    bundle
        .entries
        .extend(build_stage_entries(&result.instrument, "integrated from the gradient program"));
    bundle
        .entries
        .extend(build_stage_entries(&result.preparation, "across all samples"));

    bundle.decisions.push(build_stage_decision(
        &result.instrument,
        &result.schemes.instrument_stage,
    ));
    bundle.decisions.push(build_stage_decision(
        &result.preparation,
        &result.schemes.preparation_stage,
    ));
    bundle.decisions.push(TraceDecision {
        decision_id: "dec_final".into(),
        target: TraceDecisionTarget::FinalScore,
        stage: None,
        score: result.score,
        reason: format!("Final score {:.2}", result.score),
        severity: TraceSeverity::Critical,
        visibility: TraceVisibility::Always,
        steps: vec![TraceStep {
            step_type: TraceStepType::OverallDecision,
            message: format!(
                "{:.2} (instrument) and {:.2} (preparation) combined with {}",
                result.instrument.score,
                result.preparation.score,
                describe_weights(&result.schemes.final_)
            ),
        }],
    });

    for stage in [&result.instrument, &result.preparation] {
        for c in stage.contributions.iter().filter(|c| c.mass_g == 0.0) {
            bundle.warnings.push(TraceWarning {
                stage: Some(stage.stage),
                message: format!(
                    "'{}' has zero density and contributes nothing to the score",
                    c.reagent
                ),
                severity: TraceSeverity::Important,
                visibility: TraceVisibility::Auto,
            });
        }
        if stage.rd_overridden {
            bundle.warnings.push(TraceWarning {
                stage: Some(stage.stage),
                message: "R/D supplied by the caller instead of computed".into(),
                severity: TraceSeverity::Info,
                visibility: TraceVisibility::OnDemand,
            });
        }
    }

    bundle
}
