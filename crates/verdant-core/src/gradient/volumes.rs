use super::PhaseVolumes;
use crate::error::VerdantError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Tolerance on a phase's percentage total before a warning is logged.
const COMPOSITION_TOLERANCE: f64 = 0.01;

/// Percent of each reagent within mobile phase A and mobile phase B.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReagentComposition {
    #[serde(default)]
    pub phase_a: BTreeMap<String, f64>,
    #[serde(default)]
    pub phase_b: BTreeMap<String, f64>,
}

fn check_phase(label: &str, phase: &BTreeMap<String, f64>) -> Result<f64, VerdantError> {
    for (name, pct) in phase {
        if !pct.is_finite() || *pct < 0.0 {
            return Err(VerdantError::InvalidRequest(format!(
                "phase {} reagent '{}' has invalid percentage {}",
                label, name, pct
            )));
        }
    }
    let total: f64 = phase.values().sum();
    if !phase.is_empty() && (total - 100.0).abs() > COMPOSITION_TOLERANCE {
        warn!(phase = label, total, "phase composition does not sum to 100%");
    }
    Ok(total)
}

fn spread(
    label: &str,
    volume_ml: f64,
    phase: &BTreeMap<String, f64>,
    out: &mut BTreeMap<String, f64>,
) -> Result<(), VerdantError> {
    let total = check_phase(label, phase)?;
    if total <= 0.0 {
        if volume_ml > 0.0 {
            warn!(
                phase = label,
                volume_ml, "phase has volume but no reagent composition; volume is unassigned"
            );
        }
        return Ok(());
    }
    for (name, pct) in phase {
        *out.entry(name.clone()).or_insert(0.0) += volume_ml * pct / 100.0;
    }
    Ok(())
}

/// Split each phase's volume over its reagents in proportion to their
/// percentages. A reagent present in both phases gets the sum.
pub fn distribute(
    volumes: &PhaseVolumes,
    composition: &ReagentComposition,
) -> Result<BTreeMap<String, f64>, VerdantError> {
    let mut out = BTreeMap::new();
    spread("A", volumes.phase_a_ml, &composition.phase_a, &mut out)?;
    spread("B", volumes.phase_b_ml, &composition.phase_b, &mut out)?;
    Ok(out)
}
