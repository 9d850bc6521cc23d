use crate::error::VerdantError;
use crate::gradient::volumes::ReagentComposition;
use crate::gradient::GradientStep;
use crate::scoring::weights::{WeightSlot, WeightVector};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn default_sample_count() -> u32 {
    1
}

/// Instrument stage: the gradient program and what each phase is made of.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentInput {
    pub steps: Vec<GradientStep>,
    #[serde(default)]
    pub composition: ReagentComposition,
}

/// Sample preparation stage: per-sample reagent volumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparationInput {
    /// mL of each reagent used to prepare one sample.
    #[serde(default)]
    pub volumes: BTreeMap<String, f64>,
    #[serde(default = "default_sample_count")]
    pub sample_count: u32,
}

impl Default for PreparationInput {
    fn default() -> Self {
        Self {
            volumes: BTreeMap::new(),
            sample_count: default_sample_count(),
        }
    }
}

impl PreparationInput {
    /// Per-sample volumes scaled by the number of samples.
    pub fn total_volumes(&self) -> BTreeMap<String, f64> {
        self.volumes
            .iter()
            .map(|(name, ml)| (name.clone(), ml * f64::from(self.sample_count)))
            .collect()
    }
}

/// Scheme name per slot. Unset slots fall back to `stage`, then to the
/// slot's default preset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemeSelections {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    /// Stage vector shared by both stages unless a per-stage one is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument_stage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preparation_stage: Option<String>,
    #[serde(default, rename = "final", skip_serializing_if = "Option::is_none")]
    pub final_: Option<String>,
}

impl SchemeSelections {
    fn pick<'a>(value: &'a Option<String>, slot: WeightSlot) -> &'a str {
        value.as_deref().unwrap_or(slot.default_scheme())
    }

    pub fn safety(&self) -> &str {
        Self::pick(&self.safety, WeightSlot::Safety)
    }

    pub fn health(&self) -> &str {
        Self::pick(&self.health, WeightSlot::Health)
    }

    pub fn environment(&self) -> &str {
        Self::pick(&self.environment, WeightSlot::Environment)
    }

    pub fn instrument_stage(&self) -> &str {
        self.instrument_stage
            .as_deref()
            .or(self.stage.as_deref())
            .unwrap_or(WeightSlot::Stage.default_scheme())
    }

    pub fn preparation_stage(&self) -> &str {
        self.preparation_stage
            .as_deref()
            .or(self.stage.as_deref())
            .unwrap_or(WeightSlot::Stage.default_scheme())
    }

    pub fn final_scheme(&self) -> &str {
        Self::pick(&self.final_, WeightSlot::Final)
    }

    /// Fill unset slots from `defaults`, keeping anything already chosen.
    pub fn fill_missing_from(&mut self, defaults: &SchemeSelections) {
        let fill = |mine: &mut Option<String>, theirs: &Option<String>| {
            if mine.is_none() {
                mine.clone_from(theirs);
            }
        };
        fill(&mut self.safety, &defaults.safety);
        fill(&mut self.health, &defaults.health);
        fill(&mut self.environment, &defaults.environment);
        fill(&mut self.stage, &defaults.stage);
        fill(&mut self.instrument_stage, &defaults.instrument_stage);
        fill(&mut self.preparation_stage, &defaults.preparation_stage);
        fill(&mut self.final_, &defaults.final_);
    }
}

/// Custom vectors, consulted only for slots whose selection is `custom`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomWeights {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety: Option<WeightVector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<WeightVector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<WeightVector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<WeightVector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument_stage: Option<WeightVector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preparation_stage: Option<WeightVector>,
    #[serde(default, rename = "final", skip_serializing_if = "Option::is_none")]
    pub final_: Option<WeightVector>,
}

impl CustomWeights {
    pub fn instrument_stage(&self) -> Option<&WeightVector> {
        self.instrument_stage.as_ref().or(self.stage.as_ref())
    }

    pub fn preparation_stage(&self) -> Option<&WeightVector> {
        self.preparation_stage.as_ref().or(self.stage.as_ref())
    }
}

/// Everything needed to score one analytical method. Densities and hazard
/// factors come from the reagent library; the request only names reagents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub instrument: InstrumentInput,
    #[serde(default)]
    pub preparation: PreparationInput,
    #[serde(default)]
    pub instrument_energy_kwh: f64,
    #[serde(default)]
    pub preparation_energy_kwh: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument_r: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument_d: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preparation_r: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preparation_d: Option<f64>,
    #[serde(default)]
    pub schemes: SchemeSelections,
    #[serde(default)]
    pub custom_weights: CustomWeights,
}

impl ScoreRequest {
    /// Checks that do not need the library or the gradient integrator.
    pub fn validate(&self) -> Result<(), VerdantError> {
        for (label, kwh) in [
            ("instrument_energy_kwh", self.instrument_energy_kwh),
            ("preparation_energy_kwh", self.preparation_energy_kwh),
        ] {
            if !kwh.is_finite() || kwh < 0.0 {
                return Err(VerdantError::InvalidRequest(format!(
                    "{} must be a non-negative number, got {}",
                    label, kwh
                )));
            }
        }
        for (label, value) in [
            ("instrument_r", self.instrument_r),
            ("instrument_d", self.instrument_d),
            ("preparation_r", self.preparation_r),
            ("preparation_d", self.preparation_d),
        ] {
            if let Some(v) = value {
                if !(0.0..=100.0).contains(&v) {
                    return Err(VerdantError::InvalidRequest(format!(
                        "{} override {} outside 0-100",
                        label, v
                    )));
                }
            }
        }
        if self.preparation.sample_count == 0 {
            return Err(VerdantError::InvalidRequest(
                "preparation sample_count must be at least 1".into(),
            ));
        }
        for (name, ml) in &self.preparation.volumes {
            if !ml.is_finite() || *ml < 0.0 {
                return Err(VerdantError::InvalidRequest(format!(
                    "preparation reagent '{}' has invalid volume {} mL",
                    name, ml
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "instrument": {
            "steps": [
                { "time": 0, "phase_a_percent": 95, "flow_rate": 1.0 },
                { "time": 10, "phase_a_percent": 5, "flow_rate": 1.0, "curve": "convex-2" }
            ],
            "composition": { "phase_a": { "Water": 100 }, "phase_b": { "Acetonitrile": 100 } }
        }
    }"#;

    #[test]
    fn test_minimal_request_defaults() {
        let req: ScoreRequest = serde_json::from_str(MINIMAL).unwrap();
        assert_eq!(req.preparation.sample_count, 1);
        assert!(req.preparation.volumes.is_empty());
        assert_eq!(req.schemes.safety(), "PBT_Balanced");
        assert_eq!(req.schemes.instrument_stage(), "Balanced");
        assert_eq!(req.schemes.final_scheme(), "Standard");
        req.validate().unwrap();
    }

    #[test]
    fn test_shared_stage_selection() {
        let selections = SchemeSelections {
            stage: Some("Eco_Friendly".into()),
            preparation_stage: Some("Safety_First".into()),
            ..SchemeSelections::default()
        };
        assert_eq!(selections.instrument_stage(), "Eco_Friendly");
        assert_eq!(selections.preparation_stage(), "Safety_First");
    }

    #[test]
    fn test_fill_missing_keeps_explicit_choice() {
        let mut mine = SchemeSelections {
            health: Some("Strict_Compliance".into()),
            ..SchemeSelections::default()
        };
        let defaults = SchemeSelections {
            health: Some("Operation_Protection".into()),
            final_: Some("Equal".into()),
            ..SchemeSelections::default()
        };
        mine.fill_missing_from(&defaults);
        assert_eq!(mine.health(), "Strict_Compliance");
        assert_eq!(mine.final_scheme(), "Equal");
    }

    #[test]
    fn test_sample_count_scales_volumes() {
        let prep = PreparationInput {
            volumes: BTreeMap::from([("Methanol".to_string(), 2.5)]),
            sample_count: 4,
        };
        assert_eq!(prep.total_volumes()["Methanol"], 10.0);
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let base: ScoreRequest = serde_json::from_str(MINIMAL).unwrap();

        let mut req = base.clone();
        req.instrument_r = Some(120.0);
        assert_eq!(req.validate().unwrap_err().kind(), "invalid_request");

        let mut req = base.clone();
        req.preparation.sample_count = 0;
        assert!(req.validate().is_err());

        let mut req = base.clone();
        req.preparation_energy_kwh = -0.5;
        assert!(req.validate().is_err());

        let mut req = base;
        req.preparation.volumes.insert("Water".into(), f64::NAN);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_final_key_renamed_in_json() {
        let json = r#"{ "final": "custom" }"#;
        let selections: SchemeSelections = serde_json::from_str(json).unwrap();
        assert_eq!(selections.final_scheme(), "custom");
    }

    #[test]
    fn test_misspelled_slot_rejected() {
        let json = r#"{ "saftey": "Frontier_Focus" }"#;
        assert!(serde_json::from_str::<SchemeSelections>(json).is_err());
    }
}
