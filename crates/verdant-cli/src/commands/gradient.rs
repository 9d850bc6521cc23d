use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use verdant_core::gradient::{sample_profile, PhaseVolumes, ProfilePoint};
use verdant_core::request::ScoreRequest;

use super::{read_json, Format};
use crate::config::FileConfig;
use crate::error::Result;
use crate::output;

/// Points in the printed composition profile.
const PROFILE_POINTS: usize = 11;

#[derive(Serialize)]
struct GradientReport {
    #[serde(flatten)]
    volumes: PhaseVolumes,
    reagent_volumes_ml: BTreeMap<String, f64>,
    profile: Vec<ProfilePoint>,
}

pub fn run(method_file: PathBuf, config_file: Option<PathBuf>, output_format: &str) -> Result<()> {
    let format = Format::parse(output_format)?;
    let scoring = FileConfig::load(config_file.as_deref())?.scoring_config()?;
    let request: ScoreRequest = read_json(&method_file)?;

    let (volumes, reagent_volumes_ml) = verdant_core::instrument_volumes(&request, &scoring)?;
    let profile = sample_profile(&request.instrument.steps, PROFILE_POINTS)?;

    match format {
        Format::Json => output::json::print(&GradientReport {
            volumes,
            reagent_volumes_ml,
            profile,
        })?,
        Format::Table => output::table::print_gradient(&volumes, &reagent_volumes_ml, &profile),
    }
    Ok(())
}
