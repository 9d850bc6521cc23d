use std::path::PathBuf;
use verdant_core::request::ScoreRequest;
use verdant_core::trace::build_trace;

use super::{build_library, read_json, Format};
use crate::config::FileConfig;
use crate::error::Result;
use crate::output;

pub fn run(
    method_file: PathBuf,
    library_files: Vec<PathBuf>,
    config_file: Option<PathBuf>,
    output_format: &str,
    with_trace: bool,
) -> Result<()> {
    let format = Format::parse(output_format)?;
    let file_config = FileConfig::load(config_file.as_deref())?;
    let scoring = file_config.scoring_config()?;

    let mut request: ScoreRequest = read_json(&method_file)?;
    request.schemes.fill_missing_from(&file_config.schemes);

    let library = build_library(&library_files)?;
    let result = verdant_core::score_method(&request, &library, &scoring)?;
    let trace = with_trace.then(|| build_trace(&result));

    match format {
        Format::Json => match trace {
            Some(trace) => output::json::print(&serde_json::json!({
                "result": result,
                "trace": trace,
            }))?,
            None => output::json::print(&result)?,
        },
        Format::Table => {
            output::table::print_score(&result);
            if let Some(trace) = &trace {
                output::table::print_trace(trace);
            }
        }
    }

    Ok(())
}
