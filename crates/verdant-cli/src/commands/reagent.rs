use std::path::{Path, PathBuf};
use verdant_core::evaluate::ReagentDraft;

use super::{build_library, read_json, Format};
use crate::error::Result;
use crate::output;

/// Run the decision evaluators over an authored reagent and print the record.
pub fn evaluate(paths_file: &Path, output_format: &str) -> Result<()> {
    let format = Format::parse(output_format)?;
    let draft: ReagentDraft = read_json(paths_file)?;
    let factor = draft.evaluate()?;

    match format {
        Format::Json => output::json::print(&factor)?,
        Format::Table => output::table::print_reagent(&factor),
    }
    Ok(())
}

pub fn list(library_files: Vec<PathBuf>, output_format: &str) -> Result<()> {
    let format = Format::parse(output_format)?;
    let library = build_library(&library_files)?;

    match format {
        Format::Json => output::json::print(&library.reagents())?,
        Format::Table => output::table::print_library(&library),
    }
    Ok(())
}
