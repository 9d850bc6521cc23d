pub mod gradient;
pub mod library;
pub mod reagent;
pub mod schemes;
pub mod score;

use crate::error::{CliError, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::info;
use verdant_core::library::builtin::builtin_library;
use verdant_core::library::schema::ReagentLibrary;
use verdant_core::library::{load_library, ReagentLookup};

/// Output format accepted by `-o`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Table,
    Json,
}

impl Format {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "table" => Ok(Format::Table),
            "json" => Ok(Format::Json),
            other => Err(CliError::Argument(format!(
                "unknown output format '{}' (expected table or json)",
                other
            ))),
        }
    }
}

/// Read and deserialize a JSON input file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| CliError::JsonFile {
        path: path.to_path_buf(),
        source: e,
    })
}

/// The built-in library with each `--library` file layered on top, in order.
pub fn build_library(paths: &[PathBuf]) -> Result<ReagentLibrary> {
    let mut library = builtin_library().clone();
    for path in paths {
        let custom = load_library(path)?;
        info!(
            library = custom.name(),
            reagents = custom.len(),
            "layering custom reagent library"
        );
        library = library.merged_with(&custom);
    }
    info!(source = library.source_name(), "reagent library ready");
    Ok(library)
}
