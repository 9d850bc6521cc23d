pub mod builtin;
pub mod schema;

use crate::error::VerdantError;
use crate::model::{ReagentFactor, SubFactor};
use rust_decimal::Decimal;
use schema::{index_key, ReagentLibrary, ReagentLibraryDef};
use std::collections::BTreeSet;
use std::path::Path;

/// Read-only reagent-name lookup consumed by the scoring pipeline.
pub trait ReagentLookup: Send + Sync {
    /// Case-insensitive lookup by reagent name.
    fn lookup(&self, name: &str) -> Option<&ReagentFactor>;

    /// Name of this library (for diagnostics).
    fn source_name(&self) -> &str;

    fn require(&self, name: &str) -> Result<&ReagentFactor, VerdantError> {
        self.lookup(name)
            .ok_or_else(|| VerdantError::MissingReagentFactor {
                reagent: name.to_string(),
            })
    }
}

impl ReagentLookup for ReagentLibrary {
    fn lookup(&self, name: &str) -> Option<&ReagentFactor> {
        self.get(name)
    }

    fn source_name(&self) -> &str {
        self.name()
    }
}

/// Load a reagent library from a JSON file.
pub fn load_library(path: &Path) -> Result<ReagentLibrary, VerdantError> {
    let content = std::fs::read_to_string(path).map_err(|e| VerdantError::LibraryLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_library(&content, path)
}

/// Parse a reagent library from a JSON string read from `source`.
pub fn parse_library(json: &str, source: &Path) -> Result<ReagentLibrary, VerdantError> {
    let def: ReagentLibraryDef =
        serde_json::from_str(json).map_err(|e| VerdantError::LibraryLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_library(&def)?;
    Ok(ReagentLibrary::from_def(def))
}

/// Parse a reagent library from a JSON string (no file path context).
pub fn parse_library_str(json: &str) -> Result<ReagentLibrary, VerdantError> {
    let def: ReagentLibraryDef = serde_json::from_str(json)?;
    validate_library(&def)?;
    Ok(ReagentLibrary::from_def(def))
}

/// Validate that a library definition is well-formed.
pub fn validate_library(def: &ReagentLibraryDef) -> Result<(), VerdantError> {
    if def.reagents.is_empty() {
        return Err(VerdantError::LibraryInvalid(
            "reagents must not be empty".into(),
        ));
    }

    let mut seen = BTreeSet::new();
    for reagent in &def.reagents {
        if reagent.name.trim().is_empty() {
            return Err(VerdantError::LibraryInvalid(
                "reagent name must not be empty".into(),
            ));
        }
        if !seen.insert(index_key(&reagent.name)) {
            return Err(VerdantError::LibraryInvalid(format!(
                "duplicate reagent '{}' (names are case-insensitive)",
                reagent.name
            )));
        }
        if reagent.density < Decimal::ZERO {
            return Err(VerdantError::LibraryInvalid(format!(
                "reagent '{}' has negative density {}",
                reagent.name, reagent.density
            )));
        }
        for (label, value) in [
            ("regeneration", reagent.regeneration),
            ("disposal", reagent.disposal),
        ] {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(VerdantError::LibraryInvalid(format!(
                    "reagent '{}' has {} {} outside [0, 1]",
                    reagent.name, label, value
                )));
            }
        }
        for factor in SubFactor::ALL {
            // persistency may legitimately dip below zero for short half-lives
            if factor != SubFactor::E1 && reagent.sub_factors.get(factor) < Decimal::ZERO {
                return Err(VerdantError::LibraryInvalid(format!(
                    "reagent '{}' has negative {} ({})",
                    reagent.name,
                    factor.label().to_lowercase(),
                    factor
                )));
            }
        }
    }

    Ok(())
}
