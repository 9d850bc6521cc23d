use std::path::Path;
use verdant_core::library::load_library;

use crate::error::Result;

pub fn validate(file: &Path) -> Result<()> {
    let library = load_library(file)?;
    println!(
        "Valid: {} (v{}) with {} reagent(s)",
        library.name(),
        library.version(),
        library.len()
    );
    Ok(())
}
