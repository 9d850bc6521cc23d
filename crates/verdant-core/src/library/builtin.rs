use crate::library::schema::{ReagentLibrary, ReagentLibraryDef};
use std::sync::LazyLock;

const REAGENTS_JSON: &str = include_str!("../../../../presets/reagents.json");

static BUILTIN: LazyLock<ReagentLibrary> = LazyLock::new(|| {
    let def: ReagentLibraryDef =
        serde_json::from_str(REAGENTS_JSON).expect("embedded reagents.json is valid");
    ReagentLibrary::from_def(def)
});

/// The reagent library compiled into the binary: common HPLC mobile-phase
/// and sample-preparation reagents.
pub fn builtin_library() -> &'static ReagentLibrary {
    &BUILTIN
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::{validate_library, ReagentLookup};
    use rust_decimal_macros::dec;

    #[test]
    fn test_builtin_library_passes_validation() {
        let def: ReagentLibraryDef = serde_json::from_str(REAGENTS_JSON).unwrap();
        validate_library(&def).unwrap();
        assert_eq!(def.reagents.len(), 29);
    }

    #[test]
    fn test_builtin_lookup_is_case_insensitive() {
        let lib = builtin_library();
        let methanol = lib.lookup("METHANOL").unwrap();
        assert_eq!(methanol.density, dec!(0.791));
        assert_eq!(methanol.sub_factors.air_hazard, methanol.sub_factors.chronic_toxicity);
        assert!(lib.lookup("hexane (n)").is_some());
        assert!(lib.lookup("Benzene").is_none());
    }

    #[test]
    fn test_builtin_water_only_carries_release_potential() {
        let water = builtin_library().lookup("Water").unwrap();
        assert_eq!(water.safety_score(), dec!(0.552));
        assert_eq!(water.health_score(), dec!(0));
        assert_eq!(water.env_score(), dec!(0));
    }
}
