use crate::error::VerdantError;
use crate::library::ReagentLookup;
use crate::model::{as_f64, SubFactor, SubFactorMap};
use crate::scoring::outcome::ReagentContribution;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Mass-weighted sums for one stage.
#[derive(Debug, Clone, Default)]
pub struct StageTotals {
    pub contributions: Vec<ReagentContribution>,
    pub total_mass_g: f64,
    pub sub_factors: SubFactorMap,
    pub regeneration: f64,
    pub disposal: f64,
}

/// Accumulate `Σ mass · factor` over reagent volumes.
///
/// Every named reagent must exist in the library, even at zero volume.
/// Zero-volume reagents are then skipped. A zero-density reagent has zero
/// mass and adds nothing to any total.
pub fn aggregate(
    volumes: &BTreeMap<String, f64>,
    lookup: &dyn ReagentLookup,
) -> Result<StageTotals, VerdantError> {
    let mut totals = StageTotals {
        sub_factors: SubFactor::ALL.iter().map(|f| (*f, 0.0)).collect(),
        ..StageTotals::default()
    };

    for (name, &volume_ml) in volumes {
        let factor = lookup.require(name)?;
        if !volume_ml.is_finite() || volume_ml < 0.0 {
            return Err(VerdantError::InvalidRequest(format!(
                "reagent '{}' has invalid volume {} mL",
                name, volume_ml
            )));
        }
        if volume_ml == 0.0 {
            continue;
        }

        let density = as_f64(factor.density);
        if density == 0.0 {
            warn!(reagent = %factor.name, "reagent has zero density and contributes no mass");
        }
        let mass_g = volume_ml * density;
        for f in SubFactor::ALL {
            *totals.sub_factors.entry(f).or_insert(0.0) += mass_g * as_f64(factor.sub_factors.get(f));
        }
        totals.regeneration += mass_g * as_f64(factor.regeneration);
        totals.disposal += mass_g * as_f64(factor.disposal);
        totals.total_mass_g += mass_g;
        totals.contributions.push(ReagentContribution {
            reagent: factor.name.clone(),
            volume_ml,
            density,
            mass_g,
        });
    }

    debug!(
        source = lookup.source_name(),
        reagents = totals.contributions.len(),
        total_mass_g = totals.total_mass_g,
        "aggregated stage"
    );
    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::builtin::builtin_library;

    fn volumes(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
        entries.iter().map(|(n, v)| (n.to_string(), *v)).collect()
    }

    #[test]
    fn test_mass_weighted_sums() {
        let lib = builtin_library();
        let totals = aggregate(&volumes(&[("Methanol", 10.0)]), lib).unwrap();
        // 10 mL * 0.791 g/mL
        assert!((totals.total_mass_g - 7.91).abs() < 1e-12);
        assert!((totals.sub_factors[&SubFactor::S4] - 7.91 * 0.266).abs() < 1e-12);
        assert!((totals.regeneration - 7.91 * 0.5).abs() < 1e-12);
        assert_eq!(totals.contributions.len(), 1);
    }

    #[test]
    fn test_zero_volume_skipped_but_must_exist() {
        let lib = builtin_library();
        let totals = aggregate(&volumes(&[("Methanol", 0.0), ("Water", 5.0)]), lib).unwrap();
        assert_eq!(totals.contributions.len(), 1);
        assert_eq!(totals.contributions[0].reagent, "Water");

        let err = aggregate(&volumes(&[("Unobtainium", 0.0)]), lib).unwrap_err();
        assert_eq!(err.kind(), "missing_reagent_factor");
    }

    #[test]
    fn test_negative_volume_rejected() {
        let err = aggregate(&volumes(&[("Water", -1.0)]), builtin_library()).unwrap_err();
        assert_eq!(err.kind(), "invalid_request");
    }

    #[test]
    fn test_empty_stage_has_zero_totals() {
        let totals = aggregate(&BTreeMap::new(), builtin_library()).unwrap();
        assert_eq!(totals.sub_factors.len(), 9);
        assert!(totals.sub_factors.values().all(|v| *v == 0.0));
        assert_eq!(totals.disposal, 0.0);
    }
}
