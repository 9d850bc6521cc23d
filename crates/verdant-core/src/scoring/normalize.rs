use crate::model::{SubFactor, SubFactorMap};

pub const SCORE_CAP: f64 = 100.0;

/// Energy at or above which the power score saturates, in kWh.
pub const ENERGY_SATURATION_KWH: f64 = 1.5;

const ENERGY_EXPONENT: f64 = 0.235;

/// `min(100, 45·log10(1 + 14·raw))`, or 0 for a non-positive sum.
pub fn log_compress(raw: f64) -> f64 {
    if raw <= 0.0 {
        return 0.0;
    }
    (45.0 * (1.0 + 14.0 * raw).log10()).min(SCORE_CAP)
}

/// Power score from a stage's energy use.
pub fn energy_score(kwh: f64) -> f64 {
    if kwh <= 0.0 {
        0.0
    } else if kwh >= ENERGY_SATURATION_KWH {
        SCORE_CAP
    } else {
        SCORE_CAP * (kwh / ENERGY_SATURATION_KWH).powf(ENERGY_EXPONENT)
    }
}

/// Compress each mass-weighted sub-factor total onto the 0-100 scale.
pub fn normalize_sub_factors(totals: &SubFactorMap) -> SubFactorMap {
    SubFactor::ALL
        .iter()
        .map(|f| (*f, log_compress(totals.get(f).copied().unwrap_or(0.0))))
        .collect()
}
