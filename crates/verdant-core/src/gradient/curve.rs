use serde::{Deserialize, Serialize};
use std::fmt;

/// Interpolation law for %A between two gradient steps.
///
/// Convex and concave shapes come in four strengths with exponents 2, 3, 4
/// and 6.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CurveShape {
    #[serde(alias = "pre-step")]
    StepBefore,
    #[serde(rename = "convex-1", alias = "weak-convex")]
    Convex1,
    #[serde(rename = "convex-2", alias = "medium-convex")]
    Convex2,
    #[serde(rename = "convex-3", alias = "strong-convex")]
    Convex3,
    #[serde(rename = "convex-4", alias = "ultra-convex")]
    Convex4,
    #[default]
    #[serde(alias = "initial")]
    Linear,
    #[serde(rename = "concave-1", alias = "weak-concave")]
    Concave1,
    #[serde(rename = "concave-2", alias = "medium-concave")]
    Concave2,
    #[serde(rename = "concave-3", alias = "strong-concave")]
    Concave3,
    #[serde(rename = "concave-4", alias = "ultra-concave")]
    Concave4,
    #[serde(alias = "post-step")]
    StepAfter,
}

impl CurveShape {
    pub const ALL: [CurveShape; 11] = [
        CurveShape::StepBefore,
        CurveShape::Convex1,
        CurveShape::Convex2,
        CurveShape::Convex3,
        CurveShape::Convex4,
        CurveShape::Linear,
        CurveShape::Concave1,
        CurveShape::Concave2,
        CurveShape::Concave3,
        CurveShape::Concave4,
        CurveShape::StepAfter,
    ];

    /// Value at `ratio` ∈ [0, 1] of the way from `y_start` to `y_end`.
    pub fn interpolate(&self, ratio: f64, y_start: f64, y_end: f64) -> f64 {
        let ratio = ratio.clamp(0.0, 1.0);
        let delta = y_end - y_start;
        let convex = |k: i32| y_end - delta * (1.0 - ratio).powi(k);
        let concave = |k: i32| y_start + delta * ratio.powi(k);
        match self {
            CurveShape::StepBefore => y_end,
            CurveShape::StepAfter => y_start,
            CurveShape::Linear => y_start + delta * ratio,
            CurveShape::Convex1 => convex(2),
            CurveShape::Convex2 => convex(3),
            CurveShape::Convex3 => convex(4),
            CurveShape::Convex4 => convex(6),
            CurveShape::Concave1 => concave(2),
            CurveShape::Concave2 => concave(3),
            CurveShape::Concave3 => concave(4),
            CurveShape::Concave4 => concave(6),
        }
    }
}

impl fmt::Display for CurveShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CurveShape::StepBefore => "step-before",
            CurveShape::Convex1 => "convex-1",
            CurveShape::Convex2 => "convex-2",
            CurveShape::Convex3 => "convex-3",
            CurveShape::Convex4 => "convex-4",
            CurveShape::Linear => "linear",
            CurveShape::Concave1 => "concave-1",
            CurveShape::Concave2 => "concave-2",
            CurveShape::Concave3 => "concave-3",
            CurveShape::Concave4 => "concave-4",
            CurveShape::StepAfter => "step-after",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for shape in CurveShape::ALL {
            let mid = shape.interpolate(0.5, 20.0, 80.0);
            assert!((20.0..=80.0).contains(&mid), "{shape}: {mid}");
        }
        assert_eq!(CurveShape::Linear.interpolate(0.0, 20.0, 80.0), 20.0);
        assert_eq!(CurveShape::Convex4.interpolate(1.0, 20.0, 80.0), 80.0);
        assert_eq!(CurveShape::Concave2.interpolate(0.0, 20.0, 80.0), 20.0);
    }

    #[test]
    fn test_step_shapes_hold_one_side() {
        assert_eq!(CurveShape::StepBefore.interpolate(0.0, 20.0, 80.0), 80.0);
        assert_eq!(CurveShape::StepAfter.interpolate(0.99, 20.0, 80.0), 20.0);
    }

    #[test]
    fn test_convex_and_concave_exponents() {
        // convex-1: 80 - 60 * 0.5^2 = 65
        assert!((CurveShape::Convex1.interpolate(0.5, 20.0, 80.0) - 65.0).abs() < 1e-12);
        // concave-4: 20 + 60 * 0.5^6
        assert!((CurveShape::Concave4.interpolate(0.5, 20.0, 80.0) - 20.9375).abs() < 1e-12);
    }

    #[test]
    fn test_serde_names_and_aliases() {
        let shape: CurveShape = serde_json::from_str("\"convex-3\"").unwrap();
        assert_eq!(shape, CurveShape::Convex3);
        let shape: CurveShape = serde_json::from_str("\"ultra-concave\"").unwrap();
        assert_eq!(shape, CurveShape::Concave4);
        let shape: CurveShape = serde_json::from_str("\"pre-step\"").unwrap();
        assert_eq!(shape, CurveShape::StepBefore);
        assert_eq!(
            serde_json::to_string(&CurveShape::StepAfter).unwrap(),
            "\"step-after\""
        );
        for shape in CurveShape::ALL {
            let json = serde_json::to_string(&shape).unwrap();
            assert_eq!(json, format!("\"{}\"", shape));
        }
    }
}
