//! Mobile-phase volume integration over an HPLC gradient program.
//!
//! Segment `i` spans `[t_{i-1}, t_i]` and takes its curve shape and flow rate
//! from step `i`, the step it leads into. %A is sampled along the curve and
//! integrated with the trapezoidal rule; %B is always `100 - %A`.

pub mod curve;
pub mod volumes;

use crate::error::VerdantError;
use curve::CurveShape;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One row of the time program. Step 0 is the state at t = 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStep {
    /// Minutes from injection.
    pub time: f64,
    pub phase_a_percent: f64,
    /// mL/min.
    pub flow_rate: f64,
    #[serde(default)]
    pub curve: CurveShape,
}

impl GradientStep {
    pub fn phase_b_percent(&self) -> f64 {
        100.0 - self.phase_a_percent
    }
}

/// Volumes contributed by one segment of the program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentVolume {
    /// Index of the destination step.
    pub step_index: usize,
    pub start: f64,
    pub end: f64,
    pub curve: CurveShape,
    pub flow_rate: f64,
    /// Integral of %A over the segment, in percent-minutes.
    pub area_a: f64,
    pub area_b: f64,
    pub phase_a_ml: f64,
    pub phase_b_ml: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseVolumes {
    pub phase_a_ml: f64,
    pub phase_b_ml: f64,
    pub segments: Vec<SegmentVolume>,
}

impl PhaseVolumes {
    pub fn total_ml(&self) -> f64 {
        self.phase_a_ml + self.phase_b_ml
    }
}

/// Result of integrating a program. A program whose every segment has zero
/// flow is reported as [`GradientOutcome::NoVolumeData`] instead of as zero
/// volumes. Only the destination steps count, since a segment takes its flow
/// from the step it ends on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GradientOutcome {
    Volumes(PhaseVolumes),
    NoVolumeData,
}

/// One sampled point of the composition profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfilePoint {
    pub time: f64,
    pub phase_a_percent: f64,
    pub phase_b_percent: f64,
}

/// Check ordering and domains of a gradient program.
pub fn validate_steps(steps: &[GradientStep]) -> Result<(), VerdantError> {
    if steps.len() < 2 {
        return Err(VerdantError::InvalidGradient(format!(
            "at least 2 steps are required, got {}",
            steps.len()
        )));
    }
    if steps[0].time != 0.0 {
        return Err(VerdantError::InvalidGradient(format!(
            "step 0 must start at time 0, got {}",
            steps[0].time
        )));
    }
    for (i, step) in steps.iter().enumerate() {
        if !step.time.is_finite() || step.time < 0.0 {
            return Err(VerdantError::InvalidGradient(format!(
                "step {} has invalid time {}",
                i, step.time
            )));
        }
        if !(0.0..=100.0).contains(&step.phase_a_percent) {
            return Err(VerdantError::InvalidGradient(format!(
                "step {} has phase A {}% outside 0-100",
                i, step.phase_a_percent
            )));
        }
        if !step.flow_rate.is_finite() || step.flow_rate < 0.0 {
            return Err(VerdantError::InvalidGradient(format!(
                "step {} has negative or invalid flow rate {}",
                i, step.flow_rate
            )));
        }
        if i > 0 && step.time < steps[i - 1].time {
            return Err(VerdantError::InvalidGradient(format!(
                "step {} time {} precedes step {} time {}",
                i,
                step.time,
                i - 1,
                steps[i - 1].time
            )));
        }
    }
    Ok(())
}

fn trapezoid(values: &[f64], dt: f64) -> f64 {
    values
        .windows(2)
        .map(|w| (w[0] + w[1]) / 2.0 * dt)
        .sum()
}

fn integrate_segment(
    index: usize,
    from: &GradientStep,
    to: &GradientStep,
    samples: usize,
) -> SegmentVolume {
    let duration = to.time - from.time;
    let (area_a, area_b) = if duration > 0.0 {
        let a: Vec<f64> = (0..=samples)
            .map(|j| {
                let ratio = j as f64 / samples as f64;
                to.curve
                    .interpolate(ratio, from.phase_a_percent, to.phase_a_percent)
            })
            .collect();
        let b: Vec<f64> = a.iter().map(|pa| 100.0 - pa).collect();
        let dt = duration / samples as f64;
        (trapezoid(&a, dt), trapezoid(&b, dt))
    } else {
        (0.0, 0.0)
    };
    SegmentVolume {
        step_index: index,
        start: from.time,
        end: to.time,
        curve: to.curve,
        flow_rate: to.flow_rate,
        area_a,
        area_b,
        phase_a_ml: area_a * to.flow_rate / 100.0,
        phase_b_ml: area_b * to.flow_rate / 100.0,
    }
}

/// Integrate phase A and phase B volumes over the whole program.
pub fn integrate(
    steps: &[GradientStep],
    samples_per_segment: usize,
) -> Result<GradientOutcome, VerdantError> {
    validate_steps(steps)?;
    if samples_per_segment < 2 {
        return Err(VerdantError::InvalidConfig(format!(
            "samples_per_segment must be at least 2, got {}",
            samples_per_segment
        )));
    }
    // Segment i draws its flow from step i, so the first step's flow never
    // reaches a segment.
    if steps[1..].iter().all(|s| s.flow_rate == 0.0) {
        return Ok(GradientOutcome::NoVolumeData);
    }

    let segments: Vec<SegmentVolume> = steps
        .windows(2)
        .enumerate()
        .map(|(i, pair)| integrate_segment(i + 1, &pair[0], &pair[1], samples_per_segment))
        .collect();
    let phase_a_ml: f64 = segments.iter().map(|s| s.phase_a_ml).sum();
    let phase_b_ml: f64 = segments.iter().map(|s| s.phase_b_ml).sum();
    debug!(
        segments = segments.len(),
        phase_a_ml, phase_b_ml, "integrated gradient"
    );
    Ok(GradientOutcome::Volumes(PhaseVolumes {
        phase_a_ml,
        phase_b_ml,
        segments,
    }))
}

/// Sample the composition at `points` evenly spaced times across the run.
pub fn sample_profile(
    steps: &[GradientStep],
    points: usize,
) -> Result<Vec<ProfilePoint>, VerdantError> {
    validate_steps(steps)?;
    let end = steps[steps.len() - 1].time;
    let points = points.max(2);
    let mut profile = Vec::with_capacity(points);
    let mut segment = 1;
    for j in 0..points {
        let t = end * j as f64 / (points - 1) as f64;
        while segment < steps.len() - 1 && t > steps[segment].time {
            segment += 1;
        }
        let from = &steps[segment - 1];
        let to = &steps[segment];
        let duration = to.time - from.time;
        let phase_a_percent = if duration > 0.0 {
            let ratio = (t - from.time) / duration;
            to.curve
                .interpolate(ratio, from.phase_a_percent, to.phase_a_percent)
        } else {
            to.phase_a_percent
        };
        profile.push(ProfilePoint {
            time: t,
            phase_a_percent,
            phase_b_percent: 100.0 - phase_a_percent,
        });
    }
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(time: f64, a: f64, flow: f64, curve: CurveShape) -> GradientStep {
        GradientStep {
            time,
            phase_a_percent: a,
            flow_rate: flow,
            curve,
        }
    }

    fn volumes(outcome: GradientOutcome) -> PhaseVolumes {
        match outcome {
            GradientOutcome::Volumes(v) => v,
            GradientOutcome::NoVolumeData => panic!("expected volumes"),
        }
    }

    #[test]
    fn test_phases_are_complementary() {
        for a in [0.0, 12.5, 50.0, 99.9, 100.0] {
            let s = step(0.0, a, 1.0, CurveShape::Linear);
            assert_eq!(s.phase_a_percent + s.phase_b_percent(), 100.0);
        }
    }

    #[test]
    fn test_flat_segment_independent_of_curve() {
        for shape in CurveShape::ALL {
            let steps = vec![
                step(0.0, 40.0, 1.0, CurveShape::Linear),
                step(10.0, 40.0, 1.0, shape),
            ];
            let v = volumes(integrate(&steps, 1000).unwrap());
            assert!((v.phase_a_ml - 4.0).abs() < 1e-9, "{shape}");
            assert!((v.phase_b_ml - 6.0).abs() < 1e-9, "{shape}");
        }
    }

    #[test]
    fn test_linear_ramp_volume() {
        let steps = vec![
            step(0.0, 100.0, 1.0, CurveShape::Linear),
            step(10.0, 0.0, 1.0, CurveShape::Linear),
        ];
        let v = volumes(integrate(&steps, 1000).unwrap());
        assert!((v.phase_a_ml - 5.0).abs() < 1e-9);
        assert!((v.phase_b_ml - 5.0).abs() < 1e-9);
        assert!((v.total_ml() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_concave_ramp_close_to_analytic() {
        // ∫ 100 r^2 over r in [0,1] is 100/3 percent per minute of duration
        let steps = vec![
            step(0.0, 0.0, 1.0, CurveShape::Linear),
            step(1.0, 100.0, 1.0, CurveShape::Concave1),
        ];
        let v = volumes(integrate(&steps, 1000).unwrap());
        assert!((v.phase_a_ml - 1.0 / 3.0).abs() < 1e-3 / 3.0);
    }

    #[test]
    fn test_step_shapes_take_one_boundary() {
        let before = vec![
            step(0.0, 0.0, 2.0, CurveShape::Linear),
            step(5.0, 100.0, 2.0, CurveShape::StepBefore),
        ];
        assert!((volumes(integrate(&before, 100).unwrap()).phase_a_ml - 10.0).abs() < 1e-9);
        let after = vec![
            step(0.0, 0.0, 2.0, CurveShape::Linear),
            step(5.0, 100.0, 2.0, CurveShape::StepAfter),
        ];
        assert!(volumes(integrate(&after, 100).unwrap()).phase_a_ml.abs() < 1e-9);
    }

    #[test]
    fn test_segment_uses_destination_flow_rate() {
        let steps = vec![
            step(0.0, 50.0, 0.0, CurveShape::Linear),
            step(10.0, 50.0, 1.0, CurveShape::Linear),
            step(20.0, 50.0, 0.0, CurveShape::Linear),
        ];
        let v = volumes(integrate(&steps, 1000).unwrap());
        assert_eq!(v.segments.len(), 2);
        assert!((v.segments[0].phase_a_ml - 5.0).abs() < 1e-9);
        assert_eq!(v.segments[1].phase_a_ml, 0.0);
        assert_eq!(v.segments[1].step_index, 2);
    }

    #[test]
    fn test_zero_duration_segment_contributes_nothing() {
        let steps = vec![
            step(0.0, 90.0, 1.0, CurveShape::Linear),
            step(0.0, 10.0, 1.0, CurveShape::StepBefore),
            step(10.0, 10.0, 1.0, CurveShape::Linear),
        ];
        let v = volumes(integrate(&steps, 1000).unwrap());
        assert!((v.phase_a_ml - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_flow_on_first_step_only_is_no_volume_data() {
        let steps = vec![
            step(0.0, 50.0, 1.0, CurveShape::Linear),
            step(10.0, 50.0, 0.0, CurveShape::Linear),
        ];
        assert!(matches!(
            integrate(&steps, 1000).unwrap(),
            GradientOutcome::NoVolumeData
        ));
    }

    #[test]
    fn test_all_zero_flow_is_no_volume_data() {
        let steps = vec![
            step(0.0, 50.0, 0.0, CurveShape::Linear),
            step(10.0, 20.0, 0.0, CurveShape::Linear),
        ];
        assert!(matches!(
            integrate(&steps, 1000).unwrap(),
            GradientOutcome::NoVolumeData
        ));
    }

    #[test]
    fn test_invalid_programs_rejected() {
        let decreasing = vec![
            step(0.0, 50.0, 1.0, CurveShape::Linear),
            step(5.0, 50.0, 1.0, CurveShape::Linear),
            step(4.0, 50.0, 1.0, CurveShape::Linear),
        ];
        assert_eq!(
            integrate(&decreasing, 1000).unwrap_err().kind(),
            "invalid_gradient"
        );
        let bad_a = vec![
            step(0.0, 50.0, 1.0, CurveShape::Linear),
            step(5.0, 101.0, 1.0, CurveShape::Linear),
        ];
        assert!(integrate(&bad_a, 1000).is_err());
        let negative_flow = vec![
            step(0.0, 50.0, 1.0, CurveShape::Linear),
            step(5.0, 50.0, -0.1, CurveShape::Linear),
        ];
        assert!(integrate(&negative_flow, 1000).is_err());
        let late_start = vec![
            step(1.0, 50.0, 1.0, CurveShape::Linear),
            step(5.0, 50.0, 1.0, CurveShape::Linear),
        ];
        assert!(integrate(&late_start, 1000).is_err());
        assert!(integrate(&late_start[..1], 1000).is_err());
    }

    #[test]
    fn test_sample_profile_follows_curve() {
        let steps = vec![
            step(0.0, 100.0, 1.0, CurveShape::Linear),
            step(10.0, 0.0, 1.0, CurveShape::Linear),
            step(20.0, 0.0, 1.0, CurveShape::Linear),
        ];
        let profile = sample_profile(&steps, 5).unwrap();
        assert_eq!(profile.len(), 5);
        assert_eq!(profile[0].phase_a_percent, 100.0);
        assert!((profile[1].phase_a_percent - 50.0).abs() < 1e-9);
        assert_eq!(profile[4].time, 20.0);
        for p in &profile {
            assert_eq!(p.phase_a_percent + p.phase_b_percent, 100.0);
        }
    }
}
