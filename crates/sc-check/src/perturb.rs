//! Perturbed-configuration construction for finite differencing.

use sc_core::{ConfigError, Parameter};
use sc_engine::{ReceiverGeometry, SourceConfiguration};
use serde::{Deserialize, Serialize};

/// Per-parameter multipliers applied to the base step, so differently
/// scaled coordinates (kilometres vs. radians) can use commensurate
/// perturbation sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepScale {
    pub radius: f64,
    pub azimuth: f64,
    pub depth: f64,
}

impl StepScale {
    #[must_use]
    pub fn uniform(scale: f64) -> Self {
        Self {
            radius: scale,
            azimuth: scale,
            depth: scale,
        }
    }

    /// Scales used by the reference validation scenario: azimuth steps
    /// are shrunk since one radian spans a large arc.
    #[must_use]
    pub fn reference() -> Self {
        Self {
            radius: 1.0,
            azimuth: 1e-2,
            depth: 1.0,
        }
    }

    #[must_use]
    pub fn scale_of(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Radius => self.radius,
            Parameter::Azimuth => self.azimuth,
            Parameter::Depth => self.depth,
        }
    }
}

impl Default for StepScale {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}

/// Build independent copies of the receivers and source with `parameter`
/// shifted by `step * scale`.
///
/// Radius and azimuth shift forward. Depth shifts backward: the analytic
/// derivative is taken with respect to source elevation, so the forward
/// difference along elevation moves the source upward.
///
/// The `!(step > 0.0)` form rejects NaN steps as well as non-positive
/// ones.
pub fn perturb<R: ReceiverGeometry, S: SourceConfiguration>(
    receivers: &R,
    source: &S,
    parameter: Parameter,
    step: f64,
    scale: f64,
) -> Result<(R, S), ConfigError> {
    if !(step > 0.0) {
        return Err(ConfigError::NonPositiveStep { step });
    }
    let effective = step * scale;
    let mut receivers = receivers.clone();
    let mut source = source.clone();
    match parameter {
        Parameter::Radius => receivers.shift_radius(effective),
        Parameter::Azimuth => receivers.shift_azimuth(effective),
        Parameter::Depth => source.shift_depth(-effective),
    }
    Ok((receivers, source))
}

#[cfg(test)]
mod tests {
    use super::{StepScale, perturb};
    use sc_core::{ConfigError, Parameter};
    use sc_engine::{Mechanism, PointSource, ReceiverGrid, ReceiverSet};

    fn fixture() -> (ReceiverSet, PointSource) {
        let receivers = ReceiverSet::Grid(ReceiverGrid {
            min_radius: 10.0,
            max_radius: 150.0,
            radial_count: 5,
            min_azimuth: 0.0,
            max_azimuth: std::f64::consts::TAU,
            azimuth_count: 8,
            depth: 5.0,
        });
        let source = PointSource::single(20.0, Mechanism::moment_only([[1.0; 3]; 3]));
        (receivers, source)
    }

    #[test]
    fn radius_perturbation_leaves_source_untouched() {
        let (receivers, source) = fixture();
        let (pert_recv, pert_src) =
            perturb(&receivers, &source, Parameter::Radius, 1e-4, 1.0).expect("valid step");
        let ReceiverSet::Grid(grid) = pert_recv else {
            panic!("grid stays a grid");
        };
        assert!((grid.min_radius - 10.0001).abs() < 1e-12);
        assert!((grid.max_radius - 150.0001).abs() < 1e-12);
        assert_eq!(pert_src, source);
    }

    #[test]
    fn depth_perturbation_moves_source_upward() {
        let (receivers, source) = fixture();
        let (pert_recv, pert_src) =
            perturb(&receivers, &source, Parameter::Depth, 1e-4, 1.0).expect("valid step");
        assert_eq!(pert_recv, receivers);
        assert!((pert_src.depth - 19.9999).abs() < 1e-12);
    }

    #[test]
    fn azimuth_scale_shrinks_the_shift() {
        let (receivers, source) = fixture();
        let (pert_recv, _) =
            perturb(&receivers, &source, Parameter::Azimuth, 1e-4, 1e-2).expect("valid step");
        let ReceiverSet::Grid(grid) = pert_recv else {
            panic!("grid stays a grid");
        };
        assert!((grid.min_azimuth - 1e-6).abs() < 1e-18);
    }

    #[test]
    fn bad_steps_are_rejected() {
        let (receivers, source) = fixture();
        for step in [0.0, -1e-4, f64::NAN] {
            let err = perturb(&receivers, &source, Parameter::Radius, step, 1.0)
                .expect_err("step must be rejected");
            assert!(matches!(err, ConfigError::NonPositiveStep { .. }));
        }
    }

    #[test]
    fn scale_lookup_defaults_to_one() {
        let scales = StepScale::default();
        for parameter in sc_core::Parameter::ALL {
            assert_eq!(scales.scale_of(parameter), 1.0);
        }
        let reference = StepScale::reference();
        assert_eq!(reference.scale_of(Parameter::Azimuth), 1e-2);
        assert_eq!(reference.scale_of(Parameter::Depth), 1.0);
    }
}
