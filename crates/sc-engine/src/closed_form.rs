//! Closed-form reference engine.
//!
//! Produces a smooth separable displacement field with exact analytic
//! partial derivatives with respect to receiver radius, receiver azimuth,
//! and source depth. The field has no physical pretension; it exists so
//! the validation harness can be exercised against an engine whose
//! derivatives are known to be correct (or deliberately corrupted).

use crate::config::{LayeredModel, PointSource, ReceiverSet};
use crate::{
    EngineError, EngineOutput, SIGNAL_CHANNELS, SourceTimeFunction, SynthesisEngine, Timing,
};
use sc_core::{DerivativeRequest, Parameter, SeisTensor, Shape};

/// Per-call field coefficients derived from the model and source.
#[derive(Debug, Clone, Copy)]
struct FieldCoefficients {
    amplitude: f64,
    decay_length: f64,
    depth_scale: f64,
}

impl FieldCoefficients {
    fn derive(model: &LayeredModel, source: &PointSource) -> Result<Self, EngineError> {
        if model.layers.is_empty() {
            return Err(EngineError::UnsupportedConfiguration {
                detail: "earth model has no layers".to_owned(),
            });
        }
        let [mechanism] = source.mechanisms.as_slice() else {
            return Err(EngineError::UnsupportedConfiguration {
                detail: format!(
                    "reference engine handles exactly one mechanism, got {}",
                    source.mechanisms.len()
                ),
            });
        };
        let depth_scale = model.total_finite_thickness();
        if depth_scale <= 0.0 {
            return Err(EngineError::UnsupportedConfiguration {
                detail: "earth model has no finite layer thickness".to_owned(),
            });
        }
        Ok(Self {
            amplitude: mechanism.moment_magnitude() * 1e-8,
            decay_length: 2.0 * model.mean_finite_vp(),
            depth_scale,
        })
    }
}

/// Channel-dependent gain and phase offset. The offsets keep the
/// azimuthal factor away from exact zeros on regular grids.
fn channel_gain(channel: u32) -> f64 {
    1.0 + 0.25 * f64::from(channel)
}

fn channel_phase(channel: u32) -> f64 {
    0.37 + 0.61 * f64::from(channel)
}

/// Stateless-field engine with a call counter, so tests can assert how
/// many syntheses a validation run performs.
#[derive(Debug, Default)]
pub struct ClosedFormEngine {
    invocations: u64,
}

impl ClosedFormEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn invocations(&self) -> u64 {
        self.invocations
    }

    fn receiver_points(receivers: &ReceiverSet) -> Vec<(f64, f64)> {
        match receivers {
            ReceiverSet::Grid(grid) => {
                let radii = grid.radii();
                let azimuths = grid.azimuths();
                let mut points = Vec::with_capacity(radii.len() * azimuths.len());
                for &r in &radii {
                    for &phi in &azimuths {
                        points.push((r, phi));
                    }
                }
                points
            }
            ReceiverSet::Profile(profile) => profile
                .radii()
                .into_iter()
                .map(|r| (r, profile.azimuth))
                .collect(),
        }
    }

    fn spatial(coeff: &FieldCoefficients, r: f64, phi: f64, depth: f64, channel: u32) -> f64 {
        coeff.amplitude
            * channel_gain(channel)
            * (-r / coeff.decay_length).exp()
            * (phi + channel_phase(channel)).sin()
            * (-depth / coeff.depth_scale).exp()
    }

    fn spatial_derivative(
        coeff: &FieldCoefficients,
        r: f64,
        phi: f64,
        depth: f64,
        channel: u32,
        parameter: Parameter,
    ) -> f64 {
        match parameter {
            Parameter::Radius => {
                -Self::spatial(coeff, r, phi, depth, channel) / coeff.decay_length
            }
            Parameter::Azimuth => {
                coeff.amplitude
                    * channel_gain(channel)
                    * (-r / coeff.decay_length).exp()
                    * (phi + channel_phase(channel)).cos()
                    * (-depth / coeff.depth_scale).exp()
            }
            // Derivative with respect to source elevation: raising the
            // source (smaller depth) strengthens the field.
            Parameter::Depth => Self::spatial(coeff, r, phi, depth, channel) / coeff.depth_scale,
        }
    }

    fn envelope(timing: &Timing, stf: Option<SourceTimeFunction>, t: f64, time_shift: f64) -> f64 {
        if timing.is_static() {
            return 1.0;
        }
        let t = t - time_shift;
        let omega = 1.0 / timing.sample_interval;
        let mut value = (1.0 + 0.6 * (omega * t + 0.25).sin()) * (-timing.damping_alpha * t).exp();
        if let Some(stf) = stf {
            value *= stf(t);
        }
        value
    }
}

impl SynthesisEngine for ClosedFormEngine {
    type Receivers = ReceiverSet;
    type Source = PointSource;

    fn synthesize(
        &mut self,
        model: &LayeredModel,
        source: &Self::Source,
        receivers: &Self::Receivers,
        timing: &Timing,
        derivatives: Option<&DerivativeRequest>,
        source_time_function: Option<SourceTimeFunction>,
    ) -> Result<EngineOutput, EngineError> {
        self.invocations += 1;

        if timing.sample_count == 0 {
            return Err(EngineError::UnsupportedConfiguration {
                detail: "sample count must be at least 1".to_owned(),
            });
        }
        if !timing.is_static() && timing.sample_interval <= 0.0 {
            return Err(EngineError::UnsupportedConfiguration {
                detail: format!(
                    "sample interval must be positive, got {}",
                    timing.sample_interval
                ),
            });
        }

        let coeff = FieldCoefficients::derive(model, source)?;
        let points = Self::receiver_points(receivers);
        let sample_count = timing.sample_count;
        let time_axis: Vec<f64> = if timing.is_static() {
            vec![0.0]
        } else {
            (0..sample_count)
                .map(|i| f64::from(i) * timing.sample_interval)
                .collect()
        };
        let envelopes: Vec<f64> = time_axis
            .iter()
            .map(|&t| Self::envelope(timing, source_time_function, t, source.time_shift))
            .collect();

        let mut seismogram_dims = receivers.geometry_shape();
        seismogram_dims.push(SIGNAL_CHANNELS);
        if !timing.is_static() {
            seismogram_dims.push(sample_count);
        }

        let mut seismograms =
            Vec::with_capacity(points.len() * SIGNAL_CHANNELS as usize * envelopes.len());
        for &(r, phi) in &points {
            for channel in 0..SIGNAL_CHANNELS {
                let spatial = Self::spatial(&coeff, r, phi, source.depth, channel);
                for &envelope in &envelopes {
                    seismograms.push(spatial * envelope);
                }
            }
        }
        let seismograms = SeisTensor::new(Shape::new(seismogram_dims), seismograms)?;

        let derivatives = match derivatives {
            None => None,
            Some(request) => {
                let active = request.active();
                let mut derivative_dims = receivers.geometry_shape();
                if request.count() > 1 {
                    derivative_dims.push(request.count() as u32);
                }
                derivative_dims.push(SIGNAL_CHANNELS);
                if !timing.is_static() {
                    derivative_dims.push(sample_count);
                }

                let mut elements = Vec::with_capacity(
                    points.len() * active.len() * SIGNAL_CHANNELS as usize * envelopes.len(),
                );
                for &(r, phi) in &points {
                    for &(parameter, _) in &active {
                        for channel in 0..SIGNAL_CHANNELS {
                            let value = Self::spatial_derivative(
                                &coeff,
                                r,
                                phi,
                                source.depth,
                                channel,
                                parameter,
                            );
                            for &envelope in &envelopes {
                                elements.push(value * envelope);
                            }
                        }
                    }
                }
                Some(SeisTensor::new(Shape::new(derivative_dims), elements)?)
            }
        };

        Ok(EngineOutput {
            time_axis,
            seismograms,
            derivatives,
        })
    }
}
