#![forbid(unsafe_code)]

//! Cross-checks analytic partial derivatives from a seismogram-synthesis
//! engine against finite-difference approximations.
//!
//! One validation run performs a baseline synthesis with derivatives
//! enabled, then one derivative-free synthesis per requested parameter
//! with the corresponding configuration coordinate shifted by a small
//! step. The forward difference of each pair is compared against the
//! matching analytic derivative slice, and the worst normalized error per
//! parameter is classified against a tolerance.

pub mod analyze;
pub mod perturb;
pub mod report;
pub mod scenario;

pub use analyze::{ErrorAnalysis, analyze};
pub use perturb::{StepScale, perturb};
pub use report::{DerivativeError, ValidationReport, Verdict, classify};

use sc_core::{AxisLayout, ConfigError, DerivativeRequest, TensorError};
use sc_engine::{
    EngineError, LayeredModel, ReceiverGeometry, SourceConfiguration, SourceTimeFunction,
    SynthesisEngine, Timing,
};
use serde::{Deserialize, Serialize};

/// Step size, per-parameter scales, and acceptance tolerance for one
/// validation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CheckConfig {
    pub step: f64,
    pub scales: StepScale,
    pub tolerance: f64,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            step: 1e-4,
            scales: StepScale::reference(),
            tolerance: 1e-4,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Config(ConfigError),
    Engine(EngineError),
    Tensor(TensorError),
    /// An engine tensor has a rank the axis contract does not allow.
    RankMismatch {
        tensor: &'static str,
        expected: usize,
        actual: usize,
    },
    /// Derivatives were requested but the engine response carried none.
    MissingDerivatives,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid validation configuration: {err}"),
            Self::Engine(err) => write!(f, "engine failure: {err}"),
            Self::Tensor(err) => write!(f, "tensor algebra failure: {err}"),
            Self::RankMismatch {
                tensor,
                expected,
                actual,
            } => write!(
                f,
                "{tensor} tensor has rank {actual}, axis contract requires {expected}"
            ),
            Self::MissingDerivatives => {
                f.write_str("engine returned no derivative tensor for an active request")
            }
        }
    }
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Engine(err) => Some(err),
            Self::Tensor(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for ValidationError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<EngineError> for ValidationError {
    fn from(err: EngineError) -> Self {
        Self::Engine(err)
    }
}

impl From<TensorError> for ValidationError {
    fn from(err: TensorError) -> Self {
        Self::Tensor(err)
    }
}

/// Run one full derivative validation.
///
/// Performs `1 + request.count()` engine syntheses; only the baseline
/// requests derivatives. The engine is driven strictly sequentially.
#[allow(clippy::too_many_arguments)]
pub fn run_check<E: SynthesisEngine>(
    engine: &mut E,
    model: &LayeredModel,
    source: &E::Source,
    receivers: &E::Receivers,
    timing: &Timing,
    request: &DerivativeRequest,
    source_time_function: Option<SourceTimeFunction>,
    config: &CheckConfig,
) -> Result<ValidationReport, ValidationError> {
    if !(config.step > 0.0) {
        return Err(ConfigError::NonPositiveStep { step: config.step }.into());
    }
    let mechanism_count = source.mechanism_count();
    if mechanism_count != 1 {
        return Err(ConfigError::MultipleSources {
            count: mechanism_count,
        }
        .into());
    }

    let baseline = engine.synthesize(
        model,
        source,
        receivers,
        timing,
        Some(request),
        source_time_function,
    )?;
    let derivatives = baseline
        .derivatives
        .as_ref()
        .ok_or(ValidationError::MissingDerivatives)?;

    let layout = AxisLayout::new(receivers.geometry_dims(), request.count(), timing.sample_count);
    if baseline.seismograms.rank() != layout.seismogram_rank() {
        return Err(ValidationError::RankMismatch {
            tensor: "seismogram",
            expected: layout.seismogram_rank(),
            actual: baseline.seismograms.rank(),
        });
    }
    if derivatives.rank() != layout.derivative_rank() {
        return Err(ValidationError::RankMismatch {
            tensor: "derivative",
            expected: layout.derivative_rank(),
            actual: derivatives.rank(),
        });
    }

    let mut entries = Vec::with_capacity(request.count());
    for (parameter, index) in request.active() {
        let scale = config.scales.scale_of(parameter);
        let (pert_receivers, pert_source) =
            perturb(receivers, source, parameter, config.step, scale)?;
        let perturbed = engine.synthesize(
            model,
            &pert_source,
            &pert_receivers,
            timing,
            None,
            source_time_function,
        )?;
        if perturbed.seismograms.rank() != layout.seismogram_rank() {
            return Err(ValidationError::RankMismatch {
                tensor: "perturbed seismogram",
                expected: layout.seismogram_rank(),
                actual: perturbed.seismograms.rank(),
            });
        }

        let analytic_slice = layout.derivative_slice(derivatives, index)?;
        let analysis = analyze(
            &baseline.seismograms,
            &perturbed.seismograms,
            &analytic_slice,
            config.step * scale,
            &layout,
        )?;
        entries.push(DerivativeError {
            parameter,
            max_relative_error: analysis.max_relative_error,
            degenerate_points: analysis.degenerate_points,
            verdict: classify(analysis.max_relative_error, config.tolerance),
        });
    }

    Ok(ValidationReport {
        tolerance: config.tolerance,
        entries,
    })
}
