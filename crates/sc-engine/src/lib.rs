#![forbid(unsafe_code)]

//! Contract seam between the derivative-validation harness and the
//! seismogram-synthesis engine.
//!
//! The production engine is an external collaborator; this crate defines
//! the trait surface the harness drives, the configuration value types it
//! perturbs, and a closed-form reference engine with exact analytic
//! derivatives for the harness's own conformance suite.

pub mod closed_form;
pub mod config;

pub use closed_form::ClosedFormEngine;
pub use config::{
    Layer, LayeredModel, Mechanism, PointSource, ReceiverGrid, ReceiverProfile, ReceiverSet,
    double_couple_moment_tensor,
};

use sc_core::{DerivativeRequest, SeisTensor};

/// Fixed number of signal channels per receiver.
pub const SIGNAL_CHANNELS: u32 = 3;

/// Opaque source-time-function pass-through; shaping is the caller's
/// concern.
pub type SourceTimeFunction = fn(f64) -> f64;

/// Sampling and damping parameters forwarded to the engine untouched.
///
/// `sample_count == 1` signals a static (time-independent) query: the
/// engine returns tensors without a time axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub sample_count: u32,
    pub sample_interval: f64,
    pub damping_alpha: f64,
    pub padding_fraction: f64,
}

impl Timing {
    #[must_use]
    pub fn new(sample_count: u32, sample_interval: f64) -> Self {
        Self {
            sample_count,
            sample_interval,
            damping_alpha: 0.023,
            padding_fraction: 1.0,
        }
    }

    #[must_use]
    pub fn static_query() -> Self {
        Self::new(1, 0.0)
    }

    #[must_use]
    pub fn is_static(&self) -> bool {
        self.sample_count == 1
    }
}

/// One engine response: time axis, seismogram tensor, and the derivative
/// tensor when derivatives were requested.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOutput {
    pub time_axis: Vec<f64>,
    pub seismograms: SeisTensor,
    pub derivatives: Option<SeisTensor>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    UnsupportedConfiguration { detail: String },
    SynthesisFailed { detail: String },
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedConfiguration { detail } => {
                write!(f, "unsupported engine configuration: {detail}")
            }
            Self::SynthesisFailed { detail } => write!(f, "synthesis failed: {detail}"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<sc_core::TensorError> for EngineError {
    fn from(err: sc_core::TensorError) -> Self {
        Self::SynthesisFailed {
            detail: err.to_string(),
        }
    }
}

/// Receiver-geometry side of the engine contract.
///
/// `Clone` is the independent-copy operation: a clone shares no state with
/// the original, so the harness can mutate it freely. The shift operations
/// move both bounds of the corresponding coordinate interval.
pub trait ReceiverGeometry: Clone {
    fn geometry_dims(&self) -> usize;
    fn shift_radius(&mut self, delta: f64);
    fn shift_azimuth(&mut self, delta: f64);
}

/// Source side of the engine contract.
pub trait SourceConfiguration: Clone {
    fn mechanism_count(&self) -> usize;
    fn shift_depth(&mut self, delta: f64);
}

/// The synthesis engine the harness drives.
///
/// `&mut self` reflects that engines commonly keep internal caches (e.g.
/// frequency-domain propagator matrices) reused across successive calls
/// and not proven reentrant; the harness evaluates strictly sequentially.
pub trait SynthesisEngine {
    type Receivers: ReceiverGeometry;
    type Source: SourceConfiguration;

    /// Run one forward synthesis. `derivatives: None` disables derivative
    /// output; otherwise the response carries a derivative tensor laid out
    /// per the request's axis slots.
    fn synthesize(
        &mut self,
        model: &LayeredModel,
        source: &Self::Source,
        receivers: &Self::Receivers,
        timing: &Timing,
        derivatives: Option<&DerivativeRequest>,
        source_time_function: Option<SourceTimeFunction>,
    ) -> Result<EngineOutput, EngineError>;
}
