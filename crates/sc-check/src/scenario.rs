//! Reference validation scenario fixtures.
//!
//! A five-layer crustal model over a halfspace, a buried double-couple
//! source, and a regularly distributed polar receiver grid. The
//! conformance suite and the command-line harness both run against these.

use crate::CheckConfig;
use sc_engine::{
    Layer, LayeredModel, Mechanism, PointSource, ReceiverGrid, ReceiverProfile, ReceiverSet,
    Timing, double_couple_moment_tensor,
};

#[must_use]
pub fn five_layer_model() -> LayeredModel {
    LayeredModel::new(vec![
        Layer::new(3.0, 1.8, 0.0, 1.02),
        Layer::new(2.0, 4.5, 2.4, 2.57),
        Layer::new(5.0, 5.8, 3.3, 2.63),
        Layer::new(20.0, 6.5, 3.65, 2.85),
        Layer::new(f64::INFINITY, 8.0, 4.56, 3.34),
    ])
}

/// Strike 340, dip 90, rake 0, scalar moment 2.4e8, buried at 20 km.
#[must_use]
pub fn reference_source() -> PointSource {
    PointSource::single(
        20.0,
        Mechanism::moment_only(double_couple_moment_tensor(340.0, 90.0, 0.0, 2.4e8)),
    )
}

/// Five radii from 10 to 150 km, eight azimuths around the full circle,
/// receivers at 5 km depth.
#[must_use]
pub fn reference_grid() -> ReceiverSet {
    ReceiverSet::Grid(ReceiverGrid {
        min_radius: 10.0,
        max_radius: 150.0,
        radial_count: 5,
        min_azimuth: 0.0,
        max_azimuth: std::f64::consts::TAU,
        azimuth_count: 8,
        depth: 5.0,
    })
}

/// Single radial line, for exercising one-axis receiver geometries.
#[must_use]
pub fn reference_profile() -> ReceiverSet {
    ReceiverSet::Profile(ReceiverProfile {
        min_radius: 10.0,
        max_radius: 150.0,
        count: 5,
        azimuth: 0.7,
        depth: 5.0,
    })
}

/// 257 samples at 0.5 s with the usual damping.
#[must_use]
pub fn reference_timing() -> Timing {
    Timing::new(257, 0.5)
}

#[must_use]
pub fn reference_config() -> CheckConfig {
    CheckConfig::default()
}
