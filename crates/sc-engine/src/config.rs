//! Configuration value types the harness perturbs: receiver geometries,
//! point sources, and layered earth models.

use crate::{ReceiverGeometry, SourceConfiguration};
use serde::{Deserialize, Serialize};

// ── Receivers ───────────────────────────────────────────────────────────

/// Receivers regularly distributed over a polar grid at fixed depth.
///
/// The radial axis samples `radial_count` points inclusive of both bounds;
/// the azimuthal axis samples `azimuth_count` points with the upper bound
/// excluded, so a full circle never duplicates its first receiver.
/// Azimuths are in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiverGrid {
    pub min_radius: f64,
    pub max_radius: f64,
    pub radial_count: u32,
    pub min_azimuth: f64,
    pub max_azimuth: f64,
    pub azimuth_count: u32,
    pub depth: f64,
}

impl ReceiverGrid {
    #[must_use]
    pub fn radii(&self) -> Vec<f64> {
        linspace_inclusive(self.min_radius, self.max_radius, self.radial_count)
    }

    #[must_use]
    pub fn azimuths(&self) -> Vec<f64> {
        linspace_exclusive(self.min_azimuth, self.max_azimuth, self.azimuth_count)
    }

    #[must_use]
    pub fn point_count(&self) -> u64 {
        u64::from(self.radial_count) * u64::from(self.azimuth_count)
    }
}

/// Receivers along a single radial line at fixed azimuth and depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiverProfile {
    pub min_radius: f64,
    pub max_radius: f64,
    pub count: u32,
    pub azimuth: f64,
    pub depth: f64,
}

impl ReceiverProfile {
    #[must_use]
    pub fn radii(&self) -> Vec<f64> {
        linspace_inclusive(self.min_radius, self.max_radius, self.count)
    }
}

/// Either receiver geometry, so one engine instance can serve both the
/// two-axis grid and the one-axis profile layouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReceiverSet {
    Grid(ReceiverGrid),
    Profile(ReceiverProfile),
}

impl ReceiverSet {
    #[must_use]
    pub fn point_count(&self) -> u64 {
        match self {
            Self::Grid(grid) => grid.point_count(),
            Self::Profile(profile) => u64::from(profile.count),
        }
    }

    #[must_use]
    pub fn geometry_shape(&self) -> Vec<u32> {
        match self {
            Self::Grid(grid) => vec![grid.radial_count, grid.azimuth_count],
            Self::Profile(profile) => vec![profile.count],
        }
    }
}

impl ReceiverGeometry for ReceiverGrid {
    fn geometry_dims(&self) -> usize {
        2
    }

    fn shift_radius(&mut self, delta: f64) {
        self.min_radius += delta;
        self.max_radius += delta;
    }

    fn shift_azimuth(&mut self, delta: f64) {
        self.min_azimuth += delta;
        self.max_azimuth += delta;
    }
}

impl ReceiverGeometry for ReceiverProfile {
    fn geometry_dims(&self) -> usize {
        1
    }

    fn shift_radius(&mut self, delta: f64) {
        self.min_radius += delta;
        self.max_radius += delta;
    }

    fn shift_azimuth(&mut self, delta: f64) {
        self.azimuth += delta;
    }
}

impl ReceiverGeometry for ReceiverSet {
    fn geometry_dims(&self) -> usize {
        match self {
            Self::Grid(grid) => grid.geometry_dims(),
            Self::Profile(profile) => profile.geometry_dims(),
        }
    }

    fn shift_radius(&mut self, delta: f64) {
        match self {
            Self::Grid(grid) => grid.shift_radius(delta),
            Self::Profile(profile) => profile.shift_radius(delta),
        }
    }

    fn shift_azimuth(&mut self, delta: f64) {
        match self {
            Self::Grid(grid) => grid.shift_azimuth(delta),
            Self::Profile(profile) => profile.shift_azimuth(delta),
        }
    }
}

// ── Source ──────────────────────────────────────────────────────────────

/// One source mechanism: a moment tensor plus a point-force vector, both
/// in Cartesian components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mechanism {
    pub moment_tensor: [[f64; 3]; 3],
    pub force: [f64; 3],
}

impl Mechanism {
    #[must_use]
    pub fn moment_only(moment_tensor: [[f64; 3]; 3]) -> Self {
        Self {
            moment_tensor,
            force: [0.0; 3],
        }
    }

    /// Frobenius norm of the moment tensor, used as an overall source
    /// strength.
    #[must_use]
    pub fn moment_magnitude(&self) -> f64 {
        self.moment_tensor
            .iter()
            .flatten()
            .map(|m| m * m)
            .sum::<f64>()
            .sqrt()
    }
}

/// Buried point source: epicentral position, depth, origin-time shift,
/// and one mechanism per event to synthesize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointSource {
    pub x: f64,
    pub y: f64,
    pub depth: f64,
    pub time_shift: f64,
    pub mechanisms: Vec<Mechanism>,
}

impl PointSource {
    #[must_use]
    pub fn single(depth: f64, mechanism: Mechanism) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            depth,
            time_shift: 0.0,
            mechanisms: vec![mechanism],
        }
    }
}

impl SourceConfiguration for PointSource {
    fn mechanism_count(&self) -> usize {
        self.mechanisms.len()
    }

    fn shift_depth(&mut self, delta: f64) {
        self.depth += delta;
    }
}

/// Double-couple moment tensor from strike, dip, and rake (degrees) and a
/// scalar moment, in the north-east-down convention.
#[must_use]
pub fn double_couple_moment_tensor(
    strike_deg: f64,
    dip_deg: f64,
    rake_deg: f64,
    scalar_moment: f64,
) -> [[f64; 3]; 3] {
    let strike = strike_deg.to_radians();
    let dip = dip_deg.to_radians();
    let rake = rake_deg.to_radians();

    let (sin_s, cos_s) = strike.sin_cos();
    let (sin_2s, cos_2s) = (2.0 * strike).sin_cos();
    let (sin_d, cos_d) = dip.sin_cos();
    let (sin_2d, cos_2d) = (2.0 * dip).sin_cos();
    let (sin_r, cos_r) = rake.sin_cos();

    let m_xx = -scalar_moment * (sin_d * cos_r * sin_2s + sin_2d * sin_r * sin_s * sin_s);
    let m_xy = scalar_moment * (sin_d * cos_r * cos_2s + 0.5 * sin_2d * sin_r * sin_2s);
    let m_xz = -scalar_moment * (cos_d * cos_r * cos_s + cos_2d * sin_r * sin_s);
    let m_yy = scalar_moment * (sin_d * cos_r * sin_2s - sin_2d * sin_r * cos_s * cos_s);
    let m_yz = -scalar_moment * (cos_d * cos_r * sin_s - cos_2d * sin_r * cos_s);
    let m_zz = scalar_moment * sin_2d * sin_r;

    [
        [m_xx, m_xy, m_xz],
        [m_xy, m_yy, m_yz],
        [m_xz, m_yz, m_zz],
    ]
}

// ── Earth model ─────────────────────────────────────────────────────────

/// One horizontal layer. The terminating halfspace carries an infinite
/// thickness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub thickness: f64,
    pub vp: f64,
    pub vs: f64,
    pub density: f64,
}

impl Layer {
    #[must_use]
    pub fn new(thickness: f64, vp: f64, vs: f64, density: f64) -> Self {
        Self {
            thickness,
            vp,
            vs,
            density,
        }
    }

    #[must_use]
    pub fn is_halfspace(&self) -> bool {
        self.thickness.is_infinite()
    }
}

/// Stack of horizontal layers over a halfspace, ordered from the free
/// surface downward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayeredModel {
    pub layers: Vec<Layer>,
}

impl LayeredModel {
    #[must_use]
    pub fn new(layers: Vec<Layer>) -> Self {
        Self { layers }
    }

    /// Mean P-velocity over the finite layers, or over all layers when
    /// only a halfspace is present.
    #[must_use]
    pub fn mean_finite_vp(&self) -> f64 {
        let finite: Vec<f64> = self
            .layers
            .iter()
            .filter(|layer| !layer.is_halfspace())
            .map(|layer| layer.vp)
            .collect();
        if finite.is_empty() {
            let total: f64 = self.layers.iter().map(|layer| layer.vp).sum();
            total / self.layers.len() as f64
        } else {
            finite.iter().sum::<f64>() / finite.len() as f64
        }
    }

    /// Summed thickness of the finite layers.
    #[must_use]
    pub fn total_finite_thickness(&self) -> f64 {
        self.layers
            .iter()
            .filter(|layer| !layer.is_halfspace())
            .map(|layer| layer.thickness)
            .sum()
    }
}

fn linspace_inclusive(start: f64, stop: f64, count: u32) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / f64::from(count - 1);
            (0..count).map(|i| start + f64::from(i) * step).collect()
        }
    }
}

fn linspace_exclusive(start: f64, stop: f64, count: u32) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    let step = (stop - start) / f64::from(count);
    (0..count).map(|i| start + f64::from(i) * step).collect()
}
