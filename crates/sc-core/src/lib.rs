#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    pub dims: Vec<u32>,
}

impl Shape {
    #[must_use]
    pub fn new(dims: Vec<u32>) -> Self {
        Self { dims }
    }

    #[must_use]
    pub fn scalar() -> Self {
        Self { dims: Vec::new() }
    }

    #[must_use]
    pub fn vector(len: u32) -> Self {
        Self { dims: vec![len] }
    }

    #[must_use]
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    #[must_use]
    pub fn element_count(&self) -> Option<u64> {
        self.dims
            .iter()
            .try_fold(1_u64, |acc, dim| acc.checked_mul(u64::from(*dim)))
    }
}

/// Row-major `f64` tensor carrying seismograms or derivative fields.
///
/// Rank is data-dependent: receiver-geometry axes come first, then an
/// optional derivative axis, the signal-channel axis, and an optional time
/// axis. `SeisTensor` itself is layout-agnostic; [`AxisLayout`] assigns
/// meaning to the axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeisTensor {
    pub shape: Shape,
    pub elements: Vec<f64>,
}

impl SeisTensor {
    pub fn new(shape: Shape, elements: Vec<f64>) -> Result<Self, TensorError> {
        let expected_count = shape.element_count().ok_or(TensorError::ShapeOverflow {
            shape: shape.clone(),
        })?;

        if expected_count != elements.len() as u64 {
            return Err(TensorError::ElementCountMismatch {
                shape,
                expected_count,
                actual_count: elements.len(),
            });
        }

        Ok(Self { shape, elements })
    }

    pub fn zeros(shape: Shape) -> Result<Self, TensorError> {
        let count = shape.element_count().ok_or(TensorError::ShapeOverflow {
            shape: shape.clone(),
        })?;
        let count = usize::try_from(count).map_err(|_| TensorError::ShapeOverflow {
            shape: shape.clone(),
        })?;
        Ok(Self {
            shape,
            elements: vec![0.0; count],
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[must_use]
    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    #[must_use]
    pub fn map(&self, op: impl Fn(f64) -> f64) -> Self {
        Self {
            shape: self.shape.clone(),
            elements: self.elements.iter().map(|value| op(*value)).collect(),
        }
    }

    #[must_use]
    pub fn abs(&self) -> Self {
        self.map(f64::abs)
    }

    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        self.map(|value| value * factor)
    }

    /// Elementwise difference; shapes must match exactly (no broadcasting).
    pub fn sub(&self, rhs: &Self) -> Result<Self, TensorError> {
        if self.shape != rhs.shape {
            return Err(TensorError::ShapeMismatch {
                left: self.shape.clone(),
                right: rhs.shape.clone(),
            });
        }
        let elements = self
            .elements
            .iter()
            .zip(rhs.elements.iter())
            .map(|(a, b)| a - b)
            .collect();
        Ok(Self {
            shape: self.shape.clone(),
            elements,
        })
    }

    /// Index one axis at a fixed position, keeping every other axis in
    /// full. The result has rank reduced by one, with the remaining axes
    /// in their original order.
    pub fn select_axis(&self, axis: usize, index: usize) -> Result<Self, TensorError> {
        let rank = self.rank();
        if axis >= rank {
            return Err(TensorError::AxisOutOfBounds { axis, rank });
        }
        let axis_size = self.shape.dims[axis] as usize;
        if index >= axis_size {
            return Err(TensorError::IndexOutOfBounds { index, axis_size });
        }

        let inner: usize = self.shape.dims[axis + 1..]
            .iter()
            .map(|dim| *dim as usize)
            .product();
        let outer: usize = self.shape.dims[..axis]
            .iter()
            .map(|dim| *dim as usize)
            .product();

        let mut elements = Vec::with_capacity(outer * inner);
        for block in 0..outer {
            let start = (block * axis_size + index) * inner;
            elements.extend_from_slice(&self.elements[start..start + inner]);
        }

        let mut dims = Vec::with_capacity(rank - 1);
        dims.extend_from_slice(&self.shape.dims[..axis]);
        dims.extend_from_slice(&self.shape.dims[axis + 1..]);
        Self::new(Shape { dims }, elements)
    }

    /// Reduce the trailing axis with `max`, e.g. collapsing a time axis to
    /// a per-trace envelope maximum.
    pub fn max_over_last_axis(&self) -> Result<Self, TensorError> {
        let rank = self.rank();
        if rank == 0 {
            return Err(TensorError::ReduceRankZero);
        }
        let last = self.shape.dims[rank - 1] as usize;
        let out_dims = self.shape.dims[..rank - 1].to_vec();
        let out_count: usize = out_dims.iter().map(|dim| *dim as usize).product();

        let mut elements = Vec::with_capacity(out_count);
        for block in 0..out_count {
            let start = block * last;
            let max = self.elements[start..start + last]
                .iter()
                .fold(f64::NEG_INFINITY, |acc, value| acc.max(*value));
            elements.push(max);
        }
        Self::new(Shape { dims: out_dims }, elements)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TensorError {
    ShapeOverflow {
        shape: Shape,
    },
    ElementCountMismatch {
        shape: Shape,
        expected_count: u64,
        actual_count: usize,
    },
    ShapeMismatch {
        left: Shape,
        right: Shape,
    },
    AxisOutOfBounds {
        axis: usize,
        rank: usize,
    },
    IndexOutOfBounds {
        index: usize,
        axis_size: usize,
    },
    ReduceRankZero,
}

impl std::fmt::Display for TensorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ShapeOverflow { shape } => {
                write!(f, "shape element count overflowed: {:?}", shape.dims)
            }
            Self::ElementCountMismatch {
                shape,
                expected_count,
                actual_count,
            } => {
                write!(
                    f,
                    "tensor element count mismatch for shape {:?}: expected {}, got {}",
                    shape.dims, expected_count, actual_count
                )
            }
            Self::ShapeMismatch { left, right } => {
                write!(
                    f,
                    "tensor shape mismatch: left={:?} right={:?}",
                    left.dims, right.dims
                )
            }
            Self::AxisOutOfBounds { axis, rank } => {
                write!(f, "axis {} out of bounds for rank {}", axis, rank)
            }
            Self::IndexOutOfBounds { index, axis_size } => {
                write!(
                    f,
                    "index {} out of bounds for axis size {}",
                    index, axis_size
                )
            }
            Self::ReduceRankZero => write!(f, "cannot reduce trailing axis of rank-0 tensor"),
        }
    }
}

impl std::error::Error for TensorError {}

// ── Axis layout ────────────────────────────────────────────────────

/// Role of one tensor axis in an engine response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisRole {
    Geometry,
    Derivative,
    Channel,
    Time,
}

/// Rank contract for the tensors an engine returns, parametrized by axis
/// role rather than literal positions.
///
/// A seismogram tensor has one axis per receiver-geometry dimension, a
/// signal-channel axis, and a time axis when more than one sample was
/// requested. A derivative tensor carries one extra axis ahead of the
/// channel axis, but only when more than one derivative is active: a
/// single-derivative response collapses to seismogram rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisLayout {
    geometry_dims: usize,
    derivative_dims: usize,
    time_dims: usize,
}

impl AxisLayout {
    #[must_use]
    pub fn new(geometry_dims: usize, derivative_count: usize, sample_count: u32) -> Self {
        Self {
            geometry_dims,
            derivative_dims: usize::from(derivative_count > 1),
            time_dims: usize::from(sample_count > 1),
        }
    }

    #[must_use]
    pub fn geometry_dims(&self) -> usize {
        self.geometry_dims
    }

    #[must_use]
    pub fn has_time_axis(&self) -> bool {
        self.time_dims == 1
    }

    #[must_use]
    pub fn has_derivative_axis(&self) -> bool {
        self.derivative_dims == 1
    }

    #[must_use]
    pub fn seismogram_rank(&self) -> usize {
        self.geometry_dims + 1 + self.time_dims
    }

    #[must_use]
    pub fn derivative_rank(&self) -> usize {
        self.seismogram_rank() + self.derivative_dims
    }

    /// Axis roles of a derivative tensor, in storage order.
    #[must_use]
    pub fn roles(&self) -> SmallVec<[AxisRole; 6]> {
        let mut roles = SmallVec::new();
        for _ in 0..self.geometry_dims {
            roles.push(AxisRole::Geometry);
        }
        if self.derivative_dims == 1 {
            roles.push(AxisRole::Derivative);
        }
        roles.push(AxisRole::Channel);
        if self.time_dims == 1 {
            roles.push(AxisRole::Time);
        }
        roles
    }

    #[must_use]
    pub fn derivative_axis(&self) -> Option<usize> {
        self.roles()
            .iter()
            .position(|role| *role == AxisRole::Derivative)
    }

    /// Extract the seismogram-ranked sub-tensor for one requested
    /// derivative. With a derivative axis present the axis is indexed at
    /// `index`; a single-derivative tensor is already seismogram-ranked
    /// and is returned unchanged.
    pub fn derivative_slice(
        &self,
        derivative: &SeisTensor,
        index: usize,
    ) -> Result<SeisTensor, TensorError> {
        match self.derivative_axis() {
            Some(axis) => derivative.select_axis(axis, index),
            None => Ok(derivative.clone()),
        }
    }
}

// ── Derivative request ─────────────────────────────────────────────

/// A model parameter the engine can differentiate with respect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    Radius,
    Azimuth,
    Depth,
}

impl Parameter {
    /// Fixed derivative ordering: radius, azimuth, depth.
    pub const ALL: [Parameter; 3] = [Parameter::Radius, Parameter::Azimuth, Parameter::Depth];

    /// Engine-facing switch name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Radius => "r",
            Self::Azimuth => "phi",
            Self::Depth => "depth",
        }
    }
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable description of which analytic derivatives are requested.
///
/// Each active parameter occupies a unique slot on the combined derivative
/// axis, assigned in the fixed [`Parameter::ALL`] order with inactive
/// parameters skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivativeRequest {
    radius: bool,
    azimuth: bool,
    depth: bool,
}

impl DerivativeRequest {
    pub fn new(radius: bool, azimuth: bool, depth: bool) -> Result<Self, ConfigError> {
        if !radius && !azimuth && !depth {
            return Err(ConfigError::NoActiveDerivatives);
        }
        Ok(Self {
            radius,
            azimuth,
            depth,
        })
    }

    #[must_use]
    pub fn all() -> Self {
        Self {
            radius: true,
            azimuth: true,
            depth: true,
        }
    }

    #[must_use]
    pub fn single(parameter: Parameter) -> Self {
        Self {
            radius: parameter == Parameter::Radius,
            azimuth: parameter == Parameter::Azimuth,
            depth: parameter == Parameter::Depth,
        }
    }

    #[must_use]
    pub fn is_active(&self, parameter: Parameter) -> bool {
        match parameter {
            Parameter::Radius => self.radius,
            Parameter::Azimuth => self.azimuth,
            Parameter::Depth => self.depth,
        }
    }

    #[must_use]
    pub fn count(&self) -> usize {
        Parameter::ALL
            .iter()
            .filter(|parameter| self.is_active(**parameter))
            .count()
    }

    /// Slot of `parameter` on the combined derivative axis, `None` when
    /// inactive.
    #[must_use]
    pub fn index_of(&self, parameter: Parameter) -> Option<usize> {
        if !self.is_active(parameter) {
            return None;
        }
        Some(
            Parameter::ALL
                .iter()
                .take_while(|candidate| **candidate != parameter)
                .filter(|candidate| self.is_active(**candidate))
                .count(),
        )
    }

    /// Active parameters with their axis slots, in fixed order.
    #[must_use]
    pub fn active(&self) -> SmallVec<[(Parameter, usize); 3]> {
        Parameter::ALL
            .iter()
            .filter(|parameter| self.is_active(**parameter))
            .enumerate()
            .map(|(index, parameter)| (*parameter, index))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NoActiveDerivatives,
    NonPositiveStep { step: f64 },
    MultipleSources { count: usize },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoActiveDerivatives => {
                write!(f, "all derivatives are switched off")
            }
            Self::NonPositiveStep { step } => {
                write!(f, "perturbation step must be positive, got {step}")
            }
            Self::MultipleSources { count } => {
                write!(
                    f,
                    "finite-difference validation requires a single source mechanism, got {count}"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::{
        AxisLayout, AxisRole, ConfigError, DerivativeRequest, Parameter, SeisTensor, Shape,
        TensorError,
    };

    fn tensor(dims: &[u32], elements: &[f64]) -> SeisTensor {
        SeisTensor::new(
            Shape {
                dims: dims.to_vec(),
            },
            elements.to_vec(),
        )
        .expect("test tensor should build")
    }

    #[test]
    fn shape_rank_and_element_count() {
        let shape = Shape {
            dims: vec![4, 8, 3, 257],
        };
        assert_eq!(shape.rank(), 4);
        assert_eq!(shape.element_count(), Some(4 * 8 * 3 * 257));
        assert_eq!(Shape::scalar().rank(), 0);
        assert_eq!(Shape::scalar().element_count(), Some(1));
        assert_eq!(Shape::vector(5).element_count(), Some(5));
    }

    #[test]
    fn tensor_rejects_element_count_mismatch() {
        let err = SeisTensor::new(Shape { dims: vec![2, 3] }, vec![1.0; 5])
            .expect_err("mismatched element count should fail");
        assert_eq!(
            err,
            TensorError::ElementCountMismatch {
                shape: Shape { dims: vec![2, 3] },
                expected_count: 6,
                actual_count: 5,
            }
        );
    }

    #[test]
    fn sub_requires_identical_shapes() {
        let a = tensor(&[2, 2], &[1.0, 2.0, 3.0, 4.0]);
        let b = tensor(&[4], &[1.0, 2.0, 3.0, 4.0]);
        let err = a.sub(&b).expect_err("shape mismatch should fail");
        assert!(matches!(err, TensorError::ShapeMismatch { .. }));

        let c = tensor(&[2, 2], &[0.5, 0.5, 0.5, 0.5]);
        let diff = a.sub(&c).expect("matching shapes should subtract");
        assert_eq!(diff.elements, vec![0.5, 1.5, 2.5, 3.5]);
    }

    #[test]
    fn select_axis_middle_axis() {
        // shape [2, 3, 2], row-major 0..12
        let t = tensor(
            &[2, 3, 2],
            &[
                0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0,
            ],
        );
        let sliced = t.select_axis(1, 2).expect("slice should succeed");
        assert_eq!(sliced.shape.dims, vec![2, 2]);
        assert_eq!(sliced.elements, vec![4.0, 5.0, 10.0, 11.0]);
    }

    #[test]
    fn select_axis_leading_and_trailing() {
        let t = tensor(&[2, 3], &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        let lead = t.select_axis(0, 1).expect("leading slice");
        assert_eq!(lead.shape.dims, vec![3]);
        assert_eq!(lead.elements, vec![3.0, 4.0, 5.0]);

        let trail = t.select_axis(1, 0).expect("trailing slice");
        assert_eq!(trail.shape.dims, vec![2]);
        assert_eq!(trail.elements, vec![0.0, 3.0]);
    }

    #[test]
    fn select_axis_bounds_errors() {
        let t = tensor(&[2, 2], &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(
            t.select_axis(2, 0),
            Err(TensorError::AxisOutOfBounds { axis: 2, rank: 2 })
        );
        assert_eq!(
            t.select_axis(1, 5),
            Err(TensorError::IndexOutOfBounds {
                index: 5,
                axis_size: 2
            })
        );
    }

    #[test]
    fn max_over_last_axis_reduces_time() {
        let t = tensor(&[2, 3], &[1.0, -5.0, 2.0, 0.0, 4.0, 3.0]);
        let reduced = t.max_over_last_axis().expect("reduce should succeed");
        assert_eq!(reduced.shape.dims, vec![2]);
        assert_eq!(reduced.elements, vec![2.0, 4.0]);
    }

    #[test]
    fn max_over_last_axis_rejects_rank_zero() {
        let t = SeisTensor::new(Shape::scalar(), vec![1.0]).expect("scalar tensor");
        assert_eq!(t.max_over_last_axis(), Err(TensorError::ReduceRankZero));
    }

    #[test]
    fn layout_ranks_follow_contract() {
        // grid, three derivatives, time series
        let layout = AxisLayout::new(2, 3, 257);
        assert_eq!(layout.seismogram_rank(), 4);
        assert_eq!(layout.derivative_rank(), 5);
        assert_eq!(layout.derivative_axis(), Some(2));

        // profile, single derivative, static query
        let layout = AxisLayout::new(1, 1, 1);
        assert_eq!(layout.seismogram_rank(), 2);
        assert_eq!(layout.derivative_rank(), 2);
        assert_eq!(layout.derivative_axis(), None);
    }

    #[test]
    fn layout_roles_are_ordered() {
        let layout = AxisLayout::new(2, 2, 128);
        let roles = layout.roles();
        assert_eq!(
            roles.as_slice(),
            &[
                AxisRole::Geometry,
                AxisRole::Geometry,
                AxisRole::Derivative,
                AxisRole::Channel,
                AxisRole::Time,
            ]
        );
    }

    #[test]
    fn derivative_slice_indexes_derivative_axis() {
        // profile geometry (1 dim), 2 derivatives, static: [2 rcv, 2 drv, 3 chan]
        let layout = AxisLayout::new(1, 2, 1);
        let t = tensor(
            &[2, 2, 3],
            &[
                0.0, 1.0, 2.0, 10.0, 11.0, 12.0, 3.0, 4.0, 5.0, 13.0, 14.0, 15.0,
            ],
        );
        let second = layout.derivative_slice(&t, 1).expect("slice should build");
        assert_eq!(second.shape.dims, vec![2, 3]);
        assert_eq!(second.elements, vec![10.0, 11.0, 12.0, 13.0, 14.0, 15.0]);
    }

    #[test]
    fn derivative_slice_single_derivative_is_identity() {
        let layout = AxisLayout::new(1, 1, 1);
        let t = tensor(&[2, 3], &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        let sliced = layout.derivative_slice(&t, 0).expect("identity slice");
        assert_eq!(sliced, t);
    }

    #[test]
    fn request_rejects_all_inactive() {
        let err = DerivativeRequest::new(false, false, false)
            .expect_err("zero active derivatives should fail");
        assert_eq!(err, ConfigError::NoActiveDerivatives);
    }

    #[test]
    fn request_assigns_indices_in_fixed_order() {
        let request = DerivativeRequest::all();
        assert_eq!(request.count(), 3);
        assert_eq!(request.index_of(Parameter::Radius), Some(0));
        assert_eq!(request.index_of(Parameter::Azimuth), Some(1));
        assert_eq!(request.index_of(Parameter::Depth), Some(2));

        let request = DerivativeRequest::new(true, false, true).expect("request should build");
        assert_eq!(request.count(), 2);
        assert_eq!(request.index_of(Parameter::Radius), Some(0));
        assert_eq!(request.index_of(Parameter::Azimuth), None);
        assert_eq!(request.index_of(Parameter::Depth), Some(1));
    }

    #[test]
    fn request_active_yields_parameter_slot_pairs() {
        let request = DerivativeRequest::new(false, true, true).expect("request should build");
        let active = request.active();
        assert_eq!(
            active.as_slice(),
            &[(Parameter::Azimuth, 0), (Parameter::Depth, 1)]
        );
    }

    #[test]
    fn single_request_activates_one_parameter() {
        let request = DerivativeRequest::single(Parameter::Depth);
        assert_eq!(request.count(), 1);
        assert!(request.is_active(Parameter::Depth));
        assert!(!request.is_active(Parameter::Radius));
        assert_eq!(request.index_of(Parameter::Depth), Some(0));
    }

    #[test]
    fn parameter_names_match_engine_switches() {
        assert_eq!(Parameter::Radius.as_str(), "r");
        assert_eq!(Parameter::Azimuth.as_str(), "phi");
        assert_eq!(Parameter::Depth.as_str(), "depth");
    }

    #[test]
    fn config_error_display() {
        assert_eq!(
            ConfigError::NoActiveDerivatives.to_string(),
            "all derivatives are switched off"
        );
        let err = ConfigError::NonPositiveStep { step: -0.5 };
        assert!(err.to_string().contains("-0.5"));
        let err = ConfigError::MultipleSources { count: 4 };
        assert!(err.to_string().contains("single source mechanism"));
    }

    #[test]
    fn test_core_test_log_schema_contract() {
        let fixture_id =
            sc_test_utils::fixture_id_from_json(&("core", "layout")).expect("digest");
        let log = sc_test_utils::TestLogV1::unit(
            sc_test_utils::test_id(module_path!(), "test_core_test_log_schema_contract"),
            fixture_id,
            sc_test_utils::TestMode::Strict,
            sc_test_utils::TestResult::Pass,
        );
        assert_eq!(log.schema_version, sc_test_utils::TEST_LOG_SCHEMA_VERSION);
    }
}

#[cfg(test)]
mod prop_tests {
    use super::{AxisLayout, DerivativeRequest, Parameter, SeisTensor, Shape};
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: sc_test_utils::property_test_case_count(),
            ..ProptestConfig::default()
        })]

        #[test]
        fn prop_active_indices_form_ordered_permutation(
            radius in any::<bool>(),
            azimuth in any::<bool>(),
            depth in any::<bool>(),
        ) {
            prop_assume!(radius || azimuth || depth);
            let request = DerivativeRequest::new(radius, azimuth, depth).unwrap();
            let active = request.active();

            prop_assert_eq!(active.len(), request.count());
            for (slot, (parameter, index)) in active.iter().enumerate() {
                prop_assert_eq!(*index, slot);
                prop_assert_eq!(request.index_of(*parameter), Some(slot));
            }
            // fixed order: radius before azimuth before depth
            let order: Vec<Parameter> = active.iter().map(|(p, _)| *p).collect();
            let mut sorted = order.clone();
            sorted.sort();
            prop_assert_eq!(order, sorted);
        }

        #[test]
        fn prop_rank_contract_holds(
            geometry_dims in 1_usize..4,
            derivative_count in 1_usize..4,
            sample_count in 1_u32..512,
        ) {
            let layout = AxisLayout::new(geometry_dims, derivative_count, sample_count);
            let time_dims = usize::from(sample_count > 1);
            prop_assert_eq!(layout.seismogram_rank(), geometry_dims + 1 + time_dims);
            prop_assert_eq!(
                layout.derivative_rank(),
                layout.seismogram_rank() + usize::from(derivative_count > 1)
            );
            prop_assert_eq!(layout.roles().len(), layout.derivative_rank());
        }

        #[test]
        fn prop_select_axis_drops_exactly_one_dim(
            dims in proptest::collection::vec(1_u32..5, 1..5),
            axis_seed in any::<usize>(),
        ) {
            let axis = axis_seed % dims.len();
            let count: usize = dims.iter().map(|d| *d as usize).product();
            let elements: Vec<f64> = (0..count).map(|i| i as f64).collect();
            let tensor = SeisTensor::new(Shape { dims: dims.clone() }, elements).unwrap();

            let sliced = tensor.select_axis(axis, 0).unwrap();
            let mut expected = dims.clone();
            expected.remove(axis);
            prop_assert_eq!(sliced.shape.dims, expected);
        }
    }
}
