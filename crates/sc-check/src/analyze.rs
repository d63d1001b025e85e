//! Finite-difference error analysis for one derivative parameter.

use sc_core::{AxisLayout, SeisTensor, TensorError};

/// Outcome of comparing one analytic derivative slice against its
/// finite-difference approximation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorAnalysis {
    /// Worst relative error over all receiver points and channels. NaN
    /// when some point has a vanishing normalizer but a non-vanishing
    /// error, which no finite tolerance should accept.
    pub max_relative_error: f64,
    /// Points whose normalizer and error both vanish; they carry no
    /// information about derivative quality and are excluded from the
    /// maximum.
    pub degenerate_points: u64,
}

/// Compare an analytic derivative slice against the forward difference
/// `(perturbed - baseline) / effective_step`.
///
/// The error and the normalizer are both reduced over the time axis (when
/// present) before forming the relative error, so one transient
/// zero-crossing of the signal cannot blow the ratio up.
pub fn analyze(
    baseline: &SeisTensor,
    perturbed: &SeisTensor,
    analytic_slice: &SeisTensor,
    effective_step: f64,
    layout: &AxisLayout,
) -> Result<ErrorAnalysis, TensorError> {
    let fd = perturbed.sub(baseline)?.scaled(1.0 / effective_step);
    let error = analytic_slice.sub(&fd)?.abs();
    let norm = analytic_slice.abs();

    let (error, norm) = if layout.has_time_axis() {
        (error.max_over_last_axis()?, norm.max_over_last_axis()?)
    } else {
        (error, norm)
    };

    let mut max_relative_error = 0.0_f64;
    let mut degenerate_points = 0_u64;
    let mut poisoned = false;
    for (&err, &norm) in error.elements.iter().zip(&norm.elements) {
        if norm == 0.0 {
            if err == 0.0 {
                degenerate_points += 1;
            } else {
                poisoned = true;
            }
            continue;
        }
        max_relative_error = max_relative_error.max(err / norm);
    }

    Ok(ErrorAnalysis {
        max_relative_error: if poisoned { f64::NAN } else { max_relative_error },
        degenerate_points,
    })
}
