//! Validation verdicts and report rendering.

use sc_core::Parameter;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Agreement,
    Mismatch,
}

/// Classify a maximum relative error against the tolerance. Written so
/// that a NaN error fails: `NaN <= tolerance` is false.
#[must_use]
pub fn classify(max_relative_error: f64, tolerance: f64) -> Verdict {
    if max_relative_error <= tolerance {
        Verdict::Agreement
    } else {
        Verdict::Mismatch
    }
}

/// Validation outcome for one derivative parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivativeError {
    pub parameter: Parameter,
    pub max_relative_error: f64,
    pub degenerate_points: u64,
    pub verdict: Verdict,
}

/// Full validation report: one entry per active derivative parameter, in
/// request order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub tolerance: f64,
    pub entries: Vec<DerivativeError>,
}

impl ValidationReport {
    #[must_use]
    pub fn overall_verdict(&self) -> Verdict {
        if self
            .entries
            .iter()
            .all(|entry| entry.verdict == Verdict::Agreement)
        {
            Verdict::Agreement
        } else {
            Verdict::Mismatch
        }
    }

    #[must_use]
    pub fn is_agreement(&self) -> bool {
        self.overall_verdict() == Verdict::Agreement
    }

    /// Human-readable summary: one max-error line per parameter, then the
    /// overall verdict line.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&format!(
                "Max error, '{}' derivative: {:.6}%\n",
                entry.parameter,
                100.0 * entry.max_relative_error
            ));
        }
        match self.overall_verdict() {
            Verdict::Agreement => {
                out.push_str("Analytic derivatives agree with finite-difference approximation\n");
            }
            Verdict::Mismatch => {
                out.push_str(
                    "\n*** Warning: Mismatch between analytic and finite-difference derivatives? ***\n\n",
                );
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::{DerivativeError, ValidationReport, Verdict, classify};
    use sc_core::Parameter;

    fn entry(parameter: Parameter, error: f64, tolerance: f64) -> DerivativeError {
        DerivativeError {
            parameter,
            max_relative_error: error,
            degenerate_points: 0,
            verdict: classify(error, tolerance),
        }
    }

    #[test]
    fn classify_treats_nan_as_mismatch() {
        assert_eq!(classify(5e-5, 1e-4), Verdict::Agreement);
        assert_eq!(classify(1e-4, 1e-4), Verdict::Agreement);
        assert_eq!(classify(2e-4, 1e-4), Verdict::Mismatch);
        assert_eq!(classify(f64::NAN, 1e-4), Verdict::Mismatch);
    }

    #[test]
    fn one_bad_entry_fails_the_report() {
        let report = ValidationReport {
            tolerance: 1e-4,
            entries: vec![
                entry(Parameter::Radius, 1e-6, 1e-4),
                entry(Parameter::Azimuth, 3e-3, 1e-4),
            ],
        };
        assert_eq!(report.overall_verdict(), Verdict::Mismatch);
        assert!(!report.is_agreement());
    }

    #[test]
    fn render_reports_percentages_and_verdict() {
        let report = ValidationReport {
            tolerance: 1e-4,
            entries: vec![
                entry(Parameter::Radius, 1.5e-6, 1e-4),
                entry(Parameter::Depth, 2e-6, 1e-4),
            ],
        };
        let text = report.render();
        assert!(text.contains("Max error, 'r' derivative: 0.000150%"));
        assert!(text.contains("Max error, 'depth' derivative: 0.000200%"));
        assert!(text.contains("Analytic derivatives agree"));

        let report = ValidationReport {
            tolerance: 1e-4,
            entries: vec![entry(Parameter::Azimuth, 0.02, 1e-4)],
        };
        let text = report.render();
        // The banner sits between blank lines.
        assert!(text.contains(
            "\n\n*** Warning: Mismatch between analytic and finite-difference derivatives? ***\n\n"
        ));
    }

    #[test]
    fn empty_report_counts_as_agreement() {
        let report = ValidationReport {
            tolerance: 1e-4,
            entries: Vec::new(),
        };
        assert!(report.is_agreement());
    }
}
