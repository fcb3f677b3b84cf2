//! Validation findings and the assembled result.
//!
//! Findings are ordinary return data, never errors: a consultation with
//! blocking problems still evaluates successfully. Only the engine itself
//! failing to run is an `Err` (see `consulta-core`).

use serde::{Deserialize, Serialize};

/// The rule family a finding belongs to.
///
/// Every finding names its family so consumers (and the catalogue
/// consistency tests in `consulta-core`) can tie it back to the rule
/// catalogue entry documenting it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// One of the three required narrative fields is blank.
    RequiredField,
    /// Diagnosis mentions a catalogued condition the treatment does not address.
    Consistency,
    /// Medication-safety finding (high-risk drug, allergy, age contraindication).
    MedicationSafety,
    /// Expected documentation is missing (vitals, examination, prognosis).
    Completeness,
    /// Advisory clinical-quality heuristic.
    ClinicalQuality,
}

/// Severity of a blocking or near-blocking error.
///
/// Only `Critical` entries gate submission; `High` and `Medium` medication
/// findings travel in the same error list without blocking validity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
}

/// Which quality dimension a warning affects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningImpact {
    Quality,
    Safety,
    Completeness,
}

/// Priority of an advisory suggestion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionPriority {
    High,
    Medium,
    Low,
}

/// A blocking or near-blocking finding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Record field the finding is anchored to, e.g. `"medications"`.
    pub field: String,
    /// Rule family that produced the finding.
    pub kind: RuleKind,
    /// Human-readable description shown to the clinician.
    pub message: String,
    /// Finding severity; `Critical` blocks submission.
    pub severity: ErrorSeverity,
    /// Suggested corrective action, if one applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correction: Option<String>,
}

/// A non-blocking quality, safety, or completeness concern.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationWarning {
    /// Record field the warning is anchored to.
    pub field: String,
    /// Rule family that produced the warning.
    pub kind: RuleKind,
    /// Human-readable description shown to the clinician.
    pub message: String,
    /// Suggested improvement.
    pub suggestion: String,
    /// Which dimension the warning affects (drives the score penalty).
    pub impact: WarningImpact,
}

/// An advisory improvement with no effect on validity or score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSuggestion {
    /// Record field the suggestion is anchored to.
    pub field: String,
    /// Rule family that produced the suggestion.
    pub kind: RuleKind,
    /// Suggested improvement.
    pub suggestion: String,
    /// Why the improvement matters clinically.
    pub rationale: String,
    /// Display priority.
    pub priority: SuggestionPriority,
}

/// The assembled outcome of one evaluation run.
///
/// Constructed fresh on every run and immutable once returned. Invariants:
/// - `is_valid` is `true` iff `critical_errors` contains no entry with
///   [`ErrorSeverity::Critical`]. High/medium-severity medication findings
///   deliberately do not block validity.
/// - `score` and `completeness` are always within `0..=100`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// `false` iff any critical-severity error is present.
    pub is_valid: bool,
    /// Blocking and near-blocking findings (required fields, medication safety).
    pub critical_errors: Vec<ValidationError>,
    /// Non-blocking findings (consistency, completeness).
    pub warnings: Vec<ValidationWarning>,
    /// Advisory improvements (clinical quality).
    pub suggestions: Vec<ValidationSuggestion>,
    /// Quality score: correctness/safety, penalised by errors and warnings.
    pub score: u8,
    /// Completeness score: presence of expected fields, independent of `score`.
    pub completeness: u8,
}

impl ValidationResult {
    /// Returns the number of findings that actually block submission.
    pub fn blocking_error_count(&self) -> usize {
        self.critical_errors
            .iter()
            .filter(|error| error.severity == ErrorSeverity::Critical)
            .count()
    }
}
