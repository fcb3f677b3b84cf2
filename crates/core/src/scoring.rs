//! Scoring formulas.
//!
//! Two independent measures:
//! - the quality score starts at 100 and is penalised by errors and
//!   warnings (correctness/safety),
//! - the completeness score measures presence of expected fields and is
//!   unaffected by findings.
//!
//! Both are clamped to `0..=100`.

use crate::checks::is_blank;
use consulta_types::{
    ConsultationRecord, ErrorSeverity, ValidationError, ValidationWarning, WarningImpact,
};

/// Penalty subtracted from the quality score per error, by severity.
fn error_penalty(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Critical => 30,
        ErrorSeverity::High => 20,
        ErrorSeverity::Medium => 10,
    }
}

/// Penalty subtracted from the quality score per warning, by impact.
fn warning_penalty(impact: WarningImpact) -> i32 {
    match impact {
        WarningImpact::Safety => 15,
        WarningImpact::Quality => 10,
        WarningImpact::Completeness => 5,
    }
}

/// Computes the quality score from the assembled findings.
///
/// Starts at 100, subtracts the per-error and per-warning penalties, and
/// floors the result at 0. Suggestions carry no penalty.
pub fn quality_score(errors: &[ValidationError], warnings: &[ValidationWarning]) -> u8 {
    let mut score: i32 = 100;

    for error in errors {
        score -= error_penalty(error.severity);
    }
    for warning in warnings {
        score -= warning_penalty(warning.impact);
    }

    score.clamp(0, 100) as u8
}

/// Computes the completeness score from field presence alone.
///
/// Required narrative fields weigh 70% of the score, the optional trio
/// (vitals, physical examination, prognosis) the remaining 30%. A field
/// counts as filled iff it carries non-blank content.
pub fn completeness_score(record: &ConsultationRecord) -> u8 {
    let required_filled = [
        record.current_condition.as_str(),
        record.diagnosis.as_str(),
        record.treatment.as_str(),
    ]
    .into_iter()
    .filter(|value| !is_blank(value))
    .count();

    let optional_filled = [
        record.has_vital_signs(),
        record.has_physical_examination(),
        record.has_prognosis(),
    ]
    .into_iter()
    .filter(|filled| *filled)
    .count();

    let score = (required_filled as f64 / 3.0) * 70.0 + (optional_filled as f64 / 3.0) * 30.0;
    score.round() as u8
}
