//! Required-field checker.
//!
//! The three narrative fields are the only hard gate on validity: a blank
//! `current_condition`, `diagnosis`, or `treatment` yields a
//! critical-severity error, and nothing else does.

use super::is_blank;
use consulta_types::{ConsultationRecord, ErrorSeverity, RuleKind, ValidationError};

/// Checks that the three required narrative fields are present.
///
/// Returns one critical error per blank field (after trimming).
pub fn check_required_fields(record: &ConsultationRecord) -> Vec<ValidationError> {
    let required: [(&str, &str, &str); 3] = [
        (
            "current_condition",
            record.current_condition.as_str(),
            "padecimiento actual",
        ),
        ("diagnosis", record.diagnosis.as_str(), "diagnóstico"),
        ("treatment", record.treatment.as_str(), "tratamiento"),
    ];

    required
        .into_iter()
        .filter(|(_, value, _)| is_blank(value))
        .map(|(field, _, label)| ValidationError {
            field: field.into(),
            kind: RuleKind::RequiredField,
            message: format!("El campo obligatorio '{label}' está vacío"),
            severity: ErrorSeverity::Critical,
            correction: Some(format!("Documentar {label} antes de guardar la consulta")),
        })
        .collect()
}
