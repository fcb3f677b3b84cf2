//! Diagnosis/treatment consistency checker.
//!
//! For each catalogued condition keyword found in the diagnosis, the
//! treatment plan is expected to mention at least one of the mapped
//! treatment keywords. Matching is case-insensitive substring search over
//! the catalogue's Spanish terminology.

use crate::catalog::RuleCatalog;
use crate::constants::CONSISTENCY_SUGGESTION_TERMS;
use consulta_types::{ConsultationRecord, RuleKind, ValidationWarning, WarningImpact};

/// Checks that the treatment addresses the conditions named in the diagnosis.
///
/// Emits one quality warning per catalogued condition that appears in the
/// diagnosis without any of its expected treatment keywords appearing in
/// the treatment text. The warning's suggestion quotes up to the first
/// three expected keywords, comma-joined.
pub fn check_diagnosis_treatment_consistency(
    record: &ConsultationRecord,
    catalog: &RuleCatalog,
) -> Vec<ValidationWarning> {
    let diagnosis = record.diagnosis.to_lowercase();
    let treatment = record.treatment.to_lowercase();

    let mut warnings = Vec::new();

    for pattern in &catalog.diagnosis_treatment_patterns {
        if !diagnosis.contains(pattern.condition.as_str()) {
            continue;
        }

        let addressed = pattern
            .expected_treatments
            .iter()
            .any(|keyword| treatment.contains(keyword.as_str()));
        if addressed {
            continue;
        }

        let sample = pattern
            .expected_treatments
            .iter()
            .take(CONSISTENCY_SUGGESTION_TERMS)
            .map(|keyword| keyword.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        warnings.push(ValidationWarning {
            field: "treatment".into(),
            kind: RuleKind::Consistency,
            message: format!(
                "El diagnóstico menciona '{}' pero el tratamiento no incluye una terapia esperada",
                pattern.condition
            ),
            suggestion: format!("Considerar: {sample}"),
            impact: WarningImpact::Quality,
        });
    }

    warnings
}
