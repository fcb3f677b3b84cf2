//! Clinical-quality checker.
//!
//! Advisory heuristics about documentation quality. Each heuristic is
//! evaluated independently; any subset may fire together. Suggestions
//! never affect validity or the quality score.

use crate::catalog::RuleCatalog;
use crate::constants::{MAX_VAGUE_DIAGNOSIS_CHARS, MIN_CONDITION_NARRATIVE_CHARS};
use consulta_types::{ConsultationRecord, RuleKind, SuggestionPriority, ValidationSuggestion};

fn quality_suggestion(
    field: &str,
    suggestion: String,
    rationale: String,
    priority: SuggestionPriority,
) -> ValidationSuggestion {
    ValidationSuggestion {
        field: field.into(),
        kind: RuleKind::ClinicalQuality,
        suggestion,
        rationale,
        priority,
    }
}

/// Evaluates the documentation-quality heuristics.
///
/// - Vague, short diagnosis → suggest specificity (medium).
/// - Short current-condition narrative → suggest expanding (high).
/// - Treatment without follow-up terms → suggest a follow-up plan (medium).
/// - Medications without patient-education terms → suggest an education
///   note (medium).
pub fn check_clinical_quality(
    record: &ConsultationRecord,
    catalog: &RuleCatalog,
) -> Vec<ValidationSuggestion> {
    let diagnosis = record.diagnosis.to_lowercase();
    let treatment = record.treatment.to_lowercase();

    let mut suggestions = Vec::new();

    let diagnosis_is_vague = catalog
        .vague_diagnosis_terms
        .iter()
        .any(|term| diagnosis.contains(term.as_str()));
    if diagnosis_is_vague
        && record.diagnosis.trim().chars().count() < MAX_VAGUE_DIAGNOSIS_CHARS
    {
        suggestions.push(quality_suggestion(
            "diagnosis",
            "Precisar el diagnóstico".into(),
            "Un término genérico sin calificar dificulta la codificación y el seguimiento".into(),
            SuggestionPriority::Medium,
        ));
    }

    if record.current_condition.trim().chars().count() < MIN_CONDITION_NARRATIVE_CHARS {
        suggestions.push(quality_suggestion(
            "current_condition",
            "Ampliar la cronología y las características del padecimiento".into(),
            "Una historia breve omite datos que orientan el diagnóstico".into(),
            SuggestionPriority::High,
        ));
    }

    let has_follow_up = catalog
        .follow_up_terms
        .iter()
        .any(|term| treatment.contains(term.as_str()));
    if !has_follow_up {
        suggestions.push(quality_suggestion(
            "treatment",
            "Añadir un plan de seguimiento".into(),
            "Sin cita de control no es posible evaluar la respuesta al tratamiento".into(),
            SuggestionPriority::Medium,
        ));
    }

    if !record.medications.is_empty() {
        let has_education = catalog
            .education_terms
            .iter()
            .any(|term| treatment.contains(term.as_str()));
        if !has_education {
            suggestions.push(quality_suggestion(
                "treatment",
                "Documentar la educación al paciente sobre su medicación".into(),
                "El paciente debe conocer dosis, efectos esperados y signos de alarma".into(),
                SuggestionPriority::Medium,
            ));
        }
    }

    suggestions
}
