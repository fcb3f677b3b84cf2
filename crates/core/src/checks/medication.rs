//! Medication-safety checker.
//!
//! Four independent sub-checks run per medication entry, matched
//! case-insensitively against the medication name as typed:
//! - high-risk medications demand a monitoring plan (high severity),
//! - a name containing a registered patient allergy is contraindicated
//!   (critical),
//! - aspirin-family medication under 18 risks Reye's syndrome (critical),
//! - benzodiazepines over 65 warrant dose reduction (medium).
//!
//! A single medication may therefore produce several findings.

use crate::catalog::RuleCatalog;
use crate::constants::{GERIATRIC_AGE_THRESHOLD, PAEDIATRIC_AGE_LIMIT};
use consulta_types::{ConsultationRecord, ErrorSeverity, RuleKind, ValidationError};

fn medication_error(message: String, severity: ErrorSeverity, correction: &str) -> ValidationError {
    ValidationError {
        field: "medications".into(),
        kind: RuleKind::MedicationSafety,
        message,
        severity,
        correction: Some(correction.into()),
    }
}

/// Checks every medication entry against the catalogue's safety lists and
/// the patient's chart context (age, allergies).
pub fn check_medication_safety(
    record: &ConsultationRecord,
    catalog: &RuleCatalog,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for medication in &record.medications {
        let name = medication.name.to_lowercase();
        if name.trim().is_empty() {
            continue;
        }

        if let Some(term) = catalog
            .high_risk_medications
            .iter()
            .find(|keyword| name.contains(keyword.as_str()))
        {
            errors.push(medication_error(
                format!(
                    "'{}' es un medicamento de alto riesgo ({term})",
                    medication.name
                ),
                ErrorSeverity::High,
                "Especificar plan de monitorización",
            ));
        }

        for allergy in &record.patient_allergies {
            let needle = allergy.trim().to_lowercase();
            if needle.is_empty() {
                continue;
            }
            if name.contains(&needle) {
                errors.push(medication_error(
                    format!(
                        "'{}' coincide con la alergia registrada a '{}'",
                        medication.name,
                        allergy.trim()
                    ),
                    ErrorSeverity::Critical,
                    "Suspender y sustituir por una alternativa",
                ));
            }
        }

        if let Some(age) = record.patient_age {
            if age < PAEDIATRIC_AGE_LIMIT
                && catalog
                    .aspirin_terms
                    .iter()
                    .any(|keyword| name.contains(keyword.as_str()))
            {
                errors.push(medication_error(
                    format!(
                        "'{}' está contraindicado en menores de {PAEDIATRIC_AGE_LIMIT} años: riesgo de síndrome de Reye",
                        medication.name
                    ),
                    ErrorSeverity::Critical,
                    "Sustituir por paracetamol o ibuprofeno",
                ));
            }

            if age > GERIATRIC_AGE_THRESHOLD
                && catalog
                    .benzodiazepine_terms
                    .iter()
                    .any(|keyword| name.contains(keyword.as_str()))
            {
                errors.push(medication_error(
                    format!(
                        "'{}' es una benzodiacepina en paciente mayor de {GERIATRIC_AGE_THRESHOLD} años",
                        medication.name
                    ),
                    ErrorSeverity::Medium,
                    "Reducir dosis y estrechar la vigilancia",
                ));
            }
        }
    }

    errors
}
