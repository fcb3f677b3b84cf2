//! The validation orchestrator.
//!
//! [`ValidationEngine`] is the only evaluation entry point: it runs all
//! five checkers against one record snapshot, assembles the findings, and
//! computes both scores. Evaluation is pure and deterministic; the engine
//! holds no state besides the injected read-only catalogue.

use crate::catalog::RuleCatalog;
use crate::checks;
use crate::scoring;
use crate::{EngineError, EngineResult};
use consulta_types::{ConsultationRecord, ErrorSeverity, ValidationResult};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Runs the field checkers and assembles [`ValidationResult`]s.
#[derive(Clone, Debug)]
pub struct ValidationEngine {
    catalog: Arc<RuleCatalog>,
}

impl Default for ValidationEngine {
    /// An engine over the built-in rule catalogue.
    fn default() -> Self {
        Self {
            catalog: Arc::new(RuleCatalog::builtin()),
        }
    }
}

impl ValidationEngine {
    /// Creates an engine over an injected catalogue.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidCatalog` if the catalogue fails its
    /// structural validation. A rejected catalogue can never produce a
    /// false "valid" result later.
    pub fn new(catalog: RuleCatalog) -> EngineResult<Self> {
        catalog.validate()?;
        Ok(Self {
            catalog: Arc::new(catalog),
        })
    }

    /// The catalogue this engine evaluates against.
    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Validates one consultation record snapshot.
    ///
    /// Runs all checkers in a fixed order and assembles a fresh
    /// [`ValidationResult`]. Findings are data, not errors: an invalid
    /// consultation still returns `Ok`, and incomplete records never fail;
    /// absence is reported through findings and scores.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::EvaluationPanicked` if a checker panics. The
    /// caller can thereby distinguish "the consultation is invalid" from
    /// "the validator itself could not run"; no partial result is produced.
    pub fn validate(&self, record: &ConsultationRecord) -> EngineResult<ValidationResult> {
        match catch_unwind(AssertUnwindSafe(|| self.evaluate(record))) {
            Ok(result) => Ok(result),
            Err(payload) => {
                let detail = panic_detail(payload.as_ref());
                tracing::error!(detail, "checker panicked during evaluation");
                Err(EngineError::EvaluationPanicked(detail.into()))
            }
        }
    }

    fn evaluate(&self, record: &ConsultationRecord) -> ValidationResult {
        let catalog = self.catalog.as_ref();

        let mut critical_errors = checks::check_required_fields(record);
        critical_errors.extend(checks::check_medication_safety(record, catalog));

        let mut warnings = checks::check_diagnosis_treatment_consistency(record, catalog);
        warnings.extend(checks::check_completeness(record, catalog));

        let suggestions = checks::check_clinical_quality(record, catalog);

        // Only critical-severity entries gate validity; high/medium
        // medication findings travel in the same list without blocking.
        let is_valid = !critical_errors
            .iter()
            .any(|error| error.severity == ErrorSeverity::Critical);

        let score = scoring::quality_score(&critical_errors, &warnings);
        let completeness = scoring::completeness_score(record);

        tracing::debug!(
            errors = critical_errors.len(),
            warnings = warnings.len(),
            suggestions = suggestions.len(),
            score,
            completeness,
            is_valid,
            "consultation evaluated"
        );

        ValidationResult {
            is_valid,
            critical_errors,
            warnings,
            suggestions,
            score,
            completeness,
        }
    }
}

fn panic_detail(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use consulta_types::{MedicationEntry, RuleKind, WarningImpact};
    use std::collections::BTreeSet;

    fn engine() -> ValidationEngine {
        ValidationEngine::default()
    }

    /// Scenario: every required field blank.
    #[test]
    fn test_empty_record_yields_three_critical_errors_and_floored_scores() {
        let result = engine()
            .validate(&ConsultationRecord::default())
            .expect("validation should run");

        assert!(!result.is_valid);
        assert_eq!(result.critical_errors.len(), 3);
        assert_eq!(result.blocking_error_count(), 3);
        // Three critical errors (-90) plus three completeness warnings
        // (-15) take the raw score below zero; the floor holds it at 0.
        assert_eq!(result.score, 0);
        assert_eq!(result.completeness, 0);
    }

    /// Scenario: complete narrative consultation, no optional sections.
    #[test]
    fn test_well_documented_consultation_is_valid_with_completeness_70() {
        let record = ConsultationRecord {
            current_condition:
                "dolor abdominal de 3 días, cólico, irradiado a fosa iliaca derecha".into(),
            diagnosis: "apendicitis aguda".into(),
            treatment: "apendicectomía de urgencia, seguimiento en 7 días".into(),
            ..Default::default()
        };

        let result = engine().validate(&record).expect("validation should run");

        assert!(result.is_valid);
        assert!(result.critical_errors.is_empty());
        assert_eq!(result.completeness, 70);

        // Only the three missing-optional-section warnings remain.
        assert_eq!(result.warnings.len(), 3);
        assert!(result
            .warnings
            .iter()
            .all(|warning| warning.kind == RuleKind::Completeness));
    }

    /// Scenario: aspirin prescribed to a 16-year-old.
    #[test]
    fn test_paediatric_aspirin_blocks_validity_regardless_of_completeness() {
        let record = ConsultationRecord {
            current_condition:
                "fiebre de 38.5 desde hace dos días, acompañada de cefalea intensa".into(),
            diagnosis: "síndrome febril en estudio".into(),
            treatment: "antipirético, control en 48 horas".into(),
            medications: vec![MedicationEntry::named("Aspirina 500mg")],
            patient_age: Some(16),
            ..Default::default()
        };

        let result = engine().validate(&record).expect("validation should run");

        assert!(!result.is_valid);
        assert_eq!(result.blocking_error_count(), 1);
        assert!(result.critical_errors[0].message.contains("Reye"));
    }

    /// Scenario: medication matching a registered allergy.
    #[test]
    fn test_allergy_contraindication_blocks_validity() {
        let record = ConsultationRecord {
            current_condition: "odinofagia y fiebre de 3 días de evolución, sin tos".into(),
            diagnosis: "faringoamigdalitis bacteriana".into(),
            treatment: "antibiótico oral, control en 5 días".into(),
            medications: vec![MedicationEntry::named("Amoxicilina + penicilina")],
            patient_allergies: BTreeSet::from(["penicilina".to_string()]),
            ..Default::default()
        };

        let result = engine().validate(&record).expect("validation should run");

        assert!(!result.is_valid);
        assert_eq!(result.blocking_error_count(), 1);
        assert!(result.critical_errors[0].message.contains("alergia"));
    }

    /// Scenario: hypertension diagnosed, no antihypertensive in the plan.
    #[test]
    fn test_unaddressed_hypertension_emits_quality_warning_with_three_keywords() {
        let record = ConsultationRecord {
            current_condition:
                "cefalea occipital matutina de dos semanas de evolución, con acúfenos".into(),
            diagnosis: "hipertensión arterial".into(),
            treatment: "reposo y dieta".into(),
            ..Default::default()
        };

        let result = engine().validate(&record).expect("validation should run");

        assert!(result.is_valid);
        let consistency: Vec<_> = result
            .warnings
            .iter()
            .filter(|warning| warning.kind == RuleKind::Consistency)
            .collect();
        assert_eq!(consistency.len(), 1);
        assert_eq!(consistency[0].impact, WarningImpact::Quality);
        assert_eq!(
            consistency[0].suggestion,
            "Considerar: enalapril, losartán, amlodipino"
        );
    }

    #[test]
    fn test_high_risk_finding_does_not_block_validity() {
        // The severity/validity asymmetry is designed behaviour: high and
        // medium medication findings ride in critical_errors without
        // blocking submission.
        let record = ConsultationRecord {
            current_condition:
                "palpitaciones intermitentes de un mes de evolución, sin síncope".into(),
            diagnosis: "fibrilación auricular paroxística".into(),
            treatment: "anticoagulación oral, control de INR, seguimiento mensual".into(),
            medications: vec![MedicationEntry::named("Warfarina 5mg")],
            ..Default::default()
        };

        let result = engine().validate(&record).expect("validation should run");

        assert!(result.is_valid);
        assert_eq!(result.critical_errors.len(), 1);
        assert_eq!(result.critical_errors[0].severity, ErrorSeverity::High);
        assert_eq!(result.blocking_error_count(), 0);
    }

    #[test]
    fn test_is_valid_iff_no_critical_severity_entry() {
        let records = [
            ConsultationRecord::default(),
            ConsultationRecord {
                current_condition: "control de rutina anual, asintomático, sin cambios".into(),
                diagnosis: "paciente sano".into(),
                treatment: "medidas generales, control anual".into(),
                ..Default::default()
            },
            ConsultationRecord {
                current_condition: "tos seca de una semana sin fiebre ni disnea".into(),
                diagnosis: "bronquitis aguda".into(),
                treatment: "sintomático, control en una semana".into(),
                medications: vec![MedicationEntry::named("Aspirina infantil")],
                patient_age: Some(7),
                ..Default::default()
            },
        ];

        for record in records {
            let result = engine().validate(&record).expect("validation should run");
            assert_eq!(
                result.is_valid,
                result.blocking_error_count() == 0,
                "is_valid must mirror the absence of critical-severity entries"
            );
        }
    }

    #[test]
    fn test_scores_stay_in_bounds_for_maximally_invalid_record() {
        // Blank required fields plus several unsafe medications push the
        // raw penalty far below zero; the score must clamp.
        let record = ConsultationRecord {
            medications: vec![
                MedicationEntry::named("Warfarina"),
                MedicationEntry::named("Aspirina"),
                MedicationEntry::named("Diazepam"),
                MedicationEntry::named("Insulina"),
            ],
            patient_age: Some(8),
            patient_allergies: BTreeSet::from(["warfarina".to_string(), "insulina".to_string()]),
            ..Default::default()
        };

        let result = engine().validate(&record).expect("validation should run");

        assert!(!result.is_valid);
        assert!(result.score <= 100);
        assert_eq!(result.score, 0);
        assert_eq!(result.completeness, 0);
    }

    #[test]
    fn test_adding_a_high_risk_medication_never_increases_score() {
        let base = ConsultationRecord {
            current_condition: "disnea de esfuerzo progresiva de tres meses de evolución".into(),
            diagnosis: "insuficiencia cardiaca congestiva".into(),
            treatment: "diurético, restricción hídrica, control semanal".into(),
            medications: vec![MedicationEntry::named("Furosemida 40mg")],
            ..Default::default()
        };

        let mut extended = base.clone();
        extended
            .medications
            .push(MedicationEntry::named("Digoxina 0.25mg"));

        let engine = engine();
        let base_score = engine
            .validate(&base)
            .expect("validation should run")
            .score;
        let extended_score = engine
            .validate(&extended)
            .expect("validation should run")
            .score;

        assert!(extended_score <= base_score);
    }

    #[test]
    fn test_validate_is_idempotent_for_an_unchanged_record() {
        let record = ConsultationRecord {
            current_condition: "epigastralgia urente de dos semanas, posprandial".into(),
            diagnosis: "gastritis aguda".into(),
            treatment: "omeprazol 20mg cada 24 horas, control en 2 semanas".into(),
            medications: vec![MedicationEntry::named("Omeprazol 20mg")],
            ..Default::default()
        };

        let engine = engine();
        let first = engine.validate(&record).expect("validation should run");
        let second = engine.validate(&record).expect("validation should run");

        assert_eq!(first, second);
    }

    #[test]
    fn test_assembly_order_is_stable() {
        let record = ConsultationRecord {
            medications: vec![MedicationEntry::named("Warfarina")],
            diagnosis: "hipertensión arterial".into(),
            ..Default::default()
        };

        let result = engine().validate(&record).expect("validation should run");

        // Required-field errors precede medication-safety errors.
        assert_eq!(result.critical_errors[0].kind, RuleKind::RequiredField);
        assert_eq!(
            result
                .critical_errors
                .last()
                .expect("medication error present")
                .kind,
            RuleKind::MedicationSafety
        );

        // Consistency warnings precede completeness warnings.
        assert_eq!(result.warnings[0].kind, RuleKind::Consistency);
        assert_eq!(
            result.warnings.last().expect("completeness warning").kind,
            RuleKind::Completeness
        );
    }

    #[test]
    fn test_new_rejects_invalid_catalogue() {
        let mut catalog = RuleCatalog::builtin();
        catalog.rules.clear();
        let err = ValidationEngine::new(catalog).expect_err("empty catalogue should be rejected");
        assert!(matches!(err, EngineError::InvalidCatalog(_)));
    }
}
