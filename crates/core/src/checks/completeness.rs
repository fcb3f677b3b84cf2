//! Completeness checker.
//!
//! Reports missing documentation: vital signs (against the catalogue's
//! minimum expected set), physical examination, and prognosis. All
//! findings are non-blocking completeness warnings.

use crate::catalog::RuleCatalog;
use consulta_types::{ConsultationRecord, RuleKind, ValidationWarning, WarningImpact};

fn completeness_warning(field: &str, message: String, suggestion: String) -> ValidationWarning {
    ValidationWarning {
        field: field.into(),
        kind: RuleKind::Completeness,
        message,
        suggestion,
        impact: WarningImpact::Completeness,
    }
}

/// Checks for missing vitals, physical examination, and prognosis.
///
/// When vitals are recorded but incomplete, a single warning names exactly
/// the missing subset rather than one warning per vital.
pub fn check_completeness(
    record: &ConsultationRecord,
    catalog: &RuleCatalog,
) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    match record.vital_signs.as_ref().filter(|vitals| !vitals.is_empty()) {
        None => {
            let expected_labels = catalog
                .expected_vitals
                .iter()
                .map(|vital| vital.label.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            warnings.push(completeness_warning(
                "vital_signs",
                "No se registraron signos vitales".into(),
                format!("Registrar como mínimo: {expected_labels}"),
            ));
        }
        Some(vitals) => {
            let missing = catalog
                .expected_vitals
                .iter()
                .filter(|expected| {
                    !vitals
                        .iter()
                        .any(|(key, value)| value.is_filled() && expected.matches_key(key))
                })
                .map(|expected| expected.label.as_str())
                .collect::<Vec<_>>();

            if !missing.is_empty() {
                let missing = missing.join(", ");
                warnings.push(completeness_warning(
                    "vital_signs",
                    format!("Faltan signos vitales: {missing}"),
                    format!("Registrar {missing}"),
                ));
            }
        }
    }

    if !record.has_physical_examination() {
        warnings.push(completeness_warning(
            "physical_examination",
            "La exploración física no está documentada".into(),
            "Documentar los hallazgos de la exploración física".into(),
        ));
    }

    if !record.has_prognosis() {
        warnings.push(completeness_warning(
            "prognosis",
            "El pronóstico no está documentado".into(),
            "Documentar el pronóstico esperado".into(),
        ));
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use consulta_types::{PhysicalExamination, VitalValue};
    use std::collections::BTreeMap;

    fn vitals(entries: &[(&str, VitalValue)]) -> Option<BTreeMap<String, VitalValue>> {
        Some(
            entries
                .iter()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect(),
        )
    }

    #[test]
    fn test_empty_record_yields_three_warnings() {
        let catalog = RuleCatalog::builtin();
        let warnings = check_completeness(&ConsultationRecord::default(), &catalog);

        assert_eq!(warnings.len(), 3);
        assert!(warnings
            .iter()
            .all(|warning| warning.impact == WarningImpact::Completeness));

        let fields: Vec<&str> = warnings.iter().map(|w| w.field.as_str()).collect();
        assert_eq!(fields, ["vital_signs", "physical_examination", "prognosis"]);
    }

    #[test]
    fn test_absent_vitals_warning_lists_minimum_expected_set() {
        let catalog = RuleCatalog::builtin();
        let warnings = check_completeness(&ConsultationRecord::default(), &catalog);

        let vitals_warning = &warnings[0];
        assert!(vitals_warning.suggestion.contains("presión arterial"));
        assert!(vitals_warning.suggestion.contains("frecuencia cardíaca"));
        assert!(vitals_warning.suggestion.contains("temperatura"));
    }

    #[test]
    fn test_empty_vitals_map_counts_as_absent() {
        let catalog = RuleCatalog::builtin();
        let record = ConsultationRecord {
            vital_signs: Some(BTreeMap::new()),
            ..Default::default()
        };
        let warnings = check_completeness(&record, &catalog);
        assert_eq!(
            warnings[0].message,
            "No se registraron signos vitales"
        );
    }

    #[test]
    fn test_partial_vitals_yield_one_warning_naming_missing_subset() {
        let catalog = RuleCatalog::builtin();
        let record = ConsultationRecord {
            vital_signs: vitals(&[
                ("presion_arterial", VitalValue::Text("120/80".into())),
                ("frecuencia_cardiaca", VitalValue::Number(72.0)),
            ]),
            ..Default::default()
        };
        let warnings = check_completeness(&record, &catalog);

        let vitals_warnings: Vec<_> = warnings
            .iter()
            .filter(|warning| warning.field == "vital_signs")
            .collect();
        assert_eq!(vitals_warnings.len(), 1);
        assert_eq!(
            vitals_warnings[0].message,
            "Faltan signos vitales: temperatura"
        );
    }

    #[test]
    fn test_blank_vital_reading_does_not_count() {
        let catalog = RuleCatalog::builtin();
        let record = ConsultationRecord {
            vital_signs: vitals(&[
                ("presion_arterial", VitalValue::Text("  ".into())),
                ("frecuencia_cardiaca", VitalValue::Number(72.0)),
                ("temperatura", VitalValue::Number(36.7)),
            ]),
            ..Default::default()
        };
        let warnings = check_completeness(&record, &catalog);
        assert!(warnings
            .iter()
            .any(|warning| warning.message.contains("presión arterial")));
    }

    #[test]
    fn test_complete_vitals_yield_no_vitals_warning() {
        let catalog = RuleCatalog::builtin();
        let record = ConsultationRecord {
            vital_signs: vitals(&[
                ("ta", VitalValue::Text("118/76".into())),
                ("fc", VitalValue::Number(68.0)),
                ("temperatura", VitalValue::Number(36.5)),
            ]),
            ..Default::default()
        };
        let warnings = check_completeness(&record, &catalog);
        assert!(warnings
            .iter()
            .all(|warning| warning.field != "vital_signs"));
    }

    #[test]
    fn test_documented_examination_and_prognosis_suppress_warnings() {
        let catalog = RuleCatalog::builtin();
        let record = ConsultationRecord {
            physical_examination: Some(PhysicalExamination {
                summary: "abdomen blando, depresible, doloroso en FID".into(),
                segments: BTreeMap::new(),
            }),
            prognosis: Some("bueno para la vida y la función".into()),
            ..Default::default()
        };
        let warnings = check_completeness(&record, &catalog);

        let fields: Vec<&str> = warnings.iter().map(|w| w.field.as_str()).collect();
        assert_eq!(fields, ["vital_signs"]);
    }
}
