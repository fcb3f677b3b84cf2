//! The rule catalogue: fixed, versioned validation data.
//!
//! The catalogue holds rule metadata plus the keyword data the checkers
//! match against: diagnosis→expected-treatment patterns, medication term
//! lists, and vital-sign name tokens. All matching data is Spanish clinical
//! terminology, held as [`Keyword`] values so it is guaranteed lower-case.
//!
//! The catalogue is pure data. It is constructed (or loaded from YAML) once
//! at startup, validated, injected into the engine, and read-only for the
//! process lifetime. Enforcement logic lives in [`crate::checks`]; the
//! catalogue consistency tests below keep the two in sync.

use crate::constants::BUILTIN_CATALOG_VERSION;
use crate::{EngineError, EngineResult};
use consulta_types::{Keyword, RuleKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Classification of a catalogue rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    /// Violations block submission or demand clinical attention.
    Critical,
    /// Violations degrade quality but never block.
    Warning,
    /// Advisory only.
    Info,
}

/// Documentation weight of a catalogue rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSeverity {
    High,
    Medium,
    Low,
}

/// Reference metadata for one validation rule.
///
/// Rules document what the checkers enforce; the hardcoded messages in the
/// checkers are the operative text. Each checker finding carries the
/// [`RuleKind`] of its family so the two cannot drift apart unnoticed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRule {
    /// Stable rule identifier, e.g. `"MED-002"`.
    pub id: String,
    /// Rule classification.
    pub category: RuleCategory,
    /// Record field the rule inspects.
    pub field: String,
    /// Rule family the enforcing checker belongs to.
    pub kind: RuleKind,
    /// What the rule checks, for catalogue readers.
    pub message: String,
    /// Documentation weight.
    pub severity: RuleSeverity,
    /// Suggested remediation, if one applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Maps a condition keyword found in the diagnosis to the treatment
/// keywords at least one of which is expected in the treatment plan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisTreatmentPattern {
    /// Condition keyword searched for in the lower-cased diagnosis.
    pub condition: Keyword,
    /// Expected treatment keywords; the first three are quoted in warnings.
    pub expected_treatments: Vec<Keyword>,
}

/// One vital sign the completeness checker expects to find.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedVital {
    /// Display label used in warnings, e.g. `"presión arterial"`.
    pub label: String,
    /// Name tokens recognised in the form's vital-sign keys. Abbreviations
    /// of three characters or fewer must match the whole key exactly.
    pub tokens: Vec<Keyword>,
}

impl ExpectedVital {
    /// Returns `true` if a vital-sign key refers to this vital.
    pub fn matches_key(&self, key: &str) -> bool {
        let key = key.trim().to_lowercase();
        self.tokens.iter().any(|token| {
            if token.is_abbreviation() {
                key == token.as_str()
            } else {
                key.contains(token.as_str())
            }
        })
    }
}

/// The fixed, versioned rule catalogue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleCatalog {
    /// Catalogue version tag.
    pub version: String,
    /// Rule reference metadata.
    pub rules: Vec<ValidationRule>,
    /// Diagnosis→expected-treatment keyword map.
    pub diagnosis_treatment_patterns: Vec<DiagnosisTreatmentPattern>,
    /// Name fragments of medications that demand a monitoring plan.
    pub high_risk_medications: Vec<Keyword>,
    /// Aspirin-family terms (paediatric Reye's-syndrome contraindication).
    pub aspirin_terms: Vec<Keyword>,
    /// Benzodiazepine-family terms (geriatric caution).
    pub benzodiazepine_terms: Vec<Keyword>,
    /// Terms that make a short diagnosis vague.
    pub vague_diagnosis_terms: Vec<Keyword>,
    /// Terms indicating the treatment plan includes follow-up.
    pub follow_up_terms: Vec<Keyword>,
    /// Terms indicating the treatment plan includes patient education.
    pub education_terms: Vec<Keyword>,
    /// Vital signs the completeness checker expects.
    pub expected_vitals: Vec<ExpectedVital>,
}

/// Builds a keyword from a catalogue literal.
fn kw(term: &str) -> Keyword {
    Keyword::new(term).expect("catalogue keyword literal must not be blank")
}

fn kws(terms: &[&str]) -> Vec<Keyword> {
    terms.iter().map(|term| kw(term)).collect()
}

fn pattern(condition: &str, expected: &[&str]) -> DiagnosisTreatmentPattern {
    DiagnosisTreatmentPattern {
        condition: kw(condition),
        expected_treatments: kws(expected),
    }
}

fn rule(
    id: &str,
    category: RuleCategory,
    field: &str,
    kind: RuleKind,
    message: &str,
    severity: RuleSeverity,
    suggestion: Option<&str>,
) -> ValidationRule {
    ValidationRule {
        id: id.into(),
        category,
        field: field.into(),
        kind,
        message: message.into(),
        severity,
        suggestion: suggestion.map(Into::into),
    }
}

impl RuleCatalog {
    /// Returns the built-in catalogue.
    ///
    /// This is the fixed rule set shipped with the engine. Its validity is
    /// pinned by the tests in this module, so constructing it cannot fail
    /// at runtime.
    pub fn builtin() -> Self {
        use RuleCategory::{Critical, Info, Warning};
        use RuleKind::{
            ClinicalQuality, Completeness, Consistency, MedicationSafety, RequiredField,
        };
        use RuleSeverity::{High, Low, Medium};

        Self {
            version: BUILTIN_CATALOG_VERSION.into(),
            rules: vec![
                rule(
                    "REQ-001",
                    Critical,
                    "current_condition",
                    RequiredField,
                    "El padecimiento actual es obligatorio",
                    High,
                    Some("Documentar el padecimiento actual antes de guardar"),
                ),
                rule(
                    "REQ-002",
                    Critical,
                    "diagnosis",
                    RequiredField,
                    "El diagnóstico es obligatorio",
                    High,
                    Some("Documentar el diagnóstico antes de guardar"),
                ),
                rule(
                    "REQ-003",
                    Critical,
                    "treatment",
                    RequiredField,
                    "El tratamiento es obligatorio",
                    High,
                    Some("Documentar el tratamiento antes de guardar"),
                ),
                rule(
                    "CONS-001",
                    Warning,
                    "treatment",
                    Consistency,
                    "El tratamiento debe abordar las condiciones mencionadas en el diagnóstico",
                    Medium,
                    Some("Incluir una terapia esperada para la condición diagnosticada"),
                ),
                rule(
                    "MED-001",
                    Critical,
                    "medications",
                    MedicationSafety,
                    "Los medicamentos de alto riesgo requieren plan de monitorización",
                    High,
                    Some("Especificar plan de monitorización"),
                ),
                rule(
                    "MED-002",
                    Critical,
                    "medications",
                    MedicationSafety,
                    "El medicamento coincide con una alergia registrada del paciente",
                    High,
                    Some("Suspender y sustituir por una alternativa"),
                ),
                rule(
                    "MED-003",
                    Critical,
                    "medications",
                    MedicationSafety,
                    "Salicilatos contraindicados en menores de 18 años (síndrome de Reye)",
                    High,
                    Some("Sustituir por paracetamol o ibuprofeno"),
                ),
                rule(
                    "MED-004",
                    Critical,
                    "medications",
                    MedicationSafety,
                    "Benzodiacepinas requieren precaución en mayores de 65 años",
                    Medium,
                    Some("Reducir dosis y estrechar la vigilancia"),
                ),
                rule(
                    "COMP-001",
                    Warning,
                    "vital_signs",
                    Completeness,
                    "Registrar al menos presión arterial, frecuencia cardíaca y temperatura",
                    Medium,
                    Some("Completar los signos vitales mínimos"),
                ),
                rule(
                    "COMP-002",
                    Warning,
                    "physical_examination",
                    Completeness,
                    "La exploración física no está documentada",
                    Low,
                    Some("Documentar la exploración física"),
                ),
                rule(
                    "COMP-003",
                    Warning,
                    "prognosis",
                    Completeness,
                    "El pronóstico no está documentado",
                    Low,
                    Some("Documentar el pronóstico"),
                ),
                rule(
                    "QUAL-001",
                    Info,
                    "diagnosis",
                    ClinicalQuality,
                    "Un diagnóstico breve con términos genéricos dificulta la codificación",
                    Medium,
                    Some("Precisar el diagnóstico"),
                ),
                rule(
                    "QUAL-002",
                    Info,
                    "current_condition",
                    ClinicalQuality,
                    "El padecimiento actual es demasiado breve",
                    High,
                    Some("Ampliar cronología y características"),
                ),
                rule(
                    "QUAL-003",
                    Info,
                    "treatment",
                    ClinicalQuality,
                    "El plan de tratamiento no menciona seguimiento",
                    Medium,
                    Some("Añadir un plan de seguimiento"),
                ),
                rule(
                    "QUAL-004",
                    Info,
                    "treatment",
                    ClinicalQuality,
                    "Se prescriben medicamentos sin nota de educación al paciente",
                    Medium,
                    Some("Documentar la educación al paciente"),
                ),
            ],
            diagnosis_treatment_patterns: vec![
                pattern(
                    "hipertensión",
                    &["enalapril", "losartán", "amlodipino", "antihipertensivo"],
                ),
                pattern(
                    "diabetes",
                    &["metformina", "insulina", "glibenclamida", "hipoglucemiante"],
                ),
                pattern("apendicitis", &["apendicectomía", "quirúrgico", "cirugía"]),
                pattern("asma", &["salbutamol", "broncodilatador", "corticoide"]),
                pattern("neumonía", &["amoxicilina", "azitromicina", "antibiótico"]),
                pattern("gastritis", &["omeprazol", "pantoprazol", "ranitidina"]),
                pattern(
                    "anemia",
                    &["hierro", "sulfato ferroso", "ácido fólico", "transfusión"],
                ),
                pattern(
                    "infección urinaria",
                    &["nitrofurantoína", "ciprofloxacino", "antibiótico"],
                ),
                pattern("hipotiroidismo", &["levotiroxina"]),
                pattern(
                    "dislipidemia",
                    &["atorvastatina", "simvastatina", "estatina"],
                ),
            ],
            high_risk_medications: kws(&[
                "warfarina",
                "acenocumarol",
                "insulina",
                "digoxina",
                "metotrexato",
                "litio",
                "amiodarona",
                "clozapina",
                "fentanilo",
            ]),
            aspirin_terms: kws(&["aspirina", "ácido acetilsalicílico", "salicilato"]),
            benzodiazepine_terms: kws(&[
                "diazepam",
                "lorazepam",
                "clonazepam",
                "alprazolam",
                "bromazepam",
                "midazolam",
            ]),
            vague_diagnosis_terms: kws(&[
                "dolor",
                "malestar",
                "síndrome",
                "trastorno",
                "alteración",
            ]),
            follow_up_terms: kws(&["seguimiento", "control"]),
            education_terms: kws(&["educación", "información"]),
            expected_vitals: vec![
                ExpectedVital {
                    label: "presión arterial".into(),
                    tokens: kws(&[
                        "presión",
                        "presion",
                        "tensión",
                        "tension",
                        "sistólica",
                        "sistolica",
                        "diastólica",
                        "diastolica",
                        "ta",
                        "pa",
                    ]),
                },
                ExpectedVital {
                    label: "frecuencia cardíaca".into(),
                    tokens: kws(&["cardíaca", "cardiaca", "pulso", "fc"]),
                },
                ExpectedVital {
                    label: "temperatura".into(),
                    tokens: kws(&["temperatura", "temp"]),
                },
            ],
        }
    }

    /// Parses an alternate catalogue from YAML and validates it.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::CatalogParse` if the YAML is malformed and
    /// `EngineError::InvalidCatalog` if the parsed catalogue is structurally
    /// incomplete.
    pub fn from_yaml_str(yaml: &str) -> EngineResult<Self> {
        let catalog: Self = serde_yaml::from_str(yaml).map_err(EngineError::CatalogParse)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Validates the catalogue's structural integrity.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidCatalog` if the version is blank, a rule
    /// id is duplicated, any keyword list the checkers depend on is empty,
    /// or a diagnosis pattern has no expected treatments.
    pub fn validate(&self) -> EngineResult<()> {
        if self.version.trim().is_empty() {
            return Err(EngineError::InvalidCatalog("version cannot be blank".into()));
        }

        let mut seen = HashSet::new();
        for rule in &self.rules {
            if !seen.insert(rule.id.as_str()) {
                return Err(EngineError::InvalidCatalog(format!(
                    "duplicate rule id '{}'",
                    rule.id
                )));
            }
        }

        for pattern in &self.diagnosis_treatment_patterns {
            if pattern.expected_treatments.is_empty() {
                return Err(EngineError::InvalidCatalog(format!(
                    "pattern '{}' has no expected treatments",
                    pattern.condition
                )));
            }
        }

        let required_lists: [(&str, bool); 8] = [
            ("rules", self.rules.is_empty()),
            ("high_risk_medications", self.high_risk_medications.is_empty()),
            ("aspirin_terms", self.aspirin_terms.is_empty()),
            (
                "benzodiazepine_terms",
                self.benzodiazepine_terms.is_empty(),
            ),
            ("vague_diagnosis_terms", self.vague_diagnosis_terms.is_empty()),
            ("follow_up_terms", self.follow_up_terms.is_empty()),
            ("education_terms", self.education_terms.is_empty()),
            ("expected_vitals", self.expected_vitals.is_empty()),
        ];
        for (name, empty) in required_lists {
            if empty {
                return Err(EngineError::InvalidCatalog(format!(
                    "{} cannot be empty",
                    name
                )));
            }
        }

        for vital in &self.expected_vitals {
            if vital.tokens.is_empty() {
                return Err(EngineError::InvalidCatalog(format!(
                    "expected vital '{}' has no name tokens",
                    vital.label
                )));
            }
        }

        Ok(())
    }

    /// Looks up a rule by its identifier.
    pub fn rule(&self, id: &str) -> Option<&ValidationRule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    /// Returns the rules belonging to one rule family.
    pub fn rules_for_kind(&self, kind: RuleKind) -> impl Iterator<Item = &ValidationRule> {
        self.rules.iter().filter(move |rule| rule.kind == kind)
    }
}
