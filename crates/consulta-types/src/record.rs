//! Consultation record domain model.
//!
//! The consultation record is the engine's sole input: a snapshot of the
//! in-progress clinical note owned by the caller. The engine never mutates
//! it and never stores it between evaluations. Absent optional fields are
//! data ("not yet documented"), not errors.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A single vital-sign reading.
///
/// Vital signs arrive from the form as free-form values: numeric readings
/// (heart rate, temperature) or text (a blood pressure such as `"120/80"`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VitalValue {
    /// Numeric reading, e.g. `78` or `36.8`.
    Number(f64),
    /// Free-text reading, e.g. `"120/80"`.
    Text(String),
}

impl VitalValue {
    /// Returns `true` if the reading carries actual content.
    ///
    /// Numbers always count; text counts unless blank after trimming.
    pub fn is_filled(&self) -> bool {
        match self {
            VitalValue::Number(_) => true,
            VitalValue::Text(text) => !text.trim().is_empty(),
        }
    }
}

/// Physical examination findings.
///
/// The summary is free text; per-segment notes (e.g. "abdomen", "tórax")
/// are optional and keyed by the segment name as entered in the form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalExamination {
    /// General examination narrative.
    #[serde(default)]
    pub summary: String,

    /// Findings per examined segment.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub segments: BTreeMap<String, String>,
}

impl PhysicalExamination {
    /// Returns `true` if the examination records any non-blank finding.
    pub fn has_content(&self) -> bool {
        !self.summary.trim().is_empty()
            || self.segments.values().any(|note| !note.trim().is_empty())
    }
}

/// A prescribed medication as entered in the consultation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationEntry {
    /// Medication name as typed by the clinician, e.g. `"Aspirina 500mg"`.
    pub name: String,

    /// Dose, e.g. `"500 mg"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dose: Option<String>,

    /// Administration route, e.g. `"oral"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,

    /// Dosing frequency, e.g. `"cada 8 horas"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,

    /// Treatment duration, e.g. `"7 días"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl MedicationEntry {
    /// Convenience constructor for a medication known only by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dose: None,
            route: None,
            frequency: None,
            duration: None,
        }
    }
}

/// The in-progress consultation supplied by the caller on every change.
///
/// The three narrative fields (`current_condition`, `diagnosis`,
/// `treatment`) are required for a submittable consultation; they are plain
/// strings here because the form legitimately passes blank values while the
/// clinician is still typing, and blankness is precisely what the engine
/// reports on. Everything else is optional context.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsultationRecord {
    /// Presenting complaint / history of the current condition.
    #[serde(default)]
    pub current_condition: String,

    /// Working diagnosis narrative.
    #[serde(default)]
    pub diagnosis: String,

    /// Treatment plan narrative.
    #[serde(default)]
    pub treatment: String,

    /// Vital signs keyed by the form's field names (e.g. `presion_arterial`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vital_signs: Option<BTreeMap<String, VitalValue>>,

    /// Physical examination findings, if documented.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_examination: Option<PhysicalExamination>,

    /// Prognosis narrative, if documented.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prognosis: Option<String>,

    /// Prescribed medications, in prescription order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub medications: Vec<MedicationEntry>,

    /// Patient age in years, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_age: Option<u16>,

    /// Known allergies, as recorded in the patient chart.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub patient_allergies: BTreeSet<String>,

    /// Known chronic conditions, as recorded in the patient chart.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub patient_conditions: BTreeSet<String>,
}

impl ConsultationRecord {
    /// Returns `true` if any vital sign has been recorded.
    pub fn has_vital_signs(&self) -> bool {
        self.vital_signs
            .as_ref()
            .is_some_and(|vitals| !vitals.is_empty())
    }

    /// Returns `true` if a physical examination with content is documented.
    pub fn has_physical_examination(&self) -> bool {
        self.physical_examination
            .as_ref()
            .is_some_and(PhysicalExamination::has_content)
    }

    /// Returns `true` if a non-blank prognosis is documented.
    pub fn has_prognosis(&self) -> bool {
        self.prognosis
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty())
    }
}
