//! Field checkers.
//!
//! Each checker is a pure function `(record, catalogue) -> findings`: no
//! side effects, no I/O, deterministic for a given record and catalogue.
//! The checkers share no mutable state and may run in any order; the
//! engine runs them in a fixed order so assembled results are stable.
//!
//! Absence is data, not an error: a checker never fails on a record that is
//! merely incomplete.

mod completeness;
mod consistency;
mod medication;
mod quality;
mod required;

pub use completeness::check_completeness;
pub use consistency::check_diagnosis_treatment_consistency;
pub use medication::check_medication_safety;
pub use quality::check_clinical_quality;
pub use required::check_required_fields;

/// Returns `true` if the text is empty after trimming.
pub(crate) fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
