//! # Consulta Types
//!
//! Shared data types for the Consulta validation engine.
//!
//! This crate defines the boundary types exchanged between the consultation
//! form (an external collaborator) and the validation core:
//! - [`ConsultationRecord`]: the in-progress consultation supplied by the caller.
//! - [`ValidationResult`] and its finding types: the engine's output.
//! - [`Keyword`]: a validated lower-case text fragment used by catalogue data.
//!
//! **No behaviour**: rule evaluation, scoring, and scheduling belong in
//! `consulta-core`. Everything here is pure data with serde wire support.

mod findings;
mod keyword;
mod record;

pub use findings::{
    ErrorSeverity, RuleKind, SuggestionPriority, ValidationError, ValidationResult,
    ValidationSuggestion, ValidationWarning, WarningImpact,
};
pub use keyword::{Keyword, KeywordError};
pub use record::{ConsultationRecord, MedicationEntry, PhysicalExamination, VitalValue};
