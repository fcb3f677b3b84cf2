//! Constants used throughout the Consulta core crate.
//!
//! This module contains the fixed thresholds of the validation heuristics
//! and the scheduler defaults, to ensure consistency across the codebase
//! and make maintenance easier.

/// Default debounce delay applied by the re-evaluation scheduler, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 1_000;

/// Upper guardrail for a configured debounce delay, in milliseconds.
///
/// Beyond this the editor would feel unresponsive; a larger value is almost
/// certainly a units mistake in the caller.
pub const MAX_DEBOUNCE_MS: u64 = 60_000;

/// Version tag of the built-in rule catalogue.
pub const BUILTIN_CATALOG_VERSION: &str = "2024.2";

/// A current-condition narrative below this many characters triggers the
/// expand-history suggestion.
pub const MIN_CONDITION_NARRATIVE_CHARS: usize = 50;

/// A diagnosis containing a vague term and shorter than this many characters
/// triggers the specificity suggestion.
pub const MAX_VAGUE_DIAGNOSIS_CHARS: usize = 20;

/// Patients strictly younger than this are checked for paediatric
/// contraindications (aspirin-family medication).
pub const PAEDIATRIC_AGE_LIMIT: u16 = 18;

/// Patients strictly older than this are checked for geriatric cautions
/// (benzodiazepine-family medication).
pub const GERIATRIC_AGE_THRESHOLD: u16 = 65;

/// Maximum number of expected-treatment keywords quoted in a consistency
/// warning's suggestion.
pub const CONSISTENCY_SUGGESTION_TERMS: usize = 3;
