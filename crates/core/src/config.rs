//! Engine runtime configuration.
//!
//! This module defines configuration that should be resolved once by the
//! caller and then passed into the engine and scheduler. The intent is to
//! avoid reading process-wide state during evaluation, which can lead to
//! inconsistent behaviour in multi-threaded runtimes and test harnesses.

use crate::constants::{DEFAULT_DEBOUNCE_MS, MAX_DEBOUNCE_MS};
use crate::{EngineError, EngineResult};
use std::time::Duration;

/// Engine configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    real_time_validation: bool,
    debounce: Duration,
    visible: bool,
}

impl EngineConfig {
    /// Create a new `EngineConfig`.
    ///
    /// # Arguments
    ///
    /// * `real_time_validation` - Whether the scheduler re-evaluates on
    ///   record changes. When `false` the scheduler is inert and the caller
    ///   invokes the engine directly.
    /// * `debounce` - Delay between the last record change and evaluation.
    ///   Must be non-zero and at most [`MAX_DEBOUNCE_MS`] milliseconds.
    /// * `visible` - Caller-side gate on whether validation output is
    ///   rendered at all. Carried for the caller's convenience; it has no
    ///   effect on evaluation.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidConfig` if the debounce delay is zero or
    /// exceeds the guardrail.
    pub fn new(
        real_time_validation: bool,
        debounce: Duration,
        visible: bool,
    ) -> EngineResult<Self> {
        if debounce.is_zero() {
            return Err(EngineError::InvalidConfig(
                "debounce delay cannot be zero".into(),
            ));
        }

        if debounce > Duration::from_millis(MAX_DEBOUNCE_MS) {
            return Err(EngineError::InvalidConfig(format!(
                "debounce delay exceeds maximum of {} ms",
                MAX_DEBOUNCE_MS
            )));
        }

        Ok(Self {
            real_time_validation,
            debounce,
            visible,
        })
    }

    pub fn real_time_validation(&self) -> bool {
        self.real_time_validation
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    pub fn visible(&self) -> bool {
        self.visible
    }
}

impl Default for EngineConfig {
    /// Real-time validation enabled with the standard 1000 ms debounce.
    fn default() -> Self {
        Self {
            real_time_validation: true,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            visible: true,
        }
    }
}
