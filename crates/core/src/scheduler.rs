//! Debounced re-evaluation scheduler.
//!
//! The consultation form feeds a fresh record snapshot on every change;
//! evaluating on each keystroke would be wasted work. The scheduler
//! debounces: each update cancels any pending evaluation and arms a new
//! timer, so only the last snapshot within a quiet window is evaluated and
//! delivered to the consumer callback.
//!
//! The timer is the engine's only asynchronous boundary. Cancellation is
//! mandatory, not best-effort: a new update, disabling real-time mode, and
//! dropping the scheduler all deterministically prevent a stale timer from
//! firing.

use crate::config::EngineConfig;
use crate::engine::ValidationEngine;
use crate::EngineResult;
use consulta_types::{ConsultationRecord, ValidationResult};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Consumer callback invoked with each delivered evaluation outcome.
///
/// Receives `Err` when the engine itself could not run, so the consumer can
/// distinguish an invalid consultation from a broken validator.
pub type ValidationCallback = Arc<dyn Fn(EngineResult<ValidationResult>) + Send + Sync>;

/// Scheduler lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    /// No evaluation is armed.
    Idle,
    /// A debounce timer is armed; an evaluation will fire unless superseded.
    Pending,
}

/// Debounces engine invocation against a continuously-changing record.
///
/// Must be used within a Tokio runtime: the armed evaluation runs as a
/// spawned task. When constructed with `real_time_validation` disabled the
/// scheduler is inert and the caller invokes
/// [`ValidationEngine::validate`] directly.
pub struct ValidationScheduler {
    engine: ValidationEngine,
    callback: ValidationCallback,
    debounce: Duration,
    enabled: bool,
    pending: Option<JoinHandle<()>>,
}

impl ValidationScheduler {
    /// Creates a scheduler over the given engine and configuration.
    pub fn new(
        engine: ValidationEngine,
        config: &EngineConfig,
        callback: ValidationCallback,
    ) -> Self {
        Self {
            engine,
            callback,
            debounce: config.debounce(),
            enabled: config.real_time_validation(),
            pending: None,
        }
    }

    /// Notifies the scheduler that the record changed.
    ///
    /// Cancels any pending evaluation and arms a new one for this snapshot.
    /// Inert when real-time validation is disabled.
    pub fn record_changed(&mut self, record: ConsultationRecord) {
        if !self.enabled {
            return;
        }

        self.cancel_pending();

        let engine = self.engine.clone();
        let callback = Arc::clone(&self.callback);
        let delay = self.debounce;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let outcome = engine.validate(&record);
            if let Err(error) = &outcome {
                tracing::warn!(%error, "real-time evaluation failed");
            }
            callback(outcome);
        }));
    }

    /// Cancels the pending evaluation, if any, without firing it.
    pub fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Disables real-time validation and cancels any pending evaluation.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.cancel_pending();
    }

    /// Re-enables real-time validation. No evaluation is armed until the
    /// next record change.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SchedulerState {
        match &self.pending {
            Some(handle) if !handle.is_finished() => SchedulerState::Pending,
            _ => SchedulerState::Idle,
        }
    }
}

impl Drop for ValidationScheduler {
    /// The timer must be released on every exit path, including an early
    /// teardown of the consuming feature.
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
