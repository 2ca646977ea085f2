use crate::error::{DispatchError, Result};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Snapshot of a handler's user-visible state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    pub submitting: bool,
    pub error: Option<String>,
}

/// Submitting flag and error message of one payment button.
///
/// `begin` doubles as the single-flight guard: while a submission is in
/// flight every further `begin` is refused, so a double click can never
/// reach a provider twice.
#[derive(Debug, Default)]
pub struct SubmissionState {
    inner: Mutex<Submission>,
}

impl SubmissionState {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Submission> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn begin(&self) -> Result<()> {
        let mut state = self.lock();
        if state.submitting {
            return Err(DispatchError::AlreadySubmitting);
        }
        state.submitting = true;
        Ok(())
    }

    /// Sets the flag without the in-flight check. Used when a gateway return
    /// is observed, which is not a shopper action.
    pub fn mark_submitting(&self) {
        self.lock().submitting = true;
    }

    pub fn finish(&self) {
        self.lock().submitting = false;
    }

    /// Shows a message and releases the guard.
    pub fn fail(&self, message: impl Into<String>) {
        let mut state = self.lock();
        state.error = Some(message.into());
        state.submitting = false;
    }

    /// Shows a message, leaving the submitting flag untouched.
    pub fn show_error(&self, message: impl Into<String>) {
        self.lock().error = Some(message.into());
    }

    pub fn snapshot(&self) -> Submission {
        self.lock().clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.lock().submitting
    }

    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }
}
