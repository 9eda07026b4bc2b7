// File: src/submission.rs
// Purpose: Submission state machine with preview and persisted variants

use crate::client::{BackendClient, ClientError, SubmitReceipt};
use crate::schema::FormSchema;
use crate::validation::{RuleSet, ValidationResult};
use crate::value::{Answers, FieldValues};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Notice shown when a persisted submission fails.
pub const SUBMIT_FAILED_NOTICE: &str = "Failed to submit the form. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    /// A persisted submission was accepted. Terminal.
    Submitted,
}

/// Hands answers to a caller-supplied callback. No network.
pub struct PreviewSubmission {
    callback: Box<dyn Fn(&Answers) + Send + Sync>,
}

impl PreviewSubmission {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&Answers) + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
        }
    }
}

impl fmt::Debug for PreviewSubmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewSubmission").finish_non_exhaustive()
    }
}

/// Posts answers to `/response/{form_id}/responses`.
#[derive(Debug, Clone)]
pub struct PersistedSubmission {
    client: BackendClient,
    form_id: String,
}

impl PersistedSubmission {
    pub fn new(client: BackendClient, form_id: impl Into<String>) -> Self {
        Self {
            client,
            form_id: form_id.into(),
        }
    }

    pub fn form_id(&self) -> &str {
        &self.form_id
    }
}

#[derive(Debug)]
pub enum SubmissionMode {
    Preview(PreviewSubmission),
    Persisted(PersistedSubmission),
}

impl SubmissionMode {
    pub fn is_preview(&self) -> bool {
        matches!(self, SubmissionMode::Preview(_))
    }
}

/// What a call to [`SubmissionCoordinator::submit`] did.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent
    Rejected(ValidationResult),
    /// Another submission is already in flight; ignored
    InFlight,
    /// A persisted submission already succeeded; ignored
    AlreadySubmitted,
    /// The preview callback received these answers
    Previewed(Answers),
    Accepted(SubmitReceipt),
    Failed(ClientError),
    /// The response arrived after the instance was detached
    Detached,
}

impl SubmitOutcome {
    /// User-facing form-level notice, if any.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            SubmitOutcome::Failed(_) => Some(SUBMIT_FAILED_NOTICE),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Previewed(_) | SubmitOutcome::Accepted(_))
    }
}

/// Guards a form instance so at most one submission is in flight.
///
/// The state lock is only held for the check-and-transition, never across
/// the network call.
#[derive(Debug)]
pub struct SubmissionCoordinator {
    schema: FormSchema,
    rules: Arc<RuleSet>,
    mode: SubmissionMode,
    state: Mutex<SubmissionState>,
    detached: AtomicBool,
}

impl SubmissionCoordinator {
    pub fn new(schema: FormSchema, rules: Arc<RuleSet>, mode: SubmissionMode) -> Self {
        Self {
            schema,
            rules,
            mode,
            state: Mutex::new(SubmissionState::Idle),
            detached: AtomicBool::new(false),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, SubmissionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn settle(&self, next: SubmissionState) {
        *self.lock_state() = next;
    }

    pub fn state(&self) -> SubmissionState {
        *self.lock_state()
    }

    pub fn is_submitting(&self) -> bool {
        self.state() == SubmissionState::Submitting
    }

    pub fn mode(&self) -> &SubmissionMode {
        &self.mode
    }

    /// Hand the mode back, e.g. to build a fresh coordinator on reset.
    pub fn into_mode(self) -> SubmissionMode {
        self.mode
    }

    /// Mark the owning instance as gone. Later responses are not applied.
    pub fn detach(&self) {
        self.detached.store(true, Ordering::SeqCst);
    }

    pub fn is_detached(&self) -> bool {
        self.detached.load(Ordering::SeqCst)
    }

    /// Validate and, if valid, dispatch exactly one submission attempt.
    pub async fn submit(&self, values: &FieldValues) -> SubmitOutcome {
        let answers = {
            let mut state = self.lock_state();
            match *state {
                SubmissionState::Submitting => {
                    debug!("submission already in flight, ignoring");
                    return SubmitOutcome::InFlight;
                }
                SubmissionState::Submitted => return SubmitOutcome::AlreadySubmitted,
                SubmissionState::Idle => {}
            }

            let result = self.rules.validate(values);
            if result.has_errors() {
                debug!(errors = result.len(), "submission blocked by validation");
                return SubmitOutcome::Rejected(result);
            }

            *state = SubmissionState::Submitting;
            values.answers(&self.schema)
        };

        match &self.mode {
            SubmissionMode::Preview(preview) => {
                (preview.callback)(&answers);
                self.settle(SubmissionState::Idle);
                SubmitOutcome::Previewed(answers)
            }
            SubmissionMode::Persisted(persisted) => {
                let result = persisted
                    .client
                    .submit_response(&persisted.form_id, &answers)
                    .await;

                if self.is_detached() {
                    debug!(form_id = %persisted.form_id, "response arrived after detach, dropping");
                    return SubmitOutcome::Detached;
                }

                match result {
                    Ok(receipt) => {
                        info!(form_id = %persisted.form_id, status = receipt.status, "response submitted");
                        self.settle(SubmissionState::Submitted);
                        SubmitOutcome::Accepted(receipt)
                    }
                    Err(e) => {
                        warn!(form_id = %persisted.form_id, error = %e, "response submission failed");
                        self.settle(SubmissionState::Idle);
                        SubmitOutcome::Failed(e)
                    }
                }
            }
        }
    }
}
