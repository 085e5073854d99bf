use std::sync::{Mutex, MutexGuard, PoisonError};

use portfolio_shared::contact::{self, ContactInput, Field, SubmitResponse, ValidationError};

use crate::{Notification, Notifier, Transport, TransportError};

pub const SUCCESS_TITLE: &str = "Message sent successfully!";
pub const FAILURE_TITLE: &str = "Failed to send message";

const UNREACHABLE_DESCRIPTION: &str = "Could not reach the server. Please try again later.";
const INVALID_DESCRIPTION: &str = "Please correct the highlighted fields.";
const RETRY_DESCRIPTION: &str = "Please try again later.";

/// Where the form is in its submit cycle.
///
/// `Succeeded` and `Failed` only last while feedback is dispatched; the
/// controller always settles back on `Idle`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission was already in flight.
    Ignored,
    /// Local validation failed, nothing was sent.
    Invalid(Vec<ValidationError>),
    Sent(SubmitResponse),
    Failed(TransportError),
}

#[derive(Debug)]
struct FormState {
    phase: Phase,
    form: ContactInput,
    errors: Vec<ValidationError>,
}

/// Never held across an await, so a poisoned lock still holds a usable form.
fn lock(state: &Mutex<FormState>) -> MutexGuard<'_, FormState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Puts an abandoned submission back on `Idle`, keeping the form.
struct InFlight<'a> {
    state: &'a Mutex<FormState>,
    armed: bool,
}

impl InFlight<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            tracing::debug!("Submission abandoned before the transport answered");
            lock(self.state).phase = Phase::Idle;
        }
    }
}

/// Owns the contact form and drives one submission at a time.
pub struct SubmissionController<T, N> {
    transport: T,
    notifier: N,
    state: Mutex<FormState>,
}

impl<T: Transport, N: Notifier> SubmissionController<T, N> {
    pub fn new(transport: T, notifier: N) -> Self {
        Self {
            transport,
            notifier,
            state: Mutex::new(FormState {
                phase: Phase::Idle,
                form: ContactInput::default(),
                errors: vec![],
            }),
        }
    }

    pub async fn phase(&self) -> Phase {
        lock(&self.state).phase
    }

    pub async fn form(&self) -> ContactInput {
        lock(&self.state).form.clone()
    }

    pub async fn field_errors(&self) -> Vec<ValidationError> {
        lock(&self.state).errors.clone()
    }

    pub async fn is_submit_enabled(&self) -> bool {
        self.phase().await == Phase::Idle
    }

    /// Edits one field and drops the annotation attached to it.
    pub async fn set_field(&self, field: Field, value: impl Into<String>) {
        let mut state = lock(&self.state);
        let value = value.into();

        match field {
            Field::Name => state.form.name = value,
            Field::Email => state.form.email = value,
            Field::Subject => state.form.subject = value,
            Field::Message => state.form.message = value,
        }

        state.errors.retain(|e| e.field != field);
    }

    pub async fn fill(&self, form: ContactInput) {
        let mut state = lock(&self.state);
        state.form = form;
        state.errors.clear();
    }

    /// Validates locally, dispatches, and emits exactly one notification per
    /// dispatched attempt. A call made while a submission is in flight is a
    /// no-op. Dropping the returned future mid-flight leaves the form intact
    /// and the controller back on `Idle`, without a notification.
    pub async fn submit(&self) -> SubmitOutcome {
        let submission = {
            let mut state = lock(&self.state);
            if state.phase != Phase::Idle {
                tracing::debug!(phase = ?state.phase, "Submit ignored, submission in flight");

                return SubmitOutcome::Ignored;
            }

            state.phase = Phase::Validating;

            match contact::validate(&state.form) {
                Ok(submission) => {
                    state.errors.clear();
                    state.phase = Phase::Submitting;
                    submission
                }
                Err(errors) => {
                    tracing::debug!(errors = %contact::describe(&errors), "Contact form invalid");
                    state.errors = errors.clone();
                    state.phase = Phase::Idle;

                    return SubmitOutcome::Invalid(errors);
                }
            }
        };

        let in_flight = InFlight {
            state: &self.state,
            armed: true,
        };
        let result = self.transport.send(&submission).await;
        in_flight.disarm();

        let mut state = lock(&self.state);
        let outcome = match result {
            Ok(response) => {
                state.phase = Phase::Succeeded;
                state.form = ContactInput::default();
                state.errors.clear();
                self.notifier
                    .notify(Notification::success(SUCCESS_TITLE, &response.message));

                SubmitOutcome::Sent(response)
            }
            Err(err) => {
                state.phase = Phase::Failed;
                tracing::warn!(error = %err, "Contact submission failed");

                let description = match &err {
                    TransportError::Unreachable { .. } => UNREACHABLE_DESCRIPTION,
                    TransportError::Rejected { errors, .. } if !errors.is_empty() => {
                        state.errors = errors.clone();
                        INVALID_DESCRIPTION
                    }
                    TransportError::Rejected { .. } => RETRY_DESCRIPTION,
                };
                self.notifier
                    .notify(Notification::error(FAILURE_TITLE, description));

                SubmitOutcome::Failed(err)
            }
        };

        state.phase = Phase::Idle;

        outcome
    }
}
