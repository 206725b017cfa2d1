//! Form controller: field state, per-field errors and a single-permit submit.
//!
//! The controller is shared by reference between input handlers and the
//! submit handler, so state lives behind a `Mutex` that is never held across
//! an `.await`, and `loading` is an atomic gate.

use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;

use crate::config::FormsConfig;
use crate::constants::patient_form_defaults;
use crate::models::{AppointmentAction, AppointmentRequest, FieldValue, FormValues, PatientRecord, UserRegistration};
use crate::submission::{submit_record, CreatedEntity, FormPayload, Navigator, RecordCreator};
use crate::validation::{schema, schema_for_action, Schema, SchemaKind, ValidationErrors};

/// Generic failure text shown when the backend call does not go through.
pub const SUBMISSION_FAILED_MESSAGE: &str =
    "Não foi possível concluir o cadastro. Tente novamente.";

/// Result of `FormController::submit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Backend created the entity; navigation has been requested.
    Submitted { entity: CreatedEntity },
    /// Validation failed; the collaborator was not called.
    Invalid { errors: ValidationErrors },
    /// Another submission is in flight; this call did nothing.
    Busy,
    /// The backend call failed or created nothing. Values are kept for retry.
    Failed { message: String },
}

#[derive(Debug, Default)]
struct FormState {
    values: FormValues,
    errors: ValidationErrors,
    failure: Option<String>,
}

/// Clears the loading flag when dropped, on every exit path of `submit`.
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// A form bound to one schema and one payload type.
pub struct FormController<P: FormPayload, C, N> {
    schema: &'static Schema,
    context: P::Context,
    initial: FormValues,
    state: Mutex<FormState>,
    loading: AtomicBool,
    creator: C,
    navigator: N,
    submit_timeout: Duration,
    _payload: PhantomData<fn() -> P>,
}

impl<P, C, N> FormController<P, C, N>
where
    P: FormPayload,
    C: RecordCreator<P>,
    N: Navigator,
{
    pub fn new(
        schema: &'static Schema,
        context: P::Context,
        initial: FormValues,
        creator: C,
        navigator: N,
        config: &FormsConfig,
    ) -> Self {
        Self {
            schema,
            context,
            state: Mutex::new(FormState {
                values: initial.clone(),
                ..FormState::default()
            }),
            initial,
            loading: AtomicBool::new(false),
            creator,
            navigator,
            submit_timeout: config.submit_timeout,
            _payload: PhantomData,
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    pub fn creator(&self) -> &C {
        &self.creator
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// True while a submission is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    pub fn values(&self) -> FormValues {
        self.lock_state().values.clone()
    }

    pub fn value(&self, field: &str) -> FieldValue {
        self.lock_state().values.get(field).clone()
    }

    /// Errors from the latest validation pass.
    pub fn errors(&self) -> ValidationErrors {
        self.lock_state().errors.clone()
    }

    /// Message from the latest failed submission, cleared on the next attempt.
    pub fn failure(&self) -> Option<String> {
        self.lock_state().failure.clone()
    }

    /// Update a field and revalidate it (on-change validation).
    pub fn set_field(&self, field: &str, value: impl Into<FieldValue>) -> Option<String> {
        let mut state = self.lock_state();
        state.values.set(field, value);
        Self::refresh_field(self.schema, &mut state, field)
    }

    /// Revalidate one field without changing it (on-blur validation).
    pub fn validate_field(&self, field: &str) -> Option<String> {
        let mut state = self.lock_state();
        Self::refresh_field(self.schema, &mut state, field)
    }

    fn refresh_field(schema: &Schema, state: &mut FormState, field: &str) -> Option<String> {
        let error = schema.validate_field(field, &state.values);
        match &error {
            Some(message) => state.errors.insert(field, message.as_str()),
            None => {
                state.errors.remove(field);
            }
        }
        error
    }

    /// Validate every field and store the result.
    pub fn validate(&self) -> ValidationErrors {
        let mut state = self.lock_state();
        let errors = self.schema.validate(&state.values);
        state.errors = errors.clone();
        errors
    }

    /// Restore the initial values and clear errors.
    pub fn reset(&self) {
        let mut state = self.lock_state();
        state.values = self.initial.clone();
        state.errors.clear();
        state.failure = None;
    }

    /// Validate and, if valid, hand the payload to the collaborator.
    ///
    /// Only one submission runs at a time per form; calls made while one is
    /// in flight return `Busy` without side effects.
    pub async fn submit(&self) -> SubmitOutcome {
        let Some(_loading) = LoadingGuard::acquire(&self.loading) else {
            tracing::debug!(schema = self.schema.name(), "Submit ignored, already loading");
            return SubmitOutcome::Busy;
        };

        let payload = {
            let mut state = self.lock_state();
            state.failure = None;

            let errors = self.schema.validate(&state.values);
            state.errors = errors.clone();
            if !errors.is_empty() {
                tracing::debug!(
                    schema = self.schema.name(),
                    error_count = errors.len(),
                    "Submit blocked by validation errors"
                );
                return SubmitOutcome::Invalid { errors };
            }

            match P::from_values(&self.context, &state.values) {
                Ok(payload) => payload,
                Err(e) => {
                    tracing::error!(schema = self.schema.name(), error = %e, "Validated form did not build a payload");
                    state.failure = Some(SUBMISSION_FAILED_MESSAGE.to_string());
                    return SubmitOutcome::Failed {
                        message: SUBMISSION_FAILED_MESSAGE.to_string(),
                    };
                }
            }
        };

        match submit_record(&payload, &self.creator, &self.navigator, self.submit_timeout).await {
            Ok(entity) => SubmitOutcome::Submitted { entity },
            Err(e) => {
                tracing::warn!(schema = self.schema.name(), error = %e, "Submission failed, form kept for retry");
                self.lock_state().failure = Some(SUBMISSION_FAILED_MESSAGE.to_string());
                SubmitOutcome::Failed {
                    message: SUBMISSION_FAILED_MESSAGE.to_string(),
                }
            }
        }
    }
}

impl<C, N> FormController<UserRegistration, C, N>
where
    C: RecordCreator<UserRegistration>,
    N: Navigator,
{
    /// Empty registration form (name, e-mail, phone).
    pub fn registration(creator: C, navigator: N, config: &FormsConfig) -> Self {
        let initial = UserRegistration::default().to_values();
        Self::new(schema(SchemaKind::UserRegistration), (), initial, creator, navigator, config)
    }
}

impl<C, N> FormController<PatientRecord, C, N>
where
    C: RecordCreator<PatientRecord>,
    N: Navigator,
{
    /// Intake form prefilled with the default patient values.
    pub fn patient_intake(creator: C, navigator: N, config: &FormsConfig) -> Self {
        let initial = patient_form_defaults().to_values();
        Self::new(schema(SchemaKind::PatientRecord), (), initial, creator, navigator, config)
    }
}

impl<C, N> FormController<AppointmentRequest, C, N>
where
    C: RecordCreator<AppointmentRequest>,
    N: Navigator,
{
    /// Appointment form for a UI action token; unknown tokens get the
    /// schedule flow.
    pub fn appointment(action: &str, creator: C, navigator: N, config: &FormsConfig) -> Self {
        let action = AppointmentAction::from_token(action);
        Self::new(schema_for_action(action), action, FormValues::new(), creator, navigator, config)
    }
}
