use serde::Serialize;

use crate::models::{AppointmentAction, AppointmentRequest, FormValues, ModelError, PatientRecord, UserRegistration};

/// A typed record a form can submit.
pub trait FormPayload: Serialize + Send + Sync + Sized {
    /// Extra input needed to build the payload besides the field values.
    type Context: Send + Sync;

    /// Backend collection the payload is posted to.
    const ENDPOINT: &'static str;

    fn from_values(context: &Self::Context, values: &FormValues) -> Result<Self, ModelError>;

    /// Route shown after the backend created `id`.
    fn confirmation_path(&self, id: &str) -> String;
}

impl FormPayload for UserRegistration {
    type Context = ();
    const ENDPOINT: &'static str = "users";

    fn from_values(_: &(), values: &FormValues) -> Result<Self, ModelError> {
        UserRegistration::from_values(values)
    }

    fn confirmation_path(&self, id: &str) -> String {
        format!("/patients/{id}/register")
    }
}

impl FormPayload for PatientRecord {
    type Context = ();
    const ENDPOINT: &'static str = "patients";

    fn from_values(_: &(), values: &FormValues) -> Result<Self, ModelError> {
        PatientRecord::from_values(values)
    }

    fn confirmation_path(&self, id: &str) -> String {
        format!("/patients/{id}/new-appointment")
    }
}

impl FormPayload for AppointmentRequest {
    type Context = AppointmentAction;
    const ENDPOINT: &'static str = "appointments";

    fn from_values(action: &AppointmentAction, values: &FormValues) -> Result<Self, ModelError> {
        AppointmentRequest::from_values(*action, values)
    }

    fn confirmation_path(&self, id: &str) -> String {
        format!("/appointments/{id}/success")
    }
}
