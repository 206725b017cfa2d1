use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::enums::AppointmentAction;
use super::fields;
use super::values::FormValues;
use super::ModelError;

/// Appointment create/schedule/cancel request.
///
/// Which of `reason` and `cancellation_reason` is mandatory depends on the
/// action; the record itself keeps both optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRequest {
    pub action: AppointmentAction,
    pub primary_physician: String,
    pub schedule: NaiveDateTime,
    pub reason: Option<String>,
    pub note: Option<String>,
    pub cancellation_reason: Option<String>,
}

impl AppointmentRequest {
    pub fn from_values(
        action: AppointmentAction,
        values: &FormValues,
    ) -> Result<Self, ModelError> {
        Ok(Self {
            action,
            primary_physician: values.text(fields::PRIMARY_PHYSICIAN)?,
            schedule: values.date(fields::SCHEDULE)?,
            reason: values.optional_text(fields::REASON)?,
            note: values.optional_text(fields::NOTE)?,
            cancellation_reason: values.optional_text(fields::CANCELLATION_REASON)?,
        })
    }

    pub fn to_values(&self) -> FormValues {
        FormValues::new()
            .with(fields::PRIMARY_PHYSICIAN, self.primary_physician.as_str())
            .with(fields::SCHEDULE, self.schedule)
            .with(fields::REASON, self.reason.clone())
            .with(fields::NOTE, self.note.clone())
            .with(fields::CANCELLATION_REASON, self.cancellation_reason.clone())
    }
}
