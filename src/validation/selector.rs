use crate::models::AppointmentAction;

use super::schema::{schema, Schema, SchemaKind};

/// Schema for an appointment action.
pub fn schema_for_action(action: AppointmentAction) -> &'static Schema {
    let kind = match action {
        AppointmentAction::Create => SchemaKind::CreateAppointment,
        AppointmentAction::Cancel => SchemaKind::CancelAppointment,
        AppointmentAction::Schedule => SchemaKind::ScheduleAppointment,
    };
    schema(kind)
}

/// Schema for a raw action token coming from the UI.
///
/// Unknown tokens select the schedule schema (see
/// `AppointmentAction::from_token`), so a typo in a caller silently gets the
/// least restrictive validation.
pub fn select_appointment_schema(action: &str) -> &'static Schema {
    schema_for_action(AppointmentAction::from_token(action))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{fields, FormValues};

    fn blank_reasons() -> FormValues {
        FormValues::new()
            .with(fields::PRIMARY_PHYSICIAN, "Leila Camargo")
            .with(fields::SCHEDULE, "2026-11-03T10:00:00")
            .with(fields::REASON, "")
            .with(fields::CANCELLATION_REASON, "")
    }

    #[test]
    fn tokens_select_matching_schema() {
        assert_eq!(select_appointment_schema("create").name(), "CreateAppointment");
        assert_eq!(select_appointment_schema("cancel").name(), "CancelAppointment");
        assert_eq!(select_appointment_schema("schedule").name(), "ScheduleAppointment");
    }

    #[test]
    fn unknown_token_falls_back_to_schedule() {
        for token in ["anything-else", "", "CANCEL", "delete"] {
            assert_eq!(
                select_appointment_schema(token).name(),
                "ScheduleAppointment",
                "token {token:?}"
            );
        }
    }

    #[test]
    fn blank_reasons_pass_schedule_only() {
        let values = blank_reasons();
        assert!(select_appointment_schema("schedule").validate(&values).is_empty());
        assert!(select_appointment_schema("anything-else").validate(&values).is_empty());

        let create = select_appointment_schema("create").validate(&values);
        assert_eq!(create.fields().collect::<Vec<_>>(), vec![fields::REASON]);

        let cancel = select_appointment_schema("cancel").validate(&values);
        assert_eq!(cancel.fields().collect::<Vec<_>>(), vec![fields::CANCELLATION_REASON]);
    }

    #[test]
    fn create_does_not_require_cancellation_reason() {
        let values = blank_reasons().with(fields::REASON, "Dor de cabeça recorrente");
        assert!(select_appointment_schema("create").validate(&values).is_empty());
    }

    #[test]
    fn cancel_bounds_cancellation_reason() {
        let s = select_appointment_schema("cancel");
        let values = blank_reasons().with(fields::CANCELLATION_REASON, "x".repeat(501));
        assert_eq!(
            s.validate(&values).get(fields::CANCELLATION_REASON),
            Some("Motivo deve ter no máximo 500 caracteres")
        );
    }

    #[test]
    fn schedule_requires_physician() {
        let values = blank_reasons().with(fields::PRIMARY_PHYSICIAN, "J");
        let errors = select_appointment_schema("schedule").validate(&values);
        assert_eq!(
            errors.get(fields::PRIMARY_PHYSICIAN),
            Some("Selecione pelo menos um médico")
        );
    }

    #[test]
    fn every_action_requires_schedule_date() {
        for action in AppointmentAction::ALL {
            let values = blank_reasons()
                .with(fields::REASON, "Retorno")
                .with(fields::CANCELLATION_REASON, "Viagem")
                .with(fields::SCHEDULE, "");
            let errors = schema_for_action(*action).validate(&values);
            assert_eq!(errors.get(fields::SCHEDULE), Some("Data inválida"), "{action}");
        }
    }
}
