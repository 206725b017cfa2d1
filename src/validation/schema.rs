//! Schema registry: ordered field rule sets for each record shape.

use std::sync::LazyLock;

use crate::constants::{gender_options, identification_types};
use crate::models::{fields, FieldValue, FormValues};

use super::rules::{
    CoercibleDate, Email, IsFiles, IsText, KnownDoctor, MaxLength, MinLength, MustConsent, OneOf,
    Pattern, Rule,
};
use super::ValidationErrors;

// ═══════════════════════════════════════════
// Building blocks
// ═══════════════════════════════════════════

/// Rules for one field, evaluated in order; the first failure wins.
pub struct FieldRules {
    field: &'static str,
    optional: bool,
    rules: Vec<Box<dyn Rule>>,
}

impl FieldRules {
    pub fn required(field: &'static str) -> Self {
        Self { field, optional: false, rules: Vec::new() }
    }

    /// Rules are skipped entirely when the value is empty or absent.
    pub fn optional(field: &'static str) -> Self {
        Self { field, optional: true, rules: Vec::new() }
    }

    pub fn rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    /// First failing message for `value`, if any.
    pub fn check(&self, value: &FieldValue) -> Option<&str> {
        if self.optional && value.is_empty() {
            return None;
        }
        self.rules
            .iter()
            .find(|rule| !rule.check(value))
            .map(|rule| rule.message())
    }
}

/// A named, ordered collection of field rule sets.
pub struct Schema {
    name: &'static str,
    fields: Vec<FieldRules>,
}

impl Schema {
    pub fn new(name: &'static str) -> Self {
        Self { name, fields: Vec::new() }
    }

    pub fn field(mut self, rules: FieldRules) -> Self {
        self.fields.push(rules);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.field)
    }

    pub fn rules_for(&self, field: &str) -> Option<&FieldRules> {
        self.fields.iter().find(|f| f.field == field)
    }

    /// Validate the whole record. Empty result means valid.
    pub fn validate(&self, values: &FormValues) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        for rules in &self.fields {
            if let Some(message) = rules.check(values.get(rules.field)) {
                errors.insert(rules.field, message);
            }
        }
        errors
    }

    /// Validate one field. Fields the schema does not know always pass.
    pub fn validate_field(&self, field: &str, values: &FormValues) -> Option<String> {
        self.rules_for(field)
            .and_then(|rules| rules.check(values.get(field)))
            .map(str::to_owned)
    }
}

// ═══════════════════════════════════════════
// Shared field definitions
// ═══════════════════════════════════════════

const PHYSICIAN_REQUIRED: &str = "Selecione pelo menos um médico";
const INVALID_PHONE: &str = "Número de telefone inválido";
const INVALID_DATE: &str = "Data inválida";
const INVALID_TEXT: &str = "Valor inválido";
const INVALID_ATTACHMENT: &str = "Anexe um arquivo válido";

fn bounded_text(field: &'static str, min: usize, max: usize, label: &str) -> FieldRules {
    FieldRules::required(field)
        .rule(MinLength::new(min, format!("{label} deve ter pelo menos {min} caracteres")))
        .rule(MaxLength::new(max, format!("{label} deve ter no máximo {max} caracteres")))
}

fn name_field() -> FieldRules {
    bounded_text(fields::NAME, 2, 50, "Nome")
}

fn email_field() -> FieldRules {
    FieldRules::required(fields::EMAIL).rule(Email::new("E-mail inválido"))
}

fn phone_field(field: &'static str) -> FieldRules {
    FieldRules::required(field).rule(Pattern::phone(INVALID_PHONE))
}

fn date_field(field: &'static str) -> FieldRules {
    FieldRules::required(field).rule(CoercibleDate::new(INVALID_DATE))
}

fn physician_field() -> FieldRules {
    FieldRules::required(fields::PRIMARY_PHYSICIAN).rule(MinLength::new(2, PHYSICIAN_REQUIRED))
}

fn consent_field(field: &'static str, subject: &str) -> FieldRules {
    FieldRules::required(field).rule(MustConsent::new(format!(
        "Você deve consentir com {subject} para prosseguir"
    )))
}

fn free_text(field: &'static str) -> FieldRules {
    FieldRules::optional(field).rule(IsText::new(INVALID_TEXT))
}

fn motive_field(field: &'static str) -> FieldRules {
    bounded_text(field, 2, 500, "Motivo")
}

// ═══════════════════════════════════════════
// Registry
// ═══════════════════════════════════════════

/// The record shapes that have a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    UserRegistration,
    PatientRecord,
    CreateAppointment,
    ScheduleAppointment,
    CancelAppointment,
}

impl SchemaKind {
    pub const ALL: [SchemaKind; 5] = [
        Self::UserRegistration,
        Self::PatientRecord,
        Self::CreateAppointment,
        Self::ScheduleAppointment,
        Self::CancelAppointment,
    ];
}

static USER_REGISTRATION: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("UserRegistration")
        .field(name_field())
        .field(email_field())
        .field(phone_field(fields::PHONE))
});

static PATIENT_RECORD: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("PatientRecord")
        .field(name_field())
        .field(email_field())
        .field(phone_field(fields::PHONE))
        .field(date_field(fields::BIRTH_DATE))
        .field(
            FieldRules::required(fields::GENDER)
                .rule(OneOf::new(gender_options(), "Selecione um gênero válido")),
        )
        .field(bounded_text(fields::ADDRESS, 5, 500, "Endereço"))
        .field(bounded_text(fields::OCCUPATION, 2, 500, "Ocupação"))
        .field(bounded_text(
            fields::EMERGENCY_CONTACT_NAME,
            2,
            50,
            "Nome do contato de emergência",
        ))
        .field(phone_field(fields::EMERGENCY_CONTACT_NUMBER))
        .field(
            physician_field().rule(KnownDoctor::new("Selecione um médico da lista")),
        )
        .field(bounded_text(fields::INSURANCE_PROVIDER, 2, 50, "Nome do plano"))
        .field(bounded_text(
            fields::INSURANCE_POLICY_NUMBER,
            2,
            50,
            "Número da carteirinha",
        ))
        .field(free_text(fields::ALLERGIES))
        .field(free_text(fields::CURRENT_MEDICATION))
        .field(free_text(fields::FAMILY_MEDICAL_HISTORY))
        .field(free_text(fields::PAST_MEDICAL_HISTORY))
        .field(
            FieldRules::optional(fields::IDENTIFICATION_TYPE).rule(OneOf::new(
                identification_types(),
                "Tipo de documento inválido",
            )),
        )
        .field(free_text(fields::IDENTIFICATION_NUMBER))
        .field(
            FieldRules::optional(fields::IDENTIFICATION_DOCUMENT)
                .rule(IsFiles::new(INVALID_ATTACHMENT)),
        )
        .field(consent_field(fields::TREATMENT_CONSENT, "o tratamento"))
        .field(consent_field(fields::DISCLOSURE_CONSENT, "a divulgação"))
        .field(consent_field(fields::PRIVACY_CONSENT, "a privacidade"))
});

static CREATE_APPOINTMENT: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("CreateAppointment")
        .field(physician_field())
        .field(date_field(fields::SCHEDULE))
        .field(motive_field(fields::REASON))
        .field(free_text(fields::NOTE))
        .field(free_text(fields::CANCELLATION_REASON))
});

static SCHEDULE_APPOINTMENT: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("ScheduleAppointment")
        .field(physician_field())
        .field(date_field(fields::SCHEDULE))
        .field(free_text(fields::REASON))
        .field(free_text(fields::NOTE))
        .field(free_text(fields::CANCELLATION_REASON))
});

static CANCEL_APPOINTMENT: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("CancelAppointment")
        .field(physician_field())
        .field(date_field(fields::SCHEDULE))
        .field(free_text(fields::REASON))
        .field(free_text(fields::NOTE))
        .field(motive_field(fields::CANCELLATION_REASON))
});

/// Look up a schema. Schemas are built once and shared.
pub fn schema(kind: SchemaKind) -> &'static Schema {
    match kind {
        SchemaKind::UserRegistration => &USER_REGISTRATION,
        SchemaKind::PatientRecord => &PATIENT_RECORD,
        SchemaKind::CreateAppointment => &CREATE_APPOINTMENT,
        SchemaKind::ScheduleAppointment => &SCHEDULE_APPOINTMENT,
        SchemaKind::CancelAppointment => &CANCEL_APPOINTMENT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PatientRecord, UserRegistration};

    fn valid_user() -> FormValues {
        UserRegistration {
            name: "Al".into(),
            email: "a@b.com".into(),
            phone: "+5551999887766".into(),
        }
        .to_values()
    }

    fn valid_patient() -> PatientRecord {
        PatientRecord {
            name: "Gustavo Gomes".into(),
            email: "gustavo@mail.com".into(),
            phone: "+5551999887766".into(),
            address: "Rua dos Andradas, 100".into(),
            occupation: "Engenheiro".into(),
            emergency_contact_name: "Ana Gomes".into(),
            emergency_contact_number: "+5551988776655".into(),
            primary_physician: "Leila Camargo".into(),
            insurance_provider: "Unimed".into(),
            insurance_policy_number: "ABC123456".into(),
            treatment_consent: true,
            disclosure_consent: true,
            privacy_consent: true,
            ..PatientRecord::default()
        }
    }

    // ── UserRegistration ────────────────────────────────

    #[test]
    fn valid_user_passes() {
        assert!(schema(SchemaKind::UserRegistration).validate(&valid_user()).is_empty());
    }

    #[test]
    fn name_length_boundaries() {
        let s = schema(SchemaKind::UserRegistration);
        for (len, ok) in [(1, false), (2, true), (50, true), (51, false)] {
            let mut values = valid_user();
            values.set(fields::NAME, "a".repeat(len));
            let errors = s.validate(&values);
            assert_eq!(errors.get(fields::NAME).is_none(), ok, "name length {len}");
        }
    }

    #[test]
    fn name_messages_are_specific() {
        let s = schema(SchemaKind::UserRegistration);
        let mut values = valid_user();
        values.set(fields::NAME, "A");
        assert_eq!(
            s.validate(&values).get(fields::NAME),
            Some("Nome deve ter pelo menos 2 caracteres")
        );
        values.set(fields::NAME, "A".repeat(51));
        assert_eq!(
            s.validate(&values).get(fields::NAME),
            Some("Nome deve ter no máximo 50 caracteres")
        );
    }

    #[test]
    fn empty_form_reports_every_field() {
        let errors = schema(SchemaKind::UserRegistration).validate(&FormValues::new());
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(fields::EMAIL), Some("E-mail inválido"));
        assert_eq!(errors.get(fields::PHONE), Some("Número de telefone inválido"));
    }

    #[test]
    fn validation_is_idempotent() {
        let s = schema(SchemaKind::PatientRecord);
        let values = PatientRecord::default().to_values();
        let first = s.validate(&values);
        let second = s.validate(&values);
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    // ── PatientRecord ───────────────────────────────────

    #[test]
    fn valid_patient_passes() {
        let errors = schema(SchemaKind::PatientRecord).validate(&valid_patient().to_values());
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn each_missing_consent_fails_alone() {
        let s = schema(SchemaKind::PatientRecord);
        for (field, expected) in [
            (fields::TREATMENT_CONSENT, "Você deve consentir com o tratamento para prosseguir"),
            (fields::DISCLOSURE_CONSENT, "Você deve consentir com a divulgação para prosseguir"),
            (fields::PRIVACY_CONSENT, "Você deve consentir com a privacidade para prosseguir"),
        ] {
            let mut values = valid_patient().to_values();
            values.set(field, false);
            let errors = s.validate(&values);
            assert_eq!(errors.len(), 1, "{field}");
            assert_eq!(errors.get(field), Some(expected));
        }
    }

    #[test]
    fn absent_consent_fails() {
        let mut values = valid_patient().to_values();
        values.set(fields::PRIVACY_CONSENT, FieldValue::Empty);
        let errors = schema(SchemaKind::PatientRecord).validate(&values);
        assert!(errors.get(fields::PRIVACY_CONSENT).is_some());
    }

    #[test]
    fn default_patient_form_is_not_submittable() {
        let errors = schema(SchemaKind::PatientRecord).validate(&PatientRecord::default().to_values());
        assert!(errors.get(fields::TREATMENT_CONSENT).is_some());
        assert!(errors.get(fields::NAME).is_some());
        // Optional fields never report
        assert!(errors.get(fields::ALLERGIES).is_none());
        assert!(errors.get(fields::IDENTIFICATION_DOCUMENT).is_none());
        // Defaults for select fields are valid
        assert!(errors.get(fields::GENDER).is_none());
        assert!(errors.get(fields::BIRTH_DATE).is_none());
        assert!(errors.get(fields::IDENTIFICATION_TYPE).is_none());
    }

    #[test]
    fn emergency_number_uses_phone_pattern() {
        let mut values = valid_patient().to_values();
        values.set(fields::EMERGENCY_CONTACT_NUMBER, "51988776655");
        let errors = schema(SchemaKind::PatientRecord).validate(&values);
        assert_eq!(
            errors.get(fields::EMERGENCY_CONTACT_NUMBER),
            Some("Número de telefone inválido")
        );
    }

    #[test]
    fn physician_must_be_known() {
        let s = schema(SchemaKind::PatientRecord);
        let mut values = valid_patient().to_values();
        values.set(fields::PRIMARY_PHYSICIAN, "Dr. Desconhecido");
        assert_eq!(
            s.validate(&values).get(fields::PRIMARY_PHYSICIAN),
            Some("Selecione um médico da lista")
        );
        values.set(fields::PRIMARY_PHYSICIAN, "");
        assert_eq!(
            s.validate(&values).get(fields::PRIMARY_PHYSICIAN),
            Some("Selecione pelo menos um médico")
        );
    }

    #[test]
    fn gender_outside_enum_fails() {
        let mut values = valid_patient().to_values();
        values.set(fields::GENDER, "Outros");
        let errors = schema(SchemaKind::PatientRecord).validate(&values);
        assert_eq!(errors.get(fields::GENDER), Some("Selecione um gênero válido"));
    }

    #[test]
    fn identification_type_optional_but_checked_when_set() {
        let s = schema(SchemaKind::PatientRecord);
        let mut values = valid_patient().to_values();
        values.set(fields::IDENTIFICATION_TYPE, "");
        assert!(s.validate(&values).is_empty());
        values.set(fields::IDENTIFICATION_TYPE, "Library Card");
        assert_eq!(
            s.validate(&values).get(fields::IDENTIFICATION_TYPE),
            Some("Tipo de documento inválido")
        );
    }

    #[test]
    fn optional_fields_reject_wrong_kind() {
        let s = schema(SchemaKind::PatientRecord);
        let mut values = valid_patient().to_values();
        values.set(fields::IDENTIFICATION_DOCUMENT, "scan.pdf");
        values.set(fields::ALLERGIES, true);
        let errors = s.validate(&values);
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.get(fields::IDENTIFICATION_DOCUMENT),
            Some("Anexe um arquivo válido")
        );
        assert_eq!(errors.get(fields::ALLERGIES), Some("Valor inválido"));
    }

    #[test]
    fn address_minimum_is_five() {
        let mut values = valid_patient().to_values();
        values.set(fields::ADDRESS, "Rua");
        let errors = schema(SchemaKind::PatientRecord).validate(&values);
        assert_eq!(
            errors.get(fields::ADDRESS),
            Some("Endereço deve ter pelo menos 5 caracteres")
        );
    }

    #[test]
    fn unparseable_birth_date_fails() {
        let mut values = valid_patient().to_values();
        values.set(fields::BIRTH_DATE, "ontem");
        let errors = schema(SchemaKind::PatientRecord).validate(&values);
        assert_eq!(errors.get(fields::BIRTH_DATE), Some("Data inválida"));
    }

    // ── Field-level ─────────────────────────────────────

    #[test]
    fn validate_field_matches_full_validation() {
        let s = schema(SchemaKind::PatientRecord);
        let mut values = valid_patient().to_values();
        values.set(fields::OCCUPATION, "x");
        let full = s.validate(&values);
        assert_eq!(
            s.validate_field(fields::OCCUPATION, &values).as_deref(),
            full.get(fields::OCCUPATION)
        );
        assert_eq!(s.validate_field(fields::EMAIL, &values), None);
    }

    #[test]
    fn unknown_field_always_passes() {
        let s = schema(SchemaKind::UserRegistration);
        assert_eq!(s.validate_field("nickname", &FormValues::new()), None);
    }

    #[test]
    fn every_kind_resolves_to_a_named_schema() {
        for kind in SchemaKind::ALL {
            let s = schema(kind);
            assert_eq!(s.name(), format!("{kind:?}"));
            assert!(s.field_names().count() >= 3);
        }
    }
}
