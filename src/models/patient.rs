use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::enums::{Gender, IdentificationType};
use super::fields;
use super::values::{Attachment, FormValues};
use super::ModelError;

/// Minimal identity record, submitted before the full intake.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserRegistration {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl UserRegistration {
    pub fn from_values(values: &FormValues) -> Result<Self, ModelError> {
        Ok(Self {
            name: values.text(fields::NAME)?,
            email: values.text(fields::EMAIL)?,
            phone: values.text(fields::PHONE)?,
        })
    }

    pub fn to_values(&self) -> FormValues {
        FormValues::new()
            .with(fields::NAME, self.name.as_str())
            .with(fields::EMAIL, self.email.as_str())
            .with(fields::PHONE, self.phone.as_str())
    }
}

/// Full patient intake record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: NaiveDateTime,
    pub gender: Gender,
    pub address: String,
    pub occupation: String,
    pub emergency_contact_name: String,
    pub emergency_contact_number: String,
    pub primary_physician: String,
    pub insurance_provider: String,
    pub insurance_policy_number: String,
    pub allergies: Option<String>,
    pub current_medication: Option<String>,
    pub family_medical_history: Option<String>,
    pub past_medical_history: Option<String>,
    pub identification_type: Option<IdentificationType>,
    pub identification_number: Option<String>,
    pub identification_document: Vec<Attachment>,
    pub treatment_consent: bool,
    pub disclosure_consent: bool,
    pub privacy_consent: bool,
}

impl Default for PatientRecord {
    /// Empty intake form: consents unchecked, birth date set to now.
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            birth_date: chrono::Local::now().naive_local(),
            gender: Gender::default(),
            address: String::new(),
            occupation: String::new(),
            emergency_contact_name: String::new(),
            emergency_contact_number: String::new(),
            primary_physician: String::new(),
            insurance_provider: String::new(),
            insurance_policy_number: String::new(),
            allergies: None,
            current_medication: None,
            family_medical_history: None,
            past_medical_history: None,
            identification_type: Some(IdentificationType::default()),
            identification_number: None,
            identification_document: Vec::new(),
            treatment_consent: false,
            disclosure_consent: false,
            privacy_consent: false,
        }
    }
}

impl PatientRecord {
    /// True when all three consent flags are set.
    pub fn has_full_consent(&self) -> bool {
        self.treatment_consent && self.disclosure_consent && self.privacy_consent
    }

    pub fn from_values(values: &FormValues) -> Result<Self, ModelError> {
        let identification_type = values
            .optional_text(fields::IDENTIFICATION_TYPE)?
            .map(|s| s.parse::<IdentificationType>())
            .transpose()?;

        Ok(Self {
            name: values.text(fields::NAME)?,
            email: values.text(fields::EMAIL)?,
            phone: values.text(fields::PHONE)?,
            birth_date: values.date(fields::BIRTH_DATE)?,
            gender: values.text(fields::GENDER)?.parse()?,
            address: values.text(fields::ADDRESS)?,
            occupation: values.text(fields::OCCUPATION)?,
            emergency_contact_name: values.text(fields::EMERGENCY_CONTACT_NAME)?,
            emergency_contact_number: values.text(fields::EMERGENCY_CONTACT_NUMBER)?,
            primary_physician: values.text(fields::PRIMARY_PHYSICIAN)?,
            insurance_provider: values.text(fields::INSURANCE_PROVIDER)?,
            insurance_policy_number: values.text(fields::INSURANCE_POLICY_NUMBER)?,
            allergies: values.optional_text(fields::ALLERGIES)?,
            current_medication: values.optional_text(fields::CURRENT_MEDICATION)?,
            family_medical_history: values.optional_text(fields::FAMILY_MEDICAL_HISTORY)?,
            past_medical_history: values.optional_text(fields::PAST_MEDICAL_HISTORY)?,
            identification_type,
            identification_number: values.optional_text(fields::IDENTIFICATION_NUMBER)?,
            identification_document: values.files(fields::IDENTIFICATION_DOCUMENT)?,
            treatment_consent: values.flag(fields::TREATMENT_CONSENT)?,
            disclosure_consent: values.flag(fields::DISCLOSURE_CONSENT)?,
            privacy_consent: values.flag(fields::PRIVACY_CONSENT)?,
        })
    }

    pub fn to_values(&self) -> FormValues {
        FormValues::new()
            .with(fields::NAME, self.name.as_str())
            .with(fields::EMAIL, self.email.as_str())
            .with(fields::PHONE, self.phone.as_str())
            .with(fields::BIRTH_DATE, self.birth_date)
            .with(fields::GENDER, self.gender.as_str())
            .with(fields::ADDRESS, self.address.as_str())
            .with(fields::OCCUPATION, self.occupation.as_str())
            .with(fields::EMERGENCY_CONTACT_NAME, self.emergency_contact_name.as_str())
            .with(fields::EMERGENCY_CONTACT_NUMBER, self.emergency_contact_number.as_str())
            .with(fields::PRIMARY_PHYSICIAN, self.primary_physician.as_str())
            .with(fields::INSURANCE_PROVIDER, self.insurance_provider.as_str())
            .with(fields::INSURANCE_POLICY_NUMBER, self.insurance_policy_number.as_str())
            .with(fields::ALLERGIES, self.allergies.clone())
            .with(fields::CURRENT_MEDICATION, self.current_medication.clone())
            .with(fields::FAMILY_MEDICAL_HISTORY, self.family_medical_history.clone())
            .with(fields::PAST_MEDICAL_HISTORY, self.past_medical_history.clone())
            .with(
                fields::IDENTIFICATION_TYPE,
                self.identification_type.map(|t| t.as_str()),
            )
            .with(fields::IDENTIFICATION_NUMBER, self.identification_number.clone())
            .with(fields::IDENTIFICATION_DOCUMENT, self.identification_document.clone())
            .with(fields::TREATMENT_CONSENT, self.treatment_consent)
            .with(fields::DISCLOSURE_CONSENT, self.disclosure_consent)
            .with(fields::PRIVACY_CONSENT, self.privacy_consent)
    }
}
