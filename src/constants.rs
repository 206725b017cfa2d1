//! Reference data for the intake forms: provider roster, select options and
//! the initial state of the patient form.

use crate::models::{Gender, IdentificationType, PatientRecord};

/// Providers patients can pick as primary physician.
pub const DOCTORS: &[&str] = &[
    "John fernandes",
    "Leila Camargo",
    "David Kwisgewiv",
    "Everton Peres",
    "Jaina Pereira",
    "Alex Ramirez",
    "Jasmine Leite",
    "Alyana Cruz",
    "Paulo Sauro",
];

pub fn is_known_doctor(name: &str) -> bool {
    DOCTORS.contains(&name)
}

/// Radio options for the gender field. Derived from `Gender` so the options
/// can never drift from what validation accepts.
pub fn gender_options() -> Vec<&'static str> {
    Gender::tokens()
}

pub fn identification_types() -> Vec<&'static str> {
    IdentificationType::tokens()
}

/// Initial values of the patient intake form.
pub fn patient_form_defaults() -> PatientRecord {
    PatientRecord::default()
}
