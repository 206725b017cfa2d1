use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }

            /// Every accepted token, in declaration order.
            pub fn tokens() -> Vec<&'static str> {
                Self::ALL.iter().map(|v| v.as_str()).collect()
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(Gender {
    Masculino => "Masculino",
    Feminino => "Feminino",
    Outro => "Outro",
});

str_enum!(IdentificationType {
    BirthCertificate => "Birth Certificate",
    DriversLicense => "Driver's License",
    MedicalInsuranceCard => "Medical Insurance Card/Policy",
    MilitaryIdCard => "Military ID Card",
    NationalIdentityCard => "National Identity Card",
    Passport => "Passport",
    ResidentAlienCard => "Resident Alien Card (Green Card)",
    SocialSecurityCard => "Social Security Card",
    StateIdCard => "State ID Card",
    StudentIdCard => "Student ID Card",
    VoterIdCard => "Voter ID Card",
});

str_enum!(AppointmentAction {
    Create => "create",
    Cancel => "cancel",
    Schedule => "schedule",
});

impl Default for Gender {
    fn default() -> Self {
        Self::Masculino
    }
}

impl Default for IdentificationType {
    fn default() -> Self {
        Self::BirthCertificate
    }
}

impl AppointmentAction {
    /// Lenient parse for UI action tokens.
    ///
    /// Unrecognized tokens map to `Schedule`. This is the documented default
    /// for the appointment form, not an error path: the schedule flow is the
    /// least restrictive one and the caller decides which flow it is in.
    pub fn from_token(token: &str) -> Self {
        token.parse().unwrap_or_else(|_| {
            tracing::debug!(token, "Unknown appointment action, using schedule");
            Self::Schedule
        })
    }
}
