//! Patient intake and registration forms.
//!
//! Schema validation for the registration, intake and appointment forms,
//! a form controller holding field state and a single loading flag, and the
//! pipeline that hands a validated record to the backend and routes the
//! result.

pub mod config;
pub mod constants;
pub mod form;
pub mod models;
pub mod submission;
pub mod validation;

pub use form::{FormController, SubmitOutcome};
pub use validation::{is_valid_phone, select_appointment_schema, ValidationErrors};

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// Filter comes from `RUST_LOG`, falling back to `config::default_log_filter`.
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let result = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();

    if result.is_ok() {
        tracing::info!("{} v{} logging initialised", config::APP_NAME, config::APP_VERSION);
    }
}
