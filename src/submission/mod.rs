//! Submission pipeline: validated payload → creation collaborator → navigation.
//!
//! The backend and the router are collaborators behind `RecordCreator` and
//! `Navigator`. `submit_record` never panics on collaborator failure; it logs
//! and returns a `SubmissionError` for the form to turn into a retryable state.

pub mod http;
pub mod mock;
pub mod payload;

pub use http::HttpRecordCreator;
pub use mock::{MockBehavior, MockCreator, RecordingNavigator};
pub use payload::FormPayload;

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::ModelError;

/// Entity returned by the backend after a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedEntity {
    #[serde(alias = "$id")]
    pub id: String,
}

impl CreatedEntity {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    #[error("Backend is not reachable at {0}")]
    Connection(String),

    #[error("Backend returned error (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    Transport(String),

    #[error("Malformed backend response: {0}")]
    MalformedResponse(String),

    #[error("Request rejected: {0}")]
    Rejected(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Collaborator failed: {0}")]
    Collaborator(#[from] CollaboratorError),

    #[error("Collaborator returned no entity")]
    NoEntity,

    #[error("Submission timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid payload: {0}")]
    Payload(#[from] ModelError),
}

/// External create operation (backend API).
///
/// `Ok(None)` is the "falsy result" case: the call went through but nothing
/// was created. `Err` is a hard failure.
pub trait RecordCreator<P>: Send + Sync {
    fn create(
        &self,
        payload: &P,
    ) -> impl Future<Output = Result<Option<CreatedEntity>, CollaboratorError>> + Send;
}

/// External router.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Send `payload` to `creator` and navigate to its confirmation screen.
///
/// The collaborator call is bounded by `timeout`; the in-flight request is
/// dropped when it expires.
pub async fn submit_record<P, C, N>(
    payload: &P,
    creator: &C,
    navigator: &N,
    timeout: Duration,
) -> Result<CreatedEntity, SubmissionError>
where
    P: FormPayload,
    C: RecordCreator<P>,
    N: Navigator,
{
    let submission_id = Uuid::new_v4();
    tracing::info!(%submission_id, endpoint = P::ENDPOINT, "Submitting form");

    let created = match tokio::time::timeout(timeout, creator.create(payload)).await {
        Err(_) => {
            tracing::warn!(%submission_id, ?timeout, "Submission timed out");
            return Err(SubmissionError::Timeout(timeout));
        }
        Ok(Err(e)) => {
            tracing::error!(%submission_id, error = %e, "Submission failed");
            return Err(e.into());
        }
        Ok(Ok(None)) => {
            tracing::warn!(%submission_id, "Backend returned no entity, staying on form");
            return Err(SubmissionError::NoEntity);
        }
        Ok(Ok(Some(entity))) => entity,
    };

    let path = payload.confirmation_path(&created.id);
    tracing::info!(%submission_id, entity_id = %created.id, "Submission accepted");
    navigator.navigate(&path);
    Ok(created)
}
