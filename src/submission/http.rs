//! REST implementation of the creation collaborator.
//!
//! `POST {base_url}/{endpoint}` with the payload as JSON. A 2xx body of
//! `{"$id": ...}` or `{"id": ...}` is a created entity; an empty body or
//! `null` means nothing was created.

use super::{CollaboratorError, CreatedEntity, FormPayload, RecordCreator};
use crate::config::FormsConfig;

/// Backend HTTP client.
pub struct HttpRecordCreator {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRecordCreator {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Client pointed at `config.api_base_url`.
    ///
    /// No request timeout is set on the HTTP client: `submit_record` owns the
    /// deadline, so an expired call always surfaces as `SubmissionError::Timeout`.
    pub fn from_config(config: &FormsConfig) -> Result<Self, CollaboratorError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| CollaboratorError::Transport(e.to_string()))?;
        Ok(Self::with_client(&config.api_base_url, client))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn map_send_error(&self, e: reqwest::Error) -> CollaboratorError {
        if e.is_connect() {
            CollaboratorError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            CollaboratorError::Transport("Request timed out".into())
        } else {
            CollaboratorError::Transport(e.to_string())
        }
    }
}

impl<P: FormPayload> RecordCreator<P> for HttpRecordCreator {
    async fn create(&self, payload: &P) -> Result<Option<CreatedEntity>, CollaboratorError> {
        let url = format!("{}/{}", self.base_url, P::ENDPOINT);
        tracing::debug!(endpoint = P::ENDPOINT, "POST to backend");

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CollaboratorError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| CollaboratorError::Transport(e.to_string()))?;
        parse_created(&body)
    }
}

fn parse_created(body: &str) -> Result<Option<CreatedEntity>, CollaboratorError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str::<Option<CreatedEntity>>(body)
        .map_err(|e| CollaboratorError::MalformedResponse(e.to_string()))
}
