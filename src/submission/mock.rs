//! In-process collaborators for tests and local development.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use super::{CollaboratorError, CreatedEntity, FormPayload, Navigator, RecordCreator};

/// What the mock backend does with each request.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Create an entity with this id.
    Created(String),
    /// Create an entity with this id after a delay.
    Delayed(Duration, String),
    /// Accept the call but create nothing.
    Nothing,
    /// Fail with `CollaboratorError::Rejected`.
    Fail(String),
    /// Never respond.
    Hang,
}

/// Mock creation collaborator: returns a configurable result and records
/// what it was sent.
pub struct MockCreator {
    behavior: Mutex<MockBehavior>,
    calls: AtomicUsize,
    last_payload: Mutex<Option<serde_json::Value>>,
}

impl MockCreator {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior: Mutex::new(behavior),
            calls: AtomicUsize::new(0),
            last_payload: Mutex::new(None),
        }
    }

    /// Change the response for subsequent calls.
    pub fn set_behavior(&self, behavior: MockBehavior) {
        *self.behavior.lock().unwrap_or_else(PoisonError::into_inner) = behavior;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// JSON form of the last payload received.
    pub fn last_payload(&self) -> Option<serde_json::Value> {
        self.last_payload
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<P: FormPayload> RecordCreator<P> for MockCreator {
    async fn create(&self, payload: &P) -> Result<Option<CreatedEntity>, CollaboratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let json = serde_json::to_value(payload)
            .map_err(|e| CollaboratorError::MalformedResponse(e.to_string()))?;
        *self.last_payload.lock().unwrap_or_else(PoisonError::into_inner) = Some(json);

        let behavior = self
            .behavior
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        match behavior {
            MockBehavior::Created(id) => Ok(Some(CreatedEntity::new(id))),
            MockBehavior::Delayed(delay, id) => {
                tokio::time::sleep(delay).await;
                Ok(Some(CreatedEntity::new(id)))
            }
            MockBehavior::Nothing => Ok(None),
            MockBehavior::Fail(reason) => Err(CollaboratorError::Rejected(reason)),
            MockBehavior::Hang => std::future::pending().await,
        }
    }
}

/// Navigator that records every path it is sent to.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    paths: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn paths(&self) -> Vec<String> {
        self.paths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.paths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_string());
    }
}
