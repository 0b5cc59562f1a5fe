use std::sync::Arc;
use chrono::{DateTime, Utc};
use log::{info, warn};
use uuid::Uuid;
use tt_core::{GenerationResult, SubmitError};
use crate::api::GenerationApi;
use crate::upload::UploadInput;

/// A submission that passed validation and is now in flight
#[derive(Debug, Clone)]
pub struct Submission {
    pub id: Uuid,
    pub input: UploadInput,
}

/// Read-only view of the controller handed to the UI each frame
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub loading: bool,
    pub error: Option<String>,
    pub result: Option<Arc<GenerationResult>>,
    pub started_at: Option<DateTime<Utc>>,
}

/// Owns the form submission lifecycle.
///
/// Result and error are mutually exclusive: every path that sets one clears
/// the other, and `loading` is cleared on every exit path.
#[derive(Debug, Default)]
pub struct RequestController {
    in_flight: Option<Uuid>,
    result: Option<Arc<GenerationResult>>,
    error: Option<String>,
    started_at: Option<DateTime<Utc>>,
}

impl RequestController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn result(&self) -> Option<&Arc<GenerationResult>> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn session(&self) -> Session {
        Session {
            loading: self.is_loading(),
            error: self.error.clone(),
            result: self.result.clone(),
            started_at: self.started_at,
        }
    }

    /// Validate the input and mark a submission as started
    pub fn begin(&mut self, input: UploadInput) -> Result<Submission, SubmitError> {
        if self.is_loading() {
            return Err(SubmitError::Busy);
        }

        if let Err(e) = input.validate() {
            self.result = None;
            self.error = Some(e.to_string());
            return Err(e);
        }

        let id = Uuid::new_v4();
        info!("Submitting '{}' ({})", input.product_name(), id);

        self.result = None;
        self.error = None;
        self.in_flight = Some(id);
        self.started_at = Some(Utc::now());

        Ok(Submission { id, input })
    }

    /// Apply the outcome of submission `id`.
    ///
    /// Returns `None` when `id` is not the submission in flight.
    pub fn finish(
        &mut self,
        id: Uuid,
        outcome: Result<GenerationResult, SubmitError>,
    ) -> Option<Result<Arc<GenerationResult>, SubmitError>> {
        if self.in_flight != Some(id) {
            warn!("Ignoring outcome of stale submission {}", id);
            return None;
        }
        Some(self.apply(outcome))
    }

    /// Run a whole submission against `api`
    pub async fn submit<A: GenerationApi + ?Sized>(
        &mut self,
        api: &A,
        input: UploadInput,
    ) -> Result<Arc<GenerationResult>, SubmitError> {
        let submission = self.begin(input)?;
        let outcome = api.generate(&submission.input).await;
        self.apply(outcome)
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    fn apply(&mut self, outcome: Result<GenerationResult, SubmitError>) -> Result<Arc<GenerationResult>, SubmitError> {
        self.in_flight = None;
        self.started_at = None;

        match outcome {
            Ok(result) => {
                let result = Arc::new(result);
                self.error = None;
                self.result = Some(result.clone());
                Ok(result)
            }
            Err(e) => {
                warn!("Submission failed: {}", e);
                self.result = None;
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}
