use std::sync::Arc;
use image::RgbaImage;
use uuid::Uuid;
use tt_core::{GenerationResult, SubmitError};
use crate::ui::UiEvent;

#[derive(Debug, Clone)]
pub enum TtEvent {
    Ui(UiEvent),
    App(AppEvent),
    Gen(GenEvent),
}

/// Broadcast to every UI component
#[derive(Debug, Clone)]
pub enum AppEvent {
    SubmissionStarted,
    ResultReady,
    SubmissionFailed(String),
    Status(String),
}

/// Completions of work spawned on the tokio runtime
#[derive(Debug, Clone)]
pub enum GenEvent {
    Finished {
        id: Uuid,
        outcome: Result<GenerationResult, SubmitError>,
    },
    ImageFetched {
        submission: Uuid,
        url: String,
        image: Result<Arc<RgbaImage>, String>,
    },
}
