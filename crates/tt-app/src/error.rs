use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Could not read image {path}: {reason}")]
    UnreadableImage { path: String, reason: String },

    #[error("Failed to fetch {url}: {reason}")]
    ImageFetch { url: String, reason: String },
}
