pub mod error;
pub mod gallery;
pub mod response;
pub mod sprite;
mod views;

pub use error::SubmitError;
pub use response::{GenerationResult, ModelAsset, ResultStatus, parse_response};
pub use views::{SideViews, ViewKey};
