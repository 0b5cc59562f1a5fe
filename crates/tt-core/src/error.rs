use thiserror::Error;

/// Why a submission produced no result
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    /// Input was incomplete; no request was sent
    #[error("{0}")]
    Validation(String),

    /// The service answered but reported `status: "error"`
    #[error("{0}")]
    Application(String),

    /// The request or response body could not be exchanged
    #[error("Network error: {0}")]
    Transport(String),

    #[error("A generation request is already in progress")]
    Busy,
}

impl SubmitError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            SubmitError::Application("unsupported format".into()).to_string(),
            "unsupported format"
        );
        assert_eq!(
            SubmitError::Transport("connection refused".into()).to_string(),
            "Network error: connection refused"
        );
    }
}
