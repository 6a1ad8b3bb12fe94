use thiserror::Error;

/// Shown for every failure that is not a structured 400 from the backend.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Something went wrong. Check that the backend is running, reachable and returns valid JSON.";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Unauthorized: the session token was not accepted")]
    Unauthorized,

    #[error("Resource not found")]
    NotFound,

    #[error("Unexpected response status: {0}")]
    UnexpectedStatus(u16),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid API endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

impl ApiError {
    /// The notice to show the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected { message, .. } => message.clone(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, ApiError::Rejected { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_surfaces_backend_message() {
        let error = ApiError::Rejected {
            status: 400,
            message: "Username is already taken".to_string(),
        };
        assert!(error.is_rejection());
        assert_eq!(error.user_message(), "Username is already taken");
    }

    #[test]
    fn test_other_failures_use_generic_message() {
        assert_eq!(ApiError::UnexpectedStatus(500).user_message(), GENERIC_FAILURE_MESSAGE);
        assert_eq!(ApiError::Unauthorized.user_message(), GENERIC_FAILURE_MESSAGE);

        let json_error = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        assert_eq!(ApiError::from(json_error).user_message(), GENERIC_FAILURE_MESSAGE);
    }
}
