use thiserror::Error;

/// Failure talking to the backend.
///
/// The repository logs these and carries on; they never abort a user action.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Server unreachable: {0}")]
    Unreachable(String),

    #[error("Server returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Record not found on server: {0}")]
    NotFound(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            GatewayError::MalformedResponse(e.to_string())
        } else {
            GatewayError::Unreachable(e.to_string())
        }
    }
}
