use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// No HTTP status was received.
    #[error("Cannot connect to server: {0}")]
    Network(String),

    #[error("Request rejected ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Request { status: u16, message: Option<String> },

    /// The request could not be assembled, so nothing was sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ClientError {
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        ClientError::Network(err.to_string())
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Network(_))
    }

    /// Message supplied by the server in an error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Request { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}
