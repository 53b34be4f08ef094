pub mod http;

use thiserror::Error;

use crate::domain::email::{Email, EmailId, EmailUpdate, Mailbox, OutgoingEmail};

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never got a response (connect/transport failure).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("server returned {status}{}", detail(.message))]
    Server { status: u16, message: Option<String> },

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

fn detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl ApiError {
    /// True when the request reached the server, whatever it answered.
    pub fn reached_server(&self) -> bool {
        matches!(self, ApiError::Server { .. })
    }
}

/// The backend REST surface the client consumes.
pub trait MailApi: Send + Sync {
    fn list_mailbox(&self, mailbox: Mailbox) -> Result<Vec<Email>, ApiError>;
    fn get_email(&self, id: EmailId) -> Result<Email, ApiError>;
    fn update_email(&self, id: EmailId, update: &EmailUpdate) -> Result<(), ApiError>;
    fn send_email(&self, email: &OutgoingEmail) -> Result<serde_json::Value, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_display() {
        let bare = ApiError::Server {
            status: 404,
            message: None,
        };
        assert_eq!(bare.to_string(), "server returned 404");

        let detailed = ApiError::Server {
            status: 400,
            message: Some("User bob@example.com does not exist.".into()),
        };
        assert_eq!(
            detailed.to_string(),
            "server returned 400: User bob@example.com does not exist."
        );
        assert!(detailed.reached_server());
        assert!(!ApiError::Network("refused".into()).reached_server());
    }
}
