//! Error types shared by the gateway, the storage layer and the forms.

use thiserror::Error;

/// Failure of a remote API call.
///
/// `Clone` because one refresh outcome is handed to every request that was
/// waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// A 2xx body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The request could not be built (serialization, form data).
    #[error("failed to build request: {0}")]
    Request(String),

    /// A newer login or logout started before this one finished; its
    /// outcome was discarded.
    #[error("superseded by a newer session change")]
    Superseded,
}

impl ApiError {
    /// HTTP status, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Reads a top-level string field from a JSON error body.
    pub fn body_field(&self, field: &str) -> Option<String> {
        match self {
            Self::Http { body, .. } => json_string_field(body, field),
            _ => None,
        }
    }

    /// Message for the user: `message`, then `error`, then `detail` from the
    /// error body, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.message_from(&["message", "error", "detail"], fallback)
    }

    /// First non-empty string among `fields` of the error body, else
    /// `fallback`.
    pub fn message_from(&self, fields: &[&str], fallback: &str) -> String {
        fields
            .iter()
            .find_map(|field| self.body_field(field))
            .unwrap_or_else(|| fallback.to_string())
    }
}

pub(crate) fn json_string_field(body: &str, field: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get(field)?
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Failure of the durable storage behind the session snapshot.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("browser storage is unavailable")]
    Unavailable,

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("session snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Client-side form validation failure. Never reaches the session store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must be at least {min} characters long")]
    PasswordTooShort { min: usize },

    #[error("Please fill in: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("{field} must be {expected}")]
    WrongFileType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("{field} must be {max_mb}MB or less")]
    FileTooLarge { field: &'static str, max_mb: usize },
}
