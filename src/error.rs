use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Error code the catalog service puts in the body when a unique
/// constraint is violated (e.g. a second Pokémon with the same name).
pub const DUPLICATE_ENTRY_CODE: &str = "ER_DUP_ENTRY";

pub type ClientResult<T> = Result<T, ClientError>;

/// Rejections raised locally, before any request is sent.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ValidationError {
    #[error("Name is required")]
    EmptyName,
    #[error("Image is required")]
    MissingImage,
    #[error("Only image files are supported (JPEG, PNG, GIF, WEBP), got {0}")]
    UnsupportedImageType(String),
    #[error("Select at least one tipo")]
    EmptyTipoSelection,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("Network error: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("Malformed response: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("Service responded with {status}: {body}")]
    Service { status: StatusCode, body: String },
    #[error("Not found")]
    NotFound,
    #[error("Duplicate entry")]
    Duplicate { message: Option<String> },
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err)
        } else {
            Self::Transport(err)
        }
    }
}

impl ClientError {
    /// Classify an unsuccessful response.
    pub fn from_response(status: StatusCode, body: String) -> Self {
        if status == StatusCode::NOT_FOUND {
            return Self::NotFound;
        }
        let parsed = ServiceErrorBody::parse(&body);
        if parsed.code.as_deref() == Some(DUPLICATE_ENTRY_CODE) {
            return Self::Duplicate {
                message: parsed.message(),
            };
        }
        Self::Service { status, body }
    }

    /// Human-readable message the service attached to the failure, if any.
    pub fn service_message(&self) -> Option<String> {
        match self {
            Self::Service { body, .. } => {
                ServiceErrorBody::parse(body).message()
            }
            Self::Duplicate { message } => message.clone(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// Error payload of the catalog service: `{"message": ..., "code": ...}`.
///
/// `message` is a string for most errors and a list of strings for request
/// validation failures.
#[derive(Debug, Default, Deserialize)]
pub struct ServiceErrorBody {
    #[serde(default)]
    message: Option<serde_json::Value>,
    #[serde(default)]
    pub code: Option<String>,
}

impl ServiceErrorBody {
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    pub fn message(&self) -> Option<String> {
        use serde_json::Value;

        match self.message.as_ref()? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Array(parts) => {
                let parts: Vec<&str> =
                    parts.iter().filter_map(Value::as_str).collect();
                (!parts.is_empty()).then(|| parts.join(", "))
            }
            _ => None,
        }
    }
}

/// A failure already phrased for the user.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DisplayableError(String);

impl DisplayableError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }

    /// Phrase a client failure for the user. `fallback` covers failures
    /// the service gave no usable explanation for.
    pub fn describe(err: &ClientError, fallback: &str) -> Self {
        match err {
            ClientError::Validation(e) => e.clone().into(),
            ClientError::Duplicate { message: Some(message) } => {
                Self::new(message.clone())
            }
            ClientError::Duplicate { message: None } => {
                Self::new("This Pokémon already exists")
            }
            ClientError::NotFound => Self::new("Pokémon not found"),
            ClientError::Transport(_) => {
                Self::new("Could not reach the catalog service")
            }
            ClientError::Service { .. } | ClientError::Decode(_) => err
                .service_message()
                .map(Self::new)
                .unwrap_or_else(|| Self::new(fallback)),
        }
    }
}

impl std::fmt::Display for DisplayableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for DisplayableError {}

impl From<ValidationError> for DisplayableError {
    fn from(err: ValidationError) -> Self {
        Self(err.to_string())
    }
}

/// A success confirmation for the user.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notice(String);

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_not_found_takes_precedence() {
        let err = ClientError::from_response(
            StatusCode::NOT_FOUND,
            r#"{"message":"Pokemon 7 not found"}"#.to_string(),
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn test_duplicate_code_detected() {
        let err = ClientError::from_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"code":"ER_DUP_ENTRY"}"#.to_string(),
        );
        assert!(matches!(err, ClientError::Duplicate { message: None }));
    }

    #[test]
    fn test_service_message_variants() {
        let cases = [
            (r#"{"message":"Bad name"}"#, Some("Bad name")),
            (
                r#"{"message":["nombre must be a string","imagen missing"]}"#,
                Some("nombre must be a string, imagen missing"),
            ),
            (r#"{"message":""}"#, None),
            ("<html>gateway timeout</html>", None),
            ("", None),
        ];
        for (body, expected) in cases {
            let err = ClientError::from_response(
                StatusCode::BAD_REQUEST,
                body.to_string(),
            );
            assert!(matches!(err, ClientError::Service { .. }));
            assert_eq!(err.service_message().as_deref(), expected, "{body}");
        }
    }

    #[test]
    fn test_describe() {
        let cases = [
            (
                ClientError::Validation(ValidationError::EmptyName),
                "Name is required",
            ),
            (
                ClientError::Duplicate {
                    message: Some("Duplicate entry 'Pikachu'".to_string()),
                },
                "Duplicate entry 'Pikachu'",
            ),
            (
                ClientError::Duplicate { message: None },
                "This Pokémon already exists",
            ),
            (ClientError::NotFound, "Pokémon not found"),
            (
                ClientError::Service {
                    status: StatusCode::BAD_REQUEST,
                    body: r#"{"message":"Image too large"}"#.to_string(),
                },
                "Image too large",
            ),
            (
                ClientError::Service {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: String::new(),
                },
                "Failed to create Pokémon",
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(
                DisplayableError::describe(&err, "Failed to create Pokémon")
                    .message(),
                expected
            );
        }
    }
}
