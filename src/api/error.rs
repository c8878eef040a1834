//! API error types for the CoinGate REST API client.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// API-specific error type for the CoinGate REST API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP/network error from reqwest (connection, TLS, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-200 status
    #[error("{0}")]
    Status(StatusError),

    /// JSON deserialization error on a successful response
    #[error("Deserialization error: {0}")]
    Deserialize(String),

    /// Invalid parameter provided to the client
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl ApiError {
    /// HTTP status of the response, if the API answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status(e) => Some(e.status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the request failed because the timeout elapsed.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error response format from the API.
///
/// The API is inconsistent about which fields it fills: sometimes `reason` and
/// `message`, sometimes only `error`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorResponse {
    /// Parse an error body field by field.
    ///
    /// A field that is missing or not a string is `None` without affecting
    /// the others. Anything that is not a JSON object yields an empty response.
    pub fn from_body(body: &str) -> Self {
        let Ok(value) = serde_json::from_str::<Value>(body) else {
            return Self::default();
        };
        let field = |name: &str| value.get(name).and_then(Value::as_str).map(str::to_string);

        Self {
            reason: field("reason"),
            message: field("message"),
            error: field("error"),
        }
    }
}

/// A non-200 response, normalized.
///
/// Displays as `Error <status>: <reason> <message><error>`, leaving out the
/// parts the API did not send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusError {
    pub status: u16,
    pub reason: String,
    pub message: String,
    pub error: String,
}

impl StatusError {
    pub fn new(status: u16, response: ErrorResponse) -> Self {
        Self {
            status,
            reason: response.reason.unwrap_or_default(),
            message: response.message.unwrap_or_default(),
            error: response.error.unwrap_or_default(),
        }
    }

    /// `<reason> <message><error>` with empty parts left out.
    pub fn description(&self) -> String {
        let detail = format!("{}{}", self.message, self.error);
        [self.reason.as_str(), detail.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = self.description();
        if description.is_empty() {
            write!(f, "Error {}:", self.status)
        } else {
            write!(f, "Error {}: {}", self.status, description)
        }
    }
}

impl std::error::Error for StatusError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_error(status: u16, body: &str) -> StatusError {
        StatusError::new(status, ErrorResponse::from_body(body))
    }

    #[test]
    fn test_reason_and_message() {
        let err = status_error(402, r#"{"reason":"insufficient_funds","message":"try again"}"#);
        assert_eq!(err.to_string(), "Error 402: insufficient_funds try again");
    }

    #[test]
    fn test_error_only() {
        let err = status_error(401, r#"{"error":"Unauthorized"}"#);
        assert_eq!(err.to_string(), "Error 401: Unauthorized");
    }

    #[test]
    fn test_all_fields_in_fixed_order() {
        let err = status_error(
            422,
            r#"{"status":422,"error":"!","message":"Order is not valid","reason":"OrderIsNotValid"}"#,
        );
        assert_eq!(err.to_string(), "Error 422: OrderIsNotValid Order is not valid!");
    }

    #[test]
    fn test_unparsable_body() {
        let err = status_error(502, "<html>Bad Gateway</html>");
        assert_eq!(err.reason, "");
        assert_eq!(err.to_string(), "Error 502:");
    }

    #[test]
    fn test_mistyped_field_keeps_the_rest() {
        let err = status_error(
            422,
            r#"{"reason":"OrderIsNotValid","message":"Order is not valid","error":{"price":["is invalid"]}}"#,
        );
        assert_eq!(err.reason, "OrderIsNotValid");
        assert_eq!(err.error, "");
        assert_eq!(err.to_string(), "Error 422: OrderIsNotValid Order is not valid");

        let err = status_error(400, r#"{"reason":7,"message":null,"error":"Bad request"}"#);
        assert_eq!(err.to_string(), "Error 400: Bad request");
    }

    #[test]
    fn test_api_error_display_is_status_message() {
        let err = ApiError::Status(status_error(404, r#"{"reason":"OrderNotFound","message":"Order does not exist"}"#));
        assert_eq!(err.to_string(), "Error 404: OrderNotFound Order does not exist");
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_timeout());
    }
}
