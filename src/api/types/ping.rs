//! Ping endpoint types.

use serde::{Deserialize, Serialize};

/// Expected value of the `ping` field.
pub const PONG: &str = "pong";

/// Response for GET /ping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingResponse {
    #[serde(default)]
    pub ping: String,
    /// Server time, as sent by the API
    #[serde(default)]
    pub time: Option<String>,
}

impl PingResponse {
    /// Whether the service answered `"pong"`.
    pub fn is_pong(&self) -> bool {
        self.ping == PONG
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pong() {
        let response: PingResponse =
            serde_json::from_str(r#"{"ping":"pong","time":"2014-11-03T13:07:28+00:00"}"#).unwrap();
        assert!(response.is_pong());
        assert_eq!(response.time.as_deref(), Some("2014-11-03T13:07:28+00:00"));
    }

    #[test]
    fn test_not_pong() {
        let response: PingResponse = serde_json::from_str(r#"{"ping":"PONG"}"#).unwrap();
        assert!(!response.is_pong());

        let response: PingResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(!response.is_pong());
    }
}
