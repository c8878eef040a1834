//! Network URL constants for the CoinGate SDK.

/// Production REST API base URL.
pub const LIVE_API_URL: &str = "https://api.coingate.com/v1";

/// Sandbox REST API base URL.
pub const SANDBOX_API_URL: &str = "https://api-sandbox.coingate.com/v1";

/// CoinGate environment a client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Environment {
    /// Real payments.
    #[default]
    Live,
    /// Isolated test environment.
    Sandbox,
}

impl Environment {
    /// Pick the environment from a sandbox flag.
    pub fn from_sandbox(is_sandbox: bool) -> Self {
        if is_sandbox {
            Self::Sandbox
        } else {
            Self::Live
        }
    }

    /// REST API base URL for this environment.
    pub fn api_url(self) -> &'static str {
        match self {
            Self::Live => LIVE_API_URL,
            Self::Sandbox => SANDBOX_API_URL,
        }
    }

    pub fn is_sandbox(self) -> bool {
        self == Self::Sandbox
    }
}

/// Join a base URL and an endpoint path with exactly one slash.
///
/// Leading and trailing slashes are trimmed from `path`.
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_urls() {
        assert_eq!(Environment::Live.api_url(), "https://api.coingate.com/v1");
        assert_eq!(
            Environment::Sandbox.api_url(),
            "https://api-sandbox.coingate.com/v1"
        );
        assert_eq!(Environment::from_sandbox(true), Environment::Sandbox);
        assert_eq!(Environment::from_sandbox(false), Environment::Live);
        assert_eq!(Environment::default(), Environment::Live);
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url(LIVE_API_URL, "/orders"), "https://api.coingate.com/v1/orders");
        assert_eq!(join_url(LIVE_API_URL, "orders/"), "https://api.coingate.com/v1/orders");
        assert_eq!(join_url("http://127.0.0.1:8080/", "//ping//"), "http://127.0.0.1:8080/ping");
        assert_eq!(join_url(SANDBOX_API_URL, "/orders/42"), "https://api-sandbox.coingate.com/v1/orders/42");
    }
}
