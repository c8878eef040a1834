//! CoinGate REST API client implementation.
//!
//! The [`CoingateClient`] signs every request with the application
//! credentials and maps responses into typed results.
//!
//! # Example
//!
//! ```rust,ignore
//! use coingate::api::{CoingateClient, CreateOrderRequest};
//! use coingate::ClientConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CoingateClient::new(ClientConfig::new(1015, "key", "secret", true))?;
//!
//!     if !client.ping().await {
//!         return Err("CoinGate is unreachable".into());
//!     }
//!
//!     let order = client
//!         .create_order(&CreateOrderRequest::new("10.01", "USD", "BTC"))
//!         .await?;
//!     println!("Pay at {}", order.payment_url);
//!
//!     Ok(())
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::error::{ApiError, ApiResult, ErrorResponse, StatusError};
use crate::api::types::*;
use crate::auth::{NonceGenerator, KEY_HEADER, NONCE_HEADER, SIGNATURE_HEADER};
use crate::config::ClientConfig;
use crate::network::{join_url, Environment};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Default `User-Agent` header.
const DEFAULT_USER_AGENT: &str = concat!("coingate-rs/", env!("CARGO_PKG_VERSION"));

/// Builder for configuring [`CoingateClient`].
#[derive(Debug, Clone)]
pub struct CoingateClientBuilder {
    config: ClientConfig,
    base_url: Option<String>,
    timeout: Duration,
    user_agent: String,
    default_headers: Vec<(String, String)>,
}

impl CoingateClientBuilder {
    /// Create a new builder for the given credentials.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            base_url: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            default_headers: Vec::new(),
        }
    }

    /// Switch between the live and sandbox APIs.
    pub fn environment(mut self, environment: Environment) -> Self {
        self.config = self.config.with_environment(environment);
        self
    }

    /// Shorthand for `environment(Environment::Sandbox)` / `Live`.
    pub fn sandbox(self, is_sandbox: bool) -> Self {
        self.environment(Environment::from_sandbox(is_sandbox))
    }

    /// Send requests to a different base URL (a proxy or a local mock server).
    ///
    /// Takes precedence over the environment's URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Set the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Add a default header to all requests.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if a header is invalid or the HTTP client cannot be initialized.
    pub fn build(self) -> ApiResult<CoingateClient> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        for (name, value) in self.default_headers {
            let header_name = HeaderName::try_from(name.as_str()).map_err(|e| {
                ApiError::InvalidParameter(format!("Invalid header name '{}': {}", name, e))
            })?;
            let header_value = HeaderValue::from_str(&value).map_err(|e| {
                ApiError::InvalidParameter(format!("Invalid header value for '{}': {}", name, e))
            })?;
            headers.insert(header_name, header_value);
        }

        // The API key travels in a header, so it must be a valid header value.
        HeaderValue::from_str(self.config.api_key())
            .map_err(|_| ApiError::InvalidParameter("API key is not a valid header value".to_string()))?;

        let http_client = Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .default_headers(headers)
            .build()?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| self.config.base_url().to_string());

        Ok(CoingateClient {
            http_client,
            base_url,
            config: Arc::new(self.config),
            nonces: Arc::new(NonceGenerator::new()),
        })
    }
}

/// CoinGate REST API client.
///
/// Cheap to clone; clones share the connection pool and the nonce sequence.
#[derive(Debug, Clone)]
pub struct CoingateClient {
    http_client: Client,
    base_url: String,
    config: Arc<ClientConfig>,
    nonces: Arc<NonceGenerator>,
}

impl CoingateClient {
    /// Create a new client with default settings (15s timeout).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        CoingateClientBuilder::new(config).build()
    }

    /// Create a new client builder for custom configuration.
    pub fn builder(config: ClientConfig) -> CoingateClientBuilder {
        CoingateClientBuilder::new(config)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    /// Start a request with the auth headers set.
    fn signed_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = join_url(&self.base_url, path);
        let nonce = self.nonces.next_nonce();

        tracing::debug!(%method, %url, nonce, "Sending CoinGate request");

        self.http_client
            .request(method, url)
            .header(NONCE_HEADER, nonce.to_string())
            .header(KEY_HEADER, self.config.api_key())
            .header(SIGNATURE_HEADER, self.config.sign(nonce))
    }

    /// Execute a GET request, sending `query` as URL parameters.
    async fn get<T, Q>(&self, path: &str, query: Option<&Q>) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let mut request = self.signed_request(Method::GET, path);
        if let Some(query) = query {
            request = request.query(query);
        }
        self.execute(request).await
    }

    /// Execute a POST request with a multipart form body.
    async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        fields: Vec<(&'static str, String)>,
    ) -> ApiResult<T> {
        let form = fields
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value));

        self.execute(self.signed_request(Method::POST, path).multipart(form))
            .await
    }

    /// Send the request and map the response.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request.send().await?;
        let status = response.status();

        if status != StatusCode::OK {
            return Err(Self::parse_error_response(response).await);
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            ApiError::Deserialize(format!("Failed to deserialize response: {}", e))
        })
    }

    /// Parse an error response into an ApiError.
    async fn parse_error_response(response: reqwest::Response) -> ApiError {
        let status = response.status();
        let error_response = match response.text().await {
            Ok(text) => ErrorResponse::from_body(&text),
            Err(e) => {
                tracing::warn!("Failed to read error response body: {}", e);
                ErrorResponse::default()
            }
        };

        let error = StatusError::new(status.as_u16(), error_response);
        tracing::debug!(status = error.status, error = %error, "CoinGate request failed");
        ApiError::Status(error)
    }

    // =========================================================================
    // Order endpoints
    // =========================================================================

    /// Create a new order.
    ///
    /// The request is sent as `multipart/form-data`.
    pub async fn create_order(&self, request: &CreateOrderRequest) -> ApiResult<Order> {
        self.post_form("/orders", request.form_fields()).await
    }

    /// Get an order by its CoinGate ID.
    pub async fn get_order(&self, id: i64) -> ApiResult<Order> {
        self.get(&format!("/orders/{}", id), None::<&()>).await
    }

    /// List orders, one page at a time.
    ///
    /// Invalid paging values are replaced by defaults (see
    /// [`ListOrdersParams::normalized`]).
    pub async fn list_orders(&self, params: ListOrdersParams) -> ApiResult<OrdersPage> {
        let params = params.normalized();
        self.get("/orders", Some(&params)).await
    }

    // =========================================================================
    // Health endpoints
    // =========================================================================

    /// Ping the API.
    ///
    /// Returns `true` only if the API answered `{"ping": "pong"}`. Never errors:
    /// transport failures, error statuses and malformed bodies all yield `false`.
    pub async fn ping(&self) -> bool {
        match self.get::<PingResponse, ()>("/ping", None).await {
            Ok(response) => response.is_pong(),
            Err(e) => {
                tracing::warn!(error = %e, "CoinGate ping failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientConfig {
        ClientConfig::new(1015, "WV5FGZRuoCstBiHayYXbp3", "ni6FmIUTxBSR8PK2JeDA5NVjpzc4tqZO", true)
    }

    #[test]
    fn test_client_creation() {
        let client = CoingateClient::new(config()).unwrap();
        assert_eq!(client.base_url(), "https://api-sandbox.coingate.com/v1");
        assert_eq!(client.config().application_id(), 1015);
    }

    #[test]
    fn test_client_live_environment() {
        let client = CoingateClient::builder(config()).sandbox(false).build().unwrap();
        assert_eq!(client.base_url(), "https://api.coingate.com/v1");
        assert_eq!(client.config().environment(), Environment::Live);
    }

    #[test]
    fn test_client_builder() {
        let client = CoingateClient::builder(config())
            .base_url("http://127.0.0.1:9999/v1/")
            .timeout_secs(60)
            .user_agent("shop/1.0")
            .header("X-Custom", "test")
            .build()
            .unwrap();

        // Base URL should have trailing slash removed
        assert_eq!(client.base_url(), "http://127.0.0.1:9999/v1");
    }

    #[test]
    fn test_client_builder_rejects_bad_header() {
        let result = CoingateClient::builder(config())
            .header("Bad Header", "value")
            .build();

        assert!(matches!(result, Err(ApiError::InvalidParameter(_))));
    }

    #[test]
    fn test_client_rejects_unsendable_api_key() {
        let result = CoingateClient::new(ClientConfig::new(1, "key\nwith newline", "secret", true));
        assert!(matches!(result, Err(ApiError::InvalidParameter(_))));
    }

    #[test]
    fn test_signed_request_headers() {
        let client = CoingateClient::new(config()).unwrap();
        let request = client
            .signed_request(Method::GET, "/ping")
            .build()
            .unwrap();

        assert_eq!(request.url().as_str(), "https://api-sandbox.coingate.com/v1/ping");

        let headers = request.headers();
        let nonce: i64 = headers[NONCE_HEADER].to_str().unwrap().parse().unwrap();
        assert_eq!(headers[KEY_HEADER], "WV5FGZRuoCstBiHayYXbp3");
        assert_eq!(
            headers[SIGNATURE_HEADER].to_str().unwrap(),
            client.config().sign(nonce)
        );
    }

    #[test]
    fn test_clones_share_nonce_sequence() {
        let client = CoingateClient::new(config()).unwrap();
        let clone = client.clone();

        let first = client.nonces.next_nonce();
        let second = clone.nonces.next_nonce();
        assert!(second > first);
    }
}
