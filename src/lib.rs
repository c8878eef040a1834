//! # CoinGate Rust SDK
//!
//! A Rust SDK for the [CoinGate](https://coingate.com) payment gateway.
//!
//! ## Modules
//!
//! - [`api`]: signed REST API client (create/get/list orders, ping)
//! - [`callback`]: parser for the payment callbacks CoinGate posts to your server
//! - [`auth`]: the request-signing scheme, usable without the HTTP client
//! - [`config`]: application credentials and environment selection
//!
//! Plus a shared module:
//! - [`shared`]: decimal and serde helpers
//!
//! ## Quick Start - REST API
//!
//! ```rust,ignore
//! use coingate::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Sandbox credentials from https://sandbox.coingate.com
//!     let client = CoingateClient::new(ClientConfig::new(1015, "api_key", "api_secret", true))?;
//!
//!     let order = client
//!         .create_order(
//!             &CreateOrderRequest::new("10.01", "USD", "BTC")
//!                 .with_order_id("ORDER-1415020039")
//!                 .with_callback_url("https://shop.example/payments/callback"),
//!         )
//!         .await?;
//!     println!("Order {} - pay at {}", order.id, order.payment_url);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Quick Start - Callbacks
//!
//! ```rust,ignore
//! use coingate::callback::parse_callback;
//!
//! let notification = parse_callback(content_type, Some(&body))?;
//! if notification.order_status().is_paid() {
//!     // Verify with client.get_order(notification.id) before shipping.
//! }
//! ```

// ============================================================================
// MODULES
// ============================================================================

/// Shared utilities used by the API types and the callback parser.
pub mod shared;

/// Network URL constants and environment selection.
pub mod network;

/// Request signing (HMAC-SHA256) and nonce generation.
pub mod auth;

/// Client configuration and credentials.
pub mod config;

/// REST API module. Types are always available; the client requires the `http` feature.
pub mod api;

/// Payment callback (webhook) parsing.
pub mod callback;

pub use config::{ClientConfig, ConfigError};
pub use network::Environment;

// ============================================================================
// PRELUDE
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use coingate::prelude::*;
/// ```
pub mod prelude {
    // API types
    pub use crate::api::{
        CreateOrderRequest, ListOrdersParams, Order, OrderStatus, OrdersPage, PingResponse,
    };

    // Client (conditionally exported)
    #[cfg(feature = "http")]
    pub use crate::api::{ApiError, ApiResult, CoingateClient, CoingateClientBuilder, StatusError};

    // Callbacks
    pub use crate::callback::{parse_callback, CallbackError, CallbackNotification};

    // Configuration and network
    pub use crate::config::{ClientConfig, ConfigError};
    pub use crate::network::{Environment, LIVE_API_URL, SANDBOX_API_URL};

    // Signing
    pub use crate::auth::{sign, NonceGenerator};

    // Shared utilities
    pub use crate::shared::parse_decimal;
}
