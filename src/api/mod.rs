//! REST API client module for CoinGate.
//!
//! This module provides a signed HTTP client for the CoinGate v1 REST API:
//! creating and fetching orders, listing orders, and pinging the service.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use coingate::api::{CoingateClient, ListOrdersParams};
//! use coingate::ClientConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CoingateClient::new(ClientConfig::from_env()?)?;
//!
//!     let page = client.list_orders(ListOrdersParams::new().with_per_page(25)).await?;
//!     println!("{} orders on {} pages", page.total_orders, page.total_pages);
//!
//!     let order = client.get_order(page.orders[0].id).await?;
//!     println!("Order {} is {}", order.id, order.status);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Client Configuration
//!
//! Use the builder pattern for custom configuration:
//!
//! ```rust,ignore
//! use coingate::api::CoingateClient;
//! use std::time::Duration;
//!
//! let client = CoingateClient::builder(config)
//!     .sandbox(true)
//!     .timeout(Duration::from_secs(30))
//!     .header("X-Custom-Header", "value")
//!     .build()?;
//! ```
//!
//! # Error Handling
//!
//! All methods return `ApiResult<T>` which is an alias for `Result<T, ApiError>`.
//! Error statuses carry whatever the API sent back:
//!
//! ```rust,ignore
//! use coingate::api::ApiError;
//!
//! match client.get_order(42).await {
//!     Ok(order) => println!("Found order {}", order.id),
//!     Err(ApiError::Status(e)) if e.status == 404 => println!("No such order: {}", e),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```
//!
//! There are no retries. A failed call returns immediately and the caller
//! decides what to do.

/// Request/response types. Always available, no HTTP stack required.
pub mod types;

#[cfg(feature = "http")]
pub mod client;
#[cfg(feature = "http")]
pub mod error;

// Re-export main types for convenience
#[cfg(feature = "http")]
pub use client::{CoingateClient, CoingateClientBuilder};
#[cfg(feature = "http")]
pub use error::{ApiError, ApiResult, ErrorResponse, StatusError};
pub use types::*;
