//! API request and response types for the CoinGate REST API.

pub mod order;
pub mod ping;

// Re-export all types for convenience
pub use order::*;
pub use ping::*;
