//! Shared utilities used by the API types and the callback parser.

pub mod decimal;
pub mod serde_util;

pub use decimal::parse_decimal;
