//! Payment callbacks (webhooks) sent by CoinGate.
//!
//! When an order changes status CoinGate POSTs an
//! `application/x-www-form-urlencoded` body to the order's `callback_url`:
//!
//! ```text
//! id=343&order_id=ORDER-1415020039&status=paid&price=1050.99&currency=USD
//! &receive_currency=EUR&receive_amount=926.73&btc_amount=4.81849315
//! &created_at=2014-11-03T13:07:28%2B03:00
//! ```
//!
//! Only a malformed body is an error. Individual fields are best-effort: a
//! missing or non-numeric `id` becomes `0`, a missing or unparsable
//! `created_at` becomes `None`, and bytes that are not UTF-8 are replaced
//! with U+FFFD.
//!
//! Callbacks are **not** authenticated. Anyone who knows the callback URL can
//! post one, so confirm the status with
//! [`CoingateClient::get_order`](crate::api::CoingateClient::get_order)
//! before releasing goods.

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::types::OrderStatus;
use crate::shared::parse_decimal;

/// Content type of callback bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Largest form body that will be parsed (10 MiB).
pub const MAX_FORM_BODY: usize = 10 << 20;

/// Layout of `created_at`: RFC 3339 with a numeric `±HH:MM` offset, e.g.
/// `2014-11-03T13:07:28+03:00`. Fractional seconds are accepted.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

/// Callback parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallbackError {
    /// The request had no body at all
    #[error("Form process error: missing form body")]
    MissingBody,

    /// The body is not a valid URL-encoded form
    #[error("Form process error: {0}")]
    MalformedForm(String),
}

/// A status notification for one order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackNotification {
    /// CoinGate order ID
    pub id: i64,
    /// Merchant's own order ID
    pub order_id: String,
    /// New order status (e.g. `paid`)
    pub status: String,
    /// Price as decimal string
    pub price: String,
    /// Pricing currency
    pub currency: String,
    /// Currency the merchant receives
    pub receive_currency: String,
    /// Amount the merchant receives, as decimal string
    pub receive_amount: String,
    /// Amount paid in crypto, as decimal string
    pub btc_amount: String,
    /// Order creation time
    pub created_at: Option<DateTime<FixedOffset>>,
}

impl CallbackNotification {
    /// Parse a URL-encoded form body.
    ///
    /// # Errors
    ///
    /// Returns [`CallbackError::MalformedForm`] if the body contains an invalid
    /// percent escape or exceeds [`MAX_FORM_BODY`].
    pub fn from_form(body: &[u8]) -> Result<Self, CallbackError> {
        if body.len() > MAX_FORM_BODY {
            return Err(CallbackError::MalformedForm(format!(
                "body too large ({} bytes)",
                body.len()
            )));
        }

        validate_form(body)?;

        let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)
            .map_err(|e| CallbackError::MalformedForm(e.to_string()))?;

        Ok(Self::from_pairs(&pairs))
    }

    /// Build a notification from decoded form pairs. The first value of each
    /// key wins; unknown keys are ignored.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let field = |name: &str| {
            pairs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone())
                .unwrap_or_default()
        };

        Self {
            id: field("id").trim().parse().unwrap_or_default(),
            order_id: field("order_id"),
            status: field("status"),
            price: field("price"),
            currency: field("currency"),
            receive_currency: field("receive_currency"),
            receive_amount: field("receive_amount"),
            btc_amount: field("btc_amount"),
            created_at: parse_created_at(&field("created_at")),
        }
    }

    /// `status` as an [`OrderStatus`].
    pub fn order_status(&self) -> OrderStatus {
        OrderStatus::from(self.status.as_str())
    }

    pub fn price_decimal(&self) -> Option<Decimal> {
        parse_decimal(&self.price)
    }

    pub fn receive_amount_decimal(&self) -> Option<Decimal> {
        parse_decimal(&self.receive_amount)
    }

    pub fn btc_amount_decimal(&self) -> Option<Decimal> {
        parse_decimal(&self.btc_amount)
    }
}

/// Parse an inbound callback request.
///
/// * `content_type` - the request's `Content-Type` header, if any
/// * `body` - the request body; `None` when the request had none
///
/// Only `application/x-www-form-urlencoded` bodies are read. Any other
/// content type yields an empty notification, the same as a form with no
/// recognised fields.
///
/// Query parameters of the callback URL are not merged in: a value such as
/// `?order=42` placed in `callback_url` has to be read from the request URI
/// by the caller.
///
/// # Errors
///
/// [`CallbackError::MissingBody`] if there is no body, or
/// [`CallbackError::MalformedForm`] if the form cannot be decoded.
pub fn parse_callback(
    content_type: Option<&str>,
    body: Option<&[u8]>,
) -> Result<CallbackNotification, CallbackError> {
    let body = body.ok_or(CallbackError::MissingBody)?;

    if !content_type.is_some_and(is_form_content_type) {
        tracing::debug!(?content_type, "Callback is not a form, no fields read");
        return Ok(CallbackNotification::default());
    }

    let notification = CallbackNotification::from_form(body)?;
    tracing::debug!(
        id = notification.id,
        status = %notification.status,
        "Parsed CoinGate callback"
    );
    Ok(notification)
}

/// Whether a `Content-Type` value denotes a URL-encoded form (parameters ignored).
pub fn is_form_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(str::trim)
        .is_some_and(|media_type| media_type.eq_ignore_ascii_case(FORM_CONTENT_TYPE))
}

fn parse_created_at(value: &str) -> Option<DateTime<FixedOffset>> {
    if !has_colon_offset(value) {
        return None;
    }
    DateTime::parse_from_str(value, CREATED_AT_FORMAT).ok()
}

/// `%:z` also takes `+0300`; the offset must be written `+03:00`.
fn has_colon_offset(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() >= 6
        && matches!(bytes[bytes.len() - 6], b'+' | b'-')
        && bytes[bytes.len() - 3] == b':'
}

/// Reject bodies with bad `%` escapes. Everything else decodes, lossily if
/// need be.
fn validate_form(body: &[u8]) -> Result<(), CallbackError> {
    for pair in body.split(|b| *b == b'&') {
        for component in pair.splitn(2, |b| *b == b'=') {
            validate_component(component)?;
        }
    }
    Ok(())
}

fn validate_component(raw: &[u8]) -> Result<(), CallbackError> {
    let mut i = 0;
    while i < raw.len() {
        if raw[i] == b'%' {
            let valid = raw
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                let end = (i + 3).min(raw.len());
                return Err(CallbackError::MalformedForm(format!(
                    "invalid URL escape \"{}\"",
                    String::from_utf8_lossy(&raw[i..end])
                )));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}
