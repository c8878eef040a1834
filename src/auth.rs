//! Request signing for the CoinGate API.
//!
//! Every API request carries three headers:
//!
//! - `Access-Nonce`: a strictly increasing integer (nanoseconds since the UNIX epoch)
//! - `Access-Key`: the API key
//! - `Access-Signature`: HMAC-SHA256 of `{nonce}{application_id}{api_key}` keyed
//!   with the API secret, hex encoded (lowercase)
//!
//! The message has no separators between its parts. Any deviation breaks
//! authentication against the real service.

use std::sync::atomic::{AtomicI64, Ordering};

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the request nonce.
pub const NONCE_HEADER: &str = "Access-Nonce";

/// Header carrying the API key.
pub const KEY_HEADER: &str = "Access-Key";

/// Header carrying the request signature.
pub const SIGNATURE_HEADER: &str = "Access-Signature";

/// Build the message that gets signed for a request.
///
/// # Returns
///
/// The concatenation of the decimal nonce, the decimal application id and the API key:
/// ```text
/// {nonce}{application_id}{api_key}
/// ```
pub fn signature_message(nonce: i64, application_id: i64, api_key: &str) -> String {
    format!("{}{}{}", nonce, application_id, api_key)
}

/// Compute the `Access-Signature` value for a request.
///
/// Deterministic for fixed inputs; always 64 lowercase hex characters.
pub fn sign(nonce: i64, application_id: i64, api_key: &str, api_secret: &str) -> String {
    let message = signature_message(nonce, application_id, api_key);

    let mut mac = HmacSha256::new_from_slice(api_secret.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(message.as_bytes());

    hex::encode(mac.finalize().into_bytes())
}

/// Current wall-clock time in nanoseconds since the UNIX epoch.
///
/// Returns 0 if the clock is outside the range representable in an `i64`.
pub fn clock_nanos() -> i64 {
    chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
}

/// Source of request nonces.
///
/// Nonces come from the wall clock, but two calls never return the same
/// value: if the clock has not advanced (or went backwards) the previous
/// nonce plus one is used instead.
#[derive(Debug, Default)]
pub struct NonceGenerator {
    last: AtomicI64,
}

impl NonceGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next nonce, strictly greater than every nonce returned before.
    pub fn next_nonce(&self) -> i64 {
        self.next_after(clock_nanos())
    }

    fn next_after(&self, now: i64) -> i64 {
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(last.saturating_add(1));
            match self
                .last
                .compare_exchange_weak(last, candidate, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return candidate,
                Err(actual) => last = actual,
            }
        }
    }
}
