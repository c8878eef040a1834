//! Order-related types for the CoinGate REST API.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::shared::parse_decimal;
use crate::shared::serde_util::{lenient_i64, lenient_opt_string, lenient_string};

/// Default page for GET /orders.
pub const DEFAULT_PAGE: i64 = 1;

/// Default page size for GET /orders.
pub const DEFAULT_PER_PAGE: i64 = 10;

/// Default sort for GET /orders.
pub const DEFAULT_SORT: &str = "created_at_desc";

/// Order status enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order created, waiting for the buyer
    New,
    /// Buyer selected a currency, waiting for the payment
    Pending,
    /// Payment seen, waiting for confirmations
    Confirming,
    /// Payment confirmed
    Paid,
    /// Payment rejected (e.g. underpaid)
    Invalid,
    /// Buyer did not pay in time
    Expired,
    /// Buyer canceled the order
    Canceled,
    /// Payment returned to the buyer
    Refunded,
    /// Status this client does not know about
    #[default]
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Pending => "pending",
            Self::Confirming => "confirming",
            Self::Paid => "paid",
            Self::Invalid => "invalid",
            Self::Expired => "expired",
            Self::Canceled => "canceled",
            Self::Refunded => "refunded",
            Self::Unknown => "unknown",
        }
    }

    /// Whether the order can no longer change status.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            Self::Paid | Self::Invalid | Self::Expired | Self::Canceled | Self::Refunded
        )
    }

    pub fn is_paid(&self) -> bool {
        *self == Self::Paid
    }
}

impl From<&str> for OrderStatus {
    fn from(value: &str) -> Self {
        match value {
            "new" => Self::New,
            "pending" => Self::Pending,
            "confirming" => Self::Confirming,
            "paid" => Self::Paid,
            "invalid" => Self::Invalid,
            "expired" => Self::Expired,
            "canceled" => Self::Canceled,
            "refunded" => Self::Refunded,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order returned by POST /orders and GET /orders/{id}.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// CoinGate order ID
    #[serde(default, deserialize_with = "lenient_i64::deserialize")]
    pub id: i64,
    /// Merchant's own order ID
    #[serde(default, deserialize_with = "lenient_opt_string::deserialize")]
    pub order_id: Option<String>,
    /// Order status
    #[serde(default)]
    pub status: OrderStatus,
    /// Price as decimal string, in `currency`
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    pub price: String,
    /// Pricing currency (e.g. `USD`)
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    pub currency: String,
    /// Currency the merchant receives
    #[serde(default, deserialize_with = "lenient_opt_string::deserialize")]
    pub receive_currency: Option<String>,
    /// Amount the merchant receives, as decimal string
    #[serde(default, deserialize_with = "lenient_opt_string::deserialize")]
    pub receive_amount: Option<String>,
    /// Amount the buyer pays in crypto, as decimal string
    #[serde(default, deserialize_with = "lenient_opt_string::deserialize")]
    pub btc_amount: Option<String>,
    /// Crypto address the buyer pays to
    #[serde(default, deserialize_with = "lenient_opt_string::deserialize")]
    pub bitcoin_address: Option<String>,
    /// Payment URI (`bitcoin:...?amount=...`)
    #[serde(default, deserialize_with = "lenient_opt_string::deserialize")]
    pub bitcoin_uri: Option<String>,
    /// Hosted invoice page for the buyer
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    pub payment_url: String,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: Option<DateTime<FixedOffset>>,
    /// Expiration timestamp
    #[serde(default)]
    pub expire_at: Option<DateTime<FixedOffset>>,
}

impl Order {
    /// `price` as a decimal.
    pub fn price_decimal(&self) -> Option<Decimal> {
        parse_decimal(&self.price)
    }

    /// `btc_amount` as a decimal.
    pub fn btc_amount_decimal(&self) -> Option<Decimal> {
        self.btc_amount.as_deref().and_then(parse_decimal)
    }

    /// `receive_amount` as a decimal.
    pub fn receive_amount_decimal(&self) -> Option<Decimal> {
        self.receive_amount.as_deref().and_then(parse_decimal)
    }
}

/// Request for POST /orders.
///
/// `price`, `currency` and `receive_currency` are required by the API; the
/// remaining fields are sent only when set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    /// Merchant's own order ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Price as decimal string (e.g. `"10.01"`)
    pub price: String,
    /// Pricing currency (e.g. `USD`)
    pub currency: String,
    /// Currency to receive (e.g. `BTC`, `EUR`)
    pub receive_currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Where CoinGate posts status callbacks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    /// Where the buyer goes after canceling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<String>,
    /// Where the buyer goes after paying
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_url: Option<String>,
}

impl CreateOrderRequest {
    /// Create a request with the required fields.
    pub fn new(
        price: impl Into<String>,
        currency: impl Into<String>,
        receive_currency: impl Into<String>,
    ) -> Self {
        Self {
            price: price.into(),
            currency: currency.into(),
            receive_currency: receive_currency.into(),
            ..Default::default()
        }
    }

    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }

    pub fn with_cancel_url(mut self, url: impl Into<String>) -> Self {
        self.cancel_url = Some(url.into());
        self
    }

    pub fn with_success_url(mut self, url: impl Into<String>) -> Self {
        self.success_url = Some(url.into());
        self
    }

    /// Form fields in wire order, skipping unset optional fields.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let optional = [
            ("title", &self.title),
            ("description", &self.description),
            ("callback_url", &self.callback_url),
            ("cancel_url", &self.cancel_url),
            ("success_url", &self.success_url),
        ];

        let mut fields = Vec::with_capacity(4 + optional.len());
        if let Some(order_id) = &self.order_id {
            fields.push(("order_id", order_id.clone()));
        }
        fields.push(("price", self.price.clone()));
        fields.push(("currency", self.currency.clone()));
        fields.push(("receive_currency", self.receive_currency.clone()));
        fields.extend(
            optional
                .into_iter()
                .filter_map(|(name, value)| value.clone().map(|v| (name, v))),
        );
        fields
    }
}

/// Query parameters for GET /orders.
///
/// Out-of-range values are never rejected: [`ListOrdersParams::normalized`]
/// replaces them with the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOrdersParams {
    /// Page size, must be > 0
    pub per_page: i64,
    /// Page number, starting at 1
    pub page: i64,
    /// Sort order (e.g. `created_at_desc`, `created_at_asc`)
    pub sort: String,
}

impl Default for ListOrdersParams {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            page: DEFAULT_PAGE,
            sort: DEFAULT_SORT.to_string(),
        }
    }
}

impl ListOrdersParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    pub fn with_per_page(mut self, per_page: i64) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = sort.into();
        self
    }

    /// Replace invalid values with defaults: `page < 1` → 1, `per_page <= 0`
    /// → 10, empty `sort` → `created_at_desc`.
    pub fn normalized(mut self) -> Self {
        if self.per_page <= 0 {
            self.per_page = DEFAULT_PER_PAGE;
        }
        if self.page < 1 {
            self.page = DEFAULT_PAGE;
        }
        if self.sort.is_empty() {
            self.sort = DEFAULT_SORT.to_string();
        }
        self
    }
}

/// Response for GET /orders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrdersPage {
    #[serde(default, deserialize_with = "lenient_i64::deserialize")]
    pub current_page: i64,
    #[serde(default, deserialize_with = "lenient_i64::deserialize")]
    pub per_page: i64,
    #[serde(default, deserialize_with = "lenient_i64::deserialize")]
    pub total_orders: i64,
    #[serde(default, deserialize_with = "lenient_i64::deserialize")]
    pub total_pages: i64,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl OrdersPage {
    /// Whether a page after this one exists.
    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }
}
