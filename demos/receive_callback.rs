//! Payment callback receiver.
//!
//! Listens for the form POSTs CoinGate sends to an order's `callback_url`
//! and logs each notification.
//!
//! ```text
//! cargo run --example receive_callback
//! curl -d 'id=343&status=paid&price=10.01&currency=USD' localhost:3000/payments/callback
//! ```

use std::net::SocketAddr;

use axum::{
    body::Bytes,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    routing::post,
    Router,
};
use coingate::callback::parse_callback;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

async fn payment_callback(headers: HeaderMap, body: Bytes) -> (StatusCode, String) {
    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());

    match parse_callback(content_type, Some(&body)) {
        Ok(notification) => {
            tracing::info!(
                id = notification.id,
                order_id = %notification.order_id,
                status = %notification.status,
                "Order status changed"
            );
            if notification.order_status().is_paid() {
                // Callbacks are unsigned. Confirm with get_order before fulfilling.
                tracing::info!(id = notification.id, "Order paid, awaiting confirmation via API");
            }
            (StatusCode::OK, "ok".to_string())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Rejected callback");
            (StatusCode::BAD_REQUEST, e.to_string())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,coingate=debug")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let app = Router::new().route("/payments/callback", post(payment_callback));

    tracing::info!("Listening for callbacks on http://{}/payments/callback", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
