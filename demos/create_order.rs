//! Create a sandbox order and print its payment URL.
//!
//! Reads `COINGATE_APP_ID`, `COINGATE_API_KEY`, `COINGATE_API_SECRET` and
//! `COINGATE_SANDBOX` from the environment or a `.env` file.
//!
//! ```text
//! cargo run --example create_order -- 10.01 USD BTC
//! ```

use coingate::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let price = args.next().unwrap_or_else(|| "10.01".to_string());
    let currency = args.next().unwrap_or_else(|| "USD".to_string());
    let receive_currency = args.next().unwrap_or_else(|| "BTC".to_string());

    let config = ClientConfig::from_env()?;
    let client = CoingateClient::new(config)?;
    tracing::info!(base_url = client.base_url(), "Using CoinGate API");

    if !client.ping().await {
        return Err("CoinGate API did not answer ping".into());
    }

    let order = client
        .create_order(
            &CreateOrderRequest::new(price, currency, receive_currency)
                .with_title("Demo order")
                .with_description("Created by the create_order demo"),
        )
        .await?;

    println!("Order {} ({})", order.id, order.status);
    println!("  price:   {} {}", order.price, order.currency);
    println!("  pay at:  {}", order.payment_url);
    if let Some(expire_at) = order.expire_at {
        println!("  expires: {}", expire_at);
    }

    let fetched = client.get_order(order.id).await?;
    println!("Fetched back with status {}", fetched.status);

    Ok(())
}
