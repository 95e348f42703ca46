use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use woo_cart_backend::cart::{AppState, OrderRepository, WooOrderRepository};
use woo_cart_backend::config::WooConfig;
use woo_cart_backend::router::create_app_router;
use woo_cart_backend::woo::WooClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Wire the upstream client explicitly from configuration; there is no
    // ambient global client.
    let config = WooConfig::from_env()?;
    let repo: Arc<dyn OrderRepository> = Arc::new(WooOrderRepository::new(WooClient::new(config)));
    let state = Arc::new(AppState::new(repo));
    let app = create_app_router(state);

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "8000".to_string())
        .parse()?;
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("cart backend listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
