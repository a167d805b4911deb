//! Payment service entry point.

use std::sync::Arc;

use api::config::Config;
use api::routes::pay::AppState;
use checkout::CheckoutService;
use clients::{HttpCartClient, HttpPaymentGateway, HttpUserClient};
use publisher::{DurablePublisher, LapinTransport};
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

#[tokio::main]
async fn main() {
    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Install Prometheus metrics recorder
    let prometheus_builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    let metrics_handle = prometheus_builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Load configuration and build collaborators
    let config = Config::from_env();
    tracing::info!(gateway = %config.payment_gateway, "payment gateway configured");

    let http = reqwest::Client::new();
    let users = HttpUserClient::new(http.clone(), config.user_base_url());
    let carts = HttpCartClient::new(http.clone(), config.cart_base_url());
    let gateway = HttpPaymentGateway::new(http, config.payment_gateway.clone());

    // 4. Publisher: connection is lazy, nothing is opened until the
    // first pay request.
    let publisher = Arc::new(DurablePublisher::new(LapinTransport::new(config.amqp_uri())));

    let checkout = CheckoutService::new(users, carts, gateway, publisher.clone())
        .with_payment_delay(config.payment_delay());
    let state = Arc::new(AppState { checkout });

    // 5. Build the application
    let app = api::create_app(state, metrics_handle);

    // 6. Start server
    let addr = config.addr();
    tracing::info!(%addr, "starting payment service");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    if let Err(err) = publisher.close().await {
        tracing::warn!(error = %err, "failed to close queue connection");
    }
    tracing::info!("server shut down gracefully");
}
