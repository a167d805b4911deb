//! HTTP surface for the payment service.
//!
//! Exposes the pay endpoint plus health and Prometheus metrics, with
//! structured logging (tracing) on every request.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use clients::{CartClient, PaymentGateway, UserClient};
use metrics_exporter_prometheus::PrometheusHandle;
use publisher::OrderPublisher;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::pay::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<U, C, G, P>(
    state: Arc<AppState<U, C, G, P>>,
    metrics_handle: PrometheusHandle,
) -> Router
where
    U: UserClient + 'static,
    C: CartClient + 'static,
    G: PaymentGateway + 'static,
    P: OrderPublisher + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/pay/{user_id}", post(routes::pay::pay::<U, C, G, P>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
