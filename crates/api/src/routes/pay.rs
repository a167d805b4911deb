//! The pay endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use checkout::CheckoutService;
use clients::{CartClient, PaymentGateway, UserClient};
use domain::Cart;
use publisher::OrderPublisher;
use serde::Serialize;

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<U, C, G, P> {
    pub checkout: CheckoutService<U, C, G, P>,
}

#[derive(Serialize)]
pub struct PayResponse {
    pub orderid: String,
}

/// POST /pay/{user_id} — run the pay flow for the submitted cart.
#[tracing::instrument(skip(state, cart))]
pub async fn pay<U, C, G, P>(
    State(state): State<Arc<AppState<U, C, G, P>>>,
    Path(user_id): Path<String>,
    Json(cart): Json<Cart>,
) -> Result<Json<PayResponse>, ApiError>
where
    U: UserClient,
    C: CartClient,
    G: PaymentGateway,
    P: OrderPublisher,
{
    tracing::info!("payment requested");
    let orderid = state.checkout.pay(&user_id, cart).await?;
    Ok(Json(PayResponse {
        orderid: orderid.to_string(),
    }))
}
