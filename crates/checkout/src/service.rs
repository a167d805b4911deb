//! The pay flow: validate, charge, queue, record, clear.

use std::sync::Arc;
use std::time::Duration;

use clients::{CartClient, PaymentGateway, UserClient};
use common::OrderId;
use domain::{Cart, Order};
use publisher::{Headers, OrderPublisher};

use crate::error::CheckoutError;

/// Orchestrates one payment request across the collaborators and the
/// order publisher.
///
/// Steps run strictly in sequence; the first failure short-circuits.
/// Note the ordering at the tail: the order is queued to the broker
/// before the cart is deleted, and a failed cart delete still fails the
/// whole request even though the order is already irrevocably queued.
/// That asymmetry is kept as-is.
pub struct CheckoutService<U, C, G, P> {
    users: U,
    carts: C,
    gateway: G,
    publisher: Arc<P>,
    payment_delay: Duration,
}

impl<U, C, G, P> CheckoutService<U, C, G, P>
where
    U: UserClient,
    C: CartClient,
    G: PaymentGateway,
    P: OrderPublisher,
{
    /// Creates a checkout service with no artificial payment delay.
    pub fn new(users: U, carts: C, gateway: G, publisher: Arc<P>) -> Self {
        Self {
            users,
            carts,
            gateway,
            publisher,
            payment_delay: Duration::ZERO,
        }
    }

    /// Sets the artificial pre-publish delay. When non-zero it applies
    /// to every request; it is a load-testing knob, not a backoff.
    pub fn with_payment_delay(mut self, delay: Duration) -> Self {
        self.payment_delay = delay;
        self
    }

    /// Runs the pay flow for a user's cart and returns the new order id.
    #[tracing::instrument(skip(self, cart))]
    pub async fn pay(&self, user_id: &str, cart: Cart) -> Result<OrderId, CheckoutError> {
        tracing::info!(total = cart.total, items = cart.items.len(), "payment requested");

        // A non-200 answer means anonymous; only a transport failure is
        // fatal here.
        let known_user = self.users.check(user_id).await?;

        cart.validate()?;

        self.gateway.authorize().await?;

        let unit_count = cart.unit_count();
        metrics::counter!("sold_count").increment(unit_count);
        metrics::histogram!("units_sold").record(unit_count as f64);
        metrics::histogram!("cart_value").record(cart.total);

        let order = Order::new(user_id, cart);
        let orderid = order.orderid;
        tracing::info!(%orderid, "queueing order");

        if !self.payment_delay.is_zero() {
            tokio::time::sleep(self.payment_delay).await;
        }
        self.publisher.publish(&order, &Headers::new()).await?;

        if known_user {
            self.users
                .add_order_history(user_id, orderid, &order.cart)
                .await?;
        }

        self.carts.delete_cart(user_id).await?;

        Ok(orderid)
    }
}
