//! Integration tests for the pay flow against in-memory collaborators.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use checkout::{CheckoutError, CheckoutService};
use clients::{InMemoryCartClient, InMemoryPaymentGateway, InMemoryUserClient};
use domain::{Cart, CartItem, SHIPPING_SKU};
use publisher::{InMemoryPublisher, PublishError};

struct Fixture {
    users: InMemoryUserClient,
    carts: InMemoryCartClient,
    gateway: InMemoryPaymentGateway,
    publisher: Arc<InMemoryPublisher>,
}

impl Fixture {
    fn new() -> Self {
        Self {
            users: InMemoryUserClient::new(),
            carts: InMemoryCartClient::new(),
            gateway: InMemoryPaymentGateway::new(),
            publisher: Arc::new(InMemoryPublisher::new()),
        }
    }

    fn service(
        &self,
    ) -> CheckoutService<
        InMemoryUserClient,
        InMemoryCartClient,
        InMemoryPaymentGateway,
        InMemoryPublisher,
    > {
        CheckoutService::new(
            self.users.clone(),
            self.carts.clone(),
            self.gateway.clone(),
            self.publisher.clone(),
        )
    }
}

fn valid_cart() -> Cart {
    Cart::new(
        vec![CartItem::new("WATSON", 2), CartItem::new(SHIPPING_SKU, 1)],
        50.0,
    )
}

#[tokio::test]
async fn unknown_user_happy_path_skips_order_history() {
    let fx = Fixture::new();
    let service = fx.service();

    let orderid = service.pay("ghost", valid_cart()).await.unwrap();

    let published = fx.publisher.published_orders();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].orderid, orderid);
    assert_eq!(published[0].user, "ghost");
    assert_eq!(fx.users.history_count(), 0);
    assert!(fx.carts.was_deleted("ghost"));
}

#[tokio::test]
async fn known_user_gets_order_history() {
    let fx = Fixture::new();
    fx.users.register("alice");
    let service = fx.service();

    let orderid = service.pay("alice", valid_cart()).await.unwrap();

    assert_eq!(fx.users.history_for("alice"), vec![orderid]);
    assert!(fx.carts.was_deleted("alice"));
}

#[tokio::test]
async fn cart_without_shipping_is_rejected_before_any_side_effect() {
    let fx = Fixture::new();
    let service = fx.service();
    let cart = Cart::new(vec![CartItem::new("WATSON", 2)], 9999.0);

    let err = service.pay("ghost", cart).await.unwrap_err();

    assert!(matches!(err, CheckoutError::Cart(_)));
    assert_eq!(fx.gateway.call_count(), 0);
    assert_eq!(fx.publisher.published_count(), 0);
    assert!(!fx.carts.was_deleted("ghost"));
}

#[tokio::test]
async fn zero_total_cart_is_rejected() {
    let fx = Fixture::new();
    let service = fx.service();
    let cart = Cart::new(vec![CartItem::new(SHIPPING_SKU, 1)], 0.0);

    let err = service.pay("ghost", cart).await.unwrap_err();

    assert!(matches!(err, CheckoutError::Cart(_)));
    assert_eq!(fx.publisher.published_count(), 0);
}

#[tokio::test]
async fn user_check_transport_failure_is_fatal() {
    let fx = Fixture::new();
    fx.users.set_fail_on_check(true);
    let service = fx.service();

    let err = service.pay("alice", valid_cart()).await.unwrap_err();

    assert!(matches!(err, CheckoutError::Upstream(_)));
    assert!(err.upstream_status().is_none());
    assert_eq!(fx.gateway.call_count(), 0);
}

#[tokio::test]
async fn declined_gateway_propagates_its_status() {
    let fx = Fixture::new();
    fx.gateway.set_fail_status(Some(402));
    let service = fx.service();

    let err = service.pay("ghost", valid_cart()).await.unwrap_err();

    assert_eq!(err.upstream_status(), Some(402));
    assert_eq!(err.to_string(), "payment error");
    assert_eq!(fx.publisher.published_count(), 0);
}

#[tokio::test]
async fn publish_failure_is_fatal_and_skips_cart_delete() {
    let fx = Fixture::new();
    fx.publisher
        .fail_next_with(PublishError::Broker("exchange gone".to_string()));
    let service = fx.service();

    let err = service.pay("ghost", valid_cart()).await.unwrap_err();

    assert!(matches!(err, CheckoutError::Publish(_)));
    assert!(!fx.carts.was_deleted("ghost"));
}

#[tokio::test]
async fn cart_delete_failure_fails_the_request_with_the_order_already_queued() {
    let fx = Fixture::new();
    fx.carts.set_fail_status(Some(500));
    let service = fx.service();

    let err = service.pay("ghost", valid_cart()).await.unwrap_err();

    assert_eq!(err.upstream_status(), Some(500));
    // the order went out before the delete was attempted
    assert_eq!(fx.publisher.published_count(), 1);
}

#[tokio::test]
async fn order_history_transport_failure_is_fatal() {
    let fx = Fixture::new();
    fx.users.register("alice");
    fx.users.set_fail_on_history(true);
    let service = fx.service();

    let err = service.pay("alice", valid_cart()).await.unwrap_err();

    assert!(matches!(err, CheckoutError::Upstream(_)));
    assert_eq!(fx.publisher.published_count(), 1);
    assert!(!fx.carts.was_deleted("alice"));
}

#[tokio::test(start_paused = true)]
async fn payment_delay_applies_to_every_request() {
    let fx = Fixture::new();
    let service = fx.service().with_payment_delay(Duration::from_millis(200));

    let start = tokio::time::Instant::now();
    service.pay("ghost", valid_cart()).await.unwrap();
    service.pay("ghost", valid_cart()).await.unwrap();

    assert!(start.elapsed() >= Duration::from_millis(400));
}

#[tokio::test]
async fn order_ids_do_not_collide_across_many_payments() {
    let fx = Fixture::new();
    let service = fx.service();

    let mut seen = HashSet::new();
    for _ in 0..10_000 {
        let orderid = service.pay("ghost", valid_cart()).await.unwrap();
        assert!(seen.insert(orderid), "duplicate order id generated");
    }
}
