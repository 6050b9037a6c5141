use std::sync::{Arc, Mutex};

use serde_json::{Value, json};
use textjoy_checkout::{
    AnalyticsHook, Checkout, CheckoutConfig, CheckoutError, CheckoutOptions, FieldUpdate, Order,
    PaymentToken, PurchaseEvent, PurchaseStatus, PurchaseSubmitter, SubmissionStatus,
};
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct RecordingAnalytics {
    events: Mutex<Vec<PurchaseEvent>>,
}

impl AnalyticsHook for RecordingAnalytics {
    fn track_purchase(&self, event: &PurchaseEvent) {
        self.events.lock().unwrap().push(*event);
    }
}

fn filled_checkout() -> Checkout {
    let mut checkout = Checkout::new(CheckoutOptions::subscription(), Some("Europe/London".into()));
    checkout.set(FieldUpdate::RecipientFirstName("Chloe".into()));
    checkout.set(FieldUpdate::RecipientPhoneNumber("+447400123456".into()));
    checkout.set(FieldUpdate::CustomerName("Sam Smith".into()));
    checkout
}

fn placed_order(checkout: &mut Checkout) -> Order {
    checkout.prepare_payment("pk_test_123").unwrap();
    checkout.place_order().unwrap()
}

fn token() -> PaymentToken {
    PaymentToken::new(json!({"id": "tok_visa", "email": "sam@example.com"}))
}

async fn endpoint_replying(template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/purchase"))
        .respond_with(template)
        .mount(&server)
        .await;
    server
}

async fn received_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|request| request.body_json::<Value>().unwrap())
        .collect()
}

#[tokio::test]
async fn succeeded_purchase_posts_order_and_tracks_analytics() {
    let server =
        endpoint_replying(ResponseTemplate::new(200).set_body_json(json!({"status": "succeeded"})))
            .await;
    let analytics = Arc::new(RecordingAnalytics::default());
    let submitter = PurchaseSubmitter::new(&CheckoutConfig::new(server.uri(), "pk_test_123"))
        .with_analytics(analytics.clone());

    let mut checkout = filled_checkout();
    let order = placed_order(&mut checkout);
    let status = submitter.submit(&order, token()).await;

    assert_eq!(status, PurchaseStatus::Succeeded);
    assert_eq!(checkout.complete(&status).unwrap(), SubmissionStatus::Succeeded);

    let bodies = received_bodies(&server).await;
    assert_eq!(bodies.len(), 1);
    let body = &bodies[0];
    assert_eq!(body["amount"], 299);
    assert_eq!(body["currency"], "GBP");
    assert_eq!(body["token"]["id"], "tok_visa");
    assert_eq!(body["metadata"]["recipientFirstName"], "Chloe");
    assert_eq!(body["metadata"]["recipientTimezone"], "Europe/London");
    assert_eq!(body["metadata"]["package"], "sixMonths");
    assert_eq!(body["metadata"]["collectionId"], "science");

    let key = Uuid::parse_str(body["idempotency_key"].as_str().unwrap()).unwrap();
    assert_eq!(key.get_version_num(), 4);

    let events = analytics.events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].value, 299);
    assert_eq!(events[0].currency.code(), "GBP");
}

#[tokio::test]
async fn succeeded_purchase_without_analytics_hook() {
    let server =
        endpoint_replying(ResponseTemplate::new(200).set_body_json(json!({"status": "succeeded"})))
            .await;
    let submitter = PurchaseSubmitter::new(&CheckoutConfig::new(server.uri(), "pk_test_123"));

    let mut checkout = filled_checkout();
    let order = placed_order(&mut checkout);

    assert_eq!(submitter.submit(&order, token()).await, PurchaseStatus::Succeeded);
}

#[tokio::test]
async fn failed_status_shows_apology() {
    let server =
        endpoint_replying(ResponseTemplate::new(200).set_body_json(json!({"status": "failed"})))
            .await;
    let analytics = Arc::new(RecordingAnalytics::default());
    let submitter = PurchaseSubmitter::new(&CheckoutConfig::new(server.uri(), "pk_test_123"))
        .with_analytics(analytics.clone());

    let mut checkout = filled_checkout();
    let order = placed_order(&mut checkout);
    let status = submitter.submit(&order, token()).await;

    assert_eq!(status, PurchaseStatus::Failed);
    assert_eq!(checkout.complete(&status).unwrap(), SubmissionStatus::Failed);
    assert_eq!(checkout.banner(), Some("Something went wrong... we're really sorry"));
    assert!(analytics.events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn transport_failure_resolves_to_failed() {
    // Nothing listens on the discard port.
    let submitter = PurchaseSubmitter::new(&CheckoutConfig::new("http://127.0.0.1:9", "pk_test_123"));

    let mut checkout = filled_checkout();
    let order = placed_order(&mut checkout);

    assert_eq!(submitter.submit(&order, token()).await, PurchaseStatus::Failed);
}

#[tokio::test]
async fn server_error_is_failed_and_reported_by_send() {
    let server = endpoint_replying(ResponseTemplate::new(502)).await;
    let submitter = PurchaseSubmitter::new(&CheckoutConfig::new(server.uri(), "pk_test_123"));

    let mut checkout = filled_checkout();
    let order = placed_order(&mut checkout);
    assert_eq!(submitter.submit(&order, token()).await, PurchaseStatus::Failed);

    let request = textjoy_checkout::PurchaseRequest::new(order.price, token(), order.metadata.clone());
    let err = submitter.send(&request).await.unwrap_err();
    assert!(matches!(err, CheckoutError::Endpoint(502)));
}

#[tokio::test]
async fn malformed_body_is_failed() {
    let server = endpoint_replying(ResponseTemplate::new(200).set_body_string("<html>oops</html>")).await;
    let submitter = PurchaseSubmitter::new(&CheckoutConfig::new(server.uri(), "pk_test_123"));

    let mut checkout = filled_checkout();
    let order = placed_order(&mut checkout);
    assert_eq!(submitter.submit(&order, token()).await, PurchaseStatus::Failed);

    let request = textjoy_checkout::PurchaseRequest::new(order.price, token(), order.metadata.clone());
    assert!(matches!(
        submitter.send(&request).await.unwrap_err(),
        CheckoutError::Decode(_)
    ));
}

#[tokio::test]
async fn unknown_status_is_returned_verbatim() {
    let server = endpoint_replying(
        ResponseTemplate::new(200).set_body_json(json!({"status": "requires_action"})),
    )
    .await;
    let submitter = PurchaseSubmitter::new(&CheckoutConfig::new(server.uri(), "pk_test_123"));

    let mut checkout = filled_checkout();
    let order = placed_order(&mut checkout);
    let status = submitter.submit(&order, token()).await;

    assert_eq!(status, PurchaseStatus::Other("requires_action".into()));
    assert_eq!(checkout.complete(&status).unwrap(), SubmissionStatus::Failed);
}

#[tokio::test]
async fn resubmission_uses_fresh_idempotency_key() {
    let server =
        endpoint_replying(ResponseTemplate::new(200).set_body_json(json!({"status": "failed"})))
            .await;
    let submitter = PurchaseSubmitter::new(&CheckoutConfig::new(server.uri(), "pk_test_123"));

    let mut checkout = filled_checkout();
    let order = placed_order(&mut checkout);
    submitter.submit(&order, token()).await;
    submitter.submit(&order, token()).await;

    let bodies = received_bodies(&server).await;
    assert_eq!(bodies.len(), 2);
    assert_ne!(bodies[0]["idempotency_key"], bodies[1]["idempotency_key"]);
    assert_eq!(bodies[0]["metadata"], bodies[1]["metadata"]);
}
