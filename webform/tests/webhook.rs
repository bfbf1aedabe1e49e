//! Webhook delivery against a mock collector

use std::time::Duration;

use example_webforms::customer_feedback;
use serde_json::json;
use webform::{DeliveryError, FormEvent, FormRenderer, MemoryDocument, RenderOptions};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mount(server: &MockServer) -> FormRenderer<MemoryDocument> {
    FormRenderer::new(
        MemoryDocument::with_container("survey"),
        "survey",
        customer_feedback(),
        RenderOptions::new().with_webhook(format!("{}/collect", server.uri())),
    )
}

fn fill_name(renderer: &mut FormRenderer<MemoryDocument>, name: &str) {
    let input = renderer
        .document()
        .elements_by_name(renderer.document().root(), "question-0")[0];
    renderer.document_mut().set_value(input, name);
}

#[tokio::test]
async fn test_submit_posts_answers_once() {
    let server = MockServer::start().await;
    let mut renderer = mount(&server);
    fill_name(&mut renderer, "Alice");
    let expected = renderer.answers().unwrap();

    Mock::given(method("POST"))
        .and(path("/collect"))
        .and(header("content-type", "application/json"))
        .and(body_json(&expected))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "received": true })))
        .expect(1)
        .mount(&server)
        .await;

    let submission = renderer.submit().unwrap();
    assert_eq!(submission.answers, expected);

    let response = submission.delivery.unwrap().outcome().await.unwrap();
    assert_eq!(response, json!({ "received": true }));
}

#[tokio::test]
async fn test_body_is_object_of_string_arrays() {
    let server = MockServer::start().await;
    let mut renderer = mount(&server);
    fill_name(&mut renderer, "Bob");

    Mock::given(method("POST"))
        .and(body_json(json!({
            "question-0": ["Bob"],
            "question-1": [""],
            "question-4": [""],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let delivery = renderer.submit().unwrap().delivery.unwrap();
    assert!(delivery.outcome().await.is_ok());
}

#[tokio::test]
async fn test_clear_never_posts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let mut renderer = mount(&server);
    fill_name(&mut renderer, "Carol");
    let clear = renderer.rendered().unwrap().clear;
    assert!(renderer.handle(FormEvent::Click(clear)).is_none());
    renderer.clear();

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_delivery_leaves_form_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&server)
        .await;

    let mut renderer = mount(&server);
    fill_name(&mut renderer, "Dave");
    let before = renderer.document().to_html();
    let mutations = renderer.document().mutation_count();

    let delivery = renderer.submit().unwrap().delivery.unwrap();
    let outcome = delivery.outcome().await;

    assert!(matches!(outcome, Err(DeliveryError::Decode { status: 500, .. })));
    assert_eq!(renderer.document().to_html(), before);
    assert_eq!(renderer.document().mutation_count(), mutations);
    assert_eq!(renderer.answers().unwrap().for_question(0).unwrap(), ["Dave"]);
}

#[tokio::test]
async fn test_error_status_with_json_body_is_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({ "error": "duplicate" })))
        .mount(&server)
        .await;

    let mut renderer = mount(&server);
    let outcome = renderer.submit().unwrap().delivery.unwrap().outcome().await;

    assert_eq!(outcome.unwrap(), json!({ "error": "duplicate" }));
}

#[tokio::test]
async fn test_repeated_submits_deliver_independently() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(2)
        .mount(&server)
        .await;

    let mut renderer = mount(&server);
    let first = renderer.handle(FormEvent::Submit).unwrap().delivery.unwrap();
    let second = renderer.handle(FormEvent::Submit).unwrap().delivery.unwrap();

    assert!(first.outcome().await.is_ok());
    assert!(second.outcome().await.is_ok());
}

#[tokio::test]
async fn test_cancelled_delivery() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;

    let mut renderer = mount(&server);
    let delivery = renderer.submit().unwrap().delivery.unwrap();
    delivery.cancel();

    let outcome = delivery.outcome().await;
    assert!(outcome.unwrap_err().is_cancelled());
}

#[test]
fn test_submit_outside_runtime_skips_delivery() {
    let mut renderer = FormRenderer::new(
        MemoryDocument::with_container("survey"),
        "survey",
        customer_feedback(),
        RenderOptions::new().with_webhook("http://127.0.0.1:9/collect"),
    );

    let submission = renderer.submit().unwrap();
    assert!(submission.delivery.is_none());
    assert_eq!(submission.answers.for_question(0).unwrap(), [""]);
}
