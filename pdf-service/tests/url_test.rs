mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{body_bytes, body_json, header, test_app, MockConverter, FAKE_PDF};
use pdf_service::models::ContentSource;
use tower::util::ServiceExt;

fn post_json(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/generate-pdf-from-url")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn absolute_url_is_rendered() {
    let converter = MockConverter::new();

    let response = test_app(converter.clone())
        .oneshot(post_json(r#"{"url": "https://example.com/report?id=7"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "content-type"), "application/pdf");
    assert_eq!(
        header(&response, "content-disposition"),
        "attachment; filename=\"document_from_url.pdf\""
    );
    assert_eq!(body_bytes(response).await, FAKE_PDF);

    let calls = converter.calls();
    assert_eq!(calls.len(), 1);
    let object = &calls[0].objects[0];
    match &object.source {
        ContentSource::Url(url) => assert_eq!(url.as_str(), "https://example.com/report?id=7"),
        other => panic!("expected a URL source, got {:?}", other),
    }
    assert_eq!(object.web.default_encoding.as_deref(), Some("utf-8"));
    assert_eq!(object.web.load_images, Some(true));
    assert_eq!(object.web.enable_javascript, Some(true));
    assert_eq!(object.web.enable_intelligent_shrinking, Some(true));
}

#[tokio::test]
async fn capitalised_property_name_is_accepted() {
    let converter = MockConverter::new();

    let response = test_app(converter.clone())
        .oneshot(post_json(r#"{"Url": "http://localhost:8080/page"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(converter.call_count(), 1);
}

#[tokio::test]
async fn missing_or_invalid_urls_are_rejected() {
    let payloads = [
        r#"{}"#,
        r#"{"url": null}"#,
        r#"{"url": ""}"#,
        r#"{"url": "   "}"#,
        r#"{"url": "not a url"}"#,
        r#"{"url": "/relative/path"}"#,
    ];

    for payload in payloads {
        let converter = MockConverter::new();
        let response = test_app(converter.clone())
            .oneshot(post_json(payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "payload {}", payload);
        assert_eq!(body_json(response).await["error"], "URL provided is invalid.");
        assert_eq!(converter.call_count(), 0);
    }
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let converter = MockConverter::new();

    let response = test_app(converter.clone())
        .oneshot(post_json("{\"url\": "))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
    assert_eq!(converter.call_count(), 0);
}

#[tokio::test]
async fn non_json_content_type_is_a_bad_request() {
    let converter = MockConverter::new();
    let request = Request::builder()
        .method("POST")
        .uri("/generate-pdf-from-url")
        .header("content-type", "text/plain")
        .body(Body::from(r#"{"url": "https://example.com"}"#))
        .unwrap();

    let response = test_app(converter.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(converter.call_count(), 0);
}

#[tokio::test]
async fn converter_failure_is_reported_as_500() {
    let converter = MockConverter::failing("host unreachable");

    let response = test_app(converter)
        .oneshot(post_json(r#"{"url": "https://unreachable.invalid"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await["error"],
        "Internal error generating PDF: host unreachable"
    );
}
