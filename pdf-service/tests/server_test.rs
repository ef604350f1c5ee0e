//! Runs the real HTTP server on an ephemeral port.

mod common;

use common::{test_config, MockConverter, FAKE_PDF};
use pdf_service::startup::Application;

async fn spawn_app(converter: std::sync::Arc<MockConverter>) -> String {
    let application = Application::build(test_config(), converter)
        .await
        .expect("Failed to build application");
    let address = format!("http://127.0.0.1:{}", application.port());

    tokio::spawn(application.run_until_stopped());
    address
}

#[tokio::test]
async fn generates_pdf_over_http() {
    let converter = MockConverter::new();
    let address = spawn_app(converter.clone()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/generate-pdf-from-body", address))
        .header("content-type", "text/html")
        .body("<h1>Hello</h1>")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-disposition"],
        "attachment; filename=\"document_from_body.pdf\""
    );
    assert_eq!(response.bytes().await.unwrap().as_ref(), FAKE_PDF);
    assert_eq!(converter.call_count(), 1);
}

#[tokio::test]
async fn uploads_file_over_http() {
    let converter = MockConverter::new();
    let address = spawn_app(converter.clone()).await;

    let part = reqwest::multipart::Part::bytes(b"<p>uploaded</p>".to_vec())
        .file_name("upload.html")
        .mime_str("text/html")
        .unwrap();
    let form = reqwest::multipart::Form::new().part("file", part);

    let response = reqwest::Client::new()
        .post(format!("{}/generate-pdf-from-file", address))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-disposition"],
        "attachment; filename=\"upload.pdf\""
    );
}

#[tokio::test]
async fn root_redirect_is_not_followed_into_an_error() {
    let address = spawn_app(MockConverter::new()).await;
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    let response = client.get(&address).send().await.unwrap();

    assert_eq!(response.status(), 302);
    assert_eq!(response.headers()["location"], "/docs/");
}
