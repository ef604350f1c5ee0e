//! Shared helpers for pdf-service integration tests.
//!
//! The router is driven in-process with a recording converter in place of
//! wkhtmltopdf.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{body::Body, http::Response, Router};
use http_body_util::BodyExt;
use pdf_service::{
    build_router,
    config::{ConverterConfig, Environment, LimitsConfig, PdfConfig, SwaggerConfig},
    models::DocumentDescriptor,
    services::{ConversionError, Converter, PdfGateway},
    AppState,
};
use std::sync::{Arc, Mutex};

pub const FAKE_PDF: &[u8] = b"%PDF-1.4\n%test\n";
pub const BOUNDARY: &str = "pdf-service-test-boundary";

/// Records every descriptor it is asked to render.
#[derive(Default)]
pub struct MockConverter {
    calls: Mutex<Vec<DocumentDescriptor>>,
    failure: Option<String>,
}

impl MockConverter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            failure: Some(message.to_string()),
        })
    }

    pub fn calls(&self) -> Vec<DocumentDescriptor> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Converter for MockConverter {
    async fn convert(&self, document: &DocumentDescriptor) -> Result<Vec<u8>, ConversionError> {
        self.calls.lock().unwrap().push(document.clone());
        match &self.failure {
            Some(message) => Err(ConversionError::Renderer(message.clone())),
            None => Ok(FAKE_PDF.to_vec()),
        }
    }
}

pub fn test_config() -> PdfConfig {
    PdfConfig {
        common: service_core::config::Config { port: 0 },
        environment: Environment::Dev,
        service_name: "pdf-service-test".to_string(),
        log_level: "error".to_string(),
        otlp_endpoint: None,
        converter: ConverterConfig {
            wkhtmltopdf_path: "wkhtmltopdf".to_string(),
            timeout_secs: None,
            serialize: false,
        },
        limits: LimitsConfig {
            max_upload_bytes: 1024 * 1024,
        },
        swagger: SwaggerConfig { enabled: true },
    }
}

pub fn router_with(config: PdfConfig, converter: Arc<MockConverter>) -> Router {
    build_router(AppState {
        config,
        gateway: PdfGateway::new(converter),
    })
}

pub fn test_app(converter: Arc<MockConverter>) -> Router {
    router_with(test_config(), converter)
}

/// A `multipart/form-data` body with one part per `(name, file_name, data)`.
pub fn multipart_body(parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, file_name, data) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match file_name {
            Some(file_name) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: text/html\r\n\r\n",
                    name, file_name
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
            ),
        }
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn header<'a>(response: &'a Response<Body>, name: &str) -> &'a str {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}
