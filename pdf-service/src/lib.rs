pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post},
    Json, Router,
};
use service_core::middleware::{
    metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::request_id_middleware, REQUEST_ID_HEADER,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::PdfConfig;
use crate::handlers::docs::{OPENAPI_JSON_PATH, SWAGGER_UI_PATH};
use crate::services::PdfGateway;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PDF Generator API",
        description = "Renders HTML bodies, uploaded HTML files and remote pages into PDF documents."
    ),
    paths(
        handlers::pdf::generate_pdf_from_body,
        handlers::pdf::generate_pdf_from_url,
        handlers::pdf::generate_pdf_from_file,
        handlers::health::health_check,
        handlers::health::readiness_check,
    ),
    components(
        schemas(
            dtos::GenerateUrlRequest,
            dtos::FileUpload,
            dtos::PdfDocument,
            dtos::ErrorResponse,
        )
    ),
    tags(
        (name = "PDF", description = "PDF generation"),
        (name = "Observability", description = "Service health and monitoring"),
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub config: PdfConfig,
    pub gateway: PdfGateway,
}

pub fn build_router(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/", get(handlers::root_redirect))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics::metrics))
        .route(
            "/generate-pdf-from-body",
            post(handlers::generate_pdf_from_body),
        )
        .route(
            "/generate-pdf-from-url",
            post(handlers::generate_pdf_from_url),
        )
        .route(
            "/generate-pdf-from-file",
            post(handlers::generate_pdf_from_file),
        );

    if state.config.swagger.enabled {
        app = app.merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()));
    } else {
        // Keep the document reachable for clients generating bindings.
        app = app.route(
            OPENAPI_JSON_PATH,
            get(|| async { Json(ApiDoc::openapi()) }),
        );
    }

    let body_limit = state.config.limits.max_upload_bytes;

    app.with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(
            |request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            },
        ))
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
}
