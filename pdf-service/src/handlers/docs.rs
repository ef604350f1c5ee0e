use crate::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};

pub const SWAGGER_UI_PATH: &str = "/docs";
pub const OPENAPI_JSON_PATH: &str = "/.well-known/openapi.json";

/// Sends browsers hitting `/` to the interactive docs, or to the raw
/// OpenAPI document when the UI is switched off.
pub async fn root_redirect(State(state): State<AppState>) -> impl IntoResponse {
    let location = if state.config.swagger.enabled {
        "/docs/"
    } else {
        OPENAPI_JSON_PATH
    };

    (StatusCode::FOUND, [(header::LOCATION, location)])
}
