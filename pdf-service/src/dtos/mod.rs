use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenerateUrlRequest {
    #[serde(default, alias = "Url")]
    #[schema(example = "https://example.com/invoice/42")]
    pub url: Option<String>,
}

/// Multipart form accepted by the file endpoint.
#[derive(ToSchema)]
pub struct FileUpload {
    /// HTML file to render.
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// Binary PDF returned by every generation endpoint.
#[derive(ToSchema)]
#[schema(value_type = String, format = Binary)]
pub struct PdfDocument(pub Vec<u8>);

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "URL provided is invalid.")]
    pub error: String,
}
