use crate::dtos::{ErrorResponse, FileUpload, GenerateUrlRequest, PdfDocument};
use crate::services::gateway::PDF_CONTENT_TYPE;
use crate::services::{PdfFile, Upload};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{
        multipart::MultipartRejection, rejection::JsonRejection, Multipart, State,
    },
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use service_core::error::AppError;

/// Generate a PDF from raw HTML
///
/// Receives raw HTML in the body. CSS/Images should use absolute URLs or be
/// embedded. Returns a PDF.
#[utoipa::path(
    post,
    path = "/generate-pdf-from-body",
    operation_id = "GeneratePdfFromBody",
    request_body(content = String, content_type = "text/html", description = "HTML document"),
    responses(
        (status = 200, description = "PDF generated", body = PdfDocument, content_type = "application/pdf"),
        (status = 400, description = "HTML content is empty", body = ErrorResponse),
        (status = 500, description = "PDF generation failed", body = ErrorResponse)
    ),
    tag = "PDF"
)]
pub async fn generate_pdf_from_body(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    let pdf = state.gateway.from_body(&body).await?;
    Ok(pdf_response(pdf))
}

/// Generate a PDF from a URL
///
/// Receives a JSON { "url": "your-url" }, navigates to the URL and returns a
/// PDF.
#[utoipa::path(
    post,
    path = "/generate-pdf-from-url",
    operation_id = "GeneratePdfFromUrl",
    request_body = GenerateUrlRequest,
    responses(
        (status = 200, description = "PDF generated", body = PdfDocument, content_type = "application/pdf"),
        (status = 400, description = "URL missing or invalid", body = ErrorResponse),
        (status = 500, description = "PDF generation failed", body = ErrorResponse)
    ),
    tag = "PDF"
)]
pub async fn generate_pdf_from_url(
    State(state): State<AppState>,
    payload: Result<Json<GenerateUrlRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Rejected URL request body");
        rejected(rejection.status(), rejection.body_text())
    })?;

    let pdf = state.gateway.from_url(request.url.as_deref()).await?;
    Ok(pdf_response(pdf))
}

/// Generate a PDF from an uploaded HTML file
///
/// Receives an HTML file upload. CSS/Images should use absolute URLs or be
/// embedded. Returns a PDF named after the upload.
#[utoipa::path(
    post,
    path = "/generate-pdf-from-file",
    operation_id = "GeneratePdfFromFile",
    request_body(content = FileUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "PDF generated", body = PdfDocument, content_type = "application/pdf"),
        (status = 400, description = "No file, empty file or empty HTML content", body = ErrorResponse),
        (status = 500, description = "Upload could not be read or PDF generation failed", body = ErrorResponse)
    ),
    tag = "PDF"
)]
pub async fn generate_pdf_from_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, AppError> {
    let mut multipart =
        multipart.map_err(|rejection| rejected(rejection.status(), rejection.body_text()))?;

    let upload = read_upload(&mut multipart).await?;
    let pdf = state.gateway.from_file(upload).await?;
    Ok(pdf_response(pdf))
}

/// Picks the `file` field, or failing that the first field carrying a file
/// name.
async fn read_upload(multipart: &mut Multipart) -> Result<Option<Upload>, AppError> {
    let mut fallback = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| rejected(e.status(), e.body_text()))?
    {
        let is_file_field = field.name() == Some("file");
        if !is_file_field && (fallback.is_some() || field.file_name().is_none()) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let data = match field.bytes().await {
            Ok(bytes) => Ok(bytes.to_vec()),
            Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                return Err(rejected(e.status(), e.body_text()));
            }
            Err(e) => Err(e.body_text()),
        };
        let failed = data.is_err();
        let upload = Upload { file_name, data };

        if is_file_field || failed {
            return Ok(Some(upload));
        }
        fallback = Some(upload);
    }

    Ok(fallback)
}

/// Maps an extractor rejection onto the JSON error envelope, keeping 413
/// for bodies over the configured limit.
fn rejected(status: StatusCode, message: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(anyhow::anyhow!(message))
    } else {
        AppError::BadRequest(anyhow::anyhow!(message))
    }
}

fn pdf_response(pdf: PdfFile) -> Response {
    (
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static(PDF_CONTENT_TYPE),
            ),
            (
                header::CONTENT_DISPOSITION,
                content_disposition(&pdf.file_name),
            ),
        ],
        pdf.bytes,
    )
        .into_response()
}

/// `attachment` disposition; names outside printable ASCII also get an
/// RFC 5987 `filename*`.
fn content_disposition(file_name: &str) -> HeaderValue {
    let ascii: String = file_name
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let value = if ascii == file_name {
        format!("attachment; filename=\"{}\"", ascii)
    } else {
        format!(
            "attachment; filename=\"{}\"; filename*=UTF-8''{}",
            ascii,
            urlencoding::encode(file_name)
        )
    };

    HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_use_a_quoted_filename() {
        assert_eq!(
            content_disposition("report.pdf"),
            "attachment; filename=\"report.pdf\""
        );
    }

    #[test]
    fn unicode_names_get_an_encoded_variant() {
        assert_eq!(
            content_disposition("relatório.pdf"),
            "attachment; filename=\"relat_rio.pdf\"; filename*=UTF-8''relat%C3%B3rio.pdf"
        );
    }

    #[test]
    fn quotes_cannot_break_out_of_the_header() {
        let value = content_disposition("a\"b.pdf");
        assert!(value.to_str().unwrap().starts_with("attachment; filename=\"a_b.pdf\""));
    }
}
