//! The three ways of producing a PDF: raw body, uploaded file, remote URL.
//!
//! Each operation validates its input, builds a descriptor with the fixed
//! page setup and hands it to the shared converter. Nothing here knows about
//! HTTP; handlers map [`GatewayError`] onto status codes.

use crate::models::{DocumentDescriptor, GlobalSettings};
use crate::services::converter::Converter;
use crate::services::error::GatewayError;
use crate::services::metrics;
use reqwest::Url;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const BODY_FILE_NAME: &str = "document_from_body.pdf";
pub const URL_FILE_NAME: &str = "document_from_url.pdf";
const FALLBACK_FILE_NAME: &str = "document.pdf";

const EMPTY_BODY: &str = "HTML content cannot be empty.";
const INVALID_URL: &str = "URL provided is invalid.";
const MISSING_UPLOAD: &str = "No file uploaded or empty file.";
const EMPTY_UPLOAD: &str = "HTML content in file is empty.";

/// A rendered document and the name it should be downloaded as.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfFile {
    pub bytes: Vec<u8>,
    pub file_name: String,
}

/// An uploaded file as received by the transport. `data` is an error when
/// the upload stream could not be read.
#[derive(Debug)]
pub struct Upload {
    pub file_name: Option<String>,
    pub data: Result<Vec<u8>, String>,
}

#[derive(Clone, Copy)]
enum Source {
    Body,
    Url,
    File,
}

impl Source {
    fn as_str(self) -> &'static str {
        match self {
            Source::Body => "body",
            Source::Url => "url",
            Source::File => "file",
        }
    }
}

#[derive(Clone)]
pub struct PdfGateway {
    converter: Arc<dyn Converter>,
    settings: GlobalSettings,
}

impl PdfGateway {
    pub fn new(converter: Arc<dyn Converter>) -> Self {
        Self::with_settings(converter, GlobalSettings::default())
    }

    pub fn with_settings(converter: Arc<dyn Converter>, settings: GlobalSettings) -> Self {
        Self {
            converter,
            settings,
        }
    }

    /// Renders a raw request body interpreted as UTF-8 HTML.
    pub async fn from_body(&self, body: &[u8]) -> Result<PdfFile, GatewayError> {
        let html = decode_text(body);
        if html.trim().is_empty() {
            metrics::record_rejection(Source::Body.as_str());
            return Err(GatewayError::invalid(EMPTY_BODY));
        }

        tracing::info!(html_bytes = html.len(), "Starting PDF generation from body");

        let document = DocumentDescriptor::from_html(self.settings, html);
        let bytes = self.convert(Source::Body, &document).await?;

        tracing::info!(pdf_bytes = bytes.len(), "PDF generated successfully from body");

        Ok(PdfFile {
            bytes,
            file_name: BODY_FILE_NAME.to_string(),
        })
    }

    /// Renders the page at an absolute URL. The converter navigates to it
    /// itself; nothing is fetched here.
    pub async fn from_url(&self, url: Option<&str>) -> Result<PdfFile, GatewayError> {
        let url = match url.filter(|raw| !raw.trim().is_empty()).map(Url::parse) {
            Some(Ok(url)) => url,
            Some(Err(e)) => {
                tracing::debug!(error = %e, "Rejected URL");
                metrics::record_rejection(Source::Url.as_str());
                return Err(GatewayError::invalid(INVALID_URL));
            }
            None => {
                metrics::record_rejection(Source::Url.as_str());
                return Err(GatewayError::invalid(INVALID_URL));
            }
        };

        tracing::info!(url = %url, "Starting PDF generation from URL");

        let document = DocumentDescriptor::from_url(self.settings, url);
        let bytes = self.convert(Source::Url, &document).await?;

        tracing::info!(pdf_bytes = bytes.len(), "PDF generated successfully from URL");

        Ok(PdfFile {
            bytes,
            file_name: URL_FILE_NAME.to_string(),
        })
    }

    /// Renders an uploaded HTML file, naming the result after the upload.
    pub async fn from_file(&self, upload: Option<Upload>) -> Result<PdfFile, GatewayError> {
        let Some(upload) = upload else {
            metrics::record_rejection(Source::File.as_str());
            return Err(GatewayError::invalid(MISSING_UPLOAD));
        };
        let display_name = upload.file_name.as_deref().unwrap_or("<unnamed>");

        let data = upload.data.map_err(|e| {
            tracing::error!(file_name = %display_name, error = %e, "Error reading uploaded file");
            GatewayError::UploadRead(e)
        })?;

        if data.is_empty() {
            metrics::record_rejection(Source::File.as_str());
            return Err(GatewayError::invalid(MISSING_UPLOAD));
        }

        tracing::info!(
            file_name = %display_name,
            size = data.len(),
            "Uploaded file read successfully"
        );

        let html = decode_text(&data);
        if html.trim().is_empty() {
            metrics::record_rejection(Source::File.as_str());
            return Err(GatewayError::invalid(EMPTY_UPLOAD));
        }

        tracing::info!(file_name = %display_name, "Starting PDF generation from file");

        let document = DocumentDescriptor::from_html(self.settings, html);
        let bytes = self.convert(Source::File, &document).await?;

        tracing::info!(
            file_name = %display_name,
            pdf_bytes = bytes.len(),
            "PDF generated successfully from file"
        );

        Ok(PdfFile {
            bytes,
            file_name: pdf_file_name(upload.file_name.as_deref()),
        })
    }

    async fn convert(
        &self,
        source: Source,
        document: &DocumentDescriptor,
    ) -> Result<Vec<u8>, GatewayError> {
        tracing::info!(source = source.as_str(), "Converting HTML to PDF");
        let started = Instant::now();

        match self.converter.convert(document).await {
            Ok(bytes) => {
                metrics::record_conversion_success(source.as_str(), started.elapsed(), bytes.len());
                Ok(bytes)
            }
            Err(e) => {
                metrics::record_conversion_failure(source.as_str(), started.elapsed());
                tracing::error!(
                    source = source.as_str(),
                    error = %e,
                    error_debug = ?e,
                    "Error generating PDF"
                );
                Err(GatewayError::Conversion(e))
            }
        }
    }
}

/// Decodes bytes the way a text reader would: a UTF-8 byte order mark is
/// dropped and invalid sequences become U+FFFD.
pub fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

/// `report.html` -> `report.pdf`. Directory parts sent by some clients are
/// ignored.
pub fn pdf_file_name(upload_name: Option<&str>) -> String {
    upload_name
        .and_then(|name| name.rsplit(['/', '\\']).next())
        .and_then(|base| Path::new(base).file_stem())
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(|stem| format!("{}.pdf", stem))
        .unwrap_or_else(|| FALLBACK_FILE_NAME.to_string())
}
