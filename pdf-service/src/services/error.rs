use service_core::error::AppError;
use thiserror::Error;

/// Failures raised while turning a descriptor into PDF bytes.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error while running {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} timed out after {seconds} seconds")]
    Timeout { program: String, seconds: u64 },

    #[error("{program} failed ({status}): {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("{program} produced no output")]
    EmptyOutput { program: String },

    #[error("unsupported document: {0}")]
    Unsupported(String),

    #[error("{0}")]
    Renderer(String),
}

/// Outcome of a gateway operation that did not produce a PDF.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Error reading uploaded file: {0}")]
    UploadRead(String),

    #[error("Internal error generating PDF: {0}")]
    Conversion(#[from] ConversionError),
}

impl GatewayError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        GatewayError::InvalidInput(msg.into())
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::InvalidInput(msg) => AppError::BadRequest(anyhow::anyhow!(msg)),
            other => AppError::ServerError(other.to_string()),
        }
    }
}
