use crate::models::{ColorMode, ContentSource, DocumentDescriptor, GlobalSettings, WebSettings};
use crate::services::error::ConversionError;
use crate::services::executor::CommandExecutor;
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Turns a document descriptor into PDF bytes.
///
/// Implementations must be safe to call from concurrent requests. Wrap one
/// that is not in [`SynchronizedConverter`].
#[async_trait]
pub trait Converter: Send + Sync {
    async fn convert(&self, document: &DocumentDescriptor) -> Result<Vec<u8>, ConversionError>;
}

/// Converter backed by the `wkhtmltopdf` command-line tool.
///
/// Inline HTML is piped through stdin and the PDF is read back from stdout,
/// so nothing touches the filesystem.
#[derive(Clone, Debug)]
pub struct WkHtmlToPdf {
    binary: String,
    executor: CommandExecutor,
}

impl WkHtmlToPdf {
    pub fn new(binary: impl Into<String>, executor: CommandExecutor) -> Self {
        Self {
            binary: binary.into(),
            executor,
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }
}

#[async_trait]
impl Converter for WkHtmlToPdf {
    async fn convert(&self, document: &DocumentDescriptor) -> Result<Vec<u8>, ConversionError> {
        let invocation = build_invocation(document)?;
        let output = self
            .executor
            .execute(&self.binary, &invocation.args, invocation.stdin)
            .await?;

        if output.stdout.is_empty() {
            return Err(ConversionError::EmptyOutput {
                program: self.binary.clone(),
            });
        }

        Ok(output.stdout)
    }
}

/// Arguments and stdin payload for a single wkhtmltopdf run.
#[derive(Debug, PartialEq)]
pub struct Invocation {
    pub args: Vec<String>,
    pub stdin: Option<Vec<u8>>,
}

const STDIO: &str = "-";

pub fn build_invocation(document: &DocumentDescriptor) -> Result<Invocation, ConversionError> {
    if document.objects.is_empty() {
        return Err(ConversionError::Unsupported(
            "document has no content objects".to_string(),
        ));
    }

    let mut args = vec!["--quiet".to_string()];
    push_global_args(&mut args, &document.global);

    let mut stdin = None;
    for object in &document.objects {
        match &object.source {
            ContentSource::Html(html) => {
                if stdin.is_some() {
                    return Err(ConversionError::Unsupported(
                        "only one inline HTML object can be rendered per document".to_string(),
                    ));
                }
                stdin = Some(html.as_bytes().to_vec());
                args.push(STDIO.to_string());
            }
            ContentSource::Url(url) => args.push(url.to_string()),
        }
        push_page_args(&mut args, &object.web);
    }

    args.push(STDIO.to_string());

    Ok(Invocation { args, stdin })
}

fn push_global_args(args: &mut Vec<String>, global: &GlobalSettings) {
    if global.color_mode == ColorMode::Grayscale {
        args.push("--grayscale".to_string());
    }

    args.extend([
        "--orientation".to_string(),
        global.orientation.to_string(),
        "--page-size".to_string(),
        global.paper_size.to_string(),
    ]);

    let margins = global.margins;
    for (flag, mm) in [
        ("--margin-top", margins.top),
        ("--margin-bottom", margins.bottom),
        ("--margin-left", margins.left),
        ("--margin-right", margins.right),
    ] {
        args.push(flag.to_string());
        args.push(format!("{}mm", mm));
    }
}

fn push_page_args(args: &mut Vec<String>, web: &WebSettings) {
    if let Some(encoding) = &web.default_encoding {
        args.push("--encoding".to_string());
        args.push(encoding.clone());
    }

    let toggles = [
        (web.load_images, "--images", "--no-images"),
        (
            web.enable_javascript,
            "--enable-javascript",
            "--disable-javascript",
        ),
        (
            web.enable_intelligent_shrinking,
            "--enable-smart-shrinking",
            "--disable-smart-shrinking",
        ),
    ];
    for (value, on, off) in toggles {
        if let Some(enabled) = value {
            args.push(if enabled { on } else { off }.to_string());
        }
    }
}

/// Serializes calls into a converter that cannot run conversions in parallel.
pub struct SynchronizedConverter<C> {
    inner: Mutex<C>,
}

impl<C: Converter> SynchronizedConverter<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner: Mutex::new(inner),
        }
    }
}

#[async_trait]
impl<C: Converter> Converter for SynchronizedConverter<C> {
    async fn convert(&self, document: &DocumentDescriptor) -> Result<Vec<u8>, ConversionError> {
        let inner = self.inner.lock().await;
        inner.convert(document).await
    }
}
