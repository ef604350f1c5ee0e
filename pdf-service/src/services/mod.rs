pub mod converter;
pub mod error;
pub mod executor;
pub mod gateway;
pub mod metrics;

pub use converter::{Converter, SynchronizedConverter, WkHtmlToPdf};
pub use error::{ConversionError, GatewayError};
pub use executor::CommandExecutor;
pub use gateway::{PdfFile, PdfGateway, Upload};
pub use metrics::{get_metrics, init_metrics};
