//! Application startup and lifecycle management.

use crate::config::PdfConfig;
use crate::services::{CommandExecutor, Converter, PdfGateway, SynchronizedConverter, WkHtmlToPdf};
use crate::{build_router, AppState};
use service_core::error::AppError;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Bind the listener and assemble the state. Port 0 picks a free port.
    pub async fn build(config: PdfConfig, converter: Arc<dyn Converter>) -> Result<Self, AppError> {
        let state = AppState {
            gateway: PdfGateway::new(converter),
            config: config.clone(),
        };

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            service = %config.service_name,
            port,
            swagger = config.swagger.enabled,
            "PDF service listening"
        );

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until SIGINT or SIGTERM, then drain in-flight requests.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let app = build_router(self.state);

        axum::serve(self.listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Service shutdown complete");
        Ok(())
    }
}

/// Builds the wkhtmltopdf converter described by the configuration.
pub fn build_converter(config: &PdfConfig) -> Arc<dyn Converter> {
    let executor = CommandExecutor::new(config.converter.timeout());
    let converter = WkHtmlToPdf::new(config.converter.wkhtmltopdf_path.clone(), executor);

    if config.converter.serialize {
        Arc::new(SynchronizedConverter::new(converter))
    } else {
        Arc::new(converter)
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
