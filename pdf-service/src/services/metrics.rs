//! Metrics collection and Prometheus export.
//!
//! Initializes the metrics exporter and provides the /metrics endpoint handler.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Initialize the metrics recorder.
///
/// This must be called once at startup before any metrics are recorded.
/// Panics if called more than once.
pub fn init_metrics() {
    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    if METRICS_HANDLE.set(handle).is_err() {
        panic!("failed to set metrics handle: already initialized");
    }
}

/// Get the current metrics in Prometheus text format.
///
/// Returns a string suitable for the /metrics HTTP endpoint.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}

pub fn record_conversion_success(source: &'static str, elapsed: Duration, size: usize) {
    counter!("pdf_conversions_total", "source" => source, "outcome" => "success").increment(1);
    histogram!("pdf_conversion_duration_seconds", "source" => source)
        .record(elapsed.as_secs_f64());
    histogram!("pdf_output_bytes", "source" => source).record(size as f64);
}

pub fn record_conversion_failure(source: &'static str, elapsed: Duration) {
    counter!("pdf_conversions_total", "source" => source, "outcome" => "error").increment(1);
    histogram!("pdf_conversion_duration_seconds", "source" => source)
        .record(elapsed.as_secs_f64());
}

pub fn record_rejection(source: &'static str) {
    counter!("pdf_conversions_total", "source" => source, "outcome" => "rejected").increment(1);
}
