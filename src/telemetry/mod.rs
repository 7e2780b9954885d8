//! Telemetry initialization: metrics and structured logging

pub mod metrics;

use crate::config::{LogFormat, TelemetryConfig};
use anyhow::Result;
use metrics_exporter_prometheus::PrometheusHandle;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialise logging and, when enabled, the Prometheus recorder.
///
/// Returns `Some(PrometheusHandle)` when metrics are enabled so the HTTP
/// server can expose a `/metrics` endpoint.
pub fn init(config: &TelemetryConfig) -> Result<Option<PrometheusHandle>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "catalog_core=info,tower_http=debug".into());

    let prometheus_handle = if config.metrics_enabled {
        let handle = metrics::install_prometheus_recorder()?;
        metrics::describe_metrics();
        Some(handle)
    } else {
        None
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.log_format {
        LogFormat::Json => {
            // Flatten event fields so `message` is top-level
            let fmt_layer = tracing_subscriber::fmt::layer()
                .json()
                .flatten_event(true);
            registry.with(fmt_layer).try_init()?;
        }
        LogFormat::Pretty => {
            registry.with(tracing_subscriber::fmt::layer()).try_init()?;
        }
    }

    Ok(prometheus_handle)
}
