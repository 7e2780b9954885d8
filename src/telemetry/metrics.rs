//! Prometheus metrics setup and metric definitions

use anyhow::{Context, Result};
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Histogram buckets (seconds) shared by HTTP and query latency metrics
const LATENCY_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Install the Prometheus recorder and return a handle for rendering metrics.
pub fn install_prometheus_recorder() -> Result<PrometheusHandle> {
    PrometheusBuilder::new()
        .set_buckets(LATENCY_BUCKETS)
        .context("failed to set histogram buckets")?
        .install_recorder()
        .context("failed to install Prometheus recorder")
}

/// Register metric descriptions and emit initial zero values so Prometheus output
/// includes HELP/TYPE lines for all metrics from startup (not just after first use).
pub fn describe_metrics() {
    // HTTP metrics
    describe_counter!("catalog_http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "catalog_http_request_duration_seconds",
        "HTTP request duration in seconds"
    );

    // Query metrics
    describe_counter!(
        "catalog_db_queries_total",
        "Statements executed, by kind and outcome"
    );
    describe_histogram!(
        "catalog_db_query_duration_seconds",
        "Statement execution time in seconds"
    );
    describe_counter!(
        "catalog_db_units_of_work_total",
        "Multi-statement units of work, by outcome"
    );

    // Pool metrics
    describe_gauge!(
        "catalog_db_pool_connections_available",
        "Connections that can be lent without waiting"
    );
    describe_counter!(
        "catalog_db_pool_acquire_timeouts_total",
        "Acquire calls that gave up waiting for a connection"
    );

    counter!("catalog_db_pool_acquire_timeouts_total").absolute(0);
    counter!("catalog_db_units_of_work_total", "outcome" => "committed").absolute(0);
    counter!("catalog_db_units_of_work_total", "outcome" => "rolled_back").absolute(0);
    counter!("catalog_db_queries_total", "kind" => "read", "outcome" => "error").absolute(0);
    histogram!("catalog_db_query_duration_seconds", "kind" => "read").record(0.0);
}
