//! Prometheus metrics setup and metric definitions

use anyhow::Context;
use metrics::{describe_counter, describe_gauge, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder and return a handle for rendering metrics.
pub fn install_prometheus_recorder() -> anyhow::Result<PrometheusHandle> {
    // Seconds; includes sub-millisecond buckets for the health endpoints
    let buckets = [
        0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
    ];

    PrometheusBuilder::new()
        .set_buckets(&buckets)
        .context("failed to set histogram buckets")?
        .install_recorder()
        .context("failed to install Prometheus recorder")
}

/// Register metric descriptions so HELP/TYPE lines are present from startup.
pub fn describe_metrics() {
    describe_counter!("schoolreg_http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "schoolreg_http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_gauge!(
        "schoolreg_http_requests_in_flight",
        "Number of HTTP requests currently being processed"
    );

    describe_counter!(
        "schoolreg_school_registrations_total",
        "School registration attempts by outcome"
    );
    describe_histogram!(
        "schoolreg_school_registration_duration_seconds",
        "School registration duration in seconds"
    );
    describe_counter!(
        "schoolreg_student_accounts_total",
        "Student account creation attempts by outcome"
    );
    describe_histogram!(
        "schoolreg_student_provisioning_duration_seconds",
        "Student account creation duration in seconds"
    );
}
