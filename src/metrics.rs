use anyhow::Context;
use axum::{routing::get, Router};
use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub struct Metrics {
    pub handle: PrometheusHandle,
}

/// Register help text for every series this service emits, on the current recorder.
pub fn describe() {
    describe_counter!("podium_predictions_total", "Podium predictions served.");
    describe_counter!(
        "podium_fallback_total",
        "Predictions scored from the static fallback drivers."
    );
    describe_counter!(
        "upstream_errors_total",
        "Failed Jolpica requests (transport or non-2xx), by endpoint."
    );
    describe_histogram!("upstream_request_ms", "Jolpica request latency in milliseconds.");
}

impl Metrics {
    /// Install the global Prometheus recorder. Call once per process.
    pub fn init() -> anyhow::Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("prometheus: install recorder")?;
        describe();
        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route("/metrics", get(move || render(handle.clone())))
    }
}

async fn render(handle: PrometheusHandle) -> String {
    handle.render()
}
