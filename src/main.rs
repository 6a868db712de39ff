//! Podium predictor: binary entrypoint.
//! Boots the Axum HTTP server: JSON API, static race picker UI and `/metrics`.

use podium_predictor::{api, config::PredictorConfig, logging, metrics::Metrics};
use shuttle_axum::ShuttleAxum;
use tracing::{info, warn};

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();
    if let Err(e) = logging::init_tracing() {
        eprintln!("tracing subscriber not installed: {e}");
    }

    let cfg = PredictorConfig::load_default()?;
    info!(
        base_url = %cfg.jolpica_base_url,
        timeout_secs = cfg.request_timeout_secs,
        ui_dir = %cfg.ui_dir,
        "config loaded"
    );

    let state = api::AppState::from_config(&cfg)?;
    let mut router = api::router_with_ui(state, &cfg.ui_dir);

    match Metrics::init() {
        Ok(m) => router = router.merge(m.router()),
        Err(e) => warn!(error = ?e, "metrics disabled"),
    }

    Ok(router.into())
}
