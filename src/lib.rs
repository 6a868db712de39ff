// src/lib.rs
// Public library surface for the server binary, the demo and integration tests.

pub mod api;
pub mod config;
pub mod fallback;
pub mod features;
pub mod logging;
pub mod metrics;
pub mod predict;
pub mod request;
pub mod scoring;
pub mod source;
pub mod types;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, router_with_ui, AppState};
pub use crate::features::{build_features, build_feature_set, FeatureSet};
pub use crate::predict::{predict_podium, DataOrigin, Prediction, MODEL_VERSION};
pub use crate::scoring::score_podium;
pub use crate::source::{F1DataSource, JolpicaClient, SourceError};
