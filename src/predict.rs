//! Prediction flow: live features when available, fallback dataset otherwise.
//! Never fails; the worst case is a podium from static data.

use metrics::counter;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::fallback::fallback_features;
use crate::features::build_feature_set;
use crate::scoring::score_podium;
use crate::source::F1DataSource;
use crate::types::PodiumEntry;

pub const MODEL_VERSION: &str = "v0.1-rule-based";

/// Where the scored features came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataOrigin {
    Live,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub podium: Vec<PodiumEntry>,
    pub race_name: Option<String>,
    pub origin: DataOrigin,
}

pub async fn predict_podium(source: &dyn F1DataSource, season: &str, round: u32) -> Prediction {
    counter!("podium_predictions_total").increment(1);

    let (features, race_name, origin) = match build_feature_set(source, season, round).await {
        Ok(set) if !set.records.is_empty() => (set.records, set.race_name, DataOrigin::Live),
        Ok(_) => {
            warn!(season, round, "empty standings, falling back to static drivers");
            (fallback_features(), None, DataOrigin::Fallback)
        }
        Err(e) => {
            error!(error = %e, season, round, provider = source.name(), "building features failed, using fallback drivers");
            (fallback_features(), None, DataOrigin::Fallback)
        }
    };

    if origin == DataOrigin::Fallback {
        counter!("podium_fallback_total").increment(1);
    }

    let podium = score_podium(&features);
    info!(
        season,
        round,
        origin = ?origin,
        drivers = features.len(),
        winner = podium.first().map(|p| p.driver.id.as_str()).unwrap_or("-"),
        "podium predicted"
    );

    Prediction {
        podium,
        race_name,
        origin,
    }
}
