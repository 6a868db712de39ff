//! Feature builder: season standings + one race classification -> one
//! [`FeatureRecord`] per driver in the standings table.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::source::{F1DataSource, SourceError};
use crate::types::{FeatureRecord, RaceResults};

/// Feature records plus the name of the race they were built for, if the
/// classification was available.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureSet {
    pub records: Vec<FeatureRecord>,
    pub race_name: Option<String>,
}

pub async fn build_features(
    source: &dyn F1DataSource,
    season: &str,
    round: u32,
) -> Result<Vec<FeatureRecord>, SourceError> {
    Ok(build_feature_set(source, season, round).await?.records)
}

/// Standings failures propagate; classification failures degrade to "no recent form".
pub async fn build_feature_set(
    source: &dyn F1DataSource,
    season: &str,
    round: u32,
) -> Result<FeatureSet, SourceError> {
    let standings = source.season_standings(season).await?;
    if standings.is_empty() {
        return Ok(FeatureSet::default());
    }

    let classification = match source.race_results(season, round).await {
        Ok(r) => Some(r),
        Err(e) if e.is_not_found() => {
            debug!(season, round, "no classification yet");
            None
        }
        Err(e) => {
            warn!(error = %e, season, round, provider = source.name(), "classification fetch failed, continuing without it");
            None
        }
    };

    let recent = classification
        .as_ref()
        .map(recent_results_by_driver)
        .unwrap_or_default();

    let records = standings
        .into_iter()
        .map(|s| FeatureRecord {
            recent_results: recent.get(&s.driver.id).cloned().unwrap_or_default(),
            standing_position: s.position,
            points: Some(s.points),
            driver: s.driver,
        })
        .collect();

    Ok(FeatureSet {
        records,
        race_name: classification.map(|c| c.race_name),
    })
}

/// driver id -> finishing positions, in classification order.
fn recent_results_by_driver(results: &RaceResults) -> HashMap<String, Vec<u32>> {
    let mut map: HashMap<String, Vec<u32>> = HashMap::new();
    for r in &results.results {
        map.entry(r.driver.id.clone()).or_default().push(r.position);
    }
    map
}
