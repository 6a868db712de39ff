//! Podium scorer.
//!
//! Each driver gets one linear score, higher is better:
//!
//! ```text
//! score = w_points * points
//!       - w_standing * standing_position   (missing -> 20)
//!       - w_avg_finish * average_finish    (no results -> 10.0)
//! ```
//!
//! Standing position and average finish are penalties (P1 costs least). The
//! weights and the two fallbacks are part of the prediction contract: changing
//! them changes every published podium.

use crate::types::{FeatureRecord, PodiumEntry, PodiumPosition, ScoredDriver};

/// Standing used when a driver has no championship rank.
pub const DEFAULT_STANDING_POSITION: u32 = 20;
/// Average finish used when a driver has no recent results.
pub const DEFAULT_AVERAGE_FINISH: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoringWeights {
    pub w_points: f64,
    pub w_standing: f64,
    pub w_avg_finish: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            w_points: 1.0,
            w_standing: 15.0,
            w_avg_finish: 10.0,
        }
    }
}

/// Mean finishing position, or [`DEFAULT_AVERAGE_FINISH`] for an empty list.
pub fn average_finish(recent_results: &[u32]) -> f64 {
    if recent_results.is_empty() {
        return DEFAULT_AVERAGE_FINISH;
    }
    let sum: f64 = recent_results.iter().map(|&p| f64::from(p)).sum();
    sum / recent_results.len() as f64
}

pub fn score_driver(features: &FeatureRecord, w: &ScoringWeights) -> f64 {
    let points = features.points.unwrap_or(0.0);
    let standing = features
        .standing_position
        .unwrap_or(DEFAULT_STANDING_POSITION);

    w.w_points * points
        - w.w_standing * f64::from(standing)
        - w.w_avg_finish * average_finish(&features.recent_results)
}

/// Score every record and sort best-first.
///
/// The sort is stable: on an exact score tie the record that came first in
/// `features` ranks higher.
pub fn rank_drivers(features: &[FeatureRecord], w: &ScoringWeights) -> Vec<ScoredDriver> {
    let mut scored = features
        .iter()
        .map(|f| ScoredDriver {
            driver: f.driver.clone(),
            score: score_driver(f, w),
        })
        .collect::<Vec<_>>();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

/// Top three drivers with podium positions 1..=3 (fewer when fewer records).
pub fn score_podium(features: &[FeatureRecord]) -> Vec<PodiumEntry> {
    score_podium_with(features, &ScoringWeights::default())
}

pub fn score_podium_with(features: &[FeatureRecord], w: &ScoringWeights) -> Vec<PodiumEntry> {
    rank_drivers(features, w)
        .into_iter()
        .zip(PodiumPosition::ALL)
        .map(|(s, position)| PodiumEntry {
            position,
            driver: s.driver,
            score: s.score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Driver;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn driver(id: &str) -> Driver {
        Driver {
            id: id.to_string(),
            code: None,
            name: id.to_string(),
            team: "Team".to_string(),
            number: None,
        }
    }

    fn rec(id: &str, pos: Option<u32>, pts: Option<f64>, recent: &[u32]) -> FeatureRecord {
        FeatureRecord {
            driver: driver(id),
            standing_position: pos,
            points: pts,
            recent_results: recent.to_vec(),
        }
    }

    #[test]
    fn defaults_apply_for_missing_inputs() {
        let w = ScoringWeights::default();
        // 0 points, P20, avg 10.0
        let s = score_driver(&rec("x", None, None, &[]), &w);
        assert_eq!(s, -15.0 * 20.0 - 10.0 * 10.0);
        assert_eq!(average_finish(&[]), 10.0);
    }

    #[test]
    fn average_finish_is_the_mean() {
        assert_eq!(average_finish(&[1, 2]), 1.5);
        let w = ScoringWeights::default();
        let s = score_driver(&rec("x", Some(2), Some(100.0), &[3]), &w);
        assert_eq!(s, 100.0 - 30.0 - 30.0);
    }

    #[test]
    fn season_2024_opener_example() {
        let features = vec![
            rec("max_verstappen", Some(1), Some(575.0), &[]),
            rec("norris", Some(2), Some(356.0), &[]),
            rec("leclerc", Some(3), Some(356.0), &[]),
        ];
        let podium = score_podium(&features);
        let ids: Vec<_> = podium.iter().map(|p| p.driver.id.as_str()).collect();
        assert_eq!(ids, ["max_verstappen", "norris", "leclerc"]);
        assert_eq!(podium[0].score, 560.0 - 100.0);
        assert_eq!(podium[1].score, 326.0 - 100.0);
        assert_eq!(podium[2].score, 311.0 - 100.0);
        assert_eq!(podium[2].position, PodiumPosition::Third);
    }

    #[test]
    fn exact_ties_keep_input_order() {
        let features = vec![
            rec("b", Some(5), Some(50.0), &[4]),
            rec("a", Some(5), Some(50.0), &[4]),
            rec("c", Some(5), Some(50.0), &[4]),
            rec("d", Some(5), Some(50.0), &[4]),
        ];
        let podium = score_podium(&features);
        let ids: Vec<_> = podium.iter().map(|p| p.driver.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[test]
    fn fewer_than_three_records() {
        assert!(score_podium(&[]).is_empty());
        let podium = score_podium(&[rec("solo", Some(1), Some(1.0), &[1])]);
        assert_eq!(podium.len(), 1);
        assert_eq!(podium[0].position, PodiumPosition::First);
    }

    #[test]
    fn random_inputs_yield_ordered_podiums() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let n = rng.random_range(0..=22);
            let features: Vec<_> = (0..n)
                .map(|i| {
                    let pos = rng.random_bool(0.9).then(|| rng.random_range(1..=22));
                    let pts = rng.random_bool(0.9).then(|| f64::from(rng.random_range(0..=600u32)));
                    let k = rng.random_range(0..=3);
                    let recent: Vec<u32> = (0..k).map(|_| rng.random_range(1..=20)).collect();
                    rec(&format!("d{i}"), pos, pts, &recent)
                })
                .collect();

            let podium = score_podium(&features);
            assert_eq!(podium.len(), n.min(3));
            for (i, entry) in podium.iter().enumerate() {
                assert_eq!(usize::from(entry.position.as_u8()), i + 1);
            }
            for pair in podium.windows(2) {
                assert!(pair[0].score >= pair[1].score);
            }
            // Pure: same input, same output.
            assert_eq!(score_podium(&features), podium);
        }
    }
}
