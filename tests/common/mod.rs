// tests/common/mod.rs
//
// In-memory data source shared by the integration tests. No sockets, no network.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use podium_predictor::types::{Driver, RaceOption, RaceResultEntry, RaceResults, StandingEntry};
use podium_predictor::{AppState, F1DataSource, SourceError};

/// Canned answer for one stub endpoint.
#[derive(Clone, Debug)]
pub enum Reply<T> {
    Data(T),
    NotFound,
    Outage,
}

impl<T: Clone> Reply<T> {
    fn resolve(&self, what: &str) -> Result<T, SourceError> {
        match self {
            Reply::Data(v) => Ok(v.clone()),
            Reply::NotFound => Err(SourceError::not_found(what)),
            Reply::Outage => Err(SourceError::Status {
                status: 503,
                body: "stub outage".into(),
            }),
        }
    }
}

pub struct StubSource {
    pub standings: Reply<Vec<StandingEntry>>,
    pub results: Reply<RaceResults>,
    pub races: Reply<Vec<RaceOption>>,
    pub standings_calls: AtomicUsize,
    pub results_calls: AtomicUsize,
}

impl StubSource {
    pub fn new(
        standings: Reply<Vec<StandingEntry>>,
        results: Reply<RaceResults>,
        races: Reply<Vec<RaceOption>>,
    ) -> Self {
        Self {
            standings,
            results,
            races,
            standings_calls: AtomicUsize::new(0),
            results_calls: AtomicUsize::new(0),
        }
    }

    pub fn results_calls(&self) -> usize {
        self.results_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl F1DataSource for StubSource {
    async fn season_standings(&self, season: &str) -> Result<Vec<StandingEntry>, SourceError> {
        self.standings_calls.fetch_add(1, Ordering::SeqCst);
        self.standings.resolve(&format!("{season} standings"))
    }

    async fn race_results(&self, season: &str, round: u32) -> Result<RaceResults, SourceError> {
        self.results_calls.fetch_add(1, Ordering::SeqCst);
        self.results.resolve(&format!("{season} round {round}"))
    }

    async fn season_races(&self, season: &str) -> Result<Vec<RaceOption>, SourceError> {
        self.races.resolve(&format!("{season} calendar"))
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

pub fn driver(id: &str, name: &str, team: &str) -> Driver {
    Driver {
        id: id.to_string(),
        code: None,
        name: name.to_string(),
        team: team.to_string(),
        number: None,
    }
}

pub fn standing(id: &str, position: u32, points: f64) -> StandingEntry {
    StandingEntry {
        driver: driver(id, id, "Team"),
        position: Some(position),
        points,
        wins: 0,
    }
}

/// Top of the 2024 table used by the end-to-end example.
pub fn standings_2024() -> Vec<StandingEntry> {
    vec![
        StandingEntry {
            driver: driver("max_verstappen", "Max Verstappen", "Red Bull"),
            position: Some(1),
            points: 575.0,
            wins: 19,
        },
        StandingEntry {
            driver: driver("norris", "Lando Norris", "McLaren"),
            position: Some(2),
            points: 356.0,
            wins: 1,
        },
        StandingEntry {
            driver: driver("leclerc", "Charles Leclerc", "Ferrari"),
            position: Some(3),
            points: 356.0,
            wins: 1,
        },
    ]
}

pub fn classification(race_name: &str, order: &[(&str, u32)]) -> RaceResults {
    RaceResults {
        season: "2024".into(),
        round: 1,
        race_name: race_name.into(),
        results: order
            .iter()
            .map(|&(id, position)| RaceResultEntry {
                driver: driver(id, id, "Team"),
                position,
            })
            .collect(),
    }
}

pub fn calendar() -> Vec<RaceOption> {
    vec![
        RaceOption {
            round: 1,
            name: "Bahrain Grand Prix".into(),
            circuit: Some("Bahrain International Circuit".into()),
            country: Some("Bahrain".into()),
        },
        RaceOption {
            round: 2,
            name: "Saudi Arabian Grand Prix".into(),
            circuit: None,
            country: None,
        },
    ]
}

pub fn state_with(source: StubSource) -> AppState {
    AppState::new(Arc::new(source))
}
