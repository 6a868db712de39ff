// src/types.rs
//! Core data model shared by the data source, the feature builder, the scorer
//! and the HTTP layer. Everything here lives for a single request.

use serde::{Deserialize, Serialize};

/// Driver identity as reported by the standings/results feeds (or the fallback table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    /// Stable id, e.g. "max_verstappen".
    pub id: String,
    /// Three-letter code, e.g. "VER".
    pub code: Option<String>,
    pub name: String,
    pub team: String,
    pub number: Option<u32>,
}

/// One row of the season driver-standings table.
#[derive(Debug, Clone, PartialEq)]
pub struct StandingEntry {
    pub driver: Driver,
    /// `None` for drivers the feed lists without a rank (excluded entries).
    pub position: Option<u32>,
    pub points: f64,
    /// Race wins this season.
    pub wins: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RaceResultEntry {
    pub driver: Driver,
    pub position: u32,
}

/// Official classification of one race.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceResults {
    pub season: String,
    pub round: u32,
    pub race_name: String,
    pub results: Vec<RaceResultEntry>,
}

/// Calendar entry used to populate the race picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceOption {
    pub round: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Per-driver scoring inputs for one (season, round) query.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    pub driver: Driver,
    /// Championship rank; `None` is scored as P20.
    pub standing_position: Option<u32>,
    /// Season points; `None` is scored as 0.
    pub points: Option<f64>,
    /// Finishing positions, 1 = winner. Empty when there is no race data.
    pub recent_results: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDriver {
    pub driver: Driver,
    pub score: f64,
}

/// Podium slot. Serialised as the bare integer 1, 2 or 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PodiumPosition {
    First,
    Second,
    Third,
}

impl PodiumPosition {
    pub const ALL: [PodiumPosition; 3] = [Self::First, Self::Second, Self::Third];

    pub fn as_u8(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
        }
    }
}

impl From<PodiumPosition> for u8 {
    fn from(p: PodiumPosition) -> u8 {
        p.as_u8()
    }
}

impl TryFrom<u8> for PodiumPosition {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            3 => Ok(Self::Third),
            other => Err(format!("podium position must be 1..=3, got {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodiumEntry {
    pub position: PodiumPosition,
    pub driver: Driver,
    pub score: f64,
}
