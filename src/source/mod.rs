// src/source/mod.rs
//! Upstream data sources: season standings, race classification and calendar.

pub mod jolpica;

use thiserror::Error;

use crate::types::{RaceOption, RaceResults, StandingEntry};

pub use jolpica::JolpicaClient;

/// Failure taxonomy for upstream lookups.
///
/// `NotFound` is a legitimate "no data" answer (race not run yet, unknown round)
/// and must not be treated as an outage. Every other variant is a transient or
/// upstream failure.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no data for {what}")]
    NotFound { what: String },

    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed upstream payload: {0}")]
    Decode(String),
}

impl SourceError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Anything that can answer the three questions the predictor asks.
///
/// Implemented by [`JolpicaClient`] in production and by in-memory stubs in tests.
#[async_trait::async_trait]
pub trait F1DataSource: Send + Sync {
    /// Full driver-standings table for a season. Empty when the season has none yet.
    async fn season_standings(&self, season: &str) -> Result<Vec<StandingEntry>, SourceError>;

    /// Classification of one race; `SourceError::NotFound` when it does not exist.
    async fn race_results(&self, season: &str, round: u32) -> Result<RaceResults, SourceError>;

    /// Race calendar for a season.
    async fn season_races(&self, season: &str) -> Result<Vec<RaceOption>, SourceError>;

    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_distinguished_from_failures() {
        assert!(SourceError::not_found("2024 round 30").is_not_found());
        let e = SourceError::Status {
            status: 503,
            body: "busy".into(),
        };
        assert!(!e.is_not_found());
        assert_eq!(e.to_string(), "upstream returned 503: busy");
    }
}
