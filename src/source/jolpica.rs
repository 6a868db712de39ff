// src/source/jolpica.rs
//! Client for Jolpica's Ergast-compatible API (`/ergast/f1/...`).
//!
//! The feed encodes every number as a string and nests the payload under
//! `MRData`. Only the minimal subset the predictor needs is modelled here.

use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use metrics::{counter, histogram};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{F1DataSource, SourceError};
use crate::config::PredictorConfig;
use crate::types::{Driver, RaceOption, RaceResultEntry, RaceResults, StandingEntry};

const ERGAST_F1_PATH: [&str; 2] = ["ergast", "f1"];
const UNKNOWN_TEAM: &str = "Unknown Team";
const MAX_ERROR_BODY_CHARS: usize = 200;

// ---- Wire types (Ergast/Jolpica response shapes) ----

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(rename = "MRData")]
    mr_data: T,
}

#[derive(Debug, Deserialize)]
struct WireDriver {
    #[serde(rename = "driverId")]
    driver_id: String,
    #[serde(rename = "givenName")]
    given_name: String,
    #[serde(rename = "familyName")]
    family_name: String,
    code: Option<String>,
    #[serde(rename = "permanentNumber")]
    permanent_number: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireConstructor {
    name: String,
}

#[derive(Debug, Deserialize)]
struct StandingsData {
    #[serde(rename = "StandingsTable")]
    standings_table: StandingsTable,
}

#[derive(Debug, Deserialize)]
struct StandingsTable {
    #[serde(rename = "StandingsLists", default)]
    standings_lists: Vec<StandingsList>,
}

#[derive(Debug, Deserialize)]
struct StandingsList {
    #[serde(rename = "DriverStandings", default)]
    driver_standings: Vec<WireDriverStanding>,
}

#[derive(Debug, Deserialize)]
struct WireDriverStanding {
    // Missing for excluded drivers (positionText "-").
    position: Option<String>,
    points: String,
    wins: String,
    #[serde(rename = "Driver")]
    driver: WireDriver,
    #[serde(rename = "Constructors", default)]
    constructors: Vec<WireConstructor>,
}

#[derive(Debug, Deserialize)]
struct RaceData<R> {
    #[serde(rename = "RaceTable")]
    race_table: RaceTable<R>,
}

#[derive(Debug, Deserialize)]
struct RaceTable<R> {
    #[serde(rename = "Races", default = "Vec::new")]
    races: Vec<R>,
}

#[derive(Debug, Deserialize)]
struct WireRace {
    round: Option<String>,
    #[serde(rename = "raceName")]
    race_name: String,
    #[serde(rename = "Results", default)]
    results: Vec<WireResult>,
}

#[derive(Debug, Deserialize)]
struct WireResult {
    position: String,
    #[serde(rename = "Driver")]
    driver: WireDriver,
    #[serde(rename = "Constructor")]
    constructor: Option<WireConstructor>,
}

#[derive(Debug, Deserialize)]
struct WireSeasonRace {
    round: String,
    #[serde(rename = "raceName")]
    race_name: String,
    #[serde(rename = "Circuit")]
    circuit: Option<WireCircuit>,
}

#[derive(Debug, Deserialize)]
struct WireCircuit {
    #[serde(rename = "circuitName")]
    circuit_name: Option<String>,
    #[serde(rename = "Location")]
    location: Option<WireLocation>,
}

#[derive(Debug, Deserialize)]
struct WireLocation {
    country: Option<String>,
}

// ---- Mapping ----

fn map_driver(d: WireDriver, team: Option<String>) -> Driver {
    Driver {
        name: format!("{} {}", d.given_name, d.family_name),
        id: d.driver_id,
        code: d.code,
        team: team.unwrap_or_else(|| UNKNOWN_TEAM.to_string()),
        number: d
            .permanent_number
            .as_deref()
            .and_then(|n| n.trim().parse::<u32>().ok()),
    }
}

fn parse_num<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T, SourceError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| SourceError::Decode(format!("{field}: expected a number, got {raw:?}")))
}

/// Championship points are never negative, and `f64::from_str` also accepts `NaN` and `inf`.
fn parse_points(raw: &str) -> Result<f64, SourceError> {
    let points = parse_num::<f64>("points", raw)?;
    if !points.is_finite() || points < 0.0 {
        return Err(SourceError::Decode(format!(
            "points: expected a non-negative number, got {raw:?}"
        )));
    }
    Ok(points)
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, SourceError> {
    let env: Envelope<T> =
        serde_json::from_str(body).map_err(|e| SourceError::Decode(e.to_string()))?;
    Ok(env.mr_data)
}

fn standings_from_body(body: &str) -> Result<Vec<StandingEntry>, SourceError> {
    let data: StandingsData = decode(body)?;
    let Some(list) = data.standings_table.standings_lists.into_iter().next() else {
        return Ok(Vec::new());
    };

    list.driver_standings
        .into_iter()
        .map(|s| -> Result<StandingEntry, SourceError> {
            let position = match s.position.as_deref() {
                Some(p) => Some(parse_num::<u32>("position", p)?),
                None => None,
            };
            let points = parse_points(&s.points)?;
            let wins = parse_num::<u32>("wins", &s.wins)?;
            let team = s.constructors.into_iter().next().map(|c| c.name);
            Ok(StandingEntry {
                driver: map_driver(s.driver, team),
                position,
                points,
                wins,
            })
        })
        .collect()
}

fn race_results_from_body(
    body: &str,
    season: &str,
    round: u32,
) -> Result<RaceResults, SourceError> {
    let data: RaceData<WireRace> = decode(body)?;
    let Some(race) = data.race_table.races.into_iter().next() else {
        return Err(SourceError::not_found(format!("{season} round {round}")));
    };

    let results = race
        .results
        .into_iter()
        .map(|r| -> Result<RaceResultEntry, SourceError> {
            let position = parse_num::<u32>("position", &r.position)?;
            let team = r.constructor.map(|c| c.name);
            Ok(RaceResultEntry {
                driver: map_driver(r.driver, team),
                position,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let round = match race.round.as_deref() {
        Some(r) => parse_num::<u32>("round", r)?,
        None => round,
    };

    Ok(RaceResults {
        season: season.to_string(),
        round,
        race_name: race.race_name,
        results,
    })
}

fn season_races_from_body(body: &str) -> Result<Vec<RaceOption>, SourceError> {
    let data: RaceData<WireSeasonRace> = decode(body)?;
    data.race_table
        .races
        .into_iter()
        .map(|r| -> Result<RaceOption, SourceError> {
            let round = parse_num::<u32>("round", &r.round)?;
            let (circuit, country) = match r.circuit {
                Some(c) => (c.circuit_name, c.location.and_then(|l| l.country)),
                None => (None, None),
            };
            Ok(RaceOption {
                round,
                name: r.race_name,
                circuit,
                country,
            })
        })
        .collect()
}

fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max).collect();
        out.push('…');
        out
    }
}

// ---- Client ----

#[derive(Debug, Clone)]
pub struct JolpicaClient {
    http: reqwest::Client,
    base: Url,
    page_limit: u32,
}

impl JolpicaClient {
    pub fn new(cfg: &PredictorConfig) -> Result<Self> {
        let base = Url::parse(&cfg.jolpica_base_url)
            .with_context(|| format!("invalid Jolpica base url {:?}", cfg.jolpica_base_url))?;
        if base.cannot_be_a_base() {
            return Err(anyhow!("Jolpica base url must be hierarchical: {base}"));
        }
        let http = reqwest::Client::builder()
            .user_agent(cfg.user_agent.clone())
            .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .build()
            .context("building reqwest client")?;
        Ok(Self {
            http,
            base,
            page_limit: cfg.page_limit,
        })
    }

    /// `{base}/ergast/f1/{segments...}?limit=..&offset=0`. Segments are percent-encoded.
    fn endpoint_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(ERGAST_F1_PATH)
                .extend(segments);
        }
        url.query_pairs_mut()
            .append_pair("limit", &self.page_limit.to_string())
            .append_pair("offset", "0");
        url
    }

    async fn get_body(&self, endpoint: &'static str, segments: &[&str]) -> Result<String, SourceError> {
        let url = self.endpoint_url(segments);
        let t0 = Instant::now();

        let result = self.fetch_text(&url).await;

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("upstream_request_ms", "endpoint" => endpoint).record(ms);
        if let Err(e) = &result {
            tracing::warn!(error = %e, endpoint, url = %url, "jolpica request failed");
            counter!("upstream_errors_total", "endpoint" => endpoint).increment(1);
        }
        result
    }

    async fn fetch_text(&self, url: &Url) -> Result<String, SourceError> {
        let resp = self.http.get(url.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                status: status.as_u16(),
                body: truncate_chars(&text, MAX_ERROR_BODY_CHARS),
            });
        }
        Ok(resp.text().await?)
    }
}

#[async_trait]
impl F1DataSource for JolpicaClient {
    async fn season_standings(&self, season: &str) -> Result<Vec<StandingEntry>, SourceError> {
        let body = self
            .get_body("driverstandings", &[season, "driverstandings.json"])
            .await?;
        standings_from_body(&body)
    }

    async fn race_results(&self, season: &str, round: u32) -> Result<RaceResults, SourceError> {
        let round_seg = round.to_string();
        let body = self
            .get_body("results", &[season, round_seg.as_str(), "results.json"])
            .await?;
        race_results_from_body(&body, season, round)
    }

    async fn season_races(&self, season: &str) -> Result<Vec<RaceOption>, SourceError> {
        let file = format!("{season}.json");
        let body = self.get_body("races", &[file.as_str()]).await?;
        season_races_from_body(&body)
    }

    fn name(&self) -> &'static str {
        "jolpica"
    }
}
