//! Lenient coercion of the race selector sent by the UI.
//!
//! Bodies are loosely typed: `season` may be a string or a number, and the
//! round may arrive as `round` or `raceId`, as a number or a numeric string.

use serde_json::Value;
use thiserror::Error;

pub const DEFAULT_ROUND: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceQuery {
    pub season: String,
    pub round: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("request body is not valid JSON")]
    NotJson,
    #[error("season is missing or is not a string/number")]
    InvalidSeason,
}

pub fn parse_race_query(body: &Value) -> Result<RaceQuery, RequestError> {
    let season = coerce_season(body.get("season")).ok_or(RequestError::InvalidSeason)?;
    let raw_round = body
        .get("round")
        .filter(|v| !v.is_null())
        .or_else(|| body.get("raceId"));
    Ok(RaceQuery {
        season,
        round: coerce_round(raw_round),
    })
}

/// Parse a raw request body; invalid JSON is a client error like a bad season.
pub fn parse_race_query_bytes(bytes: &[u8]) -> Result<RaceQuery, RequestError> {
    let body: Value = serde_json::from_slice(bytes).map_err(|_| RequestError::NotJson)?;
    parse_race_query(&body)
}

fn coerce_season(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) => {
            let t = s.trim();
            (!t.is_empty()).then(|| t.to_string())
        }
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else {
                // 2024.0 -> "2024"
                let f = n.as_f64()?;
                if f.is_finite() && f.fract() == 0.0 {
                    Some(format!("{f:.0}"))
                } else {
                    Some(n.to_string())
                }
            }
        }
        _ => None,
    }
}

/// Round number, or [`DEFAULT_ROUND`] when absent, unparseable, or below 1.
pub fn coerce_round(v: Option<&Value>) -> u32 {
    let parsed = match v {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Some(Value::String(s)) => parse_int_prefix(s),
        _ => None,
    };
    parsed
        .and_then(|r| u32::try_from(r).ok())
        .filter(|&r| r >= 1)
        .unwrap_or(DEFAULT_ROUND)
}

/// Leading-integer parse: optional whitespace and sign, then digits; trailing junk ignored.
fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let len = rest.bytes().take_while(u8::is_ascii_digit).count();
    let value: i64 = rest[..len].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// `/api/races` season: a four-digit year, otherwise the current year.
pub fn season_or_current_year(param: Option<&str>, current_year: i32) -> String {
    match param {
        Some(s) if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) => s.to_string(),
        _ => current_year.to_string(),
    }
}
