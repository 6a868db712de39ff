use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Datelike, Utc};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::{debug, error};

use crate::config::PredictorConfig;
use crate::predict::{predict_podium, DataOrigin, MODEL_VERSION};
use crate::request::{parse_race_query_bytes, season_or_current_year, RequestError};
use crate::source::{F1DataSource, JolpicaClient};
use crate::types::{PodiumEntry, RaceOption};

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn F1DataSource>,
}

impl AppState {
    pub fn new(source: Arc<dyn F1DataSource>) -> Self {
        Self { source }
    }

    /// State backed by the live Jolpica API.
    pub fn from_config(cfg: &PredictorConfig) -> anyhow::Result<Self> {
        let client = JolpicaClient::new(cfg)?;
        Ok(Self::new(Arc::new(client)))
    }
}

/// JSON API routes (no static UI).
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/predict", post(predict))
        .route("/api/results", post(race_results))
        .route("/api/races", get(season_races))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// API routes plus the race picker UI served from `ui_dir` for every other path.
pub fn router_with_ui(state: AppState, ui_dir: impl AsRef<Path>) -> Router {
    create_router(state).fallback_service(ServeDir::new(ui_dir))
}

// ---- Errors ----

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    details: &'static str,
}

/// Error surfaced to API callers. Internal causes are logged, never returned.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(&'static str),
    Internal(&'static str),
}

impl From<RequestError> for ApiError {
    fn from(e: RequestError) -> Self {
        match e {
            RequestError::NotJson => ApiError::BadRequest(
                "Request body must be JSON with a season (string or number). round/raceId is optional.",
            ),
            RequestError::InvalidSeason => ApiError::BadRequest(
                "Expected at least a season (string or number). round/raceId is optional.",
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(details) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "Invalid request body",
                    details,
                },
            ),
            ApiError::Internal(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: "Internal server error",
                    details,
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}

// ---- /api/predict ----

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictionMeta {
    season: String,
    round: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    race_name: Option<String>,
    model_version: &'static str,
    data_origin: DataOrigin,
}

#[derive(Debug, Serialize)]
struct PredictionResponse {
    podium: Vec<PodiumEntry>,
    meta: PredictionMeta,
}

async fn predict(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PredictionResponse>, ApiError> {
    let q = parse_race_query_bytes(&body)?;
    let prediction = predict_podium(state.source.as_ref(), &q.season, q.round).await;

    Ok(Json(PredictionResponse {
        podium: prediction.podium,
        meta: PredictionMeta {
            season: q.season,
            round: q.round,
            race_name: prediction.race_name,
            model_version: MODEL_VERSION,
            data_origin: prediction.origin,
        },
    }))
}

// ---- /api/results ----

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResultRow {
    position: u32,
    driver_name: String,
    team: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RaceResultsResponse {
    season: String,
    round: u32,
    race_name: Option<String>,
    results: Vec<ResultRow>,
}

async fn race_results(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RaceResultsResponse>, ApiError> {
    let q = parse_race_query_bytes(&body)?;

    let info = match state.source.race_results(&q.season, q.round).await {
        Ok(info) => info,
        Err(e) => {
            if e.is_not_found() {
                debug!(season = %q.season, round = q.round, "race not classified");
            } else {
                error!(error = %e, season = %q.season, round = q.round, "fetching race results failed");
            }
            return Ok(Json(RaceResultsResponse {
                season: q.season,
                round: q.round,
                race_name: None,
                results: Vec::new(),
            }));
        }
    };

    Ok(Json(RaceResultsResponse {
        season: info.season,
        round: info.round,
        race_name: Some(info.race_name),
        results: info
            .results
            .into_iter()
            .map(|r| ResultRow {
                position: r.position,
                driver_name: r.driver.name,
                team: r.driver.team,
            })
            .collect(),
    }))
}

// ---- /api/races ----

#[derive(Debug, Serialize)]
struct RacesResponse {
    season: String,
    races: Vec<RaceOption>,
}

async fn season_races(
    State(state): State<AppState>,
    Query(q): Query<HashMap<String, String>>,
) -> Result<Json<RacesResponse>, ApiError> {
    let season = season_or_current_year(q.get("season").map(String::as_str), Utc::now().year());

    match state.source.season_races(&season).await {
        Ok(races) => Ok(Json(RacesResponse { season, races })),
        Err(e) => {
            error!(error = %e, %season, "fetching race list failed");
            Err(ApiError::Internal(
                "Something went wrong while fetching the race list.",
            ))
        }
    }
}
