//! Protected data endpoints.
//!
//! Thin transforms over the built-in sample sheets. Every handler calls the
//! token guard first, passing the optional `token` query parameter so clients
//! that cannot set an `Authorization` header still work.

use crate::error::{ApiError, ApiResult};
use crate::sheets::Sheet;
use crate::state::ServerState;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const MAX_BINS: usize = 50;

/// Query parameters shared by the simple protected endpoints
#[derive(Debug, Deserialize)]
pub struct AuthQuery {
    /// Explicit token, overriding the Authorization header
    #[serde(default)]
    pub token: Option<String>,
}

/// Query parameters for the summary endpoint
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub sheet: String,
    pub column: String,
    #[serde(default = "default_bins")]
    pub bins: usize,
    #[serde(default)]
    pub token: Option<String>,
}

fn default_bins() -> usize {
    10
}

/// Numeric summary of one sheet column
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub sheet: String,
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub histogram: Vec<u32>,
}

/// List the available sheets
pub async fn list_sheets(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    Query(query): Query<AuthQuery>,
) -> ApiResult<Json<Vec<String>>> {
    state.require_token(&headers, query.token.as_deref())?;

    let mut names: Vec<String> = state.sheets.keys().cloned().collect();
    names.sort();
    Ok(Json(names))
}

/// Fetch one sheet by name
pub async fn get_sheet(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    Path(name): Path<String>,
    Query(query): Query<AuthQuery>,
) -> ApiResult<Json<Sheet>> {
    state.require_token(&headers, query.token.as_deref())?;

    let sheet = lookup_sheet(&state, &name)?;
    Ok(Json(sheet.clone()))
}

/// Summarize a numeric column of a sheet
///
/// Returns count, mean, min, max and an equal-width histogram with `bins`
/// buckets (1..=50, default 10).
pub async fn column_summary(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    Query(query): Query<SummaryQuery>,
) -> ApiResult<Json<SummaryResponse>> {
    state.require_token(&headers, query.token.as_deref())?;

    if query.bins < 1 || query.bins > MAX_BINS {
        return Err(ApiError::bad_request(format!(
            "bins must be between 1 and {MAX_BINS}"
        )));
    }

    let sheet = lookup_sheet(&state, &query.sheet)?;
    let values = sheet.column(&query.column).ok_or_else(|| {
        ApiError::bad_request(format!(
            "Unknown column '{}' in sheet '{}'",
            query.column, query.sheet
        ))
    })?;

    if values.is_empty() {
        return Err(ApiError::bad_request(format!(
            "Column '{}' has no values",
            query.column
        )));
    }

    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Ok(Json(SummaryResponse {
        sheet: query.sheet,
        column: query.column,
        count,
        mean,
        min,
        max,
        histogram: histogram(&values, min, max, query.bins),
    }))
}

fn lookup_sheet<'a>(state: &'a ServerState, name: &str) -> ApiResult<&'a Sheet> {
    state
        .sheets
        .get(name)
        .ok_or_else(|| ApiError::not_found(format!("Unknown sheet '{name}'")))
}

/// Equal-width histogram over [min, max]; a zero-width span lands everything
/// in the first bucket.
fn histogram(values: &[f64], min: f64, max: f64, bins: usize) -> Vec<u32> {
    let span = max - min;
    let mut counts = vec![0u32; bins];

    for value in values {
        let idx = if span == 0.0 {
            0
        } else {
            (((value - min) / span) * bins as f64) as usize
        };
        counts[idx.min(bins - 1)] += 1;
    }

    counts
}
