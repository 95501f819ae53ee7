//! Dashboard view-model handlers.
//!
//! Each request runs its own refresh: all five series are fetched, the
//! general government series merged, and the requested view built.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Extension, Path, Query},
    Json,
};
use chrono::{DateTime, Utc};
use debtmap_common::{
    CountryProfile, CountryShade, DebtHistory, DebtMapError, DebtMode, Legend, Year,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::handlers::common::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DatasetQuery {
    pub year: Option<Year>,
    pub mode: Option<DebtMode>,
}

#[derive(Debug, Deserialize)]
pub struct YearQuery {
    pub year: Option<Year>,
}

#[derive(Debug, Serialize)]
pub struct DatasetResponse {
    pub year: Year,
    pub mode: DebtMode,
    pub fetched_at: DateTime<Utc>,
    pub countries: Vec<CountryShade>,
}

#[derive(Debug, Serialize)]
pub struct YearsResponse {
    pub min: Year,
    pub max: Year,
    pub default: Year,
}

fn selected_year(state: &AppState, requested: Option<Year>) -> Result<Year, ApiError> {
    let years = &state.config.years;
    let year = requested.unwrap_or(years.default);
    Ok(years.range().validate(year)?)
}

/// Unwrap query parameters, turning a rejection into a JSON 400.
fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    query.map(|Query(params)| params).map_err(|rejection| {
        ApiError(DebtMapError::invalid_parameter(
            "query",
            rejection.body_text(),
        ))
    })
}

fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// GET /api/dataset?year=&mode= - Choropleth shading for every country
pub async fn dataset_handler(
    Extension(state): Extension<Arc<AppState>>,
    query: Result<Query<DatasetQuery>, QueryRejection>,
) -> Result<Json<DatasetResponse>, ApiError> {
    let query = query_params(query)?;
    let year = selected_year(&state, query.year)?;
    let mode = query.mode.unwrap_or_default();

    let dataset = state
        .fetcher
        .fetch_dataset(state.config.merge.policy())
        .await?;

    let countries = dataset.choropleth(mode, year);
    debug!(year, mode = %mode, countries = countries.len(), "Built choropleth");

    Ok(Json(DatasetResponse {
        year,
        mode,
        fetched_at: dataset.fetched_at(),
        countries,
    }))
}

/// GET /api/countries/:code?year= - Country info box
pub async fn country_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(code): Path<String>,
    query: Result<Query<YearQuery>, QueryRejection>,
) -> Result<Json<CountryProfile>, ApiError> {
    let query = query_params(query)?;
    let year = selected_year(&state, query.year)?;
    let code = normalize_code(&code);

    let dataset = state
        .fetcher
        .fetch_dataset(state.config.merge.policy())
        .await?;

    Ok(Json(dataset.country_profile(&code, year)?))
}

/// GET /api/countries/:code/history - Debt ratio chart series
pub async fn history_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<DebtHistory>, ApiError> {
    let code = normalize_code(&code);

    let dataset = state
        .fetcher
        .fetch_dataset(state.config.merge.policy())
        .await?;

    dataset
        .debt_history(&code)
        .map(Json)
        .ok_or_else(|| ApiError(DebtMapError::CountryNotFound(code)))
}

/// GET /api/legend - Legend bands for the debt-to-GDP choropleth
pub async fn legend_handler() -> Json<Legend> {
    Json(Legend::debt_ratio())
}

/// GET /api/years - Selectable year range
pub async fn years_handler(Extension(state): Extension<Arc<AppState>>) -> Json<YearsResponse> {
    let years = &state.config.years;
    Json(YearsResponse {
        min: years.min,
        max: years.max,
        default: years.default,
    })
}
