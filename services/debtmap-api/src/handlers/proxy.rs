//! Pass-through routes for the upstream indicator endpoints and the
//! country boundary map.
//!
//! The body is relayed byte for byte on success. Any upstream failure
//! becomes a 500 with `{ "error": <message> }`.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use debtmap_common::{DebtMapResult, Indicator};
use tracing::error;

use crate::handlers::common::error_response;
use crate::metrics;
use crate::state::AppState;

/// GET /api/{debt,gg_debt,total_debt,population,gdp}
pub async fn proxy_handler(state: Arc<AppState>, indicator: Indicator) -> Response {
    let result = state.source.fetch_raw(indicator).await;
    relay(indicator.upstream_key(), result)
}

/// GET /api/maps - Country boundary GeoJSON
pub async fn map_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    let result = state.source.fetch_map().await;
    relay(metrics::MAP_SOURCE, result)
}

fn relay(source: &'static str, result: DebtMapResult<Bytes>) -> Response {
    match result {
        Ok(body) => {
            metrics::record_proxy_request(source, StatusCode::OK.as_u16());
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                body,
            )
                .into_response()
        }
        Err(e) => {
            error!(source = source, error = %e, "Proxy request failed");
            metrics::record_proxy_request(source, StatusCode::INTERNAL_SERVER_ERROR.as_u16());
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
