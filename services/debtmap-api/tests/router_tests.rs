//! Integration tests for the debt map API routes.
//!
//! The upstream is replaced by an in-memory source so routing, error
//! mapping and view-model assembly can be checked without network access.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use bytes::Bytes;
use debtmap_api::{build_router, config::ServiceConfig, source::IndicatorSource, state::AppState};
use debtmap_common::{DebtMapError, DebtMapResult, Indicator};
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot`

const GG_PRIMARY: &str = r#"{"values": {"GGXWDG_NGDP": {"FIN": {"2020": 69.1}, "JPN": {"2020": 258.7, "2021": 255.4}}}, "api": {"version": "1"}}"#;
const GG_FALLBACK: &str =
    r#"{"values":{"GG_DEBT_GDP":{"FIN":{"2019":59.0,"2020":70.0},"SWE":{"2020":39.6}}}}"#;
const CG_DEBT: &str = r#"{"values":{"CG_DEBT_GDP":{"FIN":{"2019":50.1},"JPN":{"2020":216.2}}}}"#;
const POPULATION: &str = r#"{"values":{"LP":{"FIN":{"2020":5.53},"ISL":{"2020":0.37}}}}"#;
const GDP: &str = r#"{"values":{"NGDPD":{"FIN":{"2020":271.9},"JPN":{"2020":5040.1}}}}"#;
const WORLD_MAP: &str = r#"{"type":"FeatureCollection","features":[{"type":"Feature","id":"FIN","properties":{"name":"Finland"},"geometry":null}]}"#;

/// Test helper: In-memory upstream; a missing body behaves like an outage.
struct StubSource {
    bodies: HashMap<Indicator, &'static str>,
    map: Option<&'static str>,
}

#[async_trait]
impl IndicatorSource for StubSource {
    async fn fetch_raw(&self, indicator: Indicator) -> DebtMapResult<Bytes> {
        match self.bodies.get(&indicator).copied() {
            Some(body) => Ok(Bytes::from_static(body.as_bytes())),
            None => Err(DebtMapError::UpstreamUnavailable {
                indicator,
                message: "upstream returned 503 Service Unavailable".to_string(),
            }),
        }
    }

    async fn fetch_map(&self) -> DebtMapResult<Bytes> {
        self.map
            .map(|body| Bytes::from_static(body.as_bytes()))
            .ok_or_else(|| {
                DebtMapError::MapUnavailable("upstream returned 502 Bad Gateway".to_string())
            })
    }
}

fn all_bodies() -> HashMap<Indicator, &'static str> {
    HashMap::from([
        (Indicator::GgDebtPrimary, GG_PRIMARY),
        (Indicator::GgDebtFallback, GG_FALLBACK),
        (Indicator::CgDebt, CG_DEBT),
        (Indicator::Population, POPULATION),
        (Indicator::Gdp, GDP),
    ])
}

fn test_config() -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.years.default = 2020;
    config
}

/// Test helper: Build the router over a stub upstream
fn setup_app(bodies: HashMap<Indicator, &'static str>, config: ServiceConfig) -> Router {
    setup_app_with_map(bodies, Some(WORLD_MAP), config)
}

fn setup_app_with_map(
    bodies: HashMap<Indicator, &'static str>,
    map: Option<&'static str>,
    config: ServiceConfig,
) -> Router {
    let state = AppState::new(Arc::new(StubSource { bodies, map }), config);
    build_router(Arc::new(state))
}

fn test_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: Router, uri: &str) -> (StatusCode, Bytes) {
    let response = app.oneshot(test_request(uri)).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    (status, bytes)
}

async fn send_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, bytes) = send(app, uri).await;
    (status, serde_json::from_slice(&bytes).expect("Should parse JSON"))
}

fn shade<'a>(body: &'a Value, code: &str) -> &'a Value {
    body["countries"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["code"] == code)
        .unwrap_or_else(|| panic!("{code} missing from choropleth"))
}

// =============================================================================
// Proxy routes
// =============================================================================

#[tokio::test]
async fn test_proxy_routes_pass_body_through() {
    for indicator in Indicator::ALL {
        let app = setup_app(all_bodies(), test_config());
        let response = app.oneshot(test_request(indicator.route())).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(bytes, all_bodies()[&indicator].as_bytes());
    }
}

#[tokio::test]
async fn test_proxy_upstream_failure_is_500() {
    let mut bodies = all_bodies();
    bodies.remove(&Indicator::Gdp);

    let (status, body) = send_json(setup_app(bodies, test_config()), "/api/gdp").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("503"));
}

#[tokio::test]
async fn test_proxy_does_not_validate_shape() {
    let mut bodies = all_bodies();
    bodies.insert(Indicator::Population, r#"{"unexpected":true}"#);

    let (status, bytes) = send(setup_app(bodies, test_config()), "/api/population").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, r#"{"unexpected":true}"#.as_bytes());
}

#[tokio::test]
async fn test_map_route_passes_geojson_through() {
    let app = setup_app(all_bodies(), test_config());
    let response = app.oneshot(test_request("/api/maps")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(bytes, WORLD_MAP.as_bytes());
}

#[tokio::test]
async fn test_map_route_failure_is_500() {
    let (status, body) = send_json(
        setup_app_with_map(all_bodies(), None, test_config()),
        "/api/maps",
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("502"));
}

// =============================================================================
// Dataset
// =============================================================================

#[tokio::test]
async fn test_dataset_general_mode() {
    let (status, body) = send_json(setup_app(all_bodies(), test_config()), "/api/dataset").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["year"], 2020);
    assert_eq!(body["mode"], "general");
    assert!(body["fetched_at"].is_string());

    // Primary wins over the fallback's 70.0
    let fin = shade(&body, "FIN");
    assert_eq!(fin["value"], 69.1);
    assert_eq!(fin["class"], "up_to_70");
    assert_eq!(fin["fill_color"], "#fab733");

    // Present only in the fallback, excluded by default
    let swe = shade(&body, "SWE");
    assert!(swe["value"].is_null());
    assert_eq!(swe["class"], "no_data");

    assert_eq!(shade(&body, "JPN")["class"], "above_100");
}

#[tokio::test]
async fn test_dataset_fills_gaps_from_fallback() {
    let (status, body) = send_json(
        setup_app(all_bodies(), test_config()),
        "/api/dataset?year=2019",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(shade(&body, "FIN")["value"], 59.0);
}

#[tokio::test]
async fn test_dataset_central_mode() {
    let (status, body) = send_json(
        setup_app(all_bodies(), test_config()),
        "/api/dataset?year=2020&mode=central",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "central");
    assert!(shade(&body, "FIN")["value"].is_null());
    assert_eq!(shade(&body, "JPN")["value"], 216.2);
}

#[tokio::test]
async fn test_dataset_includes_fallback_only_countries_when_configured() {
    let mut config = test_config();
    config.merge.include_fallback_only_countries = true;

    let (_, body) = send_json(setup_app(all_bodies(), config), "/api/dataset").await;
    let swe = shade(&body, "SWE");
    assert_eq!(swe["value"], 39.6);
    assert_eq!(swe["class"], "up_to_40");
}

#[tokio::test]
async fn test_dataset_fails_when_any_series_fails() {
    let mut bodies = all_bodies();
    bodies.remove(&Indicator::CgDebt);

    let (status, body) = send_json(setup_app(bodies, test_config()), "/api/dataset").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("central government debt"));
    assert!(body.get("countries").is_none());
}

#[tokio::test]
async fn test_dataset_fails_on_malformed_series() {
    let mut bodies = all_bodies();
    bodies.insert(Indicator::GgDebtFallback, r#"{"values":{}}"#);

    let (status, body) = send_json(setup_app(bodies, test_config()), "/api/dataset").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("malformed payload"));
}

#[tokio::test]
async fn test_dataset_rejects_out_of_range_year() {
    let (status, body) = send_json(
        setup_app(all_bodies(), test_config()),
        "/api/dataset?year=1850",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("year"));
}

async fn assert_json_bad_request(uri: &str) {
    let app = setup_app(all_bodies(), test_config());
    let response = app.oneshot(test_request(uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json",
        "{uri}"
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).expect("Should parse JSON");
    assert!(body["error"].as_str().unwrap().contains("query"), "{uri}");
}

#[tokio::test]
async fn test_unknown_mode_is_json_400() {
    assert_json_bad_request("/api/dataset?mode=foo").await;
}

#[tokio::test]
async fn test_non_numeric_year_is_json_400() {
    assert_json_bad_request("/api/dataset?year=abc").await;
    assert_json_bad_request("/api/countries/FIN?year=x").await;
}

// =============================================================================
// Country views
// =============================================================================

#[tokio::test]
async fn test_country_profile() {
    let (status, body) = send_json(
        setup_app(all_bodies(), test_config()),
        "/api/countries/fin?year=2020",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "FIN");
    assert_eq!(body["population"], 5.53);
    assert_eq!(body["general_debt_ratio"], 69.1);
    assert!(body["central_debt_ratio"].is_null());
    assert_eq!(body["display"]["population"], "5.530 million people");
    assert_eq!(body["display"]["gdp"], "271.900 billion USD");
    assert_eq!(body["display"]["central_debt"], "Data unavailable");
}

#[tokio::test]
async fn test_country_profile_after_central_coverage() {
    let (status, body) = send_json(
        setup_app(all_bodies(), test_config()),
        "/api/countries/FIN?year=2024",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["gdp"].is_null());
    assert_eq!(body["display"]["gdp"], "Data unavailable");
    assert_eq!(body["display"]["central_debt"], "Data only available until 2020");
}

#[tokio::test]
async fn test_country_profile_unknown_country() {
    let (status, body) =
        send_json(setup_app(all_bodies(), test_config()), "/api/countries/XXX").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("XXX"));
}

#[tokio::test]
async fn test_debt_history() {
    let (status, body) = send_json(
        setup_app(all_bodies(), test_config()),
        "/api/countries/FIN/history",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["years"], serde_json::json!([2019, 2020]));
    assert_eq!(body["general"], serde_json::json!([59.0, 69.1]));
    assert_eq!(body["central"], serde_json::json!([50.1, null]));
}

#[tokio::test]
async fn test_debt_history_without_general_debt() {
    let (status, _) = send_json(
        setup_app(all_bodies(), test_config()),
        "/api/countries/ISL/history",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Static views, health
// =============================================================================

#[tokio::test]
async fn test_legend() {
    let (status, body) = send_json(setup_app(all_bodies(), test_config()), "/api/legend").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Debt % per GDP");
    assert_eq!(body["no_data"]["color"], "black");

    let bands = body["bands"].as_array().unwrap();
    assert_eq!(bands.len(), 8);
    assert_eq!(bands[0]["lower_bound"], 0.0);
    assert_eq!(bands[0]["color"], "green");
    assert_eq!(bands[7]["label"], "100+");
}

#[tokio::test]
async fn test_years() {
    let (status, body) = send_json(setup_app(all_bodies(), test_config()), "/api/years").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["min"], 1990);
    assert_eq!(body["max"], 2025);
    assert_eq!(body["default"], 2020);
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send_json(setup_app(all_bodies(), test_config()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "debtmap-api");
}

#[tokio::test]
async fn test_metrics_without_recorder() {
    let (status, _) = send(setup_app(all_bodies(), test_config()), "/metrics").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
