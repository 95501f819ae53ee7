//! Debt map API service library.
//!
//! Proxies the fixed DataMapper indicator endpoints and the country map,
//! and serves the merged, classified dashboard view-models built from them.

pub mod config;
pub mod fetcher;
pub mod handlers;
pub mod metrics;
pub mod source;
pub mod state;

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use debtmap_common::Indicator;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Build the full HTTP router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new();

    // Raw pass-through routes, one per upstream indicator
    for indicator in Indicator::ALL {
        router = router.route(
            indicator.route(),
            get(move |Extension(state): Extension<Arc<AppState>>| {
                handlers::proxy::proxy_handler(state, indicator)
            }),
        );
    }

    router
        .route("/api/maps", get(handlers::proxy::map_handler))
        // Dashboard view-models
        .route("/api/dataset", get(handlers::dashboard::dataset_handler))
        .route(
            "/api/countries/:code",
            get(handlers::dashboard::country_handler),
        )
        .route(
            "/api/countries/:code/history",
            get(handlers::dashboard::history_handler),
        )
        .route("/api/legend", get(handlers::dashboard::legend_handler))
        .route("/api/years", get(handlers::dashboard::years_handler))
        // Health and metrics
        .route("/health", get(handlers::health::health_handler))
        .route("/metrics", get(handlers::health::metrics_handler))
        // Middleware
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
