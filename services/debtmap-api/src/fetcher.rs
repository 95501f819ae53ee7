//! Series fetcher: obtains all five indicator series for one refresh.
//!
//! The fetch is all-or-nothing. The five requests run concurrently and the
//! first failure abandons the others; callers never see partial data.

use std::sync::Arc;

use chrono::Utc;
use debtmap_common::{
    parse_envelope, Dataset, DebtMapError, DebtMapResult, Indicator, IndicatorSeries, MergePolicy,
    SeriesBundle,
};
use tracing::{info, warn};

use crate::source::IndicatorSource;

pub struct SeriesFetcher {
    source: Arc<dyn IndicatorSource>,
}

impl SeriesFetcher {
    pub fn new(source: Arc<dyn IndicatorSource>) -> Self {
        Self { source }
    }

    /// Fetch and validate one series. Malformed bodies count as upstream failures.
    pub async fn fetch_series(&self, indicator: Indicator) -> DebtMapResult<IndicatorSeries> {
        let body = self.source.fetch_raw(indicator).await?;
        parse_envelope(indicator, &body).map_err(DebtMapError::into_upstream_failure)
    }

    /// Fetch all five series, or fail as a whole.
    pub async fn fetch_all(&self) -> DebtMapResult<SeriesBundle> {
        let result = tokio::try_join!(
            self.fetch_series(Indicator::GgDebtPrimary),
            self.fetch_series(Indicator::GgDebtFallback),
            self.fetch_series(Indicator::CgDebt),
            self.fetch_series(Indicator::Population),
            self.fetch_series(Indicator::Gdp),
        );

        let (gg_debt_primary, gg_debt_fallback, cg_debt, population, gdp) = match result {
            Ok(series) => series,
            Err(e) => {
                warn!(error = %e, "Indicator refresh failed");
                return Err(e);
            }
        };

        info!(
            gg_primary = gg_debt_primary.len(),
            gg_fallback = gg_debt_fallback.len(),
            cg = cg_debt.len(),
            population = population.len(),
            gdp = gdp.len(),
            "Fetched indicator series"
        );

        Ok(SeriesBundle {
            gg_debt_primary,
            gg_debt_fallback,
            cg_debt,
            population,
            gdp,
            fetched_at: Utc::now(),
        })
    }

    /// Fetch everything and build the merged dataset.
    pub async fn fetch_dataset(&self, policy: MergePolicy) -> DebtMapResult<Dataset> {
        let bundle = self.fetch_all().await?;
        Ok(Dataset::from_bundle(bundle, policy))
    }
}
