//! Service configuration.
//!
//! Loaded from an optional YAML file, then individual upstream URLs may be
//! overridden from the environment.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use debtmap_common::{Indicator, MergePolicy, Year, YearRange};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Environment variables overriding a single upstream URL.
pub const URL_ENV_VARS: [(Indicator, &str); 5] = [
    (Indicator::GgDebtPrimary, "IMF_INDICATOR"),
    (Indicator::GgDebtFallback, "IMF_GG_DEBT"),
    (Indicator::CgDebt, "IMF_TOTAL_DEBT"),
    (Indicator::Population, "IMF_POPULATION"),
    (Indicator::Gdp, "IMF_GDP"),
];

/// Environment variable overriding the country boundary GeoJSON URL.
pub const MAP_URL_ENV_VAR: &str = "MAP_URL";

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub merge: MergeConfig,
    #[serde(default)]
    pub years: YearsConfig,
}

/// DataMapper API settings.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Per-indicator URL overrides, keyed by upstream indicator key (e.g. "LP").
    #[serde(default)]
    pub urls: HashMap<String, String>,

    /// Country boundary GeoJSON relayed at `/api/maps`.
    #[serde(default)]
    pub map_url: Option<String>,
}

fn default_base_url() -> String {
    "https://www.imf.org/external/datamapper/api/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            urls: HashMap::new(),
            map_url: None,
        }
    }
}

impl UpstreamConfig {
    /// Resolve the URL serving `indicator`.
    pub fn url_for(&self, indicator: Indicator) -> String {
        match self.urls.get(indicator.upstream_key()) {
            Some(url) => url.clone(),
            None => format!(
                "{}/{}",
                self.base_url.trim_end_matches('/'),
                indicator.upstream_key()
            ),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MergeConfig {
    /// Keep countries only the fallback debt series reports.
    #[serde(default)]
    pub include_fallback_only_countries: bool,
}

impl MergeConfig {
    pub fn policy(&self) -> MergePolicy {
        MergePolicy::from_include_fallback_only(self.include_fallback_only_countries)
    }
}

/// Year slider settings.
#[derive(Debug, Clone, Deserialize)]
pub struct YearsConfig {
    #[serde(default = "default_min_year")]
    pub min: Year,
    #[serde(default = "default_max_year")]
    pub max: Year,
    #[serde(default = "default_year")]
    pub default: Year,
}

fn default_min_year() -> Year {
    YearRange::default().min
}

fn default_max_year() -> Year {
    YearRange::default().max
}

fn default_year() -> Year {
    2024
}

impl Default for YearsConfig {
    fn default() -> Self {
        Self {
            min: default_min_year(),
            max: default_max_year(),
            default: default_year(),
        }
    }
}

impl YearsConfig {
    pub fn range(&self) -> YearRange {
        YearRange::new(self.min, self.max)
    }
}

impl ServiceConfig {
    /// Load configuration from a YAML file; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        info!(path = %path.display(), "Loaded service configuration");
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply upstream URL overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply upstream URL overrides from an arbitrary variable lookup.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        for (indicator, var) in URL_ENV_VARS {
            if let Some(url) = lookup(var).filter(|u| !u.trim().is_empty()) {
                debug!(indicator = %indicator, var = var, "Upstream URL overridden");
                self.upstream
                    .urls
                    .insert(indicator.upstream_key().to_string(), url);
            }
        }

        if let Some(url) = lookup(MAP_URL_ENV_VAR).filter(|u| !u.trim().is_empty()) {
            debug!(var = MAP_URL_ENV_VAR, "Map URL overridden");
            self.upstream.map_url = Some(url);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.upstream.timeout_secs == 0 || self.upstream.connect_timeout_secs == 0 {
            bail!("Upstream timeouts must be positive");
        }
        if self.upstream.base_url.trim().is_empty() {
            bail!("Upstream base_url must not be empty");
        }
        for (key, url) in &self.upstream.urls {
            if Indicator::from_upstream_key(key).is_none() {
                bail!("Unknown indicator key in upstream.urls: {}", key);
            }
            if url.trim().is_empty() {
                bail!("Upstream URL for {} must not be empty", key);
            }
        }

        if let Some(url) = &self.upstream.map_url {
            if url.trim().is_empty() {
                bail!("Upstream map_url must not be empty when set");
            }
        }

        let years = &self.years;
        if !(years.min <= years.default && years.default <= years.max) {
            bail!(
                "Year range must satisfy min <= default <= max (got {} <= {} <= {})",
                years.min,
                years.default,
                years.max
            );
        }
        Ok(())
    }
}
