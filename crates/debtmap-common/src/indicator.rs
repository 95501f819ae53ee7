//! Catalogue of the upstream indicator series the dashboard consumes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five DataMapper series needed for a full refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    /// General government gross debt, % of GDP (World Economic Outlook).
    GgDebtPrimary,
    /// General government debt, % of GDP (Global Debt Database); fills gaps in the primary.
    GgDebtFallback,
    /// Central government debt, % of GDP.
    CgDebt,
    /// Population, millions of people.
    Population,
    /// Nominal GDP, billions of USD.
    Gdp,
}

/// Display unit of an indicator's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    PercentOfGdp,
    MillionPeople,
    BillionUsd,
}

impl Unit {
    pub fn suffix(&self) -> &'static str {
        match self {
            Unit::PercentOfGdp => "% of GDP",
            Unit::MillionPeople => "million people",
            Unit::BillionUsd => "billion USD",
        }
    }
}

impl Indicator {
    /// All indicators, in fetch order.
    pub const ALL: [Indicator; 5] = [
        Indicator::GgDebtPrimary,
        Indicator::GgDebtFallback,
        Indicator::CgDebt,
        Indicator::Population,
        Indicator::Gdp,
    ];

    /// Key under `values` in the DataMapper response.
    pub fn upstream_key(&self) -> &'static str {
        match self {
            Indicator::GgDebtPrimary => "GGXWDG_NGDP",
            Indicator::GgDebtFallback => "GG_DEBT_GDP",
            Indicator::CgDebt => "CG_DEBT_GDP",
            Indicator::Population => "LP",
            Indicator::Gdp => "NGDPD",
        }
    }

    /// Proxy route serving the raw payload.
    pub fn route(&self) -> &'static str {
        match self {
            Indicator::GgDebtPrimary => "/api/debt",
            Indicator::GgDebtFallback => "/api/gg_debt",
            Indicator::CgDebt => "/api/total_debt",
            Indicator::Population => "/api/population",
            Indicator::Gdp => "/api/gdp",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Indicator::GgDebtPrimary => "general government debt",
            Indicator::GgDebtFallback => "general government debt (fallback)",
            Indicator::CgDebt => "central government debt",
            Indicator::Population => "population",
            Indicator::Gdp => "GDP",
        }
    }

    pub fn unit(&self) -> Unit {
        match self {
            Indicator::GgDebtPrimary | Indicator::GgDebtFallback | Indicator::CgDebt => {
                Unit::PercentOfGdp
            }
            Indicator::Population => Unit::MillionPeople,
            Indicator::Gdp => Unit::BillionUsd,
        }
    }

    /// Look up an indicator by its DataMapper key.
    pub fn from_upstream_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.upstream_key() == key)
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
