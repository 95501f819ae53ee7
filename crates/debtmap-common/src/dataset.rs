//! Normalized dashboard dataset and the view-models built from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::classify::{classify, DebtClass};
use crate::error::{DebtMapError, DebtMapResult};
use crate::indicator::{Indicator, Unit};
use crate::merge::{merge_with_policy, MergePolicy};
use crate::series::{CountryCode, IndicatorSeries, Year};

/// Display text for an absent value.
pub const DATA_UNAVAILABLE: &str = "Data unavailable";

/// The five raw series of one refresh cycle, as received.
#[derive(Debug, Clone)]
pub struct SeriesBundle {
    pub gg_debt_primary: IndicatorSeries,
    pub gg_debt_fallback: IndicatorSeries,
    pub cg_debt: IndicatorSeries,
    pub population: IndicatorSeries,
    pub gdp: IndicatorSeries,
    pub fetched_at: DateTime<Utc>,
}

impl SeriesBundle {
    pub fn get(&self, indicator: Indicator) -> &IndicatorSeries {
        match indicator {
            Indicator::GgDebtPrimary => &self.gg_debt_primary,
            Indicator::GgDebtFallback => &self.gg_debt_fallback,
            Indicator::CgDebt => &self.cg_debt,
            Indicator::Population => &self.population,
            Indicator::Gdp => &self.gdp,
        }
    }
}

/// Which debt concept the map shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtMode {
    /// Merged general government debt.
    #[default]
    General,
    /// Central government debt, single source.
    Central,
}

impl fmt::Display for DebtMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DebtMode::General => f.write_str("general"),
            DebtMode::Central => f.write_str("central"),
        }
    }
}

/// Shading of one country on the choropleth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryShade {
    pub code: CountryCode,
    /// Debt-to-GDP ratio, `None` when not reported.
    pub value: Option<f64>,
    pub class: DebtClass,
    pub fill_color: &'static str,
}

/// Preformatted text for the country info box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileDisplay {
    pub population: String,
    pub gdp: String,
    pub general_debt: String,
    pub central_debt: String,
}

/// Everything known about one country in one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryProfile {
    pub code: CountryCode,
    pub year: Year,
    /// Millions of people.
    pub population: Option<f64>,
    /// Billions of USD.
    pub gdp: Option<f64>,
    pub general_debt_ratio: Option<f64>,
    pub central_debt_ratio: Option<f64>,
    /// Billions of USD, `ratio / 100 * gdp`.
    pub general_debt_amount: Option<f64>,
    pub central_debt_amount: Option<f64>,
    pub display: ProfileDisplay,
}

/// Debt ratio history of one country for charting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebtHistory {
    pub code: CountryCode,
    /// Years of the merged general government series, ascending.
    pub years: Vec<Year>,
    pub general: Vec<f64>,
    /// Central government values aligned to `years`.
    pub central: Vec<Option<f64>>,
}

/// Merged, read-only dataset for one refresh cycle.
#[derive(Debug, Clone)]
pub struct Dataset {
    general_debt: IndicatorSeries,
    central_debt: IndicatorSeries,
    population: IndicatorSeries,
    gdp: IndicatorSeries,
    fetched_at: DateTime<Utc>,
}

impl Dataset {
    /// Merge the general government series and take ownership of the rest.
    pub fn from_bundle(bundle: SeriesBundle, policy: MergePolicy) -> Self {
        let general_debt =
            merge_with_policy(&bundle.gg_debt_primary, &bundle.gg_debt_fallback, policy);

        Self {
            general_debt,
            central_debt: bundle.cg_debt,
            population: bundle.population,
            gdp: bundle.gdp,
            fetched_at: bundle.fetched_at,
        }
    }

    pub fn debt(&self, mode: DebtMode) -> &IndicatorSeries {
        match mode {
            DebtMode::General => &self.general_debt,
            DebtMode::Central => &self.central_debt,
        }
    }

    pub fn population(&self) -> &IndicatorSeries {
        &self.population
    }

    pub fn gdp(&self) -> &IndicatorSeries {
        &self.gdp
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn lookup(&self, mode: DebtMode, country: &str, year: Year) -> Option<f64> {
        self.debt(mode).lookup(country, year)
    }

    /// Every country code present in any series, sorted.
    pub fn country_codes(&self) -> BTreeSet<&str> {
        [
            &self.general_debt,
            &self.central_debt,
            &self.population,
            &self.gdp,
        ]
        .into_iter()
        .flat_map(|s| s.country_codes())
        .map(String::as_str)
        .collect()
    }

    pub fn knows_country(&self, country: &str) -> bool {
        self.general_debt.contains_country(country)
            || self.central_debt.contains_country(country)
            || self.population.contains_country(country)
            || self.gdp.contains_country(country)
    }

    /// Shade every known country for the selected year and debt concept.
    pub fn choropleth(&self, mode: DebtMode, year: Year) -> Vec<CountryShade> {
        self.country_codes()
            .into_iter()
            .map(|code| {
                let value = self.lookup(mode, code, year);
                let class = classify(value);
                CountryShade {
                    code: code.to_string(),
                    value,
                    class,
                    fill_color: class.color(),
                }
            })
            .collect()
    }

    /// Info box contents for one country and year.
    pub fn country_profile(&self, country: &str, year: Year) -> DebtMapResult<CountryProfile> {
        if !self.knows_country(country) {
            return Err(DebtMapError::CountryNotFound(country.to_string()));
        }

        let population = self.population.lookup(country, year);
        let gdp = self.gdp.lookup(country, year);
        let general_debt_ratio = self.general_debt.lookup(country, year);
        let central_debt_ratio = self.central_debt.lookup(country, year);
        let general_debt_amount = debt_amount(general_debt_ratio, gdp);
        let central_debt_amount = debt_amount(central_debt_ratio, gdp);

        let central_debt = match (central_debt_ratio, self.central_debt.year_span()) {
            (None, Some((_, last))) if year > last => {
                format!("Data only available until {}", last)
            }
            _ => format_value(central_debt_amount, Unit::BillionUsd),
        };

        Ok(CountryProfile {
            code: country.to_string(),
            year,
            population,
            gdp,
            general_debt_ratio,
            central_debt_ratio,
            general_debt_amount,
            central_debt_amount,
            display: ProfileDisplay {
                population: format_value(population, Unit::MillionPeople),
                gdp: format_value(gdp, Unit::BillionUsd),
                general_debt: format_value(general_debt_amount, Unit::BillionUsd),
                central_debt,
            },
        })
    }

    /// Chart series for one country, `None` without general government data.
    pub fn debt_history(&self, country: &str) -> Option<DebtHistory> {
        let general = self.general_debt.country(country)?;
        if general.is_empty() {
            return None;
        }

        let years: Vec<Year> = general.keys().copied().collect();
        let central = years
            .iter()
            .map(|&y| self.central_debt.lookup(country, y))
            .collect();

        Some(DebtHistory {
            code: country.to_string(),
            general: general.values().copied().collect(),
            central,
            years,
        })
    }
}

fn debt_amount(ratio: Option<f64>, gdp: Option<f64>) -> Option<f64> {
    Some(ratio? / 100.0 * gdp?)
}

/// Three decimals and a unit, or an explicit unavailable marker.
pub fn format_value(value: Option<f64>, unit: Unit) -> String {
    match value {
        Some(v) => format!("{:.3} {}", v, unit.suffix()),
        None => DATA_UNAVAILABLE.to_string(),
    }
}
