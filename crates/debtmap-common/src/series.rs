//! Per-country, per-year indicator series.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Upstream country identifier (three-letter code in the DataMapper API).
pub type CountryCode = String;

/// Reporting year. Matched exactly; never interpolated.
pub type Year = i32;

/// Values for one country, keyed by year.
pub type YearSeries = BTreeMap<Year, f64>;

/// Mapping from country to its year series.
///
/// A (country, year) pair with no entry is "absent", which is distinct from
/// a reported value of zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorSeries {
    countries: BTreeMap<CountryCode, YearSeries>,
}

impl IndicatorSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact-match lookup on country then year.
    pub fn lookup(&self, country: &str, year: Year) -> Option<f64> {
        self.countries.get(country)?.get(&year).copied()
    }

    pub fn country(&self, country: &str) -> Option<&YearSeries> {
        self.countries.get(country)
    }

    pub fn contains_country(&self, country: &str) -> bool {
        self.countries.contains_key(country)
    }

    /// Iterate over countries in code order.
    pub fn countries(&self) -> impl Iterator<Item = (&CountryCode, &YearSeries)> {
        self.countries.iter()
    }

    pub fn country_codes(&self) -> impl Iterator<Item = &CountryCode> {
        self.countries.keys()
    }

    /// Number of countries.
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn insert(&mut self, country: impl Into<CountryCode>, year: Year, value: f64) {
        self.countries
            .entry(country.into())
            .or_default()
            .insert(year, value);
    }

    /// Replace the whole year series of a country.
    pub fn insert_country(&mut self, country: impl Into<CountryCode>, years: YearSeries) {
        self.countries.insert(country.into(), years);
    }

    /// Smallest and largest year present for any country.
    pub fn year_span(&self) -> Option<(Year, Year)> {
        let mut years = self
            .countries
            .values()
            .flat_map(|ys| ys.keys().next().into_iter().chain(ys.keys().next_back()));

        let first = *years.next()?;
        Some(years.fold((first, first), |(lo, hi), &y| (lo.min(y), hi.max(y))))
    }
}

impl FromIterator<(CountryCode, YearSeries)> for IndicatorSeries {
    fn from_iter<I: IntoIterator<Item = (CountryCode, YearSeries)>>(iter: I) -> Self {
        Self {
            countries: iter.into_iter().collect(),
        }
    }
}
