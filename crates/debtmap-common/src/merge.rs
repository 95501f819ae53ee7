//! Merging of the two general-government debt series.
//!
//! The primary series (WEO) is authoritative; the fallback series (GDD)
//! only fills years the primary leaves empty. Inputs are never mutated.

use serde::{Deserialize, Serialize};

use crate::series::IndicatorSeries;

/// Which countries make it into a merged series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Only countries present in the primary series.
    #[default]
    PrimaryCountries,
    /// Primary countries plus countries only the fallback reports.
    AllCountries,
}

impl MergePolicy {
    pub fn from_include_fallback_only(include: bool) -> Self {
        if include {
            MergePolicy::AllCountries
        } else {
            MergePolicy::PrimaryCountries
        }
    }
}

/// Merge general government debt, with the primary defining the country set.
pub fn merge_general_government_debt(
    primary: &IndicatorSeries,
    fallback: &IndicatorSeries,
) -> IndicatorSeries {
    merge_with_policy(primary, fallback, MergePolicy::PrimaryCountries)
}

/// Merge general government debt under an explicit country policy.
///
/// For every (country, year) the primary value wins when present; otherwise
/// the fallback value is used. Values are copied unchanged.
pub fn merge_with_policy(
    primary: &IndicatorSeries,
    fallback: &IndicatorSeries,
    policy: MergePolicy,
) -> IndicatorSeries {
    let mut merged = IndicatorSeries::new();

    for (country, years) in primary.countries() {
        let mut entry = years.clone();
        if let Some(fill) = fallback.country(country) {
            for (year, value) in fill {
                entry.entry(*year).or_insert(*value);
            }
        }
        merged.insert_country(country.clone(), entry);
    }

    if policy == MergePolicy::AllCountries {
        for (country, years) in fallback.countries() {
            if !primary.contains_country(country) {
                merged.insert_country(country.clone(), years.clone());
            }
        }
    }

    merged
}
