//! Validation of DataMapper response envelopes.
//!
//! Every indicator endpoint answers with the same wrapper:
//!
//! ```json
//! { "values": { "<INDICATOR_KEY>": { "<country>": { "<year>": 12.3 } } }, "api": { ... } }
//! ```
//!
//! Only the key belonging to the requested indicator is unwrapped. Anything
//! that does not match the expected shape is rejected as a whole.

use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::{DebtMapError, DebtMapResult};
use crate::indicator::Indicator;
use crate::series::{CountryCode, IndicatorSeries, Year, YearSeries};

#[derive(Debug, Deserialize)]
struct Envelope {
    values: BTreeMap<String, serde_json::Value>,
}

type RawCountries = BTreeMap<CountryCode, BTreeMap<String, Option<f64>>>;

/// Parse a raw upstream body into the series for `indicator`.
///
/// `null` values are dropped (absent), never turned into zero.
pub fn parse_envelope(indicator: Indicator, body: &[u8]) -> DebtMapResult<IndicatorSeries> {
    let malformed = |message: String| DebtMapError::MalformedPayload { indicator, message };

    let envelope: Envelope = serde_json::from_slice(body)
        .map_err(|e| malformed(format!("unexpected envelope: {}", e)))?;

    let key = indicator.upstream_key();
    let raw = envelope
        .values
        .get(key)
        .ok_or_else(|| malformed(format!("missing 'values.{}'", key)))?;

    let countries: RawCountries = serde_json::from_value(raw.clone())
        .map_err(|e| malformed(format!("unexpected 'values.{}' shape: {}", key, e)))?;

    let mut series = IndicatorSeries::new();
    for (country, years) in countries {
        let mut parsed = YearSeries::new();
        for (year, value) in years {
            let year = parse_year(&year).ok_or_else(|| {
                malformed(format!("non-numeric year '{}' for {}", year, country))
            })?;
            if let Some(value) = value {
                parsed.insert(year, value);
            }
        }
        series.insert_country(country, parsed);
    }

    debug!(
        indicator = %indicator,
        countries = series.len(),
        "Parsed indicator envelope"
    );

    Ok(series)
}

/// Year keys are plain decimal digits; signs and padding would alias other keys.
fn parse_year(key: &str) -> Option<Year> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse().ok()
}
