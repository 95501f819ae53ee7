//! Debt-to-GDP choropleth classification.
//!
//! A single threshold table drives both [`classify`] and [`legend_bands`].
//! Bounds are strict: a ratio belongs to the highest band whose lower bound
//! it exceeds, so exactly 100 falls in the 85-100 band.

use serde::Serialize;

/// Color for countries with no (or non-positive) data.
pub const NO_DATA_COLOR: &str = "black";

/// Severity class of a debt-to-GDP ratio, ordered from no data upwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum DebtClass {
    #[serde(rename = "no_data")]
    NoData,
    #[serde(rename = "up_to_10")]
    UpTo10,
    #[serde(rename = "up_to_25")]
    UpTo25,
    #[serde(rename = "up_to_40")]
    UpTo40,
    #[serde(rename = "up_to_55")]
    UpTo55,
    #[serde(rename = "up_to_70")]
    UpTo70,
    #[serde(rename = "up_to_85")]
    UpTo85,
    #[serde(rename = "up_to_100")]
    UpTo100,
    #[serde(rename = "above_100")]
    Above100,
}

struct Threshold {
    lower_bound: f64,
    class: DebtClass,
    color: &'static str,
    label: &'static str,
}

/// Ascending by lower bound.
static THRESHOLDS: [Threshold; 8] = [
    Threshold { lower_bound: 0.0, class: DebtClass::UpTo10, color: "green", label: "0–10" },
    Threshold { lower_bound: 10.0, class: DebtClass::UpTo25, color: "#3baf4a", label: "10–25" },
    Threshold { lower_bound: 25.0, class: DebtClass::UpTo40, color: "#69b34c", label: "25–40" },
    Threshold { lower_bound: 40.0, class: DebtClass::UpTo55, color: "#acb334", label: "40–55" },
    Threshold { lower_bound: 55.0, class: DebtClass::UpTo70, color: "#fab733", label: "55–70" },
    Threshold { lower_bound: 70.0, class: DebtClass::UpTo85, color: "#ff8e15", label: "70–85" },
    Threshold { lower_bound: 85.0, class: DebtClass::UpTo100, color: "#ff4e11", label: "85–100" },
    Threshold { lower_bound: 100.0, class: DebtClass::Above100, color: "#ff0d0d", label: "100+" },
];

impl DebtClass {
    fn threshold(&self) -> Option<&'static Threshold> {
        THRESHOLDS.iter().find(|t| t.class == *self)
    }

    /// Fill color token for this class.
    pub fn color(&self) -> &'static str {
        self.threshold().map_or(NO_DATA_COLOR, |t| t.color)
    }

    pub fn label(&self) -> &'static str {
        self.threshold().map_or("No data", |t| t.label)
    }

    /// 0 for no data, 1..=8 for the bands.
    pub fn severity(&self) -> u8 {
        *self as u8
    }
}

/// Classify a debt-to-GDP ratio in percent.
///
/// Absent, zero, negative and NaN ratios all map to [`DebtClass::NoData`].
pub fn classify(ratio: Option<f64>) -> DebtClass {
    let Some(ratio) = ratio else {
        return DebtClass::NoData;
    };

    THRESHOLDS
        .iter()
        .rev()
        .find(|t| ratio > t.lower_bound)
        .map_or(DebtClass::NoData, |t| t.class)
}

/// One legend entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendBand {
    pub lower_bound: f64,
    pub color: &'static str,
    pub label: &'static str,
    pub class: DebtClass,
}

/// Legend entries in ascending order of lower bound.
pub fn legend_bands() -> Vec<LegendBand> {
    THRESHOLDS
        .iter()
        .map(|t| LegendBand {
            lower_bound: t.lower_bound,
            color: t.color,
            label: t.label,
            class: t.class,
        })
        .collect()
}
