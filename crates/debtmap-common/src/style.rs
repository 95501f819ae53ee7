//! Map styling derived from debt classes: polygon styles and the legend.

use serde::Serialize;

use crate::classify::{legend_bands, DebtClass, LegendBand, NO_DATA_COLOR};

/// Polygon style for one country feature.
///
/// Field names follow the path options of common web map libraries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureStyle {
    pub weight: f32,
    pub fill_color: &'static str,
    pub fill_opacity: f32,
    /// Outline color
    pub color: &'static str,
    /// Outline opacity
    pub opacity: f32,
}

impl FeatureStyle {
    /// Base choropleth style for a class.
    pub fn for_class(class: DebtClass) -> Self {
        Self {
            weight: 2.0,
            fill_color: class.color(),
            fill_opacity: 1.0,
            color: "white",
            opacity: 1.0,
        }
    }

    /// Style of a hovered or selected country.
    pub fn highlight() -> Self {
        Self {
            weight: 5.0,
            fill_color: "#fff",
            fill_opacity: 0.3,
            color: "white",
            opacity: 1.0,
        }
    }
}

/// Legend entry without a numeric bound.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: &'static str,
}

/// Full legend for the debt-to-GDP choropleth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: &'static str,
    pub no_data: LegendEntry,
    pub bands: Vec<LegendBand>,
}

impl Legend {
    pub fn debt_ratio() -> Self {
        Self {
            title: "Debt % per GDP",
            no_data: LegendEntry {
                label: DebtClass::NoData.label(),
                color: NO_DATA_COLOR,
            },
            bands: legend_bands(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_style_uses_class_color() {
        let style = FeatureStyle::for_class(DebtClass::UpTo55);
        assert_eq!(style.fill_color, "#acb334");
        assert_eq!(style.color, "white");
        assert_eq!(style.weight, 2.0);
    }

    #[test]
    fn test_feature_style_json() {
        let json = serde_json::to_value(FeatureStyle::for_class(DebtClass::NoData)).unwrap();
        assert_eq!(json["fillColor"], "black");
        assert_eq!(json["fillOpacity"], 1.0);
    }

    #[test]
    fn test_highlight_style() {
        let style = FeatureStyle::highlight();
        assert_eq!(style.weight, 5.0);
        assert_eq!(style.fill_color, "#fff");
    }

    #[test]
    fn test_legend() {
        let legend = Legend::debt_ratio();
        assert_eq!(legend.title, "Debt % per GDP");
        assert_eq!(legend.no_data.color, "black");
        assert_eq!(legend.bands.first().map(|b| b.label), Some("0–10"));
        assert_eq!(legend.bands.last().map(|b| b.label), Some("100+"));
    }
}
