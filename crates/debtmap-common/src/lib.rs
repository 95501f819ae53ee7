//! Common types and pure data logic shared by the debtmap services.
//!
//! Nothing in this crate performs I/O: raw upstream payloads come in as
//! bytes, merged and classified view-models come out.

pub mod classify;
pub mod dataset;
pub mod envelope;
pub mod error;
pub mod indicator;
pub mod merge;
pub mod series;
pub mod style;
pub mod years;

pub use classify::{classify, legend_bands, DebtClass, LegendBand};
pub use dataset::{CountryProfile, CountryShade, Dataset, DebtHistory, DebtMode, SeriesBundle};
pub use envelope::parse_envelope;
pub use error::{DebtMapError, DebtMapResult};
pub use indicator::Indicator;
pub use merge::{merge_general_government_debt, merge_with_policy, MergePolicy};
pub use series::{CountryCode, IndicatorSeries, Year, YearSeries};
pub use style::{FeatureStyle, Legend};
pub use years::YearRange;
