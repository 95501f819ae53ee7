//! Year selection range for the dashboard slider.

use serde::{Deserialize, Serialize};

use crate::error::{DebtMapError, DebtMapResult};
use crate::series::Year;

/// Inclusive range of selectable years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub min: Year,
    pub max: Year,
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            min: 1990,
            max: 2025,
        }
    }
}

impl YearRange {
    pub fn new(min: Year, max: Year) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, year: Year) -> bool {
        (self.min..=self.max).contains(&year)
    }

    pub fn clamp(&self, year: Year) -> Year {
        year.clamp(self.min, self.max)
    }

    /// Step forward one year, stopping at `max`.
    pub fn next(&self, year: Year) -> Year {
        self.clamp(year.saturating_add(1))
    }

    /// Step back one year, stopping at `min`.
    pub fn previous(&self, year: Year) -> Year {
        self.clamp(year.saturating_sub(1))
    }

    /// Accept a requested year or reject it as an invalid parameter.
    pub fn validate(&self, year: Year) -> DebtMapResult<Year> {
        if self.contains(year) {
            Ok(year)
        } else {
            Err(DebtMapError::invalid_parameter(
                "year",
                format!("{} is outside {}..={}", year, self.min, self.max),
            ))
        }
    }
}
