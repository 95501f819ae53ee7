//! Error types for debtmap services.

use thiserror::Error;

use crate::indicator::Indicator;

/// Result type alias using DebtMapError.
pub type DebtMapResult<T> = Result<T, DebtMapError>;

/// Primary error type for debtmap operations.
///
/// Missing data is not an error: lookups return `Option` and absence is
/// rendered explicitly by the presentation layer.
#[derive(Debug, Error)]
pub enum DebtMapError {
    // === Upstream Errors ===
    #[error("{indicator} upstream unavailable: {message}")]
    UpstreamUnavailable {
        indicator: Indicator,
        message: String,
    },

    #[error("Malformed {indicator} payload: {message}")]
    MalformedPayload {
        indicator: Indicator,
        message: String,
    },

    #[error("Map source unavailable: {0}")]
    MapUnavailable(String),

    // === Request Errors ===
    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Country not found: {0}")]
    CountryNotFound(String),

    // === Infrastructure Errors ===
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl DebtMapError {
    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            DebtMapError::InvalidParameter { .. } => 400,
            DebtMapError::CountryNotFound(_) => 404,
            DebtMapError::UpstreamUnavailable { .. }
            | DebtMapError::MalformedPayload { .. }
            | DebtMapError::MapUnavailable(_)
            | DebtMapError::InternalError(_) => 500,
        }
    }

    /// Collapse a malformed payload into an upstream failure.
    ///
    /// The fetcher fails closed: a body it cannot validate is treated the
    /// same as a body it never received.
    pub fn into_upstream_failure(self) -> Self {
        match self {
            DebtMapError::MalformedPayload { indicator, message } => {
                DebtMapError::UpstreamUnavailable {
                    indicator,
                    message: format!("malformed payload: {}", message),
                }
            }
            other => other,
        }
    }

    pub fn invalid_parameter(param: &str, message: impl Into<String>) -> Self {
        DebtMapError::InvalidParameter {
            param: param.to_string(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for DebtMapError {
    fn from(err: serde_json::Error) -> Self {
        DebtMapError::InternalError(format!("JSON error: {}", err))
    }
}
