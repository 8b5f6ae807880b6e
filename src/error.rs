//! Error types for the depth chart engine and its collaborators

use thiserror::Error;

/// Depth chart errors
#[derive(Error, Debug)]
pub enum DepthChartError {
    #[error("Invalid offer side: {0}")]
    InvalidOfferSide(String),

    #[error("Invalid match type: {0}")]
    InvalidMatchType(String),

    #[error("Invalid trading pair: {0}")]
    InvalidTradingPair(String),

    #[error("Failed to parse order book: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Order book unavailable for {0}")]
    OrderBookUnavailable(String),
}

impl From<serde_json::Error> for DepthChartError {
    fn from(err: serde_json::Error) -> Self {
        DepthChartError::ParseError(err.to_string())
    }
}

impl From<rust_decimal::Error> for DepthChartError {
    fn from(err: rust_decimal::Error) -> Self {
        DepthChartError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for DepthChartError {
    fn from(err: std::io::Error) -> Self {
        DepthChartError::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DepthChartError>;
