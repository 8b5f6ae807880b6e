//! Configuration module for the depth chart

use rust_decimal::Decimal;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::depthchart::ChartSettings;
use crate::error::{DepthChartError, Result};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = DepthChartError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(DepthChartError::ConfigError(format!(
                "Unknown log format: {}",
                other
            ))),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Fraction of the price span added on each side of the chart
    pub price_margin: Decimal,

    /// Zoom multiplier per zoom-in/zoom-out step
    pub zoom_factor: Decimal,

    /// Price range used for an empty chart
    pub default_min_price: Decimal,
    pub default_max_price: Decimal,

    /// Upper volume bound for an empty chart
    pub default_max_volume: Decimal,

    /// Directory holding `<BASE>-<QUOTE>.json` order book snapshots
    pub snapshot_dir: PathBuf,

    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let config = Self {
            price_margin: decimal_var("PRICE_MARGIN", defaults.price_margin),
            zoom_factor: decimal_var("ZOOM_FACTOR", defaults.zoom_factor),
            default_min_price: decimal_var("DEFAULT_MIN_PRICE", defaults.default_min_price),
            default_max_price: decimal_var("DEFAULT_MAX_PRICE", defaults.default_max_price),
            default_max_volume: decimal_var("DEFAULT_MAX_VOLUME", defaults.default_max_volume),
            snapshot_dir: env::var("SNAPSHOT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.snapshot_dir),
            log_format: match env::var("LOG_FORMAT") {
                Ok(raw) => raw.parse()?,
                Err(_) => defaults.log_format,
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would break zooming or the chart bounds
    pub fn validate(&self) -> Result<()> {
        if self.zoom_factor <= Decimal::ONE {
            return Err(DepthChartError::ConfigError(format!(
                "ZOOM_FACTOR must be greater than 1, got {}",
                self.zoom_factor
            )));
        }
        if self.price_margin < Decimal::ZERO {
            return Err(DepthChartError::ConfigError(format!(
                "PRICE_MARGIN must not be negative, got {}",
                self.price_margin
            )));
        }
        if self.default_min_price >= self.default_max_price {
            return Err(DepthChartError::ConfigError(format!(
                "DEFAULT_MIN_PRICE ({}) must be below DEFAULT_MAX_PRICE ({})",
                self.default_min_price, self.default_max_price
            )));
        }
        if self.default_max_volume <= Decimal::ZERO {
            return Err(DepthChartError::ConfigError(
                "DEFAULT_MAX_VOLUME must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Engine part of the configuration
    pub fn chart_settings(&self) -> ChartSettings {
        ChartSettings {
            price_margin: self.price_margin,
            zoom_factor: self.zoom_factor,
            default_min_price: self.default_min_price,
            default_max_price: self.default_max_price,
            default_max_volume: self.default_max_volume,
            ..ChartSettings::default()
        }
    }
}

fn decimal_var(name: &str, default: Decimal) -> Decimal {
    env::var(name)
        .ok()
        .and_then(|raw| Decimal::from_str(raw.trim()).ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        let chart = ChartSettings::default();
        Self {
            price_margin: chart.price_margin,
            zoom_factor: chart.zoom_factor,
            default_min_price: chart.default_min_price,
            default_max_price: chart.default_max_price,
            default_max_volume: chart.default_max_volume,
            snapshot_dir: PathBuf::from("./snapshots"),
            log_format: LogFormat::Pretty,
        }
    }
}
