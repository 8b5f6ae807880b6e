//! Order book providers
//!
//! The depth chart only consumes snapshots; where they come from is behind
//! [`OrderBookProvider`].

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::{OrderBook, TradingPair};
use crate::error::{DepthChartError, Result};
use crate::parser::parse_order_book;

/// Source of order book snapshots for a trading pair
#[cfg_attr(test, mockall::automock)]
pub trait OrderBookProvider {
    /// Latest snapshot for `pair`
    fn order_book(&self, pair: &TradingPair) -> Result<OrderBook>;
}

impl<T: OrderBookProvider + ?Sized> OrderBookProvider for Box<T> {
    fn order_book(&self, pair: &TradingPair) -> Result<OrderBook> {
        (**self).order_book(pair)
    }
}

/// Reads snapshots from `<dir>/<BASE>-<QUOTE>.json`
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    dir: PathBuf,
}

impl JsonFileProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Snapshot file for a pair
    pub fn path_for(&self, pair: &TradingPair) -> PathBuf {
        self.dir.join(format!("{}-{}.json", pair.base, pair.quote))
    }

    /// Load a snapshot from an explicit file
    pub fn load(path: &Path) -> Result<OrderBook> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            DepthChartError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let book = parse_order_book(&raw)?;
        debug!(
            path = %path.display(),
            buys = book.buys().len(),
            sells = book.sells().len(),
            "Loaded order book snapshot"
        );
        Ok(book)
    }
}

impl OrderBookProvider for JsonFileProvider {
    fn order_book(&self, pair: &TradingPair) -> Result<OrderBook> {
        let path = self.path_for(pair);
        if !path.exists() {
            warn!(pair = %pair, path = %path.display(), "No snapshot for pair");
            return Err(DepthChartError::OrderBookUnavailable(pair.to_string()));
        }

        let book = Self::load(&path)?;
        match book.pair() {
            Some(found) if found != pair => {
                warn!(expected = %pair, found = %found, "Snapshot pair mismatch");
                Err(DepthChartError::OrderBookUnavailable(pair.to_string()))
            }
            Some(_) => Ok(book),
            None => {
                info!(pair = %pair, block = ?book.block_number(), "Snapshot without pair tag");
                Ok(book.with_pair(pair.clone()))
            }
        }
    }
}
