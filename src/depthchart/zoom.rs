//! Zoom window around the mid price
//!
//! The zoom is the half-width of the price window shown on the chart. It is
//! owned by whoever renders the chart and reset when the traded pair changes.

use rust_decimal::Decimal;
use tracing::debug;

use crate::orderbook::{OrderBook, TradingPair};

/// Initial zoom for a book
///
/// Starts at half the center price and doubles until at least one offer
/// falls inside the window. Returns `None` for an empty book.
pub fn find_default_zoom(book: &OrderBook) -> Option<Decimal> {
    let center = book.center_price()?;
    if center <= Decimal::ZERO {
        return None;
    }

    let two = Decimal::from(2);
    let mut zoom = center / two;
    if zoom.is_zero() {
        return None;
    }
    while !book.has_offer_within(center, zoom) {
        zoom = zoom.checked_mul(two)?;
    }
    Some(zoom)
}

/// Current zoom for the selected pair
#[derive(Debug, Clone)]
pub struct ZoomController {
    pair: Option<TradingPair>,
    current: Option<Decimal>,
    factor: Decimal,
}

impl ZoomController {
    /// Create a controller that scales the zoom by `factor` per step
    pub fn new(factor: Decimal) -> Self {
        Self {
            pair: None,
            current: None,
            factor,
        }
    }

    pub fn pair(&self) -> Option<&TradingPair> {
        self.pair.as_ref()
    }

    pub fn current(&self) -> Option<Decimal> {
        self.current
    }

    /// Switch to `pair`, dropping the zoom if it changed
    pub fn select_pair(&mut self, pair: &TradingPair) {
        if self.pair.as_ref() != Some(pair) {
            debug!(pair = %pair, previous = ?self.pair, "Pair changed, resetting zoom");
            self.pair = Some(pair.clone());
            self.current = None;
        }
    }

    /// Seed the default zoom from the first non-empty book seen for the pair
    pub fn observe(&mut self, book: &OrderBook) -> Option<Decimal> {
        if self.current.is_none() {
            self.current = find_default_zoom(book);
            if let Some(zoom) = self.current {
                debug!(%zoom, "Default zoom");
            }
        }
        self.current
    }

    /// Replace the zoom, e.g. with an explicit window or `None` for the whole book
    pub fn set(&mut self, zoom: Option<Decimal>) {
        self.current = zoom;
    }

    /// Narrow the window
    pub fn zoom_in(&mut self) -> Option<Decimal> {
        self.step(|zoom, factor| zoom.checked_div(factor))
    }

    /// Widen the window
    pub fn zoom_out(&mut self) -> Option<Decimal> {
        self.step(|zoom, factor| zoom.checked_mul(factor))
    }

    fn step(&mut self, apply: impl Fn(Decimal, Decimal) -> Option<Decimal>) -> Option<Decimal> {
        match self.current {
            Some(zoom) => {
                if let Some(next) = apply(zoom, self.factor) {
                    self.current = Some(next);
                }
            }
            None => debug!("Zoom change ignored, no zoom set"),
        }
        self.current
    }
}

impl Default for ZoomController {
    fn default() -> Self {
        Self::new(Decimal::new(15, 1))
    }
}
