//! Depth chart module
//!
//! Turns an order book snapshot and a hypothetical order into cumulative
//! depth curves, chart bounds and an order summary.
//!
//! All arithmetic is done on [`Decimal`]; values are converted to `f64` only
//! when the final [`DepthChartData`] is assembled.

mod accumulate;
mod bounds;
mod engine;
mod matching;
mod summary;
mod zoom;

pub use accumulate::accumulate;
pub use engine::{get_depth_chart_data, DepthChartEngine};
pub use matching::{
    consume_opposite, extra_offers, rest_unmatched, simulate, Consumption, MatchOutcome,
};
pub use summary::{amount_and_cost, summarize};
pub use zoom::{find_default_zoom, ZoomController};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Point on a cumulative depth curve: volume available at or better than `price`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceVolume {
    pub price: Decimal,
    pub volume: Decimal,
}

impl PriceVolume {
    pub fn new(price: Decimal, volume: Decimal) -> Self {
        Self { price, volume }
    }
}

/// Rendered depth curve point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub price: f64,
    pub volume: f64,
}

impl From<PriceVolume> for ChartPoint {
    fn from(point: PriceVolume) -> Self {
        Self {
            price: to_f64(point.price),
            volume: to_f64(point.volume),
        }
    }
}

/// The six curves a depth chart can show
///
/// `None` means the curve does not apply (no hypothetical order), which is
/// different from an empty curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepthChartVolumes<P> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sells_before: Option<Vec<P>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sells_after: Option<Vec<P>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buys_before: Option<Vec<P>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buys_after: Option<Vec<P>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buys_extra: Option<Vec<P>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sells_extra: Option<Vec<P>>,
}

impl<P> Default for DepthChartVolumes<P> {
    fn default() -> Self {
        Self {
            sells_before: None,
            sells_after: None,
            buys_before: None,
            buys_after: None,
            buys_extra: None,
            sells_extra: None,
        }
    }
}

impl<P> DepthChartVolumes<P> {
    /// Every curve that is present
    pub fn curves(&self) -> impl Iterator<Item = &Vec<P>> {
        [
            &self.sells_before,
            &self.sells_after,
            &self.buys_before,
            &self.buys_after,
            &self.buys_extra,
            &self.sells_extra,
        ]
        .into_iter()
        .flatten()
    }

    /// Present buy-side curves
    pub fn buy_curves_mut(&mut self) -> impl Iterator<Item = &mut Vec<P>> {
        [&mut self.buys_before, &mut self.buys_after, &mut self.buys_extra]
            .into_iter()
            .flatten()
    }

    /// Present sell-side curves
    pub fn sell_curves_mut(&mut self) -> impl Iterator<Item = &mut Vec<P>> {
        [&mut self.sells_before, &mut self.sells_after, &mut self.sells_extra]
            .into_iter()
            .flatten()
    }

    /// Convert every point of every present curve
    pub fn map<Q>(self, f: impl Fn(P) -> Q) -> DepthChartVolumes<Q> {
        let convert = |curve: Option<Vec<P>>| -> Option<Vec<Q>> {
            curve.map(|c| c.into_iter().map(&f).collect())
        };
        DepthChartVolumes {
            sells_before: convert(self.sells_before),
            sells_after: convert(self.sells_after),
            buys_before: convert(self.buys_before),
            buys_after: convert(self.buys_after),
            buys_extra: convert(self.buys_extra),
            sells_extra: convert(self.sells_extra),
        }
    }
}

/// Amount available and what it costs in quote
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountCost {
    pub amount: f64,
    pub total_cost: f64,
}

/// Book liquidity at the order's price, before and after the order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub price: f64,
    pub current_for_sale: AmountCost,
    pub current_wanted: AmountCost,
    pub after_order_for_sale: AmountCost,
    pub after_order_wanted: AmountCost,
}

/// Everything needed to draw the depth chart and its legend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepthChartData {
    #[serde(flatten)]
    pub volumes: DepthChartVolumes<ChartPoint>,
    pub min_price: f64,
    pub max_price: f64,
    pub min_volume: f64,
    pub max_volume: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
}

/// Tunables for chart bounds and zooming
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSettings {
    /// Fraction of the price span added on each side of the chart
    pub price_margin: Decimal,
    /// Multiplier applied per zoom step
    pub zoom_factor: Decimal,
    /// Price range used when there is nothing to draw
    pub default_min_price: Decimal,
    pub default_max_price: Decimal,
    /// Volume range used when there is nothing to draw
    pub default_min_volume: Decimal,
    pub default_max_volume: Decimal,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            price_margin: Decimal::new(1, 1),
            zoom_factor: Decimal::new(15, 1),
            default_min_price: Decimal::from(10),
            default_max_price: Decimal::from(100),
            default_min_volume: Decimal::ZERO,
            default_max_volume: Decimal::from(100),
        }
    }
}

pub(crate) fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}
