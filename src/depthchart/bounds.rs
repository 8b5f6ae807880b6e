//! Chart bounds and edge extenders

use rust_decimal::Decimal;

use super::{ChartSettings, DepthChartVolumes, PriceVolume};

/// Price and volume ranges of the chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ChartBounds {
    pub min_price: Decimal,
    pub max_price: Decimal,
    pub min_volume: Decimal,
    pub max_volume: Decimal,
}

impl ChartBounds {
    /// Extremes over every present curve, or the configured defaults when
    /// there is nothing to draw
    pub fn from_volumes(volumes: &DepthChartVolumes<PriceVolume>, settings: &ChartSettings) -> Self {
        let mut points = volumes.curves().flatten().peekable();
        let Some(first) = points.peek().copied() else {
            return Self {
                min_price: settings.default_min_price,
                max_price: settings.default_max_price,
                min_volume: settings.default_min_volume,
                max_volume: settings.default_max_volume,
            };
        };

        let init = Self {
            min_price: first.price,
            max_price: first.price,
            min_volume: first.volume,
            max_volume: first.volume,
        };
        let bounds = points.fold(init, |acc, p| Self {
            min_price: acc.min_price.min(p.price),
            max_price: acc.max_price.max(p.price),
            min_volume: acc.min_volume.min(p.volume),
            max_volume: acc.max_volume.max(p.volume),
        });

        bounds.widen_volume(settings)
    }

    /// A flat volume range would collapse the y axis
    fn widen_volume(mut self, settings: &ChartSettings) -> Self {
        if self.max_volume <= self.min_volume {
            if self.max_volume > Decimal::ZERO {
                self.min_volume = Decimal::ZERO;
            } else {
                self.min_volume = settings.default_min_volume;
                self.max_volume = settings.default_max_volume;
            }
        }
        self
    }

    /// Add the price margin on both sides and, when both sides of the book
    /// are quoted, make the range symmetric around the mid price.
    ///
    /// The lower bound never goes below zero.
    pub fn adjusted(
        self,
        best_buy: Option<Decimal>,
        best_sell: Option<Decimal>,
        settings: &ChartSettings,
    ) -> Self {
        let mut span = self.max_price - self.min_price;
        if span <= Decimal::ZERO {
            span = if self.max_price.is_zero() {
                Decimal::ONE
            } else {
                self.max_price.abs()
            };
        }
        let margin = span * settings.price_margin;

        let mut min_price = self.min_price - margin;
        let mut max_price = self.max_price + margin;

        if let (Some(buy), Some(sell)) = (best_buy, best_sell) {
            let mid = (buy + sell) / Decimal::from(2);
            let half_width = (mid - min_price).max(max_price - mid);
            min_price = mid - half_width;
            max_price = mid + half_width;
        }

        Self {
            min_price: min_price.max(Decimal::ZERO),
            max_price,
            ..self
        }
    }

    /// Stretch every curve to the chart edge on its side
    ///
    /// Buy curves get a final point at `min_price`, sell curves at
    /// `max_price`, both at the curve's last volume.
    pub fn extend(&self, volumes: &mut DepthChartVolumes<PriceVolume>) {
        for curve in volumes.buy_curves_mut() {
            if let Some(last) = curve.last().copied() {
                if last.price > self.min_price {
                    curve.push(PriceVolume::new(self.min_price, last.volume));
                }
            }
        }
        for curve in volumes.sell_curves_mut() {
            if let Some(last) = curve.last().copied() {
                if last.price < self.max_price {
                    curve.push(PriceVolume::new(self.max_price, last.volume));
                }
            }
        }
    }
}
