//! Depth chart assembly
//!
//! Runs the match simulation for the order form, derives every curve, the
//! summary and the chart bounds, and converts the result for rendering.

use rust_decimal::Decimal;
use std::borrow::Cow;
use tracing::debug;

use super::bounds::ChartBounds;
use super::{
    accumulate, simulate, summarize, to_f64, ChartPoint, ChartSettings, DepthChartData,
    DepthChartVolumes, MatchOutcome, PriceVolume,
};
use crate::orderbook::{OrderBook, OrderForm, Side};

/// Computes depth chart data from book snapshots
#[derive(Debug, Clone, Default)]
pub struct DepthChartEngine {
    settings: ChartSettings,
}

impl DepthChartEngine {
    pub fn new(settings: ChartSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    /// Depth chart for `book` with the order in `form` applied
    ///
    /// `zoom` restricts the book to a window of that half-width around the
    /// center price before anything else is computed. Without both an amount
    /// and a price in the form only the "before" curves are produced.
    pub fn depth_chart_data(
        &self,
        book: &OrderBook,
        form: &OrderForm,
        zoom: Option<Decimal>,
    ) -> DepthChartData {
        let book = match zoom {
            Some(half_width) if !book.is_empty() => Cow::Owned(book.zoomed(half_width)),
            _ => Cow::Borrowed(book),
        };

        let mut volumes = DepthChartVolumes {
            sells_before: Some(accumulate(book.sells())),
            buys_before: Some(accumulate(book.buys())),
            ..Default::default()
        };

        let summary = form.order().map(|(amount, price)| {
            let outcome = simulate(&book, form.side, form.match_type, amount, price);
            apply_outcome(&mut volumes, &outcome);
            summarize(&volumes, outcome.effective_price)
        });

        let bounds = ChartBounds::from_volumes(&volumes, &self.settings).adjusted(
            book.best_buy(),
            book.best_sell(),
            &self.settings,
        );
        bounds.extend(&mut volumes);

        debug!(
            buys = book.buys().len(),
            sells = book.sells().len(),
            zoom = ?zoom,
            min_price = %bounds.min_price,
            max_price = %bounds.max_price,
            max_volume = %bounds.max_volume,
            "Computed depth chart"
        );

        DepthChartData {
            volumes: volumes.map(ChartPoint::from),
            min_price: to_f64(bounds.min_price),
            max_price: to_f64(bounds.max_price),
            min_volume: to_f64(bounds.min_volume),
            max_volume: to_f64(bounds.max_volume),
            summary,
        }
    }
}

/// Store the simulated "after" and "extra" curves on the right sides
fn apply_outcome(volumes: &mut DepthChartVolumes<PriceVolume>, outcome: &MatchOutcome) {
    let opposite_after = Some(accumulate(&outcome.opposite_after));
    let own_after = Some(accumulate(&outcome.own_after));
    let own_extra = Some(accumulate(&outcome.own_extra));

    match outcome.side {
        Side::Buy => {
            volumes.sells_after = opposite_after;
            volumes.buys_after = own_after;
            volumes.buys_extra = own_extra;
        }
        Side::Sell => {
            volumes.buys_after = opposite_after;
            volumes.sells_after = own_after;
            volumes.sells_extra = own_extra;
        }
    }
}

/// Depth chart with the default settings
pub fn get_depth_chart_data(
    book: &OrderBook,
    form: &OrderForm,
    zoom: Option<Decimal>,
) -> DepthChartData {
    DepthChartEngine::default().depth_chart_data(book, form, zoom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orderbook::{MatchType, Offer};
    use rust_decimal_macros::dec;

    fn book() -> OrderBook {
        OrderBook::new(
            vec![
                Offer::new(1, Side::Buy, dec!(120), dec!(5)),
                Offer::new(2, Side::Buy, dec!(110), dec!(9)),
                Offer::new(3, Side::Buy, dec!(100), dec!(17)),
            ],
            vec![
                Offer::new(4, Side::Sell, dec!(140), dec!(7)),
                Offer::new(5, Side::Sell, dec!(142), dec!(8)),
                Offer::new(6, Side::Sell, dec!(150), dec!(11)),
                Offer::new(7, Side::Sell, dec!(160), dec!(1)),
            ],
        )
    }

    fn point(price: f64, volume: f64) -> ChartPoint {
        ChartPoint { price, volume }
    }

    #[test]
    fn test_without_order_only_before_curves() {
        let form = OrderForm::new(Side::Buy, MatchType::LimitOrder);
        let data = get_depth_chart_data(&book(), &form, None);
        assert!(data.volumes.sells_before.is_some());
        assert!(data.volumes.buys_before.is_some());
        assert!(data.volumes.sells_after.is_none());
        assert!(data.volumes.buys_after.is_none());
        assert!(data.volumes.buys_extra.is_none());
        assert!(data.volumes.sells_extra.is_none());
        assert!(data.summary.is_none());

        // [100, 160] + 6 on each side is already centered on 130
        assert_eq!(data.min_price, 94.0);
        assert_eq!(data.max_price, 166.0);
        assert_eq!(data.min_volume, 5.0);
        assert_eq!(data.max_volume, 31.0);
        assert_eq!(
            data.volumes.buys_before.unwrap(),
            vec![
                point(120.0, 5.0),
                point(110.0, 14.0),
                point(100.0, 31.0),
                point(94.0, 31.0),
            ]
        );
    }

    #[test]
    fn test_sell_limit_order_rests_on_sells() {
        let form = OrderForm::new(Side::Sell, MatchType::LimitOrder)
            .with_amount(dec!(10))
            .with_price(dec!(115));
        let data = get_depth_chart_data(&book(), &form, None);

        // Takes the 5 at 120, the remaining 5 rest at 115 ahead of the book
        let buys_after = data.volumes.buys_after.unwrap();
        assert_eq!(buys_after[0], point(110.0, 9.0));
        let sells_after = data.volumes.sells_after.unwrap();
        assert_eq!(sells_after[0], point(115.0, 5.0));
        assert_eq!(sells_after[1], point(140.0, 12.0));

        let extra = data.volumes.sells_extra.unwrap();
        assert_eq!(extra[0], point(115.0, 5.0));
        assert_eq!(extra[1], point(140.0, 5.0));
        assert!(data.volumes.buys_extra.is_none());

        let summary = data.summary.unwrap();
        assert_eq!(summary.current_wanted.amount, 5.0);
        assert_eq!(summary.current_wanted.total_cost, 600.0);
        assert_eq!(summary.after_order_wanted.amount, 0.0);
        assert_eq!(summary.after_order_for_sale.amount, 5.0);
        assert_eq!(summary.after_order_for_sale.total_cost, 575.0);
    }

    #[test]
    fn test_zoom_filters_before_matching() {
        let form = OrderForm::new(Side::Buy, MatchType::Direct)
            .with_amount(dec!(100))
            .with_price(dec!(1));
        // Window (110, 150): only 120 and 140/142 survive
        let data = get_depth_chart_data(&book(), &form, Some(dec!(20)));

        let summary = data.summary.unwrap();
        assert_eq!(summary.price, 142.0);
        assert_eq!(summary.current_for_sale.amount, 15.0);
        assert_eq!(summary.after_order_for_sale.amount, 0.0);
        assert_eq!(data.volumes.sells_after, Some(vec![]));
        assert_eq!(data.volumes.buys_after, data.volumes.buys_before);
        assert_eq!(data.volumes.buys_extra, Some(vec![]));
    }

    #[test]
    fn test_custom_settings() {
        let engine = DepthChartEngine::new(ChartSettings {
            default_min_price: dec!(0),
            default_max_price: dec!(50),
            ..ChartSettings::default()
        });
        let data = engine.depth_chart_data(
            &OrderBook::default(),
            &OrderForm::new(Side::Sell, MatchType::LimitOrder),
            None,
        );
        assert_eq!(data.min_price, 0.0);
        assert_eq!(data.max_price, 55.0);
        assert_eq!(engine.settings().default_max_price, dec!(50));
    }
}
