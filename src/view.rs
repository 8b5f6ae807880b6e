//! Depth chart view
//!
//! Ties a book provider, the zoom state and the engine together for one
//! chart on screen.

use tracing::{debug, info};

use crate::depthchart::{DepthChartData, DepthChartEngine, ZoomController};
use crate::error::Result;
use crate::orderbook::{OrderBook, OrderBookProvider, OrderForm, TradingPair};

/// One depth chart and the state it owns
pub struct DepthChartView<P> {
    provider: P,
    zoom: ZoomController,
    engine: DepthChartEngine,
}

impl<P: OrderBookProvider> DepthChartView<P> {
    pub fn new(provider: P, engine: DepthChartEngine) -> Self {
        let zoom = ZoomController::new(engine.settings().zoom_factor);
        Self {
            provider,
            zoom,
            engine,
        }
    }

    pub fn zoom(&self) -> &ZoomController {
        &self.zoom
    }

    pub fn zoom_mut(&mut self) -> &mut ZoomController {
        &mut self.zoom
    }

    /// Fetch the latest snapshot for `pair` and update the zoom state
    pub fn load(&mut self, pair: &TradingPair) -> Result<OrderBook> {
        self.zoom.select_pair(pair);

        let book = self.provider.order_book(pair)?;
        let zoom = self.zoom.observe(&book);
        debug!(
            pair = %pair,
            block = ?book.block_number(),
            buys = book.buys().len(),
            sells = book.sells().len(),
            zoom = ?zoom,
            "Loaded order book"
        );
        Ok(book)
    }

    /// Chart for `book` at the current zoom
    pub fn chart(&self, book: &OrderBook, form: &OrderForm) -> DepthChartData {
        let data = self.engine.depth_chart_data(book, form, self.zoom.current());
        if let Some(summary) = &data.summary {
            info!(
                side = %form.side,
                match_type = %form.match_type,
                price = summary.price,
                for_sale = summary.after_order_for_sale.amount,
                wanted = summary.after_order_wanted.amount,
                "Order preview"
            );
        }
        data
    }

    /// Recompute the chart for `pair` from the provider's latest snapshot
    pub fn refresh(&mut self, pair: &TradingPair, form: &OrderForm) -> Result<DepthChartData> {
        let book = self.load(pair)?;
        Ok(self.chart(&book, form))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DepthChartError;
    use crate::orderbook::{MatchType, MockOrderBookProvider, Offer, Side};
    use mockall::predicate::eq;
    use rust_decimal_macros::dec;

    fn book() -> OrderBook {
        OrderBook::new(
            vec![
                Offer::new(1, Side::Buy, dec!(120), dec!(5)),
                Offer::new(2, Side::Buy, dec!(10), dec!(9)),
            ],
            vec![
                Offer::new(3, Side::Sell, dec!(140), dec!(7)),
                Offer::new(4, Side::Sell, dec!(400), dec!(8)),
            ],
        )
    }

    #[test]
    fn test_refresh_applies_default_zoom() {
        let pair = TradingPair::new("WETH", "DAI");
        let mut provider = MockOrderBookProvider::new();
        provider
            .expect_order_book()
            .with(eq(pair.clone()))
            .times(1)
            .returning(|_| Ok(book()));

        let mut view = DepthChartView::new(provider, DepthChartEngine::default());
        let form = OrderForm::new(Side::Buy, MatchType::LimitOrder);
        let data = view.refresh(&pair, &form).unwrap();

        // Default zoom 65 around 130 hides the offers at 10 and 400
        assert_eq!(view.zoom().current(), Some(dec!(65)));
        assert_eq!(data.volumes.buys_before.unwrap()[0].price, 120.0);
        assert_eq!(data.volumes.sells_before.unwrap().len(), 2);
        assert!(data.max_price < 400.0);
    }

    #[test]
    fn test_refresh_keeps_zoom_across_blocks() {
        let pair = TradingPair::new("WETH", "DAI");
        let mut provider = MockOrderBookProvider::new();
        provider
            .expect_order_book()
            .times(2)
            .returning(|_| Ok(book()));

        let mut view = DepthChartView::new(provider, DepthChartEngine::default());
        let form = OrderForm::new(Side::Buy, MatchType::LimitOrder);
        view.refresh(&pair, &form).unwrap();
        view.zoom_mut().zoom_out();
        view.refresh(&pair, &form).unwrap();
        assert_eq!(view.zoom().current(), Some(dec!(97.5)));
    }

    #[test]
    fn test_refresh_propagates_provider_errors() {
        let mut provider = MockOrderBookProvider::new();
        provider
            .expect_order_book()
            .returning(|pair| Err(DepthChartError::OrderBookUnavailable(pair.to_string())));

        let mut view = DepthChartView::new(provider, DepthChartEngine::default());
        let form = OrderForm::new(Side::Sell, MatchType::Direct);
        let result = view.refresh(&TradingPair::new("MKR", "DAI"), &form);
        assert!(matches!(result, Err(DepthChartError::OrderBookUnavailable(_))));
    }
}
