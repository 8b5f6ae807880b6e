//! Order book snapshot
//!
//! Offers are kept in priority order per side: buys descending, sells ascending.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::{Offer, Side, TradingPair};

/// Buy and sell offers for a single pair at one block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderBook {
    pair: Option<TradingPair>,
    block_number: Option<u64>,
    timestamp: Option<DateTime<Utc>>,
    /// Buys sorted by price descending (highest first)
    buy: Vec<Offer>,
    /// Sells sorted by price ascending (lowest first)
    sell: Vec<Offer>,
}

impl OrderBook {
    /// Create a book from offer lists already sorted by priority
    pub fn new(buy: Vec<Offer>, sell: Vec<Offer>) -> Self {
        Self {
            pair: None,
            block_number: None,
            timestamp: None,
            buy,
            sell,
        }
    }

    /// Create a book from offers in any order, sorting each side by priority
    pub fn from_unsorted(mut buy: Vec<Offer>, mut sell: Vec<Offer>) -> Self {
        buy.sort_by(|a, b| Side::Buy.priority(&a.price, &b.price));
        sell.sort_by(|a, b| Side::Sell.priority(&a.price, &b.price));
        Self::new(buy, sell)
    }

    pub fn with_pair(mut self, pair: TradingPair) -> Self {
        self.pair = Some(pair);
        self
    }

    pub fn with_block(mut self, block_number: u64, timestamp: Option<DateTime<Utc>>) -> Self {
        self.block_number = Some(block_number);
        self.timestamp = timestamp;
        self
    }

    pub fn pair(&self) -> Option<&TradingPair> {
        self.pair.as_ref()
    }

    pub fn block_number(&self) -> Option<u64> {
        self.block_number
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    pub fn buys(&self) -> &[Offer] {
        &self.buy
    }

    pub fn sells(&self) -> &[Offer] {
        &self.sell
    }

    /// Offers resting on `side`
    pub fn offers(&self, side: Side) -> &[Offer] {
        match side {
            Side::Buy => &self.buy,
            Side::Sell => &self.sell,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buy.is_empty() && self.sell.is_empty()
    }

    /// Get best buy price
    pub fn best_buy(&self) -> Option<Decimal> {
        self.buy.first().map(|o| o.price)
    }

    /// Get best sell price
    pub fn best_sell(&self) -> Option<Decimal> {
        self.sell.first().map(|o| o.price)
    }

    /// Lowest buy price on the book
    pub fn worst_buy(&self) -> Option<Decimal> {
        self.buy.last().map(|o| o.price)
    }

    /// Highest sell price on the book
    pub fn worst_sell(&self) -> Option<Decimal> {
        self.sell.last().map(|o| o.price)
    }

    /// Get mid price
    pub fn mid_price(&self) -> Option<Decimal> {
        match (self.best_buy(), self.best_sell()) {
            (Some(buy), Some(sell)) => Some((buy + sell) / Decimal::from(2)),
            _ => None,
        }
    }

    /// Mid price, or the best price of whichever side is populated
    pub fn center_price(&self) -> Option<Decimal> {
        self.mid_price().or_else(|| self.best_buy()).or_else(|| self.best_sell())
    }

    /// Distance between best sell and best buy
    pub fn spread(&self) -> Option<Decimal> {
        match (self.best_buy(), self.best_sell()) {
            (Some(buy), Some(sell)) => Some(sell - buy),
            _ => None,
        }
    }

    /// Whether any offer lies strictly inside the window of `half_width`
    /// around `center`
    pub(crate) fn has_offer_within(&self, center: Decimal, half_width: Decimal) -> bool {
        self.buy.iter().any(|o| o.price > center - half_width)
            || self.sell.iter().any(|o| o.price < center + half_width)
    }

    /// Copy of the book keeping only offers inside the zoom window
    ///
    /// Buys at or below `center - half_width` and sells at or above
    /// `center + half_width` are dropped. An empty book is returned unchanged.
    pub fn zoomed(&self, half_width: Decimal) -> OrderBook {
        let Some(center) = self.center_price() else {
            return self.clone();
        };
        let low = center - half_width;
        let high = center + half_width;

        OrderBook {
            pair: self.pair.clone(),
            block_number: self.block_number,
            timestamp: self.timestamp,
            buy: self.buy.iter().filter(|o| o.price > low).cloned().collect(),
            sell: self.sell.iter().filter(|o| o.price < high).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn create_test_book() -> OrderBook {
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

    #[test]
    fn test_best_and_worst() {
        let book = create_test_book();
        assert_eq!(book.best_buy(), Some(dec!(120)));
        assert_eq!(book.best_sell(), Some(dec!(140)));
        assert_eq!(book.worst_buy(), Some(dec!(100)));
        assert_eq!(book.worst_sell(), Some(dec!(160)));
        assert_eq!(book.spread(), Some(dec!(20)));
    }

    #[test]
    fn test_mid_and_center_price() {
        let book = create_test_book();
        assert_eq!(book.mid_price(), Some(dec!(130)));
        assert_eq!(book.center_price(), Some(dec!(130)));

        let one_sided = OrderBook::new(vec![], book.sells().to_vec());
        assert_eq!(one_sided.mid_price(), None);
        assert_eq!(one_sided.center_price(), Some(dec!(140)));
        assert_eq!(OrderBook::default().center_price(), None);
    }

    #[test]
    fn test_from_unsorted() {
        let book = OrderBook::from_unsorted(
            vec![
                Offer::new(1, Side::Buy, dec!(100), dec!(1)),
                Offer::new(2, Side::Buy, dec!(120), dec!(1)),
            ],
            vec![
                Offer::new(3, Side::Sell, dec!(150), dec!(1)),
                Offer::new(4, Side::Sell, dec!(140), dec!(1)),
            ],
        );
        assert_eq!(book.best_buy(), Some(dec!(120)));
        assert_eq!(book.best_sell(), Some(dec!(140)));
    }

    #[test]
    fn test_zoomed_drops_offers_outside_window() {
        let book = create_test_book();
        // Window around 130 is (110, 150)
        let zoomed = book.zoomed(dec!(20));
        let buys: Vec<_> = zoomed.buys().iter().map(|o| o.price).collect();
        let sells: Vec<_> = zoomed.sells().iter().map(|o| o.price).collect();
        assert_eq!(buys, vec![dec!(120)]);
        assert_eq!(sells, vec![dec!(140), dec!(142)]);
        // Original untouched
        assert_eq!(book.buys().len(), 3);
    }

    #[test]
    fn test_zoomed_empty_book() {
        let book = OrderBook::default();
        assert_eq!(book.zoomed(dec!(5)), book);
    }

    #[test]
    fn test_has_offer_within() {
        let book = create_test_book();
        assert!(book.has_offer_within(dec!(130), dec!(11)));
        assert!(!book.has_offer_within(dec!(130), dec!(10)));
    }
}
