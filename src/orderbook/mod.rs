//! Order book module
//!
//! Value types for resting offers, trading pairs and the order form, plus the
//! book snapshot the depth chart is computed from.

mod book;
mod provider;

pub use book::OrderBook;
pub use provider::{JsonFileProvider, OrderBookProvider};

#[cfg(test)]
pub use provider::MockOrderBookProvider;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::DepthChartError;

/// Side of the order book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The side an incoming order on this side trades against
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Price priority for offers resting on this side: best price sorts first
    pub fn priority(self, a: &Decimal, b: &Decimal) -> Ordering {
        match self {
            Side::Buy => b.cmp(a),
            Side::Sell => a.cmp(b),
        }
    }

    /// Whether price `a` is strictly ahead of `b` for offers resting on this side
    pub fn is_better(self, a: Decimal, b: Decimal) -> bool {
        self.priority(&a, &b) == Ordering::Less
    }

    /// Whether price `a` is at or ahead of `b` for offers resting on this side
    pub fn is_at_or_better(self, a: Decimal, b: Decimal) -> bool {
        self.priority(&a, &b) != Ordering::Greater
    }

    /// Whether an incoming order on this side with `limit` may trade against
    /// an opposite-side offer quoted at `offer_price`
    pub fn crosses(self, limit: Decimal, offer_price: Decimal) -> bool {
        match self {
            Side::Buy => offer_price <= limit,
            Side::Sell => offer_price >= limit,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

impl FromStr for Side {
    type Err = DepthChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(Side::Buy),
            "sell" => Ok(Side::Sell),
            _ => Err(DepthChartError::InvalidOfferSide(s.to_string())),
        }
    }
}

/// How a hypothetical order interacts with the book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchType {
    /// Unmatched remainder rests on the book at the limit price
    #[default]
    LimitOrder,
    /// Immediate-or-cancel: sweeps the opposite side and never rests
    Direct,
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchType::LimitOrder => write!(f, "limitOrder"),
            MatchType::Direct => write!(f, "direct"),
        }
    }
}

impl FromStr for MatchType {
    type Err = DepthChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "limitorder" | "limit-order" | "limit" => Ok(MatchType::LimitOrder),
            "direct" => Ok(MatchType::Direct),
            _ => Err(DepthChartError::InvalidMatchType(s.to_string())),
        }
    }
}

/// A single resting offer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    /// Book-assigned id, `None` for synthetic offers
    pub offer_id: Option<u64>,
    pub price: Decimal,
    pub base_amount: Decimal,
    pub quote_amount: Decimal,
    pub side: Side,
}

impl Offer {
    /// Create an offer as it appears on the book
    pub fn new(offer_id: u64, side: Side, price: Decimal, base_amount: Decimal) -> Self {
        Self {
            offer_id: Some(offer_id),
            price,
            base_amount,
            quote_amount: price * base_amount,
            side,
        }
    }

    /// Create an offer that only exists in a simulation
    pub fn synthetic(side: Side, price: Decimal, base_amount: Decimal) -> Self {
        Self {
            offer_id: None,
            price,
            base_amount,
            quote_amount: price * base_amount,
            side,
        }
    }

    /// Copy of this offer with a different base amount
    pub fn with_base_amount(&self, base_amount: Decimal) -> Self {
        Self {
            offer_id: self.offer_id,
            price: self.price,
            base_amount,
            quote_amount: self.price * base_amount,
            side: self.side,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        self.offer_id.is_none()
    }
}

/// A traded pair, quoted as quote-per-base
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TradingPair {
    pub base: String,
    pub quote: String,
}

impl TradingPair {
    pub fn new(base: &str, quote: &str) -> Self {
        Self {
            base: base.trim().to_uppercase(),
            quote: quote.trim().to_uppercase(),
        }
    }
}

impl fmt::Display for TradingPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl FromStr for TradingPair {
    type Err = DepthChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((base, quote))
                if !base.trim().is_empty() && !quote.trim().is_empty() && !quote.contains('/') =>
            {
                Ok(TradingPair::new(base, quote))
            }
            _ => Err(DepthChartError::InvalidTradingPair(s.to_string())),
        }
    }
}

impl TryFrom<String> for TradingPair {
    type Error = DepthChartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TradingPair> for String {
    fn from(pair: TradingPair) -> Self {
        pair.to_string()
    }
}

/// The hypothetical order currently entered in the order form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderForm {
    pub side: Side,
    pub match_type: MatchType,
    pub amount: Option<Decimal>,
    pub price: Option<Decimal>,
}

impl OrderForm {
    /// An empty form: no amount or price entered yet
    pub fn new(side: Side, match_type: MatchType) -> Self {
        Self {
            side,
            match_type,
            amount: None,
            price: None,
        }
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// `(amount, price)` when both have been entered
    pub fn order(&self) -> Option<(Decimal, Decimal)> {
        Some((self.amount?, self.price?))
    }

    pub fn has_order(&self) -> bool {
        self.order().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_side_parsing() {
        assert_eq!("buy".parse::<Side>().unwrap(), Side::Buy);
        assert_eq!(" SELL ".parse::<Side>().unwrap(), Side::Sell);
        assert!(matches!(
            "hold".parse::<Side>(),
            Err(DepthChartError::InvalidOfferSide(s)) if s == "hold"
        ));
    }

    #[test]
    fn test_match_type_parsing() {
        assert_eq!("limitOrder".parse::<MatchType>().unwrap(), MatchType::LimitOrder);
        assert_eq!("direct".parse::<MatchType>().unwrap(), MatchType::Direct);
        assert!("market".parse::<MatchType>().is_err());
    }

    #[test]
    fn test_side_priority() {
        assert!(Side::Buy.is_better(dec!(120), dec!(110)));
        assert!(Side::Sell.is_better(dec!(140), dec!(142)));
        assert!(Side::Sell.is_at_or_better(dec!(142), dec!(142)));
        assert!(!Side::Buy.is_better(dec!(100), dec!(100)));
    }

    #[test]
    fn test_crosses() {
        assert!(Side::Buy.crosses(dec!(142), dec!(140)));
        assert!(Side::Buy.crosses(dec!(142), dec!(142)));
        assert!(!Side::Buy.crosses(dec!(142), dec!(150)));
        assert!(Side::Sell.crosses(dec!(110), dec!(120)));
        assert!(!Side::Sell.crosses(dec!(110), dec!(100)));
    }

    #[test]
    fn test_offer_amounts() {
        let offer = Offer::new(3, Side::Sell, dec!(142), dec!(8));
        assert_eq!(offer.quote_amount, dec!(1136));

        let reduced = offer.with_base_amount(dec!(2));
        assert_eq!(reduced.offer_id, Some(3));
        assert_eq!(reduced.quote_amount, dec!(284));
        assert_eq!(offer.base_amount, dec!(8));
        assert!(Offer::synthetic(Side::Buy, dec!(10), dec!(99)).is_synthetic());
    }

    #[test]
    fn test_trading_pair() {
        let pair: TradingPair = "weth/dai".parse().unwrap();
        assert_eq!(pair, TradingPair::new("WETH", "DAI"));
        assert_eq!(pair.to_string(), "WETH/DAI");
        assert!("WETH".parse::<TradingPair>().is_err());
        assert!("WETH/".parse::<TradingPair>().is_err());
        assert!("A/B/C".parse::<TradingPair>().is_err());
    }

    #[test]
    fn test_order_form() {
        let form = OrderForm::new(Side::Buy, MatchType::LimitOrder).with_amount(dec!(1));
        assert!(!form.has_order());
        let form = form.with_price(dec!(142));
        assert_eq!(form.order(), Some((dec!(1), dec!(142))));
    }
}
