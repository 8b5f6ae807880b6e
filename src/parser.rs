//! Parser module for order book snapshots
//!
//! Handles deserialization of the `{ buy, sell }` snapshots served by the
//! order book provider. Decimal fields may be JSON strings or numbers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

use crate::error::{DepthChartError, Result};
use crate::orderbook::{Offer, OrderBook, Side, TradingPair};

/// Order book snapshot as served by the provider
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBookSnapshot {
    /// Pair the snapshot belongs to
    #[serde(default)]
    pub pair: Option<TradingPair>,

    /// Block the snapshot was taken at
    #[serde(default)]
    pub block_number: Option<u64>,

    /// Block timestamp
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,

    /// Buy offers
    #[serde(default)]
    pub buy: Vec<RawOffer>,

    /// Sell offers
    #[serde(default)]
    pub sell: Vec<RawOffer>,
}

/// Offer as it appears on the wire; the side comes from the list it is in
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOffer {
    #[serde(default)]
    pub offer_id: Option<u64>,

    #[serde(deserialize_with = "deserialize_decimal")]
    pub price: Decimal,

    #[serde(deserialize_with = "deserialize_decimal")]
    pub base_amount: Decimal,

    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub quote_amount: Option<Decimal>,
}

impl RawOffer {
    fn into_offer(self, side: Side) -> Result<Offer> {
        if self.price < Decimal::ZERO || self.base_amount < Decimal::ZERO {
            return Err(DepthChartError::ParseError(format!(
                "Negative {} offer: price {}, amount {}",
                side, self.price, self.base_amount
            )));
        }
        Ok(Offer {
            offer_id: self.offer_id,
            price: self.price,
            base_amount: self.base_amount,
            quote_amount: self.quote_amount.unwrap_or(self.price * self.base_amount),
            side,
        })
    }
}

impl OrderBookSnapshot {
    /// Convert into a book with both sides sorted by priority
    pub fn into_order_book(self) -> Result<OrderBook> {
        let buy = self
            .buy
            .into_iter()
            .map(|o| o.into_offer(Side::Buy))
            .collect::<Result<Vec<_>>>()?;
        let sell = self
            .sell
            .into_iter()
            .map(|o| o.into_offer(Side::Sell))
            .collect::<Result<Vec<_>>>()?;

        let mut book = OrderBook::from_unsorted(buy, sell);
        if let Some(pair) = self.pair {
            book = book.with_pair(pair);
        }
        if let Some(block_number) = self.block_number {
            book = book.with_block(block_number, self.timestamp);
        }
        Ok(book)
    }
}

/// Parse a raw JSON snapshot into an order book
pub fn parse_order_book(raw: &str) -> Result<OrderBook> {
    let snapshot: OrderBookSnapshot = serde_json::from_str(raw)?;
    snapshot.into_order_book()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDecimal {
    Text(String),
    Number(serde_json::Number),
}

impl RawDecimal {
    fn parse(self) -> std::result::Result<Decimal, rust_decimal::Error> {
        let text = match self {
            RawDecimal::Text(s) => s,
            RawDecimal::Number(n) => n.to_string(),
        };
        let text = text.trim();
        Decimal::from_str(text).or_else(|_| Decimal::from_scientific(text))
    }
}

/// Custom deserializer for Decimal from string or number
fn deserialize_decimal<'de, D>(deserializer: D) -> std::result::Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    RawDecimal::deserialize(deserializer)?
        .parse()
        .map_err(serde::de::Error::custom)
}

fn deserialize_optional_decimal<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawDecimal>::deserialize(deserializer)?
        .map(RawDecimal::parse)
        .transpose()
        .map_err(serde::de::Error::custom)
}
