//! DEX depth chart library
//!
//! Computes order-book depth charts for a decentralized exchange front-end:
//! cumulative depth curves, the effect a hypothetical order would have on
//! the book, chart bounds, and the zoom window around the mid price.

pub mod config;
pub mod depthchart;
pub mod error;
pub mod orderbook;
pub mod parser;
pub mod view;

pub use config::{Config, LogFormat};
pub use depthchart::{
    get_depth_chart_data, ChartPoint, ChartSettings, DepthChartData, DepthChartEngine,
    DepthChartVolumes, PriceVolume, Summary, ZoomController,
};
pub use error::{DepthChartError, Result};
pub use orderbook::{
    JsonFileProvider, MatchType, Offer, OrderBook, OrderBookProvider, OrderForm, Side, TradingPair,
};
pub use parser::{parse_order_book, OrderBookSnapshot};
pub use view::DepthChartView;
