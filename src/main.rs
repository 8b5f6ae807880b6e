//! DEX depth chart - command line preview
//!
//! Loads an order book snapshot, applies the order described on the command
//! line and prints the resulting depth chart data as JSON.

use clap::Parser;
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use depth_chart::{
    Config, DepthChartEngine, DepthChartView, JsonFileProvider, LogFormat, MatchType, OrderBook,
    OrderBookProvider, OrderForm, Side, TradingPair,
};

#[derive(Parser, Debug)]
#[command(name = "dex-depth-chart")]
#[command(about = "Preview how an order would change an order book's depth chart")]
struct Args {
    /// Trading pair, e.g. WETH/DAI
    #[arg(short, long)]
    pair: TradingPair,

    /// Read the snapshot from this file instead of the snapshot directory
    #[arg(short, long)]
    book: Option<PathBuf>,

    /// Directory holding <BASE>-<QUOTE>.json snapshots (overrides SNAPSHOT_DIR)
    #[arg(long)]
    snapshot_dir: Option<PathBuf>,

    /// Order side: buy or sell
    #[arg(short, long, default_value = "buy")]
    side: Side,

    /// Match type: limitOrder or direct
    #[arg(short, long, default_value = "limitOrder")]
    match_type: MatchType,

    /// Order amount in the base asset
    #[arg(short, long)]
    amount: Option<Decimal>,

    /// Order limit price in quote per base
    #[arg(long)]
    price: Option<Decimal>,

    /// Explicit zoom half-width; without it the default zoom for the book is used
    #[arg(short, long)]
    zoom: Option<Decimal>,

    /// Show the whole book instead of the default zoom window
    #[arg(long, conflicts_with = "zoom")]
    no_zoom: bool,

    /// Zoom-in steps applied after the default zoom
    #[arg(long, default_value = "0")]
    zoom_in: u32,

    /// Zoom-out steps applied after the default zoom
    #[arg(long, default_value = "0")]
    zoom_out: u32,
}

/// Serves one snapshot read from disk, whatever pair is asked for
struct FileSnapshot(OrderBook);

impl OrderBookProvider for FileSnapshot {
    fn order_book(&self, _pair: &TradingPair) -> depth_chart::Result<OrderBook> {
        Ok(self.0.clone())
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::load()?;

    // Logs go to stderr so stdout stays valid JSON
    let filter = EnvFilter::from_default_env().add_directive(Level::INFO.into());
    match config.log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init(),
    }

    info!(
        pair = %args.pair,
        side = %args.side,
        match_type = %args.match_type,
        "Starting depth chart preview"
    );

    let provider: Box<dyn OrderBookProvider> = match &args.book {
        Some(path) => Box::new(FileSnapshot(JsonFileProvider::load(path)?)),
        None => {
            let dir = args
                .snapshot_dir
                .clone()
                .unwrap_or_else(|| config.snapshot_dir.clone());
            info!(dir = %dir.display(), "Reading snapshots");
            Box::new(JsonFileProvider::new(dir))
        }
    };

    let engine = DepthChartEngine::new(config.chart_settings());
    let mut view = DepthChartView::new(provider, engine);
    let book = view.load(&args.pair)?;

    let zoom = view.zoom_mut();
    if args.no_zoom {
        zoom.set(None);
    } else if args.zoom.is_some() {
        zoom.set(args.zoom);
    }
    for _ in 0..args.zoom_in {
        zoom.zoom_in();
    }
    for _ in 0..args.zoom_out {
        zoom.zoom_out();
    }
    info!(zoom = ?zoom.current(), "Zoom window");

    let mut form = OrderForm::new(args.side, args.match_type);
    form.amount = args.amount;
    form.price = args.price;

    let data = view.chart(&book, &form);
    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}
