use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "alertdesk", about = "Live market-alert viewer core")]
pub struct Cli {
    /// Backend base URL (falls back to ALERTDESK_API, then localhost:8080)
    #[arg(long)]
    pub api: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the latest alerts and print them as JSON
    Snapshot {
        #[arg(long, default_value = "50")]
        limit: usize,
    },
    /// Fetch alerts and print the filtered BUY/SELL/SIDEWAYS stock buckets
    Stocks {
        /// Basket filter, repeatable (defaults to the saved selection)
        #[arg(long = "basket")]
        baskets: Vec<String>,
        /// Timeframe filter, repeatable (INTRADAY/SHORTTERM/POSITIONAL/LONGTERM)
        #[arg(long = "timeframe")]
        timeframes: Vec<String>,
        /// Panel filter, repeatable (BUY/SELL/SIDEWAYS)
        #[arg(long = "panel")]
        panels: Vec<String>,
        /// Time window (TODAY/YESTERDAY/THIS_WEEK/ALL)
        #[arg(long, default_value = "ALL")]
        window: String,
        /// Free-text symbol search
        #[arg(long)]
        search: Option<String>,
        /// Symbols of the CUSTOM basket, repeatable
        #[arg(long = "custom")]
        custom_symbols: Vec<String>,
        #[arg(long, default_value = "100")]
        limit: usize,
    },
    /// Tail the live alert stream, merged over an initial snapshot
    Watch {
        #[arg(long, default_value = "50")]
        limit: usize,
    },
    /// Compute target/stoploss levels
    Targets {
        /// Derive price and action for this symbol from the latest snapshot
        #[arg(long, conflicts_with_all = ["price", "action"])]
        symbol: Option<String>,
        /// Reference price (when no symbol is given)
        #[arg(long)]
        price: Option<f64>,
        /// BUY or SELL (when no symbol is given)
        #[arg(long, default_value = "BUY")]
        action: String,
        /// INTRADAY/SHORTTERM/POSITIONAL/LONGTERM
        #[arg(long, default_value = "INTRADAY")]
        timeframe: String,
    },
    /// Print the market indices header snapshot
    Indices,
    /// List known baskets with member counts
    Baskets,
    /// Manage the saved default basket selection
    Defaults {
        #[command(subcommand)]
        action: DefaultsAction,
    },
}

#[derive(Subcommand)]
pub enum DefaultsAction {
    /// Print the saved selection
    Show,
    /// Save a new selection
    Set { baskets: Vec<String> },
    /// Remove the saved selection
    Reset,
}
