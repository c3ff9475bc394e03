use alertdesk::application::filter::FilterSpec;
use alertdesk::cli::commands::{Cli, Commands, DefaultsAction};
use alertdesk::domain::ports::alert_feed::StreamEvent;
use alertdesk::domain::values::action::Action;
use alertdesk::domain::values::targets::target_levels;
use alertdesk::domain::values::timeframe::Timeframe;
use alertdesk::AlertDesk;
use clap::Parser;
use std::collections::HashSet;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let base_url = cli
        .api
        .or_else(|| std::env::var("ALERTDESK_API").ok())
        .unwrap_or_else(|| "http://localhost:8080".into());

    let desk = AlertDesk::new(&base_url);

    if let Err(e) = run_command(desk, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(desk: AlertDesk, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Snapshot { limit } => {
            desk.load_snapshot(limit).await;
            let alerts = desk.log_snapshot();
            println!("{}", serde_json::to_string_pretty(&alerts)?);
        }
        Commands::Stocks {
            baskets,
            timeframes,
            panels,
            window,
            search,
            custom_symbols,
            limit,
        } => {
            desk.load_snapshot(limit).await;

            let baskets = if baskets.is_empty() {
                desk.default_baskets()
            } else {
                baskets
            };
            let spec = FilterSpec {
                baskets: baskets.into_iter().collect(),
                custom_symbols: custom_symbols.into_iter().collect(),
                timeframes: parse_all::<Timeframe>(&timeframes)?,
                panels: parse_all::<Action>(&panels)?,
                time_window: window.parse().map_err(|e: String| e)?,
                search_text: search.unwrap_or_default(),
            };

            let buckets = desk.stock_buckets(&spec);
            println!("{}", serde_json::to_string_pretty(&buckets)?);
        }
        Commands::Watch { limit } => {
            let loaded = desk.load_snapshot(limit).await;
            println!("--- alertdesk: {loaded} alerts loaded, tailing stream (CTRL+C to stop) ---");

            let (mut conn, mut events) = desk.open_stream();
            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        conn.close();
                        break;
                    }
                    event = events.recv() => match event {
                        Some(StreamEvent::Opened) => println!("[stream] connected"),
                        Some(StreamEvent::Alert(record)) => {
                            println!(
                                "{} {:5} {} @ {} ({})",
                                record.timestamp.format("%H:%M:%S"),
                                record.action.to_string(),
                                record.symbol,
                                record.price,
                                record.source
                            );
                            desk.ingest(record);
                        }
                        Some(StreamEvent::Closed) => println!("[stream] disconnected, retrying"),
                        Some(StreamEvent::Error(e)) => eprintln!("[stream] error: {e}"),
                        Some(StreamEvent::GaveUp) => {
                            eprintln!("[stream] gave up after repeated failures");
                            break;
                        }
                        None => break,
                    }
                }
            }
        }
        Commands::Targets {
            symbol,
            price,
            action,
            timeframe,
        } => {
            let timeframe: Timeframe = timeframe.parse().map_err(|e: String| e)?;
            let levels = match symbol {
                Some(symbol) => {
                    desk.load_snapshot(100).await;
                    desk.targets_for(&symbol, timeframe)
                        .ok_or(format!("no alerts for {symbol}"))?
                }
                None => {
                    let price = price.ok_or("either --symbol or --price is required")?;
                    let action: Action = action.parse().map_err(|e: String| e)?;
                    target_levels(price, action, timeframe)
                }
            };
            println!("{}", serde_json::to_string_pretty(&levels)?);
        }
        Commands::Indices => {
            let indices = desk.market_indices().await?;
            println!("{}", serde_json::to_string_pretty(&indices)?);
        }
        Commands::Baskets => {
            for basket in desk.basket_names() {
                println!("{}: {}", basket, desk.basket_count(&basket));
            }
        }
        Commands::Defaults { action } => match action {
            DefaultsAction::Show => {
                println!("{}", serde_json::to_string_pretty(&desk.default_baskets())?);
            }
            DefaultsAction::Set { baskets } => {
                if baskets.is_empty() {
                    return Err("at least one basket name is required".into());
                }
                desk.save_default_baskets(&baskets)?;
                println!("Saved default baskets: {}", baskets.join(", "));
            }
            DefaultsAction::Reset => {
                desk.reset_default_baskets()?;
                println!("Default baskets reset to ALL");
            }
        },
    }
    Ok(())
}

fn parse_all<T>(raw: &[String]) -> Result<HashSet<T>, String>
where
    T: std::str::FromStr<Err = String> + std::hash::Hash + Eq,
{
    raw.iter().map(|s| s.parse()).collect()
}
