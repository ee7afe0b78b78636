//! AdvancedTrader - Main Entry Point
//!
//! Places fiat-denominated orders on Coinbase Advanced Trade, either directly
//! or sized by the Crypto Fear and Greed Index.

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use advanced_trader::common::traits::{OrderPlacer, PriceSource};
use advanced_trader::config::{load_config, AppConfig};
use advanced_trader::strategy::{
    FearAndGreedTrader, SchedulePreset, ScheduleStore, ThresholdSchedule, TradeOutcome,
    TradingStrategy,
};
use advanced_trader::{CachedPriceSource, CoinbaseClient, DryRunPlacer, FearGreedClient};
use advanced_trader::{OrderSide, OrderType};

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Size orders but do not send them to the exchange
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Trade according to the Fear and Greed Index schedule
    Trade {
        /// Product to trade, e.g. BTC-USDC
        #[arg(long)]
        product: String,
        /// Base fiat amount before the schedule factor is applied
        #[arg(long)]
        amount: Decimal,
    },
    /// Buy a fiat amount of a product
    Buy(OrderArgs),
    /// Sell a fiat amount of a product
    Sell(OrderArgs),
    /// Print a threshold schedule
    Schedule {
        /// Built-in schedule to show instead of the configured one
        #[arg(long)]
        preset: Option<SchedulePreset>,
    },
}

#[derive(ClapArgs, Debug)]
struct OrderArgs {
    /// Product to trade, e.g. BTC-USDC
    #[arg(long)]
    product: String,
    /// Fiat amount to spend or receive
    #[arg(long)]
    amount: Decimal,
    /// Place a market order instead of a limit order
    #[arg(long, conflicts_with = "limit_price")]
    market: bool,
    /// Explicit limit price; derived from spot when omitted
    #[arg(long)]
    limit_price: Option<Decimal>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    let config = load_config(Some(&args.config)).context("failed to load configuration")?;

    // Initialize logging
    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.settings.log_level.clone());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting AdvancedTrader");
    info!("Configuration file: {}", args.config);

    if let Err(err) = run(args.command, &config, args.dry_run).await {
        error!(error = %err, "Command failed");
        return Err(err);
    }

    Ok(())
}

async fn run(command: Command, config: &AppConfig, dry_run: bool) -> Result<()> {
    if let Command::Schedule { preset } = command {
        let schedule = match preset {
            Some(preset) => ThresholdSchedule::preset(preset),
            None => config.trading.schedule_or_default(),
        };
        print_schedule(&schedule);
        return Ok(());
    }

    let trader = build_trader(config, dry_run)?;

    match command {
        Command::Trade { product, amount } => {
            let outcome = trader.execute_trade(&product, amount).await?;
            let score = outcome.score();
            match outcome {
                TradeOutcome::NoAction { .. } => {
                    println!("Index {}: no rule matched, nothing placed", score);
                }
                TradeOutcome::Placed {
                    decision, order, ..
                } => {
                    println!(
                        "Index {}: {} {} (fiat {}) order {}",
                        score,
                        order.request.side,
                        order.request.base_size,
                        decision.adjusted_fiat_amount,
                        order.order_id
                    );
                }
            }
        }
        Command::Buy(order) => place(&trader, OrderSide::Buy, order).await?,
        Command::Sell(order) => place(&trader, OrderSide::Sell, order).await?,
        Command::Schedule { .. } => {}
    }

    Ok(())
}

fn build_trader(config: &AppConfig, dry_run: bool) -> Result<FearAndGreedTrader> {
    let timeout = config.settings.request_timeout();
    let coinbase = Arc::new(CoinbaseClient::new(&config.coinbase, timeout)?);
    let sentiment = Arc::new(FearGreedClient::from_config(&config.sentiment, timeout)?);

    let prices: Arc<dyn PriceSource> = Arc::new(CachedPriceSource::new(
        CoinbaseClient::clone(&coinbase),
        config.trading.price_cache_ttl(),
    ));
    let placer: Arc<dyn OrderPlacer> = if dry_run {
        info!("Dry run: orders will be sized but not sent");
        Arc::new(DryRunPlacer::new())
    } else {
        coinbase
    };

    let schedule = Arc::new(ScheduleStore::new(config.trading.schedule_or_default()));

    Ok(FearAndGreedTrader::new(prices, placer, sentiment)
        .with_schedule(schedule)
        .with_fees(config.trading.fees()?)
        .with_order_type(config.trading.order_type))
}

async fn place(trader: &FearAndGreedTrader, side: OrderSide, args: OrderArgs) -> Result<()> {
    let order_type = if args.market {
        OrderType::Market
    } else {
        OrderType::Limit
    };

    let placed = trader
        .place_fiat_order(&args.product, side, order_type, args.amount, args.limit_price)
        .await?;

    println!(
        "{} {} {} at {} order {}",
        side,
        placed.request.base_size,
        placed.request.pair_id,
        placed
            .request
            .limit_price
            .map(|price| price.to_string())
            .unwrap_or_else(|| "market".to_string()),
        placed.order_id
    );
    Ok(())
}

fn print_schedule(schedule: &ThresholdSchedule) {
    println!("{:>9}  {:>6}  action", "threshold", "factor");
    for rule in schedule.rules() {
        println!("{:>9}  {:>6}  {}", rule.threshold, rule.factor, rule.action);
    }
}
