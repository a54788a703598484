//! Command Line Interface for the CLMM swap simulator.
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use clmm_swap_domain::entities::Position;
use clmm_swap_domain::value_objects::{Price, PriceRange};
use clmm_swap_simulation::scenario::{ScenarioConfig, ScenarioResult, simulate_scenario};
use dotenv::dotenv;
use prettytable::{Table, row};
use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;
use tracing::info;

/// Environment variable holding the token's total supply, used for the
/// market cap line.
const TOTAL_SUPPLY_ENV: &str = "CLMM_SWAP_TOTAL_SUPPLY";

#[derive(Parser)]
#[command(name = "clmm-swap")]
#[command(about = "Single-sided concentrated liquidity swap calculator", long_about = None)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct PositionArgs {
    /// Minimum price (Y per X)
    #[arg(long, default_value = "0.01")]
    p_min: Decimal,

    /// Maximum price (Y per X)
    #[arg(long, default_value = "0.06")]
    p_max: Decimal,

    /// Starting price, defaults to the minimum price
    #[arg(long)]
    start_price: Option<Decimal>,

    /// Amount of token X deposited
    #[arg(long, default_value = "10000000")]
    amount_x: Decimal,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a position and show its liquidity and reserves
    Init {
        #[command(flatten)]
        position: PositionArgs,
    },
    /// Open a position and buy X from it in sequence
    Swap {
        #[command(flatten)]
        position: PositionArgs,

        /// Amounts of X to buy, applied in order
        #[arg(long = "x-out", num_args = 1.., default_values = ["9000000"])]
        x_out: Vec<Decimal>,
    },
}

fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let total_supply = read_total_supply()?;

    let (position_args, swaps) = match cli.command {
        Commands::Init { position } => (position, Vec::new()),
        Commands::Swap { position, x_out } => (position, x_out),
    };

    let config = scenario_config(&position_args, swaps)?;
    info!(steps = config.swaps.len(), "Running scenario");
    let result = simulate_scenario(&config).context("failed to open position")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_position("📊 Initial position", &result.sequence.initial_position, total_supply)?;
    if !config.swaps.is_empty() {
        print_swaps(&result)?;
        print_position("📈 Final position", &result.sequence.final_position, total_supply)?;
    }

    Ok(())
}

fn scenario_config(args: &PositionArgs, swaps: Vec<Decimal>) -> Result<ScenarioConfig> {
    let range = PriceRange::new(Price::new(args.p_min), Price::new(args.p_max))
        .context("p_min must be positive and less than p_max")?;

    let mut config = ScenarioConfig::new(range, args.amount_x).with_swaps(swaps);
    if let Some(start) = args.start_price {
        config = config
            .with_start_price(Price::new(start))
            .context("invalid starting price")?;
    }
    Ok(config)
}

fn read_total_supply() -> Result<Option<Decimal>> {
    match env::var(TOTAL_SUPPLY_ENV) {
        Ok(raw) => Decimal::from_str(raw.trim())
            .map(Some)
            .with_context(|| format!("{TOTAL_SUPPLY_ENV} is not a number: {raw}")),
        Err(_) => Ok(None),
    }
}

/// Price times external total supply.
fn market_cap(price: Decimal, total_supply: Decimal) -> Result<Decimal> {
    price
        .checked_mul(total_supply)
        .with_context(|| format!("market cap overflows: {price} x {total_supply}"))
}

fn print_position(title: &str, position: &Position, total_supply: Option<Decimal>) -> Result<()> {
    let price = position.price()?.value;

    println!("\n{title}");
    println!("════════════════════════════════════");
    println!("Liquidity L:     {:.4}", position.liquidity());
    println!("Price:           {:.8} (√p = {:.8})", price, position.sqrt_price());
    println!("Token X:         {:.2}", position.reserve_x()?);
    println!("Token Y:         {:.2}", position.reserve_y()?);
    if let Some(supply) = total_supply {
        println!("Market cap:      {:.2}", market_cap(price, supply)?);
    }
    println!("════════════════════════════════════");
    Ok(())
}

fn print_swaps(result: &ScenarioResult) -> Result<()> {
    let sequence = &result.sequence;

    let mut table = Table::new();
    table.add_row(row![
        "Step", "X out", "Y in", "Price before", "Price after", "X left", "Y held"
    ]);
    for (i, quote) in sequence.quotes.iter().enumerate() {
        table.add_row(row![
            i + 1,
            format!("{:.2}", quote.x_removed),
            format!("{:.2}", quote.y_required),
            format!("{:.8}", quote.price_before()?.value),
            format!("{:.8}", quote.price_after()?.value),
            format!("{:.2}", quote.reserve_x_after),
            format!("{:.2}", quote.reserve_y_after),
        ]);
    }

    println!("\n🔄 Swaps");
    table.printstd();
    println!("💰 Total Y required: {:.2}", sequence.total_y_required);

    if let Some(failure) = &sequence.failure {
        println!(
            "⚠️  Step {} rejected: {} (later steps not run)",
            failure.index + 1,
            failure.error
        );
    }
    Ok(())
}
