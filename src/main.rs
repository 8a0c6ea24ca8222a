//! Autocall Simulator CLI
//!
//! Command-line interface for simulating structured note payoffs

use anyhow::{Context, Result};
use autocall_simulator::{
    comparison::ComparisonSet,
    path::{write_price_path_file, PricePathGenerator},
    product::{load_products, ObservationFrequency, ProductConfiguration, ProtectionType, Underlying},
    simulation::{SimulationConfig, SimulationEngine, SimulationResult},
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;

/// Scenario payoff simulator for autocallable structured notes
#[derive(Parser)]
#[command(name = "autocall", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Fixed seed for random draws (overrides AUTOCALL_SEED)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value = "table", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate the four market regimes for one product
    Simulate(ProductArgs),
    /// Generate the yearly chart series for one product
    Path {
        #[command(flatten)]
        product: ProductArgs,
        /// Write the series to this CSV file instead of stdout
        #[arg(long)]
        csv: Option<String>,
    },
    /// Classify products against the reference comparison set
    Compare {
        #[command(flatten)]
        product: ProductArgs,
        /// Load products to compare from a CSV file instead of the product flags
        #[arg(long, conflicts_with_all = PRODUCT_FLAGS)]
        products: Option<String>,
        /// Start from an empty set instead of the reference products
        #[arg(long)]
        no_reference: bool,
    },
}

/// Argument ids of [`ProductArgs`]
const PRODUCT_FLAGS: [&str; 8] = [
    "underlying",
    "duration",
    "coupon",
    "barrier",
    "capital",
    "protection",
    "frequency",
    "decrement",
];

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

/// Product terms
#[derive(Args)]
struct ProductArgs {
    /// Reference index (EUROSTOXX50, CAC40, SP500, NIKKEI, CUSTOM)
    #[arg(long, default_value = "EUROSTOXX50", value_parser = parse_underlying)]
    underlying: Underlying,

    /// Duration in years
    #[arg(long, default_value_t = 8)]
    duration: u32,

    /// Annual coupon in percent
    #[arg(long, default_value_t = 6.5)]
    coupon: f64,

    /// Protection barrier in percent
    #[arg(long, default_value_t = 50.0)]
    barrier: f64,

    /// Initial capital
    #[arg(long, default_value_t = 100_000.0)]
    capital: f64,

    /// guaranteed or protected
    #[arg(long, default_value = "protected", value_parser = parse_protection)]
    protection: ProtectionType,

    /// annual or quarterly
    #[arg(long, default_value = "annual", value_parser = parse_frequency)]
    frequency: ObservationFrequency,

    /// Annual decrement rate
    #[arg(long)]
    decrement: Option<f64>,
}

impl ProductArgs {
    fn to_product(&self) -> ProductConfiguration {
        ProductConfiguration::new(
            self.underlying,
            self.duration,
            self.coupon,
            self.barrier,
            self.capital,
            self.protection,
        )
        .with_observation_frequency(self.frequency)
        .with_decrement_rate(self.decrement)
    }
}

fn parse_underlying(value: &str) -> Result<Underlying, String> {
    Underlying::from_code(&value.to_uppercase()).ok_or_else(|| format!("unknown underlying: {}", value))
}

fn parse_protection(value: &str) -> Result<ProtectionType, String> {
    ProtectionType::from_str_opt(&value.to_lowercase())
        .ok_or_else(|| format!("unknown protection type: {}", value))
}

fn parse_frequency(value: &str) -> Result<ObservationFrequency, String> {
    ObservationFrequency::from_str_opt(&value.to_lowercase())
        .ok_or_else(|| format!("unknown observation frequency: {}", value))
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = SimulationConfig::from_env();
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    match &cli.command {
        Commands::Simulate(args) => run_simulate(args, config, cli.output),
        Commands::Path { product, csv } => run_path(product, config, csv.as_deref(), cli.output),
        Commands::Compare { product, products, no_reference } => {
            run_compare(product, products.as_deref(), *no_reference, cli.output)
        }
    }
}

fn run_simulate(args: &ProductArgs, config: SimulationConfig, output: OutputFormat) -> Result<()> {
    let product = args.to_product();
    let engine = SimulationEngine::new(config);
    let result = engine.simulate(&product).context("simulation failed")?;

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Table => print_simulation(&product, &result),
    }
    Ok(())
}

fn print_simulation(product: &ProductConfiguration, result: &SimulationResult) {
    println!("Product: {} {}y, coupon {}%, barrier -{}%, {}",
        product.underlying.display_name(),
        product.duration_years,
        product.annual_coupon_percent,
        product.barrier_percent,
        product.protection_type.as_str(),
    );
    println!("  Initial capital: {:.2}", product.initial_capital);
    println!("  Potential gain:  {:.1}%", product.total_potential_gain_percent());
    println!();

    println!("{:<16} {:>8} {:>14} {:>9} {:>10}", "Regime", "Prob", "Final value", "Return", "Exit year");
    println!("{}", "-".repeat(61));
    for outcome in &result.scenarios {
        let exit = outcome
            .early_exit_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:<16} {:>7.1}% {:>14.2} {:>8.1}% {:>10}",
            outcome.regime.label(),
            outcome.probability * 100.0,
            outcome.final_value,
            outcome.return_percent(product.initial_capital),
            exit,
        );
    }

    println!("\nSummary:");
    println!("  Expected return:       {:.2}", result.expected_return);
    println!("  Max gain:              {:.2}", result.max_gain);
    println!("  Max loss:              {:.2}", result.max_loss);
    println!("  Break-even probability: {:.1}%", result.break_even_probability * 100.0);
    if let Some(seed) = result.seed {
        println!("  Seed:                  {}", seed);
    }
}

fn run_path(
    args: &ProductArgs,
    config: SimulationConfig,
    csv_path: Option<&str>,
    output: OutputFormat,
) -> Result<()> {
    let product = args.to_product();
    let rng = config.rng();
    let seed = rng.seed();
    let points: Vec<_> = PricePathGenerator::new(&product)
        .context("invalid product")?
        .path(rng)
        .collect();

    if let Some(path) = csv_path {
        write_price_path_file(path, &points)
            .with_context(|| format!("failed to write {}", path))?;
        info!("wrote {} points (seed {}) to {}", points.len(), seed, path);
        println!("Price path written to: {}", path);
        return Ok(());
    }

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&points)?),
        OutputFormat::Table => {
            println!("{:>4} {:>12} {:>12} {:>12} {:>7} {:>8}",
                "Year", "Bullish", "Neutral", "Bearish", "Index", "Barrier");
            for p in &points {
                println!("{:>4} {:>12.0} {:>12.0} {:>12.0} {:>7.0} {:>8.1}",
                    p.year, p.bullish, p.neutral, p.bearish, p.index, p.barrier);
            }
            println!("\nSeed: {}", seed);
        }
    }
    Ok(())
}

fn run_compare(
    args: &ProductArgs,
    products_path: Option<&str>,
    no_reference: bool,
    output: OutputFormat,
) -> Result<()> {
    let mut set = if no_reference {
        ComparisonSet::new()
    } else {
        ComparisonSet::with_reference_products()
    };

    match products_path {
        Some(path) => {
            let loaded = load_products(path)
                .with_context(|| format!("failed to load products from {}", path))?;
            info!("loaded {} products from {}", loaded.len(), path);
            for product in loaded {
                let name = product
                    .name
                    .unwrap_or_else(|| product.configuration.default_name());
                set.add_named(name, product.configuration)?;
            }
        }
        None => {
            set.add(args.to_product()).context("invalid product")?;
        }
    }

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&set)?),
        OutputFormat::Table => {
            println!("{:>3} {:<36} {:<12} {:>5} {:>7} {:>8} {:>14} {:<8}",
                "Id", "Product", "Underlying", "Years", "Coupon", "Barrier", "Exp. return", "Risk");
            println!("{}", "-".repeat(100));
            for entry in &set {
                let c = &entry.configuration;
                println!("{:>3} {:<36} {:<12} {:>5} {:>6}% {:>7}% {:>14.2} {:<8}",
                    entry.id,
                    entry.name,
                    c.underlying.code(),
                    c.duration_years,
                    c.annual_coupon_percent,
                    -c.barrier_percent,
                    entry.expected_return,
                    entry.risk_tier.label(),
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_products_file_conflicts_with_product_flags() {
        for flag in PRODUCT_FLAGS {
            let value = match flag {
                "underlying" => "CAC40",
                "protection" => "guaranteed",
                "frequency" => "quarterly",
                _ => "5",
            };
            let long = format!("--{}", flag);
            let err = Cli::try_parse_from([
                "autocall", "compare", "--products", "data/products.csv", &long, value,
            ])
            .err()
            .unwrap_or_else(|| panic!("{} was accepted", long));
            assert_eq!(err.kind(), ErrorKind::ArgumentConflict, "{}", long);
        }
    }

    #[test]
    fn test_compare_accepts_either_source() {
        let cli = Cli::try_parse_from(["autocall", "compare", "--products", "data/products.csv"]).unwrap();
        match cli.command {
            Commands::Compare { products, .. } => assert_eq!(products.as_deref(), Some("data/products.csv")),
            _ => panic!("expected compare"),
        }

        let cli = Cli::try_parse_from(["autocall", "compare", "--coupon", "7.5"]).unwrap();
        match cli.command {
            Commands::Compare { product, products, .. } => {
                assert!(products.is_none());
                assert_eq!(product.coupon, 7.5);
            }
            _ => panic!("expected compare"),
        }
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
