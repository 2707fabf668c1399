//! `nse-screen`: fundamental, growth and price-gap screens for NSE stocks.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use screen::{
    DEFAULT_CONSTITUENTS_FILE, DEFAULT_DEBT_TO_EQUITY_CEILING, DEFAULT_GROWTH_EXPORT,
    DEFAULT_GROWTH_PAUSE, DEFAULT_MIN_GROWTH_PCT, DEFAULT_PAUSE, DEFAULT_PROFITABLE_YEARS,
    DEFAULT_ROCE_FLOOR, DEFAULT_ROE_FLOOR, DEFAULT_TOP_GAPS, DEFAULT_UNAVAILABLE_PAUSE,
    EQUITY_LISTING_URL, NSE_SUFFIX, ScreenConfig, ThresholdConfig, UniverseSource,
};
use tracing_subscriber::EnvFilter;

mod commands;
mod report;

const DEFAULT_LOG_FILTER: &str = "nse_screen=info,screen=info";

#[derive(Parser, Debug)]
#[command(name = "nse-screen", version, about = "Screen NSE-listed stocks")]
struct Cli {
    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Profitability, debt and returns screen over an index constituents list
    Fundamentals(FundamentalsArgs),
    /// Stocks whose price at least doubled over the last six months
    Growth(GrowthArgs),
    /// Number of equities currently listed on NSE
    Count {
        /// Listing URL
        #[arg(long, default_value = EQUITY_LISTING_URL)]
        url: String,
    },
    /// Largest percentage gaps between adjacent prices in a `name,price` CSV
    Gaps {
        /// Input CSV with `name` and `price` columns
        #[arg(long, short)]
        input: PathBuf,
        /// Number of gaps to show
        #[arg(long, default_value_t = DEFAULT_TOP_GAPS)]
        top: usize,
    },
}

#[derive(Args, Debug, Clone)]
struct SourceArgs {
    /// Constituents CSV downloaded from nseindia.com
    #[arg(long, conflicts_with = "remote")]
    constituents: Option<PathBuf>,

    /// Use the NSE equity listing instead of a constituents file
    #[arg(long)]
    remote: bool,

    /// Market suffix appended to every symbol
    #[arg(long, default_value = NSE_SUFFIX)]
    suffix: String,

    /// Only screen the first N symbols
    #[arg(long)]
    limit: Option<usize>,
}

#[derive(Args, Debug)]
struct FundamentalsArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Consecutive profitable years required
    #[arg(long, default_value_t = DEFAULT_PROFITABLE_YEARS)]
    years: usize,

    /// Debt-to-equity must be below this
    #[arg(long, default_value_t = DEFAULT_DEBT_TO_EQUITY_CEILING)]
    max_debt_to_equity: f64,

    /// ROE must be above this fraction
    #[arg(long, default_value_t = DEFAULT_ROE_FLOOR)]
    min_roe: f64,

    /// ROCE must be above this fraction
    #[arg(long, default_value_t = DEFAULT_ROCE_FLOOR)]
    min_roce: f64,

    /// Pause after each symbol, in milliseconds
    #[arg(long, default_value_t = DEFAULT_PAUSE.as_millis() as u64)]
    pause_ms: u64,

    /// Pause after a symbol with no data, in milliseconds
    #[arg(long, default_value_t = DEFAULT_UNAVAILABLE_PAUSE.as_millis() as u64)]
    unavailable_pause_ms: u64,

    /// Symbols fetched concurrently
    #[arg(long, default_value_t = 1)]
    max_in_flight: usize,
}

#[derive(Args, Debug)]
struct GrowthArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// CSV file for the matches
    #[arg(long, short, default_value = DEFAULT_GROWTH_EXPORT)]
    output: PathBuf,

    /// Minimum growth in percent
    #[arg(long, default_value_t = DEFAULT_MIN_GROWTH_PCT)]
    min_growth: f64,

    /// Pause between requests, in milliseconds
    #[arg(long, default_value_t = DEFAULT_GROWTH_PAUSE.as_millis() as u64)]
    pause_ms: u64,
}

impl SourceArgs {
    /// The growth screen defaults to the full NSE listing.
    fn universe_source(&self, default_remote: bool) -> UniverseSource {
        match &self.constituents {
            Some(path) => UniverseSource::File(path.clone()),
            None if self.remote || default_remote => {
                UniverseSource::Remote(EQUITY_LISTING_URL.to_string())
            }
            None => UniverseSource::File(DEFAULT_CONSTITUENTS_FILE.into()),
        }
    }
}

impl FundamentalsArgs {
    fn screen_config(&self) -> Result<ScreenConfig> {
        let thresholds = ThresholdConfig::default()
            .with_profitable_years(self.years)
            .with_debt_to_equity_ceiling(self.max_debt_to_equity)
            .with_roe_floor(self.min_roe)
            .with_roce_floor(self.min_roce);

        ScreenConfig::default()
            .with_thresholds(thresholds)
            .with_market_suffix(self.source.suffix.clone())
            .with_pauses(
                Duration::from_millis(self.pause_ms),
                Duration::from_millis(self.unavailable_pause_ms),
            )
            .with_max_in_flight(self.max_in_flight)
            .with_limit(self.source.limit)
            .validate()
            .context("invalid screening configuration")
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("nse_screen=debug,screen=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Fundamentals(args) => {
            let config = args.screen_config()?;
            let source = args.source.universe_source(false);
            commands::fundamentals(&source, config).await
        }
        Command::Growth(args) => {
            let source = args.source.universe_source(true);
            commands::growth(&source, &args).await
        }
        Command::Count { url } => commands::count(&url).await,
        Command::Gaps { input, top } => commands::gaps(&input, top),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_fundamentals_defaults() {
        let cli = Cli::parse_from(["nse-screen", "fundamentals"]);
        let Command::Fundamentals(args) = cli.command else {
            panic!("expected fundamentals");
        };
        let config = args.screen_config().unwrap();
        assert_eq!(config, ScreenConfig::default());
        assert_eq!(
            args.source.universe_source(false),
            UniverseSource::File(DEFAULT_CONSTITUENTS_FILE.into())
        );
    }

    #[test]
    fn test_fundamentals_flags() {
        let cli = Cli::parse_from([
            "nse-screen",
            "fundamentals",
            "--remote",
            "--years",
            "3",
            "--max-debt-to-equity",
            "0.5",
            "--limit",
            "5",
            "--pause-ms",
            "0",
        ]);
        let Command::Fundamentals(args) = cli.command else {
            panic!("expected fundamentals");
        };
        let config = args.screen_config().unwrap();
        assert_eq!(config.thresholds.profitable_years, 3);
        assert_eq!(config.thresholds.debt_to_equity_ceiling, 0.5);
        assert_eq!(config.limit, Some(5));
        assert_eq!(config.pause, Duration::ZERO);
        assert_eq!(
            args.source.universe_source(false),
            UniverseSource::Remote(EQUITY_LISTING_URL.to_string())
        );
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        let cli = Cli::parse_from(["nse-screen", "fundamentals", "--years", "0"]);
        let Command::Fundamentals(args) = cli.command else {
            panic!("expected fundamentals");
        };
        assert!(args.screen_config().is_err());
    }

    #[test]
    fn test_growth_defaults_to_listing() {
        let cli = Cli::parse_from(["nse-screen", "growth"]);
        let Command::Growth(args) = cli.command else {
            panic!("expected growth");
        };
        assert_eq!(args.output, PathBuf::from(DEFAULT_GROWTH_EXPORT));
        assert_eq!(
            args.source.universe_source(true),
            UniverseSource::Remote(EQUITY_LISTING_URL.to_string())
        );
    }
}
