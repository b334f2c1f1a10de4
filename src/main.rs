//! Pairscan - Pairs-Trading Mean Reversion Screener
//!
//! Screens daily close histories for diverged correlated pairs, builds
//! labeled training sets, and simulates the strategy backward through time.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use pairscan::adapters::CsvDirectory;
use pairscan::backtest::{BacktestConfig, ScreenOnly, Simulator};
use pairscan::config::load_config;
use pairscan::dataset::{DatasetConfig, TrainingSetBuilder};
use pairscan::domain::MarketData;
use pairscan::ports::MarketDataSource;
use pairscan::screening::enumerate_pairs;
use pairscan::stats::{default_pair_statistics, default_series_statistics};

#[derive(Parser)]
#[command(name = "pairscan", about = "Pairs-trading mean reversion screener")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Log at info level
    #[arg(short, long)]
    verbose: bool,

    /// Log at debug level
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Enumerate and screen pairs for the most recent window
    Pairs {
        /// Window length in trading days
        #[arg(short, long, default_value_t = 20)]
        n: usize,
        /// Days back from the most recent datapoint
        #[arg(short, long, default_value_t = 0)]
        offset: usize,
    },
    /// Build a labeled training set and write it as JSON
    Dataset {
        /// Output path; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Simulate the strategy backward through time
    Backtest,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.debug);

    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    let data = CsvDirectory::new(&config.data.dir)
        .load()
        .context("Failed to load market data")?;
    tracing::info!(symbols = data.len(), "market data loaded");

    match cli.command {
        Command::Pairs { n, offset } => pairs_command(&config, &data, n, offset),
        Command::Dataset { output } => dataset_command(&config, &data, output),
        Command::Backtest => backtest_command(&config, &data),
    }
}

fn init_logging(verbose: bool, debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };

    fmt().with_env_filter(filter).init();
}

fn pairs_command(
    config: &pairscan::config::Config,
    data: &MarketData,
    n: usize,
    offset: usize,
) -> Result<()> {
    let singles = default_series_statistics();
    let pairs = default_pair_statistics();
    let single_refs: Vec<_> = singles.iter().map(|s| s.as_ref()).collect();
    let pair_refs: Vec<_> = pairs.iter().map(|s| s.as_ref()).collect();

    let records = enumerate_pairs(
        data,
        &pair_refs,
        &single_refs,
        n,
        offset,
        config.dataset.min_history,
    );
    let total = records.len();
    let records = config.screen.apply(records);
    tracing::info!(total, surviving = records.len(), "screen applied");

    for record in &records {
        println!(
            "{} / {}  corr {:+.3}  coint {:.3}  ratio dev {:+.3}",
            record.symbol_a,
            record.symbol_b,
            record.stats.correlation(),
            record.stats.cointegration(),
            record.stats.current_price_ratio() - record.stats.mean_price_ratio(),
        );
    }
    println!("{} of {} pairs passed the screen", records.len(), total);
    Ok(())
}

fn dataset_command(
    config: &pairscan::config::Config,
    data: &MarketData,
    output: Option<PathBuf>,
) -> Result<()> {
    let labeler = config.make_labeler()?;
    let builder = TrainingSetBuilder::new(DatasetConfig::from(config), labeler);
    let training_set = builder.build(data).context("Failed to build training set")?;

    let json = serde_json::to_string_pretty(&training_set)?;
    match output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{} rows written to {}", training_set.len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn backtest_command(config: &pairscan::config::Config, data: &MarketData) -> Result<()> {
    let exit = config.make_exit_oracle()?;
    let simulator = Simulator::new(BacktestConfig::from(config), exit);
    let report = simulator.run(data, &ScreenOnly).context("Backtest failed")?;

    for trade in &report.trades {
        println!("{trade}");
    }
    println!("{report}");
    Ok(())
}
