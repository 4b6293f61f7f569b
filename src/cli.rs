//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::ledger_report_adapter::TextLedgerAdapter;
use crate::domain::config_validation::validate_engine_config;
use crate::domain::error::GoldenCrossError;
use crate::domain::runner::{run_universe, RunOutcome};
use crate::domain::signal::EngineConfig;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "goldencross", about = "Moving-average crossover backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the crossover backtest over every ticker in the data directory
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        /// Override [data] dir from the config
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Override [report] output from the config
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Restrict the run to a single ticker
        #[arg(long)]
        ticker: Option<String>,
        /// Validate config and show resolved parameters without running
        #[arg(long)]
        dry_run: bool,
    },
    /// List tickers discovered in the data directory
    ListTickers {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Show bar count and date range for ticker(s)
    Info {
        #[arg(long)]
        ticker: Option<String>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            data_dir,
            output,
            ticker,
            dry_run,
        } => run_backtest(
            &config,
            data_dir.as_ref(),
            output.as_ref(),
            ticker.as_deref(),
            dry_run,
        ),
        Command::ListTickers { config, data_dir } => {
            run_list_tickers(config.as_ref(), data_dir.as_ref())
        }
        Command::Info {
            ticker,
            config,
            data_dir,
        } => run_info(ticker.as_deref(), config.as_ref(), data_dir.as_ref()),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = GoldenCrossError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

pub fn build_engine_config(config: &dyn ConfigPort) -> EngineConfig {
    EngineConfig {
        short_window: config.get_usize("strategy", "short_window", 50),
        long_window: config.get_usize("strategy", "long_window", 200),
        unit_size: config.get_double("engine", "unit_size", 1000.0),
        initial_capital: config.get_double("engine", "initial_capital", 10_000.0),
        close_at_end: config.get_bool("engine", "close_at_end", true),
    }
}

pub fn resolve_data_dir(
    data_dir_override: Option<&PathBuf>,
    config: Option<&dyn ConfigPort>,
) -> Option<PathBuf> {
    if let Some(dir) = data_dir_override {
        return Some(dir.clone());
    }
    config
        .and_then(|c| c.get_string("data", "dir"))
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
}

pub fn resolve_output(output_override: Option<&PathBuf>, config: &dyn ConfigPort) -> PathBuf {
    if let Some(path) = output_override {
        return path.clone();
    }
    config
        .get_string("report", "output")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("trade_ledger.txt"))
}

fn run_backtest(
    config_path: &PathBuf,
    data_dir_override: Option<&PathBuf>,
    output_override: Option<&PathBuf>,
    ticker_override: Option<&str>,
    dry_run: bool,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_engine_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let engine_config = build_engine_config(&adapter);
    let data_dir = match resolve_data_dir(data_dir_override, Some(&adapter)) {
        Some(dir) => dir,
        None => {
            eprintln!("error: no data directory configured");
            return ExitCode::from(2);
        }
    };
    let output = resolve_output(output_override, &adapter);

    if dry_run {
        eprintln!("Config validated successfully");
        eprintln!("\nResolved parameters:");
        eprintln!("  data dir:        {}", data_dir.display());
        eprintln!("  short window:    {}", engine_config.short_window);
        eprintln!("  long window:     {}", engine_config.long_window);
        eprintln!("  unit size:       {:.2}", engine_config.unit_size);
        eprintln!("  initial capital: {:.2}", engine_config.initial_capital);
        eprintln!("  close at end:    {}", engine_config.close_at_end);
        eprintln!("  ledger output:   {}", output.display());
        eprintln!("\nDry run complete: configuration is valid");
        return ExitCode::SUCCESS;
    }

    let data_port = CsvAdapter::new(data_dir.clone());

    let tickers = match ticker_override {
        Some(t) => vec![t.to_uppercase()],
        None => {
            eprintln!("Searching for CSV files in {}...", data_dir.display());
            match data_port.list_tickers() {
                Ok(tickers) => tickers,
                Err(e) => {
                    eprintln!("error: {e}");
                    return (&e).into();
                }
            }
        }
    };
    eprintln!("Found {} tickers", tickers.len());

    let outcome = run_universe(&data_port, &tickers, &engine_config);
    print_summary(&outcome);

    if outcome.ledger.is_empty() {
        eprintln!("\nNo trades were executed; ledger not written");
        return ExitCode::SUCCESS;
    }

    match TextLedgerAdapter.write_ledger(&outcome.ledger, &output) {
        Ok(()) => {
            eprintln!("\nLedger written to: {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to write ledger: {e}");
            ExitCode::from(1)
        }
    }
}

fn print_summary(outcome: &RunOutcome) {
    if outcome.summaries.is_empty() {
        eprintln!("\nNo tickers produced any trades");
    } else {
        eprintln!("\n=== Per-Ticker Summary ===");
        for summary in &outcome.summaries {
            let pnl_sign = if summary.total_pnl >= 0.0 { "+" } else { "" };
            eprintln!(
                "  {}:  {} trades, {:.2}% win rate, {}${:.2}",
                summary.ticker,
                summary.trades,
                summary.win_rate * 100.0,
                pnl_sign,
                summary.total_pnl,
            );
        }

        eprintln!("\n=== Most Profitable Tickers ===");
        for summary in &outcome.summaries {
            eprintln!("  {}: ${:.2}", summary.ticker, summary.total_pnl);
        }
    }

    for position in &outcome.open_positions {
        eprintln!(
            "  {}: position opened {} at {:.2} still open (unrealized)",
            position.ticker, position.entry_date, position.entry_price,
        );
    }
}

fn run_list_tickers(config_path: Option<&PathBuf>, data_dir: Option<&PathBuf>) -> ExitCode {
    let data_dir = match resolve_dir_from_either(config_path, data_dir) {
        Ok(dir) => dir,
        Err(code) => return code,
    };

    let adapter = CsvAdapter::new(data_dir);
    let tickers = match adapter.list_tickers() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if tickers.is_empty() {
        eprintln!("No tickers found");
    } else {
        for ticker in &tickers {
            println!("{}", ticker);
        }
        eprintln!("{} tickers found", tickers.len());
    }
    ExitCode::SUCCESS
}

fn run_info(
    ticker: Option<&str>,
    config_path: Option<&PathBuf>,
    data_dir: Option<&PathBuf>,
) -> ExitCode {
    let data_dir = match resolve_dir_from_either(config_path, data_dir) {
        Ok(dir) => dir,
        Err(code) => return code,
    };

    let adapter = CsvAdapter::new(data_dir);
    let single = ticker.is_some();
    let tickers = match ticker {
        Some(t) => vec![t.to_uppercase()],
        None => match adapter.list_tickers() {
            Ok(t) => t,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        },
    };

    for t in &tickers {
        match adapter.data_range(t) {
            Ok(Some((first, last, count))) => {
                println!("{}: {} bars, {} to {}", t, count, first, last);
            }
            Ok(None) => {
                eprintln!("{}: no data found", t);
            }
            Err(e) => {
                eprintln!("error querying {}: {}", t, e);
                // A ticker named explicitly is a hard failure; in listing
                // mode a bad file should not hide the rest.
                if single {
                    return (&e).into();
                }
            }
        }
    }
    ExitCode::SUCCESS
}

fn resolve_dir_from_either(
    config_path: Option<&PathBuf>,
    data_dir: Option<&PathBuf>,
) -> Result<PathBuf, ExitCode> {
    let config = match (data_dir, config_path) {
        (Some(dir), _) => return Ok(dir.clone()),
        (None, Some(path)) => load_config(path)?,
        (None, None) => {
            eprintln!("error: either --config or --data-dir is required");
            return Err(ExitCode::from(2));
        }
    };

    resolve_data_dir(None, Some(&config)).ok_or_else(|| {
        eprintln!("error: no data directory configured");
        ExitCode::from(2)
    })
}
