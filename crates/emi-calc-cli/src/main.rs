mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::catalog::{BanksArgs, PresetsArgs};
use commands::comparison::CompareArgs;
use commands::loan::{CalculateArgs, ScheduleArgs};

/// Consumer EMI loan calculator
#[derive(Parser)]
#[command(
    name = "emi",
    version,
    about = "Price consumer EMI loans and compare bank processing fees",
    long_about = "A CLI for pricing consumer installment loans with decimal precision. \
                  Computes EMI, the monthly amortisation schedule, processing fees, \
                  tax, cost breakdown and APR, prices no-cost EMI promotions and \
                  compares the same loan across every bank in a fee catalog."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Fee catalog file (.json, .yaml or .yml); the built-in catalog is used otherwise
    #[arg(long, global = true)]
    catalog: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Price one loan: EMI, schedule, fees, tax, breakdown and APR
    Calculate(CalculateArgs),
    /// Print only the month-by-month amortisation schedule
    Schedule(ScheduleArgs),
    /// Price the same loan at every bank in the catalog
    Compare(CompareArgs),
    /// List the fee policies in the catalog
    Banks(BanksArgs),
    /// Show loan terms, interest rate presets and default inputs
    Presets(PresetsArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    // RUST_LOG still wins when set
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let catalog = cli.catalog.as_deref();
    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Calculate(args) => commands::loan::run_calculate(args, catalog),
        Commands::Schedule(args) => commands::loan::run_schedule(args, catalog),
        Commands::Compare(args) => commands::comparison::run_compare(args, catalog),
        Commands::Banks(args) => commands::catalog::run_banks(args, catalog),
        Commands::Presets(args) => commands::catalog::run_presets(args),
        Commands::Version => {
            println!("emi {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
