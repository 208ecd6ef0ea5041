mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::compare::CompareArgs;
use commands::emi::EmiArgs;
use commands::schedule::ScheduleArgs;

/// Loan amortization and extra-payment analysis
#[derive(Parser)]
#[command(
    name = "loancalc",
    version,
    about = "Loan amortization and extra-payment analysis",
    long_about = "A CLI for computing loan amortization schedules with decimal \
                  precision. Supports EMI quotes, month-by-month schedules with \
                  one-off extra principal payments, and baseline-vs-accelerated \
                  payoff comparisons."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Quote the fixed monthly installment for a loan
    Emi(EmiArgs),
    /// Build the full amortization schedule
    Schedule(ScheduleArgs),
    /// Compare the schedule with and without extra payments
    Compare(CompareArgs),
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

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Emi(args) => commands::emi::run_emi(args),
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Compare(args) => commands::compare::run_compare(args),
        Commands::Version => {
            println!("loancalc {}", env!("CARGO_PKG_VERSION"));
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

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn emi_accepts_space_separated_negative_rate() {
        let cli = Cli::try_parse_from([
            "loancalc",
            "emi",
            "--principal",
            "1200",
            "--annual-rate",
            "-6",
            "--months",
            "12",
        ])
        .unwrap();
        match cli.command {
            Commands::Emi(args) => assert_eq!(args.annual_rate, dec!(-6)),
            _ => panic!("expected the emi subcommand"),
        }
    }

    #[test]
    fn schedule_and_compare_accept_space_separated_negative_rate() {
        for subcommand in ["schedule", "compare"] {
            let cli = Cli::try_parse_from([
                "loancalc",
                subcommand,
                "--principal",
                "1000",
                "--annual-rate",
                "-6",
                "--months",
                "12",
            ])
            .unwrap();
            let rate = match cli.command {
                Commands::Schedule(args) => args.annual_rate,
                Commands::Compare(args) => args.annual_rate,
                _ => panic!("expected a schedule-style subcommand"),
            };
            assert_eq!(rate, Some(dec!(-6)));
        }
    }
}
