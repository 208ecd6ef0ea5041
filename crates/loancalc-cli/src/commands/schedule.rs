use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loancalc_core::schedule;

use crate::commands::resolve_loan_input;

#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ScheduleArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate as a percentage (e.g. 14.5)
    #[arg(long)]
    pub annual_rate: Option<Decimal>,

    /// Term in months
    #[arg(long)]
    pub months: Option<u32>,

    /// Extra payment as MONTH:AMOUNT (repeatable)
    #[arg(long = "extra", value_name = "MONTH:AMOUNT")]
    pub extras: Vec<String>,

    /// JSON input file with the loan terms and extra payments
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = resolve_loan_input(
        args.principal,
        args.annual_rate,
        args.months,
        &args.extras,
        args.input.as_deref(),
    )?;
    let result = schedule::analyze_loan(&loan)?;
    Ok(serde_json::to_value(result)?)
}
