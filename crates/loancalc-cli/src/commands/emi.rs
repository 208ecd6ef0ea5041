use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loancalc_core::emi::{self, EmiInput};

#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct EmiArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Decimal,

    /// Annual interest rate as a percentage (e.g. 14.5)
    #[arg(long)]
    pub annual_rate: Decimal,

    /// Term in months
    #[arg(long)]
    pub months: u32,
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input = EmiInput {
        principal: args.principal,
        annual_rate_pct: args.annual_rate,
        term_months: args.months,
    };
    let result = emi::quote_emi(&input)?;
    Ok(serde_json::to_value(result)?)
}
