pub mod compare;
pub mod emi;
pub mod schedule;

use rust_decimal::Decimal;
use std::str::FromStr;

use loancalc_core::schedule::{ExtraPayment, LoanInput};
use loancalc_core::LoanCalcError;

use crate::input;

/// Parse a `--extra MONTH:AMOUNT` spec. Ids are synthesized since
/// flag-supplied extras carry no caller identity.
fn parse_extra_spec(spec: &str, index: usize) -> Result<ExtraPayment, LoanCalcError> {
    let invalid = |reason: &str| LoanCalcError::InvalidInput {
        field: "extra".to_string(),
        reason: format!("'{}': {}", spec, reason),
    };

    let (month_part, amount_part) = spec
        .split_once(':')
        .ok_or_else(|| invalid("expected MONTH:AMOUNT"))?;
    let month: u32 = month_part
        .trim()
        .parse()
        .map_err(|_| invalid("month must be a positive integer"))?;
    let amount = Decimal::from_str(amount_part.trim())
        .map_err(|_| invalid("amount must be a decimal number"))?;

    Ok(ExtraPayment {
        id: format!("cli-{}", index + 1),
        month,
        amount,
    })
}

fn parse_extra_specs(specs: &[String]) -> Result<Vec<ExtraPayment>, LoanCalcError> {
    specs
        .iter()
        .enumerate()
        .map(|(i, s)| parse_extra_spec(s, i))
        .collect()
}

/// Resolve a LoanInput from `--input` file, piped stdin JSON, or flags, in
/// that order. `--extra` specs merge into whichever source supplied the loan.
pub(crate) fn resolve_loan_input(
    principal: Option<Decimal>,
    annual_rate: Option<Decimal>,
    months: Option<u32>,
    extras: &[String],
    input_path: Option<&str>,
) -> Result<LoanInput, Box<dyn std::error::Error>> {
    let mut loan: LoanInput = if let Some(path) = input_path {
        input::file::read_json(path)?
    } else if let Some(piped) = input::stdin::read_stdin()? {
        piped
    } else {
        LoanInput {
            principal: principal.ok_or("--principal is required without --input or piped JSON")?,
            annual_rate_pct: annual_rate
                .ok_or("--annual-rate is required without --input or piped JSON")?,
            term_months: months.ok_or("--months is required without --input or piped JSON")?,
            extra_payments: Vec::new(),
        }
    };
    loan.extra_payments.extend(parse_extra_specs(extras)?);
    Ok(loan)
}
