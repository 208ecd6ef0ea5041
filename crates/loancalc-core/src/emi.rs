use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Instant;

use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::LoanCalcResult;

/// Divisor converting a percentage quote to a fraction.
const PCT_DIVISOR: Decimal = dec!(100);

/// Months per year, for annual-to-monthly rate conversion.
const MONTHS_PER_YEAR: Decimal = dec!(12);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiInput {
    pub principal: Money,
    /// Annual interest rate quoted as a percentage (14.5 = 14.5%).
    pub annual_rate_pct: Decimal,
    pub term_months: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiQuote {
    pub emi: Money,
    pub monthly_rate: Rate,
}

/// Monthly fraction of an annual percentage quote.
pub(crate) fn monthly_rate(annual_rate_pct: Decimal) -> Rate {
    annual_rate_pct / PCT_DIVISOR / MONTHS_PER_YEAR
}

/// Discount factor (1+r)^-n. The power is built by iterated checked
/// multiplication (no f64, no powd); overflow of the power means the
/// discount is indistinguishable from zero at this precision.
fn compound_discount(one_plus_rate: Decimal, n: u32) -> Decimal {
    let mut factor = Decimal::ONE;
    for _ in 0..n {
        factor = match factor.checked_mul(one_plus_rate) {
            Some(f) => f,
            None => return Decimal::ZERO,
        };
    }
    // one_plus_rate > 1, so the factor never drops below 1
    Decimal::ONE / factor
}

/// Fixed monthly installment for a fully amortizing fixed-rate loan.
///
/// Degenerate loans (non-positive principal or zero term) quote 0. A
/// non-positive rate quotes an even principal split with no compounding.
/// Otherwise the closed-form annuity payment P*r*(1+r)^n / ((1+r)^n - 1),
/// evaluated as P*r / (1 - (1+r)^-n) so the compounding power never
/// inflates the numerator. When the power overflows Decimal the quote
/// degrades to its mathematical limit, the interest-only payment P*r;
/// a rate below decimal resolution falls back to the even split, and so
/// does a rate so large that the installment itself leaves decimal
/// range. The quote therefore never panics, whatever the inputs.
pub fn compute_emi(principal: Money, annual_rate_pct: Decimal, term_months: u32) -> Money {
    if principal <= Decimal::ZERO || term_months == 0 {
        return Decimal::ZERO;
    }
    if annual_rate_pct <= Decimal::ZERO {
        return principal / Decimal::from(term_months);
    }

    let rate = monthly_rate(annual_rate_pct);
    let denom = Decimal::ONE - compound_discount(Decimal::ONE + rate, term_months);
    if denom <= Decimal::ZERO {
        return principal / Decimal::from(term_months);
    }
    principal
        .checked_mul(rate)
        .and_then(|numerator| numerator.checked_div(denom))
        .unwrap_or_else(|| principal / Decimal::from(term_months))
}

/// EMI quote wrapped in the computation envelope.
pub fn quote_emi(input: &EmiInput) -> LoanCalcResult<ComputationOutput<EmiQuote>> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    if input.principal <= Decimal::ZERO || input.term_months == 0 {
        warnings.push("Degenerate loan (non-positive principal or zero term); EMI is 0".to_string());
    }
    if input.annual_rate_pct < Decimal::ZERO {
        warnings.push(
            "Negative annual rate treated as zero-interest (even principal split)".to_string(),
        );
    }
    if input
        .principal
        .checked_mul(monthly_rate(input.annual_rate_pct))
        .is_none()
    {
        warnings.push(
            "Annual rate too large for decimal interest accrual; treated as zero-interest (even principal split)"
                .to_string(),
        );
    }

    let quote = EmiQuote {
        emi: compute_emi(input.principal, input.annual_rate_pct, input.term_months),
        monthly_rate: monthly_rate(input.annual_rate_pct),
    };

    Ok(with_metadata(
        "Fixed-Rate EMI (closed-form annuity)",
        &json!({
            "principal": input.principal,
            "annual_rate_pct": input.annual_rate_pct,
            "term_months": input.term_months,
        }),
        warnings,
        start.elapsed().as_micros() as u64,
        quote,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal, msg: &str) {
        let diff = (actual - expected).abs();
        assert!(
            diff <= tol,
            "{}: expected {}, got {} (diff {})",
            msg,
            expected,
            actual,
            diff
        );
    }

    #[test]
    fn zero_principal_quotes_zero() {
        assert_eq!(compute_emi(Decimal::ZERO, dec!(10), 12), Decimal::ZERO);
    }

    #[test]
    fn negative_principal_quotes_zero() {
        assert_eq!(compute_emi(dec!(-5000), dec!(10), 12), Decimal::ZERO);
    }

    #[test]
    fn zero_term_quotes_zero() {
        assert_eq!(compute_emi(dec!(10000), dec!(10), 0), Decimal::ZERO);
    }

    #[test]
    fn zero_rate_splits_principal_evenly() {
        assert_eq!(compute_emi(dec!(12000), Decimal::ZERO, 12), dec!(1000));
    }

    #[test]
    fn negative_rate_uses_even_split() {
        assert_eq!(compute_emi(dec!(1200), dec!(-12), 12), dec!(100));
    }

    #[test]
    fn reference_loan_emi() {
        let emi = compute_emi(dec!(300000), dec!(14.66295), 24);
        assert_close(emi, dec!(14498.00), dec!(0.01), "EMI for 300k over 24 months");
    }

    #[test]
    fn single_month_term_repays_principal_plus_interest() {
        // n = 1 collapses the annuity to P * (1 + r)
        let emi = compute_emi(dec!(1000), dec!(12), 1);
        assert_close(emi, dec!(1010), dec!(0.0001), "one-month EMI");
    }

    #[test]
    fn higher_rate_raises_installment() {
        let low = compute_emi(dec!(100000), dec!(8), 120);
        let high = compute_emi(dec!(100000), dec!(9), 120);
        assert!(high > low, "9% EMI {} should exceed 8% EMI {}", high, low);
    }

    #[test]
    fn overflowing_compound_factor_degrades_to_interest_only() {
        // (1 + 100)^15 exceeds Decimal::MAX, so the quote collapses to P*r.
        let emi = compute_emi(dec!(1000), dec!(120000), 15);
        assert_eq!(emi, dec!(100000));
    }

    #[test]
    fn astronomical_rate_falls_back_to_even_split() {
        // P*r itself exceeds Decimal::MAX here; the quote falls back to
        // the even principal split instead of panicking.
        let emi = compute_emi(dec!(2000), dec!(70000000000000000000000000000), 12);
        assert_eq!(emi, dec!(2000) / dec!(12));
    }

    #[test]
    fn unrepresentable_installment_falls_back_to_even_split() {
        // P*r fits but P*(1+r) for the single payment exceeds Decimal::MAX,
        // so the quotient overflows and the even split caps the quote at P.
        let emi = compute_emi(dec!(75000000000000000000000000000), dec!(120), 1);
        assert_eq!(emi, dec!(75000000000000000000000000000));
    }

    #[test]
    fn quote_envelope_flags_astronomical_rate() {
        let input = EmiInput {
            principal: dec!(2000),
            annual_rate_pct: dec!(70000000000000000000000000000),
            term_months: 12,
        };
        let output = quote_emi(&input).unwrap();
        assert_eq!(output.result.emi, dec!(2000) / dec!(12));
        assert!(output
            .warnings
            .iter()
            .any(|w| w.contains("too large for decimal interest accrual")));
    }

    #[test]
    fn quote_envelope_flags_negative_rate() {
        let input = EmiInput {
            principal: dec!(1200),
            annual_rate_pct: dec!(-6),
            term_months: 12,
        };
        let output = quote_emi(&input).unwrap();
        assert_eq!(output.result.emi, dec!(100));
        assert!(output
            .warnings
            .iter()
            .any(|w| w.contains("Negative annual rate")));
        assert_eq!(output.metadata.precision, "rust_decimal_128bit");
    }
}
