//! Baseline vs accelerated schedule comparison: what a set of extra
//! payments buys in interest and time.

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Instant;

use crate::schedule::{build_schedule, collect_input_warnings, LoanInput, LoanSummary};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::LoanCalcResult;

/// Impact of scheduled extra payments against the no-extra baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtraPaymentImpact {
    /// Schedule with extras stripped.
    pub baseline: LoanSummary,
    /// Schedule with all scheduled extras applied.
    pub with_extras: LoanSummary,
    /// Baseline total interest minus with-extras total interest.
    pub interest_saved: Money,
    /// Whole months shaved off the payoff.
    pub months_saved: u32,
    /// Full years within `months_saved`.
    pub years_saved: u32,
    /// Months left over after the full years.
    pub months_saved_remainder: u32,
    /// Sum of the extra amounts as scheduled.
    pub total_extra_scheduled: Money,
    /// Sum of the extras actually applied; falls short of scheduled when
    /// extras overshoot the payoff or target months the loan never reaches.
    pub total_extra_applied: Money,
}

/// Build the baseline and with-extras schedules and report the savings.
pub fn compare_schedules(
    input: &LoanInput,
) -> LoanCalcResult<ComputationOutput<ExtraPaymentImpact>> {
    let start = Instant::now();
    let mut warnings = collect_input_warnings(input);

    let baseline = build_schedule(input.principal, input.annual_rate_pct, input.term_months, &[]);
    let with_extras = build_schedule(
        input.principal,
        input.annual_rate_pct,
        input.term_months,
        &input.extra_payments,
    );

    if input.extra_payments.is_empty() {
        warnings.push(
            "No extra payments scheduled; baseline and accelerated schedules are identical"
                .to_string(),
        );
    }

    let months_saved = baseline
        .actual_months
        .saturating_sub(with_extras.actual_months);
    let total_extra_scheduled: Money = input.extra_payments.iter().map(|ep| ep.amount).sum();
    let total_extra_applied: Money = with_extras.schedule.iter().map(|r| r.extra_payment).sum();

    let impact = ExtraPaymentImpact {
        interest_saved: baseline.total_interest - with_extras.total_interest,
        months_saved,
        years_saved: months_saved / 12,
        months_saved_remainder: months_saved % 12,
        total_extra_scheduled,
        total_extra_applied,
        baseline,
        with_extras,
    };

    Ok(with_metadata(
        "Extra-Payment Impact (baseline vs accelerated schedule)",
        &json!({
            "principal": input.principal,
            "annual_rate_pct": input.annual_rate_pct,
            "term_months": input.term_months,
            "extra_payment_count": input.extra_payments.len(),
        }),
        warnings,
        start.elapsed().as_micros() as u64,
        impact,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ExtraPayment;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn loan(extras: Vec<ExtraPayment>) -> LoanInput {
        LoanInput {
            principal: dec!(300000),
            annual_rate_pct: dec!(14.66295),
            term_months: 24,
            extra_payments: extras,
        }
    }

    fn extra(id: &str, month: u32, amount: Decimal) -> ExtraPayment {
        ExtraPayment {
            id: id.to_string(),
            month,
            amount,
        }
    }

    // 1. No extras: both schedules identical, all deltas zero
    #[test]
    fn no_extras_is_a_noop_comparison() {
        let output = compare_schedules(&loan(Vec::new())).unwrap();
        let impact = output.result;
        assert_eq!(impact.interest_saved, Decimal::ZERO);
        assert_eq!(impact.months_saved, 0);
        assert_eq!(impact.years_saved, 0);
        assert_eq!(impact.total_extra_scheduled, Decimal::ZERO);
        assert_eq!(impact.total_extra_applied, Decimal::ZERO);
        assert_eq!(
            serde_json::to_value(&impact.baseline).unwrap(),
            serde_json::to_value(&impact.with_extras).unwrap()
        );
        assert!(output
            .warnings
            .iter()
            .any(|w| w.contains("No extra payments")));
    }

    // 2. An effective extra saves interest and months
    #[test]
    fn effective_extra_saves_interest_and_time() {
        let output = compare_schedules(&loan(vec![extra("e", 6, dec!(20000))])).unwrap();
        let impact = output.result;
        assert!(impact.interest_saved > Decimal::ZERO);
        assert!(impact.months_saved >= 1);
        assert_eq!(impact.total_extra_scheduled, dec!(20000));
        assert_eq!(impact.total_extra_applied, dec!(20000));
        assert!(impact.with_extras.total_interest < impact.baseline.total_interest);
    }

    // 3. Overshooting extras: applied falls short of scheduled
    #[test]
    fn overshooting_extra_reports_applied_shortfall() {
        let input = LoanInput {
            principal: dec!(1000),
            annual_rate_pct: Decimal::ZERO,
            term_months: 4,
            extra_payments: vec![extra("big", 1, dec!(10000))],
        };
        let impact = compare_schedules(&input).unwrap().result;
        assert_eq!(impact.total_extra_scheduled, dec!(10000));
        assert_eq!(impact.total_extra_applied, dec!(750));
        assert_eq!(impact.with_extras.actual_months, 1);
        assert_eq!(impact.months_saved, 3);
    }

    // 4. Months saved splits into years and remainder
    #[test]
    fn months_saved_splits_into_years_and_months() {
        let input = LoanInput {
            principal: dec!(300000),
            annual_rate_pct: dec!(14.66295),
            term_months: 60,
            extra_payments: vec![extra("lump", 3, dec!(100000))],
        };
        let impact = compare_schedules(&input).unwrap().result;
        assert!(impact.months_saved > 12);
        assert_eq!(impact.years_saved, impact.months_saved / 12);
        assert_eq!(impact.months_saved_remainder, impact.months_saved % 12);
        assert!(impact.years_saved >= 1);
    }

    // 5. Input warnings propagate through the comparison envelope
    #[test]
    fn negative_rate_warning_propagates() {
        let input = LoanInput {
            principal: dec!(1200),
            annual_rate_pct: dec!(-6),
            term_months: 12,
            extra_payments: vec![extra("e", 2, dec!(100))],
        };
        let output = compare_schedules(&input).unwrap();
        assert!(output
            .warnings
            .iter()
            .any(|w| w.contains("Negative annual rate")));
    }
}
