//! Month-by-month loan amortization with one-off extra principal payments.
//!
//! The builder applies a fixed EMI each month, splits it into interest and
//! principal against the running balance, folds in any extra payments
//! aggregated for that month, and stops when the balance falls to the
//! epsilon or the safety cap is reached. Pure Decimal arithmetic throughout;
//! each call is a pure function of its inputs.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::time::Instant;

use crate::emi::{compute_emi, monthly_rate};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::LoanCalcResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minimum balance threshold below which the loan is considered fully paid.
const BALANCE_EPSILON: Decimal = dec!(0.01);

/// Hard stop for the amortization loop, as a multiple of the nominal term.
const TERM_CAP_FACTOR: u32 = 2;

// ---------------------------------------------------------------------------
// Input Types
// ---------------------------------------------------------------------------

/// A one-time extra principal payment scheduled for a specific month.
///
/// Entries are additive: multiple payments targeting the same month are
/// summed before the schedule is built. The builder never mutates or
/// retains the entries themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtraPayment {
    pub id: String,
    /// Target month, 1-based.
    pub month: u32,
    pub amount: Money,
}

/// Complete input for one schedule computation. The engine holds no state
/// across calls; recomputation always starts from a fresh input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    pub principal: Money,
    /// Annual interest rate quoted as a percentage (14.5 = 14.5%).
    pub annual_rate_pct: Decimal,
    pub term_months: u32,
    #[serde(default)]
    pub extra_payments: Vec<ExtraPayment>,
}

// ---------------------------------------------------------------------------
// Output Types
// ---------------------------------------------------------------------------

/// One month of the amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// Month number, 1-based and contiguous.
    pub month: u32,
    /// Amount paid this month excluding extras: the EMI, or the smaller
    /// final installment.
    pub payment: Money,
    /// Principal retired by the regular payment.
    pub principal: Money,
    /// Interest accrued on the opening balance.
    pub interest: Money,
    /// Extra principal applied this month (clamped in the final month).
    pub extra_payment: Money,
    /// Remaining balance after the month; never negative.
    pub balance: Money,
    /// Cumulative amount paid through this month, extras included.
    pub total_paid: Money,
}

/// Aggregate result of a schedule computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanSummary {
    /// Fixed monthly installment before extras.
    pub emi: Money,
    /// Sum of all amounts paid, applied extras included.
    pub total_payment: Money,
    /// Total payment minus the original principal.
    pub total_interest: Money,
    pub schedule: Vec<AmortizationRow>,
    /// Months to payoff; below the nominal term when extras accelerate it.
    pub actual_months: u32,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the full amortization schedule for a loan with optional extra
/// payments.
///
/// Policy, month by month: interest accrues on the opening balance at the
/// raw monthly rate (negative rates flow through untouched), the EMI's
/// principal portion is `emi - interest`, and the month's aggregated extra
/// is applied on top. The final month fires once scheduled principal plus
/// extra comes within the balance epsilon (0.01) of the balance; its payment
/// is recomputed from the remaining balance so the last installment never
/// exceeds a normal EMI by more than the epsilon, its extra is clamped to
/// the residual the scheduled principal leaves, and the balance lands on
/// exactly 0. Cumulative totals count the applied (clamped) extra, so every
/// total is the sum of its rows.
///
/// Degenerate loans (non-positive principal or zero term) return an empty
/// summary. Non-convergent inputs are cut off at twice the nominal term;
/// the truncated schedule keeps its outstanding balance. A rate so large
/// that one month's interest on the principal leaves decimal range
/// amortizes as zero-interest, mirroring the quote's even-split fallback.
/// No input is rejected and no input panics.
pub fn build_schedule(
    principal: Money,
    annual_rate_pct: Decimal,
    term_months: u32,
    extra_payments: &[ExtraPayment],
) -> LoanSummary {
    if principal <= Decimal::ZERO || term_months == 0 {
        return LoanSummary {
            emi: Decimal::ZERO,
            total_payment: Decimal::ZERO,
            total_interest: Decimal::ZERO,
            schedule: Vec::new(),
            actual_months: 0,
        };
    }

    let emi = compute_emi(principal, annual_rate_pct, term_months);
    let rate = monthly_rate(annual_rate_pct);
    // A rate whose first month of interest overflows Decimal is treated as
    // zero for the whole schedule, in step with the even-split quote.
    let rate = if principal.checked_mul(rate).is_some() {
        rate
    } else {
        Decimal::ZERO
    };
    let extra_by_month = aggregate_extras(extra_payments);
    let month_cap = term_months.saturating_mul(TERM_CAP_FACTOR);

    let mut schedule: Vec<AmortizationRow> = Vec::with_capacity(term_months as usize);
    let mut balance = principal;
    let mut total_paid = Decimal::ZERO;
    let mut month = 1u32;

    while balance > BALANCE_EPSILON && month <= month_cap {
        // A month whose interest overflows Decimal accrues none; extras can
        // push the balance far beyond the principal the rate was vetted for.
        let interest = balance.checked_mul(rate).unwrap_or(Decimal::ZERO);
        let principal_portion = emi - interest;
        let extra = extra_by_month
            .get(&month)
            .copied()
            .unwrap_or(Decimal::ZERO);

        if principal_portion + extra >= balance - BALANCE_EPSILON {
            // Final month: the regular payment covers whatever the applied
            // extra leaves of the balance.
            let residual = (balance - principal_portion).max(Decimal::ZERO);
            let applied_extra = extra.min(residual);
            let principal_paid = balance - applied_extra;
            let payment = principal_paid + interest;
            total_paid += payment + applied_extra;
            schedule.push(AmortizationRow {
                month,
                payment,
                principal: principal_paid,
                interest,
                extra_payment: applied_extra,
                balance: Decimal::ZERO,
                total_paid,
            });
            break;
        }

        balance -= principal_portion + extra;
        if balance < Decimal::ZERO {
            balance = Decimal::ZERO;
        }
        total_paid += emi + extra;
        schedule.push(AmortizationRow {
            month,
            payment: emi,
            principal: principal_portion,
            interest,
            extra_payment: extra,
            balance,
            total_paid,
        });
        month += 1;
    }

    let actual_months = schedule.len() as u32;
    LoanSummary {
        emi,
        total_payment: total_paid,
        total_interest: total_paid - principal,
        schedule,
        actual_months,
    }
}

/// Schedule computation wrapped in the computation envelope, with soft
/// warnings for inputs the engine accepts silently.
pub fn analyze_loan(input: &LoanInput) -> LoanCalcResult<ComputationOutput<LoanSummary>> {
    let start = Instant::now();
    let mut warnings = collect_input_warnings(input);

    let summary = build_schedule(
        input.principal,
        input.annual_rate_pct,
        input.term_months,
        &input.extra_payments,
    );

    if let Some(last) = summary.schedule.last() {
        if last.balance > BALANCE_EPSILON {
            warnings.push(format!(
                "Schedule stopped at the safety cap ({} months) with {} still outstanding",
                summary.actual_months, last.balance
            ));
        }
    }

    Ok(with_metadata(
        "Level-Payment Amortization with Extra Payments",
        &json!({
            "principal": input.principal,
            "annual_rate_pct": input.annual_rate_pct,
            "term_months": input.term_months,
            "extra_payment_count": input.extra_payments.len(),
            "balance_epsilon": BALANCE_EPSILON,
        }),
        warnings,
        start.elapsed().as_micros() as u64,
        summary,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Sum extra payments by target month; entries for the same month are
/// additive and insertion order is irrelevant.
fn aggregate_extras(extra_payments: &[ExtraPayment]) -> BTreeMap<u32, Money> {
    let mut by_month: BTreeMap<u32, Money> = BTreeMap::new();
    for ep in extra_payments {
        let entry = by_month.entry(ep.month).or_insert(Decimal::ZERO);
        *entry += ep.amount;
    }
    by_month
}

/// Soft flags for inputs the engine accepts but callers should know about.
pub(crate) fn collect_input_warnings(input: &LoanInput) -> Vec<String> {
    let mut warnings = Vec::new();
    if input.principal <= BALANCE_EPSILON || input.term_months == 0 {
        warnings.push(
            "Degenerate loan (principal at or below the balance epsilon, or zero term); schedule is empty"
                .to_string(),
        );
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
    if input
        .extra_payments
        .iter()
        .any(|ep| ep.amount < Decimal::ZERO)
    {
        warnings.push("One or more extra payments have a negative amount".to_string());
    }
    if input.extra_payments.iter().any(|ep| ep.month == 0) {
        warnings.push(
            "Extra payment targets month 0; months are 1-based so it will never apply".to_string(),
        );
    }
    warnings
}
