use rust_decimal::Decimal;

/// Format a monetary value as whole rupees with Indian digit grouping.
pub fn format_inr(amount: Decimal) -> String {
    format_grouped(amount, 0)
}

/// Format a monetary value as rupees with paise (two decimals).
pub fn format_inr_precise(amount: Decimal) -> String {
    format_grouped(amount, 2)
}

fn format_grouped(amount: Decimal, dp: u32) -> String {
    let rounded = amount.round_dp(dp);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = rounded.abs().to_string();

    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, f),
        None => (text.as_str(), ""),
    };

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push('₹');
    out.push_str(&group_indian(int_part));
    if dp > 0 {
        out.push('.');
        out.push_str(&format!("{:0<width$}", frac_part, width = dp as usize));
    }
    out
}

/// Indian grouping: the last three digits, then groups of two (12,34,567).
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (h, t) = rest.split_at(rest.len() - 2);
        groups.push(t);
        rest = h;
    }
    groups.push(rest);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}
