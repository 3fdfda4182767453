use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::PERCENT_DISPLAY_PRECISION;

/// Formats a whole-unit amount with Indian digit grouping: ₹50,00,000.
/// The sign, if any, sits between the currency mark and the digits.
pub fn format_inr(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();

    let grouped = group_indian(&digits);
    if negative {
        format!("₹-{}", grouped)
    } else {
        format!("₹{}", grouped)
    }
}

/// Compact form for large valuations: ₹1.20 Cr / ₹5.00 L, plain below a lakh.
pub fn format_inr_compact(amount: i64) -> String {
    if amount == 0 {
        return "₹0".to_string();
    }
    if amount >= 10_000_000 {
        return format!("₹{:.2} Cr", amount as f64 / 10_000_000.0);
    }
    if amount >= 100_000 {
        return format!("₹{:.2} L", amount as f64 / 100_000.0);
    }
    format_inr(amount)
}

/// Signed percentage with two decimals: +12.34% / -5.00%.
pub fn format_signed_pct(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(
        PERCENT_DISPLAY_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    );
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("{:.2}%", rounded)
    } else {
        format!("+{:.2}%", rounded)
    }
}

/// Rounds a derived monetary value to the nearest whole unit for display.
/// Percentage math elsewhere always uses the unrounded value.
pub fn round_display(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<String> = Vec::new();
    let head_bytes = head.as_bytes();
    let mut idx = head_bytes.len();
    while idx > 2 {
        groups.push(String::from_utf8_lossy(&head_bytes[idx - 2..idx]).to_string());
        idx -= 2;
    }
    groups.push(String::from_utf8_lossy(&head_bytes[..idx]).to_string());
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn groups_digits_the_indian_way() {
        assert_eq!(format_inr(0), "₹0");
        assert_eq!(format_inr(999), "₹999");
        assert_eq!(format_inr(50_000), "₹50,000");
        assert_eq!(format_inr(500_000), "₹5,00,000");
        assert_eq!(format_inr(5_000_000), "₹50,00,000");
        assert_eq!(format_inr(123_456_789), "₹12,34,56,789");
        assert_eq!(format_inr(-50_000), "₹-50,000");
    }

    #[test]
    fn compact_form_switches_at_lakh_and_crore() {
        assert_eq!(format_inr_compact(0), "₹0");
        assert_eq!(format_inr_compact(60_000), "₹60,000");
        assert_eq!(format_inr_compact(500_000), "₹5.00 L");
        assert_eq!(format_inr_compact(12_000_000), "₹1.20 Cr");
    }

    #[test]
    fn percentages_always_carry_a_sign() {
        assert_eq!(format_signed_pct(dec!(20)), "+20.00%");
        assert_eq!(format_signed_pct(dec!(12.345)), "+12.35%");
        assert_eq!(format_signed_pct(dec!(-5)), "-5.00%");
        assert_eq!(format_signed_pct(dec!(0)), "+0.00%");
    }
}
