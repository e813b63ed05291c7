//! Money and quantity helpers shared by the ordering core.

use rust_decimal::{Decimal, RoundingStrategy};

/// Prefix printed in front of every formatted amount.
pub const CURRENCY_PREFIX: &str = "R$";

/// Format an amount for display, rounding to cents only here.
///
/// Totals are accumulated at full precision and rounded exactly once, at the
/// point they become text.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{CURRENCY_PREFIX} {rounded:.2}")
}

/// Clamp a signed quantity into the non-negative range used by buffers and carts.
pub fn clamp_quantity(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

/// `current + delta`, floored at zero.
pub fn apply_delta(current: u32, delta: i64) -> u32 {
    clamp_quantity(i64::from(current).saturating_add(delta))
}

/// Price of `quantity` units, kept at full precision.
pub fn line_total(price: Decimal, quantity: u32) -> Decimal {
    price * Decimal::from(quantity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_two_decimals() {
        assert_eq!(format_currency(Decimal::new(20, 0)), "R$ 20.00");
        assert_eq!(format_currency(Decimal::new(1250, 2)), "R$ 12.50");
    }

    #[test]
    fn rounds_half_away_from_zero_at_format_time() {
        assert_eq!(format_currency(Decimal::new(10005, 3)), "R$ 10.01");
        assert_eq!(format_currency(Decimal::new(10004, 3)), "R$ 10.00");
    }

    #[test]
    fn quantities_never_go_negative() {
        assert_eq!(clamp_quantity(-3), 0);
        assert_eq!(apply_delta(1, -5), 0);
        assert_eq!(apply_delta(2, 3), 5);
        assert_eq!(clamp_quantity(i64::MAX), u32::MAX);
    }

    #[test]
    fn line_total_is_exact() {
        let price = Decimal::new(333, 2);
        assert_eq!(line_total(price, 3), Decimal::new(999, 2));
    }
}
