//! Financial arithmetic tests
//!
//! Covers the invariants behind every figure the dashboard displays:
//! - cost per unit: (totalAmount + shippingFee) / quantity, nonnegative
//! - profit: totalProfit = quantitySold * (sellingPrice - costPerUnit)
//! - kobo conversion bounds for the payment gateway

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::finance::{cost_per_unit, cost_per_unit_display, profit_summary};
use shared::money::{format_naira, to_kobo};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_worked_purchase_example() {
        // 10kg purchased for 1000 with 100 shipping
        let cost = cost_per_unit(dec("10"), dec("1000"), dec("100")).unwrap();
        assert_eq!(cost, dec("110"));
        assert_eq!(format_naira(cost), "₦110.00");
    }

    #[test]
    fn test_worked_sale_example() {
        // cost 110, 5 sold at 150
        let summary = profit_summary(dec("110"), dec("5"), dec("150"));
        assert_eq!(summary.total_selling_amount, dec("750"));
        assert_eq!(summary.profit_per_unit, dec("40"));
        assert_eq!(summary.total_profit, dec("200"));
    }

    #[test]
    fn test_selling_below_cost_is_a_loss_not_an_error() {
        let summary = profit_summary(dec("110"), dec("5"), dec("90"));
        assert_eq!(summary.total_profit, dec("-100"));
        assert!(summary.is_loss());
        assert_eq!(format_naira(summary.total_profit), "-₦100.00");
    }

    #[test]
    fn test_zero_quantity_cost_is_display_only_zero() {
        assert!(cost_per_unit(dec("0"), dec("1000"), dec("100")).is_none());
        assert_eq!(
            cost_per_unit_display(dec("0"), dec("1000"), dec("100")),
            "₦0.00"
        );
    }

    #[test]
    fn test_kobo_conversion_for_gateway() {
        assert_eq!(to_kobo(dec("750")).unwrap(), 75_000);
        assert!(to_kobo(dec("0")).is_err());
        assert!(to_kobo(dec("-10")).is_err());
    }
}

// ============================================================================
// Property Tests
// ============================================================================

// Decimal with two fractional digits in a realistic range
fn money_amount() -> impl Strategy<Value = Decimal> {
    (0i64..=100_000_000).prop_map(|n| Decimal::new(n, 2))
}

fn positive_quantity() -> impl Strategy<Value = Decimal> {
    (1i64..=1_000_000).prop_map(|n| Decimal::new(n, 2))
}

proptest! {
    /// Cost per unit is exactly (total + shipping) / quantity and never
    /// negative for valid inputs
    #[test]
    fn prop_cost_formula(
        quantity in positive_quantity(),
        total in money_amount(),
        shipping in money_amount(),
    ) {
        let cost = cost_per_unit(quantity, total, shipping).unwrap();
        prop_assert!(cost >= Decimal::ZERO);
        prop_assert_eq!(cost, (total + shipping) / quantity);
    }

    /// totalProfit == quantitySold * (price - cost), and equivalently
    /// totalSellingAmount - quantitySold * cost
    #[test]
    fn prop_profit_identities(
        cost in money_amount(),
        quantity in positive_quantity(),
        price in money_amount(),
    ) {
        let summary = profit_summary(cost, quantity, price);
        prop_assert_eq!(summary.total_selling_amount, quantity * price);
        prop_assert_eq!(summary.profit_per_unit, price - cost);
        prop_assert_eq!(summary.total_profit, quantity * (price - cost));
        prop_assert_eq!(
            summary.total_profit,
            summary.total_selling_amount - quantity * cost
        );
    }

    /// Profit sign follows the price/cost comparison; a negative result is
    /// produced, not rejected
    #[test]
    fn prop_profit_sign(
        cost in money_amount(),
        quantity in positive_quantity(),
        price in money_amount(),
    ) {
        let summary = profit_summary(cost, quantity, price);
        if price > cost {
            prop_assert!(summary.total_profit > Decimal::ZERO);
        } else if price < cost {
            prop_assert!(summary.total_profit < Decimal::ZERO);
            prop_assert!(summary.is_loss());
        } else {
            prop_assert_eq!(summary.total_profit, Decimal::ZERO);
        }
    }

    /// Kobo conversion is within half a kobo of the exact product and
    /// always positive for positive amounts
    #[test]
    fn prop_kobo_bounds(amount in (1i64..=100_000_000).prop_map(|n| Decimal::new(n, 2))) {
        let kobo = to_kobo(amount).unwrap();
        prop_assert!(kobo > 0);
        let exact = amount * Decimal::from(100);
        let diff = (Decimal::from(kobo) - exact).abs();
        prop_assert!(diff <= Decimal::new(5, 1)); // within 0.5 kobo
    }

    /// Two-decimal amounts convert to kobo exactly
    #[test]
    fn prop_kobo_exact_for_two_dp(n in 1i64..=100_000_000) {
        let amount = Decimal::new(n, 2);
        prop_assert_eq!(to_kobo(amount).unwrap(), n);
    }
}
