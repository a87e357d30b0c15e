//! Cost and profit calculators
//!
//! The arithmetic behind every financial figure the dashboard shows. These
//! functions are pure and are the single place the invariants live:
//!
//! - `cost_per_unit == (total_amount + shipping_fee) / quantity` for
//!   `quantity > 0`
//! - `total_selling_amount == quantity_sold * selling_price_per_unit`
//! - `profit_per_unit == selling_price_per_unit - cost_per_unit`
//! - `total_profit == quantity_sold * profit_per_unit`

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::InventoryItem;
use crate::money::{self, format_naira, parse_amount, round_display};

/// Per-unit cost of a purchase at full precision.
///
/// Returns `None` when the inputs cannot produce a meaningful cost
/// (quantity not strictly positive, or a negative amount). The caller keeps
/// the raw figures so the cost can always be recomputed authoritatively.
pub fn cost_per_unit(
    quantity: Decimal,
    total_amount: Decimal,
    shipping_fee: Decimal,
) -> Option<Decimal> {
    if quantity <= Decimal::ZERO || total_amount < Decimal::ZERO || shipping_fee < Decimal::ZERO {
        return None;
    }
    Some((total_amount + shipping_fee) / quantity)
}

/// Display rendering of the cost preview. The zero fallback here is
/// display-only and is never persisted as a real cost.
pub fn cost_per_unit_display(
    quantity: Decimal,
    total_amount: Decimal,
    shipping_fee: Decimal,
) -> String {
    match cost_per_unit(quantity, total_amount, shipping_fee) {
        Some(cost) => format_naira(cost),
        None => format_naira(Decimal::ZERO),
    }
}

/// Live cost preview from raw form text. Absent until both required fields
/// parse; the optional shipping field defaults to zero.
pub fn cost_preview(quantity: &str, total_amount: &str, shipping_fee: &str) -> Option<String> {
    let quantity = parse_amount(quantity).ok()?;
    let total_amount = parse_amount(total_amount).ok()?;
    let shipping_fee = money::parse_optional_amount(shipping_fee).ok()?;
    Some(cost_per_unit_display(quantity, total_amount, shipping_fee))
}

/// Derived profit figures for a sale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitSummary {
    pub cost_per_unit: Decimal,
    pub total_selling_amount: Decimal,
    pub profit_per_unit: Decimal,
    pub total_profit: Decimal,
}

impl ProfitSummary {
    /// Selling below cost is valid and displayable, in its own severity
    /// channel
    pub fn is_loss(&self) -> bool {
        self.total_profit < Decimal::ZERO
    }
}

/// Compute the profit figures for a sale against a known cost basis.
///
/// `cost_per_unit` is the authoritative value fetched from the inventory
/// record, never recomputed here.
pub fn profit_summary(
    cost_per_unit: Decimal,
    quantity_sold: Decimal,
    selling_price_per_unit: Decimal,
) -> ProfitSummary {
    let profit_per_unit = selling_price_per_unit - cost_per_unit;
    ProfitSummary {
        cost_per_unit,
        total_selling_amount: quantity_sold * selling_price_per_unit,
        profit_per_unit,
        total_profit: quantity_sold * profit_per_unit,
    }
}

/// Profit preview for the order form.
///
/// Absent (not zero, not an error) unless an item is selected and both
/// fields parse as numbers.
pub fn profit_preview(
    selected: Option<&InventoryItem>,
    quantity_sold: &str,
    selling_price_per_unit: &str,
) -> Option<ProfitSummary> {
    let item = selected?;
    let quantity_sold = parse_amount(quantity_sold).ok()?;
    let selling_price = parse_amount(selling_price_per_unit).ok()?;
    Some(profit_summary(item.cost_per_unit, quantity_sold, selling_price))
}

/// Round a derived figure for display without disturbing the stored value
pub fn display_rounded(value: Decimal) -> Decimal {
    round_display(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Unit;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn item_with_cost(cost: &str) -> InventoryItem {
        InventoryItem {
            id: "item1".to_string(),
            item_name: "Premium Rice".to_string(),
            quantity: dec("10"),
            unit: Unit::Kg,
            total_amount: dec("1000"),
            shipping_fee: dec("100"),
            cost_per_unit: dec(cost),
            created_at: None,
        }
    }

    #[test]
    fn test_cost_per_unit_scenario() {
        // 10kg at 1000 total + 100 shipping => 110.00 per kg
        let cost = cost_per_unit(dec("10"), dec("1000"), dec("100")).unwrap();
        assert_eq!(cost, dec("110"));
        assert_eq!(
            cost_per_unit_display(dec("10"), dec("1000"), dec("100")),
            "₦110.00"
        );
    }

    #[test]
    fn test_cost_per_unit_full_precision() {
        let cost = cost_per_unit(dec("3"), dec("100"), Decimal::ZERO).unwrap();
        // Full precision retained, not a rounded 33.33
        assert!(cost > dec("33.33"));
        assert!(cost < dec("33.34"));
    }

    #[test]
    fn test_cost_per_unit_invalid_quantity_displays_zero() {
        assert_eq!(cost_per_unit(Decimal::ZERO, dec("1000"), dec("100")), None);
        assert_eq!(cost_per_unit(dec("-2"), dec("1000"), Decimal::ZERO), None);
        assert_eq!(
            cost_per_unit_display(Decimal::ZERO, dec("1000"), dec("100")),
            "₦0.00"
        );
    }

    #[test]
    fn test_cost_preview_from_form_text() {
        assert_eq!(
            cost_preview("10", "1000", "100"),
            Some("₦110.00".to_string())
        );
        // Empty shipping defaults to zero
        assert_eq!(cost_preview("10", "1000", ""), Some("₦100.00".to_string()));
        // Required fields unparsed => no preview
        assert_eq!(cost_preview("", "1000", ""), None);
        assert_eq!(cost_preview("ten", "1000", ""), None);
    }

    #[test]
    fn test_profit_summary_scenario() {
        // cost 110, sell 5 at 150 => 750 total, 40/unit, 200 profit
        let summary = profit_summary(dec("110"), dec("5"), dec("150"));
        assert_eq!(summary.total_selling_amount, dec("750"));
        assert_eq!(summary.profit_per_unit, dec("40"));
        assert_eq!(summary.total_profit, dec("200"));
        assert!(!summary.is_loss());
    }

    #[test]
    fn test_profit_summary_loss_is_valid() {
        // cost 110, sell 5 at 90 => -100 profit, a loss, not an error
        let summary = profit_summary(dec("110"), dec("5"), dec("90"));
        assert_eq!(summary.total_profit, dec("-100"));
        assert!(summary.is_loss());
    }

    #[test]
    fn test_profit_preview_requires_selection_and_numbers() {
        let item = item_with_cost("110");
        assert!(profit_preview(None, "5", "150").is_none());
        assert!(profit_preview(Some(&item), "", "150").is_none());
        assert!(profit_preview(Some(&item), "5", "abc").is_none());

        let summary = profit_preview(Some(&item), "5", "150").unwrap();
        assert_eq!(summary.total_profit, dec("200"));
    }
}
