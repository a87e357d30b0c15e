//! Monthly profit aggregate

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The current month's rollup, computed entirely upstream.
///
/// The client displays these figures and never recomputes them. Absence of
/// the aggregate means "no sales this month", which is a different state
/// from an all-zero month and must not be conflated with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyProfit {
    pub total_revenue: Decimal,
    pub total_cost: Decimal,
    pub total_profit: Decimal,
}

impl MonthlyProfit {
    pub fn is_loss(&self) -> bool {
        self.total_profit < Decimal::ZERO
    }
}
