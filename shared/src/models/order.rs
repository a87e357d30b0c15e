//! Sale (order) models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Unit;

/// Summary of the inventory item an order was sold from, as embedded in the
/// backend's order records
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRef {
    #[serde(alias = "name")]
    pub item_name: String,
    pub unit: Unit,
}

/// A recorded sale. All derived amounts are server-computed; the client
/// only displays them. Orders are immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    pub inventory_item: OrderItemRef,
    pub quantity_sold: Decimal,
    pub selling_price_per_unit: Decimal,
    pub total_selling_amount: Decimal,
    #[serde(default)]
    pub profit_per_unit: Decimal,
    #[serde(default)]
    pub total_profit: Decimal,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// A loss is a valid, displayable state, not an error; it gets its own
    /// severity channel in the UI
    pub fn is_loss(&self) -> bool {
        self.total_profit < Decimal::ZERO
    }
}

/// Payload for recording a new sale against an inventory item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub inventory_item_id: String,
    pub quantity_sold: Decimal,
    pub selling_price_per_unit: Decimal,
}
