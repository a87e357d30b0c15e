//! Inventory purchase models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Measurement units the inventory form offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Kg,
    Litre,
    Ml,
    Packs,
    Bottles,
    Cartons,
}

impl Unit {
    pub const ALL: [Unit; 6] = [
        Unit::Kg,
        Unit::Litre,
        Unit::Ml,
        Unit::Packs,
        Unit::Bottles,
        Unit::Cartons,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Kg => "kg",
            Unit::Litre => "litre",
            Unit::Ml => "ml",
            Unit::Packs => "packs",
            Unit::Bottles => "bottles",
            Unit::Cartons => "cartons",
        }
    }

    /// Form label, e.g. "Kilogram (kg)"
    pub fn label(&self) -> &'static str {
        match self {
            Unit::Kg => "Kilogram (kg)",
            Unit::Litre => "Litre",
            Unit::Ml => "Millilitre (ml)",
            Unit::Packs => "Packs",
            Unit::Bottles => "Bottles",
            Unit::Cartons => "Cartons",
        }
    }

    pub fn parse(value: &str) -> Option<Unit> {
        match value.trim().to_lowercase().as_str() {
            "kg" => Some(Unit::Kg),
            "litre" => Some(Unit::Litre),
            "ml" => Some(Unit::Ml),
            "packs" => Some(Unit::Packs),
            "bottles" => Some(Unit::Bottles),
            "cartons" => Some(Unit::Cartons),
            _ => None,
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An inventory purchase as returned by the backend.
///
/// `cost_per_unit` is a derived field the server computes from the raw
/// purchase figures; the client displays it but never recomputes it for
/// persistence. Items are immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    #[serde(rename = "_id")]
    pub id: String,
    /// Older records use `name` instead of `itemName`
    #[serde(alias = "name")]
    pub item_name: String,
    pub quantity: Decimal,
    pub unit: Unit,
    #[serde(default)]
    pub total_amount: Decimal,
    #[serde(default)]
    pub shipping_fee: Decimal,
    #[serde(default)]
    pub cost_per_unit: Decimal,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for recording a new inventory purchase.
///
/// Carries the raw figures, not the derived cost, so the server can compute
/// the authoritative cost per unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInventoryItem {
    pub item_name: String,
    pub quantity: Decimal,
    pub unit: Unit,
    pub total_amount: Decimal,
    pub shipping_fee: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_round_trip() {
        for unit in Unit::ALL {
            assert_eq!(Unit::parse(unit.as_str()), Some(unit));
        }
        assert_eq!(Unit::parse("barrels"), None);
    }

    #[test]
    fn test_inventory_item_accepts_legacy_name_field() {
        let json = r#"{"_id":"abc123","name":"Premium Rice","quantity":"10","unit":"kg"}"#;
        let item: InventoryItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.item_name, "Premium Rice");
        assert_eq!(item.cost_per_unit, Decimal::ZERO);
    }
}
