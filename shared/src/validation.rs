//! Form-level validation for the dashboard's submission paths
//!
//! Everything here runs before a network call is made: a form that fails
//! validation never reaches the backend. Each form type mirrors the raw
//! text state of its screen and converts into the typed payload the API
//! expects.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::models::{Client, NewInventoryItem, NewOrder, Unit};
use crate::money::{parse_amount, parse_optional_amount};

/// A validation failure tied to the form field that caused it
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FormError {
    pub field: &'static str,
    pub message: String,
}

impl FormError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Basic email shape check
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return Err("Invalid email format");
    };
    if local.is_empty() || !domain.contains('.') || domain.starts_with('.') {
        return Err("Invalid email format");
    }
    Ok(())
}

/// Password strength check used by the signup form
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

/// Raw text state of the add-inventory form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryForm {
    pub item_name: String,
    pub quantity: String,
    pub unit: String,
    pub total_amount: String,
    pub shipping_fee: String,
}

impl InventoryForm {
    /// Validate and convert into the submission payload.
    ///
    /// The payload carries the raw purchase figures; the server derives the
    /// authoritative cost per unit from them.
    pub fn into_new_item(self) -> Result<NewInventoryItem, FormError> {
        let item_name = self.item_name.trim().to_string();
        if item_name.is_empty() {
            return Err(FormError::new("itemName", "Item name is required"));
        }

        let quantity = parse_amount(&self.quantity)
            .map_err(|e| FormError::new("quantity", e.to_string()))?;
        if quantity <= Decimal::ZERO {
            return Err(FormError::new("quantity", "Quantity must be greater than zero"));
        }

        let unit = Unit::parse(&self.unit)
            .ok_or_else(|| FormError::new("unit", "Select a unit"))?;

        let total_amount = parse_amount(&self.total_amount)
            .map_err(|e| FormError::new("totalAmount", e.to_string()))?;
        if total_amount < Decimal::ZERO {
            return Err(FormError::new("totalAmount", "Amount cannot be negative"));
        }

        // Shipping is optional and defaults to zero
        let shipping_fee = parse_optional_amount(&self.shipping_fee)
            .map_err(|e| FormError::new("shippingFee", e.to_string()))?;
        if shipping_fee < Decimal::ZERO {
            return Err(FormError::new("shippingFee", "Shipping fee cannot be negative"));
        }

        Ok(NewInventoryItem {
            item_name,
            quantity,
            unit,
            total_amount,
            shipping_fee,
        })
    }
}

/// Raw text state of the record-order form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderForm {
    pub inventory_item_id: String,
    pub quantity_sold: String,
    pub selling_price_per_unit: String,
}

impl OrderForm {
    pub fn into_new_order(self) -> Result<NewOrder, FormError> {
        let inventory_item_id = self.inventory_item_id.trim().to_string();
        if inventory_item_id.is_empty() {
            return Err(FormError::new("inventoryItemId", "Select an inventory item"));
        }

        let quantity_sold = parse_amount(&self.quantity_sold)
            .map_err(|e| FormError::new("quantitySold", e.to_string()))?;
        if quantity_sold <= Decimal::ZERO {
            return Err(FormError::new(
                "quantitySold",
                "Quantity sold must be greater than zero",
            ));
        }

        let selling_price_per_unit = parse_amount(&self.selling_price_per_unit)
            .map_err(|e| FormError::new("sellingPricePerUnit", e.to_string()))?;
        if selling_price_per_unit < Decimal::ZERO {
            return Err(FormError::new(
                "sellingPricePerUnit",
                "Selling price cannot be negative",
            ));
        }

        Ok(NewOrder {
            inventory_item_id,
            quantity_sold,
            selling_price_per_unit,
        })
    }
}

/// Client details entered in the generate-invoice dialog
#[derive(Debug, Clone, Default, Validate, Serialize, Deserialize)]
pub struct ClientForm {
    #[validate(length(min = 1, message = "Client name is required"))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
}

impl ClientForm {
    pub fn into_client(self) -> Result<Client, FormError> {
        let form = ClientForm {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
        };
        form.validate().map_err(|errors| {
            if errors.field_errors().contains_key("name") {
                FormError::new("name", "Client name is required")
            } else {
                FormError::new("email", "Please enter a valid email address")
            }
        })?;
        Ok(Client {
            name: form.name,
            email: form.email,
        })
    }
}
