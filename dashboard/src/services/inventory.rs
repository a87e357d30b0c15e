//! Add-inventory flow

use shared::finance;
use shared::models::Unit;
use shared::validation::InventoryForm;

use crate::api::ApiClient;
use crate::error::AppResult;

/// Service behind the add-inventory screen
#[derive(Clone)]
pub struct InventoryService {
    api: ApiClient,
}

impl InventoryService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Units offered by the form, with their display labels
    pub fn unit_options() -> impl Iterator<Item = (Unit, &'static str)> {
        Unit::ALL.into_iter().map(|u| (u, u.label()))
    }

    /// Live cost-per-unit preview as the user types. Display-only; the
    /// submitted record carries the raw figures so the server computes the
    /// authoritative cost.
    pub fn cost_preview(form: &InventoryForm) -> Option<String> {
        finance::cost_preview(&form.quantity, &form.total_amount, &form.shipping_fee)
    }

    /// Validate and submit a new purchase. Validation failures block the
    /// submission before any network call.
    pub async fn add_item(&self, form: InventoryForm) -> AppResult<()> {
        let item = form.into_new_item()?;
        self.api.add_inventory(&item).await?;
        tracing::info!(item = %item.item_name, "inventory item added");
        Ok(())
    }
}
