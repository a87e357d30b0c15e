//! Record-order flow and the orders table

use shared::finance::{self, ProfitSummary};
use shared::models::{InventoryItem, Order};
use shared::validation::OrderForm;

use crate::api::ApiClient;
use crate::error::AppResult;
use crate::fetch::FetchSequencer;
use crate::normalize::{normalize_list, Normalized, SingleObject};

/// Service behind the record-order screen and the orders table
#[derive(Clone)]
pub struct OrdersService {
    api: ApiClient,
    inventory_fetch: FetchSequencer,
    orders_fetch: FetchSequencer,
}

impl OrdersService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            inventory_fetch: FetchSequencer::new(),
            orders_fetch: FetchSequencer::new(),
        }
    }

    /// Load the inventory options for the item selector.
    ///
    /// Returns `None` when a newer refresh superseded this one while it was
    /// in flight. A lone-object payload is promoted to a one-element list,
    /// which this endpoint has been observed to produce.
    pub async fn load_inventory_options(&self) -> AppResult<Option<Normalized<InventoryItem>>> {
        let ticket = self.inventory_fetch.begin();
        let payload = self.api.list_inventory().await?;
        let normalized = normalize_list(payload, SingleObject::Promote);
        Ok(self.inventory_fetch.accept(ticket, normalized))
    }

    /// Load the recent-orders table
    pub async fn load_orders(&self) -> AppResult<Option<Normalized<Order>>> {
        let ticket = self.orders_fetch.begin();
        let payload = self.api.list_orders().await?;
        let normalized = normalize_list(payload, SingleObject::Reject);
        Ok(self.orders_fetch.accept(ticket, normalized))
    }

    /// Profit summary preview: absent until an item is selected and both
    /// sale fields parse as numbers
    pub fn profit_preview(
        selected: Option<&InventoryItem>,
        quantity_sold: &str,
        selling_price_per_unit: &str,
    ) -> Option<ProfitSummary> {
        finance::profit_preview(selected, quantity_sold, selling_price_per_unit)
    }

    /// Validate and record a sale. The backend recomputes and stores the
    /// derived profit figures; the preview shown before submission came
    /// from the same shared arithmetic.
    pub async fn record_order(&self, form: OrderForm) -> AppResult<()> {
        let order = form.into_new_order()?;
        self.api.create_order(&order).await?;
        tracing::info!(item_id = %order.inventory_item_id, "order recorded");
        Ok(())
    }
}
