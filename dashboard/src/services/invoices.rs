//! Invoice generation, listing, and document download

use serde_json::Value;

use shared::models::{GenerateInvoice, Invoice};
use shared::validation::ClientForm;

use crate::api::ApiClient;
use crate::error::AppResult;
use crate::fetch::FetchSequencer;
use crate::normalize::{normalize_list, Normalized, SingleObject};

/// A page of the invoices table
#[derive(Debug, Clone)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Service behind the invoices table and the generate-invoice dialog
#[derive(Clone)]
pub struct InvoicesService {
    api: ApiClient,
    fetch: FetchSequencer,
}

impl InvoicesService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            fetch: FetchSequencer::new(),
        }
    }

    /// Load the invoices table; `None` means a newer refresh superseded
    /// this one
    pub async fn list(&self) -> AppResult<Option<Normalized<Invoice>>> {
        let ticket = self.fetch.begin();
        let payload = self.api.list_invoices().await?;
        let normalized = normalize_list(payload, SingleObject::Reject);
        Ok(self.fetch.accept(ticket, normalized))
    }

    /// Generate an invoice for an existing order. Client details are
    /// validated before the request is made; the created invoice is parsed
    /// leniently since the response envelope is not fixed.
    pub async fn generate(&self, order_id: &str, client: ClientForm) -> AppResult<Option<Invoice>> {
        let request = GenerateInvoice {
            order_id: order_id.to_string(),
            client: client.into_client()?,
        };
        let created = self.api.generate_invoice(&request).await?;
        tracing::info!(order_id, "invoice generated");
        Ok(parse_created_invoice(created))
    }

    /// Fetch the invoice document bytes plus a download filename
    pub async fn download(&self, invoice: &Invoice) -> AppResult<(String, Vec<u8>)> {
        let bytes = self.api.download_invoice(&invoice.id).await?;
        let filename = format!("invoice-{}.pdf", invoice.invoice_number);
        Ok((filename, bytes))
    }

    /// Client-side pagination over an already-loaded list
    pub fn page<'a>(invoices: &'a [Invoice], page: usize, per_page: usize) -> Page<'a, Invoice> {
        let per_page = per_page.max(1);
        let total_items = invoices.len();
        let total_pages = total_items.div_ceil(per_page).max(1);
        let page = page.clamp(1, total_pages);
        let start = (page - 1) * per_page;
        let end = (start + per_page).min(total_items);
        Page {
            items: &invoices[start..end],
            page,
            total_pages,
            total_items,
        }
    }
}

/// The created invoice may arrive bare or wrapped; absence is tolerated
/// since the table refetches anyway
fn parse_created_invoice(payload: Value) -> Option<Invoice> {
    if let Ok(invoice) = serde_json::from_value::<Invoice>(payload.clone()) {
        return Some(invoice);
    }
    for key in ["invoice", "data"] {
        if let Some(inner) = payload.get(key) {
            if let Ok(invoice) = serde_json::from_value::<Invoice>(inner.clone()) {
                return Some(invoice);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use shared::models::{Client, InvoiceStatus};

    fn invoice(n: usize) -> Invoice {
        Invoice {
            id: format!("id-{}", n),
            invoice_number: format!("INV-{:03}", n),
            client: Client {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            },
            status: InvoiceStatus::Pending,
            issued_date: Utc::now(),
            due_date: None,
            items: Vec::new(),
            subtotal: None,
            shipping_cost: None,
            total_amount: Decimal::from(100),
            order_id: None,
            payment_link: None,
        }
    }

    #[test]
    fn test_pagination_slices() {
        let invoices: Vec<Invoice> = (1..=12).map(invoice).collect();

        let first = InvoicesService::page(&invoices, 1, 5);
        assert_eq!(first.items.len(), 5);
        assert_eq!(first.total_pages, 3);

        let last = InvoicesService::page(&invoices, 3, 5);
        assert_eq!(last.items.len(), 2);
        assert_eq!(last.items[0].invoice_number, "INV-011");
    }

    #[test]
    fn test_pagination_clamps_out_of_range() {
        let invoices: Vec<Invoice> = (1..=3).map(invoice).collect();
        let page = InvoicesService::page(&invoices, 99, 5);
        assert_eq!(page.page, 1);
        assert_eq!(page.items.len(), 3);

        let empty: Vec<Invoice> = Vec::new();
        let page = InvoicesService::page(&empty, 1, 5);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_parse_created_invoice_wrapped() {
        let bare = serde_json::to_value(invoice(1)).unwrap();
        assert!(parse_created_invoice(bare.clone()).is_some());

        let wrapped = serde_json::json!({ "invoice": bare });
        assert!(parse_created_invoice(wrapped).is_some());

        assert!(parse_created_invoice(serde_json::json!({"ok": true})).is_none());
    }
}
