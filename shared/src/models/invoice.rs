//! Invoice models and the pending → paid lifecycle

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Invoice recipient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub name: String,
    pub email: String,
}

/// Invoice payment status.
///
/// `Paid` is terminal: an invoice never regresses out of it. `Overdue` is a
/// server-asserted read state, never a transition this client performs.
/// Unknown server values are preserved in `Other` so they stay displayable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvoiceStatus {
    Pending,
    Paid,
    Overdue,
    Other(String),
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::Other(s) => s.as_str(),
        }
    }

    pub fn is_paid(&self) -> bool {
        matches!(self, InvoiceStatus::Paid)
    }

    /// Apply a server-acknowledged status on top of the current one.
    ///
    /// Paid never regresses, so re-applying the same reconciliation ack (or
    /// a stale one) leaves the state unchanged. This is the client half of
    /// the idempotency contract.
    pub fn apply(self, acknowledged: InvoiceStatus) -> InvoiceStatus {
        if self.is_paid() {
            self
        } else {
            acknowledged
        }
    }

    pub fn parse(value: &str) -> InvoiceStatus {
        match value.trim().to_lowercase().as_str() {
            "pending" | "unpaid" => InvoiceStatus::Pending,
            "paid" => InvoiceStatus::Paid,
            "overdue" => InvoiceStatus::Overdue,
            other => InvoiceStatus::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for InvoiceStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for InvoiceStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StatusVisitor;

        impl<'de> Visitor<'de> for StatusVisitor {
            type Value = InvoiceStatus;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("an invoice status string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<InvoiceStatus, E> {
                Ok(InvoiceStatus::parse(value))
            }
        }

        deserializer.deserialize_str(StatusVisitor)
    }
}

/// Itemized invoice line
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    pub name: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub total: Decimal,
}

/// An invoice generated from an order.
///
/// Field aliases absorb the two shapes the backend has been observed to
/// emit (`status`/`paymentStatus`, `issuedDate`/`issuedAt`,
/// `totalAmount`/`total`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[serde(rename = "_id")]
    pub id: String,
    pub invoice_number: String,
    pub client: Client,
    #[serde(alias = "paymentStatus")]
    pub status: InvoiceStatus,
    #[serde(alias = "issuedAt")]
    pub issued_date: DateTime<Utc>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
    #[serde(default)]
    pub subtotal: Option<Decimal>,
    #[serde(default)]
    pub shipping_cost: Option<Decimal>,
    #[serde(alias = "total")]
    pub total_amount: Decimal,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub payment_link: Option<String>,
}

impl Invoice {
    /// Subtotal when itemized, falling back to the total
    pub fn subtotal_or_total(&self) -> Decimal {
        self.subtotal.unwrap_or(self.total_amount)
    }

    /// Fold a server-acknowledged status into this projection
    pub fn apply_ack(&mut self, acknowledged: InvoiceStatus) {
        self.status = self.status.clone().apply(acknowledged);
    }
}

/// Payload for generating an invoice for an existing order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateInvoice {
    pub order_id: String,
    pub client: Client,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_known_and_unknown() {
        assert_eq!(InvoiceStatus::parse("PAID"), InvoiceStatus::Paid);
        assert_eq!(InvoiceStatus::parse("unpaid"), InvoiceStatus::Pending);
        assert_eq!(
            InvoiceStatus::parse("disputed"),
            InvoiceStatus::Other("disputed".to_string())
        );
    }

    #[test]
    fn test_paid_is_terminal() {
        let paid = InvoiceStatus::Paid;
        assert_eq!(paid.apply(InvoiceStatus::Pending), InvoiceStatus::Paid);
        assert_eq!(
            InvoiceStatus::Pending.apply(InvoiceStatus::Paid),
            InvoiceStatus::Paid
        );
    }

    #[test]
    fn test_invoice_accepts_alternate_field_names() {
        let json = r#"{
            "_id": "inv1",
            "invoiceNumber": "INV-001",
            "client": {"name": "Ada", "email": "ada@example.com"},
            "paymentStatus": "pending",
            "issuedAt": "2026-08-01T00:00:00Z",
            "total": "750.00",
            "orderId": "ord1"
        }"#;
        let invoice: Invoice = serde_json::from_str(json).unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Pending);
        assert_eq!(invoice.total_amount.to_string(), "750.00");
        assert!(invoice.items.is_empty());
        assert_eq!(invoice.subtotal_or_total(), invoice.total_amount);
    }
}
