//! Paystack gateway integration and invoice reconciliation
//!
//! The gateway collects money through its inline widget; this module owns
//! the integration contract around it:
//! - refusing to start a charge unless the widget resource is initialized,
//!   the key is configured, and the amount converts to a positive kobo
//!   value
//! - validating the success callback (a callback without a reference is
//!   logged and produces no reconciliation action)
//! - submitting the reconciliation scoped to the invoice number that
//!   started the flow, and treating the backend's acknowledgement as the
//!   only source of truth for whether the invoice is paid
//!
//! A gateway callback succeeding proves money moved; it does not prove the
//! invoice record was updated. The two failure modes are kept distinct.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha512;
use uuid::Uuid;

use shared::models::{Invoice, InvoiceStatus};
use shared::money::to_kobo;

use crate::api::{ApiClient, MarkPaidRequest};
use crate::config::PaystackConfig;
use crate::error::{AppError, AppResult};

type HmacSha512 = Hmac<Sha512>;

/// Custom field attached to the charge metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomField {
    pub display_name: String,
    pub variable_name: String,
    pub value: String,
}

/// Charge metadata: enough to trace a gateway transaction back to its
/// invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeMetadata {
    pub invoice_id: String,
    pub invoice_number: String,
    pub client_name: String,
    pub custom_fields: Vec<CustomField>,
}

/// A fully validated charge, ready to hand to the inline widget
#[derive(Debug, Clone, Serialize)]
pub struct ChargeRequest {
    pub key: String,
    pub email: String,
    /// Amount in kobo, the smallest currency subunit
    pub amount: i64,
    pub currency: &'static str,
    #[serde(rename = "ref")]
    pub reference: String,
    pub metadata: ChargeMetadata,
}

/// Success callback payload from the gateway. The transaction id arrives
/// under either `trans` or `transaction` depending on the widget version.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallbackResponse {
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub trans: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub transaction: Option<String>,
    #[serde(default)]
    pub trxref: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// The widget has emitted transaction ids as both strings and numbers
fn string_or_number<'de, D: serde::Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

impl CallbackResponse {
    pub fn transaction_id(&self) -> Option<String> {
        self.trans.clone().or_else(|| self.transaction.clone())
    }

    pub fn is_successful(&self) -> bool {
        self.status == "success" && !self.reference.is_empty()
    }
}

/// Handle to the gateway widget resource
#[derive(Clone)]
pub struct PaystackGateway {
    public_key: Option<String>,
    secret_key: Option<String>,
    ready: Arc<AtomicBool>,
}

impl PaystackGateway {
    pub fn new(config: &PaystackConfig) -> Self {
        Self {
            public_key: config.public_key.clone(),
            secret_key: config.secret_key.clone(),
            ready: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Call once the widget script has loaded
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::SeqCst);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// Build a charge for an invoice, enforcing every precondition of the
    /// payment flow. Each refusal is a distinct error so the UI can render
    /// it correctly instead of silently queuing or silently failing.
    pub fn build_charge(&self, invoice: &Invoice) -> AppResult<ChargeRequest> {
        if !self.is_ready() {
            return Err(AppError::PaymentNotReady);
        }
        let key = self
            .public_key
            .clone()
            .ok_or_else(|| AppError::PaymentConfig("public key is not set".to_string()))?;
        if invoice.status.is_paid() {
            return Err(AppError::AlreadyPaid(invoice.invoice_number.clone()));
        }
        let email = invoice.client.email.trim().to_string();
        if email.is_empty() {
            return Err(AppError::Validation {
                field: "email".to_string(),
                message: "Client email is required for payment".to_string(),
            });
        }
        // Rejects zero and negative totals before anything reaches the
        // gateway
        let amount = to_kobo(invoice.total_amount)?;

        Ok(ChargeRequest {
            key,
            email,
            amount,
            currency: "NGN",
            reference: generate_reference(&invoice.invoice_number),
            metadata: ChargeMetadata {
                invoice_id: invoice.id.clone(),
                invoice_number: invoice.invoice_number.clone(),
                client_name: invoice.client.name.clone(),
                custom_fields: vec![
                    CustomField {
                        display_name: "Invoice Number".to_string(),
                        variable_name: "invoice_number".to_string(),
                        value: invoice.invoice_number.clone(),
                    },
                    CustomField {
                        display_name: "Client Name".to_string(),
                        variable_name: "client_name".to_string(),
                        value: invoice.client.name.clone(),
                    },
                ],
            },
        })
    }

    /// Verify the `x-paystack-signature` header on a webhook body
    /// (HMAC-SHA512 over the raw body, hex encoded)
    pub fn verify_webhook_signature(&self, body: &[u8], signature: &str) -> AppResult<bool> {
        let secret = self
            .secret_key
            .as_deref()
            .ok_or_else(|| AppError::PaymentConfig("secret key is not set".to_string()))?;
        let mut mac = HmacSha512::new_from_slice(secret.as_bytes())
            .map_err(|e| AppError::PaymentConfig(e.to_string()))?;
        mac.update(body);
        let expected = hex_encode(&mac.finalize().into_bytes());
        Ok(expected.eq_ignore_ascii_case(signature.trim()))
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Unique payment reference: invoice number, millisecond timestamp, random
/// suffix
pub fn generate_reference(invoice_number: &str) -> String {
    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(9).collect();
    format!("{}-{}-{}", invoice_number, Utc::now().timestamp_millis(), suffix)
}

/// Reject callbacks that cannot be reconciled. No reference means no
/// reconciliation action is taken at all.
pub fn validate_callback(callback: &CallbackResponse) -> AppResult<()> {
    if callback.reference.trim().is_empty() {
        tracing::warn!(status = %callback.status, "payment callback carried no reference");
        return Err(AppError::InvalidCallback(
            "callback carried no payment reference".to_string(),
        ));
    }
    Ok(())
}

/// Applies a gateway callback to an invoice via the backend
#[derive(Clone)]
pub struct Reconciler {
    api: ApiClient,
}

impl Reconciler {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Build the reconciliation payload from a validated callback.
    ///
    /// Pure and deterministic per (invoice, reference): the same callback
    /// always produces the same payload, which is what makes retries safe
    /// for the backend to deduplicate.
    pub fn build_payload(callback: &CallbackResponse) -> MarkPaidRequest {
        MarkPaidRequest {
            payment_reference: callback.reference.clone(),
            payment_data: serde_json::to_value(callback).unwrap_or_default(),
            transaction_id: callback.transaction_id(),
            status: callback.status.clone(),
        }
    }

    /// Reconcile a gateway callback against the invoice that initiated the
    /// payment flow.
    ///
    /// The invoice number comes from the flow, never from the callback
    /// payload, to rule out cross-invoice mix-ups. The acknowledged status
    /// in the backend's response is the only thing that marks the invoice
    /// paid; a failure here after the gateway succeeded is the elevated
    /// "payment taken, record not updated" case.
    pub async fn reconcile(
        &self,
        invoice_number: &str,
        callback: &CallbackResponse,
    ) -> AppResult<InvoiceStatus> {
        validate_callback(callback)?;

        let payload = Self::build_payload(callback);
        tracing::info!(
            invoice_number,
            reference = %payload.payment_reference,
            "submitting payment reconciliation"
        );

        let ack = self
            .api
            .mark_invoice_paid(invoice_number, &payload)
            .await
            .map_err(|e| AppError::ReconciliationFailed {
                reference: payload.payment_reference.clone(),
                message: e.to_string(),
            })?;

        let status = acknowledged_status(&ack);
        tracing::info!(invoice_number, status = %status, "reconciliation acknowledged");
        Ok(status)
    }
}

/// Pull the acknowledged invoice status out of the backend's response.
/// A 2xx acknowledgement without an explicit status field means paid.
fn acknowledged_status(ack: &serde_json::Value) -> InvoiceStatus {
    let candidates = [
        ack.get("status"),
        ack.get("paymentStatus"),
        ack.get("invoice").and_then(|v| v.get("status")),
        ack.get("invoice").and_then(|v| v.get("paymentStatus")),
    ];
    candidates
        .into_iter()
        .flatten()
        .filter_map(|v| v.as_str())
        // Some backends echo the HTTP outcome under `status`
        .find(|s| !matches!(*s, "ok" | "success"))
        .map(InvoiceStatus::parse)
        .unwrap_or(InvoiceStatus::Paid)
}
