//! Typed REST client for the backend contract
//!
//! Thin wrapper over reqwest: attach the bearer token, send, and turn
//! non-2xx responses into [`AppError::Api`] with the server's `message`
//! field when one is present. List endpoints return raw JSON values because
//! their shape is not fixed; the normalizer in [`crate::normalize`] turns
//! them into typed lists.

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use shared::models::{
    AuthResponse, GenerateInvoice, Invoice, LoginRequest, MonthlyProfit, NewInventoryItem,
    NewOrder, RegisterRequest,
};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::session::SessionStore;

/// Reconciliation payload for `POST /api/invoices/pay/:invoiceNumber`.
///
/// Carries the gateway's reference and raw payload so the backend can apply
/// the payment idempotently: resubmitting the same (invoiceNumber,
/// reference) pair must not double-apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkPaidRequest {
    pub payment_reference: String,
    pub payment_data: Value,
    pub transaction_id: Option<String>,
    pub status: String,
}

/// HTTP client for the dashboard backend
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(config: &Config, session: SessionStore) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the bearer token, snapshotting it once for this request.
    /// Missing token fails here, before anything is dispatched.
    fn authorize(&self, builder: RequestBuilder) -> AppResult<RequestBuilder> {
        let token = self.session.token_snapshot()?;
        Ok(builder.bearer_auth(token))
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> AppResult<T> {
        let response = Self::check_status(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| AppError::MalformedResponse(format!("invalid JSON response: {}", e)))
    }

    /// Turn a non-2xx response into an API error, preferring the backend's
    /// own `message` field over a generic status line
    async fn check_status(response: Response) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(String::from))
            .unwrap_or_else(|| generic_status_message(status));
        tracing::warn!(status = status.as_u16(), %message, "backend rejected request");
        Err(AppError::Api {
            status: status.as_u16(),
            message,
        })
    }

    // ------------------------------------------------------------------
    // Auth
    // ------------------------------------------------------------------

    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&body)
            .send()
            .await?;
        Self::read_json(response).await
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> AppResult<AuthResponse> {
        let body = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self
            .http
            .post(self.url("/api/auth/register"))
            .json(&body)
            .send()
            .await?;
        Self::read_json(response).await
    }

    // ------------------------------------------------------------------
    // Inventory
    // ------------------------------------------------------------------

    pub async fn add_inventory(&self, item: &NewInventoryItem) -> AppResult<Value> {
        let request = self.authorize(self.http.post(self.url("/api/inventory")))?;
        let response = request.json(item).send().await?;
        Self::read_json(response).await
    }

    /// Raw payload; shape is not fixed, see the normalizer
    pub async fn list_inventory(&self) -> AppResult<Value> {
        let request = self.authorize(self.http.get(self.url("/api/inventory")))?;
        let response = request.send().await?;
        Self::read_json(response).await
    }

    // ------------------------------------------------------------------
    // Orders
    // ------------------------------------------------------------------

    pub async fn create_order(&self, order: &NewOrder) -> AppResult<Value> {
        let request = self.authorize(self.http.post(self.url("/api/orders/create")))?;
        let response = request.json(order).send().await?;
        Self::read_json(response).await
    }

    pub async fn list_orders(&self) -> AppResult<Value> {
        let request = self.authorize(self.http.get(self.url("/api/orders")))?;
        let response = request.send().await?;
        Self::read_json(response).await
    }

    /// This month's rollup, or `None` when there are no sales yet.
    ///
    /// The aggregate is consumed as-is; the client never recomputes it.
    pub async fn monthly_profit(&self) -> AppResult<Option<MonthlyProfit>> {
        let request = self
            .authorize(self.http.get(self.url("/api/orders/profit/monthly")))?;
        let response = request.send().await?;
        let response = Self::check_status(response).await?;
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        let value: Value = serde_json::from_str(&body)
            .map_err(|e| AppError::MalformedResponse(format!("invalid JSON response: {}", e)))?;
        // The aggregate may arrive bare or wrapped under `data`
        let payload = match value {
            Value::Null => return Ok(None),
            Value::Object(ref map) if map.contains_key("data") => map["data"].clone(),
            other => other,
        };
        if payload.is_null() {
            return Ok(None);
        }
        serde_json::from_value(payload)
            .map(Some)
            .map_err(|e| AppError::MalformedResponse(format!("monthly profit: {}", e)))
    }

    // ------------------------------------------------------------------
    // Invoices
    // ------------------------------------------------------------------

    pub async fn generate_invoice(&self, request_body: &GenerateInvoice) -> AppResult<Value> {
        let request = self.authorize(self.http.post(self.url("/api/invoices/generate")))?;
        let response = request.json(request_body).send().await?;
        Self::read_json(response).await
    }

    pub async fn list_invoices(&self) -> AppResult<Value> {
        let request = self.authorize(self.http.get(self.url("/api/invoices")))?;
        let response = request.send().await?;
        Self::read_json(response).await
    }

    /// Public-facing lookup used by the payment page; no token attached
    pub async fn invoice_by_number(&self, invoice_number: &str) -> AppResult<Invoice> {
        let response = self
            .http
            .get(self.url(&format!("/api/invoices/{}", invoice_number)))
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Submit a payment reconciliation, scoped to the invoice number that
    /// initiated the flow. Safe to retry with the same reference.
    pub async fn mark_invoice_paid(
        &self,
        invoice_number: &str,
        payment: &MarkPaidRequest,
    ) -> AppResult<Value> {
        let response = self
            .http
            .post(self.url(&format!("/api/invoices/pay/{}", invoice_number)))
            .json(payment)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Invoice document bytes for download
    pub async fn download_invoice(&self, invoice_id: &str) -> AppResult<Vec<u8>> {
        let request = self.authorize(
            self.http
                .get(self.url(&format!("/api/invoices/{}/download", invoice_id))),
        )?;
        let response = request.send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

fn generic_status_message(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("HTTP {}: {}", status.as_u16(), reason),
        None => format!("HTTP {}", status.as_u16()),
    }
}
