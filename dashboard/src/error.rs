//! Error handling for the dashboard client
//!
//! The taxonomy distinguishes four kinds of failure, because each resolves
//! to a different rendered state:
//! - validation errors, caught before any network call and shown inline
//! - network/transport errors, retryable
//! - backend rejections, carrying the server's message when it sent one
//! - payment errors, including the elevated "payment taken, record not
//!   updated" case which must direct the user to support instead of retry
//!
//! Nothing here is fatal: every variant resolves to a message a screen can
//! render.

use thiserror::Error;

use shared::money::MoneyError;
use shared::validation::FormError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors (pre-network, field-scoped)
    #[error("Validation error on {field}: {message}")]
    Validation { field: String, message: String },

    // Authentication
    #[error("Authentication token not found")]
    AuthTokenMissing,

    // Network/transport errors
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    // Backend rejected the request (non-2xx)
    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },

    // Response arrived but could not be understood
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    // Payment errors
    #[error("Payment system is not properly configured: {0}")]
    PaymentConfig(String),

    #[error("Payment system is not ready")]
    PaymentNotReady,

    #[error("Invalid payment callback: {0}")]
    InvalidCallback(String),

    #[error("Invalid payment amount: {0}")]
    InvalidAmount(String),

    #[error("Invoice {0} has already been paid")]
    AlreadyPaid(String),

    /// The gateway confirmed money movement but the reconciliation call
    /// failed. Blind retry of payment initiation risks a duplicate charge,
    /// so this is surfaced with support-contact severity.
    #[error("Payment {reference} succeeded but the invoice could not be updated: {message}")]
    ReconciliationFailed { reference: String, message: String },

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Whether "try again" is a sane suggestion for this failure
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::Network(_) => true,
            AppError::Api { status, .. } => *status >= 500,
            AppError::PaymentNotReady => true,
            _ => false,
        }
    }

    /// True only for the elevated post-payment failure, which must never be
    /// presented as an ordinary retryable error
    pub fn needs_support_contact(&self) -> bool {
        matches!(self, AppError::ReconciliationFailed { .. })
    }

    /// Message suitable for rendering in the UI
    pub fn user_message(&self) -> String {
        match self {
            AppError::ReconciliationFailed { .. } => {
                "Payment was successful, but there was an issue updating the invoice. \
                 Please contact support."
                    .to_string()
            }
            AppError::AuthTokenMissing => {
                "Your session has ended. Please log in again.".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<FormError> for AppError {
    fn from(e: FormError) -> Self {
        AppError::Validation {
            field: e.field.to_string(),
            message: e.message,
        }
    }
}

impl From<MoneyError> for AppError {
    fn from(e: MoneyError) -> Self {
        AppError::InvalidAmount(e.to_string())
    }
}

/// Result type alias for dashboard operations
pub type AppResult<T> = Result<T, AppError>;
