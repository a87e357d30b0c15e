//! External service integrations

pub mod paystack;
