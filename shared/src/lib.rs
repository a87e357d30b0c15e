//! Shared types and financial computations for the Inventory Profit Dashboard
//!
//! This crate contains the data models and the pure cost/profit/currency
//! arithmetic shared between the dashboard client and any other consumer.
//! Derived financial fields are computed here and nowhere else, so the
//! preview shown in a form and the figure persisted by the backend can
//! never silently diverge.

pub mod finance;
pub mod models;
pub mod money;
pub mod validation;

pub use finance::*;
pub use models::*;
pub use money::*;
