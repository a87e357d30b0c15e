//! Data models for the Inventory Profit Dashboard
//!
//! These are read-mostly projections of server-owned entities. Identity is
//! an opaque string id assigned by the backend; nothing here is mutated
//! concurrently by the client.

pub mod inventory;
pub mod invoice;
pub mod order;
pub mod profit;
pub mod user;

pub use inventory::*;
pub use invoice::*;
pub use order::*;
pub use profit::*;
pub use user::*;
