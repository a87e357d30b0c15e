//! Screen-level services
//!
//! One service per data section. Sections are error-isolated: each fetch
//! fails or succeeds on its own, so one failing table never blanks out
//! another that already loaded.

pub mod auth;
pub mod inventory;
pub mod invoices;
pub mod orders;
pub mod reporting;

pub use auth::AuthService;
pub use inventory::InventoryService;
pub use invoices::InvoicesService;
pub use orders::OrdersService;
pub use reporting::{MonthlyReport, MonthlyView, ReportingService};
