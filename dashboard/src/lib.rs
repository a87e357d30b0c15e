//! Inventory Profit Dashboard — client service layer
//!
//! Everything a front end needs behind its screens: a typed client for the
//! REST backend, per-screen services that resolve to renderable states,
//! the Paystack payment integration, and the reconciliation logic that
//! turns gateway callbacks into consistent invoice records.
//!
//! The financial arithmetic itself lives in the `shared` crate; this crate
//! adds the I/O, session handling, and resilience boundaries around it.

pub mod api;
pub mod config;
pub mod error;
pub mod external;
pub mod fetch;
pub mod normalize;
pub mod services;
pub mod session;

pub use config::Config;
pub use error::{AppError, AppResult};

use external::paystack::{PaystackGateway, Reconciler};
use normalize::Normalized;
use services::{
    AuthService, InventoryService, InvoicesService, MonthlyView, OrdersService, ReportingService,
};
use session::SessionStore;
use shared::models::{InventoryItem, Invoice, Order};

/// Wired-up application: one client, one session store, one service per
/// screen
#[derive(Clone)]
pub struct App {
    pub session: SessionStore,
    pub auth: AuthService,
    pub inventory: InventoryService,
    pub orders: OrdersService,
    pub reporting: ReportingService,
    pub invoices: InvoicesService,
    pub gateway: PaystackGateway,
    pub reconciler: Reconciler,
}

/// Results of one dashboard-wide refresh.
///
/// Sections are independent: each carries its own result, so one failing
/// fetch never blanks out a table that loaded fine. A `None` inside a
/// successful section means that fetch was superseded by a newer refresh
/// while in flight.
pub struct RefreshOutcome {
    pub inventory: AppResult<Option<Normalized<InventoryItem>>>,
    pub orders: AppResult<Option<Normalized<Order>>>,
    pub invoices: AppResult<Option<Normalized<Invoice>>>,
    pub monthly: AppResult<MonthlyView>,
}

impl App {
    pub fn new(config: &Config) -> AppResult<Self> {
        let session = SessionStore::new();
        let api = api::ApiClient::new(config, session.clone())?;
        Ok(Self {
            session: session.clone(),
            auth: AuthService::new(api.clone(), session),
            inventory: InventoryService::new(api.clone()),
            orders: OrdersService::new(api.clone()),
            reporting: ReportingService::new(api.clone()),
            invoices: InvoicesService::new(api.clone()),
            gateway: PaystackGateway::new(&config.paystack),
            reconciler: Reconciler::new(api),
        })
    }

    /// Refresh every data section concurrently
    pub async fn refresh_all(&self) -> RefreshOutcome {
        let (inventory, orders, invoices, monthly) = tokio::join!(
            self.orders.load_inventory_options(),
            self.orders.load_orders(),
            self.invoices.list(),
            self.reporting.monthly_view(),
        );
        RefreshOutcome {
            inventory,
            orders,
            invoices,
            monthly,
        }
    }
}

/// Initialize tracing for binaries and examples embedding this crate
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dashboard=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
