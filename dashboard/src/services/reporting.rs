//! Monthly profit dashboard

use chrono::{Datelike, Local};

use shared::models::MonthlyProfit;
use shared::money::format_naira;

use crate::api::ApiClient;
use crate::error::AppResult;

/// Rendered state of the dashboard's monthly cards.
///
/// An absent aggregate renders as `NoData`; zero revenue and "no data" are
/// different states and are never conflated.
#[derive(Debug, Clone)]
pub enum MonthlyView {
    NoData,
    Loaded(MonthlyReport),
}

/// The month's figures plus the display label for the period.
///
/// The label is cosmetic: period boundaries are computed by the
/// aggregation service, never by this client.
#[derive(Debug, Clone)]
pub struct MonthlyReport {
    pub month_label: String,
    pub year: i32,
    pub profit: MonthlyProfit,
}

impl MonthlyReport {
    pub fn revenue_display(&self) -> String {
        format_naira(self.profit.total_revenue)
    }

    pub fn cost_display(&self) -> String {
        format_naira(self.profit.total_cost)
    }

    pub fn profit_display(&self) -> String {
        format_naira(self.profit.total_profit)
    }

    /// Negative profit renders in the loss channel, not as an error
    pub fn is_loss(&self) -> bool {
        self.profit.is_loss()
    }
}

/// Service behind the dashboard screen
#[derive(Clone)]
pub struct ReportingService {
    api: ApiClient,
}

impl ReportingService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetch this month's rollup and turn it into a renderable view
    pub async fn monthly_view(&self) -> AppResult<MonthlyView> {
        let aggregate = self.api.monthly_profit().await?;
        Ok(Self::view_from(aggregate))
    }

    /// Pure half of the flow, split out for testing: absent aggregate
    /// becomes `NoData`, never a zeroed report
    pub fn view_from(aggregate: Option<MonthlyProfit>) -> MonthlyView {
        match aggregate {
            None => MonthlyView::NoData,
            Some(profit) => {
                let now = Local::now();
                MonthlyView::Loaded(MonthlyReport {
                    month_label: now.format("%B").to_string(),
                    year: now.year(),
                    profit,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_absent_aggregate_is_no_data() {
        assert!(matches!(
            ReportingService::view_from(None),
            MonthlyView::NoData
        ));
    }

    #[test]
    fn test_zero_month_is_still_loaded() {
        // A month with all-zero figures is real data, distinct from NoData
        let view = ReportingService::view_from(Some(MonthlyProfit {
            total_revenue: Decimal::ZERO,
            total_cost: Decimal::ZERO,
            total_profit: Decimal::ZERO,
        }));
        match view {
            MonthlyView::Loaded(report) => {
                assert_eq!(report.revenue_display(), "₦0.00");
                assert!(!report.is_loss());
            }
            MonthlyView::NoData => panic!("zero month must not collapse to NoData"),
        }
    }

    #[test]
    fn test_losing_month_flagged() {
        let view = ReportingService::view_from(Some(MonthlyProfit {
            total_revenue: dec("1000"),
            total_cost: dec("1200"),
            total_profit: dec("-200"),
        }));
        match view {
            MonthlyView::Loaded(report) => {
                assert!(report.is_loss());
                assert_eq!(report.profit_display(), "-₦200.00");
            }
            MonthlyView::NoData => panic!("expected loaded view"),
        }
    }
}
