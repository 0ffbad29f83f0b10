//! Dashboard service - aggregate figures for the admin landing page.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::DASHBOARD_RECENT_ORDERS;
use crate::domain::Order;
use crate::errors::AppResult;
use crate::infra::repositories::{DailySales, OrderRepository, ProductRepository};

/// Time window for the sales chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

impl DateRange {
    /// Parse the `range` query value; anything unrecognized falls back to
    /// the default thirty-day window.
    pub fn parse(s: &str) -> Self {
        match s {
            "7d" => DateRange::Week,
            "30d" => DateRange::Month,
            "90d" => DateRange::Quarter,
            "1y" => DateRange::Year,
            _ => DateRange::Month,
        }
    }

    pub fn days(&self) -> i64 {
        match self {
            DateRange::Week => 7,
            DateRange::Month => 30,
            DateRange::Quarter => 90,
            DateRange::Year => 365,
        }
    }

    /// Start of the window, relative to now
    pub fn start(&self) -> DateTime<Utc> {
        Utc::now() - Duration::days(self.days())
    }
}

/// Aggregate figures for the admin dashboard
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: u64,
    pub total_orders: u64,
    /// Revenue over paid, shipped and delivered orders, in kobo
    pub total_revenue: i64,
    pub recent_orders: Vec<Order>,
    #[schema(value_type = Vec<Object>)]
    pub sales_data: Vec<DailySales>,
}

/// Dashboard service trait for dependency injection
#[async_trait]
pub trait DashboardService: Send + Sync {
    /// Collect dashboard figures over the given sales window
    async fn stats(&self, range: DateRange) -> AppResult<DashboardStats>;
}

/// Concrete implementation of DashboardService
pub struct DashboardManager {
    orders: Arc<dyn OrderRepository>,
    products: Arc<dyn ProductRepository>,
}

impl DashboardManager {
    /// Create new dashboard service instance
    pub fn new(orders: Arc<dyn OrderRepository>, products: Arc<dyn ProductRepository>) -> Self {
        Self { orders, products }
    }
}

#[async_trait]
impl DashboardService for DashboardManager {
    async fn stats(&self, range: DateRange) -> AppResult<DashboardStats> {
        // Independent aggregates run concurrently
        let (total_products, total_orders, total_revenue, recent_orders, sales_data) = tokio::try_join!(
            self.products.count(),
            self.orders.count(),
            self.orders.revenue_total(),
            self.orders.recent(DASHBOARD_RECENT_ORDERS),
            self.orders.sales_by_day(range.start()),
        )?;

        Ok(DashboardStats {
            total_products,
            total_orders,
            total_revenue,
            recent_orders,
            sales_data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_parsing_falls_back_to_month() {
        assert_eq!(DateRange::parse("7d"), DateRange::Week);
        assert_eq!(DateRange::parse("1y"), DateRange::Year);
        assert_eq!(DateRange::parse("2w"), DateRange::Month);
        assert_eq!(DateRange::parse(""), DateRange::Month);
    }

    #[test]
    fn range_days() {
        assert_eq!(DateRange::Week.days(), 7);
        assert_eq!(DateRange::Month.days(), 30);
        assert_eq!(DateRange::Quarter.days(), 90);
        assert_eq!(DateRange::Year.days(), 365);
    }
}
