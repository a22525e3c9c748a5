//! Dashboard aggregates computed from the live collections.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Headline numbers for the dashboard screen.
///
/// Revenue figures count completed sales only: pending money is not in the
/// register yet and canceled sales never were.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DashboardMetrics {
    pub total_revenue: Money,
    pub completed_sales: u32,
    pub pending_sales: u32,
    /// `totalRevenue / completedSales`, zero when there are no sales.
    pub average_ticket: Money,
    pub customer_count: u32,
    pub product_count: u32,
    /// Stock-tracked products currently below their minimum.
    pub low_stock_count: u32,
}

/// One row of the best-sellers ranking.
///
/// Names come from sale item snapshots, so a product deleted from the
/// catalog still shows up in the history it earned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TopProduct {
    pub product_id: String,
    pub name: String,
    /// Units across all completed sales.
    pub quantity: i64,
    pub revenue: Money,
}
