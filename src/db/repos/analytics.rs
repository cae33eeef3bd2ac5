use async_trait::async_trait;

use crate::{
    db::error::DbResult,
    models::{CostGroupRow, ToolUsageRow, VendorRow},
};

/// Report queries. Every query only considers tools with status `active`.
#[async_trait]
pub trait AnalyticsRepo: Send + Sync {
    /// Totals per owning department, most expensive first.
    async fn department_cost_rows(&self) -> DbResult<Vec<CostGroupRow>>;

    /// Summed cost and users over tools that have at least one user.
    async fn company_cost_totals(&self) -> DbResult<(f64, i64)>;

    /// The `limit` most expensive tools.
    async fn most_expensive_tools(&self, limit: i64) -> DbResult<Vec<ToolUsageRow>>;

    /// Totals per category, most expensive first. Tools whose category row
    /// is missing are grouped under "Uncategorized".
    async fn category_cost_rows(&self) -> DbResult<Vec<CostGroupRow>>;

    /// Tools with at most `threshold` users, fewest users first, then most
    /// expensive first.
    async fn low_usage_tools(&self, threshold: i32) -> DbResult<Vec<ToolUsageRow>>;

    /// Totals per vendor, most expensive first. Tools without a vendor are
    /// grouped under "Unknown".
    async fn vendor_rows(&self) -> DbResult<Vec<VendorRow>>;
}
