use std::sync::Arc;

use crate::{
    analytics,
    db::{DbPool, DbResult},
    models::{
        DepartmentCostsReport, ExpensiveToolsReport, LowUsageReport, ToolsByCategoryReport,
        VendorSummaryReport,
    },
};

/// Service layer for cost reports.
///
/// Each report is one or two store queries followed by a pure pass of the
/// analytics engine.
#[derive(Clone)]
pub struct AnalyticsService {
    db: Arc<DbPool>,
}

impl AnalyticsService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    pub async fn department_costs(&self) -> DbResult<DepartmentCostsReport> {
        let rows = self.db.analytics().department_cost_rows().await?;
        Ok(analytics::department_costs(rows))
    }

    /// Most expensive active tools rated against the company cost per user.
    pub async fn expensive_tools(&self, limit: Option<i64>) -> DbResult<ExpensiveToolsReport> {
        let repo = self.db.analytics();
        let (total_cost, total_users) = repo.company_cost_totals().await?;
        let reference = analytics::company_reference_average(total_cost, total_users);
        let rows = repo
            .most_expensive_tools(analytics::clamp_limit(limit))
            .await?;
        Ok(analytics::expensive_tools(rows, reference))
    }

    pub async fn tools_by_category(&self) -> DbResult<ToolsByCategoryReport> {
        let rows = self.db.analytics().category_cost_rows().await?;
        Ok(analytics::tools_by_category(rows))
    }

    pub async fn low_usage_tools(&self, threshold: i32) -> DbResult<LowUsageReport> {
        let rows = self.db.analytics().low_usage_tools(threshold).await?;
        Ok(analytics::low_usage_tools(rows))
    }

    pub async fn vendor_summary(&self) -> DbResult<VendorSummaryReport> {
        let rows = self.db.analytics().vendor_rows().await?;
        Ok(analytics::vendor_summary(rows))
    }
}
