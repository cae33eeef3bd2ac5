//! Row shapes read from the store and the report documents built from them.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Department;

// ─────────────────────────────────────────────────────────────────────────────
// Store rows
// ─────────────────────────────────────────────────────────────────────────────

/// One pre-aggregated group (department or category) of active tools.
#[derive(Debug, Clone, PartialEq)]
pub struct CostGroupRow {
    pub label: String,
    pub total_cost: f64,
    pub tools_count: i64,
    pub total_users: i64,
    /// Store-computed `AVG(monthly_cost)` for the group
    pub average_cost: f64,
}

/// One active tool with the fields the per-tool reports need.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolUsageRow {
    pub id: i32,
    pub name: String,
    pub monthly_cost: f64,
    pub active_users_count: i32,
    pub department: Department,
    pub vendor: Option<String>,
}

/// One vendor's active tools, aggregated.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorRow {
    pub vendor: String,
    pub tools_count: i64,
    pub total_monthly_cost: f64,
    pub total_users: i64,
    /// Owning departments, possibly repeated and unordered
    pub departments: Vec<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tiers
// ─────────────────────────────────────────────────────────────────────────────

/// Per-tool cost efficiency relative to the company-wide cost per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum EfficiencyRating {
    Low,
    Average,
    Good,
    Excellent,
}

/// Under-utilisation severity on absolute cost-per-user thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum WarningLevel {
    High,
    Medium,
    Low,
}

impl WarningLevel {
    /// Recommended follow-up for a tool at this level.
    pub fn potential_action(&self) -> &'static str {
        match self {
            WarningLevel::High => "Consider canceling or downgrading",
            WarningLevel::Medium => "Review usage and consider optimization",
            WarningLevel::Low => "Monitor usage trends",
        }
    }
}

/// Vendor cost efficiency on absolute average-cost-per-user thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum VendorEfficiency {
    Poor,
    Average,
    Good,
    Excellent,
}

// ─────────────────────────────────────────────────────────────────────────────
// Reports
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct DepartmentCost {
    pub department: String,
    pub total_cost: f64,
    pub tools_count: i64,
    pub total_users: i64,
    pub average_cost_per_tool: f64,
    /// Share of the summed totals in this report, in percent
    pub cost_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct DepartmentCostsSummary {
    pub total_company_cost: f64,
    pub departments_count: usize,
    /// Empty when no department has a positive total
    pub most_expensive_department: String,
}

/// Response of `GET /api/analytics/department-costs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct DepartmentCostsReport {
    pub data: Vec<DepartmentCost>,
    pub summary: DepartmentCostsSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct ExpensiveTool {
    pub id: i32,
    pub name: String,
    pub monthly_cost: f64,
    pub active_users_count: i32,
    pub cost_per_user: f64,
    pub department: Department,
    pub vendor: Option<String>,
    pub efficiency_rating: EfficiencyRating,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct ExpensiveToolsAnalysis {
    pub total_tools_analyzed: usize,
    pub avg_cost_per_user_company: f64,
    /// Sum of monthly costs of `low`-rated tools
    pub potential_savings_identified: f64,
}

/// Response of `GET /api/analytics/expensive-tools`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct ExpensiveToolsReport {
    pub data: Vec<ExpensiveTool>,
    pub analysis: ExpensiveToolsAnalysis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct CategoryCost {
    pub category_name: String,
    pub tools_count: i64,
    pub total_cost: f64,
    pub total_users: i64,
    pub percentage_of_budget: f64,
    pub average_cost_per_user: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct CategoryInsights {
    pub most_expensive_category: String,
    /// Lowest average cost per user among categories with users
    pub most_efficient_category: String,
}

/// Response of `GET /api/analytics/tools-by-category`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct ToolsByCategoryReport {
    pub data: Vec<CategoryCost>,
    pub insights: CategoryInsights,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct LowUsageTool {
    pub id: i32,
    pub name: String,
    pub monthly_cost: f64,
    pub active_users_count: i32,
    pub cost_per_user: f64,
    pub department: Department,
    pub vendor: Option<String>,
    pub warning_level: WarningLevel,
    pub potential_action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct SavingsAnalysis {
    pub total_underutilized_tools: usize,
    /// Monthly cost of `high` and `medium` tools
    pub potential_monthly_savings: f64,
    pub potential_annual_savings: f64,
}

/// Response of `GET /api/analytics/low-usage-tools`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct LowUsageReport {
    pub data: Vec<LowUsageTool>,
    pub savings_analysis: SavingsAnalysis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct VendorSummary {
    pub vendor: String,
    pub tools_count: i64,
    pub total_monthly_cost: f64,
    pub total_users: i64,
    /// Sorted, comma-separated owning departments
    pub departments: String,
    pub average_cost_per_user: f64,
    pub vendor_efficiency: VendorEfficiency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct VendorInsights {
    pub most_expensive_vendor: String,
    pub most_efficient_vendor: String,
    pub single_tool_vendors: usize,
}

/// Response of `GET /api/analytics/vendor-summary`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct VendorSummaryReport {
    pub data: Vec<VendorSummary>,
    pub vendor_insights: VendorInsights,
}

// ─────────────────────────────────────────────────────────────────────────────
// Query parameters
// ─────────────────────────────────────────────────────────────────────────────

/// Reporting period. Accepted on every analytics endpoint; reports are
/// computed over the current inventory regardless.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "utoipa", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "utoipa", into_params(parameter_in = Query))]
pub struct AnalyticsPeriod {
    #[validate(range(min = 2000, max = 2100))]
    pub year: Option<i32>,
    #[validate(range(min = 1, max = 12))]
    pub month: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "utoipa", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "utoipa", into_params(parameter_in = Query))]
pub struct ExpensiveToolsQuery {
    #[validate(range(min = 2000, max = 2100))]
    pub year: Option<i32>,
    #[validate(range(min = 1, max = 12))]
    pub month: Option<u32>,
    /// Number of tools to return (default 10, values above 50 are clamped)
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "utoipa", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "utoipa", into_params(parameter_in = Query))]
pub struct LowUsageQuery {
    #[validate(range(min = 2000, max = 2100))]
    pub year: Option<i32>,
    #[validate(range(min = 1, max = 12))]
    pub month: Option<u32>,
    /// Maximum active users for a tool to count as under-used (default 5)
    #[validate(range(min = 0))]
    pub threshold: Option<i32>,
}

impl LowUsageQuery {
    pub const DEFAULT_THRESHOLD: i32 = 5;

    pub fn threshold(&self) -> i32 {
        self.threshold.unwrap_or(Self::DEFAULT_THRESHOLD)
    }
}
