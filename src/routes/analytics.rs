//! Cost report endpoints.
//!
//! Every report accepts `year` and `month`; they are validated but the
//! reports always cover the current inventory of active tools.

use axum::{Json, extract::State};

use super::{error::ApiError, extract::ValidatedQuery, get_services};
use crate::{
    AppState,
    models::{
        AnalyticsPeriod, DepartmentCostsReport, ExpensiveToolsQuery, ExpensiveToolsReport,
        LowUsageQuery, LowUsageReport, ToolsByCategoryReport, VendorSummaryReport,
    },
};

/// Monthly spend per owning department
#[cfg_attr(feature = "utoipa", utoipa::path(
    get,
    path = "/api/analytics/department-costs",
    tag = "analytics",
    operation_id = "analytics_department_costs",
    params(AnalyticsPeriod),
    responses(
        (status = 200, description = "Spend per department", body = DepartmentCostsReport),
        (status = 400, description = "Invalid period", body = crate::openapi::ErrorResponse),
    )
))]
#[tracing::instrument(name = "analytics.department_costs", skip(state, _period))]
pub async fn department_costs(
    State(state): State<AppState>,
    ValidatedQuery(_period): ValidatedQuery<AnalyticsPeriod>,
) -> Result<Json<DepartmentCostsReport>, ApiError> {
    let report = get_services(&state)?.analytics.department_costs().await?;
    Ok(Json(report))
}

/// Most expensive tools rated against the company cost per user
#[cfg_attr(feature = "utoipa", utoipa::path(
    get,
    path = "/api/analytics/expensive-tools",
    tag = "analytics",
    operation_id = "analytics_expensive_tools",
    params(ExpensiveToolsQuery),
    responses(
        (status = 200, description = "Most expensive tools", body = ExpensiveToolsReport),
        (status = 400, description = "Invalid query parameter", body = crate::openapi::ErrorResponse),
    )
))]
#[tracing::instrument(name = "analytics.expensive_tools", skip(state), fields(limit = ?query.limit))]
pub async fn expensive_tools(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ExpensiveToolsQuery>,
) -> Result<Json<ExpensiveToolsReport>, ApiError> {
    let report = get_services(&state)?
        .analytics
        .expensive_tools(query.limit)
        .await?;
    Ok(Json(report))
}

/// Monthly spend per category
#[cfg_attr(feature = "utoipa", utoipa::path(
    get,
    path = "/api/analytics/tools-by-category",
    tag = "analytics",
    operation_id = "analytics_tools_by_category",
    params(AnalyticsPeriod),
    responses(
        (status = 200, description = "Spend per category", body = ToolsByCategoryReport),
        (status = 400, description = "Invalid period", body = crate::openapi::ErrorResponse),
    )
))]
#[tracing::instrument(name = "analytics.tools_by_category", skip(state, _period))]
pub async fn tools_by_category(
    State(state): State<AppState>,
    ValidatedQuery(_period): ValidatedQuery<AnalyticsPeriod>,
) -> Result<Json<ToolsByCategoryReport>, ApiError> {
    let report = get_services(&state)?.analytics.tools_by_category().await?;
    Ok(Json(report))
}

/// Under-used tools with savings estimates
#[cfg_attr(feature = "utoipa", utoipa::path(
    get,
    path = "/api/analytics/low-usage-tools",
    tag = "analytics",
    operation_id = "analytics_low_usage_tools",
    params(LowUsageQuery),
    responses(
        (status = 200, description = "Under-used tools", body = LowUsageReport),
        (status = 400, description = "Invalid query parameter", body = crate::openapi::ErrorResponse),
    )
))]
#[tracing::instrument(name = "analytics.low_usage_tools", skip(state), fields(threshold = query.threshold()))]
pub async fn low_usage_tools(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<LowUsageQuery>,
) -> Result<Json<LowUsageReport>, ApiError> {
    let report = get_services(&state)?
        .analytics
        .low_usage_tools(query.threshold())
        .await?;
    Ok(Json(report))
}

/// Spend and efficiency per vendor
#[cfg_attr(feature = "utoipa", utoipa::path(
    get,
    path = "/api/analytics/vendor-summary",
    tag = "analytics",
    operation_id = "analytics_vendor_summary",
    params(AnalyticsPeriod),
    responses(
        (status = 200, description = "Spend per vendor", body = VendorSummaryReport),
        (status = 400, description = "Invalid period", body = crate::openapi::ErrorResponse),
    )
))]
#[tracing::instrument(name = "analytics.vendor_summary", skip(state, _period))]
pub async fn vendor_summary(
    State(state): State<AppState>,
    ValidatedQuery(_period): ValidatedQuery<AnalyticsPeriod>,
) -> Result<Json<VendorSummaryReport>, ApiError> {
    let report = get_services(&state)?.analytics.vendor_summary().await?;
    Ok(Json(report))
}

#[cfg(all(test, feature = "database-sqlite"))]
mod tests {
    use http::StatusCode;
    use serde_json::{Value, json};

    use crate::routes::test_support::{get_json, send_json, test_app};

    fn tool(name: &str, vendor: &str, category: i32, cost: f64, users: i32, dept: &str) -> Value {
        json!({
            "name": name,
            "description": format!("{} subscription", name),
            "vendor": vendor,
            "category_id": category,
            "monthly_cost": cost,
            "active_users_count": users,
            "owner_department": dept
        })
    }

    /// Active: GitHub 100/10, Figma 60/3, Jira 40/0, Confluence 20/5.
    /// Deprecated: Retired 500/1.
    async fn seeded_app() -> axum::Router {
        let app = test_app().await;
        for input in [
            tool("GitHub", "GitHub Inc", 1, 100.0, 10, "Engineering"),
            tool("Figma", "Figma", 2, 60.0, 3, "Design"),
            tool("Jira", "Atlassian", 1, 40.0, 0, "Engineering"),
            tool("Confluence", "Atlassian", 3, 20.0, 5, "Marketing"),
        ] {
            let (status, _) = send_json(&app, "POST", "/api/tools", input).await;
            assert_eq!(status, StatusCode::CREATED);
        }
        let mut retired = tool("Retired", "Atlassian", 3, 500.0, 1, "Sales");
        retired["status"] = json!("deprecated");
        send_json(&app, "POST", "/api/tools", retired).await;
        app
    }

    #[tokio::test]
    async fn test_department_costs() {
        let app = seeded_app().await;

        let (status, body) = get_json(&app, "/api/analytics/department-costs").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["department"], "Engineering");
        assert_eq!(body["data"][0]["total_cost"], 140.0);
        assert_eq!(body["data"][0]["cost_percentage"], 63.6);
        assert_eq!(body["summary"]["total_company_cost"], 220.0);
        assert_eq!(body["summary"]["departments_count"], 3);
        assert_eq!(body["summary"]["most_expensive_department"], "Engineering");
    }

    #[tokio::test]
    async fn test_expensive_tools() {
        let app = seeded_app().await;

        let (status, body) = get_json(&app, "/api/analytics/expensive-tools?limit=3").await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<_> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["GitHub", "Figma", "Jira"]);

        // Reference is 180 / 18 = 10 per user.
        assert_eq!(body["analysis"]["avg_cost_per_user_company"], 10.0);
        assert_eq!(body["data"][0]["efficiency_rating"], "average");
        assert_eq!(body["data"][1]["efficiency_rating"], "low");
        assert_eq!(body["data"][2]["efficiency_rating"], "low");
        assert_eq!(body["analysis"]["potential_savings_identified"], 100.0);
        assert_eq!(body["analysis"]["total_tools_analyzed"], 3);
    }

    #[tokio::test]
    async fn test_expensive_tools_limit_is_clamped() {
        let app = seeded_app().await;

        let (status, body) = get_json(&app, "/api/analytics/expensive-tools?limit=500").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 4);

        let (status, body) = get_json(&app, "/api/analytics/expensive-tools?limit=0").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_tools_by_category() {
        let app = seeded_app().await;

        let (status, body) = get_json(&app, "/api/analytics/tools-by-category").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["category_name"], "Development");
        assert_eq!(body["insights"]["most_expensive_category"], "Development");
        // Communication: 20 / 5 = 4 per user, the cheapest.
        assert_eq!(body["insights"]["most_efficient_category"], "Communication");
    }

    #[tokio::test]
    async fn test_low_usage_tools() {
        let app = seeded_app().await;

        let (status, body) = get_json(&app, "/api/analytics/low-usage-tools?threshold=3").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["name"], "Jira");
        assert_eq!(body["data"][0]["warning_level"], "high");
        assert_eq!(body["data"][1]["name"], "Figma");
        assert_eq!(body["data"][1]["warning_level"], "medium");
        assert_eq!(body["savings_analysis"]["total_underutilized_tools"], 2);
        assert_eq!(body["savings_analysis"]["potential_monthly_savings"], 100.0);
        assert_eq!(body["savings_analysis"]["potential_annual_savings"], 1200.0);
    }

    #[tokio::test]
    async fn test_vendor_summary() {
        let app = seeded_app().await;

        let (status, body) = get_json(&app, "/api/analytics/vendor-summary").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][1]["vendor"], "Atlassian");
        assert_eq!(body["data"][1]["departments"], "Engineering,Marketing");
        assert_eq!(body["vendor_insights"]["single_tool_vendors"], 2);
    }

    #[tokio::test]
    async fn test_period_is_validated() {
        let app = seeded_app().await;

        let (status, _) = get_json(&app, "/api/analytics/vendor-summary?month=13").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = get_json(&app, "/api/analytics/department-costs?year=2024&month=6").await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = get_json(&app, "/api/analytics/low-usage-tools?threshold=-1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_empty_inventory_reports() {
        let app = test_app().await;

        let (status, body) = get_json(&app, "/api/analytics/department-costs").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!([]));
        assert_eq!(body["summary"]["total_company_cost"], 0.0);
        assert_eq!(body["summary"]["most_expensive_department"], "");
    }
}
