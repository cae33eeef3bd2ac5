use serde::{Deserialize, Serialize};
#[cfg(feature = "utoipa")]
use utoipa::OpenApi;

#[cfg(feature = "utoipa")]
use crate::{
    models,
    routes::{analytics, health, tools},
};

#[cfg(feature = "utoipa")]
/// OpenAPI documentation for the tools inventory API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Toolkeeper API",
        version = "0.1.0",
        description = r#"**Toolkeeper** tracks the software subscriptions a company pays for and reports where the money goes.

## Overview

- **Tools** (`/api/tools`) - register, list, update and remove subscriptions. Listing supports filtering by status, category, vendor and name with offset pagination.
- **Analytics** (`/api/analytics/*`) - cost reports over active tools: spend per department and per category, the most expensive tools rated against the company cost per user, under-used tools with savings estimates, and a per-vendor summary.

## Errors

Every error uses the same body:

```json
{"error": {"type": "invalid_request_error", "message": "Tool with ID 42 does not exist", "param": null, "code": "not_found", "request_id": "..."}}
```
"#,
        license(name = "Apache-2.0 OR MIT")
    ),
    tags(
        (name = "health", description = "Liveness, readiness and database connectivity"),
        (name = "tools", description = "Tool inventory management"),
        (name = "analytics", description = "Cost reports over active tools"),
    ),
    paths(
        health::health_check,
        health::liveness,
        health::readiness,
        tools::list_tools,
        tools::get_tool,
        tools::create_tool,
        tools::update_tool,
        tools::delete_tool,
        analytics::department_costs,
        analytics::expensive_tools,
        analytics::tools_by_category,
        analytics::low_usage_tools,
        analytics::vendor_summary,
    ),
    components(schemas(
        // Tools
        models::Department,
        models::ToolStatus,
        models::Tool,
        models::CreateTool,
        models::UpdateTool,
        models::ListToolsResponse,
        // Analytics
        models::EfficiencyRating,
        models::WarningLevel,
        models::VendorEfficiency,
        models::DepartmentCost,
        models::DepartmentCostsSummary,
        models::DepartmentCostsReport,
        models::ExpensiveTool,
        models::ExpensiveToolsAnalysis,
        models::ExpensiveToolsReport,
        models::CategoryCost,
        models::CategoryInsights,
        models::ToolsByCategoryReport,
        models::LowUsageTool,
        models::SavingsAnalysis,
        models::LowUsageReport,
        models::VendorSummary,
        models::VendorInsights,
        models::VendorSummaryReport,
        // Error response
        ErrorResponse,
        ErrorInfo,
        // Health check types
        health::HealthStatus,
    ))
)]
pub struct ApiDoc;

/// Standard error response body
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Error information
    pub error: ErrorInfo,
}

/// Error information.
///
/// Format: `{"error": {"type": "...", "message": "...", "param": ..., "code": ...}}`
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct ErrorInfo {
    /// Error type classification (e.g., "invalid_request_error", "server_error")
    #[cfg_attr(feature = "utoipa", schema(example = "invalid_request_error"))]
    #[serde(rename = "type")]
    pub error_type: String,
    /// Human-readable error message
    #[cfg_attr(feature = "utoipa", schema(example = "Tool with ID 42 does not exist"))]
    pub message: String,
    /// Parameter that caused the error (null if not applicable)
    #[cfg_attr(feature = "utoipa", schema(example = json!(null)))]
    pub param: Option<String>,
    /// Machine-readable error code
    #[cfg_attr(feature = "utoipa", schema(example = "not_found"))]
    pub code: Option<String>,
    /// Request ID for correlating errors with logs, filled in by the
    /// request-id middleware.
    #[cfg_attr(
        feature = "utoipa",
        schema(example = "550e8400-e29b-41d4-a716-446655440000")
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    /// Create a new error response with the "invalid_request_error" type.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_type("invalid_request_error", code, message)
    }

    /// Create a new error response pointing at the offending request parameter.
    pub fn with_param(
        code: impl Into<String>,
        message: impl Into<String>,
        param: impl Into<String>,
    ) -> Self {
        let mut response = Self::new(code, message);
        response.error.param = Some(param.into());
        response
    }

    /// Create a new error response with an explicit error type
    /// (e.g. "server_error").
    pub fn with_type(
        error_type: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorInfo {
                error_type: error_type.into(),
                message: message.into(),
                param: None,
                code: Some(code.into()),
                request_id: None,
            },
        }
    }
}
