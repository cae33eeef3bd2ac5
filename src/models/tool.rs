use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validators::validate_not_blank;

/// Department owning a tool's budget line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub enum Department {
    Engineering,
    Sales,
    Marketing,
    #[serde(rename = "HR")]
    Hr,
    Finance,
    Operations,
    Design,
}

impl Department {
    pub const ALL: [Department; 7] = [
        Department::Engineering,
        Department::Sales,
        Department::Marketing,
        Department::Hr,
        Department::Finance,
        Department::Operations,
        Department::Design,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Engineering => "Engineering",
            Department::Sales => "Sales",
            Department::Marketing => "Marketing",
            Department::Hr => "HR",
            Department::Finance => "Finance",
            Department::Operations => "Operations",
            Department::Design => "Design",
        }
    }
}

impl std::str::FromStr for Department {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Department::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| format!("Invalid department: {}", s))
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subscription lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ToolStatus {
    #[default]
    Active,
    Deprecated,
    Trial,
}

impl ToolStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolStatus::Active => "active",
            ToolStatus::Deprecated => "deprecated",
            ToolStatus::Trial => "trial",
        }
    }
}

impl std::str::FromStr for ToolStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ToolStatus::Active),
            "deprecated" => Ok(ToolStatus::Deprecated),
            "trial" => Ok(ToolStatus::Trial),
            _ => Err(format!("Invalid tool status: {}", s)),
        }
    }
}

/// A tracked software subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct Tool {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub vendor: Option<String>,
    pub website_url: Option<String>,
    pub category_id: i32,
    /// Monthly subscription cost
    pub monthly_cost: f64,
    pub active_users_count: i32,
    pub owner_department: Department,
    pub status: ToolStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Name of the category, when the category row exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Largest value a `DECIMAL(10,2)` cost column can hold.
pub const MAX_MONTHLY_COST: f64 = 99_999_999.99;

/// Request to register a new tool
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct CreateTool {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub description: String,
    #[validate(length(min = 1, max = 100))]
    pub vendor: String,
    #[validate(url, length(max = 255))]
    pub website_url: Option<String>,
    #[validate(range(min = 1))]
    pub category_id: i32,
    #[validate(range(min = 0.0, max = MAX_MONTHLY_COST))]
    pub monthly_cost: f64,
    /// Defaults to 0
    #[validate(range(min = 0))]
    pub active_users_count: Option<i32>,
    pub owner_department: Department,
    /// Defaults to `active`
    pub status: Option<ToolStatus>,
}

/// Partial update of a tool. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct UpdateTool {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(length(max = 100))]
    pub vendor: Option<String>,
    #[validate(url, length(max = 255))]
    pub website_url: Option<String>,
    #[validate(range(min = 1))]
    pub category_id: Option<i32>,
    #[validate(range(min = 0.0, max = MAX_MONTHLY_COST))]
    pub monthly_cost: Option<f64>,
    #[validate(range(min = 0))]
    pub active_users_count: Option<i32>,
    pub owner_department: Option<Department>,
    pub status: Option<ToolStatus>,
}

impl UpdateTool {
    /// True when the request carries no field to change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.vendor.is_none()
            && self.website_url.is_none()
            && self.category_id.is_none()
            && self.monthly_cost.is_none()
            && self.active_users_count.is_none()
            && self.owner_department.is_none()
            && self.status.is_none()
    }
}

/// Query parameters for listing tools
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "utoipa", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "utoipa", into_params(parameter_in = Query))]
pub struct ListToolsQuery {
    /// Filter by status
    pub status: Option<ToolStatus>,
    /// Filter by category id
    pub category_id: Option<i32>,
    /// Case-insensitive substring match on the vendor
    pub vendor: Option<String>,
    /// Case-insensitive substring match on the tool name
    pub search: Option<String>,
    /// Page size (default 50)
    #[validate(range(min = 1, max = 500))]
    pub limit: Option<i64>,
    /// Rows to skip (default 0)
    #[validate(range(min = 0))]
    pub skip: Option<i64>,
}

impl ListToolsQuery {
    /// Empty strings count as absent filters.
    pub fn into_filter(self) -> ToolFilter {
        let non_empty = |s: Option<String>| s.filter(|v| !v.trim().is_empty());
        ToolFilter {
            status: self.status,
            category_id: self.category_id,
            vendor: non_empty(self.vendor),
            search: non_empty(self.search),
            limit: self.limit.unwrap_or(ToolFilter::DEFAULT_LIMIT),
            skip: self.skip.unwrap_or(0),
        }
    }
}

/// One typed condition of a tool listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolPredicate {
    Status(ToolStatus),
    CategoryId(i32),
    VendorContains(String),
    NameContains(String),
}

/// Filters and pagination for a tool listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolFilter {
    pub status: Option<ToolStatus>,
    pub category_id: Option<i32>,
    pub vendor: Option<String>,
    pub search: Option<String>,
    pub limit: i64,
    pub skip: i64,
}

impl Default for ToolFilter {
    fn default() -> Self {
        Self {
            status: None,
            category_id: None,
            vendor: None,
            search: None,
            limit: Self::DEFAULT_LIMIT,
            skip: 0,
        }
    }
}

impl ToolFilter {
    pub const DEFAULT_LIMIT: i64 = 50;

    /// Active predicates, always in the order status, category, vendor, name.
    pub fn predicates(&self) -> Vec<ToolPredicate> {
        let mut predicates = Vec::with_capacity(4);
        if let Some(status) = self.status {
            predicates.push(ToolPredicate::Status(status));
        }
        if let Some(category_id) = self.category_id {
            predicates.push(ToolPredicate::CategoryId(category_id));
        }
        if let Some(vendor) = &self.vendor {
            predicates.push(ToolPredicate::VendorContains(vendor.clone()));
        }
        if let Some(search) = &self.search {
            predicates.push(ToolPredicate::NameContains(search.clone()));
        }
        predicates
    }

    /// Echo of the active filters, keyed by query parameter name.
    pub fn applied(&self) -> serde_json::Map<String, serde_json::Value> {
        self.predicates()
            .into_iter()
            .map(|p| match p {
                ToolPredicate::Status(s) => ("status".to_string(), s.as_str().into()),
                ToolPredicate::CategoryId(id) => ("category_id".to_string(), id.into()),
                ToolPredicate::VendorContains(v) => ("vendor".to_string(), v.into()),
                ToolPredicate::NameContains(n) => ("search".to_string(), n.into()),
            })
            .collect()
    }
}

/// Page of tools returned by `GET /api/tools`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct ListToolsResponse {
    pub data: Vec<Tool>,
    /// Number of tools matching the filters
    pub total: i64,
    /// Number of tools in this page
    pub filtered: usize,
    #[cfg_attr(feature = "utoipa", schema(value_type = Object))]
    pub filters_applied: serde_json::Map<String, serde_json::Value>,
}
