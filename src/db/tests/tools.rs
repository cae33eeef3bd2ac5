//! Shared tests for ToolRepo implementations

use crate::{
    db::{
        error::{DbError, UNKNOWN_CATEGORY},
        repos::ToolRepo,
    },
    models::{CreateTool, Department, ToolFilter, ToolStatus, UpdateTool},
};

// ============================================================================
// Test Input Helpers
// ============================================================================

fn create_tool_input(name: &str, vendor: &str, category_id: i32, cost: f64) -> CreateTool {
    CreateTool {
        name: name.to_string(),
        description: format!("{} subscription", name),
        vendor: vendor.to_string(),
        website_url: Some("https://example.com".to_string()),
        category_id,
        monthly_cost: cost,
        active_users_count: Some(10),
        owner_department: Department::Engineering,
        status: None,
    }
}

/// Test context for tool repository tests
pub struct ToolTestContext<'a> {
    pub tool_repo: &'a dyn ToolRepo,
}

impl<'a> ToolTestContext<'a> {
    /// Create a tool and return its ID
    pub async fn create_test_tool(&self, input: CreateTool) -> i32 {
        self.tool_repo
            .create(input)
            .await
            .expect("Failed to create test tool")
            .id
    }

    /// Seed a small mixed inventory used by the listing tests
    pub async fn seed_inventory(&self) {
        self.create_test_tool(create_tool_input("GitHub", "GitHub Inc", 1, 21.0))
            .await;
        self.create_test_tool(create_tool_input("Figma", "Figma", 2, 45.0))
            .await;
        self.create_test_tool(CreateTool {
            status: Some(ToolStatus::Trial),
            ..create_tool_input("GitLab", "GitLab Inc", 1, 29.0)
        })
        .await;
        self.create_test_tool(CreateTool {
            status: Some(ToolStatus::Deprecated),
            ..create_tool_input("Slack", "Salesforce", 3, 8.75)
        })
        .await;
    }
}

// ============================================================================
// Create / Get Tests
// ============================================================================

pub async fn test_create_tool(ctx: &ToolTestContext<'_>) {
    let tool = ctx
        .tool_repo
        .create(create_tool_input("Linear", "Linear", 1, 8.0))
        .await
        .expect("Failed to create tool");

    assert!(tool.id > 0);
    assert_eq!(tool.name, "Linear");
    assert_eq!(tool.description.as_deref(), Some("Linear subscription"));
    assert_eq!(tool.vendor.as_deref(), Some("Linear"));
    assert_eq!(tool.category_id, 1);
    assert_eq!(tool.category.as_deref(), Some("Development"));
    assert_eq!(tool.monthly_cost, 8.0);
    assert_eq!(tool.active_users_count, 10);
    assert_eq!(tool.owner_department, Department::Engineering);
    assert_eq!(tool.status, ToolStatus::Active);
}

pub async fn test_create_defaults_users_to_zero(ctx: &ToolTestContext<'_>) {
    let tool = ctx
        .tool_repo
        .create(CreateTool {
            active_users_count: None,
            website_url: None,
            ..create_tool_input("Notion", "Notion Labs", 3, 0.0)
        })
        .await
        .expect("Failed to create tool");

    assert_eq!(tool.active_users_count, 0);
    assert_eq!(tool.monthly_cost, 0.0);
    assert!(tool.website_url.is_none());
}

pub async fn test_create_unknown_category_fails(ctx: &ToolTestContext<'_>) {
    let result = ctx
        .tool_repo
        .create(create_tool_input("Orphan", "Nobody", 999, 5.0))
        .await;

    assert!(matches!(result, Err(DbError::Validation(msg)) if msg == UNKNOWN_CATEGORY));
}

pub async fn test_get_by_id(ctx: &ToolTestContext<'_>) {
    let id = ctx
        .create_test_tool(create_tool_input("Sentry", "Functional Software", 1, 26.0))
        .await;

    let tool = ctx
        .tool_repo
        .get_by_id(id)
        .await
        .expect("Query should succeed")
        .expect("Tool should exist");
    assert_eq!(tool.id, id);
    assert_eq!(tool.name, "Sentry");
}

pub async fn test_get_by_id_not_found(ctx: &ToolTestContext<'_>) {
    let result = ctx.tool_repo.get_by_id(424242).await.expect("Query should succeed");
    assert!(result.is_none());
}

// ============================================================================
// List Tests
// ============================================================================

pub async fn test_list_empty(ctx: &ToolTestContext<'_>) {
    let (tools, total) = ctx
        .tool_repo
        .list(&ToolFilter::default())
        .await
        .expect("Failed to list tools");
    assert!(tools.is_empty());
    assert_eq!(total, 0);
}

pub async fn test_list_orders_by_id(ctx: &ToolTestContext<'_>) {
    ctx.seed_inventory().await;

    let (tools, total) = ctx
        .tool_repo
        .list(&ToolFilter::default())
        .await
        .expect("Failed to list tools");
    assert_eq!(total, 4);
    let names: Vec<_> = tools.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["GitHub", "Figma", "GitLab", "Slack"]);
}

pub async fn test_list_filter_by_status(ctx: &ToolTestContext<'_>) {
    ctx.seed_inventory().await;

    let filter = ToolFilter {
        status: Some(ToolStatus::Trial),
        ..Default::default()
    };
    let (tools, total) = ctx.tool_repo.list(&filter).await.expect("Failed to list");
    assert_eq!(total, 1);
    assert_eq!(tools[0].name, "GitLab");
}

pub async fn test_list_filter_by_category(ctx: &ToolTestContext<'_>) {
    ctx.seed_inventory().await;

    let filter = ToolFilter {
        category_id: Some(1),
        ..Default::default()
    };
    let (tools, total) = ctx.tool_repo.list(&filter).await.expect("Failed to list");
    assert_eq!(total, 2);
    assert!(tools.iter().all(|t| t.category_id == 1));
}

pub async fn test_list_vendor_is_case_insensitive(ctx: &ToolTestContext<'_>) {
    ctx.seed_inventory().await;

    let filter = ToolFilter {
        vendor: Some("git".to_string()),
        ..Default::default()
    };
    let (tools, total) = ctx.tool_repo.list(&filter).await.expect("Failed to list");
    assert_eq!(total, 2);
    let names: Vec<_> = tools.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["GitHub", "GitLab"]);
}

pub async fn test_list_search_by_name(ctx: &ToolTestContext<'_>) {
    ctx.seed_inventory().await;

    let filter = ToolFilter {
        search: Some("FIG".to_string()),
        ..Default::default()
    };
    let (tools, total) = ctx.tool_repo.list(&filter).await.expect("Failed to list");
    assert_eq!(total, 1);
    assert_eq!(tools[0].name, "Figma");
}

pub async fn test_list_search_wildcards_are_literal(ctx: &ToolTestContext<'_>) {
    ctx.seed_inventory().await;

    let filter = ToolFilter {
        search: Some("%".to_string()),
        ..Default::default()
    };
    let (tools, total) = ctx.tool_repo.list(&filter).await.expect("Failed to list");
    assert_eq!(total, 0);
    assert!(tools.is_empty());
}

pub async fn test_list_combined_filters(ctx: &ToolTestContext<'_>) {
    ctx.seed_inventory().await;

    let filter = ToolFilter {
        status: Some(ToolStatus::Active),
        category_id: Some(1),
        vendor: Some("git".to_string()),
        ..Default::default()
    };
    let (tools, total) = ctx.tool_repo.list(&filter).await.expect("Failed to list");
    assert_eq!(total, 1);
    assert_eq!(tools[0].name, "GitHub");
}

pub async fn test_list_pagination_keeps_total(ctx: &ToolTestContext<'_>) {
    ctx.seed_inventory().await;

    let filter = ToolFilter {
        limit: 2,
        skip: 1,
        ..Default::default()
    };
    let (tools, total) = ctx.tool_repo.list(&filter).await.expect("Failed to list");
    assert_eq!(total, 4);
    let names: Vec<_> = tools.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Figma", "GitLab"]);
}

// ============================================================================
// Update Tests
// ============================================================================

pub async fn test_update_partial(ctx: &ToolTestContext<'_>) {
    let id = ctx
        .create_test_tool(create_tool_input("Jira", "Atlassian", 1, 7.5))
        .await;

    let updated = ctx
        .tool_repo
        .update(
            id,
            UpdateTool {
                monthly_cost: Some(9.25),
                status: Some(ToolStatus::Deprecated),
                owner_department: Some(Department::Hr),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to update tool");

    assert_eq!(updated.monthly_cost, 9.25);
    assert_eq!(updated.status, ToolStatus::Deprecated);
    assert_eq!(updated.owner_department, Department::Hr);
    assert_eq!(updated.name, "Jira");
    assert_eq!(updated.vendor.as_deref(), Some("Atlassian"));
    assert!(updated.updated_at >= updated.created_at);
}

pub async fn test_update_category(ctx: &ToolTestContext<'_>) {
    let id = ctx
        .create_test_tool(create_tool_input("Miro", "Miro", 1, 10.0))
        .await;

    let updated = ctx
        .tool_repo
        .update(
            id,
            UpdateTool {
                category_id: Some(2),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to update tool");
    assert_eq!(updated.category_id, 2);
    assert_eq!(updated.category.as_deref(), Some("Design"));
}

pub async fn test_update_unknown_category_fails(ctx: &ToolTestContext<'_>) {
    let id = ctx
        .create_test_tool(create_tool_input("Zoom", "Zoom", 3, 14.99))
        .await;

    let result = ctx
        .tool_repo
        .update(
            id,
            UpdateTool {
                category_id: Some(999),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(DbError::Validation(msg)) if msg == UNKNOWN_CATEGORY));
}

pub async fn test_update_not_found(ctx: &ToolTestContext<'_>) {
    let result = ctx
        .tool_repo
        .update(
            424242,
            UpdateTool {
                name: Some("Ghost".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(DbError::NotFound)));
}

// ============================================================================
// Delete Tests
// ============================================================================

pub async fn test_delete(ctx: &ToolTestContext<'_>) {
    let id = ctx
        .create_test_tool(create_tool_input("Loom", "Atlassian", 3, 12.5))
        .await;

    ctx.tool_repo.delete(id).await.expect("Failed to delete tool");

    let result = ctx.tool_repo.get_by_id(id).await.expect("Query should succeed");
    assert!(result.is_none());
}

pub async fn test_delete_not_found(ctx: &ToolTestContext<'_>) {
    let result = ctx.tool_repo.delete(424242).await;
    assert!(matches!(result, Err(DbError::NotFound)));
}

pub async fn test_delete_twice_fails(ctx: &ToolTestContext<'_>) {
    let id = ctx
        .create_test_tool(create_tool_input("Asana", "Asana", 3, 10.99))
        .await;

    ctx.tool_repo.delete(id).await.expect("First delete should succeed");
    let result = ctx.tool_repo.delete(id).await;
    assert!(matches!(result, Err(DbError::NotFound)));
}

// ============================================================================
// SQLite Tests
// ============================================================================

#[cfg(all(test, feature = "database-sqlite"))]
mod sqlite_tests {
    use super::*;
    use crate::db::{
        sqlite::SqliteToolRepo,
        tests::harness::{create_sqlite_pool, create_sqlite_schema},
    };

    macro_rules! sqlite_test {
        ($name:ident) => {
            #[tokio::test]
            async fn $name() {
                let pool = create_sqlite_pool().await;
                create_sqlite_schema(&pool).await;
                let tool_repo = SqliteToolRepo::new(pool);
                let ctx = ToolTestContext {
                    tool_repo: &tool_repo,
                };
                super::$name(&ctx).await;
            }
        };
    }

    sqlite_test!(test_create_tool);
    sqlite_test!(test_create_defaults_users_to_zero);
    sqlite_test!(test_create_unknown_category_fails);
    sqlite_test!(test_get_by_id);
    sqlite_test!(test_get_by_id_not_found);
    sqlite_test!(test_list_empty);
    sqlite_test!(test_list_orders_by_id);
    sqlite_test!(test_list_filter_by_status);
    sqlite_test!(test_list_filter_by_category);
    sqlite_test!(test_list_vendor_is_case_insensitive);
    sqlite_test!(test_list_search_by_name);
    sqlite_test!(test_list_search_wildcards_are_literal);
    sqlite_test!(test_list_combined_filters);
    sqlite_test!(test_list_pagination_keeps_total);
    sqlite_test!(test_update_partial);
    sqlite_test!(test_update_category);
    sqlite_test!(test_update_unknown_category_fails);
    sqlite_test!(test_update_not_found);
    sqlite_test!(test_delete);
    sqlite_test!(test_delete_not_found);
    sqlite_test!(test_delete_twice_fails);
}

// ============================================================================
// PostgreSQL Tests - Require Docker, run with `cargo test -- --ignored`
// ============================================================================

#[cfg(all(test, feature = "database-postgres"))]
mod postgres_tests {
    use super::*;
    use crate::db::{
        postgres::PostgresToolRepo,
        tests::harness::postgres::{create_isolated_postgres_pool, create_postgres_schema},
    };

    macro_rules! postgres_test {
        ($name:ident) => {
            #[tokio::test]
            #[ignore = "Requires Docker - run with `cargo test -- --ignored`"]
            async fn $name() {
                let pool = create_isolated_postgres_pool().await;
                create_postgres_schema(&pool).await;
                let tool_repo = PostgresToolRepo::new(pool, None);
                let ctx = ToolTestContext {
                    tool_repo: &tool_repo,
                };
                super::$name(&ctx).await;
            }
        };
    }

    postgres_test!(test_create_tool);
    postgres_test!(test_create_defaults_users_to_zero);
    postgres_test!(test_create_unknown_category_fails);
    postgres_test!(test_get_by_id);
    postgres_test!(test_get_by_id_not_found);
    postgres_test!(test_list_empty);
    postgres_test!(test_list_orders_by_id);
    postgres_test!(test_list_filter_by_status);
    postgres_test!(test_list_filter_by_category);
    postgres_test!(test_list_vendor_is_case_insensitive);
    postgres_test!(test_list_search_by_name);
    postgres_test!(test_list_search_wildcards_are_literal);
    postgres_test!(test_list_combined_filters);
    postgres_test!(test_list_pagination_keeps_total);
    postgres_test!(test_update_partial);
    postgres_test!(test_update_category);
    postgres_test!(test_update_unknown_category_fails);
    postgres_test!(test_update_not_found);
    postgres_test!(test_delete);
    postgres_test!(test_delete_not_found);
    postgres_test!(test_delete_twice_fails);
}
