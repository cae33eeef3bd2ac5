use async_trait::async_trait;

use crate::{
    db::error::DbResult,
    models::{CreateTool, Tool, ToolFilter, UpdateTool},
};

#[async_trait]
pub trait ToolRepo: Send + Sync {
    /// Get a tool by its ID, with its category name.
    async fn get_by_id(&self, id: i32) -> DbResult<Option<Tool>>;

    /// List one page of tools matching the filter, ordered by ID.
    ///
    /// Returns the page and the number of tools matching the filter overall.
    async fn list(&self, filter: &ToolFilter) -> DbResult<(Vec<Tool>, i64)>;

    /// Insert a tool. A missing category yields `DbError::Validation`.
    async fn create(&self, input: CreateTool) -> DbResult<Tool>;

    /// Apply the present fields, bump `updated_at` and return the refreshed tool.
    async fn update(&self, id: i32, input: UpdateTool) -> DbResult<Tool>;

    /// Delete a tool.
    async fn delete(&self, id: i32) -> DbResult<()>;
}
