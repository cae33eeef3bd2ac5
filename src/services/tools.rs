use std::sync::Arc;

use crate::{
    db::{DbError, DbPool, DbResult},
    models::{CreateTool, ListToolsResponse, Tool, ToolFilter, UpdateTool},
};

/// Message returned when an update carries no field to change.
pub const NO_FIELDS_TO_UPDATE: &str = "No fields to update";

/// Service layer for tool inventory operations
#[derive(Clone)]
pub struct ToolService {
    db: Arc<DbPool>,
}

impl ToolService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Get a tool by ID, failing with `NotFound` when it does not exist
    pub async fn get(&self, id: i32) -> DbResult<Tool> {
        self.db.tools().get_by_id(id).await?.ok_or(DbError::NotFound)
    }

    /// List one page of tools together with the match count and an echo of
    /// the filters that were applied
    pub async fn list(&self, filter: ToolFilter) -> DbResult<ListToolsResponse> {
        let (data, total) = self.db.tools().list(&filter).await?;
        Ok(ListToolsResponse {
            filtered: data.len(),
            data,
            total,
            filters_applied: filter.applied(),
        })
    }

    pub async fn create(&self, input: CreateTool) -> DbResult<Tool> {
        self.db.tools().create(input).await
    }

    /// Apply a partial update. An update with no fields is rejected before
    /// the store is touched.
    pub async fn update(&self, id: i32, input: UpdateTool) -> DbResult<Tool> {
        if input.is_empty() {
            return Err(DbError::Validation(NO_FIELDS_TO_UPDATE.into()));
        }
        self.db.tools().update(id, input).await
    }

    pub async fn delete(&self, id: i32) -> DbResult<()> {
        self.db.tools().delete(id).await
    }
}
