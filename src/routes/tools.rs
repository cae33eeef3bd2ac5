use axum::{Json, extract::State, http::StatusCode};

use super::{
    error::ApiError,
    extract::{ToolId, ValidatedJson, ValidatedQuery},
    get_services,
};
use crate::{
    AppState,
    models::{CreateTool, ListToolsQuery, ListToolsResponse, Tool, UpdateTool},
};

/// List tools with optional filters
///
/// Filters combine with AND. `vendor` and `search` are case-insensitive
/// substring matches; empty values are ignored.
#[cfg_attr(feature = "utoipa", utoipa::path(
    get,
    path = "/api/tools",
    tag = "tools",
    operation_id = "tools_list",
    params(ListToolsQuery),
    responses(
        (status = 200, description = "One page of tools", body = ListToolsResponse),
        (status = 400, description = "Invalid query parameter", body = crate::openapi::ErrorResponse),
    )
))]
#[tracing::instrument(name = "tools.list", skip(state))]
pub async fn list_tools(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListToolsQuery>,
) -> Result<Json<ListToolsResponse>, ApiError> {
    let services = get_services(&state)?;
    let page = services.tools.list(query.into_filter()).await?;
    Ok(Json(page))
}

/// Get a tool by ID
#[cfg_attr(feature = "utoipa", utoipa::path(
    get,
    path = "/api/tools/{id}",
    tag = "tools",
    operation_id = "tools_get",
    params(("id" = i32, Path, description = "Tool ID")),
    responses(
        (status = 200, description = "Tool found", body = Tool),
        (status = 404, description = "Tool not found", body = crate::openapi::ErrorResponse),
    )
))]
#[tracing::instrument(name = "tools.get", skip(state))]
pub async fn get_tool(
    State(state): State<AppState>,
    ToolId(id): ToolId,
) -> Result<Json<Tool>, ApiError> {
    let services = get_services(&state)?;
    let tool = services.tools.get(id).await.map_err(ApiError::for_tool(id))?;
    Ok(Json(tool))
}

/// Register a new tool
#[cfg_attr(feature = "utoipa", utoipa::path(
    post,
    path = "/api/tools",
    tag = "tools",
    operation_id = "tools_create",
    request_body = CreateTool,
    responses(
        (status = 201, description = "Tool created", body = Tool),
        (status = 400, description = "Invalid body or unknown category", body = crate::openapi::ErrorResponse),
        (status = 409, description = "Conflict", body = crate::openapi::ErrorResponse),
    )
))]
#[tracing::instrument(name = "tools.create", skip(state, input), fields(name = %input.name))]
pub async fn create_tool(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateTool>,
) -> Result<(StatusCode, Json<Tool>), ApiError> {
    let services = get_services(&state)?;
    let tool = services.tools.create(input).await?;
    tracing::info!(tool_id = tool.id, "Tool created");
    Ok((StatusCode::CREATED, Json(tool)))
}

/// Update a tool
///
/// Only the fields present in the body are changed.
#[cfg_attr(feature = "utoipa", utoipa::path(
    put,
    path = "/api/tools/{id}",
    tag = "tools",
    operation_id = "tools_update",
    params(("id" = i32, Path, description = "Tool ID")),
    request_body = UpdateTool,
    responses(
        (status = 200, description = "Tool updated", body = Tool),
        (status = 400, description = "Invalid body, no fields, or unknown category", body = crate::openapi::ErrorResponse),
        (status = 404, description = "Tool not found", body = crate::openapi::ErrorResponse),
    )
))]
#[tracing::instrument(name = "tools.update", skip(state, input))]
pub async fn update_tool(
    State(state): State<AppState>,
    ToolId(id): ToolId,
    ValidatedJson(input): ValidatedJson<UpdateTool>,
) -> Result<Json<Tool>, ApiError> {
    let services = get_services(&state)?;
    let tool = services
        .tools
        .update(id, input)
        .await
        .map_err(ApiError::for_tool(id))?;
    Ok(Json(tool))
}

/// Delete a tool
#[cfg_attr(feature = "utoipa", utoipa::path(
    delete,
    path = "/api/tools/{id}",
    tag = "tools",
    operation_id = "tools_delete",
    params(("id" = i32, Path, description = "Tool ID")),
    responses(
        (status = 204, description = "Tool deleted"),
        (status = 404, description = "Tool not found", body = crate::openapi::ErrorResponse),
    )
))]
#[tracing::instrument(name = "tools.delete", skip(state))]
pub async fn delete_tool(
    State(state): State<AppState>,
    ToolId(id): ToolId,
) -> Result<StatusCode, ApiError> {
    let services = get_services(&state)?;
    services
        .tools
        .delete(id)
        .await
        .map_err(ApiError::for_tool(id))?;
    tracing::info!(tool_id = id, "Tool deleted");
    Ok(StatusCode::NO_CONTENT)
}
