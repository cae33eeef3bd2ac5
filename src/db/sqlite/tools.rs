use async_trait::async_trait;
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use crate::{
    db::{
        error::{DbError, DbResult, map_tool_write_error},
        filter::{Dialect, SqlValue, tool_filter_sql},
        repos::ToolRepo,
    },
    models::{CreateTool, Department, Tool, ToolFilter, ToolStatus, UpdateTool},
};

const TOOL_COLUMNS: &str = r#"
    t.id, t.name, t.description, t.vendor, t.website_url, t.category_id,
    CAST(t.monthly_cost AS REAL) AS monthly_cost, t.active_users_count,
    t.owner_department, t.status, t.created_at, t.updated_at,
    c.name AS category
"#;

pub struct SqliteToolRepo {
    pool: SqlitePool,
}

impl SqliteToolRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn parse_tool(row: &SqliteRow) -> DbResult<Tool> {
        let department: Department = row
            .get::<String, _>("owner_department")
            .parse()
            .map_err(|e: String| DbError::Internal(e))?;
        let status: ToolStatus = row
            .get::<String, _>("status")
            .parse()
            .map_err(|e: String| DbError::Internal(e))?;

        Ok(Tool {
            id: row.get("id"),
            name: row.get("name"),
            description: row.get("description"),
            vendor: row.get("vendor"),
            website_url: row.get("website_url"),
            category_id: row.get("category_id"),
            monthly_cost: row.get("monthly_cost"),
            active_users_count: row.get("active_users_count"),
            owner_department: department,
            status,
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
            category: row.get("category"),
        })
    }
}

#[async_trait]
impl ToolRepo for SqliteToolRepo {
    async fn get_by_id(&self, id: i32) -> DbResult<Option<Tool>> {
        let query = format!(
            "SELECT {TOOL_COLUMNS} FROM tools t LEFT JOIN categories c ON t.category_id = c.id WHERE t.id = ?"
        );
        let row = sqlx::query(&query).bind(id).fetch_optional(&self.pool).await?;
        row.as_ref().map(Self::parse_tool).transpose()
    }

    async fn list(&self, filter: &ToolFilter) -> DbResult<(Vec<Tool>, i64)> {
        let sql = tool_filter_sql(filter, Dialect::Sqlite);

        let count_query = format!("SELECT COUNT(*) FROM tools t {}", sql.where_clause);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_query);
        for value in &sql.bindings {
            count_builder = match value {
                SqlValue::Text(s) => count_builder.bind(s.as_str()),
                SqlValue::Int(i) => count_builder.bind(*i),
            };
        }
        let total = count_builder.fetch_one(&self.pool).await?;

        let query = format!(
            r#"
            SELECT {TOOL_COLUMNS}
            FROM tools t
            LEFT JOIN categories c ON t.category_id = c.id
            {}
            ORDER BY t.id
            LIMIT ? OFFSET ?
            "#,
            sql.where_clause
        );
        let mut query_builder = sqlx::query(&query);
        for value in &sql.bindings {
            query_builder = match value {
                SqlValue::Text(s) => query_builder.bind(s.as_str()),
                SqlValue::Int(i) => query_builder.bind(*i),
            };
        }
        let rows = query_builder
            .bind(filter.limit)
            .bind(filter.skip)
            .fetch_all(&self.pool)
            .await?;

        let tools = rows
            .iter()
            .map(Self::parse_tool)
            .collect::<DbResult<Vec<_>>>()?;

        Ok((tools, total))
    }

    async fn create(&self, input: CreateTool) -> DbResult<Tool> {
        let now = chrono::Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO tools (
                name, description, vendor, website_url, category_id, monthly_cost,
                active_users_count, owner_department, status, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.vendor)
        .bind(&input.website_url)
        .bind(input.category_id)
        .bind(input.monthly_cost)
        .bind(input.active_users_count.unwrap_or(0))
        .bind(input.owner_department.as_str())
        .bind(input.status.unwrap_or_default().as_str())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(map_tool_write_error)?;

        let id = i32::try_from(result.last_insert_rowid())
            .map_err(|_| DbError::Internal("Tool id out of range".into()))?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::Internal(format!("Tool {} vanished after insert", id)))
    }

    async fn update(&self, id: i32, input: UpdateTool) -> DbResult<Tool> {
        if input.is_empty() {
            return self.get_by_id(id).await?.ok_or(DbError::NotFound);
        }

        let mut set_clauses = vec!["updated_at = ?"];
        if input.name.is_some() {
            set_clauses.push("name = ?");
        }
        if input.description.is_some() {
            set_clauses.push("description = ?");
        }
        if input.vendor.is_some() {
            set_clauses.push("vendor = ?");
        }
        if input.website_url.is_some() {
            set_clauses.push("website_url = ?");
        }
        if input.category_id.is_some() {
            set_clauses.push("category_id = ?");
        }
        if input.monthly_cost.is_some() {
            set_clauses.push("monthly_cost = ?");
        }
        if input.active_users_count.is_some() {
            set_clauses.push("active_users_count = ?");
        }
        if input.owner_department.is_some() {
            set_clauses.push("owner_department = ?");
        }
        if input.status.is_some() {
            set_clauses.push("status = ?");
        }

        let query = format!("UPDATE tools SET {} WHERE id = ?", set_clauses.join(", "));

        let mut query_builder = sqlx::query(&query).bind(chrono::Utc::now());
        if let Some(ref name) = input.name {
            query_builder = query_builder.bind(name);
        }
        if let Some(ref description) = input.description {
            query_builder = query_builder.bind(description);
        }
        if let Some(ref vendor) = input.vendor {
            query_builder = query_builder.bind(vendor);
        }
        if let Some(ref website_url) = input.website_url {
            query_builder = query_builder.bind(website_url);
        }
        if let Some(category_id) = input.category_id {
            query_builder = query_builder.bind(category_id);
        }
        if let Some(monthly_cost) = input.monthly_cost {
            query_builder = query_builder.bind(monthly_cost);
        }
        if let Some(users) = input.active_users_count {
            query_builder = query_builder.bind(users);
        }
        if let Some(department) = input.owner_department {
            query_builder = query_builder.bind(department.as_str());
        }
        if let Some(status) = input.status {
            query_builder = query_builder.bind(status.as_str());
        }

        let result = query_builder
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_tool_write_error)?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        self.get_by_id(id).await?.ok_or(DbError::NotFound)
    }

    async fn delete(&self, id: i32) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM tools WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        Ok(())
    }
}
