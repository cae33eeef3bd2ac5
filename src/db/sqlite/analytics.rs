use async_trait::async_trait;
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use crate::{
    db::{
        error::{DbError, DbResult},
        repos::AnalyticsRepo,
    },
    models::{CostGroupRow, Department, ToolUsageRow, VendorRow},
};

pub struct SqliteAnalyticsRepo {
    pool: SqlitePool,
}

impl SqliteAnalyticsRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn parse_group(row: &SqliteRow) -> CostGroupRow {
        CostGroupRow {
            label: row.get("label"),
            total_cost: row.get("total_cost"),
            tools_count: row.get("tools_count"),
            total_users: row.get("total_users"),
            average_cost: row.get("average_cost"),
        }
    }

    fn parse_usage(row: &SqliteRow) -> DbResult<ToolUsageRow> {
        let department: Department = row
            .get::<String, _>("owner_department")
            .parse()
            .map_err(|e: String| DbError::Internal(e))?;

        Ok(ToolUsageRow {
            id: row.get("id"),
            name: row.get("name"),
            monthly_cost: row.get("monthly_cost"),
            active_users_count: row.get("active_users_count"),
            department,
            vendor: row.get("vendor"),
        })
    }
}

#[async_trait]
impl AnalyticsRepo for SqliteAnalyticsRepo {
    async fn department_cost_rows(&self) -> DbResult<Vec<CostGroupRow>> {
        let rows = sqlx::query(
            r#"
            SELECT
                owner_department AS label,
                CAST(COALESCE(SUM(monthly_cost), 0) AS REAL) AS total_cost,
                COUNT(*) AS tools_count,
                COALESCE(SUM(active_users_count), 0) AS total_users,
                CAST(COALESCE(AVG(monthly_cost), 0) AS REAL) AS average_cost
            FROM tools
            WHERE status = 'active'
            GROUP BY owner_department
            ORDER BY total_cost DESC, label ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::parse_group).collect())
    }

    async fn company_cost_totals(&self) -> DbResult<(f64, i64)> {
        let row = sqlx::query(
            r#"
            SELECT
                CAST(COALESCE(SUM(monthly_cost), 0) AS REAL) AS total_cost,
                COALESCE(SUM(active_users_count), 0) AS total_users
            FROM tools
            WHERE status = 'active' AND active_users_count > 0
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok((row.get("total_cost"), row.get("total_users")))
    }

    async fn most_expensive_tools(&self, limit: i64) -> DbResult<Vec<ToolUsageRow>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, CAST(monthly_cost AS REAL) AS monthly_cost, active_users_count,
                   owner_department, vendor
            FROM tools
            WHERE status = 'active'
            ORDER BY monthly_cost DESC, id ASC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::parse_usage).collect()
    }

    async fn category_cost_rows(&self) -> DbResult<Vec<CostGroupRow>> {
        let rows = sqlx::query(
            r#"
            SELECT
                COALESCE(c.name, 'Uncategorized') AS label,
                CAST(COALESCE(SUM(t.monthly_cost), 0) AS REAL) AS total_cost,
                COUNT(t.id) AS tools_count,
                COALESCE(SUM(t.active_users_count), 0) AS total_users,
                CAST(COALESCE(AVG(t.monthly_cost), 0) AS REAL) AS average_cost
            FROM tools t
            LEFT JOIN categories c ON t.category_id = c.id
            WHERE t.status = 'active'
            GROUP BY c.name
            ORDER BY total_cost DESC, label ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::parse_group).collect())
    }

    async fn low_usage_tools(&self, threshold: i32) -> DbResult<Vec<ToolUsageRow>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, CAST(monthly_cost AS REAL) AS monthly_cost, active_users_count,
                   owner_department, vendor
            FROM tools
            WHERE status = 'active' AND active_users_count <= ?
            ORDER BY active_users_count ASC, monthly_cost DESC, id ASC
            "#,
        )
        .bind(threshold)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::parse_usage).collect()
    }

    async fn vendor_rows(&self) -> DbResult<Vec<VendorRow>> {
        let rows = sqlx::query(
            r#"
            SELECT
                COALESCE(vendor, 'Unknown') AS vendor_name,
                COUNT(*) AS tools_count,
                CAST(COALESCE(SUM(monthly_cost), 0) AS REAL) AS total_monthly_cost,
                COALESCE(SUM(active_users_count), 0) AS total_users,
                GROUP_CONCAT(DISTINCT owner_department) AS departments
            FROM tools
            WHERE status = 'active'
            GROUP BY vendor_name
            ORDER BY total_monthly_cost DESC, vendor_name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| {
                let departments: Option<String> = row.get("departments");
                VendorRow {
                    vendor: row.get("vendor_name"),
                    tools_count: row.get("tools_count"),
                    total_monthly_cost: row.get("total_monthly_cost"),
                    total_users: row.get("total_users"),
                    departments: departments
                        .map(|d| d.split(',').map(str::to_string).collect())
                        .unwrap_or_default(),
                }
            })
            .collect())
    }
}
