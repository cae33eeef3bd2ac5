//! Department and category cost breakdowns.

use super::{Extremum, round2, share_of};
use crate::models::{
    CategoryCost, CategoryInsights, CostGroupRow, DepartmentCost, DepartmentCostsReport,
    DepartmentCostsSummary, ToolsByCategoryReport,
};

/// Per-department totals with each department's share of the summed cost.
///
/// Rows are expected sorted by total cost descending.
pub fn department_costs(rows: Vec<CostGroupRow>) -> DepartmentCostsReport {
    let total: f64 = rows.iter().map(|r| r.total_cost).sum();
    let departments_count = rows.len();

    let most_expensive = rows
        .iter()
        .fold(Extremum::above_zero(), |acc, r| {
            acc.consider_max(&r.label, r.total_cost)
        })
        .into_label();

    let data = rows
        .into_iter()
        .map(|row| DepartmentCost {
            cost_percentage: share_of(row.total_cost, total),
            total_cost: round2(row.total_cost),
            average_cost_per_tool: round2(row.average_cost),
            tools_count: row.tools_count,
            total_users: row.total_users,
            department: row.label,
        })
        .collect();

    DepartmentCostsReport {
        data,
        summary: DepartmentCostsSummary {
            total_company_cost: round2(total),
            departments_count,
            most_expensive_department: most_expensive,
        },
    }
}

/// Per-category totals, budget shares and average cost per user.
///
/// The most efficient category is the one with the lowest average cost per
/// user; categories without users are not candidates.
pub fn tools_by_category(rows: Vec<CostGroupRow>) -> ToolsByCategoryReport {
    let total: f64 = rows.iter().map(|r| r.total_cost).sum();

    let data: Vec<CategoryCost> = rows
        .into_iter()
        .map(|row| CategoryCost {
            percentage_of_budget: share_of(row.total_cost, total),
            average_cost_per_user: if row.total_users > 0 {
                round2(row.total_cost / row.total_users as f64)
            } else {
                0.0
            },
            total_cost: round2(row.total_cost),
            tools_count: row.tools_count,
            total_users: row.total_users,
            category_name: row.label,
        })
        .collect();

    let (most_expensive, most_efficient) = data.iter().fold(
        (Extremum::above_zero(), Extremum::unbounded_min()),
        |(expensive, efficient), c| {
            let efficient = if c.total_users > 0 {
                efficient.consider_min(&c.category_name, c.average_cost_per_user)
            } else {
                efficient
            };
            (expensive.consider_max(&c.category_name, c.total_cost), efficient)
        },
    );

    ToolsByCategoryReport {
        data,
        insights: CategoryInsights {
            most_expensive_category: most_expensive.into_label(),
            most_efficient_category: most_efficient.into_label(),
        },
    }
}
