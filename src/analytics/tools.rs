//! Per-tool reports: most expensive tools and under-used tools.

use super::{cost_per_user, round2};
use crate::models::{
    EfficiencyRating, ExpensiveTool, ExpensiveToolsAnalysis, ExpensiveToolsReport, LowUsageReport,
    LowUsageTool, SavingsAnalysis, ToolUsageRow, WarningLevel,
};

pub const DEFAULT_EXPENSIVE_LIMIT: i64 = 10;
pub const MAX_EXPENSIVE_LIMIT: i64 = 50;

/// Resolve the caller's `limit`: default 10, silently kept within 1..=50.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_EXPENSIVE_LIMIT)
        .clamp(1, MAX_EXPENSIVE_LIMIT)
}

/// Company-wide cost per user from the sums over tools that have users.
pub fn company_reference_average(total_cost: f64, total_users: i64) -> f64 {
    if total_users > 0 {
        total_cost / total_users as f64
    } else {
        0.0
    }
}

/// Rate each tool against `reference` and total the cost of `low` tools.
///
/// Rows are expected sorted by monthly cost descending and already limited.
pub fn expensive_tools(rows: Vec<ToolUsageRow>, reference: f64) -> ExpensiveToolsReport {
    let mut potential_savings = 0.0;

    let data: Vec<ExpensiveTool> = rows
        .into_iter()
        .map(|row| {
            let users = i64::from(row.active_users_count);
            let cpu = round2(cost_per_user(row.monthly_cost, users));
            let rating = EfficiencyRating::classify(cpu, users, reference);
            if rating == EfficiencyRating::Low {
                potential_savings += row.monthly_cost;
            }
            ExpensiveTool {
                id: row.id,
                name: row.name,
                monthly_cost: row.monthly_cost,
                active_users_count: row.active_users_count,
                cost_per_user: cpu,
                department: row.department,
                vendor: row.vendor,
                efficiency_rating: rating,
            }
        })
        .collect();

    ExpensiveToolsReport {
        analysis: ExpensiveToolsAnalysis {
            total_tools_analyzed: data.len(),
            avg_cost_per_user_company: round2(reference),
            potential_savings_identified: round2(potential_savings),
        },
        data,
    }
}

/// Flag under-used tools on absolute cost-per-user thresholds.
///
/// Rows are expected filtered to the user threshold and sorted by users
/// ascending, then cost descending. Savings count `high` and `medium` tools.
pub fn low_usage_tools(rows: Vec<ToolUsageRow>) -> LowUsageReport {
    let mut monthly_savings = 0.0;

    let data: Vec<LowUsageTool> = rows
        .into_iter()
        .map(|row| {
            let users = i64::from(row.active_users_count);
            let cpu = round2(cost_per_user(row.monthly_cost, users));
            let level = WarningLevel::classify(cpu, users);
            if level.counts_as_savings() {
                monthly_savings += row.monthly_cost;
            }
            LowUsageTool {
                id: row.id,
                name: row.name,
                monthly_cost: row.monthly_cost,
                active_users_count: row.active_users_count,
                cost_per_user: cpu,
                department: row.department,
                vendor: row.vendor,
                warning_level: level,
                potential_action: level.potential_action().to_string(),
            }
        })
        .collect();

    LowUsageReport {
        savings_analysis: SavingsAnalysis {
            total_underutilized_tools: data.len(),
            potential_monthly_savings: round2(monthly_savings),
            potential_annual_savings: round2(monthly_savings * 12.0),
        },
        data,
    }
}
