//! Vendor rollup.

use super::{Extremum, round2};
use crate::models::{VendorEfficiency, VendorInsights, VendorRow, VendorSummary, VendorSummaryReport};

/// Deduplicate, sort byte-wise and comma-join department names.
pub fn merge_departments(mut departments: Vec<String>) -> String {
    departments.sort_unstable();
    departments.dedup();
    departments.join(",")
}

/// Per-vendor totals, department lists and efficiency, plus vendor-level extrema.
pub fn vendor_summary(rows: Vec<VendorRow>) -> VendorSummaryReport {
    let data: Vec<VendorSummary> = rows
        .into_iter()
        .map(|row| {
            let average = if row.total_users > 0 {
                round2(row.total_monthly_cost / row.total_users as f64)
            } else {
                0.0
            };
            VendorSummary {
                vendor_efficiency: VendorEfficiency::classify(average, row.total_users),
                average_cost_per_user: average,
                departments: merge_departments(row.departments),
                total_monthly_cost: round2(row.total_monthly_cost),
                tools_count: row.tools_count,
                total_users: row.total_users,
                vendor: row.vendor,
            }
        })
        .collect();

    let (most_expensive, most_efficient) = data.iter().fold(
        (Extremum::above_zero(), Extremum::unbounded_min()),
        |(expensive, efficient), v| {
            let efficient = if v.total_users > 0 {
                efficient.consider_min(&v.vendor, v.average_cost_per_user)
            } else {
                efficient
            };
            (expensive.consider_max(&v.vendor, v.total_monthly_cost), efficient)
        },
    );
    let single_tool_vendors = data.iter().filter(|v| v.tools_count == 1).count();

    VendorSummaryReport {
        data,
        vendor_insights: VendorInsights {
            most_expensive_vendor: most_expensive.into_label(),
            most_efficient_vendor: most_efficient.into_label(),
            single_tool_vendors,
        },
    }
}
