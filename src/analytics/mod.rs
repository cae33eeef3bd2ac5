//! Aggregation and classification engine behind the analytics endpoints.
//!
//! Every function here is pure: it takes rows already filtered, grouped and
//! sorted by the store and derives percentages, per-user costs, tiers and
//! extrema. Empty input yields an empty report with zeroed summary fields.

mod breakdown;
mod tiers;
mod tools;
mod vendors;

pub use breakdown::{department_costs, tools_by_category};
pub use tools::{
    DEFAULT_EXPENSIVE_LIMIT, MAX_EXPENSIVE_LIMIT, clamp_limit, company_reference_average,
    expensive_tools, low_usage_tools,
};
pub use vendors::{merge_departments, vendor_summary};

pub use crate::models::{CostGroupRow, ToolUsageRow, VendorRow};

/// Round to 2 decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to 1 decimal place, half away from zero.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Cost divided by users, or the full cost when nobody uses the tool.
pub fn cost_per_user(cost: f64, users: i64) -> f64 {
    if users > 0 { cost / users as f64 } else { cost }
}

/// `part` as a percentage of `whole`, or 0 when `whole` is not positive.
pub(crate) fn share_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        round1(part / whole * 100.0)
    } else {
        0.0
    }
}

/// Running best label for a single pass over report rows.
///
/// Comparisons are strict, so on ties the first label seen is kept. The
/// label stays empty when no row beats the starting value.
#[derive(Debug, Clone, PartialEq)]
pub struct Extremum {
    pub label: String,
    pub value: f64,
}

impl Extremum {
    /// Start for a maximum search: only values above zero qualify.
    pub fn above_zero() -> Self {
        Self {
            label: String::new(),
            value: 0.0,
        }
    }

    /// Start for a minimum search: any finite value qualifies.
    pub fn unbounded_min() -> Self {
        Self {
            label: String::new(),
            value: f64::MAX,
        }
    }

    pub fn consider_max(mut self, label: &str, value: f64) -> Self {
        if value > self.value {
            self.label = label.to_string();
            self.value = value;
        }
        self
    }

    pub fn consider_min(mut self, label: &str, value: f64) -> Self {
        if value < self.value {
            self.label = label.to_string();
            self.value = value;
        }
        self
    }

    pub fn into_label(self) -> String {
        self.label
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(1.005, 1.0)] // 100.49999… in binary
    #[case(2.5, 2.5)]
    #[case(0.125, 0.13)]
    #[case(-0.125, -0.13)]
    #[case(33.333333, 33.33)]
    #[case(0.0, 0.0)]
    fn test_round2(#[case] input: f64, #[case] expected: f64) {
        assert_eq!(round2(input), expected);
    }

    #[rstest]
    #[case(66.666, 66.7)]
    #[case(33.333, 33.3)]
    #[case(0.25, 0.3)]
    #[case(12.34, 12.3)]
    fn test_round1(#[case] input: f64, #[case] expected: f64) {
        assert_eq!(round1(input), expected);
    }

    #[test]
    fn test_cost_per_user_zero_users_is_full_cost() {
        assert_eq!(cost_per_user(120.0, 0), 120.0);
        assert_eq!(cost_per_user(120.0, 4), 30.0);
    }

    #[test]
    fn test_share_of_zero_whole() {
        assert_eq!(share_of(10.0, 0.0), 0.0);
        assert_eq!(share_of(1.0, 3.0), 33.3);
    }

    #[test]
    fn test_extremum_first_seen_wins_ties() {
        let best = [("a", 5.0), ("b", 5.0), ("c", 3.0)]
            .into_iter()
            .fold(Extremum::above_zero(), |acc, (l, v)| acc.consider_max(l, v));
        assert_eq!(best.into_label(), "a");

        let cheapest = [("a", 5.0), ("b", 3.0), ("c", 3.0)]
            .into_iter()
            .fold(Extremum::unbounded_min(), |acc, (l, v)| acc.consider_min(l, v));
        assert_eq!(cheapest.into_label(), "b");
    }

    #[test]
    fn test_extremum_nothing_qualifies() {
        let best = [("a", 0.0), ("b", 0.0)]
            .into_iter()
            .fold(Extremum::above_zero(), |acc, (l, v)| acc.consider_max(l, v));
        assert_eq!(best.into_label(), "");
    }
}
