//! Fixed-threshold tiering. The three schemes are independent and use
//! different reference points.

use crate::models::{EfficiencyRating, VendorEfficiency, WarningLevel};

impl EfficiencyRating {
    /// Rate a tool's cost per user against the company-wide reference.
    ///
    /// A zero-user tool is always `Low`. With a zero reference, a tool that
    /// has users matches no band and lands in `Excellent`.
    pub fn classify(cost_per_user: f64, users: i64, reference: f64) -> Self {
        if users == 0 || (reference > 0.0 && cost_per_user > reference * 1.2) {
            EfficiencyRating::Low
        } else if reference > 0.0 && cost_per_user >= reference * 0.8 {
            EfficiencyRating::Average
        } else if reference > 0.0 && cost_per_user >= reference * 0.5 {
            EfficiencyRating::Good
        } else {
            EfficiencyRating::Excellent
        }
    }
}

impl WarningLevel {
    /// Above 50 per user is `High`, 20 through 50 is `Medium`.
    pub fn classify(cost_per_user: f64, users: i64) -> Self {
        if users == 0 || cost_per_user > 50.0 {
            WarningLevel::High
        } else if cost_per_user >= 20.0 {
            WarningLevel::Medium
        } else {
            WarningLevel::Low
        }
    }

    /// Whether tools at this level count toward potential savings.
    pub fn counts_as_savings(&self) -> bool {
        matches!(self, WarningLevel::High | WarningLevel::Medium)
    }
}

impl VendorEfficiency {
    pub fn classify(average_cost_per_user: f64, users: i64) -> Self {
        if users == 0 || average_cost_per_user > 25.0 {
            VendorEfficiency::Poor
        } else if average_cost_per_user > 15.0 {
            VendorEfficiency::Average
        } else if average_cost_per_user > 5.0 {
            VendorEfficiency::Good
        } else {
            VendorEfficiency::Excellent
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    // reference 10: low > 12, average [8, 12], good [5, 8), excellent < 5
    #[rstest]
    #[case(12.01, 3, EfficiencyRating::Low)]
    #[case(12.0, 3, EfficiencyRating::Average)]
    #[case(8.0, 3, EfficiencyRating::Average)]
    #[case(7.99, 3, EfficiencyRating::Good)]
    #[case(5.0, 3, EfficiencyRating::Good)]
    #[case(4.99, 3, EfficiencyRating::Excellent)]
    #[case(1.0, 0, EfficiencyRating::Low)]
    fn test_efficiency_bands(
        #[case] cost_per_user: f64,
        #[case] users: i64,
        #[case] expected: EfficiencyRating,
    ) {
        assert_eq!(EfficiencyRating::classify(cost_per_user, users, 10.0), expected);
    }

    #[test]
    fn test_efficiency_zero_reference_falls_through_to_excellent() {
        assert_eq!(
            EfficiencyRating::classify(500.0, 2, 0.0),
            EfficiencyRating::Excellent
        );
        assert_eq!(EfficiencyRating::classify(500.0, 0, 0.0), EfficiencyRating::Low);
    }

    #[rstest]
    #[case(50.01, 1, WarningLevel::High)]
    #[case(50.0, 1, WarningLevel::Medium)]
    #[case(20.0, 1, WarningLevel::Medium)]
    #[case(19.99, 1, WarningLevel::Low)]
    #[case(0.0, 0, WarningLevel::High)]
    #[case(3.0, 0, WarningLevel::High)]
    fn test_warning_levels(
        #[case] cost_per_user: f64,
        #[case] users: i64,
        #[case] expected: WarningLevel,
    ) {
        assert_eq!(WarningLevel::classify(cost_per_user, users), expected);
    }

    #[test]
    fn test_savings_levels() {
        assert!(WarningLevel::High.counts_as_savings());
        assert!(WarningLevel::Medium.counts_as_savings());
        assert!(!WarningLevel::Low.counts_as_savings());
    }

    #[rstest]
    #[case(25.01, 10, VendorEfficiency::Poor)]
    #[case(25.0, 10, VendorEfficiency::Average)]
    #[case(15.01, 10, VendorEfficiency::Average)]
    #[case(15.0, 10, VendorEfficiency::Good)]
    #[case(5.01, 10, VendorEfficiency::Good)]
    #[case(5.0, 10, VendorEfficiency::Excellent)]
    #[case(0.0, 0, VendorEfficiency::Poor)]
    fn test_vendor_efficiency(
        #[case] average: f64,
        #[case] users: i64,
        #[case] expected: VendorEfficiency,
    ) {
        assert_eq!(VendorEfficiency::classify(average, users), expected);
    }
}
