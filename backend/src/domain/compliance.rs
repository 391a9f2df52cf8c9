//! Target-frequency compliance classification.
//!
//! Compares the number of completed logs in a reporting period against the
//! behavior's weekly target and buckets the result. The three-bucket status
//! (rather than a raw percentage) is what the dashboard and the coaching
//! text consume, so the classification must be deterministic for identical
//! inputs.

use std::str::FromStr;

use crate::domain::errors::DomainError;

/// Reporting period for compliance classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Week,
    Month,
}

impl Period {
    pub fn days(self) -> u32 {
        match self {
            Period::Week => 7,
            Period::Month => 30,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
        }
    }
}

impl FromStr for Period {
    type Err = DomainError;

    /// Unrecognized tokens are an error, never a silent default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            other => Err(DomainError::InvalidPeriod(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplianceStatus {
    OnTrack,
    UnderTarget,
    OffTrack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compliance {
    pub status: ComplianceStatus,
    /// Informational: actual exceeded 1.5x the expected count
    pub over_target: bool,
    pub expected: u32,
    pub actual: u32,
}

/// Round half away from zero; inputs here are always non-negative.
fn round_half_up(value: f64) -> u32 {
    value.round() as u32
}

/// Classify actual completions against the weekly target scaled to the period.
///
/// `expected = round(target_frequency * period_days / 7)`. One completion
/// short of expected is `UnderTarget`; further short is `OffTrack`.
pub fn classify(target_frequency: u8, period: Period, actual: u32) -> Compliance {
    let expected = round_half_up(f64::from(target_frequency) * f64::from(period.days()) / 7.0);

    let status = if actual >= expected {
        ComplianceStatus::OnTrack
    } else if expected - actual == 1 {
        ComplianceStatus::UnderTarget
    } else {
        ComplianceStatus::OffTrack
    };

    let over_target = actual > round_half_up(f64::from(expected) * 1.5);

    Compliance {
        status,
        over_target,
        expected,
        actual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_period_tokens() {
        assert_eq!("week".parse::<Period>().unwrap(), Period::Week);
        assert_eq!("month".parse::<Period>().unwrap(), Period::Month);
    }

    #[test]
    fn rejects_unknown_period_token() {
        let err = "fortnight".parse::<Period>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidPeriod(token) if token == "fortnight"));
    }

    #[test]
    fn weekly_expected_equals_target() {
        let result = classify(3, Period::Week, 3);
        assert_eq!(result.expected, 3);
        assert_eq!(result.status, ComplianceStatus::OnTrack);
    }

    #[test]
    fn one_short_is_under_target() {
        let result = classify(3, Period::Week, 2);
        assert_eq!(result.status, ComplianceStatus::UnderTarget);
    }

    #[test]
    fn two_short_is_off_track() {
        let result = classify(3, Period::Week, 1);
        assert_eq!(result.status, ComplianceStatus::OffTrack);
    }

    #[test]
    fn monthly_expected_rounds_half_up() {
        // 3 * 30 / 7 = 12.857 -> 13; 1 * 30 / 7 = 4.286 -> 4.
        assert_eq!(classify(3, Period::Month, 0).expected, 13);
        assert_eq!(classify(1, Period::Month, 0).expected, 4);
        // 7 * 30 / 7 = 30 exactly.
        assert_eq!(classify(7, Period::Month, 30).expected, 30);
    }

    #[test]
    fn workout_week_is_on_track() {
        let result = classify(4, Period::Week, 4);
        assert_eq!(result.expected, 4);
        assert_eq!(result.actual, 4);
        assert_eq!(result.status, ComplianceStatus::OnTrack);
        assert!(!result.over_target);
    }

    #[test]
    fn over_target_needs_strictly_more_than_threshold() {
        // expected = 4, threshold = round(4 * 1.5) = 6.
        assert!(!classify(4, Period::Week, 6).over_target);
        assert!(classify(4, Period::Week, 7).over_target);
    }

    #[test]
    fn over_target_does_not_change_the_status() {
        let result = classify(4, Period::Week, 7);
        assert_eq!(result.status, ComplianceStatus::OnTrack);
        assert!(result.over_target);
    }
}
