//! Streak and rolling-rate aggregation over sparse completion logs.
//!
//! This is the core of the compliance engine: pure functions with no
//! storage or clock coupling. Callers supply the logs and the closed date
//! range; a date with no completed log counts as not completed, so the
//! completion-rate denominator is always the number of calendar days in
//! the range.
//!
//! The sparse logs are expanded once into a dense day-by-day boolean
//! sequence and everything is computed with linear scans over it, rather
//! than probing a date-keyed map repeatedly inside the loops.

use chrono::{Duration, NaiveDate};
use std::collections::HashSet;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::behavior_log::BehaviorLog;

/// Upper bound on a single aggregation range (3 years). Bounds the dense
/// sequence allocation; longer ranges are a caller error.
pub const MAX_RANGE_DAYS: i64 = 1095;

/// Per-behavior aggregation result for one date range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RangeStats {
    /// Completed days / calendar days in range, as a percentage 0..=100
    pub completion_rate: f64,
    /// Consecutive completed days ending at the final day of the range
    pub current_streak: u32,
    /// Longest run of consecutive completed days anywhere in the range
    pub best_streak: u32,
}

/// Validate a closed range [start, end] and return its length in days.
pub fn validate_range(start: NaiveDate, end: NaiveDate) -> DomainResult<i64> {
    if end < start {
        return Err(DomainError::InvalidRange { start, end });
    }
    let days = (end - start).num_days() + 1;
    if days > MAX_RANGE_DAYS {
        return Err(DomainError::RangeTooLarge {
            days,
            max: MAX_RANGE_DAYS,
        });
    }
    Ok(days)
}

/// Collect the dates a behavior was recorded as completed.
///
/// Rows with `completed == false` are deliberately indistinguishable from
/// absent rows here; both count against streaks and rates.
pub fn completed_dates(logs: &[BehaviorLog]) -> HashSet<NaiveDate> {
    logs.iter()
        .filter(|log| log.completed)
        .map(|log| log.tracked_date)
        .collect()
}

/// Expand a sparse completed-date set into a dense ascending day sequence.
fn dense_days(completed: &HashSet<NaiveDate>, start: NaiveDate, days: i64) -> Vec<bool> {
    (0..days)
        .map(|offset| completed.contains(&(start + Duration::days(offset))))
        .collect()
}

/// Compute completion rate and streaks for one behavior over [start, end].
pub fn range_stats(
    completed: &HashSet<NaiveDate>,
    start: NaiveDate,
    end: NaiveDate,
) -> DomainResult<RangeStats> {
    let days = validate_range(start, end)?;
    let sequence = dense_days(completed, start, days);

    let completed_count = sequence.iter().filter(|&&done| done).count();
    let completion_rate = completed_count as f64 / days as f64 * 100.0;

    // Forward scan: running counter resets on any miss, max tracked on hits.
    let mut best_streak = 0u32;
    let mut run = 0u32;
    for &done in &sequence {
        if done {
            run += 1;
            best_streak = best_streak.max(run);
        } else {
            run = 0;
        }
    }

    // Backward scan from the end of the range until the first miss.
    let current_streak = sequence.iter().rev().take_while(|&&done| done).count() as u32;

    Ok(RangeStats {
        completion_rate,
        current_streak,
        best_streak,
    })
}

/// Combine independent per-behavior stats into one dashboard summary.
///
/// The rate is the unweighted mean of the individual rates, not a pooled
/// ratio of totals; the streaks are the maximum across behaviors. Two
/// behaviors at 100% and 0% therefore average to 50%.
pub fn dashboard_rollup(stats: &[RangeStats]) -> RangeStats {
    if stats.is_empty() {
        return RangeStats::default();
    }
    let rate_sum: f64 = stats.iter().map(|s| s.completion_rate).sum();
    RangeStats {
        completion_rate: rate_sum / stats.len() as f64,
        current_streak: stats.iter().map(|s| s.current_streak).max().unwrap_or(0),
        best_streak: stats.iter().map(|s| s.best_streak).max().unwrap_or(0),
    }
}

/// Dense 0/100 series for charting: one value per date in [start, end].
pub fn trend_values(
    completed: &HashSet<NaiveDate>,
    start: NaiveDate,
    end: NaiveDate,
) -> DomainResult<Vec<u8>> {
    let days = validate_range(start, end)?;
    Ok(dense_days(completed, start, days)
        .into_iter()
        .map(|done| if done { 100 } else { 0 })
        .collect())
}

/// Every date in [start, end], ascending.
pub fn range_dates(start: NaiveDate, end: NaiveDate) -> DomainResult<Vec<NaiveDate>> {
    let days = validate_range(start, end)?;
    Ok((0..days).map(|offset| start + Duration::days(offset)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).expect("valid test date")
    }

    fn completed_on(days: &[u32]) -> HashSet<NaiveDate> {
        days.iter().map(|&d| date(d)).collect()
    }

    #[test]
    fn rejects_end_before_start() {
        let result = range_stats(&HashSet::new(), date(10), date(9));
        assert!(matches!(result, Err(DomainError::InvalidRange { .. })));
    }

    #[test]
    fn rejects_pathological_range() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let result = range_stats(&HashSet::new(), start, end);
        assert!(matches!(result, Err(DomainError::RangeTooLarge { .. })));
    }

    #[test]
    fn single_day_range_is_valid() {
        let stats = range_stats(&completed_on(&[1]), date(1), date(1)).unwrap();
        assert_eq!(stats.completion_rate, 100.0);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.best_streak, 1);
    }

    #[test]
    fn absence_counts_against_the_denominator() {
        // Logs on days 1 and 3 of a 5-day range: 2/5 = 40%, not 2/2.
        let stats = range_stats(&completed_on(&[1, 3]), date(1), date(5)).unwrap();
        assert_eq!(stats.completion_rate, 40.0);
    }

    #[test]
    fn empty_logs_give_zero_everything() {
        let stats = range_stats(&HashSet::new(), date(1), date(7)).unwrap();
        assert_eq!(stats.completion_rate, 0.0);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.best_streak, 0);
    }

    #[test]
    fn best_streak_found_mid_range() {
        // days 2-4 completed, day 7 completed: best run is 3, current is 1.
        let stats = range_stats(&completed_on(&[2, 3, 4, 7]), date(1), date(7)).unwrap();
        assert_eq!(stats.best_streak, 3);
        assert_eq!(stats.current_streak, 1);
    }

    #[test]
    fn current_streak_is_zero_after_a_trailing_miss() {
        let stats = range_stats(&completed_on(&[1, 2, 3]), date(1), date(4)).unwrap();
        assert_eq!(stats.best_streak, 3);
        assert_eq!(stats.current_streak, 0);
    }

    #[test]
    fn current_streak_spans_the_whole_range() {
        let stats = range_stats(&completed_on(&[1, 2, 3, 4, 5]), date(1), date(5)).unwrap();
        assert_eq!(stats.current_streak, 5);
        assert_eq!(stats.best_streak, 5);
    }

    #[test]
    fn best_streak_never_below_current_streak() {
        let fixtures: &[&[u32]] = &[
            &[],
            &[1],
            &[7],
            &[1, 2, 6, 7],
            &[3, 4, 5, 6, 7],
            &[1, 3, 5, 7],
            &[1, 2, 3, 4, 5, 6, 7],
        ];
        for days in fixtures {
            let stats = range_stats(&completed_on(days), date(1), date(7)).unwrap();
            assert!(
                stats.best_streak >= stats.current_streak,
                "violated for {:?}",
                days
            );
        }
    }

    #[test]
    fn workout_week_scenario() {
        // Mon 2025-06-02 .. Sun 2025-06-08, completed Mon/Tue/Thu/Fri.
        let completed = completed_on(&[2, 3, 5, 6]);
        let stats = range_stats(&completed, date(2), date(8)).unwrap();
        assert_eq!(stats.current_streak, 0); // Sat and Sun absent
        assert_eq!(stats.best_streak, 2); // Mon-Tue and Thu-Fri both length 2
        assert!((stats.completion_rate - 4.0 / 7.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn rollup_averages_rates_instead_of_pooling() {
        let a = RangeStats {
            completion_rate: 100.0,
            current_streak: 7,
            best_streak: 7,
        };
        let b = RangeStats {
            completion_rate: 0.0,
            current_streak: 0,
            best_streak: 0,
        };
        let rollup = dashboard_rollup(&[a, b]);
        assert_eq!(rollup.completion_rate, 50.0);
        assert_eq!(rollup.current_streak, 7);
        assert_eq!(rollup.best_streak, 7);
    }

    #[test]
    fn rollup_of_nothing_is_zero() {
        assert_eq!(dashboard_rollup(&[]), RangeStats::default());
    }

    #[test]
    fn trend_values_are_dense_and_binary() {
        let values = trend_values(&completed_on(&[1, 3]), date(1), date(4)).unwrap();
        assert_eq!(values, vec![100, 0, 100, 0]);
    }

    #[test]
    fn range_dates_cover_the_window_inclusively() {
        let dates = range_dates(date(5), date(7)).unwrap();
        assert_eq!(dates, vec![date(5), date(6), date(7)]);
    }

    #[test]
    fn incomplete_rows_count_as_misses() {
        // completed_dates drops completed=false rows entirely.
        let logs = vec![
            BehaviorLog {
                id: "log::1".into(),
                user_id: "u1".into(),
                behavior_id: "behavior::1".into(),
                tracked_date: date(1),
                completed: true,
                note: None,
                created_at: String::new(),
                updated_at: String::new(),
            },
            BehaviorLog {
                id: "log::2".into(),
                user_id: "u1".into(),
                behavior_id: "behavior::1".into(),
                tracked_date: date(2),
                completed: false,
                note: Some("skipped".into()),
                created_at: String::new(),
                updated_at: String::new(),
            },
        ];
        let completed = completed_dates(&logs);
        assert!(completed.contains(&date(1)));
        assert!(!completed.contains(&date(2)));
    }
}
