//! Dashboard views over the compliance engine.
//!
//! Orchestrates repository reads and the pure aggregation in
//! [`analytics`](crate::domain::analytics) and
//! [`compliance`](crate::domain::compliance) into the shapes the
//! presentation layer and the coaching read functions consume: today's
//! checklist, rolled-up stats, a chartable trend, and per-behavior
//! compliance. "Today" is always caller-supplied so none of this touches
//! the wall clock.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::domain::analytics::{self, RangeStats};
use crate::domain::compliance::{self, Compliance, Period};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::behavior::Behavior;
use crate::domain::models::behavior_log::BehaviorLog;
use crate::storage::traits::{BehaviorLogStorage, BehaviorStorage};

/// One checklist entry: an active behavior plus its log state for the day.
#[derive(Debug, Clone, PartialEq)]
pub struct ChecklistItem {
    pub behavior: Behavior,
    /// Whether a log row exists for the day at all
    pub logged: bool,
    /// The row's completed value; false when no row exists
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    pub behavior_id: String,
    pub name: String,
    pub color: String,
    /// One 0/100 value per date in the window
    pub values: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendData {
    pub dates: Vec<NaiveDate>,
    pub series: Vec<TrendSeries>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComplianceRow {
    pub behavior_id: String,
    pub name: String,
    pub compliance: Compliance,
}

/// Service producing the dashboard read models
#[derive(Clone)]
pub struct DashboardService {
    behaviors: Arc<dyn BehaviorStorage>,
    logs: Arc<dyn BehaviorLogStorage>,
}

impl DashboardService {
    pub fn new(behaviors: Arc<dyn BehaviorStorage>, logs: Arc<dyn BehaviorLogStorage>) -> Self {
        Self { behaviors, logs }
    }

    /// First day of a window of `window_days` ending on `end` inclusive
    fn window_start(end: NaiveDate, window_days: i64) -> DomainResult<NaiveDate> {
        if window_days < 1 {
            return Err(DomainError::Validation(
                "Window must be at least one day".to_string(),
            ));
        }
        // Reject before building the Duration: chrono panics on huge day
        // counts, and the cap bounds the dense sequence anyway.
        if window_days > analytics::MAX_RANGE_DAYS {
            return Err(DomainError::RangeTooLarge {
                days: window_days,
                max: analytics::MAX_RANGE_DAYS,
            });
        }
        let start = end - Duration::days(window_days - 1);
        analytics::validate_range(start, end)?;
        Ok(start)
    }

    /// Fetch active behaviors and their logs for [start, end], grouped by
    /// behavior id. One storage round trip for all behaviors.
    async fn active_behaviors_with_logs(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<(Vec<Behavior>, HashMap<String, Vec<BehaviorLog>>)> {
        let behaviors = self.behaviors.list_behaviors(user_id, false).await?;
        if behaviors.is_empty() {
            return Ok((behaviors, HashMap::new()));
        }

        let ids: Vec<String> = behaviors.iter().map(|b| b.id.clone()).collect();
        let logs = self.logs.query_logs(user_id, &ids, start, end).await?;
        debug!(behaviors = behaviors.len(), logs = logs.len(), "loaded dashboard window");

        let mut by_behavior: HashMap<String, Vec<BehaviorLog>> = HashMap::new();
        for log in logs {
            by_behavior.entry(log.behavior_id.clone()).or_default().push(log);
        }
        Ok((behaviors, by_behavior))
    }

    /// Today's checklist: one row per active behavior, unmarked rows
    /// defaulting to not-completed, ordered by display_order then id.
    pub async fn today_checklist(
        &self,
        user_id: &str,
        today: NaiveDate,
    ) -> DomainResult<Vec<ChecklistItem>> {
        let (behaviors, mut by_behavior) =
            self.active_behaviors_with_logs(user_id, today, today).await?;

        Ok(behaviors
            .into_iter()
            .map(|behavior| {
                let log = by_behavior
                    .remove(&behavior.id)
                    .and_then(|mut logs| logs.pop());
                ChecklistItem {
                    logged: log.is_some(),
                    completed: log.map(|l| l.completed).unwrap_or(false),
                    behavior,
                }
            })
            .collect())
    }

    /// Rolled-up stats for a window of `window_days` ending today:
    /// unweighted mean of per-behavior completion rates, max streaks.
    pub async fn stats(
        &self,
        user_id: &str,
        window_days: i64,
        today: NaiveDate,
    ) -> DomainResult<RangeStats> {
        let start = Self::window_start(today, window_days)?;
        let (behaviors, by_behavior) =
            self.active_behaviors_with_logs(user_id, start, today).await?;

        let mut per_behavior = Vec::with_capacity(behaviors.len());
        for behavior in &behaviors {
            let completed = by_behavior
                .get(&behavior.id)
                .map(|logs| analytics::completed_dates(logs))
                .unwrap_or_default();
            per_behavior.push(analytics::range_stats(&completed, start, today)?);
        }

        Ok(analytics::dashboard_rollup(&per_behavior))
    }

    /// Per-behavior 0/100 series over a window ending today, for charting
    pub async fn trend(
        &self,
        user_id: &str,
        window_days: i64,
        today: NaiveDate,
    ) -> DomainResult<TrendData> {
        let start = Self::window_start(today, window_days)?;
        let (behaviors, by_behavior) =
            self.active_behaviors_with_logs(user_id, start, today).await?;

        let dates = analytics::range_dates(start, today)?;
        let mut series = Vec::with_capacity(behaviors.len());
        for behavior in behaviors {
            let completed = by_behavior
                .get(&behavior.id)
                .map(|logs| analytics::completed_dates(logs))
                .unwrap_or_default();
            series.push(TrendSeries {
                values: analytics::trend_values(&completed, start, today)?,
                behavior_id: behavior.id,
                name: behavior.name,
                color: behavior.color,
            });
        }

        Ok(TrendData { dates, series })
    }

    /// Classify every active behavior over the period ending today.
    /// The period token is parsed strictly; unknown tokens fail.
    pub async fn compliance(
        &self,
        user_id: &str,
        period: &str,
        today: NaiveDate,
    ) -> DomainResult<Vec<ComplianceRow>> {
        let period: Period = period.parse()?;
        let start = Self::window_start(today, i64::from(period.days()))?;
        let (behaviors, by_behavior) =
            self.active_behaviors_with_logs(user_id, start, today).await?;

        Ok(behaviors
            .into_iter()
            .map(|behavior| {
                let actual = by_behavior
                    .get(&behavior.id)
                    .map(|logs| analytics::completed_dates(logs).len() as u32)
                    .unwrap_or(0);
                ComplianceRow {
                    compliance: compliance::classify(behavior.target_frequency, period, actual),
                    behavior_id: behavior.id,
                    name: behavior.name,
                }
            })
            .collect())
    }

    /// Classify a single behavior. Classification is only meaningful for
    /// currently tracked behaviors, so archived ones are an error.
    pub async fn behavior_compliance(
        &self,
        user_id: &str,
        behavior_id: &str,
        period: &str,
        today: NaiveDate,
    ) -> DomainResult<ComplianceRow> {
        let period: Period = period.parse()?;

        let behavior = self
            .behaviors
            .get_behavior(user_id, behavior_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(behavior_id.to_string()))?;
        if !behavior.state.is_active() {
            return Err(DomainError::InactiveBehavior(behavior.id));
        }

        let start = Self::window_start(today, i64::from(period.days()))?;
        let logs = self
            .logs
            .query_logs(user_id, &[behavior.id.clone()], start, today)
            .await?;
        let actual = analytics::completed_dates(&logs).len() as u32;

        Ok(ComplianceRow {
            compliance: compliance::classify(behavior.target_frequency, period, actual),
            behavior_id: behavior.id,
            name: behavior.name,
        })
    }
}
