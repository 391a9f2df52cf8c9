//! Completion log management.
//!
//! A checklist toggle writes through `upsert_log`: the first write for a
//! (behavior, date) key creates the row, later writes overwrite it. There
//! is no implicit way back to "unmarked"; `delete_log` is the explicit
//! capability for that.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::analytics;
use crate::domain::commands::logs::{DeleteLogCommand, LogRangeQuery, UpsertLogCommand};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::behavior_log::BehaviorLog;
use crate::storage::traits::{BehaviorLogStorage, BehaviorStorage};

/// Service for writing and querying behavior logs
#[derive(Clone)]
pub struct LogService {
    behaviors: Arc<dyn BehaviorStorage>,
    logs: Arc<dyn BehaviorLogStorage>,
}

impl LogService {
    pub fn new(behaviors: Arc<dyn BehaviorStorage>, logs: Arc<dyn BehaviorLogStorage>) -> Self {
        Self { behaviors, logs }
    }

    /// Write the single log row for (behavior, date), replacing any
    /// existing one. Atomicity on the unique key is the storage layer's
    /// guarantee; this service takes no locks.
    pub async fn upsert_log(
        &self,
        user_id: &str,
        command: UpsertLogCommand,
    ) -> DomainResult<BehaviorLog> {
        info!(user_id, behavior_id = %command.behavior_id, date = %command.date, "upserting log");

        let behavior = self
            .behaviors
            .get_behavior(user_id, &command.behavior_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(command.behavior_id.clone()))?;
        if !behavior.state.is_active() {
            return Err(DomainError::InactiveBehavior(behavior.id));
        }

        let now = Utc::now().to_rfc3339();
        let log = BehaviorLog {
            id: BehaviorLog::generate_id(),
            user_id: user_id.to_string(),
            behavior_id: command.behavior_id,
            tracked_date: command.date,
            completed: command.completed,
            note: command.note,
            created_at: now.clone(),
            updated_at: now,
        };

        Ok(self.logs.upsert_log(&log).await?)
    }

    /// Remove the log row for (behavior, date), returning the day to
    /// "unmarked". Returns false when no row existed.
    pub async fn delete_log(&self, user_id: &str, command: DeleteLogCommand) -> DomainResult<bool> {
        info!(user_id, behavior_id = %command.behavior_id, date = %command.date, "deleting log");

        self.behaviors
            .get_behavior(user_id, &command.behavior_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(command.behavior_id.clone()))?;

        Ok(self
            .logs
            .delete_log(user_id, &command.behavior_id, command.date)
            .await?)
    }

    /// Date-range query over a set of behaviors.
    ///
    /// Archived behaviors' logs are reachable only with the explicit
    /// `include_archived` flag, whether the ids were named or expanded.
    pub async fn query_logs(
        &self,
        user_id: &str,
        query: LogRangeQuery,
    ) -> DomainResult<Vec<BehaviorLog>> {
        analytics::validate_range(query.start, query.end)?;

        let behavior_ids = match query.behavior_ids {
            Some(ids) => {
                for behavior_id in &ids {
                    let behavior = self
                        .behaviors
                        .get_behavior(user_id, behavior_id)
                        .await?
                        .ok_or_else(|| DomainError::NotFound(behavior_id.clone()))?;
                    if !behavior.state.is_active() && !query.include_archived {
                        return Err(DomainError::InactiveBehavior(behavior.id));
                    }
                }
                ids
            }
            None => self
                .behaviors
                .list_behaviors(user_id, query.include_archived)
                .await?
                .into_iter()
                .map(|b| b.id)
                .collect(),
        };

        Ok(self
            .logs
            .query_logs(user_id, &behavior_ids, query.start, query.end)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::behavior_service::BehaviorService;
    use crate::domain::commands::behavior::CreateBehaviorCommand;
    use crate::domain::models::behavior::BehaviorCategory;
    use crate::storage::sqlite::{DbConnection, SqliteBehaviorLogRepository, SqliteBehaviorRepository};
    use chrono::NaiveDate;

    async fn create_test_services() -> (BehaviorService, LogService) {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        let behaviors = Arc::new(SqliteBehaviorRepository::new(db.clone()));
        let logs = Arc::new(SqliteBehaviorLogRepository::new(db));
        (
            BehaviorService::new(behaviors.clone()),
            LogService::new(behaviors, logs),
        )
    }

    async fn create_behavior(service: &BehaviorService, name: &str) -> String {
        service
            .create_behavior(
                "user-1",
                CreateBehaviorCommand {
                    name: name.to_string(),
                    description: None,
                    category: BehaviorCategory::Health,
                    icon: None,
                    color: None,
                    target_frequency: 3,
                    display_order: None,
                },
            )
            .await
            .expect("Failed to create behavior")
            .id
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    fn upsert(behavior_id: &str, day: u32, completed: bool) -> UpsertLogCommand {
        UpsertLogCommand {
            behavior_id: behavior_id.to_string(),
            date: date(day),
            completed,
            note: None,
        }
    }

    #[tokio::test]
    async fn test_upsert_creates_then_overwrites() {
        let (behaviors, logs) = create_test_services().await;
        let behavior_id = create_behavior(&behaviors, "Meditate").await;

        let first = logs.upsert_log("user-1", upsert(&behavior_id, 1, true)).await.unwrap();
        assert!(first.completed);

        // Toggling the same day overwrites the row, keeping its identity.
        let second = logs.upsert_log("user-1", upsert(&behavior_id, 1, false)).await.unwrap();
        assert_eq!(second.id, first.id);
        assert!(!second.completed);
    }

    #[tokio::test]
    async fn test_upsert_unknown_behavior_is_not_found() {
        let (_, logs) = create_test_services().await;
        let result = logs
            .upsert_log("user-1", upsert("behavior::missing", 1, true))
            .await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_upsert_on_archived_behavior_is_rejected() {
        let (behaviors, logs) = create_test_services().await;
        let behavior_id = create_behavior(&behaviors, "Meditate").await;
        behaviors.archive_behavior("user-1", &behavior_id).await.unwrap();

        let result = logs.upsert_log("user-1", upsert(&behavior_id, 1, true)).await;
        assert!(matches!(result, Err(DomainError::InactiveBehavior(_))));
    }

    #[tokio::test]
    async fn test_delete_returns_day_to_unmarked() {
        let (behaviors, logs) = create_test_services().await;
        let behavior_id = create_behavior(&behaviors, "Meditate").await;
        logs.upsert_log("user-1", upsert(&behavior_id, 1, true)).await.unwrap();

        let deleted = logs
            .delete_log(
                "user-1",
                DeleteLogCommand {
                    behavior_id: behavior_id.clone(),
                    date: date(1),
                },
            )
            .await
            .unwrap();
        assert!(deleted);

        let remaining = logs
            .query_logs(
                "user-1",
                LogRangeQuery {
                    behavior_ids: Some(vec![behavior_id]),
                    start: date(1),
                    end: date(30),
                    include_archived: false,
                },
            )
            .await
            .unwrap();
        assert!(remaining.is_empty());
    }

    #[tokio::test]
    async fn test_query_rejects_inverted_range() {
        let (behaviors, logs) = create_test_services().await;
        let behavior_id = create_behavior(&behaviors, "Meditate").await;

        let result = logs
            .query_logs(
                "user-1",
                LogRangeQuery {
                    behavior_ids: Some(vec![behavior_id]),
                    start: date(10),
                    end: date(1),
                    include_archived: false,
                },
            )
            .await;
        assert!(matches!(result, Err(DomainError::InvalidRange { .. })));
    }

    #[tokio::test]
    async fn test_soft_delete_preserves_history() {
        let (behaviors, logs) = create_test_services().await;
        let behavior_id = create_behavior(&behaviors, "Meditate").await;
        logs.upsert_log("user-1", upsert(&behavior_id, 1, true)).await.unwrap();
        logs.upsert_log("user-1", upsert(&behavior_id, 2, true)).await.unwrap();

        behaviors.archive_behavior("user-1", &behavior_id).await.unwrap();

        // Without the flag the archived behavior's logs are off limits.
        let denied = logs
            .query_logs(
                "user-1",
                LogRangeQuery {
                    behavior_ids: Some(vec![behavior_id.clone()]),
                    start: date(1),
                    end: date(30),
                    include_archived: false,
                },
            )
            .await;
        assert!(matches!(denied, Err(DomainError::InactiveBehavior(_))));

        // With it, the full history is still there.
        let history = logs
            .query_logs(
                "user-1",
                LogRangeQuery {
                    behavior_ids: Some(vec![behavior_id]),
                    start: date(1),
                    end: date(30),
                    include_archived: true,
                },
            )
            .await
            .unwrap();
        assert_eq!(history.len(), 2);
    }

    #[tokio::test]
    async fn test_query_without_ids_expands_to_active_behaviors() {
        let (behaviors, logs) = create_test_services().await;
        let kept = create_behavior(&behaviors, "Meditate").await;
        let dropped = create_behavior(&behaviors, "Journal").await;
        logs.upsert_log("user-1", upsert(&kept, 1, true)).await.unwrap();
        logs.upsert_log("user-1", upsert(&dropped, 1, true)).await.unwrap();
        behaviors.archive_behavior("user-1", &dropped).await.unwrap();

        let visible = logs
            .query_logs(
                "user-1",
                LogRangeQuery {
                    behavior_ids: None,
                    start: date(1),
                    end: date(30),
                    include_archived: false,
                },
            )
            .await
            .unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].behavior_id, kept);
    }
}
