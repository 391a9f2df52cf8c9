//! SQLite-backed behavior log repository.
//!
//! The upsert rides on the UNIQUE(user_id, behavior_id, tracked_date)
//! index: `ON CONFLICT ... DO UPDATE` makes a second write for the same
//! key overwrite the existing row instead of inserting a duplicate, with
//! no locking above the database.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::db::DbConnection;
use crate::domain::models::behavior_log::BehaviorLog;
use crate::storage::traits::BehaviorLogStorage;

#[derive(Clone)]
pub struct SqliteBehaviorLogRepository {
    db: DbConnection,
}

impl SqliteBehaviorLogRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

fn row_to_log(row: &SqliteRow) -> BehaviorLog {
    BehaviorLog {
        id: row.get("id"),
        user_id: row.get("user_id"),
        behavior_id: row.get("behavior_id"),
        tracked_date: row.get("tracked_date"),
        completed: row.get("completed"),
        note: row.get("note"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl BehaviorLogStorage for SqliteBehaviorLogRepository {
    async fn upsert_log(&self, log: &BehaviorLog) -> Result<BehaviorLog> {
        sqlx::query(
            r#"
            INSERT INTO behavior_logs
                (id, user_id, behavior_id, tracked_date, completed, note, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(user_id, behavior_id, tracked_date) DO UPDATE SET
                completed = excluded.completed,
                note = excluded.note,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&log.id)
        .bind(&log.user_id)
        .bind(&log.behavior_id)
        .bind(log.tracked_date)
        .bind(log.completed)
        .bind(&log.note)
        .bind(&log.created_at)
        .bind(&log.updated_at)
        .execute(self.db.pool())
        .await?;

        // Read the row back: on conflict the original id and created_at win.
        let stored = self
            .get_log(&log.user_id, &log.behavior_id, log.tracked_date)
            .await?
            .ok_or_else(|| anyhow::anyhow!("upserted log row disappeared"))?;
        Ok(stored)
    }

    async fn get_log(
        &self,
        user_id: &str,
        behavior_id: &str,
        date: NaiveDate,
    ) -> Result<Option<BehaviorLog>> {
        let row = sqlx::query(
            "SELECT * FROM behavior_logs \
             WHERE user_id = ? AND behavior_id = ? AND tracked_date = ?",
        )
        .bind(user_id)
        .bind(behavior_id)
        .bind(date)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(|r| row_to_log(&r)))
    }

    async fn query_logs(
        &self,
        user_id: &str,
        behavior_ids: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<BehaviorLog>> {
        if behavior_ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; behavior_ids.len()].join(", ");
        let sql = format!(
            "SELECT * FROM behavior_logs \
             WHERE user_id = ? AND behavior_id IN ({}) \
               AND tracked_date >= ? AND tracked_date <= ? \
             ORDER BY tracked_date ASC",
            placeholders
        );

        let mut query = sqlx::query(&sql).bind(user_id);
        for behavior_id in behavior_ids {
            query = query.bind(behavior_id);
        }
        let rows = query
            .bind(start)
            .bind(end)
            .fetch_all(self.db.pool())
            .await?;

        Ok(rows.iter().map(row_to_log).collect())
    }

    async fn delete_log(&self, user_id: &str, behavior_id: &str, date: NaiveDate) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM behavior_logs \
             WHERE user_id = ? AND behavior_id = ? AND tracked_date = ?",
        )
        .bind(user_id)
        .bind(behavior_id)
        .bind(date)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::behavior::{Behavior, BehaviorCategory, BehaviorState};
    use crate::storage::sqlite::SqliteBehaviorRepository;
    use crate::storage::traits::BehaviorStorage;

    async fn setup() -> (SqliteBehaviorLogRepository, String) {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");

        // Logs reference behaviors, so seed one definition first.
        let behaviors = SqliteBehaviorRepository::new(db.clone());
        let behavior = Behavior {
            id: "behavior::a".to_string(),
            user_id: "user-1".to_string(),
            name: "Workout".to_string(),
            description: None,
            category: BehaviorCategory::Fitness,
            icon: "💪".to_string(),
            color: "#2196f3".to_string(),
            target_frequency: 4,
            display_order: 0,
            state: BehaviorState::Active,
            created_at: "2025-06-01T00:00:00Z".to_string(),
            updated_at: "2025-06-01T00:00:00Z".to_string(),
        };
        behaviors.store_behavior(&behavior).await.unwrap();

        (SqliteBehaviorLogRepository::new(db), behavior.id)
    }

    fn sample_log(behavior_id: &str, date: NaiveDate, completed: bool) -> BehaviorLog {
        BehaviorLog {
            id: BehaviorLog::generate_id(),
            user_id: "user-1".to_string(),
            behavior_id: behavior_id.to_string(),
            tracked_date: date,
            completed,
            note: None,
            created_at: "2025-06-01T00:00:00Z".to_string(),
            updated_at: "2025-06-01T00:00:00Z".to_string(),
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    #[tokio::test]
    async fn test_upsert_then_get() {
        let (repo, behavior_id) = setup().await;
        let log = sample_log(&behavior_id, date(1), true);

        let stored = repo.upsert_log(&log).await.expect("upsert failed");
        assert_eq!(stored.id, log.id);

        let fetched = repo.get_log("user-1", &behavior_id, date(1)).await.unwrap();
        assert_eq!(fetched, Some(stored));
    }

    #[tokio::test]
    async fn test_second_upsert_overwrites_instead_of_duplicating() {
        let (repo, behavior_id) = setup().await;

        let first = sample_log(&behavior_id, date(1), true);
        repo.upsert_log(&first).await.unwrap();

        let mut second = sample_log(&behavior_id, date(1), false);
        second.note = Some("too tired".to_string());
        let stored = repo.upsert_log(&second).await.unwrap();

        // The original row id survives; the payload is replaced.
        assert_eq!(stored.id, first.id);
        assert!(!stored.completed);
        assert_eq!(stored.note.as_deref(), Some("too tired"));

        let all = repo
            .query_logs("user-1", &[behavior_id], date(1), date(30))
            .await
            .unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_idempotent_upsert_with_identical_payload() {
        let (repo, behavior_id) = setup().await;
        let log = sample_log(&behavior_id, date(1), true);

        repo.upsert_log(&log).await.unwrap();
        repo.upsert_log(&log).await.unwrap();

        let all = repo
            .query_logs("user-1", &[behavior_id], date(1), date(30))
            .await
            .unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_query_logs_filters_by_range_and_sorts() {
        let (repo, behavior_id) = setup().await;
        for day in [5, 1, 3, 20] {
            repo.upsert_log(&sample_log(&behavior_id, date(day), true))
                .await
                .unwrap();
        }

        let logs = repo
            .query_logs("user-1", &[behavior_id], date(1), date(10))
            .await
            .unwrap();
        let days: Vec<u32> = logs
            .iter()
            .map(|l| chrono::Datelike::day(&l.tracked_date))
            .collect();
        assert_eq!(days, vec![1, 3, 5]);
    }

    #[tokio::test]
    async fn test_query_logs_with_no_behaviors_is_empty() {
        let (repo, _) = setup().await;
        let logs = repo.query_logs("user-1", &[], date(1), date(10)).await.unwrap();
        assert!(logs.is_empty());
    }

    #[tokio::test]
    async fn test_delete_log() {
        let (repo, behavior_id) = setup().await;
        repo.upsert_log(&sample_log(&behavior_id, date(1), true))
            .await
            .unwrap();

        assert!(repo.delete_log("user-1", &behavior_id, date(1)).await.unwrap());
        assert!(repo.get_log("user-1", &behavior_id, date(1)).await.unwrap().is_none());

        // Second delete finds nothing.
        assert!(!repo.delete_log("user-1", &behavior_id, date(1)).await.unwrap());
    }
}
