//! SQLite-backed behavior definition repository.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::db::DbConnection;
use crate::domain::models::behavior::{Behavior, BehaviorCategory, BehaviorState};
use crate::storage::traits::BehaviorStorage;

#[derive(Clone)]
pub struct SqliteBehaviorRepository {
    db: DbConnection,
}

impl SqliteBehaviorRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

fn row_to_behavior(row: &SqliteRow) -> Result<Behavior> {
    let category_raw: String = row.get("category");
    let category = BehaviorCategory::parse(&category_raw).map_err(anyhow::Error::msg)?;
    let is_active: bool = row.get("is_active");

    Ok(Behavior {
        id: row.get("id"),
        user_id: row.get("user_id"),
        name: row.get("name"),
        description: row.get("description"),
        category,
        icon: row.get("icon"),
        color: row.get("color"),
        target_frequency: row.get::<i64, _>("target_frequency") as u8,
        display_order: row.get::<i64, _>("display_order") as i32,
        state: BehaviorState::from_flag(is_active),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

#[async_trait]
impl BehaviorStorage for SqliteBehaviorRepository {
    async fn store_behavior(&self, behavior: &Behavior) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO behaviors
                (id, user_id, name, description, category, icon, color,
                 target_frequency, display_order, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&behavior.id)
        .bind(&behavior.user_id)
        .bind(&behavior.name)
        .bind(&behavior.description)
        .bind(behavior.category.as_str())
        .bind(&behavior.icon)
        .bind(&behavior.color)
        .bind(i64::from(behavior.target_frequency))
        .bind(i64::from(behavior.display_order))
        .bind(behavior.state.is_active())
        .bind(&behavior.created_at)
        .bind(&behavior.updated_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_behavior(&self, user_id: &str, behavior_id: &str) -> Result<Option<Behavior>> {
        let row = sqlx::query("SELECT * FROM behaviors WHERE user_id = ? AND id = ?")
            .bind(user_id)
            .bind(behavior_id)
            .fetch_optional(self.db.pool())
            .await?;

        match row {
            Some(r) => Ok(Some(row_to_behavior(&r)?)),
            None => Ok(None),
        }
    }

    async fn list_behaviors(&self, user_id: &str, include_archived: bool) -> Result<Vec<Behavior>> {
        let sql = if include_archived {
            "SELECT * FROM behaviors WHERE user_id = ? ORDER BY display_order ASC, id ASC"
        } else {
            "SELECT * FROM behaviors WHERE user_id = ? AND is_active = 1 \
             ORDER BY display_order ASC, id ASC"
        };
        let rows = sqlx::query(sql)
            .bind(user_id)
            .fetch_all(self.db.pool())
            .await?;

        rows.iter().map(row_to_behavior).collect()
    }

    async fn update_behavior(&self, behavior: &Behavior) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE behaviors
            SET name = ?, description = ?, category = ?, icon = ?, color = ?,
                target_frequency = ?, display_order = ?, is_active = ?, updated_at = ?
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(&behavior.name)
        .bind(&behavior.description)
        .bind(behavior.category.as_str())
        .bind(&behavior.icon)
        .bind(&behavior.color)
        .bind(i64::from(behavior.target_frequency))
        .bind(i64::from(behavior.display_order))
        .bind(behavior.state.is_active())
        .bind(&behavior.updated_at)
        .bind(&behavior.user_id)
        .bind(&behavior.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn find_active_by_name(&self, user_id: &str, name: &str) -> Result<Option<Behavior>> {
        let row = sqlx::query(
            "SELECT * FROM behaviors WHERE user_id = ? AND name = ? AND is_active = 1",
        )
        .bind(user_id)
        .bind(name)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some(row_to_behavior(&r)?)),
            None => Ok(None),
        }
    }

    async fn max_display_order(&self, user_id: &str) -> Result<Option<i32>> {
        let row = sqlx::query(
            "SELECT MAX(display_order) AS max_order FROM behaviors WHERE user_id = ? AND is_active = 1",
        )
            .bind(user_id)
            .fetch_one(self.db.pool())
            .await?;
        let max: Option<i64> = row.get("max_order");
        Ok(max.map(|v| v as i32))
    }

    async fn set_display_orders(&self, user_id: &str, orders: &[(String, i32)]) -> Result<()> {
        let mut tx = self.db.pool().begin().await?;
        for (behavior_id, order) in orders {
            sqlx::query("UPDATE behaviors SET display_order = ? WHERE user_id = ? AND id = ?")
                .bind(i64::from(*order))
                .bind(user_id)
                .bind(behavior_id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}
