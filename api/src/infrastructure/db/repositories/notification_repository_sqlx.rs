use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::notification_repository::NotificationRepository;
use crate::domain::notifications::{NewNotification, Notification};
use crate::infrastructure::db::{PgPool, map_db_err};

pub struct SqlxNotificationRepository {
    pub pool: PgPool,
}

impl SqlxNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, id: i64) -> anyhow::Result<Option<Notification>> {
        let row = sqlx::query(
            r#"SELECT n.id, n.message, n.customer_id, c.name AS customer_name, n.created_at
               FROM notifications n
               LEFT JOIN customers c ON c.id = n.customer_id
               WHERE n.id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(notification_from_row))
    }
}

fn notification_from_row(r: &PgRow) -> Notification {
    Notification {
        id: r.get("id"),
        message: r.get("message"),
        customer_id: r.get("customer_id"),
        customer_name: r.get("customer_name"),
        created_at: r.get("created_at"),
    }
}

#[async_trait]
impl NotificationRepository for SqlxNotificationRepository {
    async fn list(
        &self,
        customer_id: Option<i64>,
        search: Option<String>,
    ) -> anyhow::Result<Vec<Notification>> {
        let rows = sqlx::query(
            r#"SELECT n.id, n.message, n.customer_id, c.name AS customer_name, n.created_at
               FROM notifications n
               LEFT JOIN customers c ON c.id = n.customer_id
               WHERE ($1::bigint IS NULL OR n.customer_id = $1)
                 AND ($2::text IS NULL OR n.message ILIKE '%' || $2 || '%')
               ORDER BY n.created_at DESC, n.id DESC"#,
        )
        .bind(customer_id)
        .bind(search)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(notification_from_row).collect())
    }

    async fn get(&self, id: i64) -> anyhow::Result<Option<Notification>> {
        self.fetch(id).await
    }

    async fn create(&self, input: &NewNotification) -> anyhow::Result<Notification> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO notifications (message, customer_id) VALUES ($1, $2) RETURNING id",
        )
        .bind(&input.message)
        .bind(input.customer_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_err)?;
        self.fetch(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("notification {} vanished after insert", id))
    }

    async fn update(
        &self,
        id: i64,
        message: Option<String>,
        customer_id: Option<Option<i64>>,
    ) -> anyhow::Result<Option<Notification>> {
        let res = sqlx::query(
            r#"UPDATE notifications
               SET message = COALESCE($2, message),
                   customer_id = CASE WHEN $3 THEN $4 ELSE customer_id END
               WHERE id = $1"#,
        )
        .bind(id)
        .bind(message)
        .bind(customer_id.is_some())
        .bind(customer_id.flatten())
        .execute(&self.pool)
        .await
        .map_err(map_db_err)?;
        if res.rows_affected() == 0 {
            return Ok(None);
        }
        self.fetch(id).await
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn import(&self, rows: &[NewNotification]) -> anyhow::Result<u64> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;
        for row in rows {
            let res = sqlx::query("INSERT INTO notifications (message, customer_id) VALUES ($1, $2)")
                .bind(&row.message)
                .bind(row.customer_id)
                .execute(&mut *tx)
                .await
                .map_err(map_db_err)?;
            inserted += res.rows_affected();
        }
        tx.commit().await?;
        Ok(inserted)
    }
}
