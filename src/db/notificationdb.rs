// db/notificationdb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::notificationmodel::{Notification, NotificationType};

const NOTIFICATION_COLUMNS: &str = "id, user_id, notification_type, title, description, \
     message, action_url, read, read_at, created_at";

#[async_trait]
pub trait NotificationExt {
    async fn save_notification(
        &self,
        user_id: Uuid,
        notification_type: NotificationType,
        title: String,
        description: Option<String>,
        message: Option<String>,
        action_url: Option<String>,
    ) -> Result<Notification, Error>;

    async fn get_notifications_by_user(&self, user_id: Uuid) -> Result<Vec<Notification>, Error>;

    async fn get_unread_notifications_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Notification>, Error>;

    async fn count_unread_notifications(&self, user_id: Uuid) -> Result<i64, Error>;

    async fn mark_notification_read(
        &self,
        notification_id: Uuid,
    ) -> Result<Option<Notification>, Error>;

    async fn mark_all_notifications_read(&self, user_id: Uuid) -> Result<u64, Error>;

    async fn delete_notification(&self, notification_id: Uuid) -> Result<u64, Error>;

    async fn get_notifications_by_type(
        &self,
        user_id: Uuid,
        notification_type: NotificationType,
    ) -> Result<Vec<Notification>, Error>;
}

#[async_trait]
impl NotificationExt for DBClient {
    async fn save_notification(
        &self,
        user_id: Uuid,
        notification_type: NotificationType,
        title: String,
        description: Option<String>,
        message: Option<String>,
        action_url: Option<String>,
    ) -> Result<Notification, Error> {
        sqlx::query_as::<_, Notification>(&format!(
            r#"
            INSERT INTO notifications
                (user_id, notification_type, title, description, message, action_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {NOTIFICATION_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(notification_type)
        .bind(title)
        .bind(description)
        .bind(message)
        .bind(action_url)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_notifications_by_user(&self, user_id: Uuid) -> Result<Vec<Notification>, Error> {
        sqlx::query_as::<_, Notification>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_unread_notifications_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Notification>, Error> {
        sqlx::query_as::<_, Notification>(&format!(
            r#"
            SELECT {NOTIFICATION_COLUMNS} FROM notifications
            WHERE user_id = $1 AND read = false
            ORDER BY created_at DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn count_unread_notifications(&self, user_id: Uuid) -> Result<i64, Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND read = false",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn mark_notification_read(
        &self,
        notification_id: Uuid,
    ) -> Result<Option<Notification>, Error> {
        sqlx::query_as::<_, Notification>(&format!(
            r#"
            UPDATE notifications
            SET read = true, read_at = NOW()
            WHERE id = $1
            RETURNING {NOTIFICATION_COLUMNS}
            "#
        ))
        .bind(notification_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn mark_all_notifications_read(&self, user_id: Uuid) -> Result<u64, Error> {
        let result = sqlx::query(
            r#"
            UPDATE notifications
            SET read = true, read_at = NOW()
            WHERE user_id = $1 AND read = false
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_notification(&self, notification_id: Uuid) -> Result<u64, Error> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(notification_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn get_notifications_by_type(
        &self,
        user_id: Uuid,
        notification_type: NotificationType,
    ) -> Result<Vec<Notification>, Error> {
        sqlx::query_as::<_, Notification>(&format!(
            r#"
            SELECT {NOTIFICATION_COLUMNS} FROM notifications
            WHERE user_id = $1 AND notification_type = $2
            ORDER BY created_at DESC
            "#
        ))
        .bind(user_id)
        .bind(notification_type)
        .fetch_all(&self.pool)
        .await
    }
}
