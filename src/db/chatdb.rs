// db/chatdb.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::chatmodels::{Chat, Message, SenderType};

const CHAT_COLUMNS: &str = "id, vendor_id, user_id, vendor2_id, last_message, last_message_at, \
     is_pinned, is_system_chat, created_at, updated_at";

const MESSAGE_COLUMNS: &str = "id, chat_id, sender_id, sender_type, content, status, created_at";

#[async_trait]
pub trait ChatExt {
    // Chat management
    async fn get_chat_by_id(&self, chat_id: Uuid) -> Result<Option<Chat>, Error>;

    async fn get_vendor_user_chat(
        &self,
        vendor_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Chat>, Error>;

    /// Vendor pairs are unordered: the chat is matched in either direction.
    async fn get_vendor_vendor_chat(
        &self,
        vendor_one_id: Uuid,
        vendor_two_id: Uuid,
    ) -> Result<Option<Chat>, Error>;

    async fn save_vendor_user_chat(&self, vendor_id: Uuid, user_id: Uuid) -> Result<Chat, Error>;

    async fn save_vendor_vendor_chat(
        &self,
        vendor_one_id: Uuid,
        vendor_two_id: Uuid,
    ) -> Result<Chat, Error>;

    async fn get_chats_by_user(&self, user_id: Uuid) -> Result<Vec<Chat>, Error>;

    async fn get_chats_by_vendor(&self, vendor_id: Uuid) -> Result<Vec<Chat>, Error>;

    async fn get_system_chat_for_user(&self, user_id: Uuid) -> Result<Option<Chat>, Error>;

    async fn get_system_chat_for_vendor(&self, vendor_id: Uuid) -> Result<Option<Chat>, Error>;

    async fn save_system_chat_for_user(
        &self,
        support_vendor_id: Uuid,
        user_id: Uuid,
        welcome_message: &str,
    ) -> Result<Chat, Error>;

    async fn save_system_chat_for_vendor(
        &self,
        vendor_id: Uuid,
        support_vendor_id: Uuid,
        welcome_message: &str,
    ) -> Result<Chat, Error>;

    async fn get_system_chats(&self) -> Result<Vec<Chat>, Error>;

    // Message management
    async fn save_message(
        &self,
        chat_id: Uuid,
        sender_id: Uuid,
        sender_type: SenderType,
        content: String,
        last_message_preview: String,
    ) -> Result<Message, Error>;

    async fn get_chat_messages(&self, chat_id: Uuid) -> Result<Vec<Message>, Error>;

    async fn get_message_by_id(&self, message_id: Uuid) -> Result<Option<Message>, Error>;

    /// Flips every message not authored by the participant and not already
    /// seen. The status filter keeps the transition one-way.
    async fn mark_messages_seen(&self, chat_id: Uuid, participant_id: Uuid) -> Result<u64, Error>;

    async fn get_unread_messages(
        &self,
        chat_id: Uuid,
        participant_id: Uuid,
    ) -> Result<Vec<Message>, Error>;

    async fn count_unread_messages(
        &self,
        chat_id: Uuid,
        participant_id: Uuid,
    ) -> Result<i64, Error>;

    async fn get_recent_messages_by_sender(
        &self,
        sender_id: Uuid,
        sender_type: SenderType,
        since: DateTime<Utc>,
    ) -> Result<Vec<Message>, Error>;
}

#[async_trait]
impl ChatExt for DBClient {
    async fn get_chat_by_id(&self, chat_id: Uuid) -> Result<Option<Chat>, Error> {
        sqlx::query_as::<_, Chat>(&format!("SELECT {CHAT_COLUMNS} FROM chats WHERE id = $1"))
            .bind(chat_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_vendor_user_chat(
        &self,
        vendor_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Chat>, Error> {
        sqlx::query_as::<_, Chat>(&format!(
            r#"
            SELECT {CHAT_COLUMNS} FROM chats
            WHERE vendor_id = $1 AND user_id = $2 AND vendor2_id IS NULL
              AND is_system_chat = false
            "#
        ))
        .bind(vendor_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_vendor_vendor_chat(
        &self,
        vendor_one_id: Uuid,
        vendor_two_id: Uuid,
    ) -> Result<Option<Chat>, Error> {
        sqlx::query_as::<_, Chat>(&format!(
            r#"
            SELECT {CHAT_COLUMNS} FROM chats
            WHERE ((vendor_id = $1 AND vendor2_id = $2)
                OR (vendor_id = $2 AND vendor2_id = $1))
              AND is_system_chat = false
            "#
        ))
        .bind(vendor_one_id)
        .bind(vendor_two_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn save_vendor_user_chat(&self, vendor_id: Uuid, user_id: Uuid) -> Result<Chat, Error> {
        sqlx::query_as::<_, Chat>(&format!(
            r#"
            INSERT INTO chats (vendor_id, user_id)
            VALUES ($1, $2)
            RETURNING {CHAT_COLUMNS}
            "#
        ))
        .bind(vendor_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn save_vendor_vendor_chat(
        &self,
        vendor_one_id: Uuid,
        vendor_two_id: Uuid,
    ) -> Result<Chat, Error> {
        sqlx::query_as::<_, Chat>(&format!(
            r#"
            INSERT INTO chats (vendor_id, vendor2_id)
            VALUES ($1, $2)
            RETURNING {CHAT_COLUMNS}
            "#
        ))
        .bind(vendor_one_id)
        .bind(vendor_two_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_chats_by_user(&self, user_id: Uuid) -> Result<Vec<Chat>, Error> {
        sqlx::query_as::<_, Chat>(&format!(
            r#"
            SELECT {CHAT_COLUMNS} FROM chats
            WHERE user_id = $1
            ORDER BY is_pinned DESC, last_message_at DESC NULLS LAST, created_at DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_chats_by_vendor(&self, vendor_id: Uuid) -> Result<Vec<Chat>, Error> {
        sqlx::query_as::<_, Chat>(&format!(
            r#"
            SELECT {CHAT_COLUMNS} FROM chats
            WHERE vendor_id = $1 OR vendor2_id = $1
            ORDER BY is_pinned DESC, last_message_at DESC NULLS LAST, created_at DESC
            "#
        ))
        .bind(vendor_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_system_chat_for_user(&self, user_id: Uuid) -> Result<Option<Chat>, Error> {
        sqlx::query_as::<_, Chat>(&format!(
            "SELECT {CHAT_COLUMNS} FROM chats WHERE user_id = $1 AND is_system_chat = true"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_system_chat_for_vendor(&self, vendor_id: Uuid) -> Result<Option<Chat>, Error> {
        sqlx::query_as::<_, Chat>(&format!(
            r#"
            SELECT {CHAT_COLUMNS} FROM chats
            WHERE vendor_id = $1 AND user_id IS NULL AND is_system_chat = true
            "#
        ))
        .bind(vendor_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn save_system_chat_for_user(
        &self,
        support_vendor_id: Uuid,
        user_id: Uuid,
        welcome_message: &str,
    ) -> Result<Chat, Error> {
        // Guarded by the partial unique index on (user_id) for system chats,
        // so concurrent provisioning collapses to a single row.
        sqlx::query(
            r#"
            INSERT INTO chats
                (vendor_id, user_id, is_pinned, is_system_chat, last_message, last_message_at)
            VALUES ($1, $2, true, true, $3, NOW())
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(support_vendor_id)
        .bind(user_id)
        .bind(welcome_message)
        .execute(&self.pool)
        .await?;

        sqlx::query_as::<_, Chat>(&format!(
            "SELECT {CHAT_COLUMNS} FROM chats WHERE user_id = $1 AND is_system_chat = true"
        ))
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn save_system_chat_for_vendor(
        &self,
        vendor_id: Uuid,
        support_vendor_id: Uuid,
        welcome_message: &str,
    ) -> Result<Chat, Error> {
        sqlx::query(
            r#"
            INSERT INTO chats
                (vendor_id, vendor2_id, is_pinned, is_system_chat, last_message, last_message_at)
            VALUES ($1, $2, true, true, $3, NOW())
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(vendor_id)
        .bind(support_vendor_id)
        .bind(welcome_message)
        .execute(&self.pool)
        .await?;

        sqlx::query_as::<_, Chat>(&format!(
            r#"
            SELECT {CHAT_COLUMNS} FROM chats
            WHERE vendor_id = $1 AND user_id IS NULL AND is_system_chat = true
            "#
        ))
        .bind(vendor_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_system_chats(&self) -> Result<Vec<Chat>, Error> {
        sqlx::query_as::<_, Chat>(&format!(
            r#"
            SELECT {CHAT_COLUMNS} FROM chats
            WHERE is_system_chat = true
            ORDER BY COALESCE(last_message_at, created_at) DESC
            "#
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn save_message(
        &self,
        chat_id: Uuid,
        sender_id: Uuid,
        sender_type: SenderType,
        content: String,
        last_message_preview: String,
    ) -> Result<Message, Error> {
        let mut tx = self.pool.begin().await?;

        let message = sqlx::query_as::<_, Message>(&format!(
            r#"
            INSERT INTO messages (chat_id, sender_id, sender_type, content)
            VALUES ($1, $2, $3, $4)
            RETURNING {MESSAGE_COLUMNS}
            "#
        ))
        .bind(chat_id)
        .bind(sender_id)
        .bind(sender_type)
        .bind(content)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE chats
            SET last_message = $2, last_message_at = NOW(), updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(chat_id)
        .bind(last_message_preview)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(message)
    }

    async fn get_chat_messages(&self, chat_id: Uuid) -> Result<Vec<Message>, Error> {
        sqlx::query_as::<_, Message>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE chat_id = $1 ORDER BY created_at ASC"
        ))
        .bind(chat_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_message_by_id(&self, message_id: Uuid) -> Result<Option<Message>, Error> {
        sqlx::query_as::<_, Message>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE id = $1"
        ))
        .bind(message_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn mark_messages_seen(&self, chat_id: Uuid, participant_id: Uuid) -> Result<u64, Error> {
        let result = sqlx::query(
            r#"
            UPDATE messages
            SET status = 'seen'::message_status
            WHERE chat_id = $1
              AND sender_id != $2
              AND status != 'seen'::message_status
            "#,
        )
        .bind(chat_id)
        .bind(participant_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn get_unread_messages(
        &self,
        chat_id: Uuid,
        participant_id: Uuid,
    ) -> Result<Vec<Message>, Error> {
        sqlx::query_as::<_, Message>(&format!(
            r#"
            SELECT {MESSAGE_COLUMNS} FROM messages
            WHERE chat_id = $1
              AND sender_id != $2
              AND status != 'seen'::message_status
            ORDER BY created_at ASC
            "#
        ))
        .bind(chat_id)
        .bind(participant_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn count_unread_messages(
        &self,
        chat_id: Uuid,
        participant_id: Uuid,
    ) -> Result<i64, Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM messages
            WHERE chat_id = $1
              AND sender_id != $2
              AND status != 'seen'::message_status
            "#,
        )
        .bind(chat_id)
        .bind(participant_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_recent_messages_by_sender(
        &self,
        sender_id: Uuid,
        sender_type: SenderType,
        since: DateTime<Utc>,
    ) -> Result<Vec<Message>, Error> {
        sqlx::query_as::<_, Message>(&format!(
            r#"
            SELECT {MESSAGE_COLUMNS} FROM messages
            WHERE sender_id = $1 AND sender_type = $2 AND created_at > $3
            ORDER BY created_at DESC
            "#
        ))
        .bind(sender_id)
        .bind(sender_type)
        .bind(since)
        .fetch_all(&self.pool)
        .await
    }
}
