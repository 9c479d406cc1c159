// db/chatbotdb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::chatbotmodel::ChatbotConversation;

const CONVERSATION_COLUMNS: &str = "id, user_id, event_id, message, response, timestamp";

#[async_trait]
pub trait ChatbotExt {
    async fn get_conversations(&self) -> Result<Vec<ChatbotConversation>, Error>;

    async fn get_conversation(
        &self,
        conversation_id: Uuid,
    ) -> Result<Option<ChatbotConversation>, Error>;

    async fn save_conversation(
        &self,
        user_id: Option<Uuid>,
        event_id: Option<Uuid>,
        message: String,
        response: Option<String>,
    ) -> Result<ChatbotConversation, Error>;

    async fn delete_conversation(&self, conversation_id: Uuid) -> Result<u64, Error>;
}

#[async_trait]
impl ChatbotExt for DBClient {
    async fn get_conversations(&self) -> Result<Vec<ChatbotConversation>, Error> {
        sqlx::query_as::<_, ChatbotConversation>(&format!(
            "SELECT {CONVERSATION_COLUMNS} FROM chatbot_conversations ORDER BY timestamp DESC"
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn get_conversation(
        &self,
        conversation_id: Uuid,
    ) -> Result<Option<ChatbotConversation>, Error> {
        sqlx::query_as::<_, ChatbotConversation>(&format!(
            "SELECT {CONVERSATION_COLUMNS} FROM chatbot_conversations WHERE id = $1"
        ))
        .bind(conversation_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn save_conversation(
        &self,
        user_id: Option<Uuid>,
        event_id: Option<Uuid>,
        message: String,
        response: Option<String>,
    ) -> Result<ChatbotConversation, Error> {
        sqlx::query_as::<_, ChatbotConversation>(&format!(
            r#"
            INSERT INTO chatbot_conversations (user_id, event_id, message, response)
            VALUES ($1, $2, $3, $4)
            RETURNING {CONVERSATION_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(event_id)
        .bind(message)
        .bind(response)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_conversation(&self, conversation_id: Uuid) -> Result<u64, Error> {
        let result = sqlx::query("DELETE FROM chatbot_conversations WHERE id = $1")
            .bind(conversation_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
