// service/chat_service.rs
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::{chatdb::ChatExt, db::DBClient, userdb::UserExt, vendordb::VendorExt},
    dtos::chatdtos::{CreateChatDto, SendMessageDto},
    models::{
        chatmodels::{Chat, Message, SenderType},
        vendormodels::Vendor,
    },
    service::error::ServiceError,
    utils::password,
};

// Platform support account. Provisioned lazily, guarded by unique
// constraints so concurrent first calls collapse to one row.
const SUPPORT_COMPANY_NAME: &str = "Eventure Support";
const SUPPORT_SERVICE_TYPE: &str = "Customer Support";
const SUPPORT_ADDRESS: &str = "Online";
const SUPPORT_USERNAME: &str = "eventure_support";
const SUPPORT_EMAIL: &str = "support@eventure.io";
const SUPPORT_PASSWORD: &str = "EventureSupport2024!";

const WELCOME_MESSAGE: &str = "Welcome to Eventure Support! How can we help you today?";
const AUTO_REPLY_MESSAGE: &str = "Thank you for your message. We will contact you soon.";

const PREVIEW_MAX_CHARS: usize = 50;

#[derive(Debug, Clone)]
pub struct ChatService {
    db_client: Arc<DBClient>,
}

impl ChatService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    /// Create-or-get a chat. vendor2_id present means vendor-to-vendor,
    /// matched in either direction; otherwise vendor-to-user.
    pub async fn create_or_get_chat(&self, dto: &CreateChatDto) -> Result<Chat, ServiceError> {
        if let Some(vendor2_id) = dto.vendor2_id {
            let vendor_id = dto.vendor_id.ok_or_else(|| {
                ServiceError::Validation(
                    "Both vendor IDs are required for vendor-to-vendor chat".to_string(),
                )
            })?;

            if let Some(chat) = self
                .db_client
                .get_vendor_vendor_chat(vendor_id, vendor2_id)
                .await?
            {
                return Ok(chat);
            }

            self.require_vendor(vendor_id).await?;
            self.require_vendor(vendor2_id).await?;

            let chat = self
                .db_client
                .save_vendor_vendor_chat(vendor_id, vendor2_id)
                .await?;
            Ok(chat)
        } else {
            let (vendor_id, user_id) = match (dto.vendor_id, dto.user_id) {
                (Some(vendor_id), Some(user_id)) => (vendor_id, user_id),
                _ => {
                    return Err(ServiceError::Validation(
                        "Vendor ID and User ID are required for vendor-to-user chat".to_string(),
                    ))
                }
            };

            if let Some(chat) = self
                .db_client
                .get_vendor_user_chat(vendor_id, user_id)
                .await?
            {
                return Ok(chat);
            }

            self.require_vendor(vendor_id).await?;
            self.db_client
                .get_user(Some(user_id), None, None)
                .await?
                .ok_or(ServiceError::UserNotFound(user_id))?;

            let chat = self
                .db_client
                .save_vendor_user_chat(vendor_id, user_id)
                .await?;
            Ok(chat)
        }
    }

    pub async fn get_chat(&self, chat_id: Uuid) -> Result<Option<Chat>, ServiceError> {
        let chat = self.db_client.get_chat_by_id(chat_id).await?;
        Ok(chat)
    }

    pub async fn get_chat_by_vendor_and_user(
        &self,
        vendor_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Chat>, ServiceError> {
        let chat = self
            .db_client
            .get_vendor_user_chat(vendor_id, user_id)
            .await?;
        Ok(chat)
    }

    /// All chats a vendor participates in. The vendor's support chat is
    /// provisioned on first listing; failure to do so only logs.
    pub async fn chats_by_vendor(&self, vendor_id: Uuid) -> Result<Vec<Chat>, ServiceError> {
        let mut chats = self.db_client.get_chats_by_vendor(vendor_id).await?;

        match self.get_or_create_support_chat_for_vendor(vendor_id).await {
            Ok(support_chat) => {
                if !chats.iter().any(|chat| chat.id == support_chat.id) {
                    chats.push(support_chat);
                }
            }
            Err(err) => {
                tracing::warn!("Support chat provisioning for vendor {vendor_id} failed: {err}");
            }
        }

        Ok(chats)
    }

    pub async fn chats_by_user(&self, user_id: Uuid) -> Result<Vec<Chat>, ServiceError> {
        let mut chats = self.db_client.get_chats_by_user(user_id).await?;

        match self.get_or_create_support_chat_for_user(user_id).await {
            Ok(support_chat) => {
                if !chats.iter().any(|chat| chat.id == support_chat.id) {
                    chats.push(support_chat);
                }
            }
            Err(err) => {
                tracing::warn!("Support chat provisioning for user {user_id} failed: {err}");
            }
        }

        Ok(chats)
    }

    /// Get-or-create the pinned system chat between a user and the platform
    /// support vendor.
    pub async fn get_or_create_support_chat_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Chat, ServiceError> {
        if let Some(chat) = self.db_client.get_system_chat_for_user(user_id).await? {
            return Ok(chat);
        }

        self.db_client
            .get_user(Some(user_id), None, None)
            .await?
            .ok_or(ServiceError::UserNotFound(user_id))?;

        let support_vendor = self.ensure_support_vendor().await?;

        let chat = self
            .db_client
            .save_system_chat_for_user(support_vendor.id, user_id, WELCOME_MESSAGE)
            .await?;
        Ok(chat)
    }

    pub async fn get_or_create_support_chat_for_vendor(
        &self,
        vendor_id: Uuid,
    ) -> Result<Chat, ServiceError> {
        if let Some(chat) = self.db_client.get_system_chat_for_vendor(vendor_id).await? {
            return Ok(chat);
        }

        self.require_vendor(vendor_id).await?;

        let support_vendor = self.ensure_support_vendor().await?;

        let chat = self
            .db_client
            .save_system_chat_for_vendor(vendor_id, support_vendor.id, WELCOME_MESSAGE)
            .await?;
        Ok(chat)
    }

    /// Send a message after validating the sender against the chat's
    /// participants. A user message into a plain vendor-to-user chat gets
    /// one synthetic vendor reply, best-effort.
    pub async fn send_message(&self, dto: &SendMessageDto) -> Result<Message, ServiceError> {
        let chat = self
            .db_client
            .get_chat_by_id(dto.chat_id)
            .await?
            .ok_or(ServiceError::ChatNotFound(dto.chat_id))?;

        let sender_type =
            SenderType::from_str(&dto.sender_type).ok_or(ServiceError::InvalidSenderType)?;

        validate_sender(&chat, dto.sender_id, sender_type)?;

        let message = self
            .db_client
            .save_message(
                chat.id,
                dto.sender_id,
                sender_type,
                dto.content.clone(),
                message_preview(&dto.content),
            )
            .await?;

        if !chat.is_vendor_to_vendor() && !chat.is_system_chat && sender_type == SenderType::User {
            self.send_automated_reply(&chat).await;
        }

        Ok(message)
    }

    /// The auto-reply never fails the original send.
    async fn send_automated_reply(&self, chat: &Chat) {
        let result = self
            .db_client
            .save_message(
                chat.id,
                chat.vendor_id,
                SenderType::Vendor,
                AUTO_REPLY_MESSAGE.to_string(),
                message_preview(AUTO_REPLY_MESSAGE),
            )
            .await;

        if let Err(err) = result {
            tracing::error!("Failed to send automated reply in chat {}: {err}", chat.id);
        }
    }

    pub async fn messages_by_chat(&self, chat_id: Uuid) -> Result<Vec<Message>, ServiceError> {
        let messages = self.db_client.get_chat_messages(chat_id).await?;
        Ok(messages)
    }

    pub async fn get_message(&self, message_id: Uuid) -> Result<Option<Message>, ServiceError> {
        let message = self.db_client.get_message_by_id(message_id).await?;
        Ok(message)
    }

    /// Flip every message from the other side of the chat to seen.
    pub async fn mark_messages_seen(
        &self,
        chat_id: Uuid,
        participant_id: Uuid,
    ) -> Result<(), ServiceError> {
        let chat = self
            .db_client
            .get_chat_by_id(chat_id)
            .await?
            .ok_or(ServiceError::ChatNotFound(chat_id))?;

        if !chat.has_participant(participant_id) {
            return Err(ServiceError::NotChatParticipant);
        }

        self.db_client
            .mark_messages_seen(chat_id, participant_id)
            .await?;
        Ok(())
    }

    pub async fn unread_messages(
        &self,
        chat_id: Uuid,
        participant_id: Uuid,
    ) -> Result<Vec<Message>, ServiceError> {
        self.db_client
            .get_chat_by_id(chat_id)
            .await?
            .ok_or(ServiceError::ChatNotFound(chat_id))?;

        let messages = self
            .db_client
            .get_unread_messages(chat_id, participant_id)
            .await?;
        Ok(messages)
    }

    pub async fn unread_count(
        &self,
        chat_id: Uuid,
        participant_id: Uuid,
    ) -> Result<i64, ServiceError> {
        self.db_client
            .get_chat_by_id(chat_id)
            .await?
            .ok_or(ServiceError::ChatNotFound(chat_id))?;

        let count = self
            .db_client
            .count_unread_messages(chat_id, participant_id)
            .await?;
        Ok(count)
    }

    /// Ensure the support admin user and its vendor profile exist.
    async fn ensure_support_vendor(&self) -> Result<Vendor, ServiceError> {
        let hashed_password = password::hash(SUPPORT_PASSWORD)
            .map_err(|err| ServiceError::Validation(err.to_string()))?;

        let admin = self
            .db_client
            .ensure_support_admin(
                SUPPORT_USERNAME,
                SUPPORT_EMAIL,
                hashed_password,
                SUPPORT_COMPANY_NAME,
            )
            .await?;

        let vendor = self
            .db_client
            .ensure_support_vendor(
                admin.id,
                SUPPORT_COMPANY_NAME,
                SUPPORT_SERVICE_TYPE,
                SUPPORT_ADDRESS,
            )
            .await?;

        Ok(vendor)
    }

    async fn require_vendor(&self, vendor_id: Uuid) -> Result<Vendor, ServiceError> {
        self.db_client
            .get_vendor(vendor_id)
            .await?
            .ok_or(ServiceError::VendorNotFound(vendor_id))
    }
}

fn validate_sender(
    chat: &Chat,
    sender_id: Uuid,
    sender_type: SenderType,
) -> Result<(), ServiceError> {
    let is_vendor_to_vendor = chat.is_vendor_to_vendor();

    if chat.is_system_chat {
        // Either side of a system chat may write, including the support vendor
        return match sender_type {
            SenderType::Vendor => {
                if chat.vendor_id == sender_id || chat.vendor2_id == Some(sender_id) {
                    Ok(())
                } else {
                    Err(ServiceError::SenderMismatch(
                        "Sender ID does not match any vendor in this system chat".to_string(),
                    ))
                }
            }
            SenderType::User => {
                if chat.user_id == Some(sender_id) {
                    Ok(())
                } else {
                    Err(ServiceError::SenderMismatch(
                        "Sender ID does not match the user in this system chat".to_string(),
                    ))
                }
            }
        };
    }

    match sender_type {
        SenderType::Vendor => {
            if is_vendor_to_vendor {
                if chat.vendor_id == sender_id || chat.vendor2_id == Some(sender_id) {
                    Ok(())
                } else {
                    Err(ServiceError::SenderMismatch(
                        "Sender ID does not match either vendor in this chat".to_string(),
                    ))
                }
            } else if chat.vendor_id == sender_id {
                Ok(())
            } else {
                Err(ServiceError::SenderMismatch(
                    "Sender ID does not match the vendor in this chat".to_string(),
                ))
            }
        }
        SenderType::User => {
            if is_vendor_to_vendor {
                return Err(ServiceError::UserInVendorChat);
            }
            if chat.user_id == Some(sender_id) {
                Ok(())
            } else {
                Err(ServiceError::SenderMismatch(
                    "Sender ID does not match the user in this chat".to_string(),
                ))
            }
        }
    }
}

/// Preview shown on the chat list: first 50 characters, ellipsised.
fn message_preview(content: &str) -> String {
    if content.chars().count() > PREVIEW_MAX_CHARS {
        let truncated: String = content.chars().take(PREVIEW_MAX_CHARS).collect();
        format!("{}...", truncated)
    } else {
        content.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn chat(user_id: Option<Uuid>, vendor2_id: Option<Uuid>, is_system_chat: bool) -> Chat {
        let now = Utc::now();
        Chat {
            id: Uuid::new_v4(),
            vendor_id: Uuid::new_v4(),
            user_id,
            vendor2_id,
            last_message: None,
            last_message_at: None,
            is_pinned: is_system_chat,
            is_system_chat,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn short_messages_are_kept_verbatim() {
        assert_eq!(message_preview("hello"), "hello");
        let exactly_fifty = "a".repeat(50);
        assert_eq!(message_preview(&exactly_fifty), exactly_fifty);
    }

    #[test]
    fn long_messages_are_truncated_with_ellipsis() {
        let content = "b".repeat(60);
        let preview = message_preview(&content);
        assert_eq!(preview.len(), 53);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn user_cannot_write_into_vendor_to_vendor_chat() {
        let chat = chat(None, Some(Uuid::new_v4()), false);
        let result = validate_sender(&chat, Uuid::new_v4(), SenderType::User);
        assert!(matches!(result, Err(ServiceError::UserInVendorChat)));
    }

    #[test]
    fn vendor_sender_must_match_the_chat_vendor() {
        let chat = chat(Some(Uuid::new_v4()), None, false);

        assert!(validate_sender(&chat, chat.vendor_id, SenderType::Vendor).is_ok());
        assert!(validate_sender(&chat, Uuid::new_v4(), SenderType::Vendor).is_err());
    }

    #[test]
    fn either_vendor_may_write_in_a_vendor_pair_chat() {
        let vendor2_id = Uuid::new_v4();
        let chat = chat(None, Some(vendor2_id), false);

        assert!(validate_sender(&chat, chat.vendor_id, SenderType::Vendor).is_ok());
        assert!(validate_sender(&chat, vendor2_id, SenderType::Vendor).is_ok());
        assert!(validate_sender(&chat, Uuid::new_v4(), SenderType::Vendor).is_err());
    }

    #[test]
    fn system_chat_accepts_both_sides() {
        let user_id = Uuid::new_v4();
        let chat = chat(Some(user_id), None, true);

        assert!(validate_sender(&chat, chat.vendor_id, SenderType::Vendor).is_ok());
        assert!(validate_sender(&chat, user_id, SenderType::User).is_ok());
        assert!(validate_sender(&chat, Uuid::new_v4(), SenderType::User).is_err());
    }
}
