// service/notification_service.rs
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::{db::DBClient, notificationdb::NotificationExt, userdb::UserExt},
    models::notificationmodel::{Notification, NotificationType},
    service::error::ServiceError,
};

#[derive(Debug, Clone)]
pub struct NotificationService {
    db_client: Arc<DBClient>,
}

impl NotificationService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn create_notification(
        &self,
        user_id: Uuid,
        notification_type: NotificationType,
        title: String,
        description: String,
        action_url: String,
    ) -> Result<Notification, ServiceError> {
        self.db_client
            .get_user(Some(user_id), None, None)
            .await?
            .ok_or(ServiceError::UserNotFound(user_id))?;

        let notification = self
            .db_client
            .save_notification(
                user_id,
                notification_type,
                title,
                Some(description.clone()),
                // Mirrors description for clients that read `message`
                Some(description),
                Some(action_url),
            )
            .await?;

        Ok(notification)
    }

    pub async fn notifications_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Notification>, ServiceError> {
        let notifications = self.db_client.get_notifications_by_user(user_id).await?;
        Ok(notifications)
    }

    pub async fn unread_count(&self, user_id: Uuid) -> Result<i64, ServiceError> {
        let count = self.db_client.count_unread_notifications(user_id).await?;
        Ok(count)
    }

    pub async fn mark_as_read(&self, notification_id: Uuid) -> Result<Notification, ServiceError> {
        self.db_client
            .mark_notification_read(notification_id)
            .await?
            .ok_or(ServiceError::NotificationNotFound(notification_id))
    }

    pub async fn mark_all_as_read(&self, user_id: Uuid) -> Result<u64, ServiceError> {
        let updated = self.db_client.mark_all_notifications_read(user_id).await?;
        Ok(updated)
    }

    pub async fn delete_notification(&self, notification_id: Uuid) -> Result<(), ServiceError> {
        let deleted = self.db_client.delete_notification(notification_id).await?;
        if deleted == 0 {
            return Err(ServiceError::NotificationNotFound(notification_id));
        }
        Ok(())
    }

    pub async fn notifications_by_type(
        &self,
        user_id: Uuid,
        notification_type: NotificationType,
    ) -> Result<Vec<Notification>, ServiceError> {
        let notifications = self
            .db_client
            .get_notifications_by_type(user_id, notification_type)
            .await?;
        Ok(notifications)
    }

    pub async fn notify_event(
        &self,
        user_id: Uuid,
        event_name: &str,
        action: &str,
        event_id: Uuid,
    ) -> Result<Notification, ServiceError> {
        self.create_notification(
            user_id,
            NotificationType::Event,
            format!("Event {}", action),
            format!(
                "Your event \"{}\" has been {}",
                event_name,
                action.to_lowercase()
            ),
            format!("/event/{}", event_id),
        )
        .await
    }

    pub async fn notify_contract(
        &self,
        user_id: Uuid,
        vendor_name: &str,
        action: &str,
        contract_id: Uuid,
    ) -> Result<Notification, ServiceError> {
        self.create_notification(
            user_id,
            NotificationType::Contract,
            format!("Contract {}", action),
            format!(
                "{} {} you a contract for review",
                vendor_name,
                action.to_lowercase()
            ),
            format!("/contract/review?contractId={}", contract_id),
        )
        .await
    }

    pub async fn notify_message(
        &self,
        user_id: Uuid,
        sender_name: &str,
        chat_id: Uuid,
    ) -> Result<Notification, ServiceError> {
        self.create_notification(
            user_id,
            NotificationType::Message,
            "New Message".to_string(),
            format!("{} sent you a message", sender_name),
            format!("/messages?chatId={}", chat_id),
        )
        .await
    }

    pub async fn notify_payment(
        &self,
        user_id: Uuid,
        amount: f64,
        action: &str,
        contract_id: Uuid,
    ) -> Result<Notification, ServiceError> {
        self.create_notification(
            user_id,
            NotificationType::Payment,
            format!("Payment {}", action),
            format!(
                "Payment of Rs. {:.2} has been {} successfully",
                amount,
                action.to_lowercase()
            ),
            format!("/contract/review?contractId={}", contract_id),
        )
        .await
    }
}
