//! Notification service for business logic.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::notification::NotificationRepository,
    error::AppError,
    model::notification::{Notification, NotificationCounts},
};

pub struct NotificationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the user's notifications, newest first.
    pub async fn list(&self, user_id: i32, unread_only: bool) -> Result<Vec<Notification>, AppError> {
        let notifications = NotificationRepository::new(self.db)
            .get_by_user(user_id, unread_only)
            .await?;
        Ok(notifications)
    }

    pub async fn counts(&self, user_id: i32) -> Result<NotificationCounts, AppError> {
        let counts = NotificationRepository::new(self.db).counts(user_id).await?;
        Ok(counts)
    }

    /// Marks one of the user's notifications read.
    ///
    /// # Returns
    /// - `Ok(())` - Marked read (also when it already was)
    /// - `Err(AppError::NotFound)` - No such notification for this user
    pub async fn mark_read(&self, notification_id: i32, user_id: i32) -> Result<(), AppError> {
        self.find_owned(notification_id, user_id).await?;

        NotificationRepository::new(self.db)
            .mark_read(notification_id)
            .await?;
        Ok(())
    }

    /// Marks all of the user's notifications read.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of notifications that were unread
    pub async fn mark_all_read(&self, user_id: i32) -> Result<u64, AppError> {
        let updated = NotificationRepository::new(self.db)
            .mark_all_read(user_id)
            .await?;
        Ok(updated)
    }

    /// Deletes one of the user's notifications.
    ///
    /// # Returns
    /// - `Ok(())` - Deleted
    /// - `Err(AppError::NotFound)` - No such notification for this user
    pub async fn delete(&self, notification_id: i32, user_id: i32) -> Result<(), AppError> {
        self.find_owned(notification_id, user_id).await?;

        NotificationRepository::new(self.db)
            .delete(notification_id)
            .await?;
        Ok(())
    }

    /// Another user's notification is reported as missing, not forbidden.
    async fn find_owned(&self, notification_id: i32, user_id: i32) -> Result<Notification, AppError> {
        NotificationRepository::new(self.db)
            .find_by_id(notification_id)
            .await?
            .filter(|n| n.user_id == user_id)
            .ok_or_else(|| AppError::NotFound("Notification not found".to_string()))
    }
}
