//! Notification data repository.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::notification::{
    CreateNotificationParam, Notification, NotificationCounts,
};

pub struct NotificationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> NotificationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an unread notification.
    ///
    /// The JSON payload is stored as text.
    pub async fn create(&self, param: CreateNotificationParam) -> Result<Notification, DbErr> {
        let entity = entity::notification::ActiveModel {
            user_id: ActiveValue::Set(param.user_id),
            kind: ActiveValue::Set(param.kind.to_string()),
            title: ActiveValue::Set(param.title),
            message: ActiveValue::Set(param.message),
            data: ActiveValue::Set(param.data.map(|d| d.to_string())),
            read: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Notification::from_entity(entity))
    }

    /// Finds a notification by id.
    pub async fn find_by_id(&self, notification_id: i32) -> Result<Option<Notification>, DbErr> {
        let entity = entity::prelude::Notification::find_by_id(notification_id)
            .one(self.db)
            .await?;

        Ok(entity.map(Notification::from_entity))
    }

    /// Gets a user's notifications, newest first.
    ///
    /// # Arguments
    /// - `user_id` - Recipient
    /// - `unread_only` - Skip notifications already marked read
    pub async fn get_by_user(
        &self,
        user_id: i32,
        unread_only: bool,
    ) -> Result<Vec<Notification>, DbErr> {
        let mut query = entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id));

        if unread_only {
            query = query.filter(entity::notification::Column::Read.eq(false));
        }

        let entities = query
            .order_by_desc(entity::notification::Column::CreatedAt)
            .order_by_desc(entity::notification::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Notification::from_entity).collect())
    }

    /// Counts a user's unread and total notifications.
    pub async fn counts(&self, user_id: i32) -> Result<NotificationCounts, DbErr> {
        let total = entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .count(self.db)
            .await?;

        let unread = entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::Read.eq(false))
            .count(self.db)
            .await?;

        Ok(NotificationCounts { unread, total })
    }

    /// Marks one notification read.
    pub async fn mark_read(&self, notification_id: i32) -> Result<(), DbErr> {
        entity::prelude::Notification::update_many()
            .filter(entity::notification::Column::Id.eq(notification_id))
            .col_expr(entity::notification::Column::Read, Expr::value(true))
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Marks every unread notification of a user read.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of notifications that changed
    pub async fn mark_all_read(&self, user_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Notification::update_many()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::Read.eq(false))
            .col_expr(entity::notification::Column::Read, Expr::value(true))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Deletes a notification.
    pub async fn delete(&self, notification_id: i32) -> Result<(), DbErr> {
        entity::prelude::Notification::delete_by_id(notification_id)
            .exec(self.db)
            .await?;
        Ok(())
    }
}
