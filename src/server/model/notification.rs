//! Notification domain models and parameters.

use chrono::{DateTime, Utc};

use crate::model::notification::{NotificationCountDto, NotificationDto};

/// A participant left a map; sent to the map's creator.
pub const KIND_LEAVE: &str = "leave";
/// New badges were unlocked; sent to the point's owner.
pub const KIND_ACHIEVEMENT: &str = "achievement";
/// The map's owner invited the recipient; accepting it joins the map.
pub const KIND_INVITE: &str = "invite";
/// The map's owner removed the recipient from a map.
pub const KIND_REMOVED: &str = "removed";

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: i32,
    pub user_id: i32,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub data: Option<serde_json::Value>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Converts an entity model at the repository boundary.
    ///
    /// Payloads that are not valid JSON are surfaced as `{"raw": "<payload>"}`.
    pub fn from_entity(entity: entity::notification::Model) -> Self {
        let data = entity.data.map(|raw| {
            serde_json::from_str(&raw).unwrap_or_else(|_| serde_json::json!({ "raw": raw }))
        });

        Self {
            id: entity.id,
            user_id: entity.user_id,
            kind: entity.kind,
            title: entity.title,
            message: entity.message,
            data,
            read: entity.read,
            created_at: entity.created_at,
        }
    }

    /// Map the notification refers to, read from its `map_id` payload field.
    pub fn map_id(&self) -> Option<i32> {
        self.data
            .as_ref()?
            .get("map_id")?
            .as_i64()
            .and_then(|id| i32::try_from(id).ok())
    }

    pub fn into_dto(self) -> NotificationDto {
        NotificationDto {
            id: self.id,
            kind: self.kind,
            title: self.title,
            message: self.message,
            data: self.data,
            read: self.read,
            created_at: self.created_at,
        }
    }
}

/// Parameters for creating a notification.
#[derive(Debug, Clone)]
pub struct CreateNotificationParam {
    pub user_id: i32,
    pub kind: &'static str,
    pub title: String,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Unread and total notification counts for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationCounts {
    pub unread: u64,
    pub total: u64,
}

impl NotificationCounts {
    pub fn into_dto(self) -> NotificationCountDto {
        NotificationCountDto {
            unread: self.unread,
            total: self.total,
        }
    }
}
