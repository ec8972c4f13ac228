//! Map participant factory for creating test membership entities.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test map memberships.
///
/// Both the map and the user must already exist in the database.
pub struct MapParticipantFactory<'a> {
    db: &'a DatabaseConnection,
    map_id: i32,
    user_id: i32,
    role: String,
    assigned_color: String,
}

impl<'a> MapParticipantFactory<'a> {
    /// Creates a new MapParticipantFactory with default values.
    ///
    /// Defaults:
    /// - role: `"Collaborator"`
    /// - assigned_color: `"#EF4444"`
    pub fn new(db: &'a DatabaseConnection, map_id: i32, user_id: i32) -> Self {
        Self {
            db,
            map_id,
            user_id,
            role: "Collaborator".to_string(),
            assigned_color: "#EF4444".to_string(),
        }
    }

    /// Sets the participant role.
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Sets the participant color.
    pub fn assigned_color(mut self, color: impl Into<String>) -> Self {
        self.assigned_color = color.into();
        self
    }

    /// Builds and inserts the participant entity into the database.
    pub async fn build(self) -> Result<entity::map_participant::Model, DbErr> {
        entity::map_participant::ActiveModel {
            map_id: ActiveValue::Set(self.map_id),
            user_id: ActiveValue::Set(self.user_id),
            role: ActiveValue::Set(self.role),
            assigned_color: ActiveValue::Set(self.assigned_color),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Adds `user_id` to `map_id` as a collaborator.
pub async fn create_participant(
    db: &DatabaseConnection,
    map_id: i32,
    user_id: i32,
) -> Result<entity::map_participant::Model, DbErr> {
    MapParticipantFactory::new(db, map_id, user_id).build().await
}
