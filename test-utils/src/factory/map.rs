//! Map factory for creating test map entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test maps with customizable fields.
///
/// The creator must already exist in the database.
pub struct MapFactory<'a> {
    db: &'a DatabaseConnection,
    creator_id: i32,
    name: String,
    map_type: String,
}

impl<'a> MapFactory<'a> {
    /// Creates a new MapFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Map {id}"`
    /// - map_type: `"Collaborative"`
    pub fn new(db: &'a DatabaseConnection, creator_id: i32) -> Self {
        Self {
            db,
            creator_id,
            name: format!("Map {}", next_id()),
            map_type: "Collaborative".to_string(),
        }
    }

    /// Sets the name for the map.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the map type (`Collaborative`, `Competitive` or `Personal`).
    pub fn map_type(mut self, map_type: impl Into<String>) -> Self {
        self.map_type = map_type.into();
        self
    }

    /// Builds and inserts the map entity into the database.
    pub async fn build(self) -> Result<entity::map::Model, DbErr> {
        entity::map::ActiveModel {
            name: ActiveValue::Set(self.name),
            map_type: ActiveValue::Set(self.map_type),
            creator_id: ActiveValue::Set(self.creator_id),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a collaborative map owned by `creator_id`.
pub async fn create_map(
    db: &DatabaseConnection,
    creator_id: i32,
) -> Result<entity::map::Model, DbErr> {
    MapFactory::new(db, creator_id).build().await
}
