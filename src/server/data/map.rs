//! Map data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::server::{
    error::AppError,
    model::map::{CreateMapParam, Map},
};

pub struct MapRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MapRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new map.
    ///
    /// # Returns
    /// - `Ok(Map)` - The created map
    /// - `Err(AppError::DbErr)` - Database error during insert
    pub async fn create(&self, param: CreateMapParam) -> Result<Map, AppError> {
        let entity = entity::map::ActiveModel {
            name: ActiveValue::Set(param.name),
            map_type: ActiveValue::Set(param.map_type.as_str().to_string()),
            creator_id: ActiveValue::Set(param.creator_id),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Map::from_entity(entity)
    }

    /// Finds a map by id.
    ///
    /// # Returns
    /// - `Ok(Some(Map))` - Map found
    /// - `Ok(None)` - No map with that id
    /// - `Err(AppError)` - Database error or unrecognised stored map type
    pub async fn find_by_id(&self, map_id: i32) -> Result<Option<Map>, AppError> {
        entity::prelude::Map::find_by_id(map_id)
            .one(self.db)
            .await?
            .map(Map::from_entity)
            .transpose()
    }

    /// Gets maps created by a user, ordered by id.
    pub async fn get_by_creator(&self, user_id: i32) -> Result<Vec<Map>, AppError> {
        entity::prelude::Map::find()
            .filter(entity::map::Column::CreatorId.eq(user_id))
            .order_by_asc(entity::map::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Map::from_entity)
            .collect()
    }

    /// Gets maps a user participates in, ordered by id.
    pub async fn get_by_participant(&self, user_id: i32) -> Result<Vec<Map>, AppError> {
        entity::prelude::Map::find()
            .inner_join(entity::prelude::MapParticipant)
            .filter(entity::map_participant::Column::UserId.eq(user_id))
            .distinct()
            .order_by_asc(entity::map::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Map::from_entity)
            .collect()
    }

    /// Deletes a map row.
    ///
    /// Points and participants must be removed first.
    pub async fn delete(&self, map_id: i32) -> Result<(), AppError> {
        entity::prelude::Map::delete_by_id(map_id)
            .exec(self.db)
            .await?;
        Ok(())
    }
}
