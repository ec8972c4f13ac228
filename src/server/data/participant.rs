//! Map participant data repository.

use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};

use crate::server::{
    error::AppError,
    model::map::{CreateParticipantParam, MapParticipant},
};

pub struct MapParticipantRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MapParticipantRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Adds a membership.
    ///
    /// # Returns
    /// - `Ok(MapParticipant)` - The created membership, without username
    /// - `Err(AppError::DbErr)` - Database error, including a duplicate membership
    pub async fn create(&self, param: CreateParticipantParam) -> Result<MapParticipant, AppError> {
        let entity = entity::map_participant::ActiveModel {
            map_id: ActiveValue::Set(param.map_id),
            user_id: ActiveValue::Set(param.user_id),
            role: ActiveValue::Set(param.role.as_str().to_string()),
            assigned_color: ActiveValue::Set(param.assigned_color),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        MapParticipant::from_entity(entity, None)
    }

    /// Finds a user's membership of a map.
    pub async fn find(&self, map_id: i32, user_id: i32) -> Result<Option<MapParticipant>, AppError> {
        entity::prelude::MapParticipant::find()
            .filter(entity::map_participant::Column::MapId.eq(map_id))
            .filter(entity::map_participant::Column::UserId.eq(user_id))
            .one(self.db)
            .await?
            .map(|p| MapParticipant::from_entity(p, None))
            .transpose()
    }

    /// Gets a map's memberships with usernames, in join order.
    pub async fn get_by_map(&self, map_id: i32) -> Result<Vec<MapParticipant>, AppError> {
        entity::prelude::MapParticipant::find()
            .filter(entity::map_participant::Column::MapId.eq(map_id))
            .order_by_asc(entity::map_participant::Column::Id)
            .find_also_related(entity::prelude::User)
            .all(self.db)
            .await?
            .into_iter()
            .map(|(participant, user)| MapParticipant::from_entity(participant, user))
            .collect()
    }

    /// Counts a map's memberships.
    pub async fn count_by_map(&self, map_id: i32) -> Result<u64, AppError> {
        let count = entity::prelude::MapParticipant::find()
            .filter(entity::map_participant::Column::MapId.eq(map_id))
            .count(self.db)
            .await?;
        Ok(count)
    }

    /// Changes the color a member's points and routes are drawn in.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of memberships updated (0 or 1)
    pub async fn update_color(&self, map_id: i32, user_id: i32, color: &str) -> Result<u64, AppError> {
        let result = entity::prelude::MapParticipant::update_many()
            .filter(entity::map_participant::Column::MapId.eq(map_id))
            .filter(entity::map_participant::Column::UserId.eq(user_id))
            .col_expr(
                entity::map_participant::Column::AssignedColor,
                Expr::value(color.to_string()),
            )
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Removes a user's membership of a map.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of memberships removed (0 or 1)
    pub async fn delete(&self, map_id: i32, user_id: i32) -> Result<u64, AppError> {
        let result = entity::prelude::MapParticipant::delete_many()
            .filter(entity::map_participant::Column::MapId.eq(map_id))
            .filter(entity::map_participant::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Removes every membership of a map.
    pub async fn delete_by_map(&self, map_id: i32) -> Result<u64, AppError> {
        let result = entity::prelude::MapParticipant::delete_many()
            .filter(entity::map_participant::Column::MapId.eq(map_id))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
