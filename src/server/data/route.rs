//! Route data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::model::route::{Route, RouteParam};

pub struct RouteRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RouteRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a route between two points.
    pub async fn create(&self, param: RouteParam) -> Result<Route, DbErr> {
        let entity = entity::route::ActiveModel {
            map_id: ActiveValue::Set(param.map_id),
            user_id: ActiveValue::Set(param.user_id),
            start_point_id: ActiveValue::Set(param.start_point_id),
            end_point_id: ActiveValue::Set(param.end_point_id),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Route::from_entity(entity))
    }

    pub async fn find_by_id(&self, route_id: i32) -> Result<Option<Route>, DbErr> {
        let entity = entity::prelude::Route::find_by_id(route_id)
            .one(self.db)
            .await?;

        Ok(entity.map(Route::from_entity))
    }

    /// Gets the routes drawn on a map, ordered by id.
    pub async fn get_by_map(&self, map_id: i32) -> Result<Vec<Route>, DbErr> {
        let entities = entity::prelude::Route::find()
            .filter(entity::route::Column::MapId.eq(map_id))
            .order_by_asc(entity::route::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Route::from_entity).collect())
    }

    /// Moves a route's endpoints.
    ///
    /// # Returns
    /// - `Ok(Some(Route))` - The updated route
    /// - `Ok(None)` - No route with that id
    /// - `Err(DbErr)` - Database error during update
    pub async fn update(
        &self,
        route_id: i32,
        start_point_id: i32,
        end_point_id: i32,
    ) -> Result<Option<Route>, DbErr> {
        let Some(entity) = entity::prelude::Route::find_by_id(route_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: entity::route::ActiveModel = entity.into();
        active_model.start_point_id = ActiveValue::Set(start_point_id);
        active_model.end_point_id = ActiveValue::Set(end_point_id);

        let entity = active_model.update(self.db).await?;

        Ok(Some(Route::from_entity(entity)))
    }

    pub async fn delete(&self, route_id: i32) -> Result<(), DbErr> {
        entity::prelude::Route::delete_by_id(route_id)
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Deletes every route on a map.
    pub async fn delete_by_map(&self, map_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Route::delete_many()
            .filter(entity::route::Column::MapId.eq(map_id))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Deletes every route that starts or ends at a point.
    pub async fn delete_by_point(&self, point_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Route::delete_many()
            .filter(
                Condition::any()
                    .add(entity::route::Column::StartPointId.eq(point_id))
                    .add(entity::route::Column::EndPointId.eq(point_id)),
            )
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
