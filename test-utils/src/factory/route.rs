//! Route factory for creating test route entities.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Connects two points on a map on behalf of `user_id`.
///
/// Both points must already exist on `map_id`.
pub async fn create_route(
    db: &DatabaseConnection,
    map_id: i32,
    user_id: i32,
    start_point_id: i32,
    end_point_id: i32,
) -> Result<entity::route::Model, DbErr> {
    entity::route::ActiveModel {
        map_id: ActiveValue::Set(map_id),
        user_id: ActiveValue::Set(user_id),
        start_point_id: ActiveValue::Set(start_point_id),
        end_point_id: ActiveValue::Set(end_point_id),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
