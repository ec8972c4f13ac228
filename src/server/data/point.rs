//! Point data repository.
//!
//! Points are the raw material of every statistic in the application. Leaving a map
//! hides a user's points on it rather than deleting them, and rejoining restores them,
//! so most queries here filter on `hidden_at IS NULL`.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait,
    DbErr, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::server::model::point::{
    CreatePointParam, Point, PointPage, PointPageParam, PointSort, UpdatePointParam,
};

pub struct PointRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PointRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new visible point.
    pub async fn create(&self, param: CreatePointParam) -> Result<Point, DbErr> {
        let entity = entity::point::ActiveModel {
            map_id: ActiveValue::Set(param.map_id),
            user_id: ActiveValue::Set(param.user_id),
            latitude: ActiveValue::Set(param.latitude),
            longitude: ActiveValue::Set(param.longitude),
            city: ActiveValue::Set(param.city),
            region: ActiveValue::Set(param.region),
            country: ActiveValue::Set(param.country),
            continent: ActiveValue::Set(param.continent),
            category: ActiveValue::Set(param.category),
            description: ActiveValue::Set(param.description),
            created_at: ActiveValue::Set(Utc::now()),
            hidden_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Point::from_entity(entity))
    }

    /// Finds a point by id, hidden or not.
    pub async fn find_by_id(&self, point_id: i32) -> Result<Option<Point>, DbErr> {
        let entity = entity::prelude::Point::find_by_id(point_id)
            .one(self.db)
            .await?;

        Ok(entity.map(Point::from_entity))
    }

    /// Gets a user's visible points across all maps, ordered by id.
    ///
    /// This is the only input the achievement engine consumes for a single user.
    pub async fn list_visible_by_user(&self, user_id: i32) -> Result<Vec<Point>, DbErr> {
        let entities = entity::prelude::Point::find()
            .filter(entity::point::Column::UserId.eq(user_id))
            .filter(entity::point::Column::HiddenAt.is_null())
            .order_by_asc(entity::point::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Point::from_entity).collect())
    }

    /// Gets every visible point in the system, ordered by id.
    ///
    /// Used once at startup to build the ranking index in a single query.
    pub async fn list_all_visible(&self) -> Result<Vec<Point>, DbErr> {
        let entities = entity::prelude::Point::find()
            .filter(entity::point::Column::HiddenAt.is_null())
            .order_by_asc(entity::point::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Point::from_entity).collect())
    }

    /// Applies changes to a point.
    ///
    /// # Returns
    /// - `Ok(Some(Point))` - The updated point
    /// - `Ok(None)` - No point with that id
    /// - `Err(DbErr)` - Database error during update
    pub async fn update(&self, param: UpdatePointParam) -> Result<Option<Point>, DbErr> {
        let Some(entity) = entity::prelude::Point::find_by_id(param.point_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::point::ActiveModel = entity.into();
        if let Some(latitude) = param.latitude {
            active.latitude = ActiveValue::Set(latitude);
        }
        if let Some(longitude) = param.longitude {
            active.longitude = ActiveValue::Set(longitude);
        }
        if let Some(city) = param.city {
            active.city = ActiveValue::Set(city);
        }
        if let Some(region) = param.region {
            active.region = ActiveValue::Set(region);
        }
        if let Some(country) = param.country {
            active.country = ActiveValue::Set(country);
        }
        if let Some(continent) = param.continent {
            active.continent = ActiveValue::Set(continent);
        }
        if let Some(category) = param.category {
            active.category = ActiveValue::Set(category);
        }
        if let Some(description) = param.description {
            active.description = ActiveValue::Set(description);
        }

        let entity = active.update(self.db).await?;

        Ok(Some(Point::from_entity(entity)))
    }

    /// Gets one page of a map's visible points.
    ///
    /// Exact filters on country, city and category are combined with a case-insensitive
    /// substring search across the place names, category and description. Ties in the
    /// sort column are broken by id.
    pub async fn page_visible_by_map(&self, param: &PointPageParam) -> Result<PointPage, DbErr> {
        let mut query = entity::prelude::Point::find()
            .filter(entity::point::Column::MapId.eq(param.map_id))
            .filter(entity::point::Column::HiddenAt.is_null());

        if let Some(search) = &param.search {
            query = query.filter(
                Condition::any()
                    .add(entity::point::Column::City.contains(search))
                    .add(entity::point::Column::Region.contains(search))
                    .add(entity::point::Column::Country.contains(search))
                    .add(entity::point::Column::Category.contains(search))
                    .add(entity::point::Column::Description.contains(search)),
            );
        }
        if let Some(country) = &param.country {
            query = query.filter(entity::point::Column::Country.eq(country.as_str()));
        }
        if let Some(city) = &param.city {
            query = query.filter(entity::point::Column::City.eq(city.as_str()));
        }
        if let Some(category) = &param.category {
            query = query.filter(entity::point::Column::Category.eq(category.as_str()));
        }

        let column = match param.sort {
            PointSort::Timestamp => entity::point::Column::CreatedAt,
            PointSort::City => entity::point::Column::City,
            PointSort::Region => entity::point::Column::Region,
            PointSort::Country => entity::point::Column::Country,
            PointSort::Category => entity::point::Column::Category,
        };
        let order = if param.descending { Order::Desc } else { Order::Asc };

        let paginator = query
            .order_by(column, order.clone())
            .order_by(entity::point::Column::Id, order)
            .paginate(self.db, param.limit);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(param.page.saturating_sub(1)).await?;

        Ok(PointPage {
            items: entities.into_iter().map(Point::from_entity).collect(),
            total,
            page: param.page,
            limit: param.limit,
        })
    }

    /// Gets the visible points on a map, ordered by id.
    pub async fn list_visible_by_map(&self, map_id: i32) -> Result<Vec<Point>, DbErr> {
        let entities = entity::prelude::Point::find()
            .filter(entity::point::Column::MapId.eq(map_id))
            .filter(entity::point::Column::HiddenAt.is_null())
            .order_by_asc(entity::point::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Point::from_entity).collect())
    }

    /// Hides a user's visible points on a map.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of points hidden
    /// - `Err(DbErr)` - Database error during update
    pub async fn hide_for_user_on_map(&self, map_id: i32, user_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Point::update_many()
            .filter(entity::point::Column::MapId.eq(map_id))
            .filter(entity::point::Column::UserId.eq(user_id))
            .filter(entity::point::Column::HiddenAt.is_null())
            .col_expr(
                entity::point::Column::HiddenAt,
                Expr::value(Some(Utc::now())),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Restores a user's hidden points on a map.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of points restored
    /// - `Err(DbErr)` - Database error during update
    pub async fn restore_for_user_on_map(&self, map_id: i32, user_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Point::update_many()
            .filter(entity::point::Column::MapId.eq(map_id))
            .filter(entity::point::Column::UserId.eq(user_id))
            .filter(entity::point::Column::HiddenAt.is_not_null())
            .col_expr(
                entity::point::Column::HiddenAt,
                Expr::value(Option::<DateTime<Utc>>::None),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Gets the distinct owners of any point on a map, hidden or not.
    pub async fn user_ids_on_map(&self, map_id: i32) -> Result<Vec<i32>, DbErr> {
        entity::prelude::Point::find()
            .select_only()
            .column(entity::point::Column::UserId)
            .distinct()
            .filter(entity::point::Column::MapId.eq(map_id))
            .order_by_asc(entity::point::Column::UserId)
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }

    /// Deletes a point.
    pub async fn delete(&self, point_id: i32) -> Result<(), DbErr> {
        entity::prelude::Point::delete_by_id(point_id)
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Deletes every point on a map.
    pub async fn delete_by_map(&self, map_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Point::delete_many()
            .filter(entity::point::Column::MapId.eq(map_id))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
