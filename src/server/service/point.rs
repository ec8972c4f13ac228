//! Point service for business logic.
//!
//! Adding, editing or deleting a point changes its owner's statistics. Each such change
//! runs while the owner's ranking lock is held: statistics are read before the write,
//! the write and any achievement notifications commit together, and the owner's ranking
//! entry is refreshed after the commit. One achievement notification is sent per badge
//! the change unlocks.

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        notification::NotificationRepository, point::PointRepository, route::RouteRepository,
    },
    error::AppError,
    model::{
        achievement::{Badge, Category},
        notification::{CreateNotificationParam, KIND_ACHIEVEMENT},
        point::{CreatePointParam, Point, PointPage, PointPageParam, UpdatePointParam},
    },
    service::{
        achievement::{newly_unlocked, AchievementService},
        map::MapService,
        ranking::RankingIndex,
    },
};

pub struct PointService<'a> {
    db: &'a DatabaseConnection,
    ranking: &'a RankingIndex,
}

impl<'a> PointService<'a> {
    pub fn new(db: &'a DatabaseConnection, ranking: &'a RankingIndex) -> Self {
        Self { db, ranking }
    }

    /// Adds a point to a map the user participates in.
    ///
    /// # Returns
    /// - `Ok(Point)` - The created point
    /// - `Err(AppError::NotFound)` - No map with that id
    /// - `Err(AppError::Forbidden)` - User is not a participant of the map
    /// - `Err(AppError::BadRequest)` - Coordinates out of range
    pub async fn add(&self, param: CreatePointParam) -> Result<Point, AppError> {
        let map_service = MapService::new(self.db, self.ranking);
        map_service
            .get_for_user(param.map_id, param.user_id)
            .await
            .map_err(|e| match e {
                AppError::Forbidden(_) => AppError::Forbidden(
                    "You are not a participant of this map".to_string(),
                ),
                other => other,
            })?;

        validate_coordinates(param.latitude, param.longitude)?;

        let user_id = param.user_id;
        let guard = self.ranking.lock_user(user_id).await;

        let before = AchievementService::new(self.db)
            .get_user_stats(user_id)
            .await?;

        let txn = self.db.begin().await?;

        let point = PointRepository::new(&txn).create(param).await?;

        let after = AchievementService::new(&txn)
            .get_user_stats(user_id)
            .await?;
        for (category, badge) in newly_unlocked(&before, &after) {
            notify_achievement(&txn, user_id, category, badge).await?;
        }

        txn.commit().await?;

        self.ranking.refresh(self.db, &guard).await?;

        tracing::debug!(
            "User {} added point {} to map {}",
            user_id,
            point.id,
            point.map_id
        );

        Ok(point)
    }

    /// Edits one of the user's own visible points.
    ///
    /// Changing a place name can unlock badges, which are notified like on `add`.
    ///
    /// # Returns
    /// - `Ok(Point)` - The updated point
    /// - `Err(AppError::NotFound)` - No such visible point on that map
    /// - `Err(AppError::Forbidden)` - Point belongs to another user
    /// - `Err(AppError::BadRequest)` - Coordinates out of range
    pub async fn update(&self, param: UpdatePointParam) -> Result<Point, AppError> {
        let user_id = param.user_id;
        let guard = self.ranking.lock_user(user_id).await;

        let point = self.find_on_map(param.map_id, param.point_id).await?;
        if point.user_id != user_id {
            return Err(AppError::Forbidden(
                "You can only edit your own points".to_string(),
            ));
        }

        validate_coordinates(
            param.latitude.unwrap_or(point.latitude),
            param.longitude.unwrap_or(point.longitude),
        )?;

        let before = AchievementService::new(self.db)
            .get_user_stats(user_id)
            .await?;

        let txn = self.db.begin().await?;

        let point = PointRepository::new(&txn)
            .update(param)
            .await?
            .ok_or_else(|| AppError::NotFound("Point not found".to_string()))?;

        let after = AchievementService::new(&txn)
            .get_user_stats(user_id)
            .await?;
        for (category, badge) in newly_unlocked(&before, &after) {
            notify_achievement(&txn, user_id, category, badge).await?;
        }

        txn.commit().await?;

        self.ranking.refresh(self.db, &guard).await?;

        tracing::debug!("User {} updated point {}", user_id, point.id);

        Ok(point)
    }

    /// Lists visible points on a map the user may view.
    pub async fn list_for_map(&self, map_id: i32, user_id: i32) -> Result<Vec<Point>, AppError> {
        MapService::new(self.db, self.ranking)
            .get_for_user(map_id, user_id)
            .await?;

        let points = PointRepository::new(self.db)
            .list_visible_by_map(map_id)
            .await?;

        Ok(points)
    }

    /// Gets one filtered page of the visible points on a map the user may view.
    pub async fn list_page(
        &self,
        param: PointPageParam,
        user_id: i32,
    ) -> Result<PointPage, AppError> {
        MapService::new(self.db, self.ranking)
            .get_for_user(param.map_id, user_id)
            .await?;

        let page = PointRepository::new(self.db)
            .page_visible_by_map(&param)
            .await?;

        Ok(page)
    }

    /// Deletes one of the user's own points along with the routes that touch it.
    ///
    /// # Returns
    /// - `Ok(())` - Point deleted
    /// - `Err(AppError::NotFound)` - No such point on that map
    /// - `Err(AppError::Forbidden)` - Point belongs to another user
    pub async fn delete(&self, map_id: i32, point_id: i32, user_id: i32) -> Result<(), AppError> {
        let guard = self.ranking.lock_user(user_id).await;

        let point = PointRepository::new(self.db)
            .find_by_id(point_id)
            .await?
            .filter(|p| p.map_id == map_id)
            .ok_or_else(|| AppError::NotFound("Point not found".to_string()))?;

        if point.user_id != user_id {
            return Err(AppError::Forbidden(
                "You can only delete your own points".to_string(),
            ));
        }

        let txn = self.db.begin().await?;
        let routes = RouteRepository::new(&txn).delete_by_point(point_id).await?;
        PointRepository::new(&txn).delete(point_id).await?;
        txn.commit().await?;

        self.ranking.refresh(self.db, &guard).await?;

        tracing::debug!(
            "User {} deleted point {} ({} routes removed)",
            user_id,
            point_id,
            routes
        );

        Ok(())
    }

    /// Finds a visible point on a map; hidden points are reported as missing.
    async fn find_on_map(&self, map_id: i32, point_id: i32) -> Result<Point, AppError> {
        PointRepository::new(self.db)
            .find_by_id(point_id)
            .await?
            .filter(|p| p.map_id == map_id && p.is_visible())
            .ok_or_else(|| AppError::NotFound("Point not found".to_string()))
    }
}

async fn notify_achievement<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    category: Category,
    badge: Badge,
) -> Result<(), AppError> {
    NotificationRepository::new(db)
        .create(CreateNotificationParam {
            user_id,
            kind: KIND_ACHIEVEMENT,
            title: format!("{}: {}", category.achievement_title(), badge.rank),
            message: format!(
                "You reached {} unique {}",
                badge.level,
                category.as_str()
            ),
            data: Some(serde_json::json!({
                "category": category.as_str(),
                "level": badge.level,
                "rank": badge.rank,
            })),
        })
        .await?;

    tracing::info!(
        "User {} unlocked {} badge level {}",
        user_id,
        category.as_str(),
        badge.level
    );

    Ok(())
}

/// Checks latitude and longitude ranges.
///
/// NaN fails both checks.
fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), AppError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(AppError::BadRequest(
            "Latitude must be between -90 and 90".to_string(),
        ));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(AppError::BadRequest(
            "Longitude must be between -180 and 180".to_string(),
        ));
    }
    Ok(())
}
