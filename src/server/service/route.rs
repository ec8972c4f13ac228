//! Route service for business logic.
//!
//! Routes connect two points on the same map. Any participant may draw them; only the
//! author may move them, and the author or the map's creator may delete them. Routes do
//! not count towards statistics.

use std::collections::HashMap;

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        map::MapRepository, participant::MapParticipantRepository, point::PointRepository,
        route::RouteRepository,
    },
    error::AppError,
    model::{
        map::Map,
        route::{ColoredRoute, Route, RouteParam, DETACHED_ROUTE_COLOR},
    },
};

pub struct RouteService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RouteService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Draws a route between two visible points of the map.
    ///
    /// # Returns
    /// - `Ok(ColoredRoute)` - The created route in the author's color
    /// - `Err(AppError::NotFound)` - No map with that id
    /// - `Err(AppError::Forbidden)` - User is not a participant of the map
    /// - `Err(AppError::BadRequest)` - An endpoint is missing or on another map
    pub async fn create(&self, param: RouteParam) -> Result<ColoredRoute, AppError> {
        self.find_map(param.map_id).await?;
        let author = MapParticipantRepository::new(self.db)
            .find(param.map_id, param.user_id)
            .await?
            .ok_or_else(|| AppError::Forbidden("Not a participant".to_string()))?;
        self.validate_endpoints(&param).await?;

        let route = RouteRepository::new(self.db).create(param).await?;

        tracing::debug!(
            "User {} drew route {} on map {}",
            route.user_id,
            route.id,
            route.map_id
        );

        Ok(ColoredRoute {
            route,
            color: author.assigned_color,
        })
    }

    /// Lists a map's routes, each in its author's participant color.
    ///
    /// Routes of authors who are no longer participants are drawn in a neutral gray.
    pub async fn list(&self, map_id: i32, user_id: i32) -> Result<Vec<ColoredRoute>, AppError> {
        let map = self.find_map(map_id).await?;

        let colors: HashMap<i32, String> = MapParticipantRepository::new(self.db)
            .get_by_map(map_id)
            .await?
            .into_iter()
            .map(|p| (p.user_id, p.assigned_color))
            .collect();

        if map.creator_id != user_id && !colors.contains_key(&user_id) {
            return Err(AppError::Forbidden("Access denied".to_string()));
        }

        let routes = RouteRepository::new(self.db).get_by_map(map_id).await?;

        Ok(routes
            .into_iter()
            .map(|route| ColoredRoute {
                color: colors
                    .get(&route.user_id)
                    .cloned()
                    .unwrap_or_else(|| DETACHED_ROUTE_COLOR.to_string()),
                route,
            })
            .collect())
    }

    /// Moves the endpoints of one of the user's own routes.
    ///
    /// # Returns
    /// - `Ok(ColoredRoute)` - The updated route in the author's color
    /// - `Err(AppError::NotFound)` - No such route on that map
    /// - `Err(AppError::Forbidden)` - Route belongs to another user
    /// - `Err(AppError::BadRequest)` - An endpoint is missing or on another map
    pub async fn update(&self, route_id: i32, param: RouteParam) -> Result<ColoredRoute, AppError> {
        let route = self.find_on_map(param.map_id, route_id).await?;
        if route.user_id != param.user_id {
            return Err(AppError::Forbidden(
                "Cannot edit other user's route".to_string(),
            ));
        }

        self.validate_endpoints(&param).await?;

        let route = RouteRepository::new(self.db)
            .update(route_id, param.start_point_id, param.end_point_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Route not found".to_string()))?;

        let color = MapParticipantRepository::new(self.db)
            .find(param.map_id, param.user_id)
            .await?
            .map(|p| p.assigned_color)
            .unwrap_or_else(|| DETACHED_ROUTE_COLOR.to_string());

        Ok(ColoredRoute { route, color })
    }

    /// Deletes a route. The author and the map's creator may delete it.
    ///
    /// # Returns
    /// - `Ok(())` - Route deleted
    /// - `Err(AppError::NotFound)` - No such route on that map
    /// - `Err(AppError::Forbidden)` - Caller is neither author nor creator
    pub async fn delete(&self, map_id: i32, route_id: i32, user_id: i32) -> Result<(), AppError> {
        let route = self.find_on_map(map_id, route_id).await?;

        if route.user_id != user_id {
            let map = self.find_map(map_id).await?;
            if map.creator_id != user_id {
                return Err(AppError::Forbidden(
                    "Cannot delete other user's route".to_string(),
                ));
            }
        }

        RouteRepository::new(self.db).delete(route_id).await?;

        tracing::debug!("User {} deleted route {}", user_id, route_id);

        Ok(())
    }

    async fn find_map(&self, map_id: i32) -> Result<Map, AppError> {
        MapRepository::new(self.db)
            .find_by_id(map_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Map not found".to_string()))
    }

    async fn find_on_map(&self, map_id: i32, route_id: i32) -> Result<Route, AppError> {
        RouteRepository::new(self.db)
            .find_by_id(route_id)
            .await?
            .filter(|r| r.map_id == map_id)
            .ok_or_else(|| AppError::NotFound("Route not found".to_string()))
    }

    async fn validate_endpoints(&self, param: &RouteParam) -> Result<(), AppError> {
        let point_repo = PointRepository::new(self.db);

        for (point_id, name) in [
            (param.start_point_id, "Start"),
            (param.end_point_id, "End"),
        ] {
            let valid = point_repo
                .find_by_id(point_id)
                .await?
                .is_some_and(|p| p.map_id == param.map_id && p.is_visible());
            if !valid {
                return Err(AppError::BadRequest(format!("{} point invalid", name)));
            }
        }

        Ok(())
    }
}
