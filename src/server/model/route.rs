//! Route domain models and parameters.

use chrono::{DateTime, Utc};

use crate::model::route::RouteDto;

/// Color shown for routes whose author is no longer a participant.
pub const DETACHED_ROUTE_COLOR: &str = "#808080";

/// Connection drawn by a participant between two points on the same map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub id: i32,
    pub map_id: i32,
    pub user_id: i32,
    pub start_point_id: i32,
    pub end_point_id: i32,
    pub created_at: DateTime<Utc>,
}

impl Route {
    pub fn from_entity(entity: entity::route::Model) -> Self {
        Self {
            id: entity.id,
            map_id: entity.map_id,
            user_id: entity.user_id,
            start_point_id: entity.start_point_id,
            end_point_id: entity.end_point_id,
            created_at: entity.created_at,
        }
    }

    /// Converts to a DTO drawn in the author's participant color.
    pub fn into_dto(self, color: String) -> RouteDto {
        RouteDto {
            id: self.id,
            map_id: self.map_id,
            user_id: self.user_id,
            start_point_id: self.start_point_id,
            end_point_id: self.end_point_id,
            color,
        }
    }
}

/// Route endpoints, used both to create a route and to move an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteParam {
    pub map_id: i32,
    pub user_id: i32,
    pub start_point_id: i32,
    pub end_point_id: i32,
}

/// A route together with the color it is drawn in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColoredRoute {
    pub route: Route,
    pub color: String,
}

impl ColoredRoute {
    pub fn into_dto(self) -> RouteDto {
        self.route.into_dto(self.color)
    }
}
