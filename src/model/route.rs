use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Line drawn between two points of a map.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RouteDto {
    pub id: i32,
    pub map_id: i32,
    pub user_id: i32,
    pub start_point_id: i32,
    pub end_point_id: i32,
    /// Assigned color of the route's author, grey once they left the map
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RouteRequestDto {
    pub start_point_id: i32,
    pub end_point_id: i32,
}
