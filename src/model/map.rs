use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MapDto {
    pub id: i32,
    pub name: String,
    /// `Collaborative`, `Competitive` or `Personal`
    #[serde(rename = "type")]
    pub map_type: String,
    pub creator_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateMapDto {
    pub name: String,
    #[serde(rename = "type", default = "default_map_type")]
    pub map_type: String,
}

fn default_map_type() -> String {
    "Collaborative".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ParticipantDto {
    pub user_id: i32,
    pub username: String,
    pub role: String,
    pub assigned_color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InviteDto {
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ColorUpdateDto {
    /// Hex color such as `#3B82F6`
    pub color: String,
}

/// Public summary of a map, shown to users before they join it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MapInfoDto {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub map_type: String,
    pub creator_username: String,
}
