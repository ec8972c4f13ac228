//! Map and participant domain models.
//!
//! Maps are shared canvases users log points on. Membership is tracked through
//! participants; every map has its creator as `Owner` participant.

use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::{
    model::map::{MapDto, MapInfoDto, ParticipantDto},
    server::error::{internal::InternalError, AppError},
};

/// Palette participant colors are assigned from, round-robin by join order.
pub const PARTICIPANT_COLORS: [&str; 8] = [
    "#3B82F6", "#EF4444", "#10B981", "#F59E0B", "#8B5CF6", "#EC4899", "#06B6D4", "#F97316",
];

/// Color of the map creator's membership.
pub const OWNER_COLOR: &str = PARTICIPANT_COLORS[0];

/// Validates a `#RRGGBB` participant color and normalises it to upper case.
///
/// # Returns
/// - `Ok(String)` - The normalised color
/// - `Err(AppError::BadRequest)` - Not a six digit hex color
pub fn parse_color(color: &str) -> Result<String, AppError> {
    let color = color.trim();
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());

    if !valid {
        return Err(AppError::BadRequest(
            "Color must be a hex value such as #3B82F6".to_string(),
        ));
    }

    Ok(color.to_ascii_uppercase())
}

/// How participants relate to each other on a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapType {
    Collaborative,
    Competitive,
    /// Only the creator may log points; cannot be joined.
    Personal,
}

impl MapType {
    pub fn as_str(self) -> &'static str {
        match self {
            MapType::Collaborative => "Collaborative",
            MapType::Competitive => "Competitive",
            MapType::Personal => "Personal",
        }
    }

    /// Role given to users who join a map of this type.
    pub fn joiner_role(self) -> ParticipantRole {
        match self {
            MapType::Competitive => ParticipantRole::Competitor,
            _ => ParticipantRole::Collaborator,
        }
    }
}

impl FromStr for MapType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Collaborative" => Ok(MapType::Collaborative),
            "Competitive" => Ok(MapType::Competitive),
            "Personal" => Ok(MapType::Personal),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantRole {
    Owner,
    Collaborator,
    Competitor,
}

impl ParticipantRole {
    pub fn as_str(self) -> &'static str {
        match self {
            ParticipantRole::Owner => "Owner",
            ParticipantRole::Collaborator => "Collaborator",
            ParticipantRole::Competitor => "Competitor",
        }
    }
}

impl FromStr for ParticipantRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Owner" => Ok(ParticipantRole::Owner),
            "Collaborator" => Ok(ParticipantRole::Collaborator),
            "Competitor" => Ok(ParticipantRole::Competitor),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Map {
    pub id: i32,
    pub name: String,
    pub map_type: MapType,
    pub creator_id: i32,
    pub created_at: DateTime<Utc>,
}

impl Map {
    /// Converts an entity model to a map domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Map)` - The converted map
    /// - `Err(AppError::InternalErr(UnknownMapType))` - Stored map type is not recognised
    pub fn from_entity(entity: entity::map::Model) -> Result<Self, AppError> {
        let map_type = MapType::from_str(&entity.map_type).map_err(InternalError::UnknownMapType)?;

        Ok(Self {
            id: entity.id,
            name: entity.name,
            map_type,
            creator_id: entity.creator_id,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> MapDto {
        MapDto {
            id: self.id,
            name: self.name,
            map_type: self.map_type.as_str().to_string(),
            creator_id: self.creator_id,
            created_at: self.created_at,
        }
    }
}

/// Public summary of a map with its creator's name.
#[derive(Debug, Clone, PartialEq)]
pub struct MapInfo {
    pub map: Map,
    /// `None` when the creator account no longer exists.
    pub creator_username: Option<String>,
}

impl MapInfo {
    pub fn into_dto(self) -> MapInfoDto {
        MapInfoDto {
            id: self.map.id,
            name: self.map.name,
            map_type: self.map.map_type.as_str().to_string(),
            creator_username: self
                .creator_username
                .unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}

/// A user's membership of a map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapParticipant {
    pub id: i32,
    pub map_id: i32,
    pub user_id: i32,
    /// Username of the member, when loaded alongside the membership.
    pub username: Option<String>,
    pub role: ParticipantRole,
    pub assigned_color: String,
}

impl MapParticipant {
    /// Converts an entity model (and optionally its user) at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(MapParticipant)` - The converted participant
    /// - `Err(AppError::InternalErr(UnknownParticipantRole))` - Stored role is not recognised
    pub fn from_entity(
        entity: entity::map_participant::Model,
        user: Option<entity::user::Model>,
    ) -> Result<Self, AppError> {
        let role =
            ParticipantRole::from_str(&entity.role).map_err(InternalError::UnknownParticipantRole)?;

        Ok(Self {
            id: entity.id,
            map_id: entity.map_id,
            user_id: entity.user_id,
            username: user.map(|u| u.username),
            role,
            assigned_color: entity.assigned_color,
        })
    }

    pub fn into_dto(self) -> ParticipantDto {
        ParticipantDto {
            user_id: self.user_id,
            username: self.username.unwrap_or_default(),
            role: self.role.as_str().to_string(),
            assigned_color: self.assigned_color,
        }
    }
}

/// Parameters for creating a map.
#[derive(Debug, Clone)]
pub struct CreateMapParam {
    pub creator_id: i32,
    pub name: String,
    pub map_type: MapType,
}

impl CreateMapParam {
    /// Builds the parameters from a request body.
    ///
    /// # Returns
    /// - `Ok(CreateMapParam)` - Valid parameters
    /// - `Err(AppError::BadRequest)` - Blank name or unknown map type
    pub fn from_dto(creator_id: i32, dto: crate::model::map::CreateMapDto) -> Result<Self, AppError> {
        let name = dto.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::BadRequest("Map name must not be empty".to_string()));
        }

        let map_type = MapType::from_str(&dto.map_type)
            .map_err(|_| AppError::BadRequest("Invalid map type".to_string()))?;

        Ok(Self {
            creator_id,
            name,
            map_type,
        })
    }
}

/// Parameters for adding a membership.
#[derive(Debug, Clone)]
pub struct CreateParticipantParam {
    pub map_id: i32,
    pub user_id: i32,
    pub role: ParticipantRole,
    pub assigned_color: String,
}
