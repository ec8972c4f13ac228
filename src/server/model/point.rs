//! Point domain models and parameters.

use chrono::{DateTime, Utc};

use std::str::FromStr;

use crate::model::point::{PointDto, PointPageDto, UpdatePointDto};

/// Geotagged visit logged by a user on a map.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub id: i32,
    pub map_id: i32,
    pub user_id: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub continent: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Set while the owner is not a participant of the map.
    pub hidden_at: Option<DateTime<Utc>>,
}

impl Point {
    pub fn from_entity(entity: entity::point::Model) -> Self {
        Self {
            id: entity.id,
            map_id: entity.map_id,
            user_id: entity.user_id,
            latitude: entity.latitude,
            longitude: entity.longitude,
            city: entity.city,
            region: entity.region,
            country: entity.country,
            continent: entity.continent,
            category: entity.category,
            description: entity.description,
            created_at: entity.created_at,
            hidden_at: entity.hidden_at,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.hidden_at.is_none()
    }

    pub fn into_dto(self) -> PointDto {
        PointDto {
            id: self.id,
            map_id: self.map_id,
            user_id: self.user_id,
            latitude: self.latitude,
            longitude: self.longitude,
            city: self.city,
            region: self.region,
            country: self.country,
            continent: self.continent,
            category: self.category,
            description: self.description,
            timestamp: self.created_at,
        }
    }
}

/// Parameters for adding a point to a map.
#[derive(Debug, Clone, Default)]
pub struct CreatePointParam {
    pub map_id: i32,
    pub user_id: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub continent: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl CreatePointParam {
    /// Builds the parameters from a request body.
    ///
    /// Blank place names are treated as unresolved.
    pub fn from_dto(map_id: i32, user_id: i32, dto: crate::model::point::CreatePointDto) -> Self {
        Self {
            map_id,
            user_id,
            latitude: dto.latitude,
            longitude: dto.longitude,
            city: non_blank(dto.city),
            region: non_blank(dto.region),
            country: non_blank(dto.country),
            continent: non_blank(dto.continent),
            category: non_blank(dto.category),
            description: dto.description,
        }
    }
}

/// Changes to one of a user's points.
///
/// `None` leaves a field unchanged. For place names and text fields `Some(None)` clears
/// the stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdatePointParam {
    pub point_id: i32,
    pub map_id: i32,
    pub user_id: i32,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub city: Option<Option<String>>,
    pub region: Option<Option<String>>,
    pub country: Option<Option<String>>,
    pub continent: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub description: Option<Option<String>>,
}

impl UpdatePointParam {
    /// Builds the parameters from a request body.
    ///
    /// A blank place name or category clears it; an empty description clears it.
    pub fn from_dto(map_id: i32, point_id: i32, user_id: i32, dto: UpdatePointDto) -> Self {
        Self {
            point_id,
            map_id,
            user_id,
            latitude: dto.latitude,
            longitude: dto.longitude,
            city: dto.city.map(|v| non_blank(Some(v))),
            region: dto.region.map(|v| non_blank(Some(v))),
            country: dto.country.map(|v| non_blank(Some(v))),
            continent: dto.continent.map(|v| non_blank(Some(v))),
            category: dto.category.map(|v| non_blank(Some(v))),
            description: dto.description.map(|v| Some(v).filter(|d| !d.is_empty())),
        }
    }

    /// Whether the update can change the owner's statistics.
    pub fn touches_places(&self) -> bool {
        self.city.is_some()
            || self.region.is_some()
            || self.country.is_some()
            || self.continent.is_some()
    }
}

/// Column a point listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointSort {
    #[default]
    Timestamp,
    City,
    Region,
    Country,
    Category,
}

impl FromStr for PointSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "timestamp" | "created_at" => Ok(PointSort::Timestamp),
            "city" => Ok(PointSort::City),
            "region" => Ok(PointSort::Region),
            "country" => Ok(PointSort::Country),
            "category" => Ok(PointSort::Category),
            other => Err(other.to_string()),
        }
    }
}

/// Filters and paging for a map's visible points.
#[derive(Debug, Clone)]
pub struct PointPageParam {
    pub map_id: i32,
    /// 1-based page number.
    pub page: u64,
    pub limit: u64,
    /// Case-insensitive substring of city, region, country, category or description.
    pub search: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub category: Option<String>,
    pub sort: PointSort,
    pub descending: bool,
}

/// One page of points with the size of the whole filtered listing.
#[derive(Debug, Clone, PartialEq)]
pub struct PointPage {
    pub items: Vec<Point>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
}

impl PointPage {
    pub fn pages(&self) -> u64 {
        self.total.div_ceil(self.limit.max(1))
    }

    pub fn into_dto(self) -> PointPageDto {
        PointPageDto {
            pages: self.pages(),
            items: self.items.into_iter().map(Point::into_dto).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
