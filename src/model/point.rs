use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PointDto {
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
    pub timestamp: DateTime<Utc>,
}

/// New point on a map.
///
/// Place names are resolved by the geocoding layer before the request reaches
/// this service.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePointDto {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub continent: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Changes to an existing point.
///
/// Omitted fields are left unchanged; an empty place name clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdatePointDto {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub continent: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// One page of a map's visible points.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PointPageDto {
    pub items: Vec<PointDto>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub pages: u64,
}
