use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BadgeDto {
    pub level: u32,
    pub rank: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BadgesByCategoryDto {
    pub cities: Vec<BadgeDto>,
    pub regions: Vec<BadgeDto>,
    pub countries: Vec<BadgeDto>,
    pub continents: Vec<BadgeDto>,
}

/// Next milestone per category; `null` once a category has no milestone left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NextMilestonesDto {
    pub cities: Option<u32>,
    pub regions: Option<u32>,
    pub countries: Option<u32>,
    pub continents: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatsDto {
    pub total_points: u64,
    pub unique_cities: u64,
    pub unique_regions: u64,
    pub unique_countries: u64,
    pub unique_continents: u64,
    pub cities_list: Vec<String>,
    pub regions_list: Vec<String>,
    pub countries_list: Vec<String>,
    pub continents_list: Vec<String>,
    pub badges_by_category: BadgesByCategoryDto,
    pub next_milestones: NextMilestonesDto,
    pub total_badges: u64,
    /// Only present on the caller's own stats.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_rank_points: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_rank_countries: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_rank_continents: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardEntryDto {
    pub user_id: i32,
    pub username: String,
    pub total_points: u64,
    pub unique_countries: u64,
    pub unique_continents: u64,
    pub total_badges: u64,
}
