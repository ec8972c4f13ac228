//! Ranking metrics and leaderboard rows.

use std::str::FromStr;

use crate::{
    model::stats::LeaderboardEntryDto,
    server::{error::achievement::AchievementError, model::achievement::GeoStats},
};

/// Statistic users are ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    #[default]
    TotalPoints,
    UniqueCountries,
    UniqueContinents,
}

impl Metric {
    /// Reads this metric from a user's statistics.
    pub fn value_of(self, stats: &GeoStats) -> usize {
        match self {
            Metric::TotalPoints => stats.total_points,
            Metric::UniqueCountries => stats.countries.count(),
            Metric::UniqueContinents => stats.continents.count(),
        }
    }
}

/// Accepts the leaderboard names (`points`, `countries`, `continents`) and the
/// statistic names (`total_points`, `unique_countries`, `unique_continents`).
impl FromStr for Metric {
    type Err = AchievementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "points" | "total_points" => Ok(Metric::TotalPoints),
            "countries" | "unique_countries" => Ok(Metric::UniqueCountries),
            "continents" | "unique_continents" => Ok(Metric::UniqueContinents),
            other => Err(AchievementError::UnknownMetric(other.to_string())),
        }
    }
}

/// A user's statistics tagged with their identity, as held by the ranking index.
#[derive(Debug, Clone, PartialEq)]
pub struct UserStats {
    pub user_id: i32,
    pub username: String,
    pub stats: GeoStats,
}

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub user_id: i32,
    pub username: String,
    pub total_points: usize,
    pub unique_countries: usize,
    pub unique_continents: usize,
    pub total_badges: usize,
}

impl LeaderboardEntry {
    pub fn from_user_stats(user_stats: &UserStats) -> Self {
        Self {
            user_id: user_stats.user_id,
            username: user_stats.username.clone(),
            total_points: user_stats.stats.total_points,
            unique_countries: user_stats.stats.countries.count(),
            unique_continents: user_stats.stats.continents.count(),
            total_badges: user_stats.stats.total_badges,
        }
    }

    pub fn into_dto(self) -> LeaderboardEntryDto {
        LeaderboardEntryDto {
            user_id: self.user_id,
            username: self.username,
            total_points: self.total_points as u64,
            unique_countries: self.unique_countries as u64,
            unique_continents: self.unique_continents as u64,
            total_badges: self.total_badges as u64,
        }
    }
}

/// The caller's competition rank along each metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalRanks {
    pub points: u64,
    pub countries: u64,
    pub continents: u64,
}
