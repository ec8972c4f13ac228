//! Milestone tables, badges and the per-user geographic statistics built from them.
//!
//! Badges are never stored. A user's badge set is a pure function of how many distinct
//! cities, regions, countries and continents their visible points cover, so badges
//! appear and disappear as points are added, hidden or restored.

use std::collections::BTreeSet;

use crate::model::stats::{BadgeDto, BadgesByCategoryDto, NextMilestonesDto, StatsDto};

/// Fibonacci milestones gating badges, ascending and deduplicated.
pub const MILESTONES: [u32; 10] = [1, 2, 3, 5, 8, 13, 21, 34, 55, 89];

/// There are only seven continents, so no continent milestone above 7 is reachable.
pub const MAX_CONTINENTS: u32 = 7;

const RANK_NAMES: [(u32, &str); 10] = [
    (1, "Traveler"),
    (2, "Wanderer"),
    (3, "Pathfinder"),
    (5, "Voyager"),
    (8, "Explorer"),
    (13, "Adventurer"),
    (21, "Pioneer"),
    (34, "Legend"),
    (55, "Master"),
    (89, "Mythic"),
];

/// Returns the rank name for a milestone level, or `"Level {n}"` for levels
/// outside the milestone table.
pub fn rank_name(level: u32) -> String {
    RANK_NAMES
        .iter()
        .find(|(l, _)| *l == level)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| format!("Level {}", level))
}

/// Every milestone reached by `count`, ignoring milestones above `cap`.
pub fn badges_for_count(count: usize, cap: Option<u32>) -> Vec<Badge> {
    MILESTONES
        .iter()
        .copied()
        .take_while(|&m| cap.is_none_or(|c| m <= c))
        .filter(|&m| m as usize <= count)
        .map(Badge::new)
        .collect()
}

/// Smallest milestone strictly above `count`.
///
/// Returns `None` once the table is exhausted or the next milestone would exceed `cap`.
pub fn next_milestone(count: usize, cap: Option<u32>) -> Option<u32> {
    MILESTONES
        .iter()
        .copied()
        .find(|&m| m as usize > count)
        .filter(|&m| cap.is_none_or(|c| m <= c))
}

/// Geographic dimension a badge is awarded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Cities,
    Regions,
    Countries,
    Continents,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Cities,
        Category::Regions,
        Category::Countries,
        Category::Continents,
    ];

    /// Highest milestone that can ever be awarded in this category.
    pub fn cap(self) -> Option<u32> {
        match self {
            Category::Continents => Some(MAX_CONTINENTS),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Cities => "cities",
            Category::Regions => "regions",
            Category::Countries => "countries",
            Category::Continents => "continents",
        }
    }

    /// Title of the achievement track, shown in achievement notifications.
    pub fn achievement_title(self) -> &'static str {
        match self {
            Category::Cities => "Explorer",
            Category::Regions => "Ranger",
            Category::Countries => "Voyager",
            Category::Continents => "Pioneer",
        }
    }
}

/// Awarded milestone marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    /// Milestone value from `MILESTONES`.
    pub level: u32,
    /// Display name for the level.
    pub rank: String,
}

impl Badge {
    pub fn new(level: u32) -> Self {
        Self {
            level,
            rank: rank_name(level),
        }
    }

    pub fn into_dto(self) -> BadgeDto {
        BadgeDto {
            level: self.level,
            rank: self.rank,
        }
    }
}

/// Distinct values, badges and next milestone for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryStats {
    /// Distinct place names in ascending lexical order.
    pub values: Vec<String>,
    pub badges: Vec<Badge>,
    pub next_milestone: Option<u32>,
}

impl CategoryStats {
    /// Builds the category statistics from its distinct values.
    pub fn from_values(category: Category, values: BTreeSet<String>) -> Self {
        let count = values.len();

        Self {
            values: values.into_iter().collect(),
            badges: badges_for_count(count, category.cap()),
            next_milestone: next_milestone(count, category.cap()),
        }
    }

    /// Number of distinct values.
    pub fn count(&self) -> usize {
        self.values.len()
    }
}

/// Geographic statistics derived from a user's visible points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoStats {
    pub total_points: usize,
    pub cities: CategoryStats,
    pub regions: CategoryStats,
    pub countries: CategoryStats,
    pub continents: CategoryStats,
    /// Sum of badge counts over all four categories; the same level earned in two
    /// categories counts twice.
    pub total_badges: usize,
}

impl GeoStats {
    pub fn category(&self, category: Category) -> &CategoryStats {
        match category {
            Category::Cities => &self.cities,
            Category::Regions => &self.regions,
            Category::Countries => &self.countries,
            Category::Continents => &self.continents,
        }
    }

    /// Converts the statistics to a DTO without rank information.
    pub fn into_dto(self) -> StatsDto {
        StatsDto {
            total_points: self.total_points as u64,
            unique_cities: self.cities.count() as u64,
            unique_regions: self.regions.count() as u64,
            unique_countries: self.countries.count() as u64,
            unique_continents: self.continents.count() as u64,
            badges_by_category: BadgesByCategoryDto {
                cities: badges_into_dto(self.cities.badges),
                regions: badges_into_dto(self.regions.badges),
                countries: badges_into_dto(self.countries.badges),
                continents: badges_into_dto(self.continents.badges),
            },
            next_milestones: NextMilestonesDto {
                cities: self.cities.next_milestone,
                regions: self.regions.next_milestone,
                countries: self.countries.next_milestone,
                continents: self.continents.next_milestone,
            },
            cities_list: self.cities.values,
            regions_list: self.regions.values,
            countries_list: self.countries.values,
            continents_list: self.continents.values,
            total_badges: self.total_badges as u64,
            global_rank_points: None,
            global_rank_countries: None,
            global_rank_continents: None,
        }
    }
}

fn badges_into_dto(badges: Vec<Badge>) -> Vec<BadgeDto> {
    badges.into_iter().map(Badge::into_dto).collect()
}
