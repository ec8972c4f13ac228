//! Achievement engine.
//!
//! Turns a user's visible points into geographic statistics: distinct cities, regions,
//! countries and continents, the Fibonacci milestone badges earned in each category,
//! and the next milestone still ahead. The engine itself is pure; `AchievementService`
//! only loads the points it runs over.

use std::collections::BTreeSet;

use sea_orm::ConnectionTrait;

use crate::server::{
    data::point::PointRepository,
    error::AppError,
    model::{
        achievement::{Badge, Category, CategoryStats, GeoStats},
        point::Point,
    },
};

/// Computes statistics over the visible points in `points`.
///
/// Points with a missing or empty place name are skipped for that category only; they
/// still count towards `total_points`. Names are compared exactly as stored, so request
/// input is trimmed before it reaches the database. Hidden points are ignored entirely.
///
/// # Arguments
/// - `points` - A user's points, in any order
///
/// # Returns
/// - `GeoStats` - Distinct values, badges and next milestones per category
pub fn compute_stats(points: &[Point]) -> GeoStats {
    let visible: Vec<&Point> = points.iter().filter(|p| p.is_visible()).collect();

    let cities = CategoryStats::from_values(Category::Cities, distinct(&visible, |p| &p.city));
    let regions = CategoryStats::from_values(Category::Regions, distinct(&visible, |p| &p.region));
    let countries =
        CategoryStats::from_values(Category::Countries, distinct(&visible, |p| &p.country));
    let continents =
        CategoryStats::from_values(Category::Continents, distinct(&visible, |p| &p.continent));

    let total_badges = [&cities, &regions, &countries, &continents]
        .iter()
        .map(|c| c.badges.len())
        .sum();

    GeoStats {
        total_points: visible.len(),
        cities,
        regions,
        countries,
        continents,
        total_badges,
    }
}

fn distinct<'a>(
    points: &[&'a Point],
    field: impl Fn(&'a Point) -> &'a Option<String>,
) -> BTreeSet<String> {
    points
        .iter()
        .filter_map(|&p| field(p).as_ref())
        .filter(|v| !v.is_empty())
        .cloned()
        .collect()
}

/// Lists badges present in `after` but not in `before`, per category.
///
/// Used after a point is added to decide which achievement notifications to send.
pub fn newly_unlocked(before: &GeoStats, after: &GeoStats) -> Vec<(Category, Badge)> {
    Category::ALL
        .iter()
        .flat_map(|&category| {
            let earned = &before.category(category).badges;
            after
                .category(category)
                .badges
                .iter()
                .filter(|badge| !earned.iter().any(|b| b.level == badge.level))
                .map(move |badge| (category, badge.clone()))
                .collect::<Vec<_>>()
        })
        .collect()
}

pub struct AchievementService<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AchievementService<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Computes a user's current statistics from their visible points.
    ///
    /// # Returns
    /// - `Ok(GeoStats)` - Statistics (all zero for users without points)
    /// - `Err(AppError::DbErr)` - Database error loading points
    pub async fn get_user_stats(&self, user_id: i32) -> Result<GeoStats, AppError> {
        let points = PointRepository::new(self.db)
            .list_visible_by_user(user_id)
            .await?;

        Ok(compute_stats(&points))
    }
}
