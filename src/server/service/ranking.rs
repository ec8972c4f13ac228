//! Ranking and leaderboard computation.
//!
//! Ranks are competition ranks: users with equal metric values share a rank and the next
//! distinct value skips ahead (10, 10, 5 ranks as 1, 1, 3). Both `rank` and `leaderboard`
//! are pure functions over a population of statistics; `RankingIndex` holds that
//! population in memory so requests never recompute every user's statistics.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    sync::Arc,
};

use sea_orm::DatabaseConnection;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use crate::server::{
    data::{point::PointRepository, user::UserRepository},
    error::{achievement::AchievementError, AppError},
    model::{
        achievement::GeoStats,
        point::Point,
        ranking::{GlobalRanks, LeaderboardEntry, Metric, UserStats},
    },
    service::achievement::compute_stats,
};

/// Computes the 1-based competition rank of `target` within `population`.
///
/// The rank is one more than the number of entries with a strictly greater metric value.
/// Whether `target` itself is part of `population` makes no difference.
pub fn rank<'a>(
    metric: Metric,
    target: &GeoStats,
    population: impl IntoIterator<Item = &'a GeoStats>,
) -> u64 {
    let value = metric.value_of(target);
    let ahead = population
        .into_iter()
        .filter(|stats| metric.value_of(stats) > value)
        .count();

    ahead as u64 + 1
}

/// Builds the top `limit` leaderboard rows ordered by `metric`, highest first.
///
/// Exact ties keep their relative order from `population`.
///
/// # Returns
/// - `Ok(Vec<LeaderboardEntry>)` - At most `limit` rows
/// - `Err(AchievementError::InvalidLimit)` - `limit` is negative
pub fn leaderboard(
    metric: Metric,
    limit: i64,
    population: &[UserStats],
) -> Result<Vec<LeaderboardEntry>, AchievementError> {
    let limit = usize::try_from(limit).map_err(|_| AchievementError::InvalidLimit(limit))?;

    let mut ordered: Vec<&UserStats> = population.iter().collect();
    ordered.sort_by(|a, b| metric.value_of(&b.stats).cmp(&metric.value_of(&a.stats)));

    Ok(ordered
        .into_iter()
        .take(limit)
        .map(LeaderboardEntry::from_user_stats)
        .collect())
}

/// Exclusive right to change one user's statistics.
///
/// Obtained from `RankingIndex::lock_user`. Held across the writes that change the
/// user's visible points and the index refresh that follows, so refreshes for one user
/// apply in the order their writes committed.
pub struct UserGuard {
    user_id: i32,
    _lock: OwnedMutexGuard<()>,
}

impl UserGuard {
    pub fn user_id(&self) -> i32 {
        self.user_id
    }
}

/// In-memory statistics for every user, keyed and iterated by user id.
///
/// Rebuilt once at startup and then refreshed one user at a time whenever that user's
/// visible points or username change. Cloning shares the underlying table.
#[derive(Clone, Default)]
pub struct RankingIndex {
    entries: Arc<RwLock<BTreeMap<i32, UserStats>>>,
    user_locks: Arc<Mutex<HashMap<i32, Arc<Mutex<()>>>>>,
}

impl RankingIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the index contents with fresh statistics for every user.
    ///
    /// Loads all users and all visible points in two queries and groups points by owner.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of users indexed
    /// - `Err(AppError::DbErr)` - Database error loading users or points
    pub async fn rebuild(&self, db: &DatabaseConnection) -> Result<usize, AppError> {
        let users = UserRepository::new(db).get_all().await?;
        let points = PointRepository::new(db).list_all_visible().await?;

        let mut points_by_user: HashMap<i32, Vec<Point>> = HashMap::new();
        for point in points {
            points_by_user.entry(point.user_id).or_default().push(point);
        }

        let entries: BTreeMap<i32, UserStats> = users
            .into_iter()
            .map(|user| {
                let points = points_by_user.remove(&user.id).unwrap_or_default();
                let entry = UserStats {
                    user_id: user.id,
                    username: user.username,
                    stats: compute_stats(&points),
                };
                (entry.user_id, entry)
            })
            .collect();

        let count = entries.len();
        *self.entries.write().await = entries;

        tracing::info!("Ranking index rebuilt with {} users", count);

        Ok(count)
    }

    /// Waits for exclusive access to one user's statistics.
    pub async fn lock_user(&self, user_id: i32) -> UserGuard {
        let lock = self
            .user_locks
            .lock()
            .await
            .entry(user_id)
            .or_default()
            .clone();

        UserGuard {
            user_id,
            _lock: lock.lock_owned().await,
        }
    }

    /// Locks several users in ascending id order.
    ///
    /// Duplicate ids are locked once.
    pub async fn lock_users(&self, user_ids: impl IntoIterator<Item = i32>) -> Vec<UserGuard> {
        let ordered: BTreeSet<i32> = user_ids.into_iter().collect();

        let mut guards = Vec::with_capacity(ordered.len());
        for user_id in ordered {
            guards.push(self.lock_user(user_id).await);
        }
        guards
    }

    /// Recomputes one user's entry from the database.
    ///
    /// Takes the user's lock for the duration of the refresh. Callers already holding a
    /// `UserGuard` for the user use `refresh` instead.
    ///
    /// # Returns
    /// - `Ok(Some(GeoStats))` - The user's fresh statistics
    /// - `Ok(None)` - User does not exist
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn refresh_user(
        &self,
        db: &DatabaseConnection,
        user_id: i32,
    ) -> Result<Option<GeoStats>, AppError> {
        let guard = self.lock_user(user_id).await;
        self.refresh(db, &guard).await
    }

    /// Recomputes the guarded user's entry from committed data.
    ///
    /// Removes the entry when the user no longer exists.
    pub async fn refresh(
        &self,
        db: &DatabaseConnection,
        guard: &UserGuard,
    ) -> Result<Option<GeoStats>, AppError> {
        let user_id = guard.user_id();

        let Some(user) = UserRepository::new(db).find_by_id(user_id).await? else {
            self.entries.write().await.remove(&user_id);
            return Ok(None);
        };

        let points = PointRepository::new(db)
            .list_visible_by_user(user_id)
            .await?;
        let stats = compute_stats(&points);

        self.upsert(UserStats {
            user_id,
            username: user.username,
            stats: stats.clone(),
        })
        .await;

        tracing::debug!("Refreshed ranking entry for user {}", user_id);

        Ok(Some(stats))
    }

    /// Inserts or replaces a single entry.
    pub async fn upsert(&self, entry: UserStats) {
        self.entries.write().await.insert(entry.user_id, entry);
    }

    /// Ranks `stats` along all three metrics under one read lock.
    pub async fn global_ranks(&self, stats: &GeoStats) -> GlobalRanks {
        let entries = self.entries.read().await;
        let all = || entries.values().map(|e| &e.stats);

        GlobalRanks {
            points: rank(Metric::TotalPoints, stats, all()),
            countries: rank(Metric::UniqueCountries, stats, all()),
            continents: rank(Metric::UniqueContinents, stats, all()),
        }
    }

    /// Builds the leaderboard from the indexed users in user id order.
    pub async fn leaderboard(
        &self,
        metric: Metric,
        limit: i64,
    ) -> Result<Vec<LeaderboardEntry>, AchievementError> {
        let entries = self.entries.read().await;
        let population: Vec<UserStats> = entries.values().cloned().collect();
        leaderboard(metric, limit, &population)
    }
}
