//! User service for business logic.
//!
//! This module provides the `UserService` for registration, profile management, user
//! search, and the statistics views (own stats with global ranks, public profiles, and
//! the leaderboard). Username changes and registrations are mirrored into the ranking
//! index so leaderboard rows always carry current usernames.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::AppError,
    model::{
        achievement::GeoStats,
        ranking::{GlobalRanks, LeaderboardEntry, Metric},
        user::{CreateUserParam, SearchUsersParam, UpdateProfileParam, User},
    },
    service::{achievement::AchievementService, ranking::RankingIndex},
};

/// Service providing business logic for user management.
///
/// Holds the database connection and the shared ranking index.
pub struct UserService<'a> {
    db: &'a DatabaseConnection,
    ranking: &'a RankingIndex,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `ranking` - Shared ranking index
    ///
    /// # Returns
    /// - `UserService` - New service instance
    pub fn new(db: &'a DatabaseConnection, ranking: &'a RankingIndex) -> Self {
        Self { db, ranking }
    }

    /// Registers a new user.
    ///
    /// Username and email must both be non-empty and unused.
    ///
    /// # Arguments
    /// - `param` - Username, email and optional bio
    ///
    /// # Returns
    /// - `Ok(User)` - The registered user
    /// - `Err(AppError::BadRequest)` - Empty or already used username or email
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn create_user(&self, param: CreateUserParam) -> Result<User, AppError> {
        let user_repo = UserRepository::new(self.db);

        let username = param.username.trim().to_string();
        let email = param.email.trim().to_string();
        if username.is_empty() {
            return Err(AppError::BadRequest("Username must not be empty".to_string()));
        }
        if email.is_empty() {
            return Err(AppError::BadRequest("Email must not be empty".to_string()));
        }

        if user_repo.find_by_username(&username).await?.is_some() {
            return Err(AppError::BadRequest("Username already taken".to_string()));
        }
        if user_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::BadRequest("Email already registered".to_string()));
        }

        let user = user_repo
            .create(CreateUserParam {
                username,
                email,
                bio: param.bio.filter(|b| !b.trim().is_empty()),
            })
            .await?;

        self.ranking.refresh_user(self.db, user.id).await?;

        tracing::info!("Registered user {} ({})", user.username, user.id);

        Ok(user)
    }

    /// Gets a user by id.
    ///
    /// # Returns
    /// - `Ok(User)` - The user
    /// - `Err(AppError::NotFound)` - No user with that id
    pub async fn get_user(&self, user_id: i32) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Searches other users by username or email substring.
    ///
    /// A blank query returns no results rather than every user.
    pub async fn search(&self, param: SearchUsersParam) -> Result<Vec<User>, AppError> {
        let query = param.query.trim().to_string();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let users = UserRepository::new(self.db)
            .search(SearchUsersParam {
                query,
                exclude_user_id: param.exclude_user_id,
            })
            .await?;

        Ok(users)
    }

    /// Updates the caller's username and/or bio.
    ///
    /// An empty bio clears it. A username already used by another user is rejected.
    ///
    /// # Returns
    /// - `Ok(User)` - The updated user
    /// - `Err(AppError::BadRequest)` - Empty or taken username
    /// - `Err(AppError::NotFound)` - Caller no longer exists
    pub async fn update_profile(&self, param: UpdateProfileParam) -> Result<User, AppError> {
        let user_repo = UserRepository::new(self.db);

        let username = match param.username {
            Some(username) => {
                let username = username.trim().to_string();
                if username.is_empty() {
                    return Err(AppError::BadRequest("Username must not be empty".to_string()));
                }
                if let Some(existing) = user_repo.find_by_username(&username).await? {
                    if existing.id != param.user_id {
                        return Err(AppError::BadRequest("Username already taken".to_string()));
                    }
                }
                Some(username)
            }
            None => None,
        };

        let bio = param
            .bio
            .map(|bio| bio.map(|b| b.trim().to_string()).filter(|b| !b.is_empty()));

        let renamed = username.is_some();
        let user = user_repo
            .update_profile(UpdateProfileParam {
                user_id: param.user_id,
                username,
                bio,
            })
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if renamed {
            self.ranking.refresh_user(self.db, user.id).await?;
        }

        Ok(user)
    }

    /// Computes a user's statistics together with their global ranks.
    ///
    /// # Returns
    /// - `Ok((GeoStats, GlobalRanks))` - Fresh statistics and ranks against the index
    /// - `Err(AppError::DbErr)` - Database error loading points
    pub async fn get_stats_with_ranks(
        &self,
        user_id: i32,
    ) -> Result<(GeoStats, GlobalRanks), AppError> {
        let stats = AchievementService::new(self.db)
            .get_user_stats(user_id)
            .await?;
        let ranks = self.ranking.global_ranks(&stats).await;

        Ok((stats, ranks))
    }

    /// Gets a user's public profile and statistics.
    ///
    /// # Returns
    /// - `Ok((User, GeoStats))` - The user and their statistics
    /// - `Err(AppError::NotFound)` - No user with that id
    pub async fn get_profile(&self, user_id: i32) -> Result<(User, GeoStats), AppError> {
        let user = self.get_user(user_id).await?;
        let stats = AchievementService::new(self.db)
            .get_user_stats(user_id)
            .await?;

        Ok((user, stats))
    }

    /// Builds the leaderboard from the ranking index.
    ///
    /// # Returns
    /// - `Ok(Vec<LeaderboardEntry>)` - Top users by `metric`
    /// - `Err(AppError::AchievementErr)` - Negative limit
    pub async fn leaderboard(
        &self,
        metric: Metric,
        limit: i64,
    ) -> Result<Vec<LeaderboardEntry>, AppError> {
        let entries = self.ranking.leaderboard(metric, limit).await?;
        Ok(entries)
    }
}
