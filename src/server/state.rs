//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.
//!
//! The state includes:
//! - Database connection pool for data persistence
//! - Ranking index holding every user's statistics for ranks and the leaderboard

use sea_orm::DatabaseConnection;

use super::service::ranking::RankingIndex;

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - `RankingIndex` uses `Arc` for shared state
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// In-memory per-user statistics.
    ///
    /// Readers rank against it and build the leaderboard from it; point, membership and
    /// username changes refresh the affected user's entry.
    pub ranking: RankingIndex,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `ranking` - Ranking index, already rebuilt from the database
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(db: DatabaseConnection, ranking: RankingIndex) -> Self {
        Self { db, ranking }
    }
}
