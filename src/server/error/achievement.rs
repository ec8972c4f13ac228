use thiserror::Error;

/// Precondition violations for the ranking and leaderboard computations.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AchievementError {
    /// Leaderboard requested with a negative number of entries.
    #[error("Leaderboard limit must not be negative, got {0}")]
    InvalidLimit(i64),

    /// Metric name outside `points`, `countries`, `continents` (or their
    /// `total_points`, `unique_countries`, `unique_continents` aliases).
    #[error("Unknown ranking metric '{0}'")]
    UnknownMetric(String),
}
