//! Shared helper utilities for factory methods.
//!
//! This module provides common utilities used across all factory modules,
//! including ID generation and convenience methods for creating entities
//! with their dependencies.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique IDs in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a user, a map they own and their owner membership.
///
/// This is a convenience method that creates:
/// 1. User (as map creator)
/// 2. Map (Collaborative)
/// 3. MapParticipant with the `Owner` role
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((user, map, participant))` - Tuple of all created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_map_with_owner(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::map::Model,
        entity::map_participant::Model,
    ),
    DbErr,
> {
    let user = crate::factory::user::create_user(db).await?;
    let (map, participant) = create_map_for_user(db, &user).await?;

    Ok((user, map, participant))
}

/// Creates a map owned by the given user along with their owner membership.
///
/// # Arguments
/// - `db` - Database connection
/// - `user` - User entity to use as map creator
///
/// # Returns
/// - `Ok((map, participant))` - Tuple of created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_map_for_user(
    db: &DatabaseConnection,
    user: &entity::user::Model,
) -> Result<(entity::map::Model, entity::map_participant::Model), DbErr> {
    let map = crate::factory::map::create_map(db, user.id).await?;
    let participant = crate::factory::map_participant::MapParticipantFactory::new(db, map.id, user.id)
        .role("Owner")
        .build()
        .await?;

    Ok((map, participant))
}
