//! User domain models and parameters.

use chrono::{DateTime, Utc};

use crate::model::user::{PublicUserDto, UserDto, UserSearchResultDto};

/// Registered user.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model to a user domain model at the repository boundary.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            email: entity.email,
            bio: entity.bio,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            username: self.username,
            email: self.email,
            bio: self.bio,
            created_at: self.created_at,
        }
    }

    /// Profile view without the email address.
    pub fn into_public_dto(self) -> PublicUserDto {
        PublicUserDto {
            id: self.id,
            username: self.username,
            joined_at: self.created_at,
            bio: self.bio,
        }
    }

    pub fn into_search_result_dto(self) -> UserSearchResultDto {
        UserSearchResultDto {
            id: self.id,
            username: self.username,
            email: self.email,
        }
    }
}

/// Parameters for registering a user.
#[derive(Debug, Clone)]
pub struct CreateUserParam {
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
}

/// Parameters for updating the caller's profile.
///
/// `None` leaves a field unchanged. For `bio`, `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileParam {
    pub user_id: i32,
    pub username: Option<String>,
    pub bio: Option<Option<String>>,
}

/// Parameters for searching users by username or email.
#[derive(Debug, Clone)]
pub struct SearchUsersParam {
    /// Substring matched against username and email.
    pub query: String,
    /// Caller's id, excluded from results.
    pub exclude_user_id: i32,
}
