use axum::http::HeaderMap;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::User,
};

/// Header carrying the authenticated user's id, set by the upstream auth layer.
pub const USER_ID_HEADER: &str = "x-user-id";

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, headers: &'a HeaderMap) -> Self {
        Self { db, headers }
    }

    /// Resolves the authenticated user for the request.
    ///
    /// # Returns
    /// - `Ok(User)` - The user named by the `x-user-id` header
    /// - `Err(AppError::AuthErr(MissingUserHeader))` - Header absent
    /// - `Err(AppError::AuthErr(InvalidUserHeader))` - Header is not an integer id
    /// - `Err(AppError::AuthErr(UserNotFound))` - No user with that id
    pub async fn require(&self) -> Result<User, AppError> {
        let Some(value) = self.headers.get(USER_ID_HEADER) else {
            return Err(AuthError::MissingUserHeader.into());
        };

        let raw = value.to_str().unwrap_or_default().trim();
        let Ok(user_id) = raw.parse::<i32>() else {
            return Err(AuthError::InvalidUserHeader(raw.to_string()).into());
        };

        let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
            return Err(AuthError::UserNotFound(user_id).into());
        };

        Ok(user)
    }
}
