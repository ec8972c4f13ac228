use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{
        api::ErrorDto,
        map::MapInfoDto,
        stats::{LeaderboardEntryDto, StatsDto},
        user::{CreateUserDto, ProfileDto, UpdateProfileDto, UserDto, UserSearchResultDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{
            ranking::Metric,
            user::{CreateUserParam, SearchUsersParam, UpdateProfileParam},
        },
        service::{map::MapService, user::UserService},
        state::AppState,
    },
};

/// Tag for grouping user endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

/// Largest leaderboard page a client may request.
const MAX_LEADERBOARD_LIMIT: i64 = 100;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Deserialize)]
pub struct LeaderboardParams {
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_sort_by() -> String {
    "points".to_string()
}

fn default_limit() -> i64 {
    50
}

/// Register a new user.
///
/// Creates the user record the rest of the API keys on. Credentials are handled by
/// the upstream auth layer, which afterwards identifies the user through the
/// `x-user-id` header.
///
/// # Arguments
/// - `state` - Application state containing the database connection and ranking index
/// - `payload` - Username, email and optional bio
///
/// # Returns
/// - `201 Created` - The registered user
/// - `400 Bad Request` - Empty or already used username or email
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/users",
    tag = USER_TAG,
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "Successfully registered user", body = UserDto),
        (status = 400, description = "Invalid or duplicate username or email", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = UserService::new(&state.db, &state.ranking);

    let user = service
        .create_user(CreateUserParam {
            username: payload.username,
            email: payload.email,
            bio: payload.bio,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user.into_dto())))
}

/// Search users by username or email.
///
/// Returns at most 10 users, never including the caller.
///
/// # Returns
/// - `200 OK` - Matching users
/// - `401 Unauthorized` - Missing or unknown user
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/users/search",
    tag = USER_TAG,
    params(
        ("q" = String, Query, description = "Substring of a username or email")
    ),
    responses(
        (status = 200, description = "Matching users", body = Vec<UserSearchResultDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn search_users(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers).require().await?;

    let service = UserService::new(&state.db, &state.ranking);

    let users = service
        .search(SearchUsersParam {
            query: params.q,
            exclude_user_id: user.id,
        })
        .await?;

    let dtos: Vec<UserSearchResultDto> = users
        .into_iter()
        .map(|u| u.into_search_result_dto())
        .collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Get the global leaderboard.
///
/// Users are ordered by the chosen metric, highest first. Users tied on the metric keep
/// registration order.
///
/// # Arguments
/// - `state` - Application state containing the ranking index
/// - `params` - `sort_by` (`points`, `countries` or `continents`) and `limit` (1 to 100)
///
/// # Returns
/// - `200 OK` - Leaderboard rows
/// - `400 Bad Request` - Unknown metric or limit out of range
#[utoipa::path(
    get,
    path = "/api/users/leaderboard",
    tag = USER_TAG,
    params(
        ("sort_by" = Option<String>, Query, description = "points, countries or continents (default: points)"),
        ("limit" = Option<i64>, Query, description = "Number of rows, 1 to 100 (default: 50)")
    ),
    responses(
        (status = 200, description = "Leaderboard rows", body = Vec<LeaderboardEntryDto>),
        (status = 400, description = "Invalid metric or limit", body = ErrorDto)
    ),
)]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> Result<impl IntoResponse, AppError> {
    if !(1..=MAX_LEADERBOARD_LIMIT).contains(&params.limit) {
        return Err(AppError::BadRequest(format!(
            "limit must be between 1 and {}",
            MAX_LEADERBOARD_LIMIT
        )));
    }
    let metric: Metric = params.sort_by.parse()?;

    let service = UserService::new(&state.db, &state.ranking);

    let entries = service.leaderboard(metric, params.limit).await?;

    let dtos: Vec<LeaderboardEntryDto> = entries.into_iter().map(|e| e.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Get the caller's statistics and global ranks.
///
/// # Returns
/// - `200 OK` - Statistics with `global_rank_points`, `global_rank_countries` and
///   `global_rank_continents`
/// - `401 Unauthorized` - Missing or unknown user
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/users/me/stats",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Caller's statistics", body = StatsDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_my_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers).require().await?;

    let service = UserService::new(&state.db, &state.ranking);

    let (stats, ranks) = service.get_stats_with_ranks(user.id).await?;

    let mut dto = stats.into_dto();
    dto.global_rank_points = Some(ranks.points);
    dto.global_rank_countries = Some(ranks.countries);
    dto.global_rank_continents = Some(ranks.continents);

    Ok((StatusCode::OK, Json(dto)))
}

/// Update the caller's profile.
///
/// Omitted fields are left unchanged; an empty bio clears it.
///
/// # Returns
/// - `200 OK` - The updated user
/// - `400 Bad Request` - Empty or taken username
/// - `401 Unauthorized` - Missing or unknown user
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    put,
    path = "/api/users/me",
    tag = USER_TAG,
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Updated user", body = UserDto),
        (status = 400, description = "Invalid or taken username", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_my_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<UpdateProfileDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers).require().await?;

    let service = UserService::new(&state.db, &state.ranking);

    let updated = service
        .update_profile(UpdateProfileParam {
            user_id: user.id,
            username: payload.username,
            bio: payload.bio.map(Some),
        })
        .await?;

    Ok((StatusCode::OK, Json(updated.into_dto())))
}

/// Get a user's public profile.
///
/// # Returns
/// - `200 OK` - Public user fields and statistics (without ranks)
/// - `404 Not Found` - No such user
#[utoipa::path(
    get,
    path = "/api/users/{user_id}/profile",
    tag = USER_TAG,
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Public profile", body = ProfileDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_public_profile(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let service = UserService::new(&state.db, &state.ranking);

    let (user, stats) = service.get_profile(user_id).await?;

    Ok((
        StatusCode::OK,
        Json(ProfileDto {
            user: user.into_public_dto(),
            stats: stats.into_dto(),
        }),
    ))
}

/// Get the public summary of a map.
///
/// Lets a user see what they are invited to before joining. No authentication.
///
/// # Returns
/// - `200 OK` - Map name, type and creator username
/// - `404 Not Found` - No such map
#[utoipa::path(
    get,
    path = "/api/users/map-info/{map_id}",
    tag = USER_TAG,
    params(
        ("map_id" = i32, Path, description = "Map ID")
    ),
    responses(
        (status = 200, description = "Public map summary", body = MapInfoDto),
        (status = 404, description = "Map not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_map_info(
    State(state): State<AppState>,
    Path(map_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let service = MapService::new(&state.db, &state.ranking);

    let info = service.info(map_id).await?;

    Ok((StatusCode::OK, Json(info.into_dto())))
}
