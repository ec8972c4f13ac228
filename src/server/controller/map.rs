use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        map::{ColorUpdateDto, CreateMapDto, InviteDto, MapDto, ParticipantDto},
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, model::map::CreateMapParam,
        service::map::MapService, state::AppState,
    },
};

/// Tag for grouping map endpoints in OpenAPI documentation
pub static MAP_TAG: &str = "map";

/// Create a new map.
///
/// The caller becomes the map's creator and joins it as `Owner`.
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `headers` - Request headers carrying the authenticated user id
/// - `payload` - Map name and type (`Collaborative`, `Competitive` or `Personal`)
///
/// # Returns
/// - `201 Created` - The created map
/// - `400 Bad Request` - Empty name or invalid map type
/// - `401 Unauthorized` - Missing or unknown user
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/maps",
    tag = MAP_TAG,
    request_body = CreateMapDto,
    responses(
        (status = 201, description = "Successfully created map", body = MapDto),
        (status = 400, description = "Invalid map data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_map(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateMapDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers).require().await?;

    let service = MapService::new(&state.db, &state.ranking);

    // Convert DTO to server model
    let param = CreateMapParam::from_dto(user.id, payload)?;

    let map = service.create(param).await?;

    Ok((StatusCode::CREATED, Json(map.into_dto())))
}

/// Get the caller's maps.
///
/// Returns maps the caller created or participates in, ordered by id.
///
/// # Returns
/// - `200 OK` - The caller's maps
/// - `401 Unauthorized` - Missing or unknown user
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/maps",
    tag = MAP_TAG,
    responses(
        (status = 200, description = "Caller's maps", body = Vec<MapDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_maps(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers).require().await?;

    let service = MapService::new(&state.db, &state.ranking);

    let maps = service.list_for_user(user.id).await?;

    let dtos: Vec<MapDto> = maps.into_iter().map(|m| m.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Get a map by ID.
///
/// # Access Control
/// - Creator or participant of the map
///
/// # Returns
/// - `200 OK` - The map
/// - `401 Unauthorized` - Missing or unknown user
/// - `403 Forbidden` - Caller has no access to the map
/// - `404 Not Found` - No such map
#[utoipa::path(
    get,
    path = "/api/maps/{map_id}",
    tag = MAP_TAG,
    params(
        ("map_id" = i32, Path, description = "Map ID")
    ),
    responses(
        (status = 200, description = "The map", body = MapDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "Map not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_map(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(map_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers).require().await?;

    let service = MapService::new(&state.db, &state.ranking);

    let map = service.get_for_user(map_id, user.id).await?;

    Ok((StatusCode::OK, Json(map.into_dto())))
}

/// Delete a map.
///
/// Removes the map together with every point and membership on it.
///
/// # Access Control
/// - Creator of the map
///
/// # Returns
/// - `204 No Content` - Map deleted
/// - `401 Unauthorized` - Missing or unknown user
/// - `403 Forbidden` - Caller is not the creator
/// - `404 Not Found` - No such map
#[utoipa::path(
    delete,
    path = "/api/maps/{map_id}",
    tag = MAP_TAG,
    params(
        ("map_id" = i32, Path, description = "Map ID")
    ),
    responses(
        (status = 204, description = "Map deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Only the owner can delete this map", body = ErrorDto),
        (status = 404, description = "Map not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_map(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(map_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers).require().await?;

    let service = MapService::new(&state.db, &state.ranking);

    service.delete(map_id, user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Join a map.
///
/// Collaborative maps are joined as `Collaborator`, competitive maps as `Competitor`.
/// Points the caller left behind on this map become visible again.
///
/// # Returns
/// - `200 OK` - The new membership
/// - `400 Bad Request` - Already a participant
/// - `401 Unauthorized` - Missing or unknown user
/// - `403 Forbidden` - Personal map
/// - `404 Not Found` - No such map
#[utoipa::path(
    post,
    path = "/api/maps/{map_id}/join",
    tag = MAP_TAG,
    params(
        ("map_id" = i32, Path, description = "Map ID")
    ),
    responses(
        (status = 200, description = "Successfully joined the map", body = ParticipantDto),
        (status = 400, description = "Already a participant", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Cannot join a Personal map", body = ErrorDto),
        (status = 404, description = "Map not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn join_map(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(map_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers).require().await?;

    let service = MapService::new(&state.db, &state.ranking);

    let participant = service.join(map_id, user.id).await?;

    Ok((StatusCode::OK, Json(participant.into_dto())))
}

/// Leave a map.
///
/// The caller's points on the map are hidden until they rejoin, and the map's creator
/// receives a `leave` notification.
///
/// # Returns
/// - `200 OK` - Left the map
/// - `400 Bad Request` - Caller is the map's owner
/// - `401 Unauthorized` - Missing or unknown user
/// - `404 Not Found` - No such map, or caller is not a participant
#[utoipa::path(
    delete,
    path = "/api/maps/{map_id}/participants/leave",
    tag = MAP_TAG,
    params(
        ("map_id" = i32, Path, description = "Map ID")
    ),
    responses(
        (status = 200, description = "Left the map", body = MessageDto),
        (status = 400, description = "Owner cannot leave their own map", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Map not found or not a participant", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn leave_map(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(map_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers).require().await?;

    let service = MapService::new(&state.db, &state.ranking);

    service.leave(map_id, user.id).await?;

    Ok((StatusCode::OK, Json(MessageDto::new("You left the map"))))
}

/// Get a map's participants.
///
/// # Returns
/// - `200 OK` - Participants in join order
/// - `401 Unauthorized` - Missing or unknown user
/// - `403 Forbidden` - Caller has no access to the map
/// - `404 Not Found` - No such map
#[utoipa::path(
    get,
    path = "/api/maps/{map_id}/participants",
    tag = MAP_TAG,
    params(
        ("map_id" = i32, Path, description = "Map ID")
    ),
    responses(
        (status = 200, description = "Participants", body = Vec<ParticipantDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "Map not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_participants(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(map_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers).require().await?;

    let service = MapService::new(&state.db, &state.ranking);

    let participants = service.list_participants(map_id, user.id).await?;

    let dtos: Vec<ParticipantDto> = participants.into_iter().map(|p| p.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Invite a user to a map.
///
/// Sends the user an `invite` notification carrying the map id, which they can accept or
/// decline.
///
/// # Access Control
/// - Creator of the map
///
/// # Returns
/// - `200 OK` - Invitation sent
/// - `400 Bad Request` - Inviting yourself, an existing participant or a user with a
///   pending invitation
/// - `401 Unauthorized` - Missing or unknown user
/// - `403 Forbidden` - Caller is not the creator, or the map is personal
/// - `404 Not Found` - No such map or user
#[utoipa::path(
    post,
    path = "/api/maps/{map_id}/participants",
    tag = MAP_TAG,
    params(
        ("map_id" = i32, Path, description = "Map ID")
    ),
    request_body = InviteDto,
    responses(
        (status = 200, description = "Invitation sent", body = MessageDto),
        (status = 400, description = "User cannot be invited", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Only the owner can invite participants", body = ErrorDto),
        (status = 404, description = "Map or user not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn invite_participant(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(map_id): Path<i32>,
    Json(payload): Json<InviteDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers).require().await?;

    let service = MapService::new(&state.db, &state.ranking);

    service.invite(map_id, user.id, &payload.username).await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new(format!(
            "Invitation sent to {}",
            payload.username.trim()
        ))),
    ))
}

/// Accept an invitation.
///
/// Joins the map like `join`, restores the caller's hidden points on it and marks the
/// invitation read.
///
/// # Returns
/// - `200 OK` - Joined the map
/// - `400 Bad Request` - Not an invitation to this map, or already a participant
/// - `401 Unauthorized` - Missing or unknown user
/// - `404 Not Found` - No such map or notification
#[utoipa::path(
    post,
    path = "/api/maps/{map_id}/participants/accept/{notification_id}",
    tag = MAP_TAG,
    params(
        ("map_id" = i32, Path, description = "Map ID"),
        ("notification_id" = i32, Path, description = "Invitation notification ID")
    ),
    responses(
        (status = 200, description = "Successfully joined the map", body = MessageDto),
        (status = 400, description = "Invalid invitation", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Map or notification not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn accept_invite(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((map_id, notification_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers).require().await?;

    let service = MapService::new(&state.db, &state.ranking);

    let (_, restored) = service
        .accept_invite(map_id, notification_id, user.id)
        .await?;

    let message = if restored > 0 {
        format!("Successfully joined the map. {} points restored.", restored)
    } else {
        "Successfully joined the map".to_string()
    };

    Ok((StatusCode::OK, Json(MessageDto::new(message))))
}

/// Decline an invitation.
///
/// # Returns
/// - `200 OK` - Invitation declined
/// - `400 Bad Request` - Not an invitation to this map
/// - `401 Unauthorized` - Missing or unknown user
/// - `404 Not Found` - No such notification
#[utoipa::path(
    post,
    path = "/api/maps/{map_id}/participants/decline/{notification_id}",
    tag = MAP_TAG,
    params(
        ("map_id" = i32, Path, description = "Map ID"),
        ("notification_id" = i32, Path, description = "Invitation notification ID")
    ),
    responses(
        (status = 200, description = "Invitation declined", body = MessageDto),
        (status = 400, description = "Invalid invitation", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Notification not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn decline_invite(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((map_id, notification_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers).require().await?;

    let service = MapService::new(&state.db, &state.ranking);

    service
        .decline_invite(map_id, notification_id, user.id)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Invitation declined"))))
}

/// Change a participant's color.
///
/// # Access Control
/// - The participant themselves, or the creator of the map
///
/// # Returns
/// - `200 OK` - Color updated
/// - `400 Bad Request` - Not a `#RRGGBB` color
/// - `401 Unauthorized` - Missing or unknown user
/// - `403 Forbidden` - Caller may not change this participant's color
/// - `404 Not Found` - No such map or participant
#[utoipa::path(
    put,
    path = "/api/maps/{map_id}/participants/{user_id}/color",
    tag = MAP_TAG,
    params(
        ("map_id" = i32, Path, description = "Map ID"),
        ("user_id" = i32, Path, description = "Participant's user ID")
    ),
    request_body = ColorUpdateDto,
    responses(
        (status = 200, description = "Color updated", body = MessageDto),
        (status = 400, description = "Invalid color", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Only the owner can change others' colors", body = ErrorDto),
        (status = 404, description = "Map or participant not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_participant_color(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((map_id, user_id)): Path<(i32, i32)>,
    Json(payload): Json<ColorUpdateDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers).require().await?;

    let service = MapService::new(&state.db, &state.ranking);

    service
        .update_color(map_id, user.id, user_id, &payload.color)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Color updated"))))
}

/// Remove a participant from a map.
///
/// The removed user's points on the map are hidden until they rejoin, and they receive a
/// `removed` notification.
///
/// # Access Control
/// - Creator of the map
///
/// # Returns
/// - `200 OK` - Participant removed
/// - `400 Bad Request` - Target is the creator
/// - `401 Unauthorized` - Missing or unknown user
/// - `403 Forbidden` - Caller is not the creator
/// - `404 Not Found` - No such map or participant
#[utoipa::path(
    delete,
    path = "/api/maps/{map_id}/participants/{user_id}",
    tag = MAP_TAG,
    params(
        ("map_id" = i32, Path, description = "Map ID"),
        ("user_id" = i32, Path, description = "Participant's user ID")
    ),
    responses(
        (status = 200, description = "Participant removed", body = MessageDto),
        (status = 400, description = "Cannot remove the owner", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Only the owner can remove participants", body = ErrorDto),
        (status = 404, description = "Map or participant not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_participant(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((map_id, user_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers).require().await?;

    let service = MapService::new(&state.db, &state.ranking);

    service.remove_participant(map_id, user.id, user_id).await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Participant removed"))))
}
