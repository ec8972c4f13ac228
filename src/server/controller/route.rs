use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        route::{RouteDto, RouteRequestDto},
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, model::route::RouteParam,
        service::route::RouteService, state::AppState,
    },
};

/// Tag for grouping route endpoints in OpenAPI documentation
pub static ROUTE_TAG: &str = "route";

/// Draw a route between two points of a map.
///
/// # Access Control
/// - Participant of the map
///
/// # Returns
/// - `201 Created` - The created route in the caller's color
/// - `400 Bad Request` - Start or end point missing or on another map
/// - `401 Unauthorized` - Missing or unknown user
/// - `403 Forbidden` - Caller is not a participant
/// - `404 Not Found` - No such map
#[utoipa::path(
    post,
    path = "/api/maps/{map_id}/routes",
    tag = ROUTE_TAG,
    params(
        ("map_id" = i32, Path, description = "Map ID")
    ),
    request_body = RouteRequestDto,
    responses(
        (status = 201, description = "Route created", body = RouteDto),
        (status = 400, description = "Invalid start or end point", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not a participant", body = ErrorDto),
        (status = 404, description = "Map not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(map_id): Path<i32>,
    Json(payload): Json<RouteRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers).require().await?;

    let service = RouteService::new(&state.db);

    let route = service
        .create(RouteParam {
            map_id,
            user_id: user.id,
            start_point_id: payload.start_point_id,
            end_point_id: payload.end_point_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(route.into_dto())))
}

/// Get the routes on a map.
///
/// # Returns
/// - `200 OK` - Routes ordered by id, each in its author's color
/// - `401 Unauthorized` - Missing or unknown user
/// - `403 Forbidden` - Caller has no access to the map
/// - `404 Not Found` - No such map
#[utoipa::path(
    get,
    path = "/api/maps/{map_id}/routes",
    tag = ROUTE_TAG,
    params(
        ("map_id" = i32, Path, description = "Map ID")
    ),
    responses(
        (status = 200, description = "Routes", body = Vec<RouteDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "Map not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_routes(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(map_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers).require().await?;

    let service = RouteService::new(&state.db);

    let routes = service.list(map_id, user.id).await?;

    let dtos: Vec<RouteDto> = routes.into_iter().map(|r| r.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Move one of the caller's routes to other points.
///
/// # Returns
/// - `200 OK` - The updated route
/// - `400 Bad Request` - Start or end point missing or on another map
/// - `401 Unauthorized` - Missing or unknown user
/// - `403 Forbidden` - Route belongs to another user
/// - `404 Not Found` - No such route on this map
#[utoipa::path(
    put,
    path = "/api/maps/{map_id}/routes/{route_id}",
    tag = ROUTE_TAG,
    params(
        ("map_id" = i32, Path, description = "Map ID"),
        ("route_id" = i32, Path, description = "Route ID")
    ),
    request_body = RouteRequestDto,
    responses(
        (status = 200, description = "Route updated", body = RouteDto),
        (status = 400, description = "Invalid start or end point", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Cannot edit other user's route", body = ErrorDto),
        (status = 404, description = "Route not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((map_id, route_id)): Path<(i32, i32)>,
    Json(payload): Json<RouteRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers).require().await?;

    let service = RouteService::new(&state.db);

    let route = service
        .update(
            route_id,
            RouteParam {
                map_id,
                user_id: user.id,
                start_point_id: payload.start_point_id,
                end_point_id: payload.end_point_id,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(route.into_dto())))
}

/// Delete a route.
///
/// # Access Control
/// - Author of the route, or creator of the map
///
/// # Returns
/// - `204 No Content` - Route deleted
/// - `401 Unauthorized` - Missing or unknown user
/// - `403 Forbidden` - Caller is neither author nor creator
/// - `404 Not Found` - No such route on this map
#[utoipa::path(
    delete,
    path = "/api/maps/{map_id}/routes/{route_id}",
    tag = ROUTE_TAG,
    params(
        ("map_id" = i32, Path, description = "Map ID"),
        ("route_id" = i32, Path, description = "Route ID")
    ),
    responses(
        (status = 204, description = "Route deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Cannot delete other user's route", body = ErrorDto),
        (status = 404, description = "Route not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((map_id, route_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers).require().await?;

    let service = RouteService::new(&state.db);

    service.delete(map_id, route_id, user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
