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
        point::{CreatePointDto, PointDto, PointPageDto, UpdatePointDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::point::{CreatePointParam, PointPageParam, PointSort, UpdatePointParam},
        service::point::PointService,
        state::AppState,
    },
};

/// Tag for grouping point endpoints in OpenAPI documentation
pub static POINT_TAG: &str = "point";

const MAX_PAGE_LIMIT: u64 = 100;

#[derive(Deserialize)]
pub struct PointPageParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
    pub search: Option<String>,
    #[serde(default)]
    pub sort_by: String,
    #[serde(default = "default_sort_order")]
    pub sort_order: String,
    pub country: Option<String>,
    pub city: Option<String>,
    pub category: Option<String>,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    20
}

fn default_sort_order() -> String {
    "desc".to_string()
}

impl PointPageParams {
    /// Validates paging and normalises filters.
    ///
    /// Blank filters are ignored and an unknown `sort_by` falls back to the timestamp.
    fn into_param(self, map_id: i32) -> Result<PointPageParam, AppError> {
        if self.page < 1 {
            return Err(AppError::BadRequest("page must be at least 1".to_string()));
        }
        if !(1..=MAX_PAGE_LIMIT).contains(&self.limit) {
            return Err(AppError::BadRequest(format!(
                "limit must be between 1 and {}",
                MAX_PAGE_LIMIT
            )));
        }

        let filter = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Ok(PointPageParam {
            map_id,
            page: self.page,
            limit: self.limit,
            search: filter(self.search),
            country: filter(self.country),
            city: filter(self.city),
            category: filter(self.category),
            sort: self.sort_by.parse().unwrap_or(PointSort::Timestamp),
            descending: !self.sort_order.eq_ignore_ascii_case("asc"),
        })
    }
}

/// Add a point to a map.
///
/// Logs a visit at the given coordinates. Place names come resolved in the request body.
/// Unlocking a new badge sends the caller an `achievement` notification.
///
/// # Access Control
/// - Participant of the map
///
/// # Returns
/// - `201 Created` - The created point
/// - `400 Bad Request` - Latitude or longitude out of range
/// - `401 Unauthorized` - Missing or unknown user
/// - `403 Forbidden` - Caller is not a participant
/// - `404 Not Found` - No such map
#[utoipa::path(
    post,
    path = "/api/maps/{map_id}/points",
    tag = POINT_TAG,
    params(
        ("map_id" = i32, Path, description = "Map ID")
    ),
    request_body = CreatePointDto,
    responses(
        (status = 201, description = "Successfully added point", body = PointDto),
        (status = 400, description = "Invalid coordinates", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "You are not a participant of this map", body = ErrorDto),
        (status = 404, description = "Map not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_point(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(map_id): Path<i32>,
    Json(payload): Json<CreatePointDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers).require().await?;

    let service = PointService::new(&state.db, &state.ranking);

    let point = service
        .add(CreatePointParam::from_dto(map_id, user.id, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(point.into_dto())))
}

/// Get the visible points on a map.
///
/// # Returns
/// - `200 OK` - Visible points ordered by id
/// - `401 Unauthorized` - Missing or unknown user
/// - `403 Forbidden` - Caller has no access to the map
/// - `404 Not Found` - No such map
#[utoipa::path(
    get,
    path = "/api/maps/{map_id}/points",
    tag = POINT_TAG,
    params(
        ("map_id" = i32, Path, description = "Map ID")
    ),
    responses(
        (status = 200, description = "Visible points", body = Vec<PointDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "Map not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_points(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(map_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers).require().await?;

    let service = PointService::new(&state.db, &state.ranking);

    let points = service.list_for_map(map_id, user.id).await?;

    let dtos: Vec<PointDto> = points.into_iter().map(|p| p.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Get one page of the visible points on a map.
///
/// Supports a free-text `search` over place names, category and description, exact
/// `country`, `city` and `category` filters, and sorting by `timestamp`, `city`,
/// `region`, `country` or `category`.
///
/// # Returns
/// - `200 OK` - The requested page with totals
/// - `400 Bad Request` - `page` below 1 or `limit` outside 1..=100
/// - `401 Unauthorized` - Missing or unknown user
/// - `403 Forbidden` - Caller has no access to the map
/// - `404 Not Found` - No such map
#[utoipa::path(
    get,
    path = "/api/maps/{map_id}/points/paginated",
    tag = POINT_TAG,
    params(
        ("map_id" = i32, Path, description = "Map ID"),
        ("page" = Option<u64>, Query, description = "1-based page number (default 1)"),
        ("limit" = Option<u64>, Query, description = "Page size, 1 to 100 (default 20)"),
        ("search" = Option<String>, Query, description = "Case-insensitive text search"),
        ("sort_by" = Option<String>, Query, description = "timestamp, city, region, country or category"),
        ("sort_order" = Option<String>, Query, description = "asc or desc (default desc)"),
        ("country" = Option<String>, Query, description = "Exact country filter"),
        ("city" = Option<String>, Query, description = "Exact city filter"),
        ("category" = Option<String>, Query, description = "Exact category filter")
    ),
    responses(
        (status = 200, description = "Page of visible points", body = PointPageDto),
        (status = 400, description = "Invalid paging", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "Map not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_points_paginated(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(map_id): Path<i32>,
    Query(params): Query<PointPageParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers).require().await?;

    let param = params.into_param(map_id)?;

    let service = PointService::new(&state.db, &state.ranking);

    let page = service.list_page(param, user.id).await?;

    Ok((StatusCode::OK, Json(page.into_dto())))
}

/// Edit one of the caller's points.
///
/// Omitted fields keep their value. A changed place name can unlock badges, which sends
/// `achievement` notifications as when adding a point.
///
/// # Returns
/// - `200 OK` - The updated point
/// - `400 Bad Request` - Latitude or longitude out of range
/// - `401 Unauthorized` - Missing or unknown user
/// - `403 Forbidden` - Point belongs to another user
/// - `404 Not Found` - No such visible point on this map
#[utoipa::path(
    put,
    path = "/api/maps/{map_id}/points/{point_id}",
    tag = POINT_TAG,
    params(
        ("map_id" = i32, Path, description = "Map ID"),
        ("point_id" = i32, Path, description = "Point ID")
    ),
    request_body = UpdatePointDto,
    responses(
        (status = 200, description = "Point updated", body = PointDto),
        (status = 400, description = "Invalid coordinates", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "You can only edit your own points", body = ErrorDto),
        (status = 404, description = "Point not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_point(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((map_id, point_id)): Path<(i32, i32)>,
    Json(payload): Json<UpdatePointDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers).require().await?;

    let service = PointService::new(&state.db, &state.ranking);

    let point = service
        .update(UpdatePointParam::from_dto(map_id, point_id, user.id, payload))
        .await?;

    Ok((StatusCode::OK, Json(point.into_dto())))
}

/// Delete one of the caller's points.
///
/// Routes that start or end at the point are deleted with it.
///
/// # Returns
/// - `204 No Content` - Point deleted
/// - `401 Unauthorized` - Missing or unknown user
/// - `403 Forbidden` - Point belongs to another user
/// - `404 Not Found` - No such point on this map
#[utoipa::path(
    delete,
    path = "/api/maps/{map_id}/points/{point_id}",
    tag = POINT_TAG,
    params(
        ("map_id" = i32, Path, description = "Map ID"),
        ("point_id" = i32, Path, description = "Point ID")
    ),
    responses(
        (status = 204, description = "Point deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "You can only delete your own points", body = ErrorDto),
        (status = 404, description = "Point not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_point(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((map_id, point_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers).require().await?;

    let service = PointService::new(&state.db, &state.ranking);

    service.delete(map_id, point_id, user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
