use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{map, notification, point, route, user},
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(info(
    title = "Odyssey API",
    description = "Travel maps, geographic achievements and leaderboards"
))]
struct ApiDoc;

/// Builds the API router with Swagger UI served at `/api/docs`.
pub fn router() -> Router<AppState> {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(user::create_user))
        .routes(routes!(user::search_users))
        .routes(routes!(user::get_leaderboard))
        .routes(routes!(user::get_my_stats))
        .routes(routes!(user::update_my_profile))
        .routes(routes!(user::get_public_profile))
        .routes(routes!(user::get_map_info))
        .routes(routes!(map::create_map, map::get_maps))
        .routes(routes!(map::get_map, map::delete_map))
        .routes(routes!(map::join_map))
        .routes(routes!(map::leave_map))
        .routes(routes!(map::get_participants, map::invite_participant))
        .routes(routes!(map::accept_invite))
        .routes(routes!(map::decline_invite))
        .routes(routes!(map::update_participant_color))
        .routes(routes!(map::remove_participant))
        .routes(routes!(point::add_point, point::get_points))
        .routes(routes!(point::get_points_paginated))
        .routes(routes!(point::update_point, point::delete_point))
        .routes(routes!(route::create_route, route::get_routes))
        .routes(routes!(route::update_route, route::delete_route))
        .routes(routes!(notification::get_notifications))
        .routes(routes!(notification::get_notification_count))
        .routes(routes!(notification::mark_as_read))
        .routes(routes!(notification::mark_all_as_read))
        .routes(routes!(notification::delete_notification))
        .split_for_parts();

    router.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
