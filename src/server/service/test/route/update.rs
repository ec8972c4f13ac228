use super::*;

/// Tests moving a route to other points.
///
/// Expected: Ok for the author, Err(AppError::Forbidden) for anyone else
#[tokio::test]
async fn only_author_can_move_route() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, map, _) = factory::helpers::create_map_with_owner(db).await?;
    let friend = factory::create_user(db).await?;
    factory::create_participant(db, map.id, friend.id).await?;
    let a = factory::create_point(db, map.id, friend.id, "Hue", "Vietnam", "Asia").await?;
    let b = factory::create_point(db, map.id, friend.id, "Hoi An", "Vietnam", "Asia").await?;
    let c = factory::create_point(db, map.id, friend.id, "Da Nang", "Vietnam", "Asia").await?;
    let route = factory::create_route(db, map.id, friend.id, a.id, b.id).await?;

    let service = RouteService::new(db);

    let result = service.update(route.id, leg(map.id, owner.id, a.id, c.id)).await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));

    let moved = service
        .update(route.id, leg(map.id, friend.id, b.id, c.id))
        .await?;
    assert_eq!(moved.route.start_point_id, b.id);
    assert_eq!(moved.route.end_point_id, c.id);

    Ok(())
}
