use super::*;

/// Tests who may delete a route.
///
/// Verifies that another participant is refused while the map's creator may
/// delete any route on the map.
///
/// Expected: Err(AppError::Forbidden) then Ok with the route gone
#[tokio::test]
async fn author_or_creator_can_delete() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, map, _) = factory::helpers::create_map_with_owner(db).await?;
    let author = factory::create_user(db).await?;
    let bystander = factory::create_user(db).await?;
    factory::create_participant(db, map.id, author.id).await?;
    factory::create_participant(db, map.id, bystander.id).await?;
    let a = factory::create_point(db, map.id, author.id, "Fes", "Morocco", "Africa").await?;
    let b = factory::create_point(db, map.id, author.id, "Rabat", "Morocco", "Africa").await?;
    let route = factory::create_route(db, map.id, author.id, a.id, b.id).await?;

    let service = RouteService::new(db);

    let result = service.delete(map.id, route.id, bystander.id).await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));

    service.delete(map.id, route.id, owner.id).await?;
    assert!(service.list(map.id, owner.id).await?.is_empty());

    let result = service.delete(map.id, route.id, author.id).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
