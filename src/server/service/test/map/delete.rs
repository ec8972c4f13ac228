use super::*;

/// Tests deleting a map.
///
/// Verifies that routes, points and memberships go with the map and every
/// affected user's statistics are refreshed.
///
/// Expected: Ok with nothing left for the map and zeroed leaderboard rows
#[tokio::test]
async fn removes_points_and_refreshes_index() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let ranking = RankingIndex::new();

    let (owner, map, _) = factory::helpers::create_map_with_owner(db).await?;
    let friend = factory::create_user(db).await?;
    factory::create_participant(db, map.id, friend.id).await?;
    let rome = factory::create_point(db, map.id, owner.id, "Rome", "Italy", "Europe").await?;
    let milan = factory::create_point(db, map.id, friend.id, "Milan", "Italy", "Europe").await?;
    factory::create_route(db, map.id, friend.id, milan.id, rome.id).await?;
    ranking.rebuild(db).await?;

    let service = MapService::new(db, &ranking);
    service.delete(map.id, owner.id).await?;

    assert!(matches!(
        service.get_for_user(map.id, owner.id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(PointRepository::new(db).list_all_visible().await?.is_empty());
    assert!(RouteRepository::new(db).get_by_map(map.id).await?.is_empty());
    assert_eq!(
        MapParticipantRepository::new(db).count_by_map(map.id).await?,
        0
    );

    let board = ranking.leaderboard(Metric::TotalPoints, 10).await?;
    assert!(board.iter().all(|e| e.total_points == 0));

    Ok(())
}

/// Tests deleting someone else's map.
///
/// Expected: Err(AppError::Forbidden) and the map still present
#[tokio::test]
async fn only_creator_can_delete() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let ranking = RankingIndex::new();

    let (owner, map, _) = factory::helpers::create_map_with_owner(db).await?;
    let friend = factory::create_user(db).await?;
    factory::create_participant(db, map.id, friend.id).await?;

    let service = MapService::new(db, &ranking);
    let result = service.delete(map.id, friend.id).await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
    assert!(service.get_for_user(map.id, owner.id).await.is_ok());

    Ok(())
}
