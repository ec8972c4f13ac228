use super::*;

/// Tests the first point of a user.
///
/// Verifies that the first visit unlocks the level 1 badge in the city,
/// country and continent categories, each with its own notification, and that
/// the user's leaderboard row is updated.
///
/// Expected: Ok with three achievement notifications
#[tokio::test]
async fn first_point_unlocks_badges() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let ranking = RankingIndex::new();

    let (user, map, _) = factory::helpers::create_map_with_owner(db).await?;
    ranking.rebuild(db).await?;

    let point = PointService::new(db, &ranking)
        .add(visit(map.id, user.id, "Rome", "Italy", "Europe"))
        .await?;
    assert_eq!(point.city.as_deref(), Some("Rome"));

    let notifications = NotificationRepository::new(db)
        .get_by_user(user.id, true)
        .await?;
    assert_eq!(notifications.len(), 3);
    assert!(notifications.iter().all(|n| n.kind == "achievement"));

    let titles: Vec<&str> = notifications.iter().map(|n| n.title.as_str()).collect();
    assert!(titles.contains(&"Explorer: Traveler"));
    assert!(titles.contains(&"Voyager: Traveler"));
    assert!(titles.contains(&"Pioneer: Traveler"));

    let board = ranking.leaderboard(Metric::TotalPoints, 1).await?;
    assert_eq!(board[0].user_id, user.id);
    assert_eq!(board[0].total_points, 1);
    assert_eq!(board[0].total_badges, 3);

    Ok(())
}

/// Tests a repeated visit.
///
/// Verifies that a point adding no new distinct place sends no notification.
///
/// Expected: Ok with no new notifications
#[tokio::test]
async fn repeated_place_unlocks_nothing() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let ranking = RankingIndex::new();

    let (user, map, _) = factory::helpers::create_map_with_owner(db).await?;
    factory::create_point(db, map.id, user.id, "Rome", "Italy", "Europe").await?;

    PointService::new(db, &ranking)
        .add(visit(map.id, user.id, "Rome", "Italy", "Europe"))
        .await?;

    let counts = NotificationRepository::new(db).counts(user.id).await?;
    assert_eq!(counts.total, 0);

    Ok(())
}

/// Tests adding a point without being a participant.
///
/// Expected: Err(AppError::Forbidden)
#[tokio::test]
async fn rejects_non_participant() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let ranking = RankingIndex::new();

    let (_, map, _) = factory::helpers::create_map_with_owner(db).await?;
    let outsider = factory::create_user(db).await?;

    let result = PointService::new(db, &ranking)
        .add(visit(map.id, outsider.id, "Rome", "Italy", "Europe"))
        .await;

    assert!(matches!(
        result,
        Err(AppError::Forbidden(msg)) if msg == "You are not a participant of this map"
    ));

    Ok(())
}

/// Tests adding a point with an out of range latitude.
///
/// Expected: Err(AppError::BadRequest) and nothing stored
#[tokio::test]
async fn rejects_invalid_latitude() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let ranking = RankingIndex::new();

    let (user, map, _) = factory::helpers::create_map_with_owner(db).await?;

    let mut param = visit(map.id, user.id, "Rome", "Italy", "Europe");
    param.latitude = 91.0;

    let service = PointService::new(db, &ranking);
    let result = service.add(param).await;

    assert!(matches!(
        result,
        Err(AppError::BadRequest(msg)) if msg == "Latitude must be between -90 and 90"
    ));
    assert!(service.list_for_map(map.id, user.id).await?.is_empty());

    Ok(())
}

/// Tests two points added at once by the same user.
///
/// Verifies that each badge is notified exactly once when the adds overlap,
/// since statistics before and after each add are read under the user's lock.
///
/// Expected: Ok with four distinct achievement notifications
#[tokio::test]
async fn concurrent_adds_notify_each_badge_once() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let ranking = RankingIndex::new();

    let (user, map, _) = factory::helpers::create_map_with_owner(db).await?;
    ranking.rebuild(db).await?;

    let service = PointService::new(db, &ranking);
    let (first, second) = tokio::join!(
        service.add(visit(map.id, user.id, "Porto", "Portugal", "Europe")),
        service.add(visit(map.id, user.id, "Braga", "Portugal", "Europe")),
    );
    first?;
    second?;

    let notifications = NotificationRepository::new(db)
        .get_by_user(user.id, true)
        .await?;
    let mut titles: Vec<&str> = notifications.iter().map(|n| n.title.as_str()).collect();
    titles.sort_unstable();
    assert_eq!(
        titles,
        vec![
            "Explorer: Traveler",
            "Explorer: Wanderer",
            "Pioneer: Traveler",
            "Voyager: Traveler"
        ]
    );

    let board = ranking.leaderboard(Metric::TotalPoints, 1).await?;
    assert_eq!(board[0].total_points, 2);
    assert_eq!(board[0].total_badges, 4);

    Ok(())
}
