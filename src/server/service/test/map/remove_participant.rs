use super::*;

/// Tests the owner removing a participant.
///
/// Verifies that the removed user's points are hidden, the membership is gone,
/// the user is told with a `removed` notification and their leaderboard row
/// drops the hidden points.
///
/// Expected: Ok with points hidden, one notification and a refreshed index
#[tokio::test]
async fn hides_points_notifies_and_refreshes() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let ranking = RankingIndex::new();

    let (owner, map, _) = factory::helpers::create_map_with_owner(db).await?;
    let friend = factory::create_user(db).await?;
    factory::create_participant(db, map.id, friend.id).await?;
    factory::create_point(db, map.id, friend.id, "Kyoto", "Japan", "Asia").await?;
    ranking.rebuild(db).await?;

    MapService::new(db, &ranking)
        .remove_participant(map.id, owner.id, friend.id)
        .await?;

    assert!(PointRepository::new(db)
        .list_visible_by_user(friend.id)
        .await?
        .is_empty());
    assert!(MapParticipantRepository::new(db)
        .find(map.id, friend.id)
        .await?
        .is_none());

    let notifications = NotificationRepository::new(db)
        .get_by_user(friend.id, false)
        .await?;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, "removed");
    assert_eq!(notifications[0].map_id(), Some(map.id));
    assert!(notifications[0].message.contains(&owner.username));

    let board = ranking.leaderboard(Metric::TotalPoints, 10).await?;
    let friend_row = board.iter().find(|e| e.user_id == friend.id).unwrap();
    assert_eq!(friend_row.total_points, 0);

    Ok(())
}

/// Tests removal requests the owner check rejects.
///
/// Expected: Forbidden for a non-owner, BadRequest for the owner themselves and
/// NotFound for a user who is not a participant
#[tokio::test]
async fn rejects_invalid_removals() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let ranking = RankingIndex::new();

    let (owner, map, _) = factory::helpers::create_map_with_owner(db).await?;
    let friend = factory::create_user(db).await?;
    factory::create_participant(db, map.id, friend.id).await?;
    let stranger = factory::create_user(db).await?;

    let service = MapService::new(db, &ranking);

    let result = service.remove_participant(map.id, friend.id, owner.id).await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));

    let result = service.remove_participant(map.id, owner.id, owner.id).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let result = service.remove_participant(map.id, owner.id, stranger.id).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    assert!(MapParticipantRepository::new(db)
        .find(map.id, friend.id)
        .await?
        .is_some());

    Ok(())
}
